use serde_json::Value;
use tracing::{debug, info, warn};

use crate::inputs::Inputs;
use crate::scenario::ids::IdSource;
use crate::scenario::storage::BlobStorage;
use crate::scenario::validate::validate_scenario;
use crate::scenario::{SCENARIO_CAPACITY, SCENARIOS_STORAGE_KEY, Scenario};
use crate::{ClientError, ClientResult};

/// Whether a whole-list snapshot reached the backing storage.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PersistOutcome {
    Written,
    Dropped,
}

impl PersistOutcome {
    pub fn is_written(self) -> bool {
        self == Self::Written
    }
}

/// Whole-list persistence of scenarios over a blob storage.
///
/// Reads tolerate any blob shape. Write failures are logged and reported as
/// `PersistOutcome::Dropped` instead of failing the caller, whose in-memory
/// list stays authoritative.
#[derive(Debug, Clone)]
pub struct ScenarioStore<S: BlobStorage> {
    storage: S,
}

impl<S: BlobStorage> ScenarioStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn load_all(&self) -> Vec<Scenario> {
        match self.storage.read(SCENARIOS_STORAGE_KEY) {
            Ok(Some(blob)) => decode_scenarios(&blob),
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(code = %error.code, %error, "scenario store unreadable; starting empty");
                Vec::new()
            }
        }
    }

    pub fn save_all(&mut self, scenarios: &[Scenario]) -> PersistOutcome {
        let bounded = &scenarios[..scenarios.len().min(SCENARIO_CAPACITY)];
        let blob = match serde_json::to_string(bounded) {
            Ok(blob) => blob,
            Err(error) => {
                warn!(%error, "scenario list could not be encoded; write dropped");
                return PersistOutcome::Dropped;
            }
        };

        match self.storage.write(SCENARIOS_STORAGE_KEY, &blob) {
            Ok(()) => PersistOutcome::Written,
            Err(error) => {
                warn!(code = %error.code, %error, "scenario list write dropped");
                PersistOutcome::Dropped
            }
        }
    }
}

/// Decodes a persisted blob, keeping every entry that validates, in order,
/// up to the capacity.
pub fn decode_scenarios(blob: &str) -> Vec<Scenario> {
    let parsed = match serde_json::from_str::<Value>(blob) {
        Ok(value) => value,
        Err(error) => {
            debug!(%error, "persisted scenario blob is not valid JSON");
            return Vec::new();
        }
    };

    let Some(entries) = parsed.as_array() else {
        debug!("persisted scenario blob is not a list");
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match validate_scenario(entry) {
            Ok(scenario) => Some(scenario),
            Err(rejection) => {
                debug!(index, %rejection, "dropping persisted scenario entry");
                None
            }
        })
        .take(SCENARIO_CAPACITY)
        .collect()
}

/// The running session's scenario list, most recent first.
///
/// Every change is written through the store as a whole-list snapshot.
#[derive(Debug)]
pub struct ScenarioBook<S: BlobStorage> {
    store: ScenarioStore<S>,
    scenarios: Vec<Scenario>,
}

impl<S: BlobStorage> ScenarioBook<S> {
    pub fn open(store: ScenarioStore<S>) -> Self {
        let scenarios = store.load_all();
        Self { store, scenarios }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn store(&self) -> &ScenarioStore<S> {
        &self.store
    }

    pub fn find(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|scenario| scenario.id == id)
    }

    pub fn save(
        &mut self,
        name: &str,
        inputs: Inputs,
        ids: &mut dyn IdSource,
        created_at: i64,
    ) -> ClientResult<(Scenario, PersistOutcome)> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ClientError::blank_scenario_name());
        }

        let scenario = Scenario {
            id: ids.next_id(),
            name: trimmed.to_string(),
            created_at,
            inputs,
        };
        self.scenarios.insert(0, scenario.clone());
        self.scenarios.truncate(SCENARIO_CAPACITY);
        let outcome = self.store.save_all(&self.scenarios);
        info!(id = %scenario.id, count = self.scenarios.len(), ?outcome, "scenario saved");
        Ok((scenario, outcome))
    }

    pub fn delete(&mut self, id: &str) -> Option<(Scenario, PersistOutcome)> {
        let position = self
            .scenarios
            .iter()
            .position(|scenario| scenario.id == id)?;
        let removed = self.scenarios.remove(position);
        let outcome = self.store.save_all(&self.scenarios);
        info!(id = %removed.id, count = self.scenarios.len(), ?outcome, "scenario deleted");
        Some((removed, outcome))
    }

    /// Removes every scenario. Refuses without explicit confirmation.
    pub fn clear(&mut self, confirmed: bool) -> ClientResult<(usize, PersistOutcome)> {
        if !confirmed {
            return Err(ClientError::confirmation_required(self.scenarios.len()));
        }
        let removed = self.scenarios.len();
        self.scenarios.clear();
        let outcome = self.store.save_all(&self.scenarios);
        info!(removed, ?outcome, "scenario list cleared");
        Ok((removed, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::{PersistOutcome, ScenarioBook, ScenarioStore, decode_scenarios};
    use crate::inputs::{InputField, Inputs};
    use crate::scenario::ids::IdSource;
    use crate::scenario::storage::MemoryBlobStorage;
    use crate::scenario::{SCENARIO_CAPACITY, SCENARIOS_STORAGE_KEY};

    struct SequentialIds(u32);

    impl IdSource for SequentialIds {
        fn next_id(&mut self) -> String {
            self.0 += 1;
            format!("scn_{:03}", self.0)
        }
    }

    #[test]
    fn corrupt_blobs_load_as_empty() {
        assert!(decode_scenarios("{not json").is_empty());
        assert!(decode_scenarios("{\"id\":\"a\"}").is_empty());
        assert!(decode_scenarios("null").is_empty());
        assert!(decode_scenarios("[]").is_empty());
    }

    #[test]
    fn malformed_entries_are_filtered_not_fatal() {
        let blob = r#"[
            {"id":"a","name":"kept","createdAt":2,"inputs":{"todayGmv":"1"}},
            {"id":"b","name":"no timestamp","inputs":{}},
            42,
            {"id":"c","name":"also kept","createdAt":1,"inputs":{}}
        ]"#;
        let scenarios = decode_scenarios(blob);
        let ids = scenarios
            .iter()
            .map(|scenario| scenario.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn save_prepends_and_persists() {
        let store = ScenarioStore::new(MemoryBlobStorage::new());
        let mut book = ScenarioBook::open(store);
        let mut ids = SequentialIds(0);

        assert!(book.save("first", Inputs::default(), &mut ids, 1).is_ok());
        assert!(book.save("second", Inputs::default(), &mut ids, 2).is_ok());

        let names = book
            .scenarios()
            .iter()
            .map(|scenario| scenario.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["second", "first"]);
        assert_eq!(book.store().load_all(), book.scenarios().to_vec());
    }

    #[test]
    fn blank_names_are_rejected_without_writing() {
        let mut book = ScenarioBook::open(ScenarioStore::new(MemoryBlobStorage::new()));
        let result = book.save("   ", Inputs::default(), &mut SequentialIds(0), 1);
        assert!(result.is_err());
        assert!(book.scenarios().is_empty());
        assert_eq!(book.store().storage().raw(SCENARIOS_STORAGE_KEY), None);
    }

    #[test]
    fn capacity_keeps_the_newest_entries() {
        let mut book = ScenarioBook::open(ScenarioStore::new(MemoryBlobStorage::new()));
        let mut ids = SequentialIds(0);
        for index in 0..=SCENARIO_CAPACITY {
            let inputs = Inputs::default().with(InputField::TodayGmv, index.to_string());
            assert!(
                book.save(&format!("s{index}"), inputs, &mut ids, index as i64)
                    .is_ok()
            );
        }

        let persisted = book.store().load_all();
        assert_eq!(persisted.len(), SCENARIO_CAPACITY);
        assert_eq!(persisted[0].name, format!("s{SCENARIO_CAPACITY}"));
        assert_eq!(persisted[SCENARIO_CAPACITY - 1].name, "s1");
        assert!(book.find("scn_001").is_none());
    }

    #[test]
    fn failed_writes_keep_the_in_memory_list_and_report_dropped() {
        let mut book = ScenarioBook::open(ScenarioStore::new(MemoryBlobStorage::rejecting_writes()));
        let mut ids = SequentialIds(0);
        let saved = book.save("kept", Inputs::default(), &mut ids, 1);
        assert!(saved.is_ok());
        if let Ok((scenario, outcome)) = saved {
            assert_eq!(scenario.name, "kept");
            assert_eq!(outcome, PersistOutcome::Dropped);
            assert!(!outcome.is_written());
        }
        assert_eq!(book.scenarios().len(), 1);
        assert!(book.store().load_all().is_empty());

        assert!(matches!(
            book.delete("scn_001"),
            Some((_, PersistOutcome::Dropped))
        ));
        assert!(matches!(book.clear(true), Ok((0, PersistOutcome::Dropped))));
    }

    #[test]
    fn preloaded_entries_open_most_recent_first() {
        let blob = r#"[
            {"id":"scn_new","name":"newer","createdAt":20,"inputs":{"todayGmv":"900"}},
            {"id":"scn_old","name":"older","createdAt":10,"inputs":{}}
        ]"#;
        let storage = MemoryBlobStorage::new().with_entry(SCENARIOS_STORAGE_KEY, blob);
        let mut book = ScenarioBook::open(ScenarioStore::new(storage));

        assert_eq!(book.scenarios().len(), 2);
        assert_eq!(
            book.find("scn_new").map(|scenario| scenario.inputs.get(InputField::TodayGmv)),
            Some("900")
        );

        let saved = book.save("newest", Inputs::default(), &mut SequentialIds(0), 30);
        assert!(matches!(saved, Ok((_, PersistOutcome::Written))));
        let ids = book
            .store()
            .load_all()
            .into_iter()
            .map(|scenario| scenario.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["scn_001", "scn_new", "scn_old"]);
    }

    #[test]
    fn delete_and_clear() {
        let mut book = ScenarioBook::open(ScenarioStore::new(MemoryBlobStorage::new()));
        let mut ids = SequentialIds(0);
        for name in ["a", "b", "c"] {
            assert!(book.save(name, Inputs::default(), &mut ids, 0).is_ok());
        }

        assert!(matches!(
            book.delete("scn_002"),
            Some((removed, PersistOutcome::Written)) if removed.name == "b"
        ));
        assert!(book.delete("scn_002").is_none());
        assert_eq!(book.store().load_all().len(), 2);

        assert!(book.clear(false).is_err());
        assert_eq!(book.scenarios().len(), 2);

        assert!(matches!(book.clear(true), Ok((2, PersistOutcome::Written))));
        assert!(book.store().load_all().is_empty());
    }
}
