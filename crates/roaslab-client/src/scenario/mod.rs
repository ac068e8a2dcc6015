pub mod export;
pub mod ids;
pub mod storage;
pub mod store;
pub mod summary;
pub mod validate;

use serde::{Deserialize, Serialize};

use crate::inputs::Inputs;

/// Persisted lists never exceed this many entries; the oldest are dropped on write.
pub const SCENARIO_CAPACITY: usize = 100;

/// Fixed, versioned key of the persisted scenario list.
pub const SCENARIOS_STORAGE_KEY: &str = "roaslab.scenarios.v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    pub inputs: Inputs,
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub use ids::{IdSource, UlidIdSource};
pub use storage::{BlobStorage, MemoryBlobStorage, SqliteBlobStorage};
pub use store::{PersistOutcome, ScenarioBook, ScenarioStore};
pub use summary::{QuickMetrics, quick_metrics};
pub use validate::{ScenarioRejection, validate_and_normalize, validate_scenario};
