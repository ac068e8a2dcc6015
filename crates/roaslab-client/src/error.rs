use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `roaslab {cmd} --help` for usage."),
            None => "Run `roaslab --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn blank_scenario_name() -> Self {
        Self::invalid_argument_with_recovery(
            "Scenario name must not be blank.",
            vec!["Retry with a name, e.g. `roaslab scenario save \"Friday promo\" ...`.".to_string()],
        )
    }

    pub fn scenario_not_found(scenario_id: &str) -> Self {
        Self::new(
            "scenario_not_found",
            &format!("Scenario id `{scenario_id}` was not found."),
            vec![
                "Run `roaslab scenario list` to find a valid scenario id.".to_string(),
                "Retry with the id exactly as listed.".to_string(),
            ],
        )
        .with_data(json!({
            "scenario_id": scenario_id,
        }))
    }

    pub fn confirmation_required(scenario_count: usize) -> Self {
        Self::new(
            "confirmation_required",
            &format!(
                "Clearing removes all {scenario_count} saved scenarios and cannot be undone."
            ),
            vec!["Rerun `roaslab scenario clear --yes` to confirm.".to_string()],
        )
        .with_data(json!({
            "scenario_count": scenario_count,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn store_unavailable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_unavailable",
            &format!("Scenario store at `{location}` cannot be opened: {detail}"),
            vec![format!(
                "Make `{location}` writable or point `ROASLAB_HOME` at a writable directory."
            )],
        )
    }

    pub fn store_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_locked",
            &format!("Scenario store is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn store_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_corrupt",
            &format!("Scenario store appears corrupt at `{location}`."),
            vec![format!(
                "Move `{location}` aside; a fresh store is created on the next run."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Scenario store migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn storage_write_rejected(detail: &str) -> Self {
        Self::new("storage_write_rejected", detail, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
