use std::path::{Path, PathBuf};

use crate::{ClientError, ClientResult};

pub const HOME_ENV_VAR: &str = "ROASLAB_HOME";

const DEFAULT_HOME_DIR: &str = ".roaslab";
const STORE_FILE_NAME: &str = "scenarios.db";

/// Where the scenario database lives: `<home>/scenarios.db`, with home taken
/// from the override, then `ROASLAB_HOME`, then `~/.roaslab`.
pub fn store_db_path(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let home = match home_override {
        Some(path) => path.to_path_buf(),
        None => match std::env::var_os(HOME_ENV_VAR) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => home::home_dir()
                .map(|dir| dir.join(DEFAULT_HOME_DIR))
                .ok_or_else(|| {
                    ClientError::store_unavailable(
                        Path::new(DEFAULT_HOME_DIR),
                        "no home directory could be resolved",
                    )
                })?,
        },
    };
    Ok(home.join(STORE_FILE_NAME))
}
