use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::ffi::ErrorCode;
use rusqlite::{Connection, OptionalExtension, params};

use crate::migrations::run_pending;
use crate::state::store_db_path;
use crate::{ClientError, ClientResult};

const BUSY_TIMEOUT: Duration = Duration::from_millis(250);

/// Key-value blob persistence behind the scenario store.
pub trait BlobStorage {
    fn read(&self, key: &str) -> ClientResult<Option<String>>;

    /// Writes must be idempotent: writing the same value twice leaves the
    /// same state as writing it once.
    fn write(&mut self, key: &str, value: &str) -> ClientResult<()>;
}

/// SQLite-backed storage under the resolved data home.
///
/// Every read and write opens its own connection, so constructing the
/// storage never fails and a broken home only surfaces as a read or write error.
#[derive(Debug, Clone, Default)]
pub struct SqliteBlobStorage {
    home_override: Option<PathBuf>,
}

impl SqliteBlobStorage {
    /// Uses `ROASLAB_HOME`, falling back to `~/.roaslab`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(home: &Path) -> Self {
        Self {
            home_override: Some(home.to_path_buf()),
        }
    }

    /// Database file this storage reads and writes.
    pub fn db_path(&self) -> ClientResult<PathBuf> {
        store_db_path(self.home_override.as_deref())
    }

    fn connect(&self) -> ClientResult<(Connection, PathBuf)> {
        let db_path = self.db_path()?;
        if let Some(home) = db_path.parent() {
            create_private_dir(home)?;
        }

        let mut connection =
            Connection::open(&db_path).map_err(|error| sqlite_fault(&db_path, &error))?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .map_err(|error| sqlite_fault(&db_path, &error))?;
        run_pending(&mut connection).map_err(|error| match error {
            rusqlite_migration::Error::RusqliteError { err, .. } => sqlite_fault(&db_path, &err),
            other => ClientError::migration_failed(&db_path, &other.to_string()),
        })?;

        // A migrated database whose blob table was dropped or reshaped is unusable.
        connection
            .prepare("SELECT key, value, updated_at FROM internal_blobs LIMIT 0")
            .map_err(|_| ClientError::store_corrupt(&db_path))?;

        Ok((connection, db_path))
    }
}

impl BlobStorage for SqliteBlobStorage {
    fn read(&self, key: &str) -> ClientResult<Option<String>> {
        let (connection, db_path) = self.connect()?;
        connection
            .query_row(
                "SELECT value FROM internal_blobs WHERE key = ?1",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|error| sqlite_fault(&db_path, &error))
    }

    fn write(&mut self, key: &str, value: &str) -> ClientResult<()> {
        let (connection, db_path) = self.connect()?;
        connection
            .execute(
                "INSERT INTO internal_blobs (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, value, chrono::Utc::now().to_rfc3339()],
            )
            .map_err(|error| sqlite_fault(&db_path, &error))?;
        Ok(())
    }
}

fn create_private_dir(dir: &Path) -> ClientResult<()> {
    fs::create_dir_all(dir)
        .map_err(|error| ClientError::store_unavailable(dir, &error.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Best effort: a home we can write but not chmod is still usable.
        let _ = fs::set_permissions(dir, fs::Permissions::from_mode(0o700));
    }

    Ok(())
}

fn sqlite_fault(db_path: &Path, error: &rusqlite::Error) -> ClientError {
    match error.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
            ClientError::store_locked(db_path)
        }
        Some(ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt) => {
            ClientError::store_corrupt(db_path)
        }
        _ => ClientError::store_unavailable(db_path, &error.to_string()),
    }
}

/// In-process storage. `rejecting_writes` simulates a full or read-only backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStorage {
    entries: HashMap<String, String>,
    reject_writes: bool,
}

impl MemoryBlobStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_writes() -> Self {
        Self {
            entries: HashMap::new(),
            reject_writes: true,
        }
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl BlobStorage for MemoryBlobStorage {
    fn read(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> ClientResult<()> {
        if self.reject_writes {
            return Err(ClientError::storage_write_rejected(
                "In-memory storage is configured to reject writes.",
            ));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::{BlobStorage, MemoryBlobStorage, SqliteBlobStorage};

    #[test]
    fn sqlite_storage_reads_what_it_wrote() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(temp_dir) = temp {
            let mut storage = SqliteBlobStorage::at(&temp_dir.path().join("home"));
            assert!(matches!(storage.read("k"), Ok(None)));
            assert!(storage.write("k", "[1]").is_ok());
            assert!(storage.write("k", "[2]").is_ok());
            assert!(matches!(storage.read("k"), Ok(Some(value)) if value == "[2]"));
        }
    }

    #[test]
    fn home_that_is_a_file_is_unavailable() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(temp_dir) = temp {
            let home = temp_dir.path().join("not-a-dir");
            assert!(std::fs::write(&home, "x").is_ok());

            let mut storage = SqliteBlobStorage::at(&home);
            let written = storage.write("k", "[]");
            assert!(written.is_err());
            if let Err(error) = written {
                assert_eq!(error.code, "store_unavailable");
            }
            assert!(storage.read("k").is_err());
        }
    }

    #[test]
    fn non_database_file_is_corrupt() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(temp_dir) = temp {
            let home = temp_dir.path().join("home");
            assert!(std::fs::create_dir_all(&home).is_ok());
            assert!(std::fs::write(home.join("scenarios.db"), vec![0x42_u8; 4096]).is_ok());

            let result = SqliteBlobStorage::at(&home).read("k");
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.code, "store_corrupt");
            }
        }
    }

    #[test]
    fn memory_storage_can_reject_writes() {
        let mut storage = MemoryBlobStorage::rejecting_writes();
        let result = storage.write("k", "v");
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "storage_write_rejected");
        }
        assert!(matches!(storage.read("k"), Ok(None)));
    }
}
