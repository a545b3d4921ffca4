use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Card not found: {0}")]
    CardNotFound(Uuid),

    #[error("Version not found: {0}@{1}")]
    VersionNotFound(Uuid, i64),

    #[error("storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
