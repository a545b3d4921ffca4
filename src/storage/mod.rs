//! Card storage: sets of append-only-versioned source cards.
//!
//! Three tables back this: `card_sets`, `cards`, and `card_versions`. A card's source is
//! never overwritten — `edit_card` always appends a new version and bumps the head pointer,
//! so `rollback_card` is just another edit and is itself reversible. Deleting a set orphans
//! its cards (`set_id` set to null) rather than cascading, so a card's history always
//! survives the group it was filed under.
//!
//! This is the provenance source for the interpreter: callers of [`crate::Runtime::run_card`]
//! supply `(card_id, version)` as the context stamped onto every word a card's source
//! defines.

mod error;

pub use error::StorageError;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, StorageError>;

/// A named group of cards.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSet {
    pub id: Uuid,
    pub name: String,
    pub created_at: i64,
}

/// A card's identity and current-version pointer. Source text itself lives in
/// [`CardVersion`] rows; a `Card` is just the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: Uuid,
    pub set_id: Option<Uuid>,
    pub head_version: i64,
    pub created_at: i64,
}

/// One immutable snapshot of a card's source.
#[derive(Debug, Clone, PartialEq)]
pub struct CardVersion {
    pub card_id: Uuid,
    pub version: i64,
    pub source: String,
    pub created_at: i64,
}

/// A single-connection SQLite-backed card store. All methods are synchronous — the
/// interpreter only ever touches storage through `spawn_blocking` at its own `run_card`
/// boundary, never mid-execution.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (and, if new, initialize) a card store backed by a file on disk.
    pub fn open(path: &str) -> Result<Store> {
        let conn = Connection::open(path)?;
        Store::from_connection(conn)
    }

    /// An in-memory card store, for tests and ephemeral sessions.
    pub fn open_in_memory() -> Result<Store> {
        let conn = Connection::open_in_memory()?;
        Store::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Store> {
        install_schema(&conn)?;
        Ok(Store { conn: Mutex::new(conn) })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // -- sets -----------------------------------------------------------------------------

    pub fn create_set(&self, name: &str) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let created_at = Utc::now().timestamp();
        self.lock().execute(
            "INSERT INTO card_sets (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![id.to_string(), name, created_at],
        )?;
        Ok(id)
    }

    /// All sets, newest-first.
    pub fn list_sets(&self) -> Result<Vec<CardSet>> {
        let conn = self.lock();
        let mut statement =
            conn.prepare("SELECT id, name, created_at FROM card_sets ORDER BY created_at DESC")?;
        let rows = statement
            .query_map([], |row| {
                let id: String = row.get(0)?;
                Ok(CardSet {
                    id: Uuid::parse_str(&id).unwrap_or_default(),
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Orphan every card in the set (`set_id` set to null) and remove the set row. Cards and
    /// their full version history survive.
    pub fn delete_set(&self, id: Uuid) -> Result<()> {
        let conn = self.lock();
        conn.execute(
            "UPDATE cards SET set_id = NULL WHERE set_id = ?1",
            params![id.to_string()],
        )?;
        conn.execute("DELETE FROM card_sets WHERE id = ?1", params![id.to_string()])?;
        tracing::debug!(set = %id, "deleted card set, orphaning its cards");
        Ok(())
    }

    // -- cards ------------------------------------------------------------------------------

    /// Create a card with an initial version 0 holding `source`.
    pub fn create_card(&self, set_id: Option<Uuid>, source: &str) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let created_at = Utc::now().timestamp();
        let conn = self.lock();

        conn.execute(
            "INSERT INTO cards (id, set_id, head_version, created_at) VALUES (?1, ?2, 0, ?3)",
            params![id.to_string(), set_id.map(|s| s.to_string()), created_at],
        )?;
        conn.execute(
            "INSERT INTO card_versions (card_id, version, source, created_at) VALUES (?1, 0, ?2, ?3)",
            params![id.to_string(), source, created_at],
        )?;

        tracing::debug!(card = %id, "created card at version 0");
        Ok(id)
    }

    /// Append a new version and move the head pointer to it, returning the new version
    /// number.
    pub fn edit_card(&self, id: Uuid, new_source: &str) -> Result<i64> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        let head_version: Option<i64> = tx
            .query_row(
                "SELECT head_version FROM cards WHERE id = ?1",
                params![id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        let Some(head_version) = head_version else {
            return Err(StorageError::CardNotFound(id));
        };

        let new_version = head_version + 1;
        let created_at = Utc::now().timestamp();

        tx.execute(
            "INSERT INTO card_versions (card_id, version, source, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![id.to_string(), new_version, new_source, created_at],
        )?;
        tx.execute(
            "UPDATE cards SET head_version = ?1 WHERE id = ?2",
            params![new_version, id.to_string()],
        )?;

        tx.commit()?;
        tracing::debug!(card = %id, version = new_version, "appended card version");
        Ok(new_version)
    }

    /// The source at the card's current head version, or `None` if the card doesn't exist.
    pub fn get_card_source(&self, id: Uuid) -> Result<Option<String>> {
        let conn = self.lock();
        let head_version: Option<i64> = conn
            .query_row(
                "SELECT head_version FROM cards WHERE id = ?1",
                params![id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        let Some(head_version) = head_version else {
            return Ok(None);
        };

        let source: Option<String> = conn
            .query_row(
                "SELECT source FROM card_versions WHERE card_id = ?1 AND version = ?2",
                params![id.to_string(), head_version],
                |row| row.get(0),
            )
            .optional()?;
        Ok(source)
    }

    pub fn get_card_version(&self, id: Uuid, version: i64) -> Result<Option<CardVersion>> {
        let conn = self.lock();
        let row = conn
            .query_row(
                "SELECT card_id, version, source, created_at FROM card_versions \
                 WHERE card_id = ?1 AND version = ?2",
                params![id.to_string(), version],
                |row| {
                    Ok(CardVersion {
                        card_id: id,
                        version: row.get(1)?,
                        source: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// All versions of a card, newest-first.
    pub fn get_card_history(&self, id: Uuid) -> Result<Vec<CardVersion>> {
        let conn = self.lock();
        let mut statement = conn.prepare(
            "SELECT card_id, version, source, created_at FROM card_versions \
             WHERE card_id = ?1 ORDER BY version DESC",
        )?;
        let rows = statement
            .query_map(params![id.to_string()], |row| {
                Ok(CardVersion {
                    card_id: id,
                    version: row.get(1)?,
                    source: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Roll the head back to an earlier version's source. This is itself recorded as a new
    /// version, so a rollback can always be rolled back in turn.
    pub fn rollback_card(&self, id: Uuid, to_version: i64) -> Result<i64> {
        let version = self
            .get_card_version(id, to_version)?
            .ok_or(StorageError::VersionNotFound(id, to_version))?;
        self.edit_card(id, &version.source)
    }

    pub fn move_card(&self, id: Uuid, new_set_id: Option<Uuid>) -> Result<()> {
        let conn = self.lock();
        let updated = conn.execute(
            "UPDATE cards SET set_id = ?1 WHERE id = ?2",
            params![new_set_id.map(|s| s.to_string()), id.to_string()],
        )?;
        if updated == 0 {
            return Err(StorageError::CardNotFound(id));
        }
        Ok(())
    }

    /// Remove a card and every version of it.
    pub fn delete_card(&self, id: Uuid) -> Result<()> {
        let conn = self.lock();
        conn.execute("DELETE FROM card_versions WHERE card_id = ?1", params![id.to_string()])?;
        conn.execute("DELETE FROM cards WHERE id = ?1", params![id.to_string()])?;
        Ok(())
    }

    // -- interpreter convenience --------------------------------------------------------

    /// The card's head version and its source, for `run_card`.
    pub fn latest_version_source(&self, id: Uuid) -> Result<(i64, String)> {
        let conn = self.lock();
        let row: Option<(i64, String)> = conn
            .query_row(
                "SELECT c.head_version, v.source FROM cards c \
                 JOIN card_versions v ON v.card_id = c.id AND v.version = c.head_version \
                 WHERE c.id = ?1",
                params![id.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        row.ok_or(StorageError::CardNotFound(id))
    }

    /// A specific version's source, for `run_card_version`.
    pub fn version_source(&self, id: Uuid, version: i64) -> Result<String> {
        self.get_card_version(id, version)?
            .map(|v| v.source)
            .ok_or(StorageError::VersionNotFound(id, version))
    }
}

fn install_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS card_sets (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cards (
            id TEXT PRIMARY KEY,
            set_id TEXT REFERENCES card_sets(id),
            head_version INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS card_versions (
            card_id TEXT NOT NULL REFERENCES cards(id),
            version INTEGER NOT NULL,
            source TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            PRIMARY KEY (card_id, version)
        );",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_card_appends_versions_and_moves_head() {
        let store = Store::open_in_memory().unwrap();
        let id = store.create_card(None, "v0").unwrap();

        assert_eq!(store.edit_card(id, "v1").unwrap(), 1);
        assert_eq!(store.edit_card(id, "v2").unwrap(), 2);

        assert_eq!(store.get_card_source(id).unwrap(), Some("v2".to_string()));

        let history = store.get_card_history(id).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].source, "v2");
        assert_eq!(history[2].source, "v0");
    }

    #[test]
    fn rollback_is_itself_a_reversible_edit() {
        let store = Store::open_in_memory().unwrap();
        let id = store.create_card(None, "original").unwrap();
        store.edit_card(id, "changed").unwrap();

        let back_to_original = store.rollback_card(id, 0).unwrap();
        assert_eq!(back_to_original, 2);
        assert_eq!(store.get_card_source(id).unwrap(), Some("original".to_string()));

        let forward_again = store.rollback_card(id, 1).unwrap();
        assert_eq!(forward_again, 3);
        assert_eq!(store.get_card_source(id).unwrap(), Some("changed".to_string()));
    }

    #[test]
    fn deleting_a_set_orphans_its_cards_instead_of_cascading() {
        let store = Store::open_in_memory().unwrap();
        let set_id = store.create_set("scratch").unwrap();
        let card_id = store.create_card(Some(set_id), "hello").unwrap();

        store.delete_set(set_id).unwrap();

        assert_eq!(store.get_card_source(card_id).unwrap(), Some("hello".to_string()));
    }

    #[test]
    fn edit_unknown_card_reports_not_found() {
        let store = Store::open_in_memory().unwrap();
        let err = store.edit_card(Uuid::new_v4(), "x").unwrap_err();
        assert!(matches!(err, StorageError::CardNotFound(_)));
    }

    #[test]
    fn rollback_to_unknown_version_reports_not_found() {
        let store = Store::open_in_memory().unwrap();
        let id = store.create_card(None, "v0").unwrap();
        let err = store.rollback_card(id, 7).unwrap_err();
        assert!(matches!(err, StorageError::VersionNotFound(_, 7)));
    }
}
