use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::simulation::cursor::DayCursor;
use crate::simulation::notifications::{NotificationKey, NotificationLedger, NOTIFIED_PREFIX};
use crate::simulation::state::SimulationState;

const PREFS_SCHEMA_VERSION: i64 = 1;

const PREFS_DB_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS prefs_meta (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  schema_version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS preferences (
  key TEXT PRIMARY KEY,
  value TEXT NOT NULL
);
"#;

pub const KEY_USERNAME: &str = "nombreUsuario";
pub const KEY_DEVELOPER_MODE: &str = "modoDesarrollador";
pub const KEY_CURRENT_DAY: &str = "diaActual";
pub const KEY_MESSAGE_INDEX: &str = "indiceMensajeDia";
pub const KEY_START_TIMESTAMP: &str = "fechaInicio";
pub const KEY_FIRST_LAUNCH: &str = "primer_arranque";
pub const KEY_SHIELD_TAPS: &str = "contadorToques";

#[derive(Debug)]
pub enum PrefsDbError {
    Sqlite(rusqlite::Error),
    InvalidData(String),
}

impl std::fmt::Display for PrefsDbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefsDbError::Sqlite(err) => write!(f, "sqlite error: {}", err),
            PrefsDbError::InvalidData(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for PrefsDbError {}

impl From<rusqlite::Error> for PrefsDbError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sqlite(err)
    }
}

fn bool_to_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn bool_from_str(key: &str, value: &str) -> Result<bool, PrefsDbError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(PrefsDbError::InvalidData(format!(
            "preference {} is not a boolean: {}",
            key, value
        ))),
    }
}

fn int_from_str(key: &str, value: &str) -> Result<i64, PrefsDbError> {
    value.trim().parse::<i64>().map_err(|_| {
        PrefsDbError::InvalidData(format!("preference {} is not an integer: {}", key, value))
    })
}

fn to_u32(key: &str, value: i64) -> Result<u32, PrefsDbError> {
    u32::try_from(value).map_err(|_| {
        PrefsDbError::InvalidData(format!("preference {} out of range: {}", key, value))
    })
}

/// Flat key-value preference file backed by SQLite.
pub struct PrefsDb {
    conn: Connection,
}

impl PrefsDb {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PrefsDbError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, PrefsDbError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, PrefsDbError> {
        let db = Self { conn };
        db.conn.execute_batch(PREFS_DB_SCHEMA)?;
        db.ensure_meta()?;
        Ok(db)
    }

    fn ensure_meta(&self) -> Result<(), PrefsDbError> {
        let version: Option<i64> = self
            .conn
            .query_row(
                "SELECT schema_version FROM prefs_meta WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        match version {
            None => {
                self.conn.execute(
                    "INSERT INTO prefs_meta (id, schema_version) VALUES (1, ?1)",
                    params![PREFS_SCHEMA_VERSION],
                )?;
                Ok(())
            }
            Some(found) if found == PREFS_SCHEMA_VERSION => Ok(()),
            Some(found) => Err(PrefsDbError::InvalidData(format!(
                "preferences schema version {} not supported (expected {})",
                found, PREFS_SCHEMA_VERSION
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, PrefsDbError> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }

    pub fn get_string(&self, key: &str, default: &str) -> Result<String, PrefsDbError> {
        Ok(self.get(key)?.unwrap_or_else(|| default.to_string()))
    }

    pub fn get_int(&self, key: &str, default: i64) -> Result<i64, PrefsDbError> {
        match self.get(key)? {
            Some(raw) => int_from_str(key, &raw),
            None => Ok(default),
        }
    }

    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool, PrefsDbError> {
        match self.get(key)? {
            Some(raw) => bool_from_str(key, &raw),
            None => Ok(default),
        }
    }

    pub fn put(&mut self, key: &str, value: &str) -> Result<(), PrefsDbError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Result<(), PrefsDbError> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?1", params![key])?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), PrefsDbError> {
        self.conn.execute("DELETE FROM preferences", [])?;
        Ok(())
    }

    pub fn keys(&self) -> Result<Vec<String>, PrefsDbError> {
        let mut stmt = self.conn.prepare("SELECT key FROM preferences ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }

    fn load_notified(&self) -> Result<NotificationLedger, PrefsDbError> {
        let mut ledger = NotificationLedger::default();
        for key in self.keys()? {
            if !key.starts_with(NOTIFIED_PREFIX) {
                continue;
            }
            if !self.get_bool(&key, false)? {
                continue;
            }
            let parsed = NotificationKey::from_pref_key(&key).ok_or_else(|| {
                PrefsDbError::InvalidData(format!("malformed notification key {}", key))
            })?;
            ledger.claim(parsed);
        }
        Ok(ledger)
    }

    /// Returns `None` when nothing has been stored yet.
    pub fn load_state(&self) -> Result<Option<SimulationState>, PrefsDbError> {
        if self.keys()?.is_empty() {
            return Ok(None);
        }
        let defaults = SimulationState::default();
        let day = to_u32(KEY_CURRENT_DAY, self.get_int(KEY_CURRENT_DAY, 1)?)?;
        let index = to_u32(KEY_MESSAGE_INDEX, self.get_int(KEY_MESSAGE_INDEX, 0)?)?;

        Ok(Some(SimulationState {
            cursor: DayCursor::new(day, index),
            start_timestamp_ms: self.get_int(KEY_START_TIMESTAMP, defaults.start_timestamp_ms)?,
            developer_mode: self.get_bool(KEY_DEVELOPER_MODE, defaults.developer_mode)?,
            username: self.get_string(KEY_USERNAME, "")?,
            notified: self.load_notified()?,
            shield_taps: to_u32(KEY_SHIELD_TAPS, self.get_int(KEY_SHIELD_TAPS, 0)?)?,
            first_launch: self.get_bool(KEY_FIRST_LAUNCH, defaults.first_launch)?,
        }))
    }

    pub fn load_or_init(&mut self) -> Result<SimulationState, PrefsDbError> {
        if let Some(state) = self.load_state()? {
            Ok(state)
        } else {
            let state = SimulationState::default();
            self.save_state(&state)?;
            Ok(state)
        }
    }

    pub fn save_state(&mut self, state: &SimulationState) -> Result<(), PrefsDbError> {
        let tx = self.conn.transaction()?;

        let scalars: [(&str, String); 7] = [
            (KEY_USERNAME, state.username.clone()),
            (KEY_DEVELOPER_MODE, bool_to_str(state.developer_mode).to_string()),
            (KEY_CURRENT_DAY, state.cursor.day.to_string()),
            (KEY_MESSAGE_INDEX, state.cursor.index.to_string()),
            (KEY_START_TIMESTAMP, state.start_timestamp_ms.to_string()),
            (KEY_FIRST_LAUNCH, bool_to_str(state.first_launch).to_string()),
            (KEY_SHIELD_TAPS, state.shield_taps.to_string()),
        ];
        for (key, value) in &scalars {
            tx.execute(
                "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }

        tx.execute(
            "DELETE FROM preferences WHERE key LIKE ?1",
            params![format!("{}%", NOTIFIED_PREFIX)],
        )?;
        for key in state.notified.keys() {
            tx.execute(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)",
                params![key.pref_key(), bool_to_str(true)],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}

impl crate::prefs::repository::PrefsRepository for PrefsDb {
    fn load_or_init(&mut self) -> Result<SimulationState, Box<dyn std::error::Error>> {
        Ok(PrefsDb::load_or_init(self)?)
    }

    fn save_state(&mut self, state: &SimulationState) -> Result<(), Box<dyn std::error::Error>> {
        Ok(PrefsDb::save_state(self, state)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_initializes_defaults() {
        let mut db = PrefsDb::open_in_memory().unwrap();
        assert!(db.load_state().unwrap().is_none());
        let state = db.load_or_init().unwrap();
        assert_eq!(state, SimulationState::default());
        assert!(db.load_state().unwrap().is_some());
    }

    #[test]
    fn state_survives_a_round_trip_through_sqlite() {
        let mut db = PrefsDb::open_in_memory().unwrap();
        let mut state = SimulationState {
            cursor: DayCursor::new(7, 2),
            start_timestamp_ms: 1_760_000_000_000,
            developer_mode: true,
            username: "Ana".to_string(),
            shield_taps: 2,
            first_launch: false,
            ..Default::default()
        };
        state.notified.claim(NotificationKey::new(7, 2));
        state.notified.claim(NotificationKey::new(1, 11));
        db.save_state(&state).unwrap();
        assert_eq!(db.load_state().unwrap(), Some(state.clone()));
        assert_eq!(db.get("notificado_dia_7_2").unwrap().as_deref(), Some("true"));

        state.notified.clear();
        db.save_state(&state).unwrap();
        let reloaded = db.load_state().unwrap().unwrap();
        assert!(reloaded.notified.is_empty());
        assert!(!db.keys().unwrap().iter().any(|k| k.starts_with(NOTIFIED_PREFIX)));
    }

    #[test]
    fn raw_values_use_defaults_and_reject_garbage() {
        let mut db = PrefsDb::open_in_memory().unwrap();
        assert_eq!(db.get_int(KEY_CURRENT_DAY, 1).unwrap(), 1);
        assert!(!db.get_bool(KEY_DEVELOPER_MODE, false).unwrap());
        db.put(KEY_CURRENT_DAY, "tres").unwrap();
        assert!(matches!(
            db.get_int(KEY_CURRENT_DAY, 1),
            Err(PrefsDbError::InvalidData(_))
        ));
        db.remove(KEY_CURRENT_DAY).unwrap();
        assert_eq!(db.get(KEY_CURRENT_DAY).unwrap(), None);
    }

    #[test]
    fn clear_empties_the_store() {
        let mut db = PrefsDb::open_in_memory().unwrap();
        db.put(KEY_USERNAME, "Ana").unwrap();
        db.clear().unwrap();
        assert!(db.keys().unwrap().is_empty());
    }

    #[test]
    fn negative_day_is_invalid() {
        let mut db = PrefsDb::open_in_memory().unwrap();
        db.put(KEY_CURRENT_DAY, "-3").unwrap();
        assert!(db.load_state().is_err());
    }
}
