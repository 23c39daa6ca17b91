//! SQLite-backed note store.
//!
//! A single connection is held behind a mutex. Every public operation of the query layer
//! locks it once and runs its statements (inside one transaction for writes), so a call is
//! all-or-nothing.
//!
//! ## Schema
//!
//! - `entrevistas`: one row per interview, `UNIQUE (estudiante_id, anio, numero_entrevista)`.
//! - `etiquetas`: tag names, `UNIQUE (nombre_etiqueta)`; rows are created by upsert.
//! - `textos`: notes, referencing both of the above.
//!
//! Timestamps are stored as microseconds since the Unix epoch (UTC) so that ordering in SQL is
//! numeric and exact.

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::types::Type;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

use crate::{EntrevistaError, EntrevistaResult};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS entrevistas (
    id                TEXT PRIMARY KEY,
    estudiante_id     TEXT NOT NULL,
    usuario_id        TEXT,
    fecha             INTEGER NOT NULL,
    nombre_tutor      TEXT,
    anio              INTEGER NOT NULL,
    numero_entrevista INTEGER NOT NULL,
    duracion_minutos  INTEGER,
    tipo_entrevista   TEXT,
    estado            TEXT,
    observaciones     TEXT,
    temas_abordados   TEXT,
    UNIQUE (estudiante_id, anio, numero_entrevista)
);
CREATE INDEX IF NOT EXISTS idx_entrevistas_estudiante ON entrevistas (estudiante_id);

CREATE TABLE IF NOT EXISTS etiquetas (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre_etiqueta TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS textos (
    id              TEXT PRIMARY KEY,
    entrevista_id   TEXT NOT NULL REFERENCES entrevistas (id) ON DELETE CASCADE,
    nombre_etiqueta TEXT NOT NULL REFERENCES etiquetas (nombre_etiqueta),
    contenido       TEXT NOT NULL,
    fecha           INTEGER NOT NULL,
    contexto        TEXT
);
CREATE INDEX IF NOT EXISTS idx_textos_entrevista_etiqueta
    ON textos (entrevista_id, nombre_etiqueta);
"#;

/// Persistent store of interviews, tags and notes.
pub struct NoteStore {
    conn: Mutex<Connection>,
}

impl NoteStore {
    /// Open (or create) the database file at `path` and apply the schema.
    ///
    /// Missing parent directories are created.
    pub fn open(path: &Path) -> EntrevistaResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(EntrevistaError::StorageDirCreation)?;
        }
        tracing::info!("opening note store at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// A private in-memory database. Used by tests and throwaway CLI sessions.
    pub fn open_in_memory() -> EntrevistaResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> EntrevistaResult<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` with exclusive access to the connection.
    pub(crate) fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> EntrevistaResult<T>,
    ) -> EntrevistaResult<T> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| EntrevistaError::StoreUnavailable)?;
        f(&mut conn)
    }
}

/// Current time truncated to the precision the store keeps.
pub(crate) fn now_micros() -> DateTime<Utc> {
    truncate_micros(Utc::now())
}

pub(crate) fn truncate_micros(dt: DateTime<Utc>) -> DateTime<Utc> {
    Utc.timestamp_micros(dt.timestamp_micros())
        .single()
        .unwrap_or(dt)
}

pub(crate) fn to_micros(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp_micros()
}

/// Decode a stored timestamp column. `idx` is the column index, used in the error.
pub(crate) fn from_micros(idx: usize, micros: i64) -> rusqlite::Result<DateTime<Utc>> {
    Utc.timestamp_micros(micros).single().ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            Box::new(EntrevistaError::InvalidTimestamp(micros.to_string())),
        )
    })
}
