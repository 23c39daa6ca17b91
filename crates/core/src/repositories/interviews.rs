//! Interview rows (`entrevistas`).

use rusqlite::{ffi, params, Connection, OptionalExtension, Row};

use crate::models::Interview;
use crate::store::{from_micros, to_micros};
use crate::{EntrevistaError, EntrevistaResult};

const SELECT_COLUMNS: &str = "id, estudiante_id, usuario_id, fecha, nombre_tutor, anio, \
     numero_entrevista, duracion_minutos, tipo_entrevista, estado, observaciones, temas_abordados";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Interview> {
    Ok(Interview {
        id: row.get(0)?,
        student_id: row.get(1)?,
        interviewer_id: row.get(2)?,
        date: from_micros(3, row.get(3)?)?,
        tutor_name: row.get(4)?,
        year: row.get(5)?,
        number: row.get(6)?,
        duration_minutes: row.get(7)?,
        interview_type: row.get(8)?,
        status: row.get(9)?,
        observations: row.get(10)?,
        topics: row.get(11)?,
    })
}

/// Insert a new interview.
///
/// # Errors
///
/// - [`EntrevistaError::DuplicateInterview`] if the (student, year, number) tuple is taken.
/// - [`EntrevistaError::Database`] for any other SQLite failure.
pub fn insert(conn: &Connection, interview: &Interview) -> EntrevistaResult<()> {
    let result = conn.execute(
        "INSERT INTO entrevistas (id, estudiante_id, usuario_id, fecha, nombre_tutor, anio, \
         numero_entrevista, duracion_minutos, tipo_entrevista, estado, observaciones, temas_abordados) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            interview.id,
            interview.student_id,
            interview.interviewer_id,
            to_micros(&interview.date),
            interview.tutor_name,
            interview.year,
            interview.number,
            interview.duration_minutes,
            interview.interview_type,
            interview.status,
            interview.observations,
            interview.topics,
        ],
    );

    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            Err(EntrevistaError::DuplicateInterview {
                number: interview.number,
                year: interview.year,
            })
        }
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_id(conn: &Connection, id: &str) -> EntrevistaResult<Option<Interview>> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM entrevistas WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], from_row).optional()?)
}

pub fn exists(conn: &Connection, id: &str) -> EntrevistaResult<bool> {
    Ok(conn
        .query_row("SELECT 1 FROM entrevistas WHERE id = ?1", [id], |_| Ok(()))
        .optional()?
        .is_some())
}

/// Identifiers of every interview belonging to `student_id`.
pub fn ids_for_student(conn: &Connection, student_id: &str) -> EntrevistaResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT id FROM entrevistas WHERE estudiante_id = ?1")?;
    let ids = stmt
        .query_map([student_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(ids)
}

/// All interviews, most recent date first.
pub fn list_all(conn: &Connection) -> EntrevistaResult<Vec<Interview>> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM entrevistas ORDER BY fecha DESC, rowid DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Interviews of one student, most recent date first.
pub fn list_for_student(conn: &Connection, student_id: &str) -> EntrevistaResult<Vec<Interview>> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM entrevistas WHERE estudiante_id = ?1 \
         ORDER BY fecha DESC, rowid DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([student_id], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}
