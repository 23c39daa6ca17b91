//! Note rows (`textos`), always read joined with their tag and interview.

use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use crate::models::{InterviewSummary, NoteRecord, Tag};
use crate::store::{from_micros, to_micros};
use crate::EntrevistaResult;

const SELECT_JOINED: &str = "SELECT t.id, t.entrevista_id, t.nombre_etiqueta, t.contenido, \
     t.contexto, t.fecha, e.id AS etiqueta_id, n.fecha, n.numero_entrevista, n.anio \
     FROM textos t \
     JOIN etiquetas e ON e.nombre_etiqueta = t.nombre_etiqueta \
     JOIN entrevistas n ON n.id = t.entrevista_id";

/// Newest first; equal timestamps fall back to insertion order.
const ORDER_RECENT_FIRST: &str = "ORDER BY t.fecha DESC, t.rowid DESC";

/// Columns of a note row to insert.
pub struct NoteRow<'a> {
    pub id: &'a str,
    pub interview_id: &'a str,
    pub tag_name: &'a str,
    pub content: &'a str,
    pub context: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<NoteRecord> {
    let interview_id: String = row.get(1)?;
    let tag_name: String = row.get(2)?;
    Ok(NoteRecord {
        id: row.get(0)?,
        content: row.get(3)?,
        context: row.get(4)?,
        created_at: from_micros(5, row.get(5)?)?,
        tag: Tag {
            id: row.get(6)?,
            name: tag_name.clone(),
        },
        interview: InterviewSummary {
            id: interview_id.clone(),
            date: from_micros(7, row.get(7)?)?,
            number: row.get(8)?,
            year: row.get(9)?,
        },
        interview_id,
        tag_name,
    })
}

/// `?1, ?2, ... ?n` for an `IN (...)` clause starting at `first`.
fn placeholders(first: usize, count: usize) -> String {
    (first..first + count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn insert(conn: &Connection, note: &NoteRow<'_>) -> EntrevistaResult<()> {
    conn.execute(
        "INSERT INTO textos (id, entrevista_id, nombre_etiqueta, contenido, fecha, contexto) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            note.id,
            note.interview_id,
            note.tag_name,
            note.content,
            to_micros(&note.created_at),
            note.context,
        ],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: &str) -> EntrevistaResult<Option<NoteRecord>> {
    let sql = format!("{SELECT_JOINED} WHERE t.id = ?1");
    Ok(conn.query_row(&sql, [id], from_row).optional()?)
}

/// Notes of one interview, most recent first.
pub fn for_interview(conn: &Connection, interview_id: &str) -> EntrevistaResult<Vec<NoteRecord>> {
    let sql = format!("{SELECT_JOINED} WHERE t.entrevista_id = ?1 {ORDER_RECENT_FIRST}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([interview_id], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Notes of any of `interview_ids`, most recent first. Empty input yields no query.
pub fn for_interviews(
    conn: &Connection,
    interview_ids: &[String],
) -> EntrevistaResult<Vec<NoteRecord>> {
    if interview_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "{SELECT_JOINED} WHERE t.entrevista_id IN ({}) {ORDER_RECENT_FIRST}",
        placeholders(1, interview_ids.len())
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(interview_ids.iter()), from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Notes of any of `interview_ids` whose tag name equals `tag_name` exactly, most recent first.
pub fn for_interviews_and_tag(
    conn: &Connection,
    interview_ids: &[String],
    tag_name: &str,
) -> EntrevistaResult<Vec<NoteRecord>> {
    if interview_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "{SELECT_JOINED} WHERE t.nombre_etiqueta = ?1 AND t.entrevista_id IN ({}) {ORDER_RECENT_FIRST}",
        placeholders(2, interview_ids.len())
    );
    let mut stmt = conn.prepare(&sql)?;
    let args = std::iter::once(tag_name).chain(interview_ids.iter().map(String::as_str));
    let rows = stmt
        .query_map(params_from_iter(args), from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_numbered_from_first() {
        assert_eq!(placeholders(1, 3), "?1, ?2, ?3");
        assert_eq!(placeholders(2, 2), "?2, ?3");
        assert_eq!(placeholders(1, 0), "");
    }
}
