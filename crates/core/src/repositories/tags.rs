//! Tag rows (`etiquetas`).

use entrevistas_types::TagName;
use rusqlite::Connection;

use crate::models::Tag;
use crate::EntrevistaResult;

/// Insert-or-fetch a tag by exact name.
///
/// Relies on the `UNIQUE (nombre_etiqueta)` constraint, so two writers racing on the same new
/// name both end up with the single stored row. Returns the tag and whether this call created
/// it.
pub fn ensure(conn: &Connection, name: &TagName) -> EntrevistaResult<(Tag, bool)> {
    let inserted = conn.execute(
        "INSERT INTO etiquetas (nombre_etiqueta) VALUES (?1) ON CONFLICT (nombre_etiqueta) DO NOTHING",
        [name.as_str()],
    )?;

    let tag = conn.query_row(
        "SELECT id, nombre_etiqueta FROM etiquetas WHERE nombre_etiqueta = ?1",
        [name.as_str()],
        |row| {
            Ok(Tag {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )?;

    if inserted > 0 {
        tracing::debug!("created tag '{}' (id {})", tag.name, tag.id);
    }

    Ok((tag, inserted > 0))
}

/// All tags, ordered by name.
pub fn list(conn: &Connection) -> EntrevistaResult<Vec<Tag>> {
    let mut stmt =
        conn.prepare("SELECT id, nombre_etiqueta FROM etiquetas ORDER BY nombre_etiqueta")?;
    let tags = stmt
        .query_map([], |row| {
            Ok(Tag {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tags)
}
