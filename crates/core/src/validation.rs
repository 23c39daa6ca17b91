//! Input validation utilities.
//!
//! Functions here check caller-supplied values before they reach the store.

use chrono::{DateTime, NaiveDate, Utc};
use entrevistas_types::TagName;

use crate::constants::{MAX_TAG_NAME_LEN, MAX_TEXT_LEN};
use crate::models::NewInterview;
use crate::{EntrevistaError, EntrevistaResult};

/// Parses an interview or note date.
///
/// Accepts a full RFC 3339 timestamp (`2024-03-05T10:30:00Z`, any offset, normalised to UTC)
/// or a bare calendar date (`2024-03-05`, taken as midnight UTC).
///
/// # Errors
///
/// Returns `EntrevistaError::InvalidInput` if neither form parses.
pub fn parse_date(value: &str) -> EntrevistaResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(EntrevistaError::InvalidInput(format!(
        "invalid date '{value}' (expected RFC 3339 or YYYY-MM-DD)"
    )))
}

pub fn validate_tag_name(name: impl Into<String>) -> EntrevistaResult<TagName> {
    let name = TagName::new(name)
        .map_err(|_| EntrevistaError::InvalidInput("nombre_etiqueta cannot be empty".into()))?;
    if name.as_str().len() > MAX_TAG_NAME_LEN {
        return Err(EntrevistaError::InvalidInput(format!(
            "nombre_etiqueta exceeds maximum length of {MAX_TAG_NAME_LEN} characters"
        )));
    }
    Ok(name)
}

pub fn validate_optional_text(field: &str, value: Option<&str>) -> EntrevistaResult<()> {
    match value {
        Some(v) if v.len() > MAX_TEXT_LEN => Err(EntrevistaError::InvalidInput(format!(
            "{field} exceeds maximum length of {MAX_TEXT_LEN} characters"
        ))),
        _ => Ok(()),
    }
}

/// Checks the fields of an interview before insert.
///
/// Uniqueness of (student, year, number) is enforced by the store, not here.
pub fn validate_new_interview(input: &NewInterview) -> EntrevistaResult<()> {
    if input.student_id.trim().is_empty() {
        return Err(EntrevistaError::InvalidInput(
            "id_estudiante cannot be empty".into(),
        ));
    }
    if !(1900..=9999).contains(&input.year) {
        return Err(EntrevistaError::InvalidInput(format!(
            "año {} is out of range",
            input.year
        )));
    }
    if input.number == 0 {
        return Err(EntrevistaError::InvalidInput(
            "numero_entrevista must be at least 1".into(),
        ));
    }

    validate_optional_text("nombre_tutor", input.tutor_name.as_deref())?;
    validate_optional_text("tipo_entrevista", input.interview_type.as_deref())?;
    validate_optional_text("estado", input.status.as_deref())?;
    validate_optional_text("observaciones", input.observations.as_deref())?;
    validate_optional_text("temas_abordados", input.topics.as_deref())?;

    for tag in &input.tags {
        validate_tag_name(tag.name.as_str())?;
        for note in &tag.notes {
            validate_optional_text("contenido", Some(note.content.as_str()))?;
            validate_optional_text("contexto", note.context.as_deref())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_date_accepts_rfc3339_with_offset() {
        let dt = parse_date("2024-03-05T10:30:00-03:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 5, 13, 30, 0).unwrap());
    }

    #[test]
    fn parse_date_accepts_bare_date() {
        let dt = parse_date("2024-03-05").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("05/03/2024"),
            Err(EntrevistaError::InvalidInput(_))
        ));
    }

    #[test]
    fn interview_number_zero_is_rejected() {
        let input = NewInterview::new("S1", 2024, 0, Utc::now());
        assert!(validate_new_interview(&input).is_err());
    }

    #[test]
    fn blank_student_is_rejected() {
        let input = NewInterview::new("  ", 2024, 1, Utc::now());
        assert!(validate_new_interview(&input).is_err());
    }

    #[test]
    fn overlong_tag_name_is_rejected() {
        let name = "x".repeat(MAX_TAG_NAME_LEN + 1);
        assert!(validate_tag_name(name).is_err());
    }
}
