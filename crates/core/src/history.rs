//! Note history query layer.
//!
//! [`NoteHistoryService`] is the single entry point the REST API, the CLI and the
//! [`crate::editor::NoteEditor`] use to read and write interview notes. It resolves a student's
//! full cross-interview history for one tag, appends notes to an interview (creating the tag on
//! first use), and creates interviews.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Interview, InterviewWithNotes, NewInterview, NewNote, NoteRecord, Tag};
use crate::repositories::notes::NoteRow;
use crate::repositories::{interviews, notes, tags};
use crate::store::{now_micros, truncate_micros, NoteStore};
use crate::validation::validate_new_interview;
use crate::{EntrevistaError, EntrevistaResult};

/// Read/write access to interviews, tags and notes.
#[derive(Clone)]
pub struct NoteHistoryService {
    store: Arc<NoteStore>,
}

impl NoteHistoryService {
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self { store }
    }

    /// Every note tagged `tag_name` across all interviews of `student_id`, newest first.
    ///
    /// The tag name is matched exactly (case-sensitive). A student with no interviews, including
    /// an unknown student id, yields an empty list rather than an error.
    pub fn history_for_student_tag(
        &self,
        student_id: &str,
        tag_name: &str,
    ) -> EntrevistaResult<Vec<NoteRecord>> {
        self.store.with_conn(|conn| {
            let interview_ids = interviews::ids_for_student(conn, student_id)?;
            if interview_ids.is_empty() {
                tracing::debug!("student {student_id} has no interviews");
                return Ok(Vec::new());
            }
            notes::for_interviews_and_tag(conn, &interview_ids, tag_name)
        })
    }

    /// Notes of a single interview, newest first. Unknown ids yield an empty list.
    pub fn notes_for_interview(&self, interview_id: &str) -> EntrevistaResult<Vec<NoteRecord>> {
        self.store
            .with_conn(|conn| notes::for_interview(conn, interview_id))
    }

    /// Append a note to an existing interview, stamped with the current server time.
    ///
    /// # Errors
    ///
    /// - [`EntrevistaError::InterviewNotFound`] if `interview_id` does not exist. Nothing is
    ///   written, in particular no tag is created.
    /// - [`EntrevistaError::Database`] on store failure; the transaction is rolled back.
    pub fn add_note(&self, interview_id: &str, note: NewNote) -> EntrevistaResult<NoteRecord> {
        self.add_note_at(interview_id, note, now_micros())
    }

    pub(crate) fn add_note_at(
        &self,
        interview_id: &str,
        note: NewNote,
        created_at: DateTime<Utc>,
    ) -> EntrevistaResult<NoteRecord> {
        self.store.with_conn(|conn| {
            let tx = conn.transaction()?;

            if !interviews::exists(&tx, interview_id)? {
                return Err(EntrevistaError::InterviewNotFound(interview_id.to_string()));
            }

            let (tag, created) = tags::ensure(&tx, &note.tag_name)?;
            if created {
                tracing::info!("tag '{}' created by first note", tag.name);
            }

            let id = Uuid::new_v4().to_string();
            notes::insert(
                &tx,
                &NoteRow {
                    id: &id,
                    interview_id,
                    tag_name: note.tag_name.as_str(),
                    content: note.content.as_str(),
                    context: note.context.as_deref(),
                    created_at,
                },
            )?;

            let record = notes::find_by_id(&tx, &id)?.ok_or_else(|| {
                EntrevistaError::InvalidInput(format!("note {id} vanished after insert"))
            })?;
            tx.commit()?;

            tracing::info!(
                "added note {} to interview {} under tag '{}'",
                record.id,
                interview_id,
                record.tag_name
            );
            Ok(record)
        })
    }

    /// Create an interview together with any initial notes it carries.
    ///
    /// # Errors
    ///
    /// - [`EntrevistaError::InvalidInput`] if a field fails validation.
    /// - [`EntrevistaError::DuplicateInterview`] if the student already has an interview with
    ///   the same year and number.
    pub fn create_interview(&self, input: NewInterview) -> EntrevistaResult<InterviewWithNotes> {
        validate_new_interview(&input)?;

        let interview = Interview {
            id: Uuid::new_v4().to_string(),
            student_id: input.student_id,
            interviewer_id: input.interviewer_id,
            date: truncate_micros(input.date),
            tutor_name: input.tutor_name,
            year: input.year,
            number: input.number,
            duration_minutes: input.duration_minutes,
            interview_type: input.interview_type,
            status: input.status,
            observations: input.observations,
            topics: input.topics,
        };

        self.store.with_conn(|conn| {
            let tx = conn.transaction()?;
            interviews::insert(&tx, &interview)?;

            for tag in &input.tags {
                tags::ensure(&tx, &tag.name)?;
                for note in &tag.notes {
                    let id = Uuid::new_v4().to_string();
                    notes::insert(
                        &tx,
                        &NoteRow {
                            id: &id,
                            interview_id: &interview.id,
                            tag_name: tag.name.as_str(),
                            content: note.content.as_str(),
                            context: note.context.as_deref(),
                            created_at: truncate_micros(note.date),
                        },
                    )?;
                }
            }

            let notes = notes::for_interview(&tx, &interview.id)?;
            tx.commit()?;

            tracing::info!(
                "created interview {} (student {}, {} #{}) with {} notes",
                interview.id,
                interview.student_id,
                interview.year,
                interview.number,
                notes.len()
            );
            Ok(InterviewWithNotes { interview, notes })
        })
    }

    /// One interview with its notes.
    pub fn get_interview(&self, interview_id: &str) -> EntrevistaResult<InterviewWithNotes> {
        self.store.with_conn(|conn| {
            let interview = interviews::find_by_id(conn, interview_id)?
                .ok_or_else(|| EntrevistaError::InterviewNotFound(interview_id.to_string()))?;
            let notes = notes::for_interview(conn, interview_id)?;
            Ok(InterviewWithNotes { interview, notes })
        })
    }

    /// Every interview, newest first, each with its notes.
    pub fn list_interviews(&self) -> EntrevistaResult<Vec<InterviewWithNotes>> {
        self.store.with_conn(|conn| {
            let all = interviews::list_all(conn)?;
            attach_notes(conn, all)
        })
    }

    /// Interviews of one student, newest first, each with its notes.
    pub fn interviews_for_student(
        &self,
        student_id: &str,
    ) -> EntrevistaResult<Vec<InterviewWithNotes>> {
        self.store.with_conn(|conn| {
            let found = interviews::list_for_student(conn, student_id)?;
            attach_notes(conn, found)
        })
    }

    pub fn list_tags(&self) -> EntrevistaResult<Vec<Tag>> {
        self.store.with_conn(|conn| tags::list(conn))
    }
}

/// Load the notes of all `found` interviews in one query and group them per interview.
fn attach_notes(
    conn: &rusqlite::Connection,
    found: Vec<Interview>,
) -> EntrevistaResult<Vec<InterviewWithNotes>> {
    let ids: Vec<String> = found.iter().map(|i| i.id.clone()).collect();
    let mut grouped: HashMap<String, Vec<NoteRecord>> = HashMap::new();
    for note in notes::for_interviews(conn, &ids)? {
        grouped.entry(note.interview_id.clone()).or_default().push(note);
    }

    Ok(found
        .into_iter()
        .map(|interview| {
            let notes = grouped.remove(&interview.id).unwrap_or_default();
            InterviewWithNotes { interview, notes }
        })
        .collect())
}
