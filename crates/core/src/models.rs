//! Domain records for interviews, tags and notes.
//!
//! Records returned by the store (`Interview`, `Tag`, `NoteRecord`) are plain data. Inputs
//! (`NewInterview`, `NewNote`) carry validated text types so that a value which reaches the
//! store has already passed input checks.

use chrono::{DateTime, Utc};
use entrevistas_types::{NonEmptyText, TagName};
use serde::Serialize;

use crate::validation::{validate_optional_text, validate_tag_name};
use crate::EntrevistaResult;

/// One dated session between an interviewer and a student.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Interview {
    pub id: String,
    pub student_id: String,
    pub interviewer_id: Option<String>,
    pub date: DateTime<Utc>,
    pub tutor_name: Option<String>,
    pub year: i32,
    pub number: u32,
    pub duration_minutes: Option<u32>,
    pub interview_type: Option<String>,
    pub status: Option<String>,
    pub observations: Option<String>,
    pub topics: Option<String>,
}

/// The slice of interview metadata embedded in every note result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InterviewSummary {
    pub id: String,
    pub date: DateTime<Utc>,
    pub number: u32,
    pub year: i32,
}

/// A named topic category shared across all interviews.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// A persisted note joined with its tag and interview metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NoteRecord {
    pub id: String,
    pub interview_id: String,
    pub tag_name: String,
    pub content: String,
    pub context: Option<String>,
    pub created_at: DateTime<Utc>,
    pub tag: Tag,
    pub interview: InterviewSummary,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InterviewWithNotes {
    #[serde(flatten)]
    pub interview: Interview,
    pub notes: Vec<NoteRecord>,
}

/// A note to append to an existing interview.
#[derive(Clone, Debug)]
pub struct NewNote {
    pub tag_name: TagName,
    pub content: NonEmptyText,
    pub context: Option<String>,
}

impl NewNote {
    /// Validate raw caller input.
    ///
    /// `content` is trimmed and must not be blank. `tag_name` is kept verbatim. A blank
    /// `context` is treated as absent.
    pub fn new(
        tag_name: impl Into<String>,
        content: impl AsRef<str>,
        context: Option<String>,
    ) -> EntrevistaResult<Self> {
        let tag_name = validate_tag_name(tag_name)?;
        let content = NonEmptyText::new(content)?;
        validate_optional_text("contenido", Some(content.as_str()))?;
        let context = context.filter(|c| !c.trim().is_empty());
        validate_optional_text("contexto", context.as_deref())?;

        Ok(Self {
            tag_name,
            content,
            context,
        })
    }
}

/// A historical note supplied while creating an interview.
#[derive(Clone, Debug)]
pub struct NewInterviewNote {
    pub content: NonEmptyText,
    pub date: DateTime<Utc>,
    pub context: Option<String>,
}

/// Notes grouped under one tag while creating an interview.
#[derive(Clone, Debug)]
pub struct NewInterviewTag {
    pub name: TagName,
    pub notes: Vec<NewInterviewNote>,
}

/// Input for creating an interview. Checked by [`crate::validation::validate_new_interview`].
#[derive(Clone, Debug)]
pub struct NewInterview {
    pub student_id: String,
    pub interviewer_id: Option<String>,
    pub date: DateTime<Utc>,
    pub tutor_name: Option<String>,
    pub year: i32,
    pub number: u32,
    pub duration_minutes: Option<u32>,
    pub interview_type: Option<String>,
    pub status: Option<String>,
    pub observations: Option<String>,
    pub topics: Option<String>,
    pub tags: Vec<NewInterviewTag>,
}

impl NewInterview {
    /// Minimal interview with only the identifying tuple and date filled in.
    pub fn new(student_id: impl Into<String>, year: i32, number: u32, date: DateTime<Utc>) -> Self {
        Self {
            student_id: student_id.into(),
            interviewer_id: None,
            date,
            tutor_name: None,
            year,
            number,
            duration_minutes: None,
            interview_type: None,
            status: None,
            observations: None,
            topics: None,
            tags: Vec::new(),
        }
    }
}
