//! # Entrevistas Core
//!
//! Core logic for recording and browsing interview notes.
//!
//! Students are interviewed repeatedly over the years. During each interview the interviewer
//! writes free-text notes ("textos") filed under a topic ("etiqueta"). This crate contains:
//! - the SQLite-backed note store and its table-level repositories,
//! - [`NoteHistoryService`], which answers "every note about this topic for this student,
//!   across all of their interviews" and appends notes to an interview,
//! - [`editor::NoteEditor`], the presentation model a note-taking panel is built on.
//!
//! **No API concerns**: HTTP servers and wire formats belong in `api-rest` and `api-shared`.

pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod history;
pub mod models;
pub mod repositories;
pub mod store;
pub mod validation;

pub use config::CoreConfig;
pub use constants::{DEFAULT_DATABASE_PATH, DEFAULT_REST_ADDR};
pub use editor::{EditorError, HistoryNote, NoteEditor, NoteFilter, NoteOrigin, NotesGateway};
pub use error::{EntrevistaError, EntrevistaResult};
pub use history::NoteHistoryService;
pub use models::{
    Interview, InterviewSummary, InterviewWithNotes, NewInterview, NewInterviewNote,
    NewInterviewTag, NewNote, NoteRecord, Tag,
};
pub use store::NoteStore;

pub use entrevistas_types::{NonEmptyText, TagName, TextError};
