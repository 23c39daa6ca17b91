//! Note editor presentation model.
//!
//! [`NoteEditor`] holds what a note-taking panel needs for one (student, tag) pair: the full
//! cross-interview history, a draft, a text filter and a date filter. It has no rendering of its
//! own; a UI (or the CLI) drives it and reads back the visible notes and their labels.
//!
//! Loads are split in two halves so that an asynchronous front-end can issue a request, await
//! it elsewhere and hand the result back. Every [`NoteEditor::open`] issues a [`LoadTicket`] with
//! a fresh token, and [`NoteEditor::complete_load`] ignores results whose ticket is no longer
//! the latest. When switching tags quickly, the response to the last request wins even if an
//! older request resolves after it.

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::history::NoteHistoryService;
use crate::models::{NewNote, NoteRecord};
use crate::EntrevistaError;

/// Backend operations the editor depends on.
pub trait NotesGateway {
    type Error: std::fmt::Display;

    fn fetch_history(
        &self,
        student_id: &str,
        tag_name: &str,
    ) -> Result<Vec<NoteRecord>, Self::Error>;

    fn submit_note(&self, interview_id: &str, note: NewNote) -> Result<NoteRecord, Self::Error>;
}

impl NotesGateway for NoteHistoryService {
    type Error = EntrevistaError;

    fn fetch_history(
        &self,
        student_id: &str,
        tag_name: &str,
    ) -> Result<Vec<NoteRecord>, Self::Error> {
        self.history_for_student_tag(student_id, tag_name)
    }

    fn submit_note(&self, interview_id: &str, note: NewNote) -> Result<NoteRecord, Self::Error> {
        self.add_note(interview_id, note)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("nothing to save: the draft is empty")]
    EmptyDraft,
    #[error("no active interview selected")]
    NoActiveInterview,
    #[error("no student and tag opened")]
    NothingOpen,
    #[error("history is still loading")]
    Busy,
    #[error("invalid note: {0}")]
    InvalidNote(String),
    #[error("failed to save the note: {0}")]
    Save(String),
}

/// The interview a history entry came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterviewRef {
    pub id: String,
    pub date: DateTime<Utc>,
    pub number: u32,
}

/// One entry of the in-memory history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryNote {
    pub id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub interview: InterviewRef,
}

impl From<NoteRecord> for HistoryNote {
    fn from(record: NoteRecord) -> Self {
        Self {
            id: record.id,
            content: record.content,
            timestamp: record.created_at,
            interview: InterviewRef {
                id: record.interview.id,
                date: record.interview.date,
                number: record.interview.number,
            },
        }
    }
}

/// Where a note sits relative to the interview currently open in the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoteOrigin {
    CurrentInterview,
    Previous { number: u32, date: DateTime<Utc> },
}

/// Local search criteria. Empty criteria match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub text: String,
    pub date: Option<NaiveDate>,
}

impl NoteFilter {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.date.is_none()
    }

    /// Case-insensitive substring match on content, and calendar-day match in `tz`.
    ///
    /// The note's day is taken with the offset `tz` had at the note's own instant, so notes on
    /// either side of a DST change land on their local day.
    pub fn matches<Tz: TimeZone>(&self, note: &HistoryNote, tz: &Tz) -> bool {
        let matches_text = self.text.is_empty()
            || note
                .content
                .to_lowercase()
                .contains(&self.text.to_lowercase());
        let matches_date = self
            .date
            .map_or(true, |day| note.timestamp.with_timezone(tz).date_naive() == day);
        matches_text && matches_date
    }
}

/// Identifies one issued history load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    token: u64,
    pub student_id: String,
    pub tag_name: String,
}

pub struct NoteEditor<Tz: TimeZone = Local> {
    student_id: Option<String>,
    tag_name: Option<String>,
    active_interview: Option<String>,
    note_context: Option<String>,
    notes: Vec<HistoryNote>,
    draft: String,
    filter: NoteFilter,
    loading: bool,
    latest_token: u64,
    tz: Tz,
}

impl NoteEditor<Local> {
    /// An editor using the host's time zone, including its DST rules.
    pub fn with_local_time() -> Self {
        Self::new(Local)
    }
}

impl<Tz> NoteEditor<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// An editor that computes day boundaries and times of day in `tz`.
    pub fn new(tz: Tz) -> Self {
        Self {
            student_id: None,
            tag_name: None,
            active_interview: None,
            note_context: None,
            notes: Vec::new(),
            draft: String::new(),
            filter: NoteFilter::default(),
            loading: false,
            latest_token: 0,
            tz,
        }
    }

    /// Switch to a (student, tag) pair.
    ///
    /// Clears the in-memory history, marks the editor as loading and returns the ticket the
    /// caller must pass back to [`NoteEditor::complete_load`].
    pub fn open(&mut self, student_id: impl Into<String>, tag_name: impl Into<String>) -> LoadTicket {
        let student_id = student_id.into();
        let tag_name = tag_name.into();

        self.latest_token += 1;
        self.student_id = Some(student_id.clone());
        self.tag_name = Some(tag_name.clone());
        self.notes.clear();
        self.loading = true;

        LoadTicket {
            token: self.latest_token,
            student_id,
            tag_name,
        }
    }

    /// Apply the outcome of a history load.
    ///
    /// Returns `false` (and changes nothing) if `ticket` is not the most recently issued one.
    /// A failed load is logged and leaves the history empty.
    pub fn complete_load<E: std::fmt::Display>(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<NoteRecord>, E>,
    ) -> bool {
        if ticket.token != self.latest_token {
            tracing::debug!(
                "discarding stale history for student {} tag '{}'",
                ticket.student_id,
                ticket.tag_name
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(records) => {
                self.notes = records.into_iter().map(HistoryNote::from).collect();
            }
            Err(e) => {
                tracing::error!(
                    "failed to load notes for student {} tag '{}': {}",
                    ticket.student_id,
                    ticket.tag_name,
                    e
                );
                self.notes.clear();
            }
        }
        true
    }

    /// Open a (student, tag) pair and load its history synchronously through `gateway`.
    pub fn load<G: NotesGateway>(
        &mut self,
        gateway: &G,
        student_id: impl Into<String>,
        tag_name: impl Into<String>,
    ) {
        let ticket = self.open(student_id, tag_name);
        let result = gateway.fetch_history(&ticket.student_id, &ticket.tag_name);
        self.complete_load(&ticket, result);
    }

    pub fn set_active_interview(&mut self, interview_id: Option<String>) {
        self.active_interview = interview_id;
    }

    pub fn active_interview(&self) -> Option<&str> {
        self.active_interview.as_deref()
    }

    /// Context string attached to every note saved from this editor.
    pub fn set_note_context(&mut self, context: Option<String>) {
        self.note_context = context;
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filter.text = text.into();
    }

    pub fn set_search_date(&mut self, date: Option<NaiveDate>) {
        self.filter.date = date;
    }

    pub fn clear_filters(&mut self) {
        self.filter = NoteFilter::default();
    }

    pub fn filter(&self) -> &NoteFilter {
        &self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn tag_name(&self) -> Option<&str> {
        self.tag_name.as_deref()
    }

    /// The full history, newest first as returned by the backend.
    pub fn notes(&self) -> &[HistoryNote] {
        &self.notes
    }

    /// Notes passing the current filter, in history order.
    pub fn visible_notes(&self) -> Vec<&HistoryNote> {
        self.notes
            .iter()
            .filter(|note| self.filter.matches(note, &self.tz))
            .collect()
    }

    pub fn can_save(&self) -> bool {
        !self.draft.trim().is_empty() && self.active_interview.is_some() && !self.loading
    }

    /// Submit the draft to the active interview.
    ///
    /// On success the saved note is prepended to the history and the draft is cleared. On
    /// failure the error is logged and returned, and the draft is kept.
    pub fn save<G: NotesGateway>(&mut self, gateway: &G) -> Result<&HistoryNote, EditorError> {
        if self.draft.trim().is_empty() {
            return Err(EditorError::EmptyDraft);
        }
        let interview_id = self
            .active_interview
            .clone()
            .ok_or(EditorError::NoActiveInterview)?;
        let tag_name = self.tag_name.clone().ok_or(EditorError::NothingOpen)?;
        if self.loading {
            return Err(EditorError::Busy);
        }

        let note = NewNote::new(tag_name, &self.draft, self.note_context.clone())
            .map_err(|e| EditorError::InvalidNote(e.to_string()))?;

        match gateway.submit_note(&interview_id, note) {
            Ok(record) => {
                self.notes.insert(0, HistoryNote::from(record));
                self.draft.clear();
                Ok(&self.notes[0])
            }
            Err(e) => {
                tracing::error!("failed to save note to interview {}: {}", interview_id, e);
                Err(EditorError::Save(e.to_string()))
            }
        }
    }

    /// Classify `note` against the active interview. Computed on demand, never stored.
    pub fn origin(&self, note: &HistoryNote) -> NoteOrigin {
        if self.active_interview.as_deref() == Some(note.interview.id.as_str()) {
            NoteOrigin::CurrentInterview
        } else {
            NoteOrigin::Previous {
                number: note.interview.number,
                date: note.interview.date,
            }
        }
    }

    pub fn origin_label(&self, note: &HistoryNote) -> String {
        match self.origin(note) {
            NoteOrigin::CurrentInterview => "Current interview".to_string(),
            NoteOrigin::Previous { number, date } => {
                format!("Interview {} - {}", number, format_day(&date, &self.tz))
            }
        }
    }

    /// "Today", "Yesterday", "N days ago" or the date, relative to `now`.
    pub fn relative_day(&self, timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
        relative_day(timestamp, now, &self.tz)
    }

    /// Time of day in the editor's time zone, `HH:MM`.
    pub fn time_of_day(&self, timestamp: &DateTime<Utc>) -> String {
        timestamp.with_timezone(&self.tz).format("%H:%M").to_string()
    }
}

fn format_day<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.with_timezone(tz).format("%d-%m-%Y").to_string()
}

/// Whole days elapsed between `timestamp` and `now`, rendered for a note header.
pub fn relative_day<Tz>(timestamp: &DateTime<Utc>, now: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let days = (*now - *timestamp).num_days();
    match days {
        d if d <= 0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{d} days ago"),
        _ => format_day(timestamp, tz),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InterviewSummary, NewInterview, Tag};
    use crate::store::NoteStore;
    use chrono::{Duration, FixedOffset, LocalResult, NaiveDateTime};
    use std::cell::RefCell;
    use std::sync::Arc;

    fn record(id: &str, interview: &str, number: u32, content: &str, at: DateTime<Utc>) -> NoteRecord {
        NoteRecord {
            id: id.into(),
            interview_id: interview.into(),
            tag_name: "Health".into(),
            content: content.into(),
            context: None,
            created_at: at,
            tag: Tag {
                id: 1,
                name: "Health".into(),
            },
            interview: InterviewSummary {
                id: interview.into(),
                date: at,
                number,
                year: 2024,
            },
        }
    }

    /// In-memory gateway that records submissions and can be told to fail.
    #[derive(Default)]
    struct FakeGateway {
        history: Vec<NoteRecord>,
        fail_submit: bool,
        submitted: RefCell<Vec<(String, String)>>,
    }

    impl NotesGateway for FakeGateway {
        type Error = String;

        fn fetch_history(&self, _: &str, _: &str) -> Result<Vec<NoteRecord>, String> {
            Ok(self.history.clone())
        }

        fn submit_note(&self, interview_id: &str, note: NewNote) -> Result<NoteRecord, String> {
            if self.fail_submit {
                return Err("connection refused".into());
            }
            self.submitted
                .borrow_mut()
                .push((interview_id.to_string(), note.content.as_str().to_string()));
            Ok(record(
                "new",
                interview_id,
                9,
                note.content.as_str(),
                Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            ))
        }
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn sample_history() -> Vec<NoteRecord> {
        vec![
            record(
                "n2",
                "B",
                2,
                "Missed three days",
                Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap(),
            ),
            record(
                "n1",
                "A",
                1,
                "Good attendance",
                Utc.with_ymd_and_hms(2024, 3, 10, 23, 30, 0).unwrap(),
            ),
        ]
    }

    fn loaded_editor(gateway: &FakeGateway) -> NoteEditor<FixedOffset> {
        let mut editor = NoteEditor::new(utc());
        editor.load(gateway, "S1", "Health");
        editor
    }

    #[test]
    fn load_populates_history_and_clears_loading() {
        let gateway = FakeGateway {
            history: sample_history(),
            ..Default::default()
        };
        let editor = loaded_editor(&gateway);
        assert!(!editor.is_loading());
        assert_eq!(editor.notes().len(), 2);
        assert_eq!(editor.visible_notes().len(), 2);
    }

    #[test]
    fn text_filter_is_case_insensitive_substring() {
        let gateway = FakeGateway {
            history: sample_history(),
            ..Default::default()
        };
        let mut editor = loaded_editor(&gateway);
        editor.set_search_text("ATTEND");

        let visible = editor.visible_notes();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "n1");
    }

    #[test]
    fn date_filter_without_match_keeps_history() {
        let gateway = FakeGateway {
            history: sample_history(),
            ..Default::default()
        };
        let mut editor = loaded_editor(&gateway);
        editor.set_search_date(NaiveDate::from_ymd_opt(2020, 1, 1));

        assert!(editor.visible_notes().is_empty());
        assert_eq!(editor.notes().len(), 2);
        assert!(!editor.filter().is_empty());

        editor.clear_filters();
        assert!(editor.filter().is_empty());
        assert_eq!(editor.visible_notes().len(), 2);
    }

    #[test]
    fn date_filter_uses_editor_offset() {
        let gateway = FakeGateway {
            history: sample_history(),
            ..Default::default()
        };
        // n1 is 2024-03-10 23:30 UTC, which is already 2024-03-11 at UTC+2.
        let mut editor = NoteEditor::new(FixedOffset::east_opt(2 * 3600).unwrap());
        editor.load(&gateway, "S1", "Health");

        editor.set_search_date(NaiveDate::from_ymd_opt(2024, 3, 11));
        assert_eq!(editor.visible_notes().len(), 1);
        editor.set_search_date(NaiveDate::from_ymd_opt(2024, 3, 10));
        assert!(editor.visible_notes().is_empty());
    }

    /// US Eastern time for 2024: EST, and EDT from 10 March to 3 November.
    #[derive(Clone, Copy, Debug)]
    struct Eastern2024;

    impl Eastern2024 {
        fn offset_at(utc: &NaiveDateTime) -> FixedOffset {
            let edt_start = NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_opt(7, 0, 0)
                .unwrap();
            let edt_end = NaiveDate::from_ymd_opt(2024, 11, 3)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap();
            let hours = if *utc >= edt_start && *utc < edt_end { -4 } else { -5 };
            FixedOffset::east_opt(hours * 3600).unwrap()
        }
    }

    impl TimeZone for Eastern2024 {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            Eastern2024
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(12, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            LocalResult::Single(Self::offset_at(&(*local + Duration::hours(5))))
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            Self::offset_at(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            Self::offset_at(utc)
        }
    }

    #[test]
    fn date_filter_follows_dst_per_note() {
        // 23:30 local on both days: EST (-5) in January, EDT (-4) in July.
        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 4, 30, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 3, 30, 0).unwrap();
        let gateway = FakeGateway {
            history: vec![
                record("summer", "B", 2, "After the break", summer),
                record("winter", "A", 1, "Before the break", winter),
            ],
            ..Default::default()
        };
        let mut editor = NoteEditor::new(Eastern2024);
        editor.load(&gateway, "S1", "Health");

        editor.set_search_date(NaiveDate::from_ymd_opt(2024, 1, 14));
        let visible: Vec<&str> = editor.visible_notes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(visible, vec!["winter"]);

        editor.set_search_date(NaiveDate::from_ymd_opt(2024, 7, 14));
        let visible: Vec<&str> = editor.visible_notes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(visible, vec!["summer"]);

        assert_eq!(editor.time_of_day(&winter), "23:30");
        assert_eq!(editor.time_of_day(&summer), "23:30");
        assert_eq!(editor.origin_label(&editor.notes()[1]), "Interview 1 - 14-01-2024");
    }

    #[test]
    fn both_filters_must_match() {
        let gateway = FakeGateway {
            history: sample_history(),
            ..Default::default()
        };
        let mut editor = loaded_editor(&gateway);
        editor.set_search_text("missed");
        editor.set_search_date(NaiveDate::from_ymd_opt(2024, 3, 10));
        assert!(editor.visible_notes().is_empty());
        editor.set_search_date(NaiveDate::from_ymd_opt(2024, 5, 20));
        assert_eq!(editor.visible_notes().len(), 1);
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut editor = NoteEditor::new(utc());
        let first = editor.open("S1", "Health");
        let second = editor.open("S1", "Family");

        // The newer request resolves first, then the older one arrives late.
        assert!(editor.complete_load::<String>(&second, Ok(vec![])));
        assert!(!editor.complete_load::<String>(&first, Ok(sample_history())));

        assert!(editor.notes().is_empty());
        assert_eq!(editor.tag_name(), Some("Family"));
    }

    #[test]
    fn failed_load_leaves_history_empty() {
        let mut editor = NoteEditor::new(utc());
        let ticket = editor.open("S1", "Health");
        assert!(editor.is_loading());
        editor.complete_load(&ticket, Err("timeout"));
        assert!(!editor.is_loading());
        assert!(editor.notes().is_empty());
    }

    #[test]
    fn save_requires_draft_and_active_interview() {
        let gateway = FakeGateway::default();
        let mut editor = loaded_editor(&gateway);

        editor.set_draft("   ");
        editor.set_active_interview(Some("B".into()));
        assert!(!editor.can_save());
        assert!(matches!(editor.save(&gateway), Err(EditorError::EmptyDraft)));

        editor.set_draft("Talked about sleep");
        editor.set_active_interview(None);
        assert!(!editor.can_save());
        assert!(matches!(
            editor.save(&gateway),
            Err(EditorError::NoActiveInterview)
        ));
        assert!(gateway.submitted.borrow().is_empty());
    }

    #[test]
    fn save_prepends_note_and_clears_draft() {
        let gateway = FakeGateway {
            history: sample_history(),
            ..Default::default()
        };
        let mut editor = loaded_editor(&gateway);
        editor.set_active_interview(Some("C".into()));
        editor.set_draft("  Talked about sleep  ");
        assert!(editor.can_save());

        let saved = editor.save(&gateway).unwrap().clone();
        assert_eq!(saved.content, "Talked about sleep");
        assert_eq!(editor.notes()[0], saved);
        assert_eq!(editor.notes().len(), 3);
        assert_eq!(editor.draft(), "");
        assert_eq!(editor.origin(&saved), NoteOrigin::CurrentInterview);
        assert_eq!(
            gateway.submitted.borrow().as_slice(),
            &[("C".to_string(), "Talked about sleep".to_string())]
        );
    }

    #[test]
    fn failed_save_keeps_draft() {
        let gateway = FakeGateway {
            history: sample_history(),
            fail_submit: true,
            ..Default::default()
        };
        let mut editor = loaded_editor(&gateway);
        editor.set_active_interview(Some("B".into()));
        editor.set_draft("Keep me");

        assert!(matches!(editor.save(&gateway), Err(EditorError::Save(_))));
        assert_eq!(editor.draft(), "Keep me");
        assert_eq!(editor.notes().len(), 2);
    }

    #[test]
    fn origin_labels_current_and_previous() {
        let gateway = FakeGateway {
            history: sample_history(),
            ..Default::default()
        };
        let mut editor = loaded_editor(&gateway);
        editor.set_active_interview(Some("B".into()));

        let notes = editor.notes().to_vec();
        assert_eq!(editor.origin_label(&notes[0]), "Current interview");
        assert_eq!(editor.origin_label(&notes[1]), "Interview 1 - 10-03-2024");
    }

    #[test]
    fn relative_day_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let offset = utc();
        assert_eq!(relative_day(&(now - Duration::hours(3)), &now, &offset), "Today");
        assert_eq!(relative_day(&(now - Duration::hours(30)), &now, &offset), "Yesterday");
        assert_eq!(relative_day(&(now - Duration::days(4)), &now, &offset), "4 days ago");
        assert_eq!(relative_day(&(now - Duration::days(10)), &now, &offset), "31-05-2024");
    }

    #[test]
    fn editor_against_real_service() {
        let service = NoteHistoryService::new(Arc::new(NoteStore::open_in_memory().unwrap()));
        let old = service
            .create_interview(NewInterview::new(
                "S1",
                2024,
                1,
                Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            ))
            .unwrap()
            .interview;
        let current = service
            .create_interview(NewInterview::new("S1", 2024, 2, Utc::now()))
            .unwrap()
            .interview;
        service
            .add_note(&old.id, NewNote::new("Health", "Good attendance", None).unwrap())
            .unwrap();

        let mut editor = NoteEditor::new(utc());
        editor.load(&service, "S1", "Health");
        editor.set_active_interview(Some(current.id.clone()));
        editor.set_note_context(Some("Entrevista con Ana".into()));
        editor.set_draft("Missed three days");
        editor.save(&service).unwrap();

        let labels: Vec<String> = editor
            .notes()
            .iter()
            .map(|n| editor.origin_label(n))
            .collect();
        assert_eq!(labels[0], "Current interview");
        assert_eq!(labels[1], "Interview 1 - 01-03-2024");

        // A fresh load shows the same history the editor built locally.
        let mut reloaded = NoteEditor::new(utc());
        reloaded.load(&service, "S1", "Health");
        assert_eq!(reloaded.notes(), editor.notes());
    }
}
