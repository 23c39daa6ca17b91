use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use entrevistas_core::validation::parse_date;
use entrevistas_core::{
    InterviewWithNotes, NewInterview, NewNote, NoteEditor, NoteHistoryService, NoteStore,
    DEFAULT_DATABASE_PATH,
};

#[derive(Parser)]
#[command(name = "entrevistas")]
#[command(about = "Interview notes CLI")]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "ENTREVISTAS_DB_PATH", default_value = DEFAULT_DATABASE_PATH)]
    db: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an interview
    CreateInterview {
        /// Student identifier
        student: String,
        /// Year the interview belongs to
        year: i32,
        /// Sequence number within the year
        number: u32,
        /// Interview date (RFC 3339 or YYYY-MM-DD, default: now)
        #[arg(long)]
        date: Option<String>,
        /// Interviewer identifier
        #[arg(long)]
        interviewer: Option<String>,
        /// Tutor name
        #[arg(long)]
        tutor: Option<String>,
        /// Duration in minutes
        #[arg(long)]
        duration: Option<u32>,
        /// Interview type
        #[arg(long = "type")]
        interview_type: Option<String>,
        /// Interview status
        #[arg(long)]
        status: Option<String>,
    },
    /// List interviews
    Interviews {
        /// Only interviews of this student
        #[arg(long)]
        student: Option<String>,
    },
    /// Add a note to an interview
    AddNote {
        /// Interview identifier
        interview_id: String,
        /// Tag name (exact match)
        tag: String,
        /// Note content
        content: String,
        /// Optional context string
        #[arg(long)]
        context: Option<String>,
    },
    /// Show every note of a student for one tag, across all interviews
    History {
        /// Student identifier
        student: String,
        /// Tag name (exact match)
        tag: String,
        /// Only notes containing this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,
        /// Only notes written on this day (YYYY-MM-DD, local time)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Interview to mark as the current one
        #[arg(long)]
        current: Option<String>,
    },
    /// Show the notes of one interview
    InterviewNotes {
        /// Interview identifier
        interview_id: String,
    },
    /// List all tags
    Tags,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("Use 'entrevistas --help' for commands");
        return Ok(());
    };

    let service = NoteHistoryService::new(Arc::new(NoteStore::open(&cli.db)?));

    match command {
        Commands::CreateInterview {
            student,
            year,
            number,
            date,
            interviewer,
            tutor,
            duration,
            interview_type,
            status,
        } => {
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => Utc::now(),
            };
            let mut input = NewInterview::new(student, year, number, date);
            input.interviewer_id = interviewer;
            input.tutor_name = tutor;
            input.duration_minutes = duration;
            input.interview_type = interview_type;
            input.status = status;

            match service.create_interview(input) {
                Ok(created) => println!("Created interview with ID: {}", created.interview.id),
                Err(e) => eprintln!("Error creating interview: {}", e),
            }
        }
        Commands::Interviews { student } => {
            let interviews = match student {
                Some(student) => service.interviews_for_student(&student)?,
                None => service.list_interviews()?,
            };
            if interviews.is_empty() {
                println!("No interviews found.");
            }
            for item in interviews {
                print_interview(&item);
            }
        }
        Commands::AddNote {
            interview_id,
            tag,
            content,
            context,
        } => {
            let note = NewNote::new(tag, content, context)?;
            match service.add_note(&interview_id, note) {
                Ok(saved) => println!(
                    "Added note {} at {}",
                    saved.id,
                    saved.created_at.to_rfc3339()
                ),
                Err(e) => eprintln!("Error adding note: {}", e),
            }
        }
        Commands::History {
            student,
            tag,
            search,
            date,
            current,
        } => {
            let mut editor = NoteEditor::with_local_time();
            editor.load(&service, student, tag.clone());
            editor.set_active_interview(current);
            editor.set_search_text(search.unwrap_or_default());
            editor.set_search_date(date);
            print_history(&editor, &tag);
        }
        Commands::InterviewNotes { interview_id } => {
            let notes = service.notes_for_interview(&interview_id)?;
            if notes.is_empty() {
                println!("No notes for interview {}.", interview_id);
            }
            for note in notes {
                println!(
                    "[{}] {}: {}",
                    note.created_at.to_rfc3339(),
                    note.tag_name,
                    note.content
                );
            }
        }
        Commands::Tags => {
            for tag in service.list_tags()? {
                println!("{}\t{}", tag.id, tag.name);
            }
        }
    }

    Ok(())
}

fn print_interview(item: &InterviewWithNotes) {
    let i = &item.interview;
    println!(
        "ID: {}, Student: {}, Interview {} / {}, Date: {}, Notes: {}",
        i.id,
        i.student_id,
        i.number,
        i.year,
        i.date.format("%Y-%m-%d"),
        item.notes.len()
    );
}

fn print_history(editor: &NoteEditor, tag: &str) {
    let visible = editor.visible_notes();
    if visible.is_empty() {
        if editor.notes().is_empty() {
            println!("No notes about {} yet.", tag.to_lowercase());
        } else {
            println!("No notes match those criteria.");
        }
        return;
    }

    if !editor.filter().is_empty() {
        println!(
            "Showing {} of {} notes (filtered)",
            visible.len(),
            editor.notes().len()
        );
    }

    println!(
        "Full history: {} observations across all interviews",
        visible.len()
    );
    let now = Utc::now();
    for note in visible {
        println!();
        println!(
            "{} {} | {}",
            editor.relative_day(&note.timestamp, &now),
            editor.time_of_day(&note.timestamp),
            editor.origin_label(note)
        );
        println!("{}", note.content);
    }
}
