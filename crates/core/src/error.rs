#[derive(Debug, thiserror::Error)]
pub enum EntrevistaError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("interview {number} for year {year} already exists for this student")]
    DuplicateInterview { number: u32, year: i32 },
    #[error("interview not found: {0}")]
    InterviewNotFound(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("invalid stored timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("note store is unavailable (lock poisoned)")]
    StoreUnavailable,
}

impl EntrevistaError {
    /// Input the caller can fix (bad fields, duplicate interview tuple).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EntrevistaError::InvalidInput(_) | EntrevistaError::DuplicateInterview { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, EntrevistaError::InterviewNotFound(_))
    }
}

impl From<entrevistas_types::TextError> for EntrevistaError {
    fn from(err: entrevistas_types::TextError) -> Self {
        EntrevistaError::InvalidInput(err.to_string())
    }
}

pub type EntrevistaResult<T> = std::result::Result<T, EntrevistaError>;
