use thiserror::Error;

/// Failure taxonomy of the study core. Nothing here is fatal: validation
/// errors leave state untouched, collaborator errors fall back to defaults,
/// persistence errors surface to the caller with the in-memory state intact.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StudyError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("collaborator failure: {0}")]
    Collaborator(String),

    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl StudyError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StudyError::Validation(_))
    }

    pub fn is_collaborator(&self) -> bool {
        matches!(self, StudyError::Collaborator(_))
    }
}
