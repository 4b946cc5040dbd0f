use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsultationError {
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConsultationResult<T> = Result<T, ConsultationError>;
