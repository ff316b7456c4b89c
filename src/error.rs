use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    /// Upstream data broke the one-correct-answer invariant, or more answers
    /// were asked for than a question has.
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Trivia provider unavailable after {attempts} attempt(s): {reason}")]
    ProviderUnavailable { attempts: usize, reason: String },

    #[error("The Unknown category cannot be used in a question request")]
    UnknownCategory,

    #[error("Input stream closed")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Record store error: {0}")]
    Record(String),
}

pub type Result<T> = std::result::Result<T, QuizError>;
