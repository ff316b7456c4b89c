pub mod config;
pub mod error;
pub mod quiz;
pub mod retry;

pub use error::{QuizError, Result};
