#![forbid(unsafe_code)]

pub mod error;
pub mod quiz_service;
pub mod sheets;

pub use error::{ConfigError, QuizError};
pub use quiz_service::QuizService;
pub use sheets::{DEFAULT_SHEETS_BASE_URL, SheetsConfig, SheetsDatasetProvider};
