pub mod config;
pub mod document_processor;
pub mod gemini_service;
pub mod models;
pub mod prompt;
pub mod query_service;
pub mod session;

pub use config::GeminiConfig;
pub use document_processor::{DocumentProcessor, ExtractionError, PageExtractor};
pub use gemini_service::GeminiService;
pub use models::*;
pub use query_service::{AnswerModel, QueryService, GENERIC_ANSWER_ERROR};
pub use session::{Effect, Session, SessionError, SessionEvent, SessionState};
