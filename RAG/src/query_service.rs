use crate::models::*;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub const GENERIC_ANSWER_ERROR: &str =
    "An unexpected error occurred while processing your question.";

const EMPTY_DOCUMENT: &str = "Document text cannot be empty.";
const EMPTY_QUESTION: &str = "Question cannot be empty.";

/// A generative model that answers one question about one document.
#[async_trait]
pub trait AnswerModel: Send + Sync {
    async fn answer(&self, document_text: &str, question: &str) -> Result<Answer>;
}

pub struct QueryService {
    model: Arc<dyn AnswerModel>,
}

impl QueryService {
    pub fn new(model: Arc<dyn AnswerModel>) -> Self {
        Self { model }
    }

    pub async fn ask(&self, request: &AskRequest) -> AskResponse {
        self.ask_about(&request.document_text, &request.question)
            .await
    }

    /// Validates the input, makes a single model call and folds every
    /// failure into an `{error}` response. Failure details only go to the log.
    pub async fn ask_about(&self, document_text: &str, question: &str) -> AskResponse {
        if let Err(message) = validate(document_text, question) {
            log::warn!("Rejected question: {}", message);
            return AskResponse::error(message);
        }

        match self.model.answer(document_text, question).await {
            Ok(answer) => {
                log::info!(
                    "Answered question ({} chars of document, snippet: {})",
                    document_text.len(),
                    answer.snippet.is_some()
                );
                AskResponse::Answered(answer)
            }
            Err(e) => {
                log::error!("Error answering question: {:#}", e);
                AskResponse::error(GENERIC_ANSWER_ERROR)
            }
        }
    }
}

/// Collects every violated constraint into one message.
pub fn validate(document_text: &str, question: &str) -> std::result::Result<(), String> {
    let mut violations = Vec::new();

    if document_text.trim().is_empty() {
        violations.push(EMPTY_DOCUMENT);
    }
    if question.trim().is_empty() {
        violations.push(EMPTY_QUESTION);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(format!("Invalid input: {}", violations.join(", ")))
    }
}
