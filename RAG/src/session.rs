//! Per-user session as a single state value driven by discrete events.
//!
//! The two views of the interaction loop map onto [`SessionState`]:
//! `AwaitingDocument` and `Extracting` show the upload target, `Ready`
//! shows the transcript and question box. Long-running work (extraction and
//! the model call) happens outside the session; the caller gets an
//! [`Effect`] describing what to run and reports back with a completion
//! event tagged with the generation it was started under.

use crate::models::{Answer, AskResponse, Document, QaPair};
use std::sync::Arc;

pub const EXTRACTION_FAILED: &str = "Failed to extract text from the PDF.";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    AwaitingDocument {
        last_error: Option<String>,
    },
    Extracting {
        filename: String,
    },
    Ready {
        document: Arc<Document>,
        transcript: Vec<QaPair>,
        pending: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    UploadStarted { filename: String },
    DocumentExtracted { generation: u64, document: Document },
    ExtractionFailed { generation: u64 },
    QuestionSubmitted { question: String },
    AnswerReceived { generation: u64, answer: Answer },
    AnswerFailed { generation: u64, message: String },
    Reset,
}

impl SessionEvent {
    /// Maps the QA boundary's two response shapes onto completion events.
    pub fn from_response(generation: u64, response: AskResponse) -> Self {
        match response {
            AskResponse::Answered(answer) => SessionEvent::AnswerReceived { generation, answer },
            AskResponse::Failed { error } => SessionEvent::AnswerFailed {
                generation,
                message: error,
            },
        }
    }
}

/// What the caller has to do after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run extraction and report `DocumentExtracted` or `ExtractionFailed`.
    Extract { generation: u64 },
    /// Call the QA capability and report `AnswerReceived` or `AnswerFailed`.
    Ask {
        generation: u64,
        document: Arc<Document>,
        question: String,
    },
    Applied,
    /// A completion from a discarded generation; state untouched.
    Stale,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Upload a document before asking a question.")]
    NoDocument,

    #[error("Question cannot be empty.")]
    EmptyQuestion,

    #[error("A question is already being answered.")]
    QuestionPending,

    #[error("A document is already loaded. Reset the session to upload another.")]
    DocumentLoaded,

    #[error("A document is already being processed.")]
    ExtractionInProgress,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    state: SessionState,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::AwaitingDocument { last_error: None },
            generation: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn document(&self) -> Option<&Document> {
        match &self.state {
            SessionState::Ready { document, .. } => Some(document),
            _ => None,
        }
    }

    pub fn transcript(&self) -> &[QaPair] {
        match &self.state {
            SessionState::Ready { transcript, .. } => transcript,
            _ => &[],
        }
    }

    pub fn pending_question(&self) -> Option<&str> {
        match &self.state {
            SessionState::Ready { pending, .. } => pending.as_deref(),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        match &self.state {
            SessionState::AwaitingDocument { last_error } => last_error.as_deref(),
            _ => None,
        }
    }

    pub fn apply(&mut self, event: SessionEvent) -> Result<Effect, SessionError> {
        match event {
            SessionEvent::UploadStarted { filename } => self.start_upload(filename),
            SessionEvent::DocumentExtracted {
                generation,
                document,
            } => Ok(self.finish_extraction(generation, Ok(document))),
            SessionEvent::ExtractionFailed { generation } => {
                Ok(self.finish_extraction(generation, Err(())))
            }
            SessionEvent::QuestionSubmitted { question } => self.submit_question(question),
            SessionEvent::AnswerReceived { generation, answer } => {
                Ok(self.finish_question(generation, Some(answer)))
            }
            SessionEvent::AnswerFailed {
                generation,
                message,
            } => {
                log::warn!("Question failed: {}", message);
                Ok(self.finish_question(generation, None))
            }
            SessionEvent::Reset => {
                self.generation += 1;
                self.state = SessionState::AwaitingDocument { last_error: None };
                Ok(Effect::Applied)
            }
        }
    }

    fn start_upload(&mut self, filename: String) -> Result<Effect, SessionError> {
        match &self.state {
            SessionState::Extracting { .. } => return Err(SessionError::ExtractionInProgress),
            SessionState::Ready {
                pending: Some(_), ..
            } => return Err(SessionError::QuestionPending),
            // leaving the chat view takes an explicit reset
            SessionState::Ready { .. } => return Err(SessionError::DocumentLoaded),
            SessionState::AwaitingDocument { .. } => {}
        }

        self.generation += 1;
        self.state = SessionState::Extracting { filename };
        Ok(Effect::Extract {
            generation: self.generation,
        })
    }

    fn finish_extraction(&mut self, generation: u64, outcome: Result<Document, ()>) -> Effect {
        if generation != self.generation || !matches!(self.state, SessionState::Extracting { .. })
        {
            return Effect::Stale;
        }

        self.state = match outcome {
            Ok(document) => SessionState::Ready {
                document: Arc::new(document),
                transcript: Vec::new(),
                pending: None,
            },
            Err(()) => SessionState::AwaitingDocument {
                last_error: Some(EXTRACTION_FAILED.to_string()),
            },
        };
        Effect::Applied
    }

    fn submit_question(&mut self, question: String) -> Result<Effect, SessionError> {
        if matches!(self.state, SessionState::Extracting { .. }) {
            return Err(SessionError::ExtractionInProgress);
        }
        let SessionState::Ready {
            document, pending, ..
        } = &mut self.state
        else {
            return Err(SessionError::NoDocument);
        };

        if pending.is_some() {
            return Err(SessionError::QuestionPending);
        }
        if question.trim().is_empty() {
            return Err(SessionError::EmptyQuestion);
        }

        *pending = Some(question.clone());
        Ok(Effect::Ask {
            generation: self.generation,
            document: Arc::clone(document),
            question,
        })
    }

    fn finish_question(&mut self, generation: u64, answer: Option<Answer>) -> Effect {
        if generation != self.generation {
            return Effect::Stale;
        }
        let SessionState::Ready {
            transcript,
            pending,
            ..
        } = &mut self.state
        else {
            return Effect::Stale;
        };
        let Some(question) = pending.take() else {
            return Effect::Stale;
        };

        if let Some(answer) = answer {
            transcript.push(QaPair {
                question,
                answer: answer.answer,
                snippet: answer.snippet,
            });
        }
        Effect::Applied
    }
}
