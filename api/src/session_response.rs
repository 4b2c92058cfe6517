use docuquery::{QaPair, Session, SessionState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Upload,
    Chat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    pub view: View,
    pub filename: Option<String>,
    pub page_count: Option<usize>,
    pub extracting: bool,
    pub transcript: Vec<QaPair>,
    pub pending_question: Option<String>,
    pub error: Option<String>,
}

impl SessionView {
    pub fn new(id: Uuid, session: &Session) -> Self {
        let (view, filename, page_count, extracting) = match session.state() {
            SessionState::AwaitingDocument { .. } => (View::Upload, None, None, false),
            SessionState::Extracting { filename } => {
                (View::Upload, Some(filename.clone()), None, true)
            }
            SessionState::Ready { document, .. } => (
                View::Chat,
                Some(document.filename.clone()),
                Some(document.page_count),
                false,
            ),
        };

        Self {
            id,
            view,
            filename,
            page_count,
            extracting,
            transcript: session.transcript().to_vec(),
            pending_question: session.pending_question().map(str::to_string),
            error: session.last_error().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient message for the client to show once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    pub fn error(title: &str, description: &str) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    pub fn file_processed() -> Self {
        Self::success(
            "File Processed",
            "Your document is ready. You can now ask questions.",
        )
    }

    pub fn invalid_file_type() -> Self {
        Self::error("Invalid File Type", "Please upload a PDF file.")
    }

    pub fn extraction_failed() -> Self {
        Self::error(
            "Extraction Failed",
            "Could not extract text from the provided PDF.",
        )
    }

    pub fn failure(description: &str) -> Self {
        Self::error("An error occurred", description)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session: SessionView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

impl SessionResponse {
    pub fn quiet(session: SessionView) -> Self {
        Self {
            session,
            notification: None,
        }
    }

    pub fn notify(session: SessionView, notification: Notification) -> Self {
        Self {
            session,
            notification: Some(notification),
        }
    }
}
