use crate::session_response::Notification;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docuquery::{ExtractionError, SessionError};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Session not found.")]
    SessionNotFound,

    #[error("No file was uploaded.")]
    MissingFile,

    #[error("{message}")]
    Multipart { status: StatusCode, message: String },

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub notification: Notification,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::SessionNotFound => StatusCode::NOT_FOUND,
            ApiError::MissingFile => StatusCode::BAD_REQUEST,
            ApiError::Multipart { status, .. } => *status,
            ApiError::Extraction(ExtractionError::InvalidFileType { .. }) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Extraction(ExtractionError::Failed { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Session(SessionError::NoDocument | SessionError::EmptyQuestion) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Session(
                SessionError::QuestionPending
                | SessionError::ExtractionInProgress
                | SessionError::DocumentLoaded,
            ) => StatusCode::CONFLICT,
        }
    }

    pub fn notification(&self) -> Notification {
        match self {
            ApiError::Extraction(ExtractionError::InvalidFileType { .. }) => {
                Notification::invalid_file_type()
            }
            ApiError::Extraction(ExtractionError::Failed { .. }) => {
                Notification::extraction_failed()
            }
            other => Notification::failure(&other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
            notification: self.notification(),
        };
        (self.status(), Json(body)).into_response()
    }
}
