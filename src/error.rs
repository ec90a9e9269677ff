use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub type Result<T> = std::result::Result<T, Error>;

/// Message returned to callers for anything that is not an expected domain error.
const INTERNAL_MESSAGE: &str = "Unexpected internal exception";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} parameter must be set")]
    MissingParameter(&'static str),

    #[error("invalid {name} parameter: {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("unknown backend: {0}")]
    UnknownBackend(String),

    /// Backend answered with a status of 300 or above.
    #[error("{0}")]
    Backend(String),

    #[error("The API returned invalid JSON")]
    MalformedResponse,

    /// Backend answered with JSON that lacks a field we need.
    #[error("unexpected backend response: {0}")]
    UnexpectedShape(String),

    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl Error {
    fn error_type(&self) -> &'static str {
        match self {
            Error::MissingParameter(_) => "MissingParameter",
            Error::InvalidParameter { .. } => "InvalidParameter",
            Error::UnknownBackend(_) => "UnknownBackend",
            Error::Backend(_) => "BackendError",
            Error::MalformedResponse | Error::UnexpectedShape(_) => "MalformedResponse",
            Error::Transport(_) | Error::Io(_) | Error::Template(_) | Error::Internal(_) => {
                "InternalError"
            }
        }
    }

    /// Expected domain failures surface their message; everything else is hidden.
    pub fn is_expected(&self) -> bool {
        self.status_code() == StatusCode::BAD_REQUEST
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingParameter(_)
            | Error::InvalidParameter { .. }
            | Error::UnknownBackend(_)
            | Error::Backend(_)
            | Error::MalformedResponse
            | Error::UnexpectedShape(_) => StatusCode::BAD_REQUEST,
            Error::Transport(_) | Error::Io(_) | Error::Template(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let message = if self.is_expected() {
            self.to_string()
        } else {
            tracing::error!(error = %self, "unexpected exception while handling request");
            INTERNAL_MESSAGE.to_string()
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_type(),
                message,
            },
        };
        (self.status_code(), axum::Json(body)).into_response()
    }
}
