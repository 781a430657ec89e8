use axum::http::StatusCode;
use thiserror::Error;

/// Failures talking to the remote goal resource.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("goal resource request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("goal resource answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("goal resource returned a malformed payload: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Form input rejected before anything is sent to the goal resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter a valid deposit amount.")]
    InvalidDeposit,

    #[error("{field} is required.")]
    Missing { field: &'static str },

    #[error("{field} must be {expected}.")]
    Invalid {
        field: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn bad_gateway(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::bad_gateway(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
