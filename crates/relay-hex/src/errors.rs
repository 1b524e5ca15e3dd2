use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use relay_types::domain::envelope::Envelope;
use relay_types::ports::upstream::UpstreamError;
use thiserror::Error;

use crate::application::operation::Operation;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("{0} required")]
    Missing(&'static str),

    #[error("Auth failed")]
    AuthFailed,

    #[error("{} - API {status}: {body}", .op.failure_prefix())]
    Upstream {
        op: Operation,
        status: u16,
        body: String,
    },

    #[error("{}", .0.invalid_format_message())]
    InvalidFormat(Operation),

    #[error("Invalid Order - Order not found or no data returned")]
    OrderNotFound,

    #[error("Error {}: {source}", .op.activity())]
    Transport {
        op: Operation,
        #[source]
        source: UpstreamError,
    },
}

impl From<RelayError> for Envelope {
    fn from(err: RelayError) -> Self {
        Envelope::failure(err.to_string())
    }
}

// Failures travel in the envelope; callers check `success`, not the status.
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(Envelope::from(self))).into_response()
    }
}
