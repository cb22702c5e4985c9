use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_axum::{json_response, response};
use snafu::Snafu;

use crate::service::error::Error as ServiceError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Service { source: ServiceError },

    #[snafu(display("Invalid request body: {message}"))]
    InvalidPayload { status: StatusCode, message: String },
}

impl From<ServiceError> for Error {
    fn from(source: ServiceError) -> Self { Self::Service { source } }
}

impl IntoResponse for Error {
    // SAFETY: allow: high cognitive complexity caused by `tracing` macro
    #[allow(clippy::cognitive_complexity)]
    fn into_response(self) -> Response {
        match self {
            Self::Service { source } => source.into_response(),
            Self::InvalidPayload { status, .. } => json_response! {
                reason: self,
                status: status,
                error: response::Error::new(response::ErrorType::BadRequest, self.to_string())
            },
        }
    }
}
