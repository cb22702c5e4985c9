use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_axum::{json_response, response};
use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Model { source: contact_relay_core::error::Error },

    #[snafu(display("Email service is not configured"))]
    MailerNotConfigured,

    #[snafu(display("Failed to send email: {source}"))]
    Delivery { source: notification::Error },
}

impl From<contact_relay_core::error::Error> for Error {
    fn from(source: contact_relay_core::error::Error) -> Self { Self::Model { source } }
}

impl IntoResponse for Error {
    // SAFETY: allow: high cognitive complexity caused by `tracing` macro
    #[allow(clippy::cognitive_complexity)]
    fn into_response(self) -> Response {
        match self {
            Self::Model { source } => source.into_response(),
            Self::MailerNotConfigured => json_response! {
                reason: self,
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: response::Error::new(response::ErrorType::ServiceUnavailable, self.to_string())
            },
            Self::Delivery { .. } => json_response! {
                reason: self,
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: response::Error::new(response::ErrorType::Internal, self.to_string())
            },
        }
    }
}
