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
    /// One or more required fields are missing or blank
    #[snafu(display("Missing required fields: {}", fields.join(", ")))]
    MissingFields { fields: Vec<&'static str> },

    #[snafu(display("Invalid email address: '{email}'"))]
    InvalidEmail { email: String },
}

impl Error {
    /// Names of the offending request fields.
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::MissingFields { fields } => fields.clone(),
            Self::InvalidEmail { .. } => vec!["email"],
        }
    }
}

impl IntoResponse for Error {
    // SAFETY: allow: high cognitive complexity caused by `tracing` macro
    #[allow(clippy::cognitive_complexity)]
    fn into_response(self) -> Response {
        let fields = serde_json::json!(self.fields());
        json_response! {
            reason: self,
            status: StatusCode::BAD_REQUEST,
            error: response::Error::new(response::ErrorType::Validation, self.to_string())
                .with_field("fields", fields)
        }
    }
}
