// Request and response models of the HTTP API, plus the validated
// submission handed to the delivery channels.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Error, Result};

/// Channel the submitter wants to be answered on.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    /// Relay the submission as an email to the site owner.
    #[default]
    Email,

    /// The client redirects to a chat app itself; the server only
    /// acknowledges.
    Whatsapp,
}

impl DeliveryMethod {
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Whatsapp => "whatsapp",
        }
    }
}

/// Body of `POST /api/contact`.
///
/// Every field is optional on the wire so that missing fields are reported
/// together by [`ContactRequest::validate`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ContactRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,

    #[schema(example = "ada@example.com")]
    pub email: Option<String>,

    #[schema(example = "+44 20 7946 0000")]
    pub phone: Option<String>,

    #[schema(example = "I would like to talk about a project.")]
    pub message: Option<String>,

    pub method: Option<DeliveryMethod>,
}

/// A validated contact form submission.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    pub method: DeliveryMethod,
}

impl ContactRequest {
    /// Checks the required fields and normalizes the request.
    ///
    /// Text fields are trimmed and blank optional fields are treated as
    /// absent. `email` is only required, and only checked, for
    /// [`DeliveryMethod::Email`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFields`] listing every missing field, or
    /// [`Error::InvalidEmail`] when the address would not be accepted as a
    /// `Reply-To` mailbox.
    pub fn validate(self) -> Result<ContactSubmission> {
        let Self { name, email, phone, message, method } = self;
        let method = method.unwrap_or_default();
        let name = non_blank(name);
        let email = non_blank(email);
        let phone = non_blank(phone);
        let message = non_blank(message);

        let mut missing = Vec::new();
        if name.is_none() {
            missing.push("name");
        }
        if method == DeliveryMethod::Email && email.is_none() {
            missing.push("email");
        }
        if message.is_none() {
            missing.push("message");
        }

        let (Some(name), Some(message)) = (name, message) else {
            return Err(Error::MissingFields { fields: missing });
        };
        if !missing.is_empty() {
            return Err(Error::MissingFields { fields: missing });
        }

        if method == DeliveryMethod::Email {
            if let Some(email) = email.as_deref() {
                if notification::smtp::parse_address(email).is_err() {
                    return Err(Error::InvalidEmail { email: email.to_string() });
                }
            }
        }

        Ok(ContactSubmission { name, email, phone, message, method })
    }
}

impl From<ContactSubmission> for notification::ContactForm {
    fn from(ContactSubmission { name, email, phone, message, .. }: ContactSubmission) -> Self {
        Self { name, email, phone, message }
    }
}

/// Body of a successful `POST /api/contact`.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,

    #[schema(example = "Email sent successfully")]
    pub message: String,
}

impl ContactResponse {
    #[inline]
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }
}

/// Body of `GET /health`.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "healthy")]
    pub status: String,
}

impl HealthStatus {
    #[inline]
    #[must_use]
    pub fn healthy() -> Self { Self { status: "healthy".to_string() } }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}
