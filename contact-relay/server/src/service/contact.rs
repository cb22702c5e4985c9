use std::{fmt, sync::Arc};

use contact_relay_core::model::{ContactRequest, ContactResponse, DeliveryMethod};
use notification::{Notification, NotificationClient};
use relay_metrics::{DefaultMetrics, SubmissionOutcome};

use super::error::{Error, Result};

/// Validates contact form submissions and relays them to the configured
/// mailer.
#[derive(Clone)]
pub struct ContactService {
    mailer: Option<Arc<dyn NotificationClient>>,
    metrics: DefaultMetrics,
}

impl fmt::Debug for ContactService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactService")
            .field("mailer_configured", &self.mailer.is_some())
            .finish_non_exhaustive()
    }
}

impl ContactService {
    pub const EMAIL_SENT_MESSAGE: &'static str = "Email sent successfully";
    pub const WHATSAPP_ACKNOWLEDGED_MESSAGE: &'static str = "Continue the conversation on WhatsApp";

    #[inline]
    #[must_use]
    pub fn new(mailer: Option<Arc<dyn NotificationClient>>, metrics: DefaultMetrics) -> Self {
        Self { mailer, metrics }
    }

    /// Handles one submission.
    ///
    /// WhatsApp submissions are acknowledged without any outbound call, the
    /// client hands the conversation over itself. Email submissions are sent
    /// through the mailer exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing or the email address is invalid
    /// - No mailer is configured
    /// - The mailer fails to deliver the email
    pub async fn submit(&self, request: ContactRequest) -> Result<ContactResponse> {
        let method = request.method.unwrap_or_default();

        let submission = match request.validate() {
            Ok(submission) => submission,
            Err(source) => {
                self.metrics.record_submission(method.as_str(), SubmissionOutcome::Rejected);
                return Err(Error::Model { source });
            }
        };

        match submission.method {
            DeliveryMethod::Whatsapp => {
                tracing::info!("Acknowledged WhatsApp submission");
                self.metrics.record_submission(method.as_str(), SubmissionOutcome::Acknowledged);
                Ok(ContactResponse::success(Self::WHATSAPP_ACKNOWLEDGED_MESSAGE))
            }
            DeliveryMethod::Email => {
                let Some(ref mailer) = self.mailer else {
                    self.metrics.record_submission(method.as_str(), SubmissionOutcome::Unavailable);
                    return Err(Error::MailerNotConfigured);
                };

                let notification = Notification::ContactForm(submission.into());
                if let Err(source) = mailer.send_notification(&notification).await {
                    self.metrics.record_submission(method.as_str(), SubmissionOutcome::Failed);
                    return Err(Error::Delivery { source });
                }

                self.metrics.record_submission(method.as_str(), SubmissionOutcome::Sent);
                Ok(ContactResponse::success(Self::EMAIL_SENT_MESSAGE))
            }
        }
    }

    #[inline]
    #[must_use]
    pub const fn metrics(&self) -> &DefaultMetrics { &self.metrics }
}
