//! # Notification Crate
//!
//! Delivery channels for contact form submissions.
//!
//! ## Features
//!
//! - SMTP delivery of HTML emails with `Reply-To` pointing at the submitter
//! - Chat-messaging API delivery with bearer-token authentication
//! - A single [`NotificationClient`] trait so callers stay channel agnostic

mod error;
pub mod messaging;
pub mod render;
pub mod smtp;

use async_trait::async_trait;
pub use error::Error;

/// A contact form submission ready for delivery.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContactForm {
    /// Name of the person who filled in the form.
    pub name: String,
    /// Address replies should go to, when one was given.
    pub email: Option<String>,
    /// Phone number, when one was given.
    pub phone: Option<String>,
    /// Free-form message body.
    pub message: String,
}

/// Represents different types of notifications that can be sent.
#[derive(Clone, Debug)]
pub enum Notification {
    /// A contact form submission relayed to the site owner.
    ContactForm(ContactForm),
}

/// Trait for notification clients that can send notifications.
#[async_trait]
pub trait NotificationClient: Send + Sync {
    /// Sends a notification. Implementations make exactly one delivery
    /// attempt.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification fails to send.
    async fn send_notification(&self, notification: &Notification) -> Result<(), Error>;
}
