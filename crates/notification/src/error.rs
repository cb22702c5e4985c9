use std::time::Duration;

use snafu::Snafu;

/// Errors that can occur in the notification crate.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Failed to create mailer client.
    #[snafu(display("Failed to create mailer client for {host}, error: {source}"))]
    CreateMailer {
        /// SMTP relay host.
        host: String,
        /// The underlying SMTP error.
        source: lettre::transport::smtp::Error,
    },

    /// A mailbox could not be parsed.
    #[snafu(display("Invalid email address `{address}`, error: {source}"))]
    InvalidAddress {
        /// The rejected address.
        address: String,
        /// The underlying parse error.
        source: lettre::address::AddressError,
    },

    /// Failed to build email.
    #[snafu(display("Failed to build email message, error: {source}"))]
    BuildEmail {
        /// The underlying builder error.
        source: lettre::error::Error,
    },

    /// Failed to send email.
    #[snafu(display("Failed to send email, error: {source}"))]
    SendEmail {
        /// The underlying SMTP error.
        source: lettre::transport::smtp::Error,
    },

    /// The SMTP session did not finish in time.
    #[snafu(display("SMTP session timed out after {timeout:?}"))]
    SendTimeout {
        /// The configured session timeout.
        timeout: Duration,
        /// The elapsed timer.
        source: tokio::time::error::Elapsed,
    },

    /// HTTP request failed.
    #[snafu(display("HTTP request failed: {source}"))]
    HttpRequest {
        /// The underlying reqwest error.
        source: reqwest::Error,
    },

    /// Messaging API answered with a non-success status.
    #[snafu(display("Messaging API responded with status {status}: {body}"))]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        body: String,
    },
}
