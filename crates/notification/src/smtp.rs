//! SMTP client delivering contact form submissions as HTML email.
//!
//! Every send opens one authenticated session (STARTTLS unless disabled),
//! submits the message and closes the connection again.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use snafu::ResultExt;

use crate::{
    error::{self, Error},
    render, ContactForm, Notification, NotificationClient,
};

/// Configuration for the SMTP client.
#[derive(Clone)]
pub struct Config {
    /// SMTP relay host, e.g. `smtp.gmail.com`.
    pub host: String,

    /// SMTP submission port, 587 for STARTTLS.
    pub port: u16,

    /// Upgrade the connection with STARTTLS. Only disable for local
    /// development relays such as Mailpit.
    pub starttls: bool,

    /// Account used to authenticate. This is also the sender address.
    pub username: String,

    /// Password of the account, usually an app password.
    pub password: String,

    /// Display name used in the `From` header.
    pub sender_name: Option<String>,

    /// Fixed recipient of every contact email.
    pub recipient: String,

    /// Timeout applied to the whole SMTP session, from connect to the end
    /// of the DATA exchange.
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("starttls", &self.starttls)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("sender_name", &self.sender_name)
            .field("recipient", &self.recipient)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// SMTP client for sending contact emails.
pub struct Client {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
    timeout: Duration,
}

impl Client {
    /// Creates a new SMTP client. No connection is made until the first
    /// notification is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The relay host is not a valid TLS server name
    /// - The sender or recipient address is invalid
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::time::Duration;
    ///
    /// use notification::smtp::{Client, Config};
    ///
    /// # fn example() -> Result<(), notification::Error> {
    /// let client = Client::new(Config {
    ///     host: "smtp.gmail.com".to_string(),
    ///     port: 587,
    ///     starttls: true,
    ///     username: "sender@example.com".to_string(),
    ///     password: "app-password".to_string(),
    ///     sender_name: Some("Contact Form".to_string()),
    ///     recipient: "owner@example.com".to_string(),
    ///     timeout: Duration::from_secs(30),
    /// })?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: Config) -> Result<Self, Error> {
        let Config { host, port, starttls, username, password, sender_name, recipient, timeout } =
            config;

        tracing::info!(%host, port, starttls, %username, "Using SMTP relay");

        let builder = if starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
                .context(error::CreateMailerSnafu { host: host.clone() })?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&host)
        };

        let sender = Mailbox::new(sender_name, parse_address(&username)?);
        let recipient = Mailbox::new(None, parse_address(&recipient)?);

        let builder = builder.port(port).timeout(Some(timeout));
        // Local relays without AUTH reject any credentials.
        let builder = if password.is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(username, password))
        };

        Ok(Self { transport: builder.build(), sender, recipient, timeout })
    }
}

#[async_trait]
impl NotificationClient for Client {
    async fn send_notification(&self, notification: &Notification) -> Result<(), Error> {
        let Notification::ContactForm(form) = notification;

        let email = build_contact_email(&self.sender, &self.recipient, form)?;

        // lettre's own timeout only covers the TCP connect.
        let response = tokio::time::timeout(self.timeout, self.transport.send(email))
            .await
            .context(error::SendTimeoutSnafu { timeout: self.timeout })?
            .context(error::SendEmailSnafu)?;

        tracing::info!(code = %response.code(), "Successfully sent contact email");
        Ok(())
    }
}

/// Parses a bare email address such as `user@example.com`.
///
/// # Errors
///
/// Returns [`Error::InvalidAddress`] if the address is not a valid mailbox.
pub fn parse_address(address: &str) -> Result<Address, Error> {
    address.parse().context(error::InvalidAddressSnafu { address })
}

/// Builds the contact email.
///
/// # Errors
///
/// Returns an error if the submitter's address is invalid or the message
/// cannot be built.
fn build_contact_email(
    sender: &Mailbox,
    recipient: &Mailbox,
    form: &ContactForm,
) -> Result<Message, Error> {
    let builder = Message::builder()
        .from(sender.clone())
        .to(recipient.clone())
        .subject(render::contact_subject(form))
        .header(ContentType::TEXT_HTML);

    let builder = match &form.email {
        Some(email) => builder.reply_to(Mailbox::new(None, parse_address(email)?)),
        None => builder,
    };

    builder.body(render::contact_html(form)).context(error::BuildEmailSnafu)
}
