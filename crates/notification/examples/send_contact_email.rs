//! Example: Send a contact email through an SMTP relay.
//!
//! # Prerequisites
//!
//! 1. An SMTP account, e.g. a Gmail account with an app password
//! 2. `MAIL_USER`, `MAIL_APP_PASSWORD` and `MAIL_RECIPIENT` set in the
//!    environment
//!
//! # Usage
//!
//! ```bash
//! export MAIL_USER="sender@gmail.com"
//! export MAIL_APP_PASSWORD="abcd efgh ijkl mnop"
//! export MAIL_RECIPIENT="owner@example.com"
//! cargo run --example send_contact_email
//! ```

use std::{env, time::Duration};

use notification::{
    smtp::{Client, Config},
    ContactForm, Notification, NotificationClient,
};

#[tokio::main]
async fn main() -> Result<(), notification::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let username = env::var("MAIL_USER").unwrap_or_default();
    let config = Config {
        host: env::var("MAIL_SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
        port: 587,
        starttls: true,
        recipient: env::var("MAIL_RECIPIENT").unwrap_or_else(|_| username.clone()),
        username,
        password: env::var("MAIL_APP_PASSWORD").unwrap_or_default(),
        sender_name: Some("Contact Form".to_string()),
        timeout: Duration::from_secs(30),
    };

    tracing::info!("Creating SMTP client");
    let client = Client::new(config)?;

    let notification = Notification::ContactForm(ContactForm {
        name: "Example Sender".to_string(),
        email: Some("sender@example.com".to_string()),
        phone: None,
        message: "Hello from the contact relay example.".to_string(),
    });

    tracing::info!("Sending contact email");
    client.send_notification(&notification).await?;

    tracing::info!("Email sent successfully");
    Ok(())
}
