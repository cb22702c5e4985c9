//! Client for a WhatsApp-style chat-messaging HTTP API authenticated with a
//! bearer token.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use serde::Serialize;
use snafu::ResultExt;

use crate::{
    error::{self, Error},
    render, Notification, NotificationClient,
};

/// Configuration for the messaging client.
#[derive(Clone)]
pub struct Config {
    /// API base URL, `/messages` is appended to it.
    pub base_url: String,

    /// Bearer token sent in the `Authorization` header.
    pub token: String,

    /// Recipient identifier, usually a phone number in international format.
    pub recipient: String,

    /// Timeout applied to the whole HTTP request.
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("recipient", &self.recipient)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    type_: &'static str,
    text: TextBody,
}

#[derive(Debug, Serialize)]
struct TextBody {
    body: String,
}

/// Messaging API client.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    token: String,
    recipient: String,
}

impl Client {
    /// Creates a new messaging client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self, Error> {
        let Config { base_url, token, recipient, timeout } = config;

        let http =
            reqwest::Client::builder().timeout(timeout).build().context(error::HttpRequestSnafu)?;
        let endpoint = format!("{}/messages", base_url.trim_end_matches('/'));

        tracing::info!(%endpoint, "Using messaging API");

        Ok(Self { http, endpoint, token, recipient })
    }
}

#[async_trait]
impl NotificationClient for Client {
    async fn send_notification(&self, notification: &Notification) -> Result<(), Error> {
        let Notification::ContactForm(form) = notification;

        let request = SendMessageRequest {
            messaging_product: "whatsapp",
            to: &self.recipient,
            type_: "text",
            text: TextBody { body: render::contact_text(form) },
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .context(error::HttpRequestSnafu)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "Failed to send message: {body}");
            return Err(Error::UnexpectedStatus { status: status.as_u16(), body });
        }

        tracing::info!(to = %self.recipient, "Successfully sent message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::ContactForm;

    fn notification() -> Notification {
        Notification::ContactForm(ContactForm {
            name: "Ada".to_string(),
            email: None,
            phone: Some("+15550100".to_string()),
            message: "Call me".to_string(),
        })
    }

    fn client(base_url: String) -> Client {
        Client::new(Config {
            base_url,
            token: "secret-token".to_string(),
            recipient: "15550199".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_send_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/messages")
            .match_header("authorization", "Bearer secret-token")
            .match_body(Matcher::PartialJson(json!({
                "messaging_product": "whatsapp",
                "to": "15550199",
                "type": "text",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"messages":[{"id":"wamid.1"}]}"#)
            .create_async()
            .await;

        // trailing slash must not produce `//messages`
        let client = client(format!("{}/", server.url()));
        client.send_notification(&notification()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_message_rejected() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/messages")
            .with_status(401)
            .with_body(r#"{"error":"invalid token"}"#)
            .expect(1)
            .create_async()
            .await;

        let result = client(server.url()).send_notification(&notification()).await;

        assert!(matches!(
            result,
            Err(Error::UnexpectedStatus { status: 401, ref body }) if body.contains("invalid token")
        ));
        mock.assert_async().await;
    }

    #[test]
    fn test_config_debug_redacts_token() {
        let config = Config {
            base_url: "https://graph.example.com/v1/123".to_string(),
            token: "secret-token".to_string(),
            recipient: "15550199".to_string(),
            timeout: Duration::from_secs(5),
        };

        assert!(!format!("{config:?}").contains("secret-token"));
    }
}
