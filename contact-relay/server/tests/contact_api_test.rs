use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Utc;
use contact_relay_core::{model::ContactResponse, ServerInfo};
use contact_relay_server::{ContactService, ServiceState};
use notification::{ContactForm, Notification, NotificationClient};
use relay_metrics::{DefaultMetrics, SubmissionOutcome};
use serde_json::{json, Value};

/// Records every notification instead of delivering it.
#[derive(Clone, Default)]
struct RecordingMailer {
    sent: Arc<Mutex<Vec<ContactForm>>>,
    attempts: Arc<AtomicUsize>,
    fail: bool,
}

impl RecordingMailer {
    fn failing() -> Self { Self { fail: true, ..Self::default() } }

    fn attempts(&self) -> usize { self.attempts.load(Ordering::SeqCst) }

    fn sent(&self) -> Vec<ContactForm> { self.sent.lock().unwrap().clone() }
}

#[async_trait]
impl NotificationClient for RecordingMailer {
    async fn send_notification(&self, notification: &Notification) -> Result<(), notification::Error> {
        let _ = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(notification::Error::UnexpectedStatus {
                status: 535,
                body: "authentication failed".to_string(),
            });
        }

        let Notification::ContactForm(form) = notification;
        self.sent.lock().unwrap().push(form.clone());
        Ok(())
    }
}

fn server_info() -> ServerInfo {
    ServerInfo {
        version: "0.1.0".to_string(),
        branch: "main".to_string(),
        commit_hash: "abc1234".to_string(),
        start_time: Utc::now(),
    }
}

/// Helper to create the test server, returning the metrics it records to
fn create_test_server(mailer: Option<RecordingMailer>) -> (TestServer, DefaultMetrics) {
    let metrics = DefaultMetrics::new().expect("Failed to create metrics");
    let mailer = mailer.map(|mailer| Arc::new(mailer) as Arc<dyn NotificationClient>);
    let service_state = ServiceState::new(ContactService::new(mailer, metrics.clone()));

    let app = contact_relay_server::new_router(service_state, server_info());
    (TestServer::new(app).expect("Failed to create test server"), metrics)
}

#[tokio::test]
async fn test_health_check() {
    let mailer = RecordingMailer::default();
    let (server, _) = create_test_server(Some(mailer.clone()));

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "healthy" }));
    assert_eq!(mailer.attempts(), 0);
}

#[tokio::test]
async fn test_send_email_success() {
    let mailer = RecordingMailer::default();
    let (server, metrics) = create_test_server(Some(mailer.clone()));

    let response = server
        .post("/api/contact")
        .json(&json!({ "name": "A", "email": "a@x.com", "message": "hi" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: ContactResponse = response.json();
    assert!(body.success);
    assert_eq!(body.message, ContactService::EMAIL_SENT_MESSAGE);

    assert_eq!(mailer.attempts(), 1);
    assert_eq!(
        mailer.sent(),
        vec![ContactForm {
            name: "A".to_string(),
            email: Some("a@x.com".to_string()),
            phone: None,
            message: "hi".to_string(),
        }]
    );
    assert_eq!(metrics.submission_count("email", SubmissionOutcome::Sent), 1);
}

#[tokio::test]
async fn test_send_email_with_phone_and_explicit_method() {
    let mailer = RecordingMailer::default();
    let (server, _) = create_test_server(Some(mailer.clone()));

    let response = server
        .post("/api/contact")
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "+44 20 7946 0000",
            "message": "Hello",
            "method": "email",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(mailer.sent()[0].phone.as_deref(), Some("+44 20 7946 0000"));
}

#[tokio::test]
async fn test_send_email_failure_is_not_retried() {
    let mailer = RecordingMailer::failing();
    let (server, metrics) = create_test_server(Some(mailer.clone()));

    let response = server
        .post("/api/contact")
        .json(&json!({ "name": "A", "email": "a@x.com", "message": "hi" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Failed to send email"));
    assert_eq!(body["type"], "INTERNAL");

    assert_eq!(mailer.attempts(), 1);
    assert_eq!(metrics.submission_count("email", SubmissionOutcome::Failed), 1);
}

#[tokio::test]
async fn test_missing_name_or_message_for_every_method() {
    let mailer = RecordingMailer::default();
    let (server, _) = create_test_server(Some(mailer.clone()));

    for method in ["email", "whatsapp"] {
        for body in [
            json!({ "email": "a@x.com", "message": "hi", "method": method }),
            json!({ "name": "A", "email": "a@x.com", "method": method }),
            json!({ "name": "   ", "email": "a@x.com", "message": "hi", "method": method }),
        ] {
            let response = server.post("/api/contact").json(&body).await;

            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{body} should be rejected");
            assert_eq!(response.json::<Value>()["type"], "VALIDATION");
        }
    }

    assert_eq!(mailer.attempts(), 0);
}

#[tokio::test]
async fn test_email_method_requires_email() {
    let mailer = RecordingMailer::default();
    let (server, metrics) = create_test_server(Some(mailer.clone()));

    let response = server.post("/api/contact").json(&json!({ "name": "A", "message": "hi" })).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["fields"], json!(["email"]));
    assert_eq!(mailer.attempts(), 0);
    assert_eq!(metrics.submission_count("email", SubmissionOutcome::Rejected), 1);
}

#[tokio::test]
async fn test_all_missing_fields_are_reported() {
    let (server, _) = create_test_server(Some(RecordingMailer::default()));

    let response = server.post("/api/contact").json(&json!({})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["fields"], json!(["name", "email", "message"]));
}

#[tokio::test]
async fn test_invalid_email_address() {
    let mailer = RecordingMailer::default();
    let (server, _) = create_test_server(Some(mailer.clone()));

    let response = server
        .post("/api/contact")
        .json(&json!({ "name": "A", "email": "not-an-email", "message": "hi" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(mailer.attempts(), 0);
}

#[tokio::test]
async fn test_invalid_email_address_without_mailer() {
    let (server, metrics) = create_test_server(None);

    for email in ["a@x@y.com", "a@x..com", "a,b@x.com", "a@-x-.com"] {
        let response = server
            .post("/api/contact")
            .json(&json!({ "name": "A", "email": email, "message": "hi" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{email} should be rejected");
        let body = response.json::<Value>();
        assert_eq!(body["type"], "VALIDATION");
        assert_eq!(body["fields"], json!(["email"]));
    }

    assert_eq!(metrics.submission_count("email", SubmissionOutcome::Rejected), 4);
    assert_eq!(metrics.submission_count("email", SubmissionOutcome::Unavailable), 0);
}

#[tokio::test]
async fn test_whatsapp_is_acknowledged_without_sending() {
    let mailer = RecordingMailer::default();
    let (server, metrics) = create_test_server(Some(mailer.clone()));

    let response = server
        .post("/api/contact")
        .json(&json!({ "name": "A", "message": "hi", "method": "whatsapp" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: ContactResponse = response.json();
    assert!(body.success);
    assert_eq!(body.message, ContactService::WHATSAPP_ACKNOWLEDGED_MESSAGE);

    assert_eq!(mailer.attempts(), 0);
    assert_eq!(metrics.submission_count("whatsapp", SubmissionOutcome::Acknowledged), 1);
}

#[tokio::test]
async fn test_whatsapp_without_mailer() {
    let (server, _) = create_test_server(None);

    let response = server
        .post("/api/contact")
        .json(&json!({ "name": "A", "message": "hi", "method": "whatsapp" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_email_without_mailer_is_unavailable() {
    let (server, metrics) = create_test_server(None);

    let response = server
        .post("/api/contact")
        .json(&json!({ "name": "A", "email": "a@x.com", "message": "hi" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["type"], "SERVICE_UNAVAILABLE");
    assert_eq!(metrics.submission_count("email", SubmissionOutcome::Unavailable), 1);
}

#[tokio::test]
async fn test_malformed_payloads() {
    let mailer = RecordingMailer::default();
    let (server, _) = create_test_server(Some(mailer.clone()));

    // Invalid JSON
    let response = server
        .post("/api/contact")
        .text("{\"name\": \"A\",")
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["type"], "BAD_REQUEST");

    // Unknown delivery method
    let response = server
        .post("/api/contact")
        .json(&json!({ "name": "A", "message": "hi", "method": "carrier-pigeon" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Missing content type
    let response = server.post("/api/contact").text("name=A").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["type"], "BAD_REQUEST");

    assert_eq!(mailer.attempts(), 0);
}

#[tokio::test]
async fn test_oversized_payload() {
    let mailer = RecordingMailer::default();
    let (server, _) = create_test_server(Some(mailer.clone()));

    let message = "x".repeat(3 * 1024 * 1024);
    let response = server
        .post("/api/contact")
        .json(&json!({ "name": "A", "email": "a@x.com", "message": message }))
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.json::<Value>()["type"], "BAD_REQUEST");
    assert_eq!(mailer.attempts(), 0);
}

#[tokio::test]
async fn test_unknown_route() {
    let (server, _) = create_test_server(None);

    let response = server.get("/api/unknown").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["type"], "NOT_FOUND");
}

#[tokio::test]
async fn test_server_info_and_openapi() {
    let (server, _) = create_test_server(None);

    for path in ["/", "/api/v1/info"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["commitHash"], "abc1234");
    }

    let response = server.get("/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.json::<Value>()["paths"].get("/api/contact").is_some());
}
