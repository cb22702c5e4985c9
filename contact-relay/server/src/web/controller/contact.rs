use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use contact_relay_core::model::{ContactRequest, ContactResponse};

use crate::{
    web::{controller::Result, extractor::JsonBody},
    ServiceState,
};

/// Submit the contact form
///
/// `method` defaults to `email`, which relays the submission to the site
/// owner by email with `Reply-To` set to the submitter. `whatsapp` is only
/// acknowledged; the client opens the chat itself.
#[utoipa::path(
    post,
    operation_id = "submit_contact",
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Submission relayed or acknowledged", body = ContactResponse),
        (status = 400, description = "Missing fields, invalid email address or malformed body"),
        (status = 500, description = "The mail server rejected or failed the delivery"),
        (status = 503, description = "Email delivery is not configured")
    ),
    tag = "Contact"
)]
pub async fn submit_contact(
    State(state): State<ServiceState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    JsonBody(request): JsonBody<ContactRequest>,
) -> Result<Json<ContactResponse>> {
    let client_ip =
        relay_axum::get_request_ip(&headers, connect_info.as_ref().map(|ConnectInfo(addr)| addr));
    let method = request.method.unwrap_or_default();
    tracing::info!(?client_ip, method = method.as_str(), "Received contact form submission");

    let response = state.contact_service.submit(request).await?;

    Ok(Json(response))
}
