// FIXME: remove this after this utoipa issue is fixed: https://github.com/juhaku/utoipa/pull/1423
#![allow(clippy::needless_for_each)]
mod contact;
mod error;
mod health;

use axum::{routing, Extension, Json, Router};
use contact_relay_core::{
    model::{ContactRequest, ContactResponse, DeliveryMethod, HealthStatus},
    ServerInfo,
};
use utoipa::OpenApi;

pub use self::{
    contact::submit_contact,
    error::{Error, Result},
    health::health_check,
};
use crate::ServiceState;

pub fn api_router(service_state: &ServiceState) -> Router {
    let api_routes = Router::new()
        .route("/contact", routing::post(contact::submit_contact))
        .route("/v1/info", routing::get(server_info));

    Router::new()
        .route("/health", routing::get(health::health_check))
        .nest("/api", api_routes)
        .with_state(service_state.clone())
}

/// Get server info
#[utoipa::path(
    get,
    operation_id = "get_server_info",
    path = "/api/v1/info",
    responses(
        (status = 200, body = ServerInfo)
    )
)]
// SAFETY: `axum` handler must be async
#[allow(clippy::unused_async)]
pub async fn server_info(Extension(server_info): Extension<ServerInfo>) -> Json<ServerInfo> {
    Json(server_info)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        server_info,
        health::health_check,
        contact::submit_contact,
    ),
    components(schemas(
        ServerInfo,
        HealthStatus,
        ContactRequest,
        ContactResponse,
        DeliveryMethod,
    )),
    tags(
        (name = "Contact", description = "Contact form relay"),
        (name = "Health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
