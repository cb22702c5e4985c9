pub mod controller;
pub mod error;
pub mod extractor;

use std::{future::Future, net::SocketAddr};

use axum::{
    extract::Request,
    http::{self, HeaderValue},
    response::IntoResponse,
    routing, Extension, Json, Router, ServiceExt,
};
use contact_relay_core::{config::WebConfig, ServerInfo};
use relay_axum::{json_response, response};
use snafu::ResultExt;
use tokio::net::TcpListener;
use tower::{Layer, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    normalize_path::NormalizePathLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

pub use self::{controller::ApiDoc, error::Error};
use crate::service::ContactService;

pub async fn new_api_server<ShutdownSignal>(
    WebConfig { listen_address, allowed_origins }: WebConfig,
    service_state: ServiceState,
    server_info: ServerInfo,
    shutdown_signal: ShutdownSignal,
) -> Result<(), Error>
where
    ShutdownSignal: Future<Output = ()> + Send + 'static,
{
    let cors = cors_layer(&allowed_origins)?;

    let router = {
        let router = new_router(service_state, server_info).layer(cors);
        let router = NormalizePathLayer::trim_trailing_slash().layer(router);
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(router)
    };

    let listener = TcpListener::bind(&listen_address)
        .await
        .context(error::BindTcpServerSnafu { listen_address })?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context(error::ServeHttpServerSnafu)
}

/// Builds every route of the public HTTP API.
pub fn new_router(service_state: ServiceState, server_info: ServerInfo) -> Router {
    let middleware_stack =
        ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CompressionLayer::new());

    Router::new()
        .route("/", routing::get(controller::server_info))
        .route("/openapi.json", routing::get(openapi_json))
        .merge(controller::api_router(&service_state))
        .layer(Extension(server_info))
        .layer(middleware_stack)
        .fallback(fallback)
}

/// Allows any origin when `allowed_origins` is empty.
///
/// # Errors
///
/// Returns an error if an origin is not a valid header value.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, Error> {
    let layer = CorsLayer::new()
        .allow_methods([http::Method::GET, http::Method::POST])
        .allow_headers([http::header::CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .context(error::InvalidCorsOriginSnafu { origin: origin.clone() })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

// SAFETY: `axum` handler must be async
#[allow(clippy::unused_async)]
async fn fallback(uri: http::Uri) -> axum::response::Response {
    json_response! {
        status: http::StatusCode::NOT_FOUND,
        error: response::Error::new(response::ErrorType::NotFound, format!("No route for {uri}"))
    }
}

// SAFETY: `axum` handler must be async
#[allow(clippy::unused_async)]
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> { Json(ApiDoc::openapi()) }

#[derive(Clone, Debug)]
pub struct ServiceState {
    pub contact_service: ContactService,
}

impl ServiceState {
    /// Create a new service state
    #[inline]
    #[must_use]
    pub const fn new(contact_service: ContactService) -> Self { Self { contact_service } }
}
