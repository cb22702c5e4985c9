mod error;
mod service;
mod web;

use std::{future::Future, net::SocketAddr, pin::Pin, sync::Arc};

use contact_relay_core::{
    config::{Config, WebConfig},
    ServerInfo,
};
use futures::{future::BoxFuture, FutureExt};
use notification::NotificationClient;
use relay_metrics::DefaultMetrics;
use sigfinn::{ExitStatus, LifecycleManager, Shutdown};
use snafu::ResultExt;

pub use self::{
    error::{Error, Result},
    service::{error::Error as ServiceError, ContactService},
    web::{controller, cors_layer, new_router, ApiDoc, ServiceState},
};

/// # Errors
/// Returns errors when server fails to start
pub async fn serve_with_shutdown(config: Config, server_info: ServerInfo) -> Result<()> {
    let Config { web, metrics, mail } = config;

    let mailer = initialize_mailer(mail)?;

    let default_metrics = DefaultMetrics::new()?;

    let service_state = ServiceState::new(ContactService::new(mailer, default_metrics.clone()));

    let lifecycle_manager = LifecycleManager::<Error>::new();

    let _handle = lifecycle_manager
        .spawn("Http Server", create_web_http_server_future(web, service_state, server_info));

    if metrics.enable {
        let _handle = lifecycle_manager.spawn(
            "Metrics server",
            create_metrics_server_future(metrics.listen_address, default_metrics),
        );
    }

    if let Ok(Err(err)) = lifecycle_manager.serve().await {
        tracing::error!("{err}");
        Err(err)
    } else {
        Ok(())
    }
}

/// Builds the SMTP client. The email channel stays disabled when no mail
/// configuration is given.
///
/// # Errors
/// Returns an error if the SMTP client cannot be created
pub fn initialize_mailer(
    mail: Option<notification::smtp::Config>,
) -> Result<Option<Arc<dyn NotificationClient>>> {
    let Some(mail) = mail else {
        tracing::warn!("SMTP credentials are not configured, email submissions will be rejected");
        return Ok(None);
    };

    tracing::info!("Initializing SMTP client");
    let client: Arc<dyn NotificationClient> =
        Arc::new(notification::smtp::Client::new(mail).context(error::CreateMailerSnafu)?);

    Ok(Some(client))
}

fn create_web_http_server_future(
    web: WebConfig,
    service_state: ServiceState,
    server_info: ServerInfo,
) -> impl FnOnce(Shutdown) -> BoxFuture<'static, ExitStatus<Error>> {
    move |shutdown_signal| {
        async move {
            tracing::info!("Listen Web HTTP server endpoint on {}", web.listen_address);

            let result =
                web::new_api_server(web, service_state, server_info, shutdown_signal).await;

            match result {
                Ok(()) => {
                    tracing::info!("HTTP server is shut down gracefully");
                    ExitStatus::Success
                }
                Err(err) => ExitStatus::FatalError(Error::from(err)),
            }
        }
        .boxed()
    }
}

fn create_metrics_server_future<Metrics>(
    listen_address: SocketAddr,
    metrics: Metrics,
) -> impl FnOnce(Shutdown) -> Pin<Box<dyn Future<Output = ExitStatus<Error>> + Send>>
where
    Metrics: relay_metrics::Metrics + 'static,
{
    move |signal| {
        async move {
            tracing::info!("Listen metrics endpoint on {listen_address}");
            let result = relay_metrics::start_metrics_server(listen_address, metrics, signal).await;
            match result {
                Ok(()) => {
                    tracing::info!("Metrics server is shut down gracefully");
                    ExitStatus::Success
                }
                Err(err) => ExitStatus::FatalError(Error::from(err)),
            }
        }
        .boxed()
    }
}
