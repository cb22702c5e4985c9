use std::sync::Arc;

use contact_relay_core::PROGRAM_NAME;
use notification::{ContactForm, Notification, NotificationClient};
use snafu::ResultExt;
use tokio::runtime::Runtime;

use crate::{
    cli::DeliveryChannel,
    config::Config,
    error,
    error::{Error, Result},
    shadow::PKG_VERSION,
};

/// Sends one sample submission through `channel` and reports the outcome.
#[allow(clippy::result_large_err)]
pub fn run_test_delivery(config: Config, channel: DeliveryChannel) -> Result<()> {
    config.log.registry().context(error::InitializeLoggerSnafu)?;

    let client = build_client(config, channel)?;

    let notification = Notification::ContactForm(ContactForm {
        name: PROGRAM_NAME.to_string(),
        email: None,
        phone: None,
        message: format!("Test delivery from {PROGRAM_NAME} {PKG_VERSION}"),
    });

    let runtime = Runtime::new().context(error::InitializeTokioRuntimeSnafu)?;
    runtime
        .block_on(client.send_notification(&notification))
        .context(error::TestDeliverySnafu { channel: channel.as_str() })?;

    tracing::info!(channel = channel.as_str(), "Test delivery succeeded");
    Ok(())
}

#[allow(clippy::result_large_err)]
fn build_client(config: Config, channel: DeliveryChannel) -> Result<Arc<dyn NotificationClient>> {
    let not_configured = || Error::ChannelNotConfigured { channel: channel.as_str() };
    let create_failed =
        |source: notification::Error| Error::TestDelivery { channel: channel.as_str(), source };

    let client: Arc<dyn NotificationClient> = match channel {
        DeliveryChannel::Email => {
            let smtp = config.mail.into_smtp_config().ok_or_else(not_configured)?;
            Arc::new(notification::smtp::Client::new(smtp).map_err(create_failed)?)
        }
        DeliveryChannel::Messaging => {
            let messaging = config
                .messaging
                .and_then(|messaging| messaging.into_client_config())
                .ok_or_else(not_configured)?;
            Arc::new(notification::messaging::Client::new(messaging).map_err(create_failed)?)
        }
    };

    Ok(client)
}
