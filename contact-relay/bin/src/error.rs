use snafu::Snafu;

use crate::config;

/// Result type alias for the CLI.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type for the CLI.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Application { source: contact_relay_server::Error },

    #[snafu(display("Could not initialize tokio runtime, error: {source}"))]
    InitializeTokioRuntime { source: tokio::io::Error },

    #[snafu(display("Could not initialize logger, error: {source}"))]
    InitializeLogger { source: relay_cli_common::config::LogError },

    #[snafu(display("{source}"))]
    Config { source: config::Error },

    #[snafu(display("Could not write to stdout, error: {source}"))]
    WriteStdout { source: std::io::Error },

    #[snafu(display("Could not generate OpenAPI document, error: {message}"))]
    GenerateOpenApi { message: String },

    #[snafu(display("Delivery channel `{channel}` is not configured"))]
    ChannelNotConfigured { channel: &'static str },

    #[snafu(display("Test delivery over `{channel}` failed, error: {source}"))]
    TestDelivery { channel: &'static str, source: notification::Error },
}

impl From<config::Error> for Error {
    fn from(source: config::Error) -> Self { Self::Config { source } }
}

impl From<contact_relay_server::Error> for Error {
    fn from(source: contact_relay_server::Error) -> Self { Self::Application { source } }
}

pub trait CommandError {
    fn exit_code(&self) -> exitcode::ExitCode;
}

impl CommandError for Error {
    fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Self::Application { .. } | Self::GenerateOpenApi { .. } => exitcode::SOFTWARE,
            Self::Config { .. } | Self::ChannelNotConfigured { .. } => exitcode::CONFIG,
            Self::InitializeTokioRuntime { .. }
            | Self::InitializeLogger { .. }
            | Self::WriteStdout { .. } => exitcode::IOERR,
            Self::TestDelivery { .. } => exitcode::UNAVAILABLE,
        }
    }
}
