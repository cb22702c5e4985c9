use std::{io, io::Write, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use contact_relay_server::ApiDoc;
use snafu::ResultExt;
use utoipa::OpenApi;

use crate::{
    command::{run_server, run_test_delivery},
    config::Config,
    error, shadow,
};

#[derive(Debug, Parser)]
#[command(author,
    version,
    long_version = shadow::CLAP_LONG_VERSION,
    about,
    long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(
        long = "config",
        short = 'c',
        env = "CONTACT_RELAY_CONFIG_FILE_PATH",
        help = "Specify a configuration file"
    )]
    config_file_path: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(about = "Print version information")]
    Version,

    #[clap(about = "Output shell completion code for the specified shell (bash, zsh, fish)")]
    Completion { shell: Shell },

    #[clap(about = "Output default configuration")]
    DefaultConfig,

    #[clap(about = "Run server")]
    #[command(visible_alias = "run")]
    Server,

    #[clap(about = "Output `OpenApi` document")]
    OpenApi,

    #[clap(about = "Send one sample submission through a delivery channel")]
    TestDelivery {
        #[arg(value_enum)]
        channel: DeliveryChannel,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum DeliveryChannel {
    Email,
    Messaging,
}

impl DeliveryChannel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Messaging => "messaging",
        }
    }
}

impl Cli {
    pub fn run(self) -> Result<(), Box<error::Error>> {
        match self.command {
            Command::Version => {
                write_stdout(Self::command().render_long_version().as_bytes())?;
            }
            Command::Completion { shell } => {
                let mut command = Self::command();
                let bin_name = command.get_name().to_string();
                clap_complete::generate(shell, &mut command, bin_name, &mut io::stdout());
            }
            Command::DefaultConfig => {
                let config_text = Config::default().to_yaml().map_err(error::Error::from)?;
                write_stdout(config_text.as_bytes())?;
            }
            Command::Server => {
                let config = self.load_config()?;
                run_server(config)?;
            }
            Command::OpenApi => {
                let document = ApiDoc::openapi()
                    .to_yaml()
                    .map_err(|err| error::Error::GenerateOpenApi { message: err.to_string() })?;
                write_stdout(document.as_bytes())?;
            }
            Command::TestDelivery { channel } => {
                let config = self.load_config()?;
                run_test_delivery(config, channel)?;
            }
        }

        Ok(())
    }

    #[allow(clippy::result_large_err)]
    fn load_config(&self) -> Result<Config, error::Error> {
        let config = match self.config_file_path {
            Some(ref path) => Config::load(path)?,
            None => Config::load_or_default()?,
        };
        Ok(config.apply_env(|name| std::env::var(name).ok())?)
    }
}

fn write_stdout(bytes: &[u8]) -> Result<(), error::Error> {
    io::stdout().write_all(bytes).context(error::WriteStdoutSnafu)
}
