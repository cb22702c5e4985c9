use snafu::Snafu;

use crate::web;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Metrics { source: relay_metrics::Error },

    #[snafu(display("{source}"))]
    Web { source: web::Error },

    #[snafu(display("Could not create SMTP client, error: {source}"))]
    CreateMailer { source: notification::Error },
}

impl From<relay_metrics::Error> for Error {
    fn from(source: relay_metrics::Error) -> Self { Self::Metrics { source } }
}

impl From<web::Error> for Error {
    fn from(source: web::Error) -> Self { Self::Web { source } }
}
