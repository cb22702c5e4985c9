pub mod error;
mod server;
mod traits;

use prometheus::{IntCounterVec, Opts, Registry};

pub use self::{error::Error, server::start_metrics_server, traits::Metrics};

/// Label values of `contact_submissions_total{outcome}`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmissionOutcome {
    /// Email handed over to the mail server.
    Sent,
    /// Messaging-app submission acknowledged without an outbound call.
    Acknowledged,
    /// Rejected by validation.
    Rejected,
    /// Outbound delivery failed.
    Failed,
    /// Delivery channel not configured.
    Unavailable,
}

impl SubmissionOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Acknowledged => "acknowledged",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
            Self::Unavailable => "unavailable",
        }
    }
}

#[derive(Clone, Debug)]
pub struct DefaultMetrics {
    registry: Registry,

    submissions: IntCounterVec,
}

impl DefaultMetrics {
    const SUBMISSIONS_TOTAL: &'static str = "contact_submissions_total";

    /// # Errors
    ///
    /// Returns an error if a collector cannot be registered.
    pub fn new() -> Result<Self, Error> {
        let registry = Registry::new();

        let submissions = IntCounterVec::new(
            Opts::new(Self::SUBMISSIONS_TOTAL, "Contact form submissions by method and outcome"),
            &["method", "outcome"],
        )
        .map_err(|source| Error::RegisterMetric { name: Self::SUBMISSIONS_TOTAL, source })?;

        registry
            .register(Box::new(submissions.clone()))
            .map_err(|source| Error::RegisterMetric { name: Self::SUBMISSIONS_TOTAL, source })?;

        Ok(Self { registry, submissions })
    }

    pub fn record_submission(&self, method: &str, outcome: SubmissionOutcome) {
        self.submissions.with_label_values(&[method, outcome.as_str()]).inc();
    }

    #[must_use]
    pub fn submission_count(&self, method: &str, outcome: SubmissionOutcome) -> u64 {
        self.submissions.with_label_values(&[method, outcome.as_str()]).get()
    }
}

impl Metrics for DefaultMetrics {
    fn gather(&self) -> Vec<prometheus::proto::MetricFamily> { self.registry.gather() }
}
