//! Phase timing collected during a run.

use std::fmt;
use std::time::Duration;

/// Stage of a provisioning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Sequential container creation.
    Create,
    /// Listing-based count check.
    Verify,
    /// Optional pause before teardown.
    Wait,
    /// Sequential container destruction.
    Destroy,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Verify => write!(f, "verify"),
            Self::Wait => write!(f, "wait"),
            Self::Destroy => write!(f, "destroy"),
        }
    }
}

/// Timing of a run that completed every phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Number of containers created and destroyed.
    pub containers: usize,
    /// Time spent in the create phase.
    pub create: Duration,
    /// Time spent listing and checking the count.
    pub verify: Duration,
    /// Time spent pausing, if a destroy delay was configured.
    pub wait: Option<Duration>,
    /// Time spent in the destroy phase.
    pub destroy: Duration,
}

impl RunReport {
    /// Wall-clock time across all phases.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.create + self.verify + self.wait.unwrap_or_default() + self.destroy
    }

    /// Mean latency of one create call, or `None` for an empty run.
    #[must_use]
    pub fn mean_create(&self) -> Option<Duration> {
        mean(self.create, self.containers)
    }

    /// Mean latency of one destroy call, or `None` for an empty run.
    #[must_use]
    pub fn mean_destroy(&self) -> Option<Duration> {
        mean(self.destroy, self.containers)
    }

    /// Emits the report as a single structured log line.
    pub fn log(&self) {
        tracing::info!(
            containers = self.containers,
            create_ms = self.create.as_millis(),
            mean_create_ms = self.mean_create().map(|d| d.as_millis()),
            verify_ms = self.verify.as_millis(),
            wait_ms = self.wait.map(|d| d.as_millis()),
            destroy_ms = self.destroy.as_millis(),
            mean_destroy_ms = self.mean_destroy().map(|d| d.as_millis()),
            total_ms = self.total().as_millis(),
            "run complete"
        );
    }
}

fn mean(total: Duration, count: usize) -> Option<Duration> {
    let count = u32::try_from(count).ok().filter(|&c| c > 0)?;
    Some(total / count)
}
