//! Fatal outcomes of a provisioning run.

use bbq_client::error::ClientError;
use bbq_common::types::Handle;
use thiserror::Error;

/// Reason a run stopped before completing all four phases.
///
/// Every variant is fatal; the driver neither retries nor rolls back.
#[derive(Debug, Error)]
pub enum DriverError {
    /// A create call failed. Containers created before it are left in place.
    #[error("error creating container '{handle}': {source}")]
    Create {
        /// Handle of the container that could not be created.
        handle: Handle,
        /// Underlying client error.
        source: ClientError,
    },

    /// The listing after the create phase failed.
    #[error("error getting containers: {source}")]
    List {
        /// Underlying client error.
        source: ClientError,
    },

    /// The listing did not report the number of containers just created.
    #[error("expected to find {expected} containers, but found {actual}")]
    CountMismatch {
        /// Number of containers created by this run.
        expected: usize,
        /// Number of containers the service reported.
        actual: usize,
    },

    /// A destroy call failed. Remaining containers are left in place.
    #[error("error destroying container '{handle}': {source}")]
    Destroy {
        /// Handle of the container that could not be destroyed.
        handle: Handle,
        /// Underlying client error.
        source: ClientError,
    },
}

impl DriverError {
    /// Short name of the phase the run stopped in.
    #[must_use]
    pub const fn phase(&self) -> crate::report::Phase {
        use crate::report::Phase;
        match self {
            Self::Create { .. } => Phase::Create,
            Self::List { .. } | Self::CountMismatch { .. } => Phase::Verify,
            Self::Destroy { .. } => Phase::Destroy,
        }
    }
}

/// Convenience alias for driver results.
pub type Result<T> = std::result::Result<T, DriverError>;
