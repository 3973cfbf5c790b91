//! Run configuration for a single benchmark invocation.

use std::time::Duration;

use crate::constants::{DEFAULT_GARDEN_ADDR, DEFAULT_NUM_CONTAINERS};
use crate::error::{BbqError, Result};
use crate::types::DiskLimits;

/// Immutable parameters of one run. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Address of the container service (`host:port` or a URL).
    pub garden_addr: String,
    /// Number of containers to create, verify, and destroy.
    pub num_containers: usize,
    /// Whether every created container carries disk limits.
    pub enable_disk_limits: bool,
    /// Pause between the verify and destroy phases.
    pub destroy_delay: Duration,
    /// Deadline for a single request to the service. `None` waits forever.
    pub request_timeout: Option<Duration>,
    /// Whether verbose logging was requested.
    pub debug: bool,
}

impl RunConfig {
    /// Disk limits to attach to each create call, if enabled.
    #[must_use]
    pub const fn disk_limits(&self) -> Option<DiskLimits> {
        if self.enable_disk_limits {
            Some(DiskLimits::benchmark())
        } else {
            None
        }
    }

    /// Checks that the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// Returns `BbqError::Config` if the service address is blank.
    pub fn validate(&self) -> Result<()> {
        if self.garden_addr.trim().is_empty() {
            return Err(BbqError::Config {
                message: "garden address must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            garden_addr: DEFAULT_GARDEN_ADDR.to_string(),
            num_containers: DEFAULT_NUM_CONTAINERS,
            enable_disk_limits: false,
            destroy_delay: Duration::ZERO,
            request_timeout: None,
            debug: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_flag_defaults() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.garden_addr, "127.0.0.1:7777");
        assert_eq!(cfg.num_containers, 10);
        assert!(!cfg.enable_disk_limits);
        assert_eq!(cfg.destroy_delay, Duration::ZERO);
        assert_eq!(cfg.request_timeout, None);
        assert!(!cfg.debug);
    }

    #[test]
    fn disk_limits_only_when_enabled() {
        let mut cfg = RunConfig::default();
        assert_eq!(cfg.disk_limits(), None);
        cfg.enable_disk_limits = true;
        assert_eq!(cfg.disk_limits(), Some(DiskLimits::benchmark()));
    }

    #[test]
    fn validate_rejects_blank_address() {
        let cfg = RunConfig {
            garden_addr: "  ".into(),
            ..RunConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
