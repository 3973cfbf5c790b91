//! Domain primitive types used across the bbq workspace.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DISK_LIMIT_HARD_BYTES, DISK_LIMIT_SOFT_BYTES, HANDLE_PREFIX};

/// Identifier correlating a container across create and destroy calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// Creates a handle from an arbitrary string value.
    #[must_use]
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Returns the handle of the container at `index` in a run.
    #[must_use]
    pub fn for_index(index: usize) -> Self {
        Self(format!("{HANDLE_PREFIX}{index}"))
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Soft/hard byte thresholds on a container's writable storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiskLimits {
    /// Soft limit in bytes.
    pub byte_soft: u64,
    /// Hard limit in bytes.
    pub byte_hard: u64,
}

impl DiskLimits {
    /// The fixed thresholds attached when disk limits are enabled.
    #[must_use]
    pub const fn benchmark() -> Self {
        Self {
            byte_soft: DISK_LIMIT_SOFT_BYTES,
            byte_hard: DISK_LIMIT_HARD_BYTES,
        }
    }
}

/// Resource limits sent with a create request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Limits {
    /// Disk limits, omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<DiskLimits>,
}

impl Limits {
    /// Returns true when no limit is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.disk.is_none()
    }
}

/// Parameters of a single create-container call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSpec {
    /// Handle the container is registered under.
    pub handle: Handle,
    /// Optional resource limits.
    #[serde(skip_serializing_if = "Limits::is_empty")]
    pub limits: Limits,
}

impl ContainerSpec {
    /// Creates a spec with no limits.
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            limits: Limits::default(),
        }
    }

    /// Attaches disk limits to the spec.
    #[must_use]
    pub const fn with_disk_limits(mut self, disk: DiskLimits) -> Self {
        self.limits.disk = Some(disk);
        self
    }
}

/// Record of an existing container as reported by the service.
///
/// The driver only counts these; the handle is kept for logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Handle the service reported for this container.
    pub handle: Handle,
}

/// Property filter for listing containers. Empty means "all containers".
pub type Properties = BTreeMap<String, String>;
