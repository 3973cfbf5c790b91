//! Fixed values shared by the driver and the CLI.

/// Prefix of every container handle created by a run.
pub const HANDLE_PREFIX: &str = "bbq-";

/// Default address of the container service.
pub const DEFAULT_GARDEN_ADDR: &str = "127.0.0.1:7777";

/// Default number of containers to create and destroy.
pub const DEFAULT_NUM_CONTAINERS: usize = 10;

/// Soft disk limit applied when disk limits are enabled.
pub const DISK_LIMIT_SOFT_BYTES: u64 = 10_000_000;

/// Hard disk limit applied when disk limits are enabled.
pub const DISK_LIMIT_HARD_BYTES: u64 = 20_000_000;
