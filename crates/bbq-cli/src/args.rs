//! Command-line flags.

use std::time::Duration;

use bbq_common::config::RunConfig;
use bbq_common::constants::{DEFAULT_GARDEN_ADDR, DEFAULT_NUM_CONTAINERS};
use clap::Parser;

use crate::logging::LogFormat;

/// bbq — create, verify, and destroy containers sequentially on a Garden server.
#[derive(Parser, Debug)]
#[command(name = "bbq", version, about, long_about = None)]
pub struct Cli {
    /// Garden server address.
    #[arg(long = "gardenAddr", env = "BBQ_GARDEN_ADDR", default_value = DEFAULT_GARDEN_ADDR)]
    pub garden_addr: String,

    /// Number of containers.
    #[arg(long = "numContainers", default_value_t = DEFAULT_NUM_CONTAINERS)]
    pub num_containers: usize,

    /// Create containers with a disk limit.
    #[arg(long = "enableDiskLimits")]
    pub enable_disk_limits: bool,

    /// Time in seconds to wait before starting to destroy containers.
    #[arg(long = "destroyDelay", default_value_t = 0)]
    pub destroy_delay: u64,

    /// Time in seconds a single request may take before the run fails (0 = no limit).
    #[arg(long = "requestTimeout", default_value_t = 0)]
    pub request_timeout: u64,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,

    /// Log line format.
    #[arg(long = "logFormat", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Builds the immutable run configuration from the parsed flags.
    pub fn to_config(&self) -> RunConfig {
        RunConfig {
            garden_addr: self.garden_addr.clone(),
            num_containers: self.num_containers,
            enable_disk_limits: self.enable_disk_limits,
            destroy_delay: Duration::from_secs(self.destroy_delay),
            request_timeout: (self.request_timeout > 0)
                .then(|| Duration::from_secs(self.request_timeout)),
            debug: self.debug,
        }
    }
}
