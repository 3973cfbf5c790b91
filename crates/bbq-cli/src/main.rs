//! # bbq — sequential container benchmark
//!
//! Creates N containers one at a time on a Garden server, checks that
//! exactly N exist, optionally waits, then destroys them one at a time.
//! Any failure ends the run with exit status 1.

mod args;
mod logging;

use anyhow::Context;
use bbq_client::http::HttpGardenClient;
use clap::Parser;

use crate::args::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.to_config();
    logging::init(config.debug, cli.log_format)?;

    config.validate()?;
    tracing::debug!(?config, "run configuration");

    let client = HttpGardenClient::builder(config.garden_addr.as_str())
        .timeout(config.request_timeout)
        .build()
        .context("failed to set up garden client")?;
    tracing::info!(
        server = %client.base_url(),
        containers = config.num_containers,
        "starting run"
    );

    let stdout = std::io::stdout();
    let mut progress = stdout.lock();
    let report = bbq_driver::run(&config, &client, &mut progress)
        .inspect_err(|err| tracing::error!(phase = %err.phase(), "run aborted"))?;
    report.log();

    Ok(())
}
