//! The provisioning workflow.

use std::io::Write;
use std::time::{Duration, Instant};

use bbq_client::client::GardenClient;
use bbq_common::config::RunConfig;
use bbq_common::types::{ContainerSpec, Handle, Properties};

use crate::error::{DriverError, Result};
use crate::report::{Phase, RunReport};

/// Progress marker written after every successful create or destroy.
const PROGRESS_MARKER: &str = ".";

/// Handle of the container at `index` in a run: `bbq-<index>`.
#[must_use]
pub fn handle(index: usize) -> Handle {
    Handle::for_index(index)
}

/// Runs create, verify, optional wait, and destroy against `client`.
///
/// `progress` receives one marker per successful create or destroy call
/// and a newline at the end of each of those phases. Failures to write
/// progress are ignored.
///
/// # Errors
///
/// Returns the first failure encountered. Containers created before a
/// failure are left in place.
pub fn run<C, W>(config: &RunConfig, client: &C, progress: &mut W) -> Result<RunReport>
where
    C: GardenClient + ?Sized,
    W: Write + ?Sized,
{
    let count = config.num_containers;
    let mut report = RunReport {
        containers: count,
        ..RunReport::default()
    };

    report.create = create_all(config, client, progress)?;
    report.verify = verify(count, client)?;
    if !config.destroy_delay.is_zero() {
        report.wait = Some(wait(config.destroy_delay));
    }
    report.destroy = destroy_all(count, client, progress)?;

    Ok(report)
}

fn create_all<C, W>(config: &RunConfig, client: &C, progress: &mut W) -> Result<Duration>
where
    C: GardenClient + ?Sized,
    W: Write + ?Sized,
{
    let count = config.num_containers;
    let disk = config.disk_limits();
    tracing::info!(
        phase = %Phase::Create,
        count,
        disk_limits = disk.is_some(),
        "creating containers sequentially"
    );
    let started = Instant::now();

    for index in 0..count {
        let handle = handle(index);
        let mut spec = ContainerSpec::new(handle.clone());
        if let Some(disk) = disk {
            spec = spec.with_disk_limits(disk);
        }
        if let Err(source) = client.create(&spec) {
            end_progress(progress);
            tracing::error!(
                phase = %Phase::Create,
                handle = %handle,
                error = %source,
                "error creating container"
            );
            return Err(DriverError::Create { handle, source });
        }
        mark(progress);
    }
    end_progress(progress);

    let elapsed = started.elapsed();
    tracing::info!(phase = %Phase::Create, elapsed_ms = elapsed.as_millis(), "DONE");
    Ok(elapsed)
}

fn verify<C>(expected: usize, client: &C) -> Result<Duration>
where
    C: GardenClient + ?Sized,
{
    tracing::info!(phase = %Phase::Verify, "retrieving created containers");
    let started = Instant::now();

    let containers = client.list(&Properties::new()).map_err(|source| {
        tracing::error!(phase = %Phase::Verify, error = %source, "error getting containers");
        DriverError::List { source }
    })?;

    let actual = containers.len();
    if actual != expected {
        tracing::error!(phase = %Phase::Verify, expected, actual, "container count mismatch");
        return Err(DriverError::CountMismatch { expected, actual });
    }

    let elapsed = started.elapsed();
    tracing::info!(
        phase = %Phase::Verify,
        found = actual,
        elapsed_ms = elapsed.as_millis(),
        "DONE"
    );
    Ok(elapsed)
}

fn wait(delay: Duration) -> Duration {
    tracing::info!(
        phase = %Phase::Wait,
        delay_secs = delay.as_secs_f64(),
        "waiting before starting to destroy containers"
    );
    let started = Instant::now();
    std::thread::sleep(delay);
    let elapsed = started.elapsed();
    tracing::info!(phase = %Phase::Wait, elapsed_ms = elapsed.as_millis(), "DONE");
    elapsed
}

fn destroy_all<C, W>(count: usize, client: &C, progress: &mut W) -> Result<Duration>
where
    C: GardenClient + ?Sized,
    W: Write + ?Sized,
{
    tracing::info!(phase = %Phase::Destroy, count, "destroying containers sequentially");
    let started = Instant::now();

    for index in 0..count {
        let handle = handle(index);
        if let Err(source) = client.destroy(&handle) {
            end_progress(progress);
            tracing::error!(
                phase = %Phase::Destroy,
                handle = %handle,
                error = %source,
                "error destroying container"
            );
            return Err(DriverError::Destroy { handle, source });
        }
        mark(progress);
    }
    end_progress(progress);

    let elapsed = started.elapsed();
    tracing::info!(phase = %Phase::Destroy, elapsed_ms = elapsed.as_millis(), "DONE");
    Ok(elapsed)
}

fn mark<W: Write + ?Sized>(progress: &mut W) {
    let _ = progress.write_all(PROGRESS_MARKER.as_bytes());
    let _ = progress.flush();
}

fn end_progress<W: Write + ?Sized>(progress: &mut W) {
    let _ = progress.write_all(b"\n");
    let _ = progress.flush();
}
