//! The container-service seam used by the driver.

use bbq_common::types::{ContainerRecord, ContainerSpec, Handle, Properties};

use crate::error::Result;

/// Operations the driver issues against the container service.
///
/// Every call is blocking and fallible. Implementors perform no retries.
pub trait GardenClient {
    /// Creates a container from the given spec.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or rejects the spec.
    fn create(&self, spec: &ContainerSpec) -> Result<ContainerRecord>;

    /// Lists containers matching every property in `properties`.
    ///
    /// An empty filter lists all containers.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or the listing fails.
    fn list(&self, properties: &Properties) -> Result<Vec<ContainerRecord>>;

    /// Destroys the container registered under `handle`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or the container
    /// cannot be destroyed.
    fn destroy(&self, handle: &Handle) -> Result<()>;
}
