//! # bbq-client
//!
//! Talks to a Garden-style container service.
//!
//! Provides two entry points:
//! - [`GardenClient`](client::GardenClient): the three operations the driver
//!   needs (create, list, destroy), as a trait so runs can be exercised
//!   against an in-memory service.
//! - [`HttpGardenClient`](http::HttpGardenClient): blocking HTTP implementation
//!   of that trait.
//!
//! # Example
//!
//! ```rust,no_run
//! use bbq_client::client::GardenClient;
//! use bbq_client::http::HttpGardenClient;
//! use bbq_common::types::{ContainerSpec, Handle};
//!
//! let client = HttpGardenClient::builder("127.0.0.1:7777").build()?;
//! client.create(&ContainerSpec::new(Handle::for_index(0)))?;
//! client.destroy(&Handle::for_index(0))?;
//! # Ok::<(), bbq_client::error::ClientError>(())
//! ```

pub mod client;
pub mod error;
pub mod http;
mod wire;
