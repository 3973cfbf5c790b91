//! # bbq-driver
//!
//! Drives a container service through a fixed, strictly sequential
//! lifecycle:
//!
//! 1. create `bbq-0` .. `bbq-(n-1)` one at a time
//! 2. list all containers and check exactly `n` exist
//! 3. optionally pause for the configured destroy delay
//! 4. destroy the same handles in the same order
//!
//! The first failure ends the run. Nothing is retried or cleaned up.

pub mod driver;
pub mod error;
pub mod report;

pub use driver::{handle, run};
