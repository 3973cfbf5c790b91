//! # bbq-common
//!
//! Shared types, error definitions, run configuration, and constants
//! used across the entire bbq workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and provides the primitives the client, driver, and CLI
//! build upon.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
