//! # vivrun-core
//!
//! Core library for vivrun, a launcher that automates running a Vivado
//! behavioral simulation against a configured project.
//!
//! ## Design Principles
//!
//! - **Synchronous**: everything blocks; the invoker waits for Vivado to exit.
//! - **No local recovery**: errors propagate to the binary, which logs and
//!   exits non-zero. The one exception is per-process enumeration failures
//!   during liveness detection, which are skipped.
//! - **Pure decision cores**: the process-match and argument-selection logic
//!   are plain functions so tests never need a live Vivado.

pub mod cleanup;
pub mod config;
pub mod error;
pub mod invoke;
pub mod liveness;
pub mod script;

pub use config::LaunchConfig;
pub use error::{LaunchError, Result};
