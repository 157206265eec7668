#![forbid(unsafe_code)]
//! ripple-core library.
//!
//! # Conventions
//!
//! - **Errors**: library code returns [`error::Result`] with a
//!   [`error::RippleError`]; configuration loading uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod registry;

pub use error::{ErrorCode, Result, RippleError};
pub use registry::{Network, NetworkDescriptor, ReportGroup};
