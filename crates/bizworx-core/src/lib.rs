//! `bizworx-core` — shared configuration and error types for BizWorx.
//!
//! Every other crate in the workspace depends on this one; it must stay
//! small and dependency-light.

pub mod config;
pub mod error;

pub use config::{BizworxConfig, DatabaseConfig, SchedulerConfig};
pub use error::{BizworxError, Result};
