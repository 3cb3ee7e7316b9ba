//! Core types for the tool service.
//!
//! This module provides foundational types used throughout the system:
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Configuration structures for server, upstream, and IPC

mod config;
mod errors;

pub use config::{Config, IpcConfig, ObservabilityConfig, ServerConfig, UpstreamConfig, SERVICE_NAME};
pub use errors::{Error, Result};
