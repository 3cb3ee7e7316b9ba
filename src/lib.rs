//! # Police API Tools - UK Police Data Tool Service
//!
//! Translation layer exposing the public data.police.uk crime API as a fixed
//! catalog of 21 named tools, invocable by a host process over a local IPC
//! transport:
//! - Static tool registry with typed parameter schemas and declared fallbacks
//! - Three parameter-selection families (area priority, identifier path,
//!   flat filter) mapping arguments onto one upstream GET each
//! - Failure containment: transport faults and unanswerable selections
//!   collapse to well-typed empty values, never exceptions
//!
//! ## Architecture
//!
//! ```text
//!   IPC requests →  ┌──────────┐   ┌──────────────┐   ┌─────────────┐
//!   (CallTool,      │  Router  │ → │ Tool Catalog │ → │HTTP Gateway │ → data.police.uk
//!    ListTools)     └──────────┘   │ validate/plan│   │ GET + 10s   │
//!                                  └──────────────┘   └─────────────┘
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod catalog;
pub mod gateway;
pub mod ipc;
pub mod tools;
pub mod types;

// Internal utilities
pub mod observability;

pub use types::{Config, Error, IpcConfig, Result};
