//! netrm common - shared types for the network resource tools
//!
//! This crate provides:
//! - The error taxonomy shared by every command
//! - Aggregated parameter validation errors
//! - Diagnostics: an injectable trace source, a queue-backed listener, and a
//!   `tracing` layer that feeds the source

#![warn(clippy::all)]

pub mod diagnostics;
pub mod error;

pub use diagnostics::{
    DebugStreamTraceListener, SourceLevel, TraceListener, TraceQueue, TraceSource,
    TraceSourceLayer, AUTH_TRACE_TARGET,
};
pub use error::*;
