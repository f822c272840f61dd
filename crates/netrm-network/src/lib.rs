//! netrm network - resource models and commands
//!
//! - **Firewall**: build validated network rules
//! - **Load balancer**: look up and remove frontend IP configurations

#![warn(clippy::all)]

pub mod commands;
pub mod models;

pub use commands::*;
pub use models::*;
