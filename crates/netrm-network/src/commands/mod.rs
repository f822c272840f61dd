//! Commands
//!
//! Each command validates its parameters before touching any resource and
//! produces exactly one object for the caller.

pub mod new_network_rule;
pub mod remove_frontend_ip_config;

pub use new_network_rule::{new_network_rule, NewNetworkRuleParams};
pub use remove_frontend_ip_config::{remove_frontend_ip_config, RemoveFrontendIpConfigParams};
