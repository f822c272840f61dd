//! Resource models

pub mod firewall;
pub mod load_balancer;

pub use firewall::{NetworkRule, NetworkRuleProtocol, UnknownProtocol};
pub use load_balancer::{
    names_match, FrontendIpConfigLookup, FrontendIpConfiguration, FrontendIpConfigurationProperties,
    LoadBalancer, LoadBalancerProperties, SubResource,
};
