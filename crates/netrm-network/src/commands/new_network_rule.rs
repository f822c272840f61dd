//! Build a firewall network rule from user parameters

use crate::models::{NetworkRule, NetworkRuleProtocol};
use netrm_common::{NetrmError, NetrmResult, ValidationErrors};
use serde::Deserialize;

/// Parameters of the new-network-rule command. Also the wire shape a
/// [`NetworkRule`] is deserialized through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNetworkRuleParams {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source_addresses: Vec<String>,
    #[serde(default)]
    pub destination_addresses: Vec<String>,
    #[serde(default)]
    pub destination_ports: Vec<String>,
    #[serde(default)]
    pub protocols: Vec<String>,
}

impl NewNetworkRuleParams {
    /// Collect every unmet precondition
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if self.name.is_empty() {
            errors.push("name", "The network rule name should not be empty!");
        }
        if matches!(self.description.as_deref(), Some("")) {
            errors.push("description", "The network rule description should not be empty when specified!");
        }
        if self.protocols.is_empty() {
            errors.push("protocol", "At least one network rule protocol should be specified!");
        }
        if self.source_addresses.is_empty() {
            errors.push("source_address", "At least one network rule source IP should be specified!");
        }
        if self.destination_addresses.is_empty() {
            errors.push("destination_address", "At least one network rule destination IP should be specified!");
        }
        if self.destination_ports.is_empty() {
            errors.push("destination_port", "At least one network rule destination port should be specified!");
        }

        for protocol in &self.protocols {
            if let Err(e) = protocol.parse::<NetworkRuleProtocol>() {
                errors.push("protocol", e.to_string());
            }
        }

        errors
    }
}

/// Validate `params` and build the rule from them verbatim
pub fn new_network_rule(params: NewNetworkRuleParams) -> NetrmResult<NetworkRule> {
    params.validate().into_result()?;

    tracing::debug!(
        name = %params.name,
        protocols = params.protocols.len(),
        sources = params.source_addresses.len(),
        "network rule built"
    );

    Ok(NetworkRule {
        name: params.name,
        description: params.description,
        protocols: params.protocols,
        source_addresses: params.source_addresses,
        destination_addresses: params.destination_addresses,
        destination_ports: params.destination_ports,
    })
}

impl TryFrom<NewNetworkRuleParams> for NetworkRule {
    type Error = NetrmError;

    fn try_from(params: NewNetworkRuleParams) -> NetrmResult<Self> {
        new_network_rule(params)
    }
}
