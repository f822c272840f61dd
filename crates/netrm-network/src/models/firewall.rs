//! Firewall network rule model

use crate::commands::NewNetworkRuleParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Protocols a network rule may name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkRuleProtocol {
    /// Any protocol
    Any,
    /// ICMP
    #[serde(rename = "ICMP")]
    Icmp,
    /// TCP
    #[serde(rename = "TCP")]
    Tcp,
    /// UDP
    #[serde(rename = "UDP")]
    Udp,
}

impl NetworkRuleProtocol {
    /// All accepted protocols
    pub const ALL: [NetworkRuleProtocol; 4] = [Self::Any, Self::Icmp, Self::Tcp, Self::Udp];

    /// Canonical provider spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::Icmp => "ICMP",
            Self::Tcp => "TCP",
            Self::Udp => "UDP",
        }
    }
}

impl fmt::Display for NetworkRuleProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised protocol string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProtocol(pub String);

impl fmt::Display for UnknownProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid protocol {}", self.0)
    }
}

impl std::error::Error for UnknownProtocol {}

impl FromStr for NetworkRuleProtocol {
    type Err = UnknownProtocol;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownProtocol(s.to_string()))
    }
}

/// Azure Firewall network rule
///
/// # Invariants
/// - Every protocol parses as a [`NetworkRuleProtocol`]
/// - The four list fields are non-empty
///
/// Values are kept exactly as supplied. Build one through
/// [`crate::commands::new_network_rule`]; deserializing goes through the same
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "NewNetworkRuleParams")]
pub struct NetworkRule {
    pub(crate) name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    pub(crate) protocols: Vec<String>,
    pub(crate) source_addresses: Vec<String>,
    pub(crate) destination_addresses: Vec<String>,
    pub(crate) destination_ports: Vec<String>,
}

impl NetworkRule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Protocols as supplied
    pub fn protocols(&self) -> &[String] {
        &self.protocols
    }

    /// Protocols parsed into their typed form
    pub fn protocol_kinds(&self) -> Vec<NetworkRuleProtocol> {
        self.protocols
            .iter()
            .filter_map(|p| p.parse().ok())
            .collect()
    }

    pub fn source_addresses(&self) -> &[String] {
        &self.source_addresses
    }

    pub fn destination_addresses(&self) -> &[String] {
        &self.destination_addresses
    }

    pub fn destination_ports(&self) -> &[String] {
        &self.destination_ports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_parse_ignores_case() {
        assert_eq!("tcp".parse::<NetworkRuleProtocol>(), Ok(NetworkRuleProtocol::Tcp));
        assert_eq!("Icmp".parse::<NetworkRuleProtocol>(), Ok(NetworkRuleProtocol::Icmp));
        assert_eq!("ANY".parse::<NetworkRuleProtocol>(), Ok(NetworkRuleProtocol::Any));
        assert_eq!("uDp".parse::<NetworkRuleProtocol>(), Ok(NetworkRuleProtocol::Udp));
    }

    #[test]
    fn test_protocol_parse_rejects_unknown() {
        let err = "sctp".parse::<NetworkRuleProtocol>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid protocol sctp");
        assert!(" tcp".parse::<NetworkRuleProtocol>().is_err());
        assert!("".parse::<NetworkRuleProtocol>().is_err());
    }

    #[test]
    fn test_rule_serializes_camel_case() {
        let rule = NetworkRule {
            name: "web".into(),
            description: None,
            protocols: vec!["tcp".into()],
            source_addresses: vec!["10.0.0.0/24".into()],
            destination_addresses: vec!["*".into()],
            destination_ports: vec!["443".into()],
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["sourceAddresses"][0], "10.0.0.0/24");
        assert_eq!(json["destinationPorts"][0], "443");
        assert_eq!(json["protocols"][0], "tcp");
        assert!(json.get("description").is_none());
        assert_eq!(rule.protocol_kinds(), vec![NetworkRuleProtocol::Tcp]);
    }

    #[test]
    fn test_deserialize_validates() {
        let rule: NetworkRule = serde_json::from_str(
            r#"{"name":"web","protocols":["Tcp"],"sourceAddresses":["*"],
                "destinationAddresses":["10.0.0.1"],"destinationPorts":["443"]}"#,
        )
        .unwrap();
        assert_eq!(rule.protocols(), ["Tcp".to_string()].as_slice());

        let err = serde_json::from_str::<NetworkRule>(
            r#"{"name":"","protocols":["gre"],"sourceAddresses":[],
                "destinationAddresses":["*"],"destinationPorts":["1"]}"#,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid protocol gre"));
        assert!(message.contains("source IP"));
    }
}
