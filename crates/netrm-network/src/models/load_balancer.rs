//! Load balancer model
//!
//! Only the parts the commands touch are typed. Everything else the
//! management API returns is carried in `extra` maps so a fetched load
//! balancer can be modified and written back without losing data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reference to another resource by ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubResource {
    pub id: String,
}

/// Frontend IP configuration properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendIpConfigurationProperties {
    #[serde(rename = "privateIPAddress", default, skip_serializing_if = "Option::is_none")]
    pub private_ip_address: Option<String>,
    #[serde(rename = "privateIPAllocationMethod", default, skip_serializing_if = "Option::is_none")]
    pub private_ip_allocation_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<SubResource>,
    #[serde(rename = "publicIPAddress", default, skip_serializing_if = "Option::is_none")]
    pub public_ip_address: Option<SubResource>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Frontend IP configuration of a load balancer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontendIpConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default)]
    pub properties: FrontendIpConfigurationProperties,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FrontendIpConfiguration {
    /// Configuration with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Load balancer properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerProperties {
    #[serde(rename = "frontendIPConfigurations", default)]
    pub frontend_ip_configurations: Vec<FrontendIpConfiguration>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Load balancer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default)]
    pub properties: LoadBalancerProperties,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outcome of looking up a frontend IP configuration by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontendIpConfigLookup {
    NotFound,
    /// Index of the single match
    Unique(usize),
    /// Indices of every match, in collection order
    Multiple(Vec<usize>),
}

/// Unicode case-insensitive name equality. Two unset names are equal.
pub fn names_match(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b || a.to_lowercase() == b.to_lowercase(),
        _ => false,
    }
}

impl LoadBalancer {
    /// Load balancer with no frontends
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Frontend IP configurations, in order
    pub fn frontend_ip_configurations(&self) -> &[FrontendIpConfiguration] {
        &self.properties.frontend_ip_configurations
    }

    /// Frontend names, unset names skipped
    pub fn frontend_names(&self) -> Vec<&str> {
        self.properties
            .frontend_ip_configurations
            .iter()
            .filter_map(|c| c.name.as_deref())
            .collect()
    }

    /// Find frontend IP configurations whose name matches `name`
    pub fn find_frontend_ip_configuration(&self, name: Option<&str>) -> FrontendIpConfigLookup {
        let matches: Vec<usize> = self
            .properties
            .frontend_ip_configurations
            .iter()
            .enumerate()
            .filter(|(_, c)| names_match(c.name.as_deref(), name))
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [] => FrontendIpConfigLookup::NotFound,
            [i] => FrontendIpConfigLookup::Unique(*i),
            _ => FrontendIpConfigLookup::Multiple(matches),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lb(names: &[&str]) -> LoadBalancer {
        let mut lb = LoadBalancer::new("lb");
        lb.properties.frontend_ip_configurations =
            names.iter().map(|n| FrontendIpConfiguration::named(*n)).collect();
        lb
    }

    #[test]
    fn test_names_match() {
        assert!(names_match(Some("Front"), Some("fRONT")));
        assert!(names_match(Some("ÄRGER"), Some("ärger")));
        assert!(names_match(None, None));
        assert!(!names_match(Some(""), None));
        assert!(!names_match(Some("a"), Some("b")));
    }

    #[test]
    fn test_lookup_variants() {
        let lb = lb(&["a", "b", "A"]);
        assert_eq!(lb.find_frontend_ip_configuration(Some("b")), FrontendIpConfigLookup::Unique(1));
        assert_eq!(lb.find_frontend_ip_configuration(Some("c")), FrontendIpConfigLookup::NotFound);
        assert_eq!(
            lb.find_frontend_ip_configuration(Some("a")),
            FrontendIpConfigLookup::Multiple(vec![0, 2])
        );
        assert_eq!(lb.find_frontend_ip_configuration(None), FrontendIpConfigLookup::NotFound);
    }

    #[test]
    fn test_lookup_unset_name_matches_unnamed_entry() {
        let mut lb = lb(&["a"]);
        lb.properties.frontend_ip_configurations.push(FrontendIpConfiguration::default());
        assert_eq!(lb.find_frontend_ip_configuration(None), FrontendIpConfigLookup::Unique(1));
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let input = json!({
            "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/loadBalancers/lb",
            "name": "lb",
            "location": "westeurope",
            "sku": { "name": "Standard" },
            "properties": {
                "provisioningState": "Succeeded",
                "frontendIPConfigurations": [{
                    "name": "fe1",
                    "properties": {
                        "privateIPAddress": "10.0.0.4",
                        "privateIPAllocationMethod": "Static",
                        "subnet": { "id": "subnet-id" },
                        "zones": ["1"]
                    }
                }],
                "backendAddressPools": [{ "name": "pool" }]
            }
        });

        let parsed: LoadBalancer = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(parsed.frontend_names(), vec!["fe1"]);
        let fe = &parsed.frontend_ip_configurations()[0];
        assert_eq!(fe.properties.private_ip_address.as_deref(), Some("10.0.0.4"));
        assert_eq!(fe.properties.subnet.as_ref().map(|s| s.id.as_str()), Some("subnet-id"));

        assert_eq!(serde_json::to_value(&parsed).unwrap(), input);
    }
}
