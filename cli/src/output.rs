//! Output formatting

use clap::ValueEnum;
use netrm_common::{NetrmError, NetrmResult};
use netrm_network::{FrontendIpConfiguration, LoadBalancer, NetworkRule};
use serde::Serialize;
use std::str::FromStr;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = NetrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
            .map_err(|_| NetrmError::Config(format!("unknown output format: {}", s)))
    }
}

/// Objects a command can emit
pub trait Emit: Serialize {
    fn to_table(&self) -> String;
}

impl OutputFormat {
    pub fn render<T: Emit>(&self, data: &T) -> NetrmResult<String> {
        match self {
            OutputFormat::Json => {
                serde_json::to_string_pretty(data).map_err(|e| NetrmError::Serialization(e.to_string()))
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(data).map_err(|e| NetrmError::Serialization(e.to_string()))
            }
            OutputFormat::Table => Ok(data.to_table()),
        }
    }

    pub fn print<T: Emit>(&self, data: &T) -> NetrmResult<()> {
        println!("{}", self.render(data)?);
        Ok(())
    }
}

#[derive(Tabled)]
struct NetworkRuleRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Protocols")]
    protocols: String,
    #[tabled(rename = "Source")]
    sources: String,
    #[tabled(rename = "Destination")]
    destinations: String,
    #[tabled(rename = "Ports")]
    ports: String,
}

impl From<&NetworkRule> for NetworkRuleRow {
    fn from(rule: &NetworkRule) -> Self {
        Self {
            name: rule.name().to_string(),
            description: rule.description().unwrap_or("").to_string(),
            protocols: rule.protocols().join(", "),
            sources: rule.source_addresses().join(", "),
            destinations: rule.destination_addresses().join(", "),
            ports: rule.destination_ports().join(", "),
        }
    }
}

#[derive(Tabled)]
struct FrontendRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Private IP")]
    private_ip: String,
    #[tabled(rename = "Allocation")]
    allocation: String,
    #[tabled(rename = "Public IP")]
    public_ip: String,
}

impl From<&FrontendIpConfiguration> for FrontendRow {
    fn from(fe: &FrontendIpConfiguration) -> Self {
        let p = &fe.properties;
        Self {
            name: fe.name.clone().unwrap_or_default(),
            private_ip: p.private_ip_address.clone().unwrap_or_default(),
            allocation: p.private_ip_allocation_method.clone().unwrap_or_default(),
            public_ip: p
                .public_ip_address
                .as_ref()
                .map(|r| r.id.rsplit('/').next().unwrap_or(&r.id).to_string())
                .unwrap_or_default(),
        }
    }
}

impl Emit for NetworkRule {
    fn to_table(&self) -> String {
        Table::new([NetworkRuleRow::from(self)]).to_string()
    }
}

impl Emit for LoadBalancer {
    fn to_table(&self) -> String {
        let header = match &self.location {
            Some(location) => format!("Load balancer: {} ({})", self.name, location),
            None => format!("Load balancer: {}", self.name),
        };
        let rows: Vec<FrontendRow> = self.frontend_ip_configurations().iter().map(FrontendRow::from).collect();
        format!("{}\n{}", header, Table::new(rows))
    }
}
