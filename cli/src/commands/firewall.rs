//! Firewall commands

use crate::{output::OutputFormat, FirewallCommands, NetworkRuleCommands};
use netrm_network::{new_network_rule, NewNetworkRuleParams};

pub fn handle(action: FirewallCommands, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        FirewallCommands::NetworkRule {
            action: NetworkRuleCommands::New(args),
        } => {
            let rule = new_network_rule(NewNetworkRuleParams {
                name: args.name,
                description: args.description,
                source_addresses: args.source_addresses,
                destination_addresses: args.destination_addresses,
                destination_ports: args.destination_ports,
                protocols: args.protocols,
            })?;
            format.print(&rule)?;
        }
    }
    Ok(())
}
