//! Load balancer commands

use super::ApiClient;
use crate::{output::OutputFormat, FrontendIpConfigCommands, LoadBalancerCommands, RemoveFrontendIpConfigArgs};
use anyhow::{bail, Context};
use netrm_common::{NetrmError, NetrmResult};
use netrm_network::{remove_frontend_ip_config, LoadBalancer, RemoveFrontendIpConfigParams};
use std::fs;
use std::io::Read;

pub async fn handle(action: LoadBalancerCommands, client: &ApiClient, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        LoadBalancerCommands::Get { resource_group, name } => {
            let path = client.load_balancer_path(&resource_group, &name)?;
            let lb: LoadBalancer = client.get(&path).await?;
            format.print(&lb)?;
        }
        LoadBalancerCommands::Set { file, resource_group } => {
            let lb = read_load_balancer(&file)?;
            let path = resource_path(client, &lb, resource_group.as_deref())?;
            let lb: LoadBalancer = client.put(&path, &lb).await?;
            format.print(&lb)?;
        }
        LoadBalancerCommands::FrontendIpConfig {
            action: FrontendIpConfigCommands::Remove(args),
        } => remove(args, client, format).await?,
    }
    Ok(())
}

async fn remove(args: RemoveFrontendIpConfigArgs, client: &ApiClient, format: OutputFormat) -> anyhow::Result<()> {
    let (mut lb, resource_group) = match (&args.file, &args.resource_group, &args.load_balancer_name) {
        (Some(file), _, _) => (read_load_balancer(file)?, None),
        (None, Some(rg), Some(name)) => {
            let path = client.load_balancer_path(rg, name)?;
            let lb: LoadBalancer = client.get(&path).await?;
            (lb, Some(rg.clone()))
        }
        _ => bail!("either --file or --resource-group with --load-balancer-name is required"),
    };

    let params = RemoveFrontendIpConfigParams { name: args.name };
    let removed = remove_frontend_ip_config(&mut lb, &params)?;

    if args.apply {
        if removed.is_some() {
            let path = resource_path(client, &lb, resource_group.as_deref())?;
            lb = client.put(&path, &lb).await?;
        } else {
            tracing::info!(load_balancer = %lb.name, "nothing removed, not submitting");
        }
    }

    format.print(&lb)?;
    Ok(())
}

/// Resource path from the load balancer's ID, or from its name and `resource_group`
fn resource_path(client: &ApiClient, lb: &LoadBalancer, resource_group: Option<&str>) -> NetrmResult<String> {
    if let Some(id) = &lb.id {
        return Ok(id.clone());
    }
    match resource_group {
        Some(rg) => client.load_balancer_path(rg, &lb.name),
        None => Err(NetrmError::Config(
            "load balancer has no resource ID; pass --resource-group".into(),
        )),
    }
}

fn read_load_balancer(file: &str) -> anyhow::Result<LoadBalancer> {
    let content = if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("reading load balancer from stdin")?;
        buf
    } else {
        fs::read_to_string(file).with_context(|| format!("reading load balancer from {}", file))?
    };
    let is_yaml = file.ends_with(".yaml") || file.ends_with(".yml") || file == "-";
    Ok(parse_load_balancer(&content, is_yaml)?)
}

/// JSON is accepted on the YAML path too
pub fn parse_load_balancer(content: &str, yaml: bool) -> NetrmResult<LoadBalancer> {
    if yaml {
        serde_yaml::from_str(content).map_err(|e| NetrmError::Serialization(e.to_string()))
    } else {
        serde_json::from_str(content).map_err(|e| NetrmError::Serialization(e.to_string()))
    }
}
