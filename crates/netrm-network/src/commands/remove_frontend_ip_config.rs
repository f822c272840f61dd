//! Remove a frontend IP configuration from a load balancer

use crate::models::{FrontendIpConfigLookup, FrontendIpConfiguration, LoadBalancer};
use netrm_common::{NetrmError, NetrmResult, ValidationErrors};

/// Parameters of the remove-frontend-ip-config command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveFrontendIpConfigParams {
    /// Name to remove. Unset only matches unnamed entries.
    pub name: Option<String>,
}

impl RemoveFrontendIpConfigParams {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if matches!(self.name.as_deref(), Some("")) {
            errors.push("name", "The frontend IP configuration name should not be empty when specified!");
        }
        errors
    }
}

/// Remove the frontend IP configuration matching `params.name`.
///
/// Returns the removed entry, or `None` when nothing matched. More than one
/// match is an [`NetrmError::AmbiguousMatch`] and leaves the load balancer
/// untouched.
pub fn remove_frontend_ip_config(
    load_balancer: &mut LoadBalancer,
    params: &RemoveFrontendIpConfigParams,
) -> NetrmResult<Option<FrontendIpConfiguration>> {
    params.validate().into_result()?;

    match load_balancer.find_frontend_ip_configuration(params.name.as_deref()) {
        FrontendIpConfigLookup::NotFound => {
            tracing::debug!(
                load_balancer = %load_balancer.name,
                name = ?params.name,
                "no frontend IP configuration matched"
            );
            Ok(None)
        }
        FrontendIpConfigLookup::Unique(index) => {
            let removed = load_balancer.properties.frontend_ip_configurations.remove(index);
            tracing::info!(
                load_balancer = %load_balancer.name,
                name = ?removed.name,
                "frontend IP configuration removed"
            );
            Ok(Some(removed))
        }
        FrontendIpConfigLookup::Multiple(indices) => Err(NetrmError::AmbiguousMatch {
            name: params.name.clone().unwrap_or_default(),
            count: indices.len(),
        }),
    }
}
