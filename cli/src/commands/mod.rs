//! CLI Commands

pub mod auth;
pub mod config;
pub mod firewall;
pub mod load_balancer;

use netrm_common::{NetrmError, NetrmResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Management API client
pub struct ApiClient {
    pub base_url: String,
    pub subscription_id: Option<String>,
    pub api_version: String,
    access_token: Option<String>,
    profile_token: Option<String>,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        subscription_id: Option<&str>,
        api_version: &str,
        access_token: Option<&str>,
        profile_token: Option<&str>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            subscription_id: subscription_id.map(String::from),
            api_version: api_version.to_string(),
            access_token: access_token.map(String::from),
            profile_token: profile_token.map(String::from),
            client: reqwest::Client::new(),
        }
    }

    /// Path of a load balancer resource
    pub fn load_balancer_path(&self, resource_group: &str, name: &str) -> NetrmResult<String> {
        let subscription = self.subscription_id.as_deref().ok_or_else(|| {
            NetrmError::Config("subscription id is required; pass --subscription-id or set NETRM_SUBSCRIPTION_ID".into())
        })?;
        Ok(format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Network/loadBalancers/{}",
            subscription, resource_group, name
        ))
    }

    /// Full URL for a resource path or resource ID
    pub fn url(&self, path: &str) -> String {
        format!("{}{}?api-version={}", self.base_url, path, self.api_version)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> NetrmResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let token = auth::resolve_token(self.access_token.as_deref(), self.profile_token.as_deref())?;

        let resp = self
            .client
            .get(&url)
            .header("Authorization", token.bearer())
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(resp).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> NetrmResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "PUT");
        let token = auth::resolve_token(self.access_token.as_deref(), self.profile_token.as_deref())?;

        let resp = self
            .client
            .put(&url)
            .header("Authorization", token.bearer())
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> NetrmResult<T> {
        let status = resp.status();
        let body = resp.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(NetrmError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        serde_json::from_str(&body).map_err(|e| NetrmError::Serialization(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> NetrmError {
    NetrmError::Api {
        status: e.status().map(|s| s.as_u16()).unwrap_or(0),
        message: e.to_string(),
    }
}

/// `error.message` of a management API error body, or the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            let error = v.get("error")?;
            let message = error.get("message")?.as_str()?;
            Some(match error.get("code").and_then(|c| c.as_str()) {
                Some(code) => format!("{}: {}", code, message),
                None => message.to_string(),
            })
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(subscription: Option<&str>) -> ApiClient {
        ApiClient::new("https://management.example.com/", subscription, "2023-09-01", None, None)
    }

    #[test]
    fn test_load_balancer_url() {
        let client = client(Some("sub-1"));
        let path = client.load_balancer_path("rg", "lb").unwrap();
        assert_eq!(
            client.url(&path),
            "https://management.example.com/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.Network/loadBalancers/lb?api-version=2023-09-01"
        );
    }

    #[test]
    fn test_missing_subscription() {
        assert!(matches!(client(None).load_balancer_path("rg", "lb"), Err(NetrmError::Config(_))));
    }

    #[test]
    fn test_error_message_parsing() {
        let body = r#"{"error":{"code":"ResourceNotFound","message":"not here"}}"#;
        assert_eq!(error_message(body), "ResourceNotFound: not here");
        assert_eq!(error_message("  gateway timeout \n"), "gateway timeout");
    }

    #[test]
    fn test_get_without_token_fails_before_sending() {
        let client = client(Some("sub-1"));
        let result: NetrmResult<serde_json::Value> = tokio_test::block_on(client.get("/anything"));
        assert!(matches!(result, Err(NetrmError::Auth(_))));
    }
}
