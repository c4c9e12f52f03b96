//! GCP Client
//!
//! Main client for the Cloud Asset Inventory API, combining authentication
//! and HTTP functionality.

use super::auth::GcpCredentials;
use super::http::GcpHttpClient;
use anyhow::{Context, Result};
use serde_json::Value;
use url::Url;

/// Public Cloud Asset Inventory endpoint
pub const DEFAULT_ASSET_ENDPOINT: &str = "https://cloudasset.googleapis.com";

/// Main GCP client
#[derive(Clone)]
pub struct GcpClient {
    pub credentials: GcpCredentials,
    pub http: GcpHttpClient,
    pub asset_endpoint: String,
}

impl GcpClient {
    /// Create a new GCP client using ambient credentials
    pub async fn new(asset_endpoint: &str) -> Result<Self> {
        let credentials = GcpCredentials::new()
            .await
            .context("Failed to initialize GCP credentials")?;

        Self::with_credentials(credentials, asset_endpoint)
    }

    /// Create a client around already-resolved credentials
    pub fn with_credentials(credentials: GcpCredentials, asset_endpoint: &str) -> Result<Self> {
        Url::parse(asset_endpoint)
            .with_context(|| format!("Invalid asset endpoint: {}", asset_endpoint))?;

        Ok(Self {
            credentials,
            http: GcpHttpClient::new()?,
            asset_endpoint: asset_endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Get the current access token
    pub async fn get_token(&self) -> Result<String> {
        self.credentials.get_token().await
    }

    /// Make a GET request to a GCP API
    pub async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        let token = self.get_token().await?;
        self.http.get(url, &token, query).await
    }

    // =========================================================================
    // Cloud Asset API helpers
    // =========================================================================

    /// Build Cloud Asset API URL
    pub fn asset_url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.asset_endpoint, path)
    }

    /// Build the searchAllResources URL for a scope (e.g. `organizations/123`)
    pub fn search_all_resources_url(&self, scope: &str) -> String {
        self.asset_url(&format!("{}:searchAllResources", scope))
    }
}

/// Format a GCP API error for display
pub fn format_gcp_error(error: &anyhow::Error) -> String {
    super::http::format_gcp_error(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_strips_trailing_slash() {
        let creds = GcpCredentials::from_static_token("t");
        let client = GcpClient::with_credentials(creds, "http://127.0.0.1:9000/").unwrap();
        assert_eq!(
            client.search_all_resources_url("organizations/42"),
            "http://127.0.0.1:9000/v1/organizations/42:searchAllResources"
        );
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let creds = GcpCredentials::from_static_token("t");
        assert!(GcpClient::with_credentials(creds, "not a url").is_err());
    }
}
