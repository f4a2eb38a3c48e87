//! Azure AI Search probe client
//!
//! One idempotent management-plane call: list index names, optionally
//! fetch a single index. Supports both auth paths the quickstarts use:
//! an admin api-key header, or an AAD bearer token.

use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use crate::models::errors::{ProbeError, ProbeResult};
use crate::models::types::AccessToken;
use crate::utils::constants::{DEFAULT_HTTP_TIMEOUT_SECS, SEARCH_API_VERSION, USER_AGENT};

/// How the client authenticates to the service
pub enum SearchAuth {
    /// Admin key sent in the `api-key` header
    ApiKey(String),
    /// AAD bearer token for scope https://search.azure.com/.default
    Bearer(AccessToken),
}

#[derive(Debug, Deserialize)]
struct IndexListResponse {
    value: Vec<IndexName>,
}

#[derive(Debug, Deserialize)]
struct IndexName {
    name: String,
}

/// One index, as returned by the management surface
#[derive(Debug, Deserialize)]
pub struct IndexSummary {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<IndexField>,
}

#[derive(Debug, Deserialize)]
pub struct IndexField {
    pub name: String,
}

pub struct SearchClient {
    endpoint: String,
    auth: SearchAuth,
    client: reqwest::Client,
}

impl SearchClient {
    pub fn new(endpoint: &str, auth: SearchAuth) -> ProbeResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            auth,
            client,
        })
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            SearchAuth::ApiKey(key) => req.header("api-key", key),
            SearchAuth::Bearer(token) => req.bearer_auth(&token.token),
        }
    }

    /// List index names; the cheapest reachability + authorization probe
    pub async fn list_index_names(&self) -> ProbeResult<Vec<String>> {
        let url = format!("{}/indexes", self.endpoint);
        let response = self
            .authorize(self.client.get(&url))
            .query(&[("api-version", SEARCH_API_VERSION), ("$select", "name")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::from_status(status.as_u16(), &body));
        }

        let parsed: IndexListResponse = response.json().await?;
        let names: Vec<String> = parsed.value.into_iter().map(|idx| idx.name).collect();
        info!("📊 Search: found {} indexes", names.len());
        Ok(names)
    }

    /// Fetch a single index by name
    pub async fn get_index(&self, name: &str) -> ProbeResult<IndexSummary> {
        let url = format!("{}/indexes/{}", self.endpoint, name);
        let response = self
            .authorize(self.client.get(&url))
            .query(&[("api-version", SEARCH_API_VERSION)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::from_status(status.as_u16(), &body));
        }

        Ok(response.json().await?)
    }
}
