//! Microsoft Graph probe client
//!
//! User profile and group memberships, awaited in turn. The group ids
//! feed the ADLS ACL sweep; the profile is the cheapest signed-in check.

use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use crate::models::errors::{ProbeError, ProbeResult};
use crate::models::types::AccessToken;
use crate::utils::constants::{DEFAULT_HTTP_TIMEOUT_SECS, GRAPH_BASE_URL, USER_AGENT};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub user_principal_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryObject {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DirectoryObjectList {
    value: Vec<DirectoryObject>,
}

pub struct GraphClient {
    token: AccessToken,
    client: reqwest::Client,
}

impl GraphClient {
    pub fn new(token: AccessToken) -> ProbeResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { token, client })
    }

    /// Current user profile
    pub async fn me(&self) -> ProbeResult<UserProfile> {
        let url = format!("{}/me", GRAPH_BASE_URL);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::from_status(status.as_u16(), &body));
        }

        Ok(response.json().await?)
    }

    /// Groups and roles the current user is a member of
    pub async fn member_of(&self) -> ProbeResult<Vec<DirectoryObject>> {
        let url = format!("{}/me/memberOf", GRAPH_BASE_URL);
        let response = self
            .client
            .get(&url)
            .query(&[("$select", "id,displayName")])
            .bearer_auth(&self.token.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::from_status(status.as_u16(), &body));
        }

        let parsed: DirectoryObjectList = response.json().await?;
        info!("👥 Graph: member of {} directory objects", parsed.value.len());
        Ok(parsed.value)
    }
}
