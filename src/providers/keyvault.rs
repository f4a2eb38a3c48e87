//! Azure Key Vault probe client
//!
//! Key retrieval plus an RSA-OAEP wrap/unwrap round-trip: the minimal
//! pair of operations that proves both vault access and cryptographic
//! permissions, the exact check a CMK-encrypted search service needs.

use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::info;

use crate::models::errors::{ProbeError, ProbeResult};
use crate::models::types::AccessToken;
use crate::utils::constants::{DEFAULT_HTTP_TIMEOUT_SECS, KEY_VAULT_API_VERSION, USER_AGENT};

/// Wrap algorithm used by the round-trip probe
pub const WRAP_ALGORITHM: &str = "RSA-OAEP";

/// A key bundle; `kid` is the full versioned key URL
#[derive(Debug, Deserialize)]
pub struct KeyBundle {
    pub key: JsonWebKey,
}

#[derive(Debug, Deserialize)]
pub struct JsonWebKey {
    pub kid: String,
    pub kty: String,
}

/// Crypto operation response; `value` is base64url without padding
#[derive(Debug, Deserialize)]
struct KeyOperationResult {
    value: String,
}

pub struct KeyVaultClient {
    vault_uri: String,
    token: AccessToken,
    client: reqwest::Client,
}

impl KeyVaultClient {
    pub fn new(vault_uri: &str, token: AccessToken) -> ProbeResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            vault_uri: vault_uri.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    /// Fetch a key, latest version when none is pinned
    pub async fn get_key(&self, name: &str, version: Option<&str>) -> ProbeResult<KeyBundle> {
        let url = match version {
            Some(v) => format!("{}/keys/{}/{}", self.vault_uri, name, v),
            None => format!("{}/keys/{}", self.vault_uri, name),
        };
        let response = self
            .client
            .get(&url)
            .query(&[("api-version", KEY_VAULT_API_VERSION)])
            .bearer_auth(&self.token.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::from_status(status.as_u16(), &body));
        }

        let bundle: KeyBundle = response.json().await?;
        info!("🔑 Key retrieved: {} ({})", bundle.key.kid, bundle.key.kty);
        Ok(bundle)
    }

    /// Wrap `plaintext` under the key identified by its versioned `kid`
    pub async fn wrap_key(&self, kid: &str, plaintext: &[u8]) -> ProbeResult<Vec<u8>> {
        self.crypto_operation(kid, "wrapkey", plaintext).await
    }

    /// Unwrap a previously wrapped value
    pub async fn unwrap_key(&self, kid: &str, wrapped: &[u8]) -> ProbeResult<Vec<u8>> {
        self.crypto_operation(kid, "unwrapkey", wrapped).await
    }

    async fn crypto_operation(
        &self,
        kid: &str,
        operation: &str,
        value: &[u8],
    ) -> ProbeResult<Vec<u8>> {
        let url = format!("{}/{}", kid.trim_end_matches('/'), operation);
        let encoded = general_purpose::URL_SAFE_NO_PAD.encode(value);
        let response = self
            .client
            .post(&url)
            .query(&[("api-version", KEY_VAULT_API_VERSION)])
            .bearer_auth(&self.token.token)
            .json(&json!({ "alg": WRAP_ALGORITHM, "value": encoded }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::from_status(status.as_u16(), &body));
        }

        let result: KeyOperationResult = response.json().await?;
        general_purpose::URL_SAFE_NO_PAD
            .decode(result.value.trim_end_matches('='))
            .map_err(|e| ProbeError::invalid_response(format!("{} value is not base64url: {}", operation, e)))
    }
}
