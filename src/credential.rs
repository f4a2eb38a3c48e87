//! Credential Resolver - default chain over Azure AD
//!
//! Produces bearer tokens for a target scope without the caller picking a
//! source: environment service principal, then IMDS managed identity, then
//! the Azure CLI. Per-source failures are collected and reported together
//! when the whole chain is exhausted; nothing is retried.

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

use crate::models::errors::{ProbeError, ProbeResult};
use crate::models::types::{AccessToken, TokenClaims};
use crate::utils::constants::{DEFAULT_HTTP_TIMEOUT_SECS, IMDS_TIMEOUT_SECS, USER_AGENT};

/// Link-local instance metadata endpoint, present on Azure hosts only
const IMDS_TOKEN_URL: &str = "http://169.254.169.254/metadata/identity/oauth2/token";
const IMDS_API_VERSION: &str = "2018-02-01";

/// AAD v2 token endpoint response
#[derive(Debug, Deserialize)]
struct AadTokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

/// IMDS response; expires_on is epoch seconds as a string
#[derive(Debug, Deserialize)]
struct ImdsTokenResponse {
    access_token: String,
    expires_on: Option<String>,
}

/// `az account get-access-token` output
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliTokenResponse {
    access_token: String,
    /// Local wall-clock time, e.g. "2026-08-06 14:03:21.000000"
    expires_on: Option<String>,
}

/// Ordered credential chain. Owned by one probe invocation; tokens are
/// never cached across runs.
pub struct DefaultCredentialChain {
    client: reqwest::Client,
}

impl DefaultCredentialChain {
    pub fn new() -> ProbeResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// Acquire a bearer token for the given scope, trying each source in
    /// order. Surfaces every per-source failure when none succeeds.
    pub async fn get_token(&self, scope: &str) -> ProbeResult<AccessToken> {
        let mut failures: Vec<String> = Vec::new();

        match self.environment_token(scope).await {
            Ok(token) => {
                info!("🔑 Token acquired from environment service principal");
                return Ok(token);
            }
            Err(e) => {
                debug!("environment credential unavailable: {}", e);
                failures.push(format!("environment: {}", e.message));
            }
        }

        match self.managed_identity_token(scope).await {
            Ok(token) => {
                info!("🔑 Token acquired from managed identity");
                return Ok(token);
            }
            Err(e) => {
                debug!("managed identity unavailable: {}", e);
                failures.push(format!("managed identity: {}", e.message));
            }
        }

        match self.azure_cli_token(scope).await {
            Ok(token) => {
                info!("🔑 Token acquired from Azure CLI");
                return Ok(token);
            }
            Err(e) => {
                debug!("azure cli credential unavailable: {}", e);
                failures.push(format!("azure cli: {}", e.message));
            }
        }

        Err(ProbeError::no_credential(format!(
            "no credential source succeeded for scope {}: {}",
            scope,
            failures.join("; ")
        )))
    }

    /// Client-credentials grant from AZURE_TENANT_ID / AZURE_CLIENT_ID /
    /// AZURE_CLIENT_SECRET
    async fn environment_token(&self, scope: &str) -> ProbeResult<AccessToken> {
        let tenant = std::env::var("AZURE_TENANT_ID")
            .map_err(|_| ProbeError::missing_env("AZURE_TENANT_ID"))?;
        let client_id = std::env::var("AZURE_CLIENT_ID")
            .map_err(|_| ProbeError::missing_env("AZURE_CLIENT_ID"))?;
        let client_secret = std::env::var("AZURE_CLIENT_SECRET")
            .map_err(|_| ProbeError::missing_env("AZURE_CLIENT_SECRET"))?;

        let url = format!(
            "https://login.microsoftonline.com/{}/oauth2/v2.0/token",
            tenant
        );
        let response = self
            .client
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("scope", scope),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::from_status(status.as_u16(), &body));
        }

        let parsed: AadTokenResponse = response.json().await?;
        let expires_on = parsed
            .expires_in
            .map(|secs| Utc::now() + chrono::Duration::seconds(secs));
        Ok(AccessToken::new(parsed.access_token, expires_on))
    }

    /// IMDS managed identity; fails fast off-Azure via a short timeout
    async fn managed_identity_token(&self, scope: &str) -> ProbeResult<AccessToken> {
        let resource = scope.trim_end_matches("/.default");
        let response = self
            .client
            .get(IMDS_TOKEN_URL)
            .query(&[("api-version", IMDS_API_VERSION), ("resource", resource)])
            .header("Metadata", "true")
            .timeout(Duration::from_secs(IMDS_TIMEOUT_SECS))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::from_status(status.as_u16(), &body));
        }

        let parsed: ImdsTokenResponse = response.json().await?;
        let expires_on = parsed
            .expires_on
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(|epoch| DateTime::<Utc>::from_timestamp(epoch, 0));
        Ok(AccessToken::new(parsed.access_token, expires_on))
    }

    /// `az account get-access-token --scope <scope>` subprocess
    async fn azure_cli_token(&self, scope: &str) -> ProbeResult<AccessToken> {
        let output = Command::new("az")
            .args(["account", "get-access-token", "--scope", scope, "--output", "json"])
            .output()
            .await
            .map_err(|_| ProbeError::cli_unavailable("Azure CLI not found on PATH"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProbeError::cli_unavailable(format!(
                "az account get-access-token failed: {}",
                stderr.trim()
            )));
        }

        let parsed: CliTokenResponse = serde_json::from_slice(&output.stdout)?;
        // The CLI prints local wall-clock time; close enough for expiry display
        let expires_on = parsed.expires_on.and_then(|s| {
            NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        });
        Ok(AccessToken::new(parsed.access_token, expires_on))
    }
}

/// Decode the payload claims of a bearer token for identity display.
/// JWT segments are unpadded base64url; signature is not checked, this is
/// a diagnostic, not a validator.
pub fn decode_token_claims(token: &str) -> ProbeResult<TokenClaims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| ProbeError::invalid_response("token is not in JWT format"))?;
    let decoded = general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| {
            ProbeError::invalid_response(format!("token payload is not base64url: {}", e))
        })?;
    let claims: TokenClaims = serde_json::from_slice(&decoded)?;
    Ok(claims)
}

/// Show which account the Azure CLI is signed in with, when it is
pub async fn azure_cli_account_user() -> ProbeResult<String> {
    let output = Command::new("az")
        .args(["account", "show", "--query", "user", "--output", "json"])
        .output()
        .await
        .map_err(|_| ProbeError::cli_unavailable("Azure CLI not found on PATH"))?;

    if !output.status.success() {
        return Err(ProbeError::cli_unavailable(
            "not signed in via Azure CLI (az login)",
        ));
    }

    let user: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    match (user.get("name").and_then(|v| v.as_str()), user.get("type").and_then(|v| v.as_str())) {
        (Some(name), Some(kind)) => Ok(format!("{} ({})", name, kind)),
        _ => Ok(user.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_jwt(payload_json: &str) -> String {
        let header = general_purpose::URL_SAFE_NO_PAD.encode(b"{\"alg\":\"none\"}");
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(payload_json.as_bytes());
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn test_decode_claims() {
        let token = fake_jwt(
            r#"{"oid":"11111111-2222-3333-4444-555555555555","upn":"user@contoso.com","tid":"t-1"}"#,
        );
        let claims = decode_token_claims(&token).unwrap();
        assert_eq!(claims.oid.as_deref(), Some("11111111-2222-3333-4444-555555555555"));
        assert_eq!(claims.upn.as_deref(), Some("user@contoso.com"));
        assert_eq!(claims.tid.as_deref(), Some("t-1"));
        assert!(claims.appid.is_none());
    }

    #[test]
    fn test_decode_claims_ignores_unknown_fields() {
        let token = fake_jwt(r#"{"oid":"x","aud":"https://storage.azure.com","iat":123}"#);
        let claims = decode_token_claims(&token).unwrap();
        assert_eq!(claims.oid.as_deref(), Some("x"));
    }

    #[test]
    fn test_decode_claims_rejects_garbage() {
        assert!(decode_token_claims("not-a-jwt").is_err());
        assert!(decode_token_claims("a.!!!.c").is_err());
    }
}
