//! Configuration records for the diagnostics
//!
//! One struct per service surface, each built from environment variables
//! (optionally seeded from a .env file) at the top of a binary and passed
//! down by reference. No ambient globals; reading the environment happens
//! here and nowhere else.

use std::env;

use crate::models::errors::{ProbeError, ProbeResult};
use crate::utils::constants::{
    DEFAULT_ANSWER_MODEL, DEFAULT_OPENAI_API_VERSION, PLACEHOLDER_API_KEY,
    PLACEHOLDER_SEARCH_API_KEY, PLACEHOLDER_SEARCH_ENDPOINT,
};

/// Seed the process environment from a local .env file when present.
/// Existing variables are overridden, matching load_dotenv(override=True)
/// in the quickstart material this tool diagnoses.
pub fn load_env_file() {
    let _ = dotenvy::dotenv_override();
}

/// Read a required key; absent or empty is a configuration error naming the key
fn required(key: &str) -> ProbeResult<String> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ProbeError::missing_env(key)),
    }
}

/// Read a required key and reject its documented placeholder sentinel
fn required_configured(key: &str, placeholder: &str) -> ProbeResult<String> {
    let value = required(key)?;
    if value == placeholder || value.contains(PLACEHOLDER_API_KEY) {
        return Err(ProbeError::placeholder_value(key));
    }
    Ok(value)
}

/// Read an optional key; empty counts as unset
fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// ============================================
// Azure AI Search
// ============================================

/// Search service reached with an admin api-key (quickstart path)
#[derive(Debug, Clone)]
pub struct SearchKeyConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl SearchKeyConfig {
    pub fn from_env() -> ProbeResult<Self> {
        Ok(Self {
            endpoint: required_configured("SEARCH_ENDPOINT", PLACEHOLDER_SEARCH_ENDPOINT)?,
            api_key: required_configured("SEARCH_API_KEY", PLACEHOLDER_SEARCH_API_KEY)?,
        })
    }
}

/// Search service reached with an AAD credential (CMK validation path)
#[derive(Debug, Clone)]
pub struct SearchAadConfig {
    pub endpoint: String,
    /// When set, the probe also fetches this index by name
    pub index_name: Option<String>,
}

impl SearchAadConfig {
    pub fn from_env() -> ProbeResult<Self> {
        Ok(Self {
            endpoint: required("AZURE_SEARCH_SERVICE")?,
            index_name: optional("AZURE_SEARCH_INDEX_NAME"),
        })
    }
}

// ============================================
// Azure OpenAI
// ============================================

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub endpoint: String,
    pub api_version: String,
    /// Model deployment name probed against the completion surfaces
    pub answer_model: String,
}

impl OpenAiConfig {
    pub fn from_env() -> ProbeResult<Self> {
        Ok(Self {
            endpoint: required("AZURE_OPENAI_ENDPOINT")?,
            api_version: optional("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_VERSION.to_string()),
            answer_model: optional("ANSWER_MODEL")
                .unwrap_or_else(|| DEFAULT_ANSWER_MODEL.to_string()),
        })
    }
}

// ============================================
// Azure Storage (ADLS Gen2)
// ============================================

/// Parsed Azure storage connection string.
/// Only the fields the diagnostics need; the account key is kept for
/// display-masking but never used to sign requests (auth is AAD).
#[derive(Debug, Clone)]
pub struct ConnectionString {
    pub account_name: String,
    pub account_key: Option<String>,
    pub endpoint_suffix: String,
}

impl ConnectionString {
    pub fn parse(raw: &str) -> ProbeResult<Self> {
        let mut account_name = None;
        let mut account_key = None;
        let mut endpoint_suffix = None;

        for pair in raw.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let Some((k, v)) = pair.split_once('=') else {
                return Err(ProbeError::invalid_value(format!(
                    "connection string segment '{}' has no '='",
                    pair
                )));
            };
            match k {
                "AccountName" => account_name = Some(v.to_string()),
                "AccountKey" => account_key = Some(v.to_string()),
                "EndpointSuffix" => endpoint_suffix = Some(v.to_string()),
                // DefaultEndpointsProtocol, BlobEndpoint, ... are irrelevant here
                _ => {}
            }
        }

        Ok(Self {
            account_name: account_name.ok_or_else(|| {
                ProbeError::invalid_value("connection string has no AccountName")
            })?,
            account_key,
            endpoint_suffix: endpoint_suffix.unwrap_or_else(|| "core.windows.net".to_string()),
        })
    }

    /// ADLS Gen2 (hierarchical namespace) endpoint for this account
    pub fn dfs_endpoint(&self) -> String {
        format!("https://{}.dfs.{}", self.account_name, self.endpoint_suffix)
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub connection: ConnectionString,
    /// Display-only; the authoritative name is in the connection string
    pub account_name: Option<String>,
    pub container_name: String,
}

impl StorageConfig {
    pub fn from_env() -> ProbeResult<Self> {
        let raw = required("AZURE_STORAGE_CONNECTION_STRING")?;
        Ok(Self {
            connection: ConnectionString::parse(&raw)?,
            account_name: optional("AZURE_STORAGE_ACCOUNT_NAME"),
            container_name: required("AZURE_STORAGE_CONTAINER_NAME")?,
        })
    }
}

/// Everything the eight-step ADLS permission sweep needs
#[derive(Debug, Clone)]
pub struct AdlsSweepConfig {
    pub search_endpoint: String,
    pub storage: StorageConfig,
    pub storage_resource_id: String,
}

impl AdlsSweepConfig {
    pub fn from_env() -> ProbeResult<Self> {
        Ok(Self {
            search_endpoint: required("AZURE_SEARCH_ENDPOINT")?,
            storage: StorageConfig::from_env()?,
            storage_resource_id: required("AZURE_STORAGE_RESOURCE_ID")?,
        })
    }
}

// ============================================
// Azure Key Vault
// ============================================

#[derive(Debug, Clone)]
pub struct KeyVaultConfig {
    pub vault_uri: String,
    pub key_name: String,
    /// Blank means latest version
    pub key_version: Option<String>,
}

impl KeyVaultConfig {
    pub fn from_env() -> ProbeResult<Self> {
        Ok(Self {
            vault_uri: required("AZURE_KEY_VAULT_URI")?,
            key_name: required("AZURE_KEY_VAULT_NAME")?,
            key_version: optional("AZURE_KEY_VAULT_VERSION"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;
    use std::sync::Mutex;

    // std::env is process-global; serialize tests that touch it
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_missing_key_is_configuration_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::remove_var("SEARCH_ENDPOINT");
        env::remove_var("SEARCH_API_KEY");
        let err = SearchKeyConfig::from_env().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigMissingEnv);
        assert!(err.message.contains("SEARCH_ENDPOINT"));
    }

    #[test]
    fn test_placeholder_key_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("SEARCH_ENDPOINT", "https://contoso.search.windows.net");
        env::set_var("SEARCH_API_KEY", PLACEHOLDER_SEARCH_API_KEY);
        let err = SearchKeyConfig::from_env().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigPlaceholderValue);
        assert!(err.message.contains("SEARCH_API_KEY"));
        env::remove_var("SEARCH_ENDPOINT");
        env::remove_var("SEARCH_API_KEY");
    }

    #[test]
    fn test_configured_values_pass() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("SEARCH_ENDPOINT", "https://contoso.search.windows.net");
        env::set_var("SEARCH_API_KEY", "real-admin-key-0042");
        let cfg = SearchKeyConfig::from_env().unwrap();
        assert_eq!(cfg.endpoint, "https://contoso.search.windows.net");
        env::remove_var("SEARCH_ENDPOINT");
        env::remove_var("SEARCH_API_KEY");
    }

    #[test]
    fn test_openai_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("AZURE_OPENAI_ENDPOINT", "https://contoso.openai.azure.com");
        env::remove_var("AZURE_OPENAI_API_VERSION");
        env::remove_var("ANSWER_MODEL");
        let cfg = OpenAiConfig::from_env().unwrap();
        assert_eq!(cfg.api_version, DEFAULT_OPENAI_API_VERSION);
        assert_eq!(cfg.answer_model, DEFAULT_ANSWER_MODEL);
        env::remove_var("AZURE_OPENAI_ENDPOINT");
    }

    #[test]
    fn test_connection_string_parse() {
        let cs = ConnectionString::parse(
            "DefaultEndpointsProtocol=https;AccountName=contosolake;AccountKey=abc123==;EndpointSuffix=core.windows.net",
        )
        .unwrap();
        assert_eq!(cs.account_name, "contosolake");
        assert_eq!(cs.account_key.as_deref(), Some("abc123=="));
        assert_eq!(cs.dfs_endpoint(), "https://contosolake.dfs.core.windows.net");
    }

    #[test]
    fn test_connection_string_default_suffix() {
        let cs = ConnectionString::parse("AccountName=contosolake").unwrap();
        assert_eq!(cs.dfs_endpoint(), "https://contosolake.dfs.core.windows.net");
    }

    #[test]
    fn test_connection_string_without_account_is_invalid() {
        let err = ConnectionString::parse("AccountKey=abc").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }
}
