//! Azure Preflight Library
//!
//! Configuration-gated external-service probes for Azure OpenAI, Azure AI
//! Search, ADLS Gen2, Key Vault and Microsoft Graph: load configuration,
//! acquire a credential through a default chain, perform one idempotent
//! call, classify the outcome, print a remediation hint. One attempt per
//! probe; these are manual diagnostic aids, not production clients.

pub mod credential;
pub mod models;
pub mod probe;
pub mod providers;
pub mod region;
pub mod utils;

pub use credential::{azure_cli_account_user, decode_token_claims, DefaultCredentialChain};
pub use models::config::{
    load_env_file, AdlsSweepConfig, ConnectionString, KeyVaultConfig, OpenAiConfig,
    SearchAadConfig, SearchKeyConfig, StorageConfig,
};
pub use models::errors::{ErrorClass, ErrorCode, ProbeError, ProbeResult};
pub use models::types::{mask_secret, AccessToken, TokenClaims};
pub use probe::{heading, print_failure, section, StepStatus, Sweep};
pub use providers::{
    AzureOpenAiClient, ChatMessage, DataLakeClient, GraphClient, KeyVaultClient, SearchAuth,
    SearchClient,
};
