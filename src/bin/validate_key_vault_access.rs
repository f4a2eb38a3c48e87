//! Key Vault access validation
//!
//! Retrieves the customer-managed key, then proves cryptographic
//! permissions with an RSA-OAEP wrap/unwrap round-trip of a 32-byte
//! plaintext. The exact pair of rights a CMK-encrypted service needs.

use std::process::ExitCode;

use azure_preflight::utils::constants::SCOPE_VAULT;
use azure_preflight::{
    heading, load_env_file, print_failure, DefaultCredentialChain, KeyVaultClient, KeyVaultConfig,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    heading("KEY VAULT ACCESS VALIDATOR");
    load_env_file();

    let config = match KeyVaultConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };

    println!("KEY_VAULT_URI: {}", config.vault_uri);
    println!("KEY_NAME: {}", config.key_name);
    println!(
        "KEY_VERSION: {}",
        config.key_version.as_deref().unwrap_or("(latest)")
    );

    let chain = match DefaultCredentialChain::new() {
        Ok(chain) => chain,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };
    let token = match chain.get_token(SCOPE_VAULT).await {
        Ok(token) => token,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };
    let client = match KeyVaultClient::new(&config.vault_uri, token) {
        Ok(client) => client,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };

    let bundle = match client
        .get_key(&config.key_name, config.key_version.as_deref())
        .await
    {
        Ok(bundle) => {
            match &config.key_version {
                Some(version) => println!(
                    "Key '{}' (version: {}) retrieved successfully.",
                    config.key_name, version
                ),
                None => println!("Key '{}' (latest version) retrieved successfully.", config.key_name),
            }
            bundle
        }
        Err(err) => {
            print_failure(&err);
            return ExitCode::SUCCESS;
        }
    };

    // 32 bytes, the size of a typical data-encryption key
    let plaintext: &[u8] = b"0123456789abcdef0123456789abcdef";

    let wrapped = match client.wrap_key(&bundle.key.kid, plaintext).await {
        Ok(wrapped) => {
            println!("Wrap operation succeeded.");
            wrapped
        }
        Err(err) => {
            print_failure(&err);
            return ExitCode::SUCCESS;
        }
    };

    let unwrapped = match client.unwrap_key(&bundle.key.kid, &wrapped).await {
        Ok(unwrapped) => {
            println!("Unwrap operation succeeded.");
            unwrapped
        }
        Err(err) => {
            print_failure(&err);
            return ExitCode::SUCCESS;
        }
    };

    if unwrapped == plaintext {
        println!("Validation successful: Access and cryptographic permissions are correct!");
    } else {
        println!("Validation failed: Unwrapped key does not match original.");
    }

    ExitCode::SUCCESS
}
