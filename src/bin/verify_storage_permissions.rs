//! Storage permission verifier
//!
//! Shows exactly which identity is hitting the data lake (Azure CLI
//! account, decoded token claims), then proves write access by creating
//! the container and a test directory. Every section is best-effort so a
//! broken CLI install doesn't hide the token claims, and vice versa.

use std::process::ExitCode;

use azure_preflight::utils::constants::SCOPE_STORAGE;
use azure_preflight::{
    azure_cli_account_user, decode_token_claims, heading, load_env_file, mask_secret,
    print_failure, DataLakeClient, DefaultCredentialChain, StorageConfig,
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

    heading("STORAGE PERMISSIONS VERIFIER");
    load_env_file();

    let config = match StorageConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };

    println!("Account: {}", config.connection.account_name);
    if let Some(key) = &config.connection.account_key {
        println!("Account key: {}", mask_secret(key));
    }
    println!("Container: {}", config.container_name);

    println!("\n--- Azure CLI identity ---");
    match azure_cli_account_user().await {
        Ok(user) => println!("Azure CLI authenticated user: {}", user),
        Err(err) => {
            println!("Could not determine Azure CLI user: {}", err.message);
        }
    }

    let chain = match DefaultCredentialChain::new() {
        Ok(chain) => chain,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };
    let token = match chain.get_token(SCOPE_STORAGE).await {
        Ok(token) => token,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };

    println!("\n--- Access token identity ---");
    match decode_token_claims(&token.token) {
        Ok(claims) => {
            println!("Token claims:");
            for (claim, value) in claims.present() {
                println!("  {}: {}", claim, value);
            }
        }
        Err(err) => println!("Error decoding access token: {}", err),
    }

    println!("\n--- Container access ---");
    let client = match DataLakeClient::new(&config.connection, &config.container_name, token) {
        Ok(client) => client,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };

    match client.filesystem_exists().await {
        Ok(true) => println!("Container exists."),
        Ok(false) => {
            println!("Container does not exist. Creating container...");
            if let Err(err) = client.create_filesystem().await {
                print_failure(&err);
                return ExitCode::SUCCESS;
            }
        }
        Err(err) => {
            print_failure(&err);
            return ExitCode::SUCCESS;
        }
    }

    let test_dir = "test-directory";
    match client.create_directory(test_dir).await {
        Ok(()) => println!("Directory '{}' created successfully.", test_dir),
        Err(err) => {
            println!("Failed to create directory:");
            print_failure(&err);
        }
    }

    ExitCode::SUCCESS
}
