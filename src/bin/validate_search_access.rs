//! Azure AI Search access validation with the AAD credential
//!
//! The CMK-setup path: no admin key, the caller's identity must hold a
//! role on the service. Lists indexes, then fetches the configured index
//! when one is named.

use std::process::ExitCode;

use azure_preflight::utils::constants::SCOPE_SEARCH;
use azure_preflight::{
    heading, load_env_file, print_failure, DefaultCredentialChain, SearchAadConfig, SearchAuth,
    SearchClient,
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

    heading("Azure AI Search Access Validator (AAD)");
    load_env_file();

    let config = match SearchAadConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };

    println!("SEARCH_SERVICE_ENDPOINT: {}", config.endpoint);
    println!(
        "SEARCH_INDEX_NAME: {}",
        config.index_name.as_deref().unwrap_or("(not set)")
    );

    let chain = match DefaultCredentialChain::new() {
        Ok(chain) => chain,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };
    let token = match chain.get_token(SCOPE_SEARCH).await {
        Ok(token) => token,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };

    let client = match SearchClient::new(&config.endpoint, SearchAuth::Bearer(token)) {
        Ok(client) => client,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };
    println!("Connected to Azure AI Search service.");

    match client.list_index_names().await {
        Ok(names) => {
            println!("Found {} indexes:", names.len());
            for name in &names {
                println!(" - {}", name);
            }
        }
        Err(err) => {
            print_failure(&err);
            return ExitCode::SUCCESS;
        }
    }

    match &config.index_name {
        Some(name) => match client.get_index(name).await {
            Ok(index) => println!("Index '{}' retrieved successfully.", index.name),
            Err(err) => {
                print_failure(&err);
                return ExitCode::SUCCESS;
            }
        },
        None => {
            println!("No index name specified (AZURE_SEARCH_INDEX_NAME). Skipping index retrieval.")
        }
    }

    println!("Validation successful: Access to Azure AI Search service is working!");
    ExitCode::SUCCESS
}
