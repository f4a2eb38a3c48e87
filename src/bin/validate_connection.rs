//! Connection validation for Azure AI Search
//!
//! Tests the quickstart path: admin api-key auth, list the existing
//! indexes. One attempt, classified outcome, remediation on failure.

use std::process::ExitCode;

use azure_preflight::{
    heading, load_env_file, mask_secret, print_failure, ErrorClass, SearchAuth, SearchClient,
    SearchKeyConfig,
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

    heading("Azure AI Search Connection Validator");
    load_env_file();

    println!("🔍 Validating Azure Search connection...");
    let config = match SearchKeyConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            print_failure(&err);
            println!("Please ensure SEARCH_ENDPOINT and SEARCH_API_KEY are set in your .env file");
            return ExitCode::FAILURE;
        }
    };

    println!("📍 Endpoint: {}", config.endpoint);
    println!("🔑 API Key: {}", mask_secret(&config.api_key));

    println!("\n🔄 Testing connection...");
    let client = match SearchClient::new(&config.endpoint, SearchAuth::ApiKey(config.api_key)) {
        Ok(client) => client,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };

    match client.list_index_names().await {
        Ok(names) => {
            println!("✅ Connection successful!");
            println!("📊 Found {} existing indexes:", names.len());
            for name in &names {
                println!("   - {}", name);
            }
            println!("\n🎉 Your Azure Search service is ready to use!");
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_failure(&err);
            println!("\nPossible causes:");
            match err.class() {
                ErrorClass::Transient => {
                    println!("- Invalid endpoint URL");
                    println!("- Network connectivity issues");
                    println!("- DNS resolution problems");
                }
                ErrorClass::Authentication => {
                    println!("- Invalid API key");
                    println!("- Insufficient permissions");
                }
                _ => {
                    println!("- Service not found at this endpoint");
                }
            }
            println!("\n❌ Connection validation failed.");
            println!("Please check your configuration and try again.");
            ExitCode::SUCCESS
        }
    }
}
