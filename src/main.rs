//! Azure Preflight - full diagnostic sweep
//!
//! Probes every Azure service that has configuration present and prints a
//! classified verdict per service. Unconfigured services are skipped, one
//! failed probe never blocks the next, and nothing is retried.

use azure_preflight::{
    heading, load_env_file, mask_secret, AzureOpenAiClient, ChatMessage, DataLakeClient,
    DefaultCredentialChain, GraphClient, KeyVaultClient, KeyVaultConfig, OpenAiConfig,
    SearchAadConfig, SearchAuth, SearchClient, SearchKeyConfig, StorageConfig, Sweep,
};
use azure_preflight::utils::constants::{
    SCOPE_COGNITIVE, SCOPE_GRAPH, SCOPE_SEARCH, SCOPE_STORAGE, SCOPE_VAULT,
};

use eyre::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    heading("AZURE PREFLIGHT DIAGNOSTIC SWEEP");
    load_env_file();

    let chain = DefaultCredentialChain::new()?;
    let mut sweep = Sweep::new();

    // Search with an admin key
    match SearchKeyConfig::from_env() {
        Ok(config) => {
            sweep
                .step("Search service (api-key)", async {
                    println!("📍 Endpoint: {}", config.endpoint);
                    println!("🔑 API Key: {}", mask_secret(&config.api_key));
                    let client =
                        SearchClient::new(&config.endpoint, SearchAuth::ApiKey(config.api_key.clone()))?;
                    let names = client.list_index_names().await?;
                    println!("✅ Connection successful! {} indexes", names.len());
                    for name in &names {
                        println!("   - {}", name);
                    }
                    Ok(())
                })
                .await;
        }
        Err(err) => sweep.skip("Search service (api-key)", &err.to_string()),
    }

    // Search with the AAD credential
    match SearchAadConfig::from_env() {
        Ok(config) => {
            sweep
                .step("Search service (AAD)", async {
                    let token = chain.get_token(SCOPE_SEARCH).await?;
                    let client = SearchClient::new(&config.endpoint, SearchAuth::Bearer(token))?;
                    let names = client.list_index_names().await?;
                    println!("✅ Found {} indexes", names.len());
                    Ok(())
                })
                .await;
        }
        Err(err) => sweep.skip("Search service (AAD)", &err.to_string()),
    }

    // Azure OpenAI: Responses surface, Chat Completions fallback
    match OpenAiConfig::from_env() {
        Ok(config) => {
            sweep
                .step("Azure OpenAI completion surfaces", async {
                    let token = chain.get_token(SCOPE_COGNITIVE).await?;
                    let client = AzureOpenAiClient::new(&config, token)?;
                    let hello = [ChatMessage::user("Hello")];
                    match client.responses_probe(&config.answer_model, &hello).await {
                        Ok(_) => println!("✅ Responses API is available"),
                        Err(err) => {
                            azure_preflight::print_failure(&err);
                            println!("↩️  Falling back to Chat Completions...");
                            client.chat_completions(&config.answer_model, &hello).await?;
                            println!("✅ Chat Completions API worked");
                        }
                    }
                    Ok(())
                })
                .await;
        }
        Err(err) => sweep.skip("Azure OpenAI completion surfaces", &err.to_string()),
    }

    // ADLS Gen2 container reachability
    match StorageConfig::from_env() {
        Ok(config) => {
            sweep
                .step("Storage container (ADLS Gen2)", async {
                    let token = chain.get_token(SCOPE_STORAGE).await?;
                    let client =
                        DataLakeClient::new(&config.connection, &config.container_name, token)?;
                    if client.filesystem_exists().await? {
                        println!("✅ Container '{}' exists", config.container_name);
                    } else {
                        println!("⚠️  Container '{}' does not exist yet", config.container_name);
                    }
                    Ok(())
                })
                .await;
        }
        Err(err) => sweep.skip("Storage container (ADLS Gen2)", &err.to_string()),
    }

    // Key Vault key access
    match KeyVaultConfig::from_env() {
        Ok(config) => {
            sweep
                .step("Key Vault key access", async {
                    let token = chain.get_token(SCOPE_VAULT).await?;
                    let client = KeyVaultClient::new(&config.vault_uri, token)?;
                    let bundle = client
                        .get_key(&config.key_name, config.key_version.as_deref())
                        .await?;
                    println!("✅ Key '{}' retrieved ({})", config.key_name, bundle.key.kty);
                    Ok(())
                })
                .await;
        }
        Err(err) => sweep.skip("Key Vault key access", &err.to_string()),
    }

    // Graph profile; runs whenever any credential source works
    sweep
        .step("Microsoft Graph profile", async {
            let token = chain.get_token(SCOPE_GRAPH).await?;
            let client = GraphClient::new(token)?;
            let me = client.me().await?;
            println!(
                "✅ Signed in as {} ({})",
                me.display_name.as_deref().unwrap_or("unknown"),
                me.user_principal_name.as_deref().unwrap_or("n/a")
            );
            Ok(())
        })
        .await;

    sweep.print_summary();
    Ok(())
}
