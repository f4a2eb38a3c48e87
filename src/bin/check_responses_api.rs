//! Responses API availability diagnostic
//!
//! Sends a minimal request to the Responses surface, classifies the
//! failure, prints status-specific troubleshooting, and demonstrates the
//! Chat Completions fallback that works in every region.

use std::process::ExitCode;

use azure_preflight::region::{is_azure_openai_endpoint, service_name_from_endpoint};
use azure_preflight::utils::constants::SCOPE_COGNITIVE;
use azure_preflight::{
    heading, load_env_file, print_failure, section, AzureOpenAiClient, ChatMessage,
    DefaultCredentialChain, ErrorCode, OpenAiConfig, ProbeError,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn print_troubleshooting(err: &ProbeError) {
    match err.code {
        ErrorCode::CapabilityNotFound => {
            println!("\n🔧 TROUBLESHOOTING 404 ERROR:");
            println!("1. Check if your Azure OpenAI service is in a supported region:");
            println!("   - East US, West US 2, North Europe, West Europe");
            println!("   - UK South, Australia East, Canada East");
            println!("2. Verify you're using the latest API version: 2025-05-01-preview");
            println!("3. Make sure your model deployment supports the Responses API");
            println!("4. Check if your Azure OpenAI service was created recently");
        }
        ErrorCode::AuthTokenRejected | ErrorCode::AuthForbidden => {
            println!("\n🔧 TROUBLESHOOTING 401/403 ERROR:");
            println!("1. Check your authentication credentials");
            println!("2. Verify you have the correct permissions");
        }
        ErrorCode::CapabilityBadRequest => {
            println!("\n🔧 TROUBLESHOOTING 400 ERROR:");
            println!("1. Check your model deployment name");
            println!("2. Verify the model supports the Responses API");
        }
        _ => {}
    }
}

fn check_alternative_solutions() {
    section("💡 ALTERNATIVE SOLUTIONS");

    println!("If the Responses API is not available, you can:");
    println!("1. Use the Chat Completions API (works everywhere)");
    println!("2. Contact Azure support to enable the Responses API");
    println!("3. Create a new Azure OpenAI service in a supported region");
    println!("4. Wait for the Responses API to be available in your region");
}

#[tokio::main]
async fn main() -> ExitCode {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    heading("AZURE OPENAI RESPONSES API DIAGNOSTIC");
    load_env_file();

    section("🔍 DIAGNOSING AZURE OPENAI SERVICE");
    let config = match OpenAiConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };

    println!("✅ Endpoint: {}", config.endpoint);
    println!("✅ API Version: {}", config.api_version);
    if is_azure_openai_endpoint(&config.endpoint) {
        match service_name_from_endpoint(&config.endpoint) {
            Some(name) => println!("✅ Service Name: {}", name),
            None => println!("⚠️  Could not extract service name from endpoint"),
        }
    } else {
        println!("⚠️  Endpoint doesn't match expected Azure OpenAI format");
    }

    section("🧪 TESTING RESPONSES API AVAILABILITY");
    let chain = match DefaultCredentialChain::new() {
        Ok(chain) => chain,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };
    let token = match chain.get_token(SCOPE_COGNITIVE).await {
        Ok(token) => token,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };
    let client = match AzureOpenAiClient::new(&config, token) {
        Ok(client) => client,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };

    println!("Testing with model: {}", config.answer_model);
    println!("Testing with API version: {}", config.api_version);

    let messages = [ChatMessage::user("Hello")];
    let success = match client.responses_probe(&config.answer_model, &messages).await {
        Ok(text) => {
            println!("✅ SUCCESS! The Responses API is available!");
            println!("Response: {}", text);
            true
        }
        Err(err) => {
            print_failure(&err);
            print_troubleshooting(&err);

            println!("\nFalling back to the Chat Completions API...");
            match client.chat_completions(&config.answer_model, &messages).await {
                Ok(text) => {
                    println!("✅ Chat Completions API worked!");
                    println!("Response: {}", text);
                }
                Err(err) => print_failure(&err),
            }
            false
        }
    };

    if !success {
        check_alternative_solutions();
    }

    println!("\n{}", "=".repeat(60));
    println!("SUMMARY:");
    println!("{}", "=".repeat(60));
    if success {
        println!("✅ Your Azure OpenAI service supports the Responses API!");
    } else {
        println!("❌ The Responses API is not available in your current setup.");
        println!("Consider using the Chat Completions API as an alternative.");
    }

    ExitCode::SUCCESS
}
