//! Azure OpenAI region detector (Azure CLI backed)
//!
//! Asks the Azure CLI for the service's actual location, then checks the
//! Responses API allow-list. Falls back to host-token matching, and to
//! printing the full allow-list, when the region cannot be determined.

use std::process::Command;

use azure_preflight::region::{
    region_from_host, responses_api_regions, service_name_from_endpoint, supports_responses_api,
};
use azure_preflight::utils::constants::EUROPEAN_RESPONSES_REGIONS;
use azure_preflight::{heading, load_env_file, section, OpenAiConfig};

/// Resolve the account's location via the signed-in Azure CLI
fn region_from_azure_cli(service_name: &str) -> Option<String> {
    let query = format!("[?name=='{}'].location | [0]", service_name);
    let output = Command::new("az")
        .args([
            "cognitiveservices",
            "account",
            "list",
            "--query",
            &query,
            "--output",
            "tsv",
        ])
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let region = String::from_utf8_lossy(&out.stdout).trim().to_string();
            if region.is_empty() {
                None
            } else {
                Some(region)
            }
        }
        Ok(out) => {
            println!("❌ Azure CLI error: {}", String::from_utf8_lossy(&out.stderr).trim());
            None
        }
        Err(_) => {
            println!("❌ Azure CLI not found on PATH");
            None
        }
    }
}

fn show_european_options() {
    section("🌍 EUROPEAN REGION OPTIONS");

    println!("European regions that support the Responses API:");
    for region in EUROPEAN_RESPONSES_REGIONS {
        println!("  • {}", region);
    }

    println!("\nIf you're in a different European region, you can:");
    println!("1. Create a new Azure OpenAI service in North Europe or West Europe");
    println!("2. Contact Azure support to request the Responses API in your region");
    println!("3. Use the Chat Completions API as an alternative");
}

fn main() {
    heading("AZURE OPENAI REGION DETECTOR");
    load_env_file();

    section("🔍 CHECKING REGION WITH AZURE CLI");

    let config = match OpenAiConfig::from_env() {
        Ok(config) => config,
        Err(_) => {
            println!("❌ AZURE_OPENAI_ENDPOINT not found");
            return;
        }
    };

    let service_name = service_name_from_endpoint(&config.endpoint).unwrap_or_default();
    println!("Service Name: {}", service_name);

    let region = region_from_azure_cli(service_name)
        .or_else(|| region_from_host(service_name).map(String::from));

    match region {
        Some(region) => {
            println!("✅ Region: {}", region);
            if supports_responses_api(&region) {
                println!("✅ This region supports the Responses API!");
            } else {
                println!("❌ This region does NOT support the Responses API.");
                show_european_options();
            }
        }
        None => {
            println!("\n⚠️  Could not determine region automatically.");
            println!("Please check manually in Azure Portal:");
            println!("1. Go to https://portal.azure.com");
            println!("2. Find your Azure OpenAI service ({})", service_name);
            println!("3. Check the 'Location' field in the Overview");
            println!("4. Compare with supported regions below:");

            println!("\nSupported regions for the Responses API:");
            for region in responses_api_regions() {
                println!("  • {}", region);
            }
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("NEXT STEPS:");
    println!("{}", "=".repeat(60));
    println!("If your region doesn't support the Responses API:");
    println!("1. Create a new service in North Europe or West Europe");
    println!("2. Deploy your model in the new service");
    println!("3. Update your .env file");
    println!("4. Test with: check_responses_api");
}
