//! Azure OpenAI region checker (offline)
//!
//! Derives the service region from the endpoint host name alone and
//! reports Responses API support against the allow-list. No network
//! access; for the authoritative answer use check_azure_region.

use azure_preflight::region::{
    is_azure_openai_endpoint, region_from_host, responses_api_regions, service_name_from_endpoint,
    supports_responses_api,
};
use azure_preflight::{heading, load_env_file, section, OpenAiConfig};

fn check_service_region() {
    section("🌍 CHECKING AZURE OPENAI SERVICE REGION");

    let config = match OpenAiConfig::from_env() {
        Ok(config) => config,
        Err(_) => {
            println!("❌ AZURE_OPENAI_ENDPOINT not found in .env file");
            return;
        }
    };

    println!("Endpoint: {}", config.endpoint);

    if !is_azure_openai_endpoint(&config.endpoint) {
        println!("⚠️  Endpoint doesn't match expected Azure OpenAI format.");
        return;
    }

    let Some(service_name) = service_name_from_endpoint(&config.endpoint) else {
        println!("⚠️  Could not extract service name from endpoint.");
        return;
    };
    println!("Service Name: {}", service_name);

    match region_from_host(service_name) {
        Some(region) => {
            println!("Detected Region: {}", region);
            if supports_responses_api(region) {
                println!("✅ This region supports the Responses API!");
                println!("The issue might be with your service configuration.");
            } else {
                println!("❌ This region does NOT support the Responses API.");
                println!("You need to create a new service in a supported region.");
            }
        }
        None => {
            println!("⚠️  Could not determine region automatically.");
            println!("Check your Azure portal for the exact region.");
        }
    }
}

fn show_supported_regions() {
    section("📋 RESPONSES API SUPPORTED REGIONS");

    println!("The Responses API is available in these regions:");
    for region in responses_api_regions() {
        println!("  • {}", region);
    }

    println!("\nTo use the Responses API, you need:");
    println!("1. Azure OpenAI service in one of the above regions");
    println!("2. API version 2025-05-01-preview or later");
    println!("3. Supported model deployment (gpt-4o, gpt-4o-mini, etc.)");
}

fn main() {
    heading("AZURE OPENAI REGION CHECKER");
    load_env_file();

    check_service_region();
    show_supported_regions();

    println!("\n{}", "=".repeat(60));
    println!("NEXT STEPS:");
    println!("{}", "=".repeat(60));
    println!("If your region doesn't support the Responses API:");
    println!("1. Create a new Azure OpenAI service in a supported region");
    println!("2. Deploy your model in the new service");
    println!("3. Update your .env file with the new endpoint");
    println!("4. Test with: check_responses_api");
}
