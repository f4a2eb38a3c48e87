//! Environment setup for the Search quickstart
//!
//! Creates .env from sample.env when missing, then validates that the
//! required values were actually filled in. Pure local checks; this
//! binary never touches the network.

use std::path::Path;
use std::process::ExitCode;

use azure_preflight::{heading, load_env_file, mask_secret, print_failure, SearchKeyConfig};

fn ensure_env_file() -> bool {
    if Path::new(".env").exists() {
        return true;
    }

    println!("📁 Creating .env file...");
    if !Path::new("sample.env").exists() {
        println!("❌ sample.env file not found!");
        return false;
    }

    match std::fs::copy("sample.env", ".env") {
        Ok(_) => {
            println!("✅ Created .env file from sample.env");
            println!("📝 Please edit .env with your actual Azure Search service details");
            true
        }
        Err(e) => {
            println!("❌ Failed to create .env file: {}", e);
            false
        }
    }
}

fn main() -> ExitCode {
    heading("Azure AI Search Quickstart Environment Setup");

    if !ensure_env_file() {
        return ExitCode::FAILURE;
    }

    load_env_file();
    println!("🔍 Checking environment variables...");

    match SearchKeyConfig::from_env() {
        Ok(config) => {
            println!("✅ SEARCH_ENDPOINT: {}", config.endpoint);
            println!("✅ SEARCH_API_KEY: {}", mask_secret(&config.api_key));
            println!("\n🎉 Environment is properly configured!");
            println!("You can now run the connection validator.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_failure(&err);
            println!("\n❌ Environment is not properly configured.");
            println!("Please fix the issue above and run this script again.");
            ExitCode::FAILURE
        }
    }
}
