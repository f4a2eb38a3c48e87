//! Credential chain smoke test
//!
//! Asks the default chain for a Microsoft Graph token and prints the
//! truncated result. The fastest way to tell whether any credential
//! source on this machine works at all.

use std::process::ExitCode;

use azure_preflight::utils::constants::SCOPE_GRAPH;
use azure_preflight::{heading, load_env_file, print_failure, DefaultCredentialChain};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    heading("DEFAULT CREDENTIAL CHECK");
    load_env_file();

    let chain = match DefaultCredentialChain::new() {
        Ok(chain) => chain,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };

    match chain.get_token(SCOPE_GRAPH).await {
        Ok(token) => {
            println!("Successfully obtained token!");
            println!("Token: {}", token.truncated());
            if let Some(expires) = token.expires_on {
                println!("Expires: {}", expires);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("Failed to obtain token with the default credential chain.");
            print_failure(&err);
            ExitCode::FAILURE
        }
    }
}
