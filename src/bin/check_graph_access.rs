//! Microsoft Graph access check
//!
//! Fetches the signed-in user's profile, then their group memberships,
//! awaited in turn. The group list is what the ADLS permission sweep
//! feeds into ACLs, so seeing it here first saves a round of debugging.

use std::process::ExitCode;

use azure_preflight::utils::constants::SCOPE_GRAPH;
use azure_preflight::{heading, load_env_file, print_failure, DefaultCredentialChain, GraphClient};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    heading("MICROSOFT GRAPH ACCESS CHECK");
    load_env_file();

    let chain = match DefaultCredentialChain::new() {
        Ok(chain) => chain,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };
    let token = match chain.get_token(SCOPE_GRAPH).await {
        Ok(token) => token,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };
    let client = match GraphClient::new(token) {
        Ok(client) => client,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };

    let me = match client.me().await {
        Ok(me) => me,
        Err(err) => {
            print_failure(&err);
            return ExitCode::FAILURE;
        }
    };

    println!("User profile:");
    println!("Display Name: {}", me.display_name.as_deref().unwrap_or("N/A"));
    println!(
        "User Principal Name: {}",
        me.user_principal_name.as_deref().unwrap_or("N/A")
    );
    println!("ID: {}", me.id);

    println!("\nGroup memberships:");
    match client.member_of().await {
        Ok(groups) if groups.is_empty() => println!("No group memberships found."),
        Ok(groups) => {
            for group in groups {
                println!(
                    "Group ID: {}, Display Name: {}",
                    group.id,
                    group.display_name.as_deref().unwrap_or("N/A")
                );
            }
        }
        Err(err) => print_failure(&err),
    }

    ExitCode::SUCCESS
}
