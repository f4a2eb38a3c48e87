//! ADLS Gen2 permission sweep
//!
//! Eight steps mirroring the document-permissions quickstart: load
//! configuration, authenticate, read the caller's first two group ids
//! from Microsoft Graph, ensure the container, then lay out the
//! state-parks sample tree with per-group ACLs. The first four steps are
//! load-bearing and stop the run; the rest are best-effort.

use std::process::ExitCode;

use azure_preflight::utils::constants::{
    OREGON_CSV_URL, SCOPE_GRAPH, SCOPE_STORAGE, WASHINGTON_CSV_URL,
};
use azure_preflight::providers::storage::fetch_sample;
use azure_preflight::{
    heading, load_env_file, AdlsSweepConfig, DataLakeClient, DefaultCredentialChain, GraphClient,
    ProbeError, Sweep,
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

    heading("ADLS GEN2 PERMISSION SWEEP");
    load_env_file();

    match run().await {
        Ok(code) => code,
        Err(_) => ExitCode::FAILURE,
    }
}

async fn run() -> Result<ExitCode, ProbeError> {
    let mut sweep = Sweep::new();

    let config = sweep
        .step_fatal("Load environment variables", async {
            let config = AdlsSweepConfig::from_env()?;
            println!("Environment variables loaded successfully.");
            println!("  endpoint: {}", config.search_endpoint);
            println!("  account: {}", config.storage.connection.account_name);
            println!("  container: {}", config.storage.container_name);
            Ok(config)
        })
        .await?;

    let chain = match DefaultCredentialChain::new() {
        Ok(chain) => chain,
        Err(err) => {
            azure_preflight::print_failure(&err);
            return Err(err);
        }
    };
    let storage_token = sweep
        .step_fatal("Authenticate with Azure", async {
            let token = chain.get_token(SCOPE_STORAGE).await?;
            println!("Azure authentication successful.");
            Ok(token)
        })
        .await?;

    let (first_group, second_group) = sweep
        .step_fatal("Retrieve group IDs from Microsoft Graph", async {
            let graph_token = chain.get_token(SCOPE_GRAPH).await?;
            let graph = GraphClient::new(graph_token)?;
            let groups = graph.member_of().await?;
            if groups.len() < 2 {
                return Err(ProbeError::invalid_response(format!(
                    "need at least two group memberships for the ACL sweep, found {}",
                    groups.len()
                )));
            }
            println!("First group ID: {}", groups[0].id);
            println!("Second group ID: {}", groups[1].id);
            Ok((groups[0].id.clone(), groups[1].id.clone()))
        })
        .await?;

    let client = sweep
        .step_fatal("Connect to ADLS Gen2 and create container if needed", async {
            let client = DataLakeClient::new(
                &config.storage.connection,
                &config.storage.container_name,
                storage_token,
            )?;
            if client.filesystem_exists().await? {
                println!("Container exists.");
            } else {
                client.create_filesystem().await?;
                println!("Container created.");
            }
            Ok(client)
        })
        .await?;

    sweep
        .step("Create 'state-parks' directory", async {
            client.create_directory("state-parks").await?;
            println!("'state-parks' directory created.");
            Ok(())
        })
        .await;

    sweep
        .step("Set ACLs on root directory", async {
            client
                .update_acl_recursive("/", &format!("group:{}:rwx", first_group))
                .await?;
            println!("Root ACL set for first group: {}", first_group);
            client
                .update_acl_recursive("/", &format!("group:{}:rwx", second_group))
                .await?;
            println!("Root ACL set for second group: {}", second_group);
            Ok(())
        })
        .await;

    sweep
        .step("Create and upload to 'oregon' subdirectory", async {
            client.create_directory("state-parks/oregon").await?;
            let csv = fetch_sample(OREGON_CSV_URL).await?;
            client
                .upload_file("state-parks/oregon/oregon_state_parks.csv", &csv)
                .await?;
            client
                .update_acl_recursive("state-parks/oregon", &format!("group:{}:rwx", first_group))
                .await?;
            println!("'oregon' subdirectory and file created, ACL set.");
            Ok(())
        })
        .await;

    sweep
        .step("Create and upload to 'washington' subdirectory", async {
            client.create_directory("state-parks/washington").await?;
            let csv = fetch_sample(WASHINGTON_CSV_URL).await?;
            client
                .upload_file("state-parks/washington/washington_state_parks.csv", &csv)
                .await?;
            client
                .update_acl_recursive(
                    "state-parks/washington",
                    &format!("group:{}:rwx", second_group),
                )
                .await?;
            println!("'washington' subdirectory and file created, ACL set.");
            Ok(())
        })
        .await;

    sweep.print_summary();
    Ok(ExitCode::SUCCESS)
}
