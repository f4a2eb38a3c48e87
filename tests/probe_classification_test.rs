//! Integration tests for outcome classification and configuration gating

use std::env;
use std::sync::Mutex;

use azure_preflight::{
    decode_token_claims, mask_secret, ConnectionString, ErrorClass, ErrorCode, ProbeError,
    SearchKeyConfig, Sweep,
};

// std::env is process-global; serialize the tests that touch it
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn test_placeholder_api_key_stops_before_any_network_call() {
    let _guard = ENV_LOCK.lock().unwrap();
    env::set_var("SEARCH_ENDPOINT", "https://contoso.search.windows.net");
    env::set_var("SEARCH_API_KEY", "your-admin-api-key-here");

    // Loading must fail naming the key; no client is ever constructed
    let err = SearchKeyConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigPlaceholderValue);
    assert_eq!(err.class(), ErrorClass::Configuration);
    assert!(err.message.contains("SEARCH_API_KEY"));

    env::remove_var("SEARCH_ENDPOINT");
    env::remove_var("SEARCH_API_KEY");
}

#[test]
fn test_placeholder_endpoint_is_reported_as_unconfigured() {
    let _guard = ENV_LOCK.lock().unwrap();
    env::set_var("SEARCH_ENDPOINT", "https://your-service-name.search.windows.net");
    env::set_var("SEARCH_API_KEY", "real-key-1234");

    let err = SearchKeyConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigPlaceholderValue);
    assert!(err.message.contains("SEARCH_ENDPOINT"));

    env::remove_var("SEARCH_ENDPOINT");
    env::remove_var("SEARCH_API_KEY");
}

#[test]
fn test_not_found_and_unauthorized_remediations_differ() {
    let not_found = ProbeError::from_status(404, "Resource not found");
    let unauthorized = ProbeError::from_status(403, "Forbidden");

    assert_eq!(not_found.class(), ErrorClass::Capability);
    assert_eq!(unauthorized.class(), ErrorClass::Authentication);

    let capability_hint = not_found.remediation().expect("404 carries a hint");
    let auth_hint = unauthorized.remediation().expect("403 carries a hint");
    assert_ne!(capability_hint, auth_hint);
}

#[tokio::test]
async fn test_capability_failure_is_not_retried_and_sweep_continues() {
    let mut sweep = Sweep::new();
    let mut attempts = 0u32;

    let outcome: Option<()> = sweep
        .step("responses surface", async {
            attempts += 1;
            Err(ProbeError::from_status(404, "no responses surface here"))
        })
        .await;

    assert!(outcome.is_none());
    assert_eq!(attempts, 1, "a Not-Found probe must be a single attempt");

    // An unrelated later step still runs
    let later = sweep.step("chat completions surface", async { Ok("ok") }).await;
    assert_eq!(later, Some("ok"));
    assert_eq!(sweep.failed(), 1);
    assert_eq!(sweep.passed(), 1);
}

#[test]
fn test_connection_string_round_trip_to_dfs_endpoint() {
    let cs = ConnectionString::parse(
        "DefaultEndpointsProtocol=https;AccountName=contosolake;AccountKey=k==;EndpointSuffix=core.windows.net",
    )
    .unwrap();
    assert_eq!(cs.dfs_endpoint(), "https://contosolake.dfs.core.windows.net");
}

#[test]
fn test_malformed_connection_string_is_configuration_error() {
    let err = ConnectionString::parse("EndpointSuffix=core.windows.net").unwrap_err();
    assert_eq!(err.class(), ErrorClass::Configuration);
}

#[test]
fn test_jwt_decode_never_panics_on_garbage() {
    assert!(decode_token_claims("").is_err());
    assert!(decode_token_claims("only-one-segment").is_err());
    assert!(decode_token_claims("a.%%%.c").is_err());
}

#[test]
fn test_secret_masking_keeps_only_tail() {
    let masked = mask_secret("super-secret-admin-key");
    assert!(masked.ends_with("-key"));
    assert!(!masked.contains("super"));
}
