//! Integration tests for the region/capability matcher

use azure_preflight::region::{
    is_azure_openai_endpoint, region_from_host, responses_api_regions, service_name_from_endpoint,
    supports_responses_api,
};

#[test]
fn test_every_allow_list_region_is_supported() {
    for region in responses_api_regions() {
        assert!(
            supports_responses_api(region),
            "{} should support the Responses API",
            region
        );
    }
}

#[test]
fn test_unrelated_region_is_not_supported() {
    assert!(!supports_responses_api("Mars Base One"));
    assert!(!supports_responses_api(""));
}

#[test]
fn test_host_token_resolves_to_canonical_name() {
    // A host embedding "eastus" must land on the canonical "East US" row
    let region = region_from_host("my-service-eastus").expect("token should resolve");
    assert_eq!(region, "East US");
    assert!(supports_responses_api(region));
}

#[test]
fn test_known_region_outside_allow_list() {
    let region = region_from_host("svc-koreacentral").expect("token should resolve");
    assert_eq!(region, "Korea Central");
    assert!(!supports_responses_api(region));
}

#[test]
fn test_endpoint_without_region_hint_yields_no_region() {
    // https://contoso.openai.azure.com carries no region in the host; the
    // caller must fall back to printing the full allow-list
    let endpoint = "https://contoso.openai.azure.com";
    assert!(is_azure_openai_endpoint(endpoint));

    let service_name = service_name_from_endpoint(endpoint).unwrap();
    assert_eq!(service_name, "contoso");
    assert_eq!(region_from_host(service_name), None);

    // The fallback listing must still contain every canonical region
    assert_eq!(responses_api_regions().len(), 7);
    assert!(responses_api_regions().contains(&"East US"));
    assert!(responses_api_regions().contains(&"Canada East"));
}
