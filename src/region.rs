//! Region/Capability Matcher
//!
//! Decides whether an Azure OpenAI endpoint sits in a region known to
//! support the Responses API. A static lookup, not a classifier: exact
//! match against the canonical allow-list first, then a substring match
//! of host tokens, first mapping entry wins.

use crate::utils::constants::{
    canonical_region_for_token, is_responses_api_region, RESPONSES_API_REGIONS,
    REGION_HOST_TOKENS,
};

/// Extract the service name from an endpoint URL, e.g.
/// `https://contoso.openai.azure.com` -> `contoso`
pub fn service_name_from_endpoint(endpoint: &str) -> Option<&str> {
    let host = endpoint
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let name = host.split('.').next()?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Whether the endpoint looks like an Azure OpenAI endpoint at all
pub fn is_azure_openai_endpoint(endpoint: &str) -> bool {
    endpoint.contains("openai.azure.com")
}

/// Derive a canonical region from a service name or host by substring
/// match against the token table. Returns None when the host carries no
/// region hint (common: service names rarely embed a region).
pub fn region_from_host(host: &str) -> Option<&'static str> {
    let host = host.to_lowercase();
    REGION_HOST_TOKENS
        .iter()
        .find(|(token, _)| host.contains(*token))
        .map(|(_, region)| *region)
}

/// Check whether a detected region supports the Responses API.
/// Accepts either a canonical name ("East US") or a short token
/// ("eastus"); a token is resolved through the mapping both ways, as the
/// detected string may be longer or shorter than the table entry.
pub fn supports_responses_api(region: &str) -> bool {
    if region.trim().is_empty() {
        return false;
    }
    if is_responses_api_region(region) {
        return true;
    }
    // Exact token before the substring fallback, so "eastus" never lands
    // on the longer "eastus2" row
    if let Some(canonical) = canonical_region_for_token(region) {
        return is_responses_api_region(canonical);
    }
    let region_lower = region.to_lowercase();
    for (token, canonical) in REGION_HOST_TOKENS {
        if region_lower.contains(token) || token.contains(region_lower.as_str()) {
            return is_responses_api_region(canonical);
        }
    }
    false
}

/// Allow-list rows for display, in table order
pub fn responses_api_regions() -> &'static [&'static str] {
    &RESPONSES_API_REGIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_name_extraction() {
        assert_eq!(
            service_name_from_endpoint("https://contoso.openai.azure.com"),
            Some("contoso")
        );
        assert_eq!(service_name_from_endpoint("https://"), None);
    }

    #[test]
    fn test_region_from_host() {
        assert_eq!(region_from_host("svc-eastus-prod"), Some("East US"));
        assert_eq!(region_from_host("myapp-westeurope"), Some("West Europe"));
        // No region hint in the host at all
        assert_eq!(region_from_host("contoso"), None);
    }

    #[test]
    fn test_supports_canonical_names() {
        for region in RESPONSES_API_REGIONS {
            assert!(supports_responses_api(region), "{} should be supported", region);
        }
        assert!(!supports_responses_api("Mars Base One"));
    }

    #[test]
    fn test_supports_short_tokens() {
        assert!(supports_responses_api("eastus"));
        assert!(supports_responses_api("uksouth"));
        // Known region, but outside the allow-list
        assert!(!supports_responses_api("koreacentral"));
    }
}
