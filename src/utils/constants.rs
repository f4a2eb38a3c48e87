//! Constants Module - Single Source of Truth
//!
//! Every scope, API version, placeholder sentinel, and region table used
//! across the diagnostics lives here. No hardcoded values in other modules.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "AzurePreflight";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for HTTP requests
pub const USER_AGENT: &str = "AzurePreflight/0.1.0";

/// Default timeout for service probe requests (seconds)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Timeout for the IMDS managed-identity endpoint (seconds).
/// IMDS is link-local; off-Azure hosts must fail fast.
pub const IMDS_TIMEOUT_SECS: u64 = 3;

// ============================================
// TOKEN SCOPES - Single Source of Truth
// ============================================

/// Azure AI Search data/control plane
pub const SCOPE_SEARCH: &str = "https://search.azure.com/.default";
/// Azure OpenAI (Cognitive Services)
pub const SCOPE_COGNITIVE: &str = "https://cognitiveservices.azure.com/.default";
/// Azure Storage (Blob + ADLS Gen2)
pub const SCOPE_STORAGE: &str = "https://storage.azure.com/.default";
/// Microsoft Graph
pub const SCOPE_GRAPH: &str = "https://graph.microsoft.com/.default";
/// Azure Key Vault
pub const SCOPE_VAULT: &str = "https://vault.azure.net/.default";

// ============================================
// SERVICE API VERSIONS
// ============================================

/// Azure OpenAI data-plane API version required by the Responses surface
pub const DEFAULT_OPENAI_API_VERSION: &str = "2025-05-01-preview";

/// Azure AI Search management surface
pub const SEARCH_API_VERSION: &str = "2024-07-01";

/// Key Vault keys + crypto surface
pub const KEY_VAULT_API_VERSION: &str = "7.4";

/// ADLS Gen2 `x-ms-version` header
pub const STORAGE_API_VERSION: &str = "2023-11-03";

/// Microsoft Graph v1.0 base URL
pub const GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Default model deployment probed against the completion surfaces
pub const DEFAULT_ANSWER_MODEL: &str = "gpt-4o";

// ============================================
// PLACEHOLDER SENTINELS
// ============================================
// Values shipped in sample.env that mean "never actually filled in".

/// Sample endpoint shipped with the Search quickstart
pub const PLACEHOLDER_SEARCH_ENDPOINT: &str = "https://your-service-name.search.windows.net";

/// Sample admin key shipped with the Search quickstart
pub const PLACEHOLDER_SEARCH_API_KEY: &str = "your-admin-api-key-here";

/// Generic API key placeholder seen in sample URLs
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

// ============================================
// RESPONSES API REGION ALLOW-LIST
// ============================================
// Hand-maintained table. The provider expands support over time; update the
// rows here, nothing is derived.

/// Regions known to support the Azure OpenAI Responses API
pub const RESPONSES_API_REGIONS: [&str; 7] = [
    "East US",
    "West US 2",
    "North Europe",
    "West Europe",
    "UK South",
    "Australia East",
    "Canada East",
];

/// European subset of the allow-list, for relocation guidance
pub const EUROPEAN_RESPONSES_REGIONS: [&str; 3] = ["North Europe", "West Europe", "UK South"];

/// Short host-name tokens mapped to canonical region names.
/// Ordered; the first matching entry wins.
pub const REGION_HOST_TOKENS: [(&str, &str); 15] = [
    ("eastus2", "East US 2"),
    ("eastus", "East US"),
    ("westus2", "West US 2"),
    ("westus", "West US"),
    ("northeurope", "North Europe"),
    ("westeurope", "West Europe"),
    ("uksouth", "UK South"),
    ("australiaeast", "Australia East"),
    ("canadaeast", "Canada East"),
    ("southcentralus", "South Central US"),
    ("centralus", "Central US"),
    ("brazilsouth", "Brazil South"),
    ("japaneast", "Japan East"),
    ("southeastasia", "Southeast Asia"),
    ("koreacentral", "Korea Central"),
];

/// Resolve a short host token (e.g. "eastus") to its canonical region name
pub fn canonical_region_for_token(token: &str) -> Option<&'static str> {
    let token = token.to_lowercase();
    REGION_HOST_TOKENS
        .iter()
        .find(|(pattern, _)| *pattern == token)
        .map(|(_, region)| *region)
}

/// Check membership in the Responses API allow-list (exact canonical name)
#[inline]
pub fn is_responses_api_region(region: &str) -> bool {
    RESPONSES_API_REGIONS.contains(&region)
}

// ============================================
// SAMPLE DATA - Single Source of Truth
// ============================================

/// Oregon state-parks CSV used by the ADLS permission sweep
pub const OREGON_CSV_URL: &str = "https://raw.githubusercontent.com/Azure-Samples/azure-search-sample-data/refs/heads/main/state-parks/Oregon/oregon_state_parks.csv";

/// Washington state-parks CSV used by the ADLS permission sweep
pub const WASHINGTON_CSV_URL: &str = "https://raw.githubusercontent.com/Azure-Samples/azure-search-sample-data/refs/heads/main/state-parks/Washington/washington_state_parks.csv";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list_membership() {
        for region in RESPONSES_API_REGIONS {
            assert!(is_responses_api_region(region));
        }
        assert!(!is_responses_api_region("Mars Base One"));
    }

    #[test]
    fn test_token_resolution() {
        assert_eq!(canonical_region_for_token("eastus"), Some("East US"));
        assert_eq!(canonical_region_for_token("EastUS2"), Some("East US 2"));
        assert_eq!(canonical_region_for_token("contoso"), None);
    }

    #[test]
    fn test_token_order_prefers_longest_prefix() {
        // "eastus2" must resolve before the shorter "eastus" row
        assert_eq!(canonical_region_for_token("eastus2"), Some("East US 2"));
    }

    #[test]
    fn test_european_subset_is_allowed() {
        for region in EUROPEAN_RESPONSES_REGIONS {
            assert!(is_responses_api_region(region));
        }
    }
}
