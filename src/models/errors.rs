//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so a diagnostic run can be
//! read from its console output alone.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - CFG_xxx: Configuration errors
//! - AUTH_xxx: Authentication errors
//! - CAP_xxx: Capability / region errors
//! - NET_xxx: Transport errors
//! - SVC_xxx: Service response errors

use std::fmt;

/// Application-wide error type; all probe failures flow through this
#[derive(Debug)]
pub struct ProbeError {
    /// Unique error code for console output and classification
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProbeError {
    /// Create a new ProbeError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create ProbeError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for console output)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// Classify into the closed taxonomy the sweep driver decides on
    pub fn class(&self) -> ErrorClass {
        self.code.class()
    }

    /// Remediation hint for the operator, when the code has one
    pub fn remediation(&self) -> Option<&'static str> {
        self.code.remediation()
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Closed outcome taxonomy. The sweep driver keys off this, never off
/// individual codes: Configuration and Authentication stop a run,
/// everything else is best-effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Configuration,
    Authentication,
    Capability,
    Transient,
    Unexpected,
}

impl ErrorClass {
    /// Nothing downstream of a failure in this class can work
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration | Self::Authentication)
    }
}

/// Unique error codes for console output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Configuration Errors
    // ============================================
    /// Required environment variable absent or empty
    ConfigMissingEnv,
    /// Required value still equals its documented placeholder
    ConfigPlaceholderValue,
    /// Value present but malformed (URL, connection string, ...)
    ConfigInvalidValue,
    /// A required local file (.env, sample.env) is missing
    ConfigMissingFile,

    // ============================================
    // Authentication Errors
    // ============================================
    /// No credential source in the chain produced a token
    AuthNoCredential,
    /// Service rejected the bearer token (HTTP 401)
    AuthTokenRejected,
    /// Identity authenticated but lacks permission (HTTP 403)
    AuthForbidden,

    // ============================================
    // Capability / Region Errors
    // ============================================
    /// Requested API surface does not exist at this endpoint (HTTP 404)
    CapabilityNotFound,
    /// Endpoint region is outside the capability allow-list
    CapabilityUnsupportedRegion,
    /// Request rejected as malformed, usually a wrong deployment name (HTTP 400)
    CapabilityBadRequest,

    // ============================================
    // Transport Errors
    // ============================================
    /// Request timeout
    NetTimeout,
    /// Connection failed (DNS, refused, TLS)
    NetConnectionFailed,

    // ============================================
    // Service Response Errors
    // ============================================
    /// Response body did not parse
    SvcInvalidResponse,
    /// Any other non-success HTTP status
    SvcError,
    /// Azure CLI not installed or not signed in
    SvcCliUnavailable,

    // ============================================
    // Generic
    // ============================================
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            // Configuration
            Self::ConfigMissingEnv => "CFG_MISSING_ENV",
            Self::ConfigPlaceholderValue => "CFG_PLACEHOLDER_VALUE",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
            Self::ConfigMissingFile => "CFG_MISSING_FILE",

            // Authentication
            Self::AuthNoCredential => "AUTH_NO_CREDENTIAL",
            Self::AuthTokenRejected => "AUTH_TOKEN_REJECTED",
            Self::AuthForbidden => "AUTH_FORBIDDEN",

            // Capability
            Self::CapabilityNotFound => "CAP_NOT_FOUND",
            Self::CapabilityUnsupportedRegion => "CAP_UNSUPPORTED_REGION",
            Self::CapabilityBadRequest => "CAP_BAD_REQUEST",

            // Transport
            Self::NetTimeout => "NET_TIMEOUT",
            Self::NetConnectionFailed => "NET_CONNECTION_FAILED",

            // Service
            Self::SvcInvalidResponse => "SVC_INVALID_RESPONSE",
            Self::SvcError => "SVC_ERROR",
            Self::SvcCliUnavailable => "SVC_CLI_UNAVAILABLE",

            // Generic
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Map to the closed taxonomy
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::ConfigMissingEnv
            | Self::ConfigPlaceholderValue
            | Self::ConfigInvalidValue
            | Self::ConfigMissingFile => ErrorClass::Configuration,

            Self::AuthNoCredential | Self::AuthTokenRejected | Self::AuthForbidden => {
                ErrorClass::Authentication
            }

            Self::CapabilityNotFound
            | Self::CapabilityUnsupportedRegion
            | Self::CapabilityBadRequest => ErrorClass::Capability,

            Self::NetTimeout | Self::NetConnectionFailed => ErrorClass::Transient,

            Self::SvcInvalidResponse | Self::SvcError | Self::SvcCliUnavailable | Self::Unknown => {
                ErrorClass::Unexpected
            }
        }
    }

    /// Remediation hint printed under the failure line.
    /// Capability and Authentication hints must stay distinct: they send the
    /// operator to different portals.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::ConfigMissingEnv | Self::ConfigPlaceholderValue => {
                Some("Edit .env with your actual service details and run again")
            }
            Self::AuthNoCredential => Some(
                "Sign in with 'az login', or set AZURE_TENANT_ID, AZURE_CLIENT_ID and AZURE_CLIENT_SECRET",
            ),
            Self::AuthTokenRejected | Self::AuthForbidden => {
                Some("Check the role assignment for this identity on the target resource")
            }
            Self::CapabilityNotFound | Self::CapabilityUnsupportedRegion => Some(
                "This API surface is not available at this endpoint. Use the Chat Completions API instead, or provision the service in a supported region",
            ),
            Self::CapabilityBadRequest => {
                Some("Check the model deployment name and that the deployment supports this API")
            }
            _ => None,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl ProbeError {
    /// Required environment variable is not set
    pub fn missing_env(key: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissingEnv,
            format!("{} is not set", key),
        )
    }

    /// Required value still has the placeholder from sample.env
    pub fn placeholder_value(key: &str) -> Self {
        Self::new(
            ErrorCode::ConfigPlaceholderValue,
            format!("{} still has the placeholder value", key),
        )
    }

    /// Value present but unusable
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }

    /// Local file required by the diagnostic is missing
    pub fn missing_file(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissingFile, msg)
    }

    /// Credential chain exhausted
    pub fn no_credential(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthNoCredential, msg)
    }

    /// HTTP 401
    pub fn token_rejected(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthTokenRejected, msg)
    }

    /// HTTP 403
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthForbidden, msg)
    }

    /// HTTP 404
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::CapabilityNotFound, msg)
    }

    /// Region outside the capability allow-list
    pub fn unsupported_region(region: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::CapabilityUnsupportedRegion,
            format!("region '{}' is not in the capability allow-list", region.into()),
        )
    }

    /// HTTP 400
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::CapabilityBadRequest, msg)
    }

    /// Response body failed to parse
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::SvcInvalidResponse, msg)
    }

    /// Azure CLI missing or not signed in
    pub fn cli_unavailable(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::SvcCliUnavailable, msg)
    }

    /// Classify a non-success HTTP status into the taxonomy.
    /// The body excerpt keeps the service's own words in the output.
    pub fn from_status(status: u16, body: &str) -> Self {
        let excerpt: String = body.chars().take(200).collect();
        match status {
            401 => Self::token_rejected(format!("HTTP 401: {}", excerpt)),
            403 => Self::forbidden(format!("HTTP 403: {}", excerpt)),
            404 => Self::not_found(format!("HTTP 404: {}", excerpt)),
            400 => Self::bad_request(format!("HTTP 400: {}", excerpt)),
            _ => Self::new(ErrorCode::SvcError, format!("HTTP {}: {}", status, excerpt)),
        }
    }
}

// ============================================
// Result type alias
// ============================================

/// Probe Result type
pub type ProbeResult<T> = Result<T, ProbeError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(ErrorCode::NetTimeout, "Request timeout")
        } else if err.is_connect() {
            Self::new(ErrorCode::NetConnectionFailed, format!("Connection failed: {}", err))
        } else {
            Self::new(ErrorCode::Unknown, err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::SvcInvalidResponse, "JSON parse error", err)
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::Unknown, "IO error", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = ProbeError::missing_env("SEARCH_ENDPOINT");
        assert_eq!(err.code, ErrorCode::ConfigMissingEnv);
        assert_eq!(err.code_str(), "CFG_MISSING_ENV");
        assert!(err.message.contains("SEARCH_ENDPOINT"));
    }

    #[test]
    fn test_classes() {
        assert_eq!(ProbeError::placeholder_value("K").class(), ErrorClass::Configuration);
        assert_eq!(ProbeError::no_credential("x").class(), ErrorClass::Authentication);
        assert_eq!(ProbeError::not_found("x").class(), ErrorClass::Capability);
        assert_eq!(ErrorCode::NetTimeout.class(), ErrorClass::Transient);
        assert_eq!(ErrorCode::Unknown.class(), ErrorClass::Unexpected);
    }

    #[test]
    fn test_fatal_classes() {
        assert!(ErrorClass::Configuration.is_fatal());
        assert!(ErrorClass::Authentication.is_fatal());
        assert!(!ErrorClass::Capability.is_fatal());
        assert!(!ErrorClass::Transient.is_fatal());
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(ProbeError::from_status(401, "").code, ErrorCode::AuthTokenRejected);
        assert_eq!(ProbeError::from_status(403, "").code, ErrorCode::AuthForbidden);
        assert_eq!(ProbeError::from_status(404, "").code, ErrorCode::CapabilityNotFound);
        assert_eq!(ProbeError::from_status(400, "").code, ErrorCode::CapabilityBadRequest);
        assert_eq!(ProbeError::from_status(503, "").code, ErrorCode::SvcError);
    }

    #[test]
    fn test_remediation_hints_distinct() {
        // Not-found and unauthorized must send the operator to different fixes
        let not_found = ProbeError::from_status(404, "").remediation().unwrap();
        let forbidden = ProbeError::from_status(403, "").remediation().unwrap();
        assert_ne!(not_found, forbidden);
        assert!(not_found.contains("region"));
        assert!(forbidden.contains("role assignment"));
    }
}
