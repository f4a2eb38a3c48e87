//! Shared data structures for the diagnostics
//!
//! Tokens, decoded claims, and console masking helpers used by every probe.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A bearer token acquired from the credential chain.
/// Never serialized and never cached across runs.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    /// Expiry when the source reports one
    pub expires_on: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_on: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.into(),
            expires_on,
        }
    }

    /// Safe-to-print form: first 40 characters only
    pub fn truncated(&self) -> String {
        let head: String = self.token.chars().take(40).collect();
        format!("{}... (truncated)", head)
    }
}

/// Identity claims decoded from a bearer token payload.
/// Decode only; signature verification belongs to the service, not to a
/// diagnostic.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    /// Object id of the principal
    pub oid: Option<String>,
    /// User principal name
    pub upn: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    /// Application id, set for service principals
    pub appid: Option<String>,
    /// Tenant id
    pub tid: Option<String>,
}

impl TokenClaims {
    /// Claims present on this token, as (claim, value) pairs in display order
    pub fn present(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        if let Some(v) = &self.oid {
            out.push(("oid", v.as_str()));
        }
        if let Some(v) = &self.upn {
            out.push(("upn", v.as_str()));
        }
        if let Some(v) = &self.email {
            out.push(("email", v.as_str()));
        }
        if let Some(v) = &self.name {
            out.push(("name", v.as_str()));
        }
        if let Some(v) = &self.appid {
            out.push(("appid", v.as_str()));
        }
        if let Some(v) = &self.tid {
            out.push(("tid", v.as_str()));
        }
        out
    }
}

/// Mask a secret for console output, keeping the last four characters
pub fn mask_secret(secret: &str) -> String {
    let n = secret.chars().count();
    if n <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(n - 4).collect();
    format!("{}{}", "*".repeat(n - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret_keeps_tail() {
        assert_eq!(mask_secret("abcdefgh1234"), "********1234");
        assert_eq!(mask_secret("abc"), "****");
    }

    #[test]
    fn test_token_truncation() {
        let token = AccessToken::new("x".repeat(120), None);
        let shown = token.truncated();
        assert!(shown.ends_with("... (truncated)"));
        assert!(shown.len() < 60);
    }

    #[test]
    fn test_claims_present_order() {
        let claims = TokenClaims {
            oid: Some("123".into()),
            tid: Some("456".into()),
            ..Default::default()
        };
        let present = claims.present();
        assert_eq!(present, vec![("oid", "123"), ("tid", "456")]);
    }
}
