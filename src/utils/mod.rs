//! Utils Module - Shared Constants
//!
//! Single source of truth for scopes, versions, sentinels and region
//! tables used across the diagnostics.

pub mod constants;

pub use constants::*;
