//! Providers Module - External Service Surfaces
//!
//! One small client per Azure surface the diagnostics talk to. Each call
//! is a single idempotent attempt; classification happens in the shared
//! error module, never here.

pub mod graph;
pub mod keyvault;
pub mod openai;
pub mod search;
pub mod storage;

pub use graph::*;
pub use keyvault::*;
pub use openai::*;
pub use search::*;
pub use storage::*;
