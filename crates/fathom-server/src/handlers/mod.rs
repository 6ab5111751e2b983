//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod engine;
pub mod meta;

// Re-export all handlers for use in router
pub use engine::*;
pub use meta::*;
