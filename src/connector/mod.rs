//! # Connector Layer
//!
//! External integrations and entry points:
//! - Chat-completion provider (OpenAI-compatible HTTP API)
//! - Data files (majors registry, keyword rules)
//! - HTTP server and the terminal chat's backend client
//! - CLI controllers and dependency wiring

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
