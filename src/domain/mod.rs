//! # Domain Layer
//!
//! Rule tables, the majors registry, configuration values and chat envelopes.
//! This layer is independent of HTTP and provider details.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
