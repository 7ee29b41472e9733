//! # Application Layer
//!
//! Reply generation: keyword classification, LLM generation with retries,
//! the arbiter choosing between them, and the chat request boundary.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
