//! # phrasal-core
//!
//! Foundation crate for phrase-level parallel alignment.
//! Defines the shared types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PhrasalConfig;
pub use errors::{PhrasalError, PhrasalResult};
pub use models::{AlignStrategy, PhraseRecord, RecoveryAction, RecoveryEvent, Span};
