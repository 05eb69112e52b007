//! Domain layer - Core translation logic
//!
//! Contains the keymap, the batching translator, value objects and errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod keymap;
pub mod translation;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use translation::{BatchSize, DispatchGroup, DispatchGroups, TranslationConfig};
