//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with virsh and the config file.

pub mod config;
pub mod dispatch;

// Re-export adapters
pub use config::XdgConfigStore;
pub use dispatch::{create_dispatcher, DispatchMode, DryRunDispatcher, VirshDispatcher};
