//! Dispatch infrastructure module
//!
//! Delivers keycode batches through `virsh send-key`, or prints them
//! in dry-run mode.

mod dry_run;
mod factory;
mod virsh;

pub use dry_run::DryRunDispatcher;
pub use factory::{create_dispatcher, DispatchMode};
pub use virsh::VirshDispatcher;
