//! Dispatch adapter factory

use std::fmt;

use crate::application::ports::KeyDispatcher;

use super::dry_run::DryRunDispatcher;
use super::virsh::VirshDispatcher;

/// How keycode batches leave the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Run the external program for every batch
    #[default]
    Virsh,
    /// Print the command lines only
    DryRun,
}

impl DispatchMode {
    /// Pick the mode from the `--dry-run` flag
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            DispatchMode::DryRun
        } else {
            DispatchMode::Virsh
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchMode::Virsh => write!(f, "virsh"),
            DispatchMode::DryRun => write!(f, "dry-run"),
        }
    }
}

/// Create a dispatch adapter for the mode and binary
pub fn create_dispatcher(mode: DispatchMode, binary: &str) -> Box<dyn KeyDispatcher> {
    match mode {
        DispatchMode::Virsh => Box::new(VirshDispatcher::with_binary(binary)),
        DispatchMode::DryRun => Box::new(DryRunDispatcher::with_binary(binary)),
    }
}
