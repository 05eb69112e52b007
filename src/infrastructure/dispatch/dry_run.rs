//! Dry-run dispatch adapter

use async_trait::async_trait;

use crate::application::ports::{DispatchError, KeyDispatcher};
use crate::domain::config::DEFAULT_VIRSH_BIN;

use super::virsh::send_key_args;

/// Dispatch adapter that prints each command instead of running it
///
/// Used with `--dry-run` to inspect batching without a live domain.
#[derive(Debug, Clone)]
pub struct DryRunDispatcher {
    binary: String,
}

impl DryRunDispatcher {
    /// Create a new dry-run adapter printing the default binary name
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_VIRSH_BIN)
    }

    /// Create with the binary name to print
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Render the command line that would run
    pub fn format_command(&self, target: &str, keycodes: &[String], shift: bool) -> String {
        let mut line = self.binary.clone();
        for arg in send_key_args(target, keycodes, shift) {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }
}

impl Default for DryRunDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyDispatcher for DryRunDispatcher {
    async fn dispatch_keys(
        &self,
        target: &str,
        keycodes: &[String],
        shift: bool,
    ) -> Result<(), DispatchError> {
        println!("{}", self.format_command(target, keycodes, shift));
        Ok(())
    }
}
