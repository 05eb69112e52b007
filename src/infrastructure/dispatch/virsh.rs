//! Virsh dispatch adapter for libvirt domains

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{DispatchError, KeyDispatcher};
use crate::domain::config::DEFAULT_VIRSH_BIN;
use crate::domain::keymap::SHIFT_KEYCODE;

/// Virsh subcommand pressing keys on a domain's keyboard
const SEND_KEY: &str = "send-key";

/// Virsh dispatch adapter
///
/// Runs `virsh send-key <domain> [KEY_LEFTSHIFT] <keycodes...>` once per
/// batch. Virsh's stdout is discarded; its stderr is left attached so
/// libvirt errors stay visible.
#[derive(Debug, Clone)]
pub struct VirshDispatcher {
    binary: String,
}

impl VirshDispatcher {
    /// Create a new virsh adapter using the default binary
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_VIRSH_BIN)
    }

    /// Create with a custom binary name or path
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Get the binary this adapter runs
    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for VirshDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Arguments after the program name
pub(crate) fn send_key_args(target: &str, keycodes: &[String], shift: bool) -> Vec<String> {
    let mut args = Vec::with_capacity(keycodes.len() + 3);
    args.push(SEND_KEY.to_string());
    args.push(target.to_string());
    if shift {
        args.push(SHIFT_KEYCODE.to_string());
    }
    args.extend(keycodes.iter().cloned());
    args
}

#[async_trait]
impl KeyDispatcher for VirshDispatcher {
    async fn dispatch_keys(
        &self,
        target: &str,
        keycodes: &[String],
        shift: bool,
    ) -> Result<(), DispatchError> {
        let args = send_key_args(target, keycodes, shift);
        debug!(program = %self.binary, args = args.len(), "running send-key");

        let status = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DispatchError::NotFound(self.binary.clone())
                } else {
                    DispatchError::SpawnFailed {
                        program: self.binary.clone(),
                        message: e.to_string(),
                    }
                }
            })?;

        if !status.success() {
            return Err(DispatchError::Failed {
                program: self.binary.clone(),
                status: status.to_string(),
            });
        }

        Ok(())
    }
}
