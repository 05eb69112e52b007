//! Key dispatch port interface

use async_trait::async_trait;
use thiserror::Error;

/// Dispatch errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("{0} not found. Please install libvirt client tools or set VIRSH.")]
    NotFound(String),

    #[error("Failed to run {program}: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("{program} exited with status: {status}")]
    Failed { program: String, status: String },
}

/// Port for sending keycodes to a target's virtual keyboard
#[async_trait]
pub trait KeyDispatcher: Send + Sync {
    /// Press the keycodes on the target in order.
    ///
    /// # Arguments
    /// * `target` - Domain name or id
    /// * `keycodes` - Keycode names, e.g. `KEY_A`
    /// * `shift` - Hold the shift modifier for the whole batch
    ///
    /// # Returns
    /// Ok(()) on success, error otherwise
    async fn dispatch_keys(
        &self,
        target: &str,
        keycodes: &[String],
        shift: bool,
    ) -> Result<(), DispatchError>;
}

#[async_trait]
impl<T: KeyDispatcher + ?Sized> KeyDispatcher for Box<T> {
    async fn dispatch_keys(
        &self,
        target: &str,
        keycodes: &[String],
        shift: bool,
    ) -> Result<(), DispatchError> {
        (**self).dispatch_keys(target, keycodes, shift).await
    }
}
