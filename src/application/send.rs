//! Send string use case

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::error::{UnmappableCharacter, UnsupportedCharacter};
use crate::domain::keymap;
use crate::domain::translation::{DispatchGroup, TranslationConfig};

use super::ports::{DispatchError, KeyDispatcher};

/// Errors from the send use case
#[derive(Debug, Error)]
pub enum SendError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("no keycode for character at position {offset}")]
    Unmappable {
        offset: usize,
        #[source]
        source: UnmappableCharacter,
    },

    #[error("refusing to send: {0}")]
    Unsupported(UnsupportedCharacter),

    #[error("failed to send newline: {0}")]
    Newline(DispatchError),

    #[error("interrupted")]
    Interrupted,
}

/// A failed run, with how much of the input reached the target
#[derive(Debug, Error)]
#[error("{error}")]
pub struct SendFailure {
    /// Characters delivered before the failing group
    pub chars_sent: usize,
    #[source]
    pub error: SendError,
}

impl SendFailure {
    fn new(chars_sent: usize, error: SendError) -> Self {
        Self { chars_sent, error }
    }
}

/// Input parameters for the send use case
#[derive(Debug, Clone, Copy)]
pub struct SendInput<'a> {
    /// Domain receiving the keys
    pub target: &'a str,
    /// Text to type
    pub text: &'a str,
    /// Batching settings
    pub config: TranslationConfig,
    /// Press enter after the text
    pub send_newline: bool,
}

/// Output from the send use case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOutput {
    /// Characters of the text delivered (excluding the trailing newline)
    pub chars_sent: usize,
    /// External calls made for the text
    pub groups_sent: usize,
    /// Whether the trailing newline was delivered
    pub newline_sent: bool,
}

/// Callbacks for progress and status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct SendCallbacks {
    /// Called once per unsupported character before anything is sent
    pub on_unsupported: Option<Box<dyn Fn(&UnsupportedCharacter) + Send + Sync>>,
    /// Called after each delivered group with the cumulative character count
    pub on_group_sent: Option<Box<dyn Fn(usize) + Send + Sync>>,
}

/// Translate a string into keycode batches and dispatch them in order
pub struct SendStringUseCase<D>
where
    D: KeyDispatcher,
{
    dispatcher: D,
    stop_flag: Arc<AtomicBool>,
}

impl<D> SendStringUseCase<D>
where
    D: KeyDispatcher,
{
    /// Create a new use case instance
    pub fn new(dispatcher: D) -> Self {
        Self {
            dispatcher,
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share an existing stop flag (e.g. one set by a signal handler)
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = flag;
        self
    }

    /// Get the stop flag for external signal handling
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_flag)
    }

    /// Stop before the next group is dispatched
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    fn check_stop(&self, chars_sent: usize) -> Result<(), SendFailure> {
        if self.stop_flag.load(Ordering::SeqCst) {
            return Err(SendFailure::new(chars_sent, SendError::Interrupted));
        }
        Ok(())
    }

    /// Execute the send workflow
    pub async fn execute(
        &self,
        input: SendInput<'_>,
        callbacks: SendCallbacks,
    ) -> Result<SendOutput, SendFailure> {
        let unsupported = keymap::unsupported_chars(input.text);
        for found in &unsupported {
            debug!(offset = found.offset, "unsupported key");
            if let Some(ref cb) = callbacks.on_unsupported {
                cb(found);
            }
        }

        if input.config.strict {
            if let Some(first) = unsupported.first() {
                return Err(SendFailure::new(0, SendError::Unsupported(*first)));
            }
        }

        let mut chars_sent = 0;
        let mut groups_sent = 0;

        for group in input.config.groups(input.text) {
            self.check_stop(chars_sent)?;

            let keycodes =
                format_group(&group).map_err(|error| SendFailure::new(chars_sent, error))?;

            debug!(
                target_domain = input.target,
                offset = group.offset,
                keys = keycodes.len(),
                shifted = group.shifted,
                "dispatching group"
            );

            self.dispatcher
                .dispatch_keys(input.target, &keycodes, group.shifted)
                .await
                .map_err(|e| SendFailure::new(chars_sent, SendError::Dispatch(e)))?;

            chars_sent = group.end();
            groups_sent += 1;

            if let Some(ref cb) = callbacks.on_group_sent {
                cb(chars_sent);
            }
        }

        let newline_sent = if input.send_newline {
            self.check_stop(chars_sent)?;
            self.send_newline(input.target, chars_sent).await?;
            true
        } else {
            false
        };

        Ok(SendOutput {
            chars_sent,
            groups_sent,
            newline_sent,
        })
    }

    /// The trailing newline always forms its own group
    async fn send_newline(&self, target: &str, chars_sent: usize) -> Result<(), SendFailure> {
        let shifted = keymap::requires_shift('\n');
        let keycode = keymap::format_key('\n', shifted).map_err(|source| {
            SendFailure::new(
                chars_sent,
                SendError::Unmappable {
                    offset: chars_sent,
                    source,
                },
            )
        })?;

        debug!(target_domain = target, "dispatching newline");

        self.dispatcher
            .dispatch_keys(target, &[keycode], shifted)
            .await
            .map_err(|e| SendFailure::new(chars_sent, SendError::Newline(e)))
    }
}

/// Format every character of a group with the group's shift state
fn format_group(group: &DispatchGroup<'_>) -> Result<Vec<String>, SendError> {
    group
        .text
        .chars()
        .enumerate()
        .map(|(index, c)| {
            keymap::format_key(c, group.shifted).map_err(|source| SendError::Unmappable {
                offset: group.offset + index,
                source,
            })
        })
        .collect()
}
