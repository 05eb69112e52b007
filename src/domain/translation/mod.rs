//! Batching translator

mod batch_size;
mod groups;

pub use batch_size::{BatchSize, MAX_BATCH_SIZE, MIN_BATCH_SIZE};
pub use groups::{DispatchGroup, DispatchGroups};

/// Settings for one translation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationConfig {
    /// Maximum characters per dispatch
    pub batch_size: BatchSize,
    /// Abort before sending if any character is unsupported
    pub strict: bool,
}

impl TranslationConfig {
    /// Create a lenient config with the given batch size
    pub fn new(batch_size: BatchSize) -> Self {
        Self {
            batch_size,
            strict: false,
        }
    }

    /// Builder: reject unsupported characters
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Group the input according to this config
    pub fn groups<'a>(&self, input: &'a str) -> DispatchGroups<'a> {
        DispatchGroups::new(input, self.batch_size)
    }
}
