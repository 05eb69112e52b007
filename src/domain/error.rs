//! Domain error types

use thiserror::Error;

/// Error when parsing a speed (maximum batch size) value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid speed value \"{input}\", must be 1-15")]
pub struct BatchSizeError {
    pub input: String,
}

/// A character with no known keycode mapping.
///
/// Advisory by default: the character is still sent with its best-effort
/// classification. The message names only the position so secret input
/// never ends up in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported key at position {offset}")]
pub struct UnsupportedCharacter {
    pub character: char,
    /// Character (not byte) offset into the input
    pub offset: usize,
}

/// No table entry matches the (character, shift state) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no keycode for character (shifted: {shifted})")]
pub struct UnmappableCharacter {
    pub character: char,
    pub shifted: bool,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },
}
