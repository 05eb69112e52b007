//! Character to keycode translation
//!
//! Letters are handled by rule (`KEY_` + uppercase letter), everything else
//! goes through the static [`MISC_KEYS`] table.

mod table;

pub use table::{KeyEntry, MISC_KEYS};

use crate::domain::error::{UnmappableCharacter, UnsupportedCharacter};

/// Keycode held down for shifted groups
pub const SHIFT_KEYCODE: &str = "KEY_LEFTSHIFT";

/// Prefix for letter keycodes
const LETTER_PREFIX: &str = "KEY_";

/// Check whether a character has a keycode mapping.
pub fn is_supported(c: char) -> bool {
    c.is_ascii_alphabetic()
        || MISC_KEYS
            .iter()
            .any(|entry| entry.unshifted == c || entry.shifted == Some(c))
}

/// Check whether a character requires the shift modifier.
///
/// Unknown characters default to unshifted.
pub fn requires_shift(c: char) -> bool {
    if c.is_ascii_uppercase() {
        return true;
    }

    // Shifted column wins over unshifted for the whole table
    if MISC_KEYS.iter().any(|entry| entry.shifted == Some(c)) {
        return true;
    }

    false
}

/// Render a character as the keycode name understood by `send-key`.
///
/// # Arguments
/// * `c` - Character to format
/// * `shifted` - Shift state of the group the character is sent in
///
/// # Returns
/// The keycode name, or an error if no entry matches the pair
pub fn format_key(c: char, shifted: bool) -> Result<String, UnmappableCharacter> {
    if c.is_ascii_alphabetic() {
        return Ok(format!("{}{}", LETTER_PREFIX, c.to_ascii_uppercase()));
    }

    MISC_KEYS
        .iter()
        .find(|entry| {
            if shifted {
                entry.shifted == Some(c)
            } else {
                entry.unshifted == c
            }
        })
        .map(|entry| entry.keycode.to_string())
        .ok_or(UnmappableCharacter {
            character: c,
            shifted,
        })
}

/// List every unsupported character in the input, in order.
pub fn unsupported_chars(input: &str) -> Vec<UnsupportedCharacter> {
    input
        .chars()
        .enumerate()
        .filter(|(_, c)| !is_supported(*c))
        .map(|(offset, character)| UnsupportedCharacter { character, offset })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_supported() {
        for c in ('a'..='z').chain('A'..='Z') {
            assert!(is_supported(c), "{:?} should be supported", c);
        }
    }

    #[test]
    fn table_characters_are_supported() {
        for entry in MISC_KEYS.iter() {
            assert!(is_supported(entry.unshifted));
            if let Some(shifted) = entry.shifted {
                assert!(is_supported(shifted));
            }
        }
    }

    #[test]
    fn unknown_characters_are_not_supported() {
        assert!(!is_supported('é'));
        assert!(!is_supported('€'));
        assert!(!is_supported('\r'));
        assert!(!is_supported('\0'));
    }

    #[test]
    fn uppercase_requires_shift() {
        assert!(requires_shift('A'));
        assert!(requires_shift('Z'));
        assert!(!requires_shift('a'));
        assert!(!requires_shift('z'));
    }

    #[test]
    fn symbols_follow_table_columns() {
        assert!(requires_shift('!'));
        assert!(requires_shift('~'));
        assert!(requires_shift('"'));
        assert!(requires_shift('?'));
        assert!(!requires_shift('1'));
        assert!(!requires_shift('\''));
        assert!(!requires_shift('/'));
    }

    #[test]
    fn whitespace_is_unshifted() {
        assert!(!requires_shift(' '));
        assert!(!requires_shift('\n'));
        assert!(!requires_shift('\t'));
    }

    #[test]
    fn unknown_characters_default_to_unshifted() {
        assert!(!requires_shift('é'));
        assert!(!requires_shift('\0'));
    }

    #[test]
    fn format_letters() {
        assert_eq!(format_key('a', false).unwrap(), "KEY_A");
        assert_eq!(format_key('A', true).unwrap(), "KEY_A");
        assert_eq!(format_key('q', false).unwrap(), "KEY_Q");
    }

    #[test]
    fn format_table_characters() {
        assert_eq!(format_key('1', false).unwrap(), "KEY_1");
        assert_eq!(format_key('!', true).unwrap(), "KEY_1");
        assert_eq!(format_key(' ', false).unwrap(), "KEY_SPACE");
        assert_eq!(format_key('\n', false).unwrap(), "KEY_ENTER");
        assert_eq!(format_key('?', true).unwrap(), "KEY_SLASH");
        assert_eq!(format_key('>', true).unwrap(), "KEY_DOT");
    }

    #[test]
    fn format_rejects_wrong_shift_state() {
        let err = format_key('!', false).unwrap_err();
        assert_eq!(err.character, '!');
        assert!(!err.shifted);

        assert!(format_key('1', true).is_err());
        assert!(format_key(' ', true).is_err());
    }

    #[test]
    fn format_rejects_unknown_characters() {
        let err = format_key('é', false).unwrap_err();
        assert_eq!(
            err,
            UnmappableCharacter {
                character: 'é',
                shifted: false
            }
        );
    }

    #[test]
    fn unsupported_chars_reports_offsets() {
        let found = unsupported_chars("aé b€");
        assert_eq!(
            found,
            vec![
                UnsupportedCharacter {
                    character: 'é',
                    offset: 1
                },
                UnsupportedCharacter {
                    character: '€',
                    offset: 4
                },
            ]
        );
    }

    #[test]
    fn unsupported_chars_empty_for_plain_input() {
        assert!(unsupported_chars("Hello, World!\n").is_empty());
        assert!(unsupported_chars("").is_empty());
    }
}
