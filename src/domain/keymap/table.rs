//! Keycode table for non-letter characters (US layout)

/// One physical key and the characters it produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntry {
    /// Character produced without shift
    pub unshifted: char,
    /// Character produced with shift, `None` if the key has no shifted form
    pub shifted: Option<char>,
    /// Keycode name passed verbatim to `send-key`
    pub keycode: &'static str,
}

impl KeyEntry {
    const fn new(unshifted: char, shifted: Option<char>, keycode: &'static str) -> Self {
        Self {
            unshifted,
            shifted,
            keycode,
        }
    }
}

/// Non-letter keys. No character appears twice in either column.
pub static MISC_KEYS: [KeyEntry; 24] = [
    KeyEntry::new('`', Some('~'), "KEY_GRAVE"),
    KeyEntry::new('1', Some('!'), "KEY_1"),
    KeyEntry::new('2', Some('@'), "KEY_2"),
    KeyEntry::new('3', Some('#'), "KEY_3"),
    KeyEntry::new('4', Some('$'), "KEY_4"),
    KeyEntry::new('5', Some('%'), "KEY_5"),
    KeyEntry::new('6', Some('^'), "KEY_6"),
    KeyEntry::new('7', Some('&'), "KEY_7"),
    KeyEntry::new('8', Some('*'), "KEY_8"),
    KeyEntry::new('9', Some('('), "KEY_9"),
    KeyEntry::new('0', Some(')'), "KEY_0"),
    KeyEntry::new('-', Some('_'), "KEY_MINUS"),
    KeyEntry::new('=', Some('+'), "KEY_EQUAL"),
    KeyEntry::new('[', Some('{'), "KEY_LEFTBRACE"),
    KeyEntry::new(']', Some('}'), "KEY_RIGHTBRACE"),
    KeyEntry::new('\\', Some('|'), "KEY_BACKSLASH"),
    KeyEntry::new(';', Some(':'), "KEY_SEMICOLON"),
    KeyEntry::new('\'', Some('"'), "KEY_APOSTROPHE"),
    KeyEntry::new(',', Some('<'), "KEY_COMMA"),
    KeyEntry::new('.', Some('>'), "KEY_DOT"),
    KeyEntry::new('/', Some('?'), "KEY_SLASH"),
    KeyEntry::new(' ', None, "KEY_SPACE"),
    KeyEntry::new('\n', None, "KEY_ENTER"),
    KeyEntry::new('\t', None, "KEY_TAB"),
];
