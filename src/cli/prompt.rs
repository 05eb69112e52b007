//! Interactive input, optionally with echo suppressed
//!
//! Plain prompts read a line from stdin. Secret prompts read from
//! `/dev/tty` with echo and line buffering turned off, print `*` per
//! character, and restore the terminal through [`EchoGuard`] on every
//! exit path, including termination signals.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::fd::AsFd;

use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices, Termios};
use thiserror::Error;

use super::signals::TerminationSignals;

/// Prompt text
pub const PROMPT: &str = "input string: ";

/// Controlling terminal
const TTY_PATH: &str = "/dev/tty";

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;
const END_OF_TRANSMISSION: u8 = 0x04;

/// Longest secret accepted, in bytes; the buffer never grows past it
pub const MAX_SECRET_LEN: usize = 4096;

/// Prompt errors
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("failed to open /dev/tty: {0}")]
    Tty(#[source] io::Error),

    #[error("failed to configure terminal: {0}")]
    Terminal(#[from] nix::errno::Errno),

    #[error("failed to install signal handlers: {0}")]
    Signal(#[source] io::Error),

    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),

    #[error("failed to read input: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("no input was given")]
    Empty,

    #[error("interrupted")]
    Interrupted,
}

/// Input text, overwritten on drop when it came from a secret prompt
pub struct InputString {
    text: String,
    secret: bool,
}

impl InputString {
    /// Text that needs no wiping (e.g. from the command line)
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            secret: false,
        }
    }

    /// Text wiped from memory when dropped
    pub fn secret(text: String) -> Self {
        Self { text, secret: true }
    }

    /// Borrow the text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the text came from a secret prompt
    pub fn is_secret(&self) -> bool {
        self.secret
    }

    /// Number of characters
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

impl Drop for InputString {
    fn drop(&mut self) {
        if self.secret {
            wipe(std::mem::take(&mut self.text).into_bytes());
        }
    }
}

fn wipe(mut bytes: Vec<u8>) {
    bytes.fill(0);
    std::hint::black_box(&bytes);
}

/// Scoped terminal mode with echo and canonical input disabled.
///
/// The original settings are restored when the guard is dropped.
pub struct EchoGuard {
    tty: File,
    original: Termios,
}

impl EchoGuard {
    /// Turn off echo on the terminal
    pub fn suppress(tty: &File) -> Result<Self, PromptError> {
        let tty = tty.try_clone().map_err(PromptError::Tty)?;
        let original = termios::tcgetattr(tty.as_fd())?;

        let mut silent = original.clone();
        silent
            .local_flags
            .remove(LocalFlags::ECHO | LocalFlags::ICANON);
        silent.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        silent.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
        termios::tcsetattr(tty.as_fd(), SetArg::TCSANOW, &silent)?;

        Ok(Self { tty, original })
    }
}

impl Drop for EchoGuard {
    fn drop(&mut self) {
        let _ = termios::tcsetattr(self.tty.as_fd(), SetArg::TCSANOW, &self.original);
    }
}

/// Ask the user for the input string
pub async fn read_input(secret: bool) -> Result<InputString, PromptError> {
    let mut signals = TerminationSignals::new().map_err(PromptError::Signal)?;

    if secret {
        read_secret(&mut signals).await
    } else {
        read_plain(&mut signals).await
    }
}

async fn read_plain(signals: &mut TerminationSignals) -> Result<InputString, PromptError> {
    eprint!("{}", PROMPT);
    let _ = io::stderr().flush();

    let line = tokio::select! {
        res = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            io::stdin().read_line(&mut line).map(|_| line)
        }) => res?.map_err(PromptError::Read)?,
        _ = signals.recv() => return Err(PromptError::Interrupted),
    };

    let text = finish_line(line)?;
    Ok(InputString::plain(text))
}

async fn read_secret(signals: &mut TerminationSignals) -> Result<InputString, PromptError> {
    let mut tty = OpenOptions::new()
        .read(true)
        .write(true)
        .open(TTY_PATH)
        .map_err(PromptError::Tty)?;

    tty.write_all(PROMPT.as_bytes()).map_err(PromptError::Tty)?;
    tty.flush().map_err(PromptError::Tty)?;

    let guard = EchoGuard::suppress(&tty)?;
    let mut reader = tty.try_clone().map_err(PromptError::Tty)?;

    // The guard stays on this side so it is dropped whichever branch wins
    let result = tokio::select! {
        res = tokio::task::spawn_blocking(move || read_masked(&mut reader)) => {
            res.map_err(PromptError::from).and_then(|r| r)
        }
        _ = signals.recv() => Err(PromptError::Interrupted),
    };

    drop(guard);
    let _ = tty.write_all(b"\n");

    let text = result?;
    if text.is_empty() {
        return Err(PromptError::Empty);
    }
    Ok(InputString::secret(text))
}

/// Strip the line terminator; reject empty input
fn finish_line(mut line: String) -> Result<String, PromptError> {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }

    if line.is_empty() {
        return Err(PromptError::Empty);
    }
    Ok(line)
}

fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

/// Remove the last UTF-8 character; false if nothing was removed
fn pop_char(bytes: &mut Vec<u8>) -> bool {
    while let Some(byte) = bytes.pop() {
        if !is_continuation(byte) {
            return true;
        }
    }
    false
}

/// Read one line byte by byte, echoing `*` for each character.
///
/// Input lives in a single allocation of [`MAX_SECRET_LEN`] bytes so no
/// stale copy is left behind by reallocation; extra bytes are dropped.
fn read_masked<T: Read + Write>(tty: &mut T) -> Result<String, PromptError> {
    let mut bytes = Vec::with_capacity(MAX_SECRET_LEN);
    let mut buf = [0u8; 1];

    loop {
        let n = match tty.read(&mut buf) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                wipe(bytes);
                return Err(PromptError::Read(e));
            }
        };
        if n == 0 {
            break;
        }

        match buf[0] {
            b'\n' | b'\r' | END_OF_TRANSMISSION => break,
            DELETE | BACKSPACE => {
                if pop_char(&mut bytes) {
                    let _ = tty.write_all(b"\x08 \x08");
                }
            }
            _ if bytes.len() == MAX_SECRET_LEN => {}
            byte => {
                bytes.push(byte);
                if !is_continuation(byte) {
                    let _ = tty.write_all(b"*");
                }
            }
        }
        let _ = tty.flush();
    }

    String::from_utf8(bytes).map_err(|e| {
        wipe(e.into_bytes());
        PromptError::Read(io::Error::new(
            io::ErrorKind::InvalidData,
            "input is not valid UTF-8",
        ))
    })
}
