//! Terminal key source.
//!
//! Implements [`KeySource`] on top of crossterm. Raw mode is held only for the
//! duration of a single poll, so log output and the shell behave normally
//! between ticks.

use std::{io, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, is_raw_mode_enabled},
    tty::IsTty,
};
use teleop_core::KeySource;
use thiserror::Error;

/// Terminal key source errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Standard input is not an interactive terminal.
    #[error("stdin is not a terminal")]
    NotATerminal,

    /// Ctrl-C was read while the terminal was in raw mode.
    #[error("interrupted")]
    Interrupted,
}

/// Scoped raw mode.
///
/// Enables raw mode on acquisition unless it is already enabled, and restores
/// the previous mode when dropped, including on early return and unwinding.
#[derive(Debug)]
pub struct RawModeGuard {
    /// Raw mode was enabled by this guard and must be disabled on drop.
    restore: bool,
}

impl RawModeGuard {
    /// Enter raw mode.
    pub fn acquire() -> Result<Self, TerminalError> {
        if is_raw_mode_enabled()? {
            return Ok(Self { restore: false });
        }
        enable_raw_mode()?;
        Ok(Self { restore: true })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.restore
            && let Err(e) = disable_raw_mode()
        {
            tracing::warn!("Failed to restore terminal mode: {e}");
        }
    }
}

/// Non-blocking single-key reader for the process terminal.
#[derive(Debug)]
pub struct TerminalKeys {
    _private: (),
}

impl TerminalKeys {
    /// Create a key source on the process terminal.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::NotATerminal`] if stdin is redirected.
    pub fn new() -> Result<Self, TerminalError> {
        if !io::stdin().is_tty() {
            return Err(TerminalError::NotATerminal);
        }
        Ok(Self { _private: () })
    }

    /// Convert a crossterm event to a key.
    ///
    /// Only key presses carrying a character count. Ctrl-C is reported as
    /// [`TerminalError::Interrupted`] since raw mode suppresses the signal.
    fn convert_event(event: &Event) -> Result<Option<char>, TerminalError> {
        match event {
            Event::Key(KeyEvent {
                code: KeyCode::Char(c),
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if modifiers.contains(KeyModifiers::CONTROL) && matches!(*c, 'c' | 'C') {
                    Err(TerminalError::Interrupted)
                } else {
                    Ok(Some(*c))
                }
            },
            _ => Ok(None),
        }
    }
}

impl KeySource for TerminalKeys {
    type Error = TerminalError;

    fn poll_key(&mut self) -> Result<Option<char>, Self::Error> {
        let _raw = RawModeGuard::acquire()?;
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        Self::convert_event(&event::read()?)
    }
}
