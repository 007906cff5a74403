//! Key sampling abstraction.
//!
//! The [`KeySource`] trait decouples the mapper from any specific input
//! device. The terminal frontend implements it on top of raw mode, while
//! [`ScriptedKeys`] replays a fixed sequence for deterministic tests.

use std::{collections::VecDeque, convert::Infallible};

/// Non-blocking source of single keystrokes.
///
/// # Invariants
///
/// Implementations MUST guarantee:
///
/// - `poll_key()` never waits for input; it returns `Ok(None)` when nothing
///   is pending.
/// - At most one character is consumed per call.
/// - Any device mode changed to read the key is restored before returning,
///   on success and on error.
pub trait KeySource {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Take at most one pending key.
    fn poll_key(&mut self) -> Result<Option<char>, Self::Error>;
}

/// Pre-recorded key sequence, one entry consumed per poll.
///
/// `None` entries stand for ticks where nothing was pressed. Once drained,
/// every poll returns `None`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    pending: VecDeque<Option<char>>,
}

impl ScriptedKeys {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script that presses each character of `keys` on consecutive ticks.
    pub fn from_keys(keys: &str) -> Self {
        keys.chars().map(Some).collect()
    }

    /// Queue a key for a future tick.
    pub fn push_key(&mut self, key: char) {
        self.pending.push_back(Some(key));
    }

    /// Queue a tick with no key pressed.
    pub fn push_idle(&mut self) {
        self.pending.push_back(None);
    }

    /// Number of scripted ticks not yet polled.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FromIterator<Option<char>> for ScriptedKeys {
    fn from_iter<I: IntoIterator<Item = Option<char>>>(iter: I) -> Self {
        Self { pending: iter.into_iter().collect() }
    }
}

impl KeySource for ScriptedKeys {
    type Error = Infallible;

    fn poll_key(&mut self) -> Result<Option<char>, Self::Error> {
        Ok(self.pending.pop_front().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_one_key_per_poll() {
        let mut keys = ScriptedKeys::from_keys("wd");
        assert_eq!(keys.poll_key(), Ok(Some('w')));
        assert_eq!(keys.remaining(), 1);
        assert_eq!(keys.poll_key(), Ok(Some('d')));
        assert_eq!(keys.poll_key(), Ok(None));
    }

    #[test]
    fn idle_ticks_yield_nothing() {
        let mut keys = ScriptedKeys::new();
        keys.push_idle();
        keys.push_key('e');

        assert_eq!(keys.poll_key(), Ok(None));
        assert_eq!(keys.poll_key(), Ok(Some('e')));
        assert_eq!(keys.remaining(), 0);
    }

    #[test]
    fn drained_script_stays_empty() {
        let mut keys = ScriptedKeys::new();
        for _ in 0..3 {
            assert_eq!(keys.poll_key(), Ok(None));
        }
    }
}
