//! Terminal frontend for teleop-core
//!
//! Reads single keystrokes from the process terminal in raw mode and drives an
//! [`teleop_core::InputMapper`] at a fixed tick rate, standing in for the
//! simulation loop when recording or trying out keyboard control.
//!
//! This crate only handles terminal I/O and pacing. All key semantics live in
//! [`teleop_core`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod session;
pub mod terminal;

pub use session::{DemoSession, SessionConfig};
pub use terminal::{RawModeGuard, TerminalError, TerminalKeys};
