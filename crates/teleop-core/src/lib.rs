//! Keyboard teleoperation core
//!
//! Pure state machine that turns single keystrokes into joint commands for
//! simulated robots, used to record human demonstrations. Key sampling sits
//! behind the [`KeySource`] trait so the same mapper runs against a real
//! terminal and against scripted input in tests.
//!
//! # Components
//!
//! - [`KeyCommand`]: recognized keys and their parsing
//! - [`ControlState`]: speed, turning, gripper pose and step sizes
//! - [`AgentKind`]: robot topology and the projection into an action vector
//! - [`MapperConfig`]: initial step sizes and decay factors
//! - [`KeySource`]: non-blocking key sampling seam
//! - [`InputMapper`]: sample -> update -> project pipeline, one call per tick

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod agent;
mod config;
mod key;
mod mapper;
mod source;
mod state;

pub use agent::AgentKind;
pub use config::{ConfigError, MapperConfig};
pub use key::KeyCommand;
pub use mapper::InputMapper;
pub use source::{KeySource, ScriptedKeys};
pub use state::{ControlState, ZERO_THRESHOLD};
