//! Per-tick keyboard-to-action pipeline.
//!
//! [`InputMapper`] owns the [`ControlState`] and a [`KeySource`]. Each call to
//! [`InputMapper::agent_actions`] samples at most one key, decays speed and
//! turning, applies the key, and projects the result for the agent.
//!
//! The caller drives the mapper once per simulation step and calls
//! [`InputMapper::reset`] between episodes.

use crate::{AgentKind, ConfigError, ControlState, KeyCommand, KeySource, MapperConfig};

/// Keyboard-driven action generator for a single agent.
#[derive(Debug)]
pub struct InputMapper<S> {
    /// Where keystrokes come from.
    source: S,
    /// Accumulated control values.
    state: ControlState,
    /// Topology resolved at construction.
    agent: AgentKind,
}

impl<S: KeySource> InputMapper<S> {
    /// Create a mapper with default step sizes and decay factors.
    pub fn new(agent: AgentKind, source: S) -> Self {
        Self { source, state: ControlState::default(), agent }
    }

    /// Create a mapper from an explicit configuration.
    pub fn with_config(
        agent: AgentKind,
        source: S,
        config: &MapperConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { source, state: ControlState::from_config(config), agent })
    }

    /// Create a mapper by agent name.
    pub fn for_agent(agent_type: &str, source: S) -> Self {
        Self::new(AgentKind::from_name(agent_type), source)
    }

    /// Take at most one pending key from the source without waiting.
    pub fn sample_key(&mut self) -> Result<Option<char>, S::Error> {
        self.source.poll_key()
    }

    /// Run one tick for the agent resolved at construction.
    pub fn agent_actions(&mut self) -> Result<Vec<f64>, S::Error> {
        let key = self.sample_key()?;
        Ok(self.step(key))
    }

    /// Run one tick, resolving `agent_type` on this call.
    ///
    /// The state update happens even when the agent is unsupported; only the
    /// projection is empty.
    pub fn get_agent_actions(&mut self, agent_type: &str) -> Result<Vec<f64>, S::Error> {
        let key = self.sample_key()?;
        self.update(key);
        Ok(AgentKind::from_name(agent_type).project(&self.state))
    }

    /// Run one tick with an already sampled key. Does not touch the source.
    pub fn step(&mut self, key: Option<char>) -> Vec<f64> {
        self.update(key);
        self.agent.project(&self.state)
    }

    /// Reinitialize motion and gripper pose for a new episode.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Current control state.
    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Agent resolved at construction.
    pub fn agent(&self) -> &AgentKind {
        &self.agent
    }

    /// Key source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable key source, e.g. to queue scripted keys.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn update(&mut self, key: Option<char>) {
        self.state.tick(key.and_then(KeyCommand::from_char));
    }
}
