//! Demonstration session.
//!
//! Drives an [`InputMapper`] once per tick the way a simulation loop would,
//! issuing a reset at every episode boundary and logging throughput per
//! episode. Generic over [`KeySource`] so scripted input exercises the same
//! loop as the terminal.

use std::{
    num::{NonZeroU32, NonZeroU64},
    time::{Duration, Instant},
};

use teleop_core::{AgentKind, ConfigError, InputMapper, KeySource, MapperConfig};

/// Default tick rate.
pub const DEFAULT_RATE_HZ: NonZeroU32 = match NonZeroU32::new(50) {
    Some(rate) => rate,
    None => unreachable!(),
};

/// Default episode length in ticks.
pub const DEFAULT_EPISODE_STEPS: NonZeroU64 = match NonZeroU64::new(1000) {
    Some(steps) => steps,
    None => unreachable!(),
};

/// Session parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Simulator agent name.
    pub agent: String,
    /// Ticks per second.
    pub rate_hz: NonZeroU32,
    /// Ticks per episode before the control state is reset.
    pub episode_steps: NonZeroU64,
    /// Stop after this many ticks. `None` runs until interrupted.
    pub max_steps: Option<u64>,
    /// Initial step sizes and decay factors.
    pub mapper: MapperConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            agent: "youbot_noplugin".to_owned(),
            rate_hz: DEFAULT_RATE_HZ,
            episode_steps: DEFAULT_EPISODE_STEPS,
            max_steps: None,
            mapper: MapperConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Wall-clock time budget for one tick.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.rate_hz.get()
    }
}

/// Episode bookkeeping around a mapper.
#[derive(Debug)]
pub struct DemoSession<S> {
    mapper: InputMapper<S>,
    episode_steps: NonZeroU64,
    /// Ticks since the last reset.
    episode_step: u64,
    /// Completed episodes.
    episodes: u64,
    /// Ticks since the session started.
    total_steps: u64,
    episode_started: Instant,
}

impl<S: KeySource> DemoSession<S> {
    /// Wrap a mapper.
    pub fn new(mapper: InputMapper<S>, episode_steps: NonZeroU64) -> Self {
        Self {
            mapper,
            episode_steps,
            episode_step: 0,
            episodes: 0,
            total_steps: 0,
            episode_started: Instant::now(),
        }
    }

    /// Build a mapper for `config.agent` on top of `source`.
    pub fn from_config(config: &SessionConfig, source: S) -> Result<Self, ConfigError> {
        let agent = AgentKind::from_name(&config.agent);
        let mapper = InputMapper::with_config(agent, source, &config.mapper)?;
        Ok(Self::new(mapper, config.episode_steps))
    }

    /// Run one tick and return the agent's action vector.
    ///
    /// The reset for an episode boundary happens after the tick that
    /// completes the episode, so the returned actions still belong to it.
    pub fn tick(&mut self) -> Result<Vec<f64>, S::Error> {
        let actions = self.mapper.agent_actions()?;
        self.total_steps += 1;
        self.episode_step += 1;
        tracing::debug!(step = self.total_steps, ?actions, "agent actions");

        if self.episode_step >= self.episode_steps.get() {
            self.finish_episode();
        }
        Ok(actions)
    }

    /// Run until `max_steps` ticks have been issued, pacing ticks to `period`.
    ///
    /// Returns the number of ticks run.
    pub fn run(&mut self, max_steps: Option<u64>, period: Duration) -> Result<u64, S::Error> {
        let mut ran = 0;
        while max_steps.is_none_or(|max| ran < max) {
            let started = Instant::now();
            self.tick()?;
            ran += 1;

            if let Some(remaining) = period.checked_sub(started.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
        Ok(ran)
    }

    fn finish_episode(&mut self) {
        let elapsed = self.episode_started.elapsed().as_secs_f64();
        let steps_per_sec = if elapsed > 0.0 { self.episode_step as f64 / elapsed } else { 0.0 };
        tracing::info!(
            episode = self.episodes,
            steps = self.episode_step,
            "step per second: {steps_per_sec:.1}"
        );

        self.mapper.reset();
        tracing::debug!(agent = %self.mapper.agent(), "control state reset");
        self.episodes += 1;
        self.episode_step = 0;
        self.episode_started = Instant::now();
    }

    /// Completed episodes.
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    /// Ticks since the session started.
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Underlying mapper.
    pub fn mapper(&self) -> &InputMapper<S> {
        &self.mapper
    }

    /// Mutable underlying mapper.
    pub fn mapper_mut(&mut self) -> &mut InputMapper<S> {
        &mut self.mapper
    }
}
