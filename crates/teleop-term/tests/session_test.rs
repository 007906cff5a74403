//! Session tests with scripted key input.
//!
//! Exercises the same episode loop the terminal binary runs, with keys
//! replayed from a script instead of read from a terminal.

#![allow(clippy::float_cmp)]

use std::{
    num::{NonZeroU32, NonZeroU64},
    time::Duration,
};

use teleop_core::{AgentKind, ConfigError, InputMapper, MapperConfig, ScriptedKeys};
use teleop_term::{DemoSession, SessionConfig};

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-12, "{actual:?} vs {expected:?}");
    }
}

fn episode(steps: u64) -> NonZeroU64 {
    NonZeroU64::new(steps).unwrap_or(NonZeroU64::MIN)
}

#[test]
fn resets_at_episode_boundary() {
    let mapper = InputMapper::new(AgentKind::DiffDrive, ScriptedKeys::from_keys("wwe"));
    let mut session = DemoSession::new(mapper, episode(3));

    let Ok(_) = session.tick();
    let Ok(second) = session.tick();
    assert_close(&second, &[0.95, 0.95]);
    assert_eq!(session.episodes(), 0);

    // The boundary tick still reports the pre-reset state
    let Ok(third) = session.tick();
    assert_close(&third, &[0.855, 0.855]);
    assert_eq!(session.episodes(), 1);

    let state = session.mapper().state();
    assert_eq!(state.speed, 0.0);
    assert!(state.gripper_open);
}

#[test]
fn step_sizes_carry_across_episodes() {
    let mapper = InputMapper::new(AgentKind::Pr2, ScriptedKeys::from_keys("+"));
    let mut session = DemoSession::new(mapper, episode(1));

    let Ok(_) = session.tick();
    assert_eq!(session.episodes(), 1);
    assert_eq!(session.mapper().state().wheel_step, 0.75);

    session.mapper_mut().source_mut().push_key('w');
    let Ok(actions) = session.tick();
    assert_eq!(actions, vec![0.75; 8]);
}

#[test]
fn run_stops_at_max_steps() {
    let mapper = InputMapper::new(AgentKind::Youbot, ScriptedKeys::from_keys("wasd"));
    let mut session = DemoSession::new(mapper, episode(4));

    let Ok(ran) = session.run(Some(10), Duration::ZERO);
    assert_eq!(ran, 10);
    assert_eq!(session.total_steps(), 10);
    assert_eq!(session.episodes(), 2);
}

#[test]
fn from_config_resolves_agent() -> Result<(), ConfigError> {
    let config = SessionConfig { agent: "turtlebot".into(), ..Default::default() };
    let session = DemoSession::from_config(&config, ScriptedKeys::new())?;
    assert_eq!(session.mapper().agent(), &AgentKind::DiffDrive);
    Ok(())
}

#[test]
fn from_config_rejects_invalid_mapper() {
    let config = SessionConfig {
        mapper: MapperConfig { wheel_step: -1.0, ..Default::default() },
        ..Default::default()
    };
    let result = DemoSession::from_config(&config, ScriptedKeys::new());
    assert!(matches!(result, Err(ConfigError::InvalidStep { field: "wheel_step", .. })));
}

#[test]
fn tick_period_follows_rate() {
    let config = SessionConfig {
        rate_hz: NonZeroU32::new(20).unwrap_or(NonZeroU32::MIN),
        ..Default::default()
    };
    assert_eq!(config.tick_period(), Duration::from_millis(50));
    assert_eq!(SessionConfig::default().tick_period(), Duration::from_millis(20));
}
