//! Keyboard teleoperation demo.
//!
//! # Usage
//!
//! ```bash
//! # Drive a youbot at 50 Hz, resetting every 1000 ticks
//! teleop-demo --agent youbot_noplugin
//!
//! # Differential drive with finer steps, action vectors logged per tick
//! teleop-demo --agent turtlebot --wheel-step 0.2 --log-level debug
//! ```

use std::{
    io,
    num::{NonZeroU32, NonZeroU64},
};

use clap::Parser;
use teleop_core::MapperConfig;
use teleop_term::{DemoSession, SessionConfig, TerminalError, TerminalKeys};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Keyboard teleoperation for simulated robots
#[derive(Parser, Debug)]
#[command(name = "teleop-demo")]
#[command(about = "Drive a simulated robot from the keyboard and log its action vectors")]
#[command(version)]
struct Args {
    /// Simulator agent name (`turtlebot`, `pioneer2dx_noplugin`,
    /// `youbot_noplugin`, `pr2_noplugin`)
    #[arg(short, long, default_value = "youbot_noplugin")]
    agent: String,

    /// Control ticks per second
    #[arg(long, default_value = "50")]
    rate_hz: NonZeroU32,

    /// Ticks per episode before the control state is reset
    #[arg(long, default_value = "1000")]
    episode_steps: NonZeroU64,

    /// Stop after this many ticks (runs until Ctrl-C if omitted)
    #[arg(long)]
    max_steps: Option<u64>,

    /// Initial speed/turning increment
    #[arg(long)]
    wheel_step: Option<f64>,

    /// Initial gripper increment
    #[arg(long)]
    gripper_step: Option<f64>,

    /// Per-tick speed multiplier
    #[arg(long)]
    speed_decay: Option<f64>,

    /// Per-tick turning multiplier
    #[arg(long)]
    turning_decay: Option<f64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        let defaults = MapperConfig::default();
        SessionConfig {
            agent: self.agent.clone(),
            rate_hz: self.rate_hz,
            episode_steps: self.episode_steps,
            max_steps: self.max_steps,
            mapper: MapperConfig {
                wheel_step: self.wheel_step.unwrap_or(defaults.wheel_step),
                gripper_step: self.gripper_step.unwrap_or(defaults.gripper_step),
                speed_decay: self.speed_decay.unwrap_or(defaults.speed_decay),
                turning_decay: self.turning_decay.unwrap_or(defaults.turning_decay),
            },
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    let config = args.session_config();
    tracing::info!("Keyboard teleop starting for {}", config.agent);
    tracing::info!("WASD to move, IJKL for the arm, E toggles the gripper, +/- scale steps");

    let keys = TerminalKeys::new()?;
    let mut session = DemoSession::from_config(&config, keys)?;

    match session.run(config.max_steps, config.tick_period()) {
        Ok(_) | Err(TerminalError::Interrupted) => {},
        Err(e) => return Err(e.into()),
    }

    tracing::info!(
        steps = session.total_steps(),
        episodes = session.episodes(),
        "Keyboard teleop stopped"
    );
    Ok(())
}
