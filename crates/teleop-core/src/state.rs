//! Control state accumulated from key presses.
//!
//! This is the only mutable state of the mapper. Every tick first decays the
//! continuous values and then applies at most one [`KeyCommand`]. The order is
//! load-bearing: a held key never settles at a steady value but oscillates
//! around a decayed equilibrium.

use crate::{KeyCommand, MapperConfig};

/// Magnitude beyond which a reverse key zeroes speed or turning instead of
/// stepping through zero.
pub const ZERO_THRESHOLD: f64 = 0.01;

/// Multiplier applied to both step sizes by `+`.
const STEP_GROWTH: f64 = 1.5;

/// Multiplier applied to both step sizes by `-`.
const STEP_SHRINK: f64 = 0.7;

/// Speed, turning, gripper pose and step sizes.
///
/// # Invariants
///
/// - `speed` and `turning` are multiplied by their decay every tick.
/// - Step sizes only change through [`KeyCommand::StepUp`] and
///   [`KeyCommand::StepDown`] and survive [`ControlState::reset`].
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    /// Forward speed. Positive is forward.
    pub speed: f64,
    /// Turning rate. Positive turns right.
    pub turning: f64,
    /// Gripper positional bias along x, y, z.
    pub gripper_offset: [f64; 3],
    /// Gripper fingers open.
    pub gripper_open: bool,
    /// Current increment for speed and turning.
    pub wheel_step: f64,
    /// Current increment for the gripper offset.
    pub gripper_step: f64,
    /// Per-tick speed multiplier.
    pub speed_decay: f64,
    /// Per-tick turning multiplier.
    pub turning_decay: f64,
}

impl Default for ControlState {
    fn default() -> Self {
        Self::from_config(&MapperConfig::default())
    }
}

impl ControlState {
    /// Initial state for the given configuration.
    pub fn from_config(config: &MapperConfig) -> Self {
        Self {
            speed: 0.0,
            turning: 0.0,
            gripper_offset: [0.0; 3],
            gripper_open: true,
            wheel_step: config.wheel_step,
            gripper_step: config.gripper_step,
            speed_decay: config.speed_decay,
            turning_decay: config.turning_decay,
        }
    }

    /// Advance one tick: decay, then apply `key` if present.
    pub fn tick(&mut self, key: Option<KeyCommand>) {
        self.decay();
        if let Some(key) = key {
            self.apply(key);
        }
    }

    /// Attenuate speed and turning toward zero.
    pub fn decay(&mut self) {
        self.speed *= self.speed_decay;
        self.turning *= self.turning_decay;
    }

    /// Apply a single key effect. Does not decay.
    pub fn apply(&mut self, key: KeyCommand) {
        match key {
            KeyCommand::Forward => {
                self.speed =
                    if self.speed < -ZERO_THRESHOLD { 0.0 } else { self.speed + self.wheel_step };
            },
            KeyCommand::Backward => {
                self.speed =
                    if self.speed > ZERO_THRESHOLD { 0.0 } else { self.speed - self.wheel_step };
            },
            KeyCommand::TurnLeft => {
                self.turning = if self.turning > ZERO_THRESHOLD {
                    0.0
                } else {
                    self.turning - self.wheel_step
                };
            },
            KeyCommand::TurnRight => {
                self.turning = if self.turning < -ZERO_THRESHOLD {
                    0.0
                } else {
                    self.turning + self.wheel_step
                };
            },
            KeyCommand::GripperXMinus => self.gripper_offset[0] -= self.gripper_step,
            KeyCommand::GripperXPlus => self.gripper_offset[0] += self.gripper_step,
            KeyCommand::GripperYMinus => self.gripper_offset[1] -= self.gripper_step,
            KeyCommand::GripperYPlus => self.gripper_offset[1] += self.gripper_step,
            KeyCommand::ToggleGripper => self.gripper_open = !self.gripper_open,
            KeyCommand::StepUp => {
                self.wheel_step *= STEP_GROWTH;
                self.gripper_step *= STEP_GROWTH;
            },
            KeyCommand::StepDown => {
                self.wheel_step *= STEP_SHRINK;
                self.gripper_step *= STEP_SHRINK;
            },
        }
    }

    /// Clear motion and gripper pose for a new episode.
    ///
    /// Step sizes and decay factors are kept.
    pub fn reset(&mut self) {
        self.gripper_offset = [0.0; 3];
        self.gripper_open = true;
        self.speed = 0.0;
        self.turning = 0.0;
    }

    /// Left wheel command for differential steering.
    pub fn left_wheel(&self) -> f64 {
        self.speed + self.turning
    }

    /// Right wheel command for differential steering.
    pub fn right_wheel(&self) -> f64 {
        self.speed - self.turning
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn forward_from_rest_adds_step() {
        let mut state = ControlState::default();
        state.tick(Some(KeyCommand::Forward));
        assert_eq!(state.speed, 0.5);
    }

    #[test]
    fn decay_runs_before_key() {
        let mut state = ControlState { speed: 1.0, ..Default::default() };
        state.tick(Some(KeyCommand::Forward));
        assert!(approx(state.speed, 0.9 + 0.5));
    }

    #[test]
    fn forward_while_reversing_stops() {
        let mut state = ControlState { speed: -0.5, ..Default::default() };
        state.tick(Some(KeyCommand::Forward));
        assert_eq!(state.speed, 0.0);
    }

    #[test]
    fn backward_while_moving_forward_stops() {
        let mut state = ControlState { speed: 0.3, ..Default::default() };
        state.tick(Some(KeyCommand::Backward));
        assert_eq!(state.speed, 0.0);
    }

    #[test]
    fn reverse_key_inside_threshold_steps_through_zero() {
        // The threshold is checked after decay: -0.005 becomes -0.0045, which
        // is inside it, so the step is added rather than zeroing the speed
        let mut state = ControlState { speed: -0.005, ..Default::default() };
        state.tick(Some(KeyCommand::Forward));
        assert!(approx(state.speed, -0.0045 + 0.5));
    }

    #[test]
    fn threshold_applies_to_decayed_value() {
        // 0.011 is past the threshold but decays to 0.0099 first
        let mut state = ControlState { speed: 0.011, ..Default::default() };
        state.tick(Some(KeyCommand::Backward));
        assert!(approx(state.speed, 0.0099 - 0.5));
    }

    #[test]
    fn turning_keys_mirror_speed_keys() {
        let mut state = ControlState::default();
        state.tick(Some(KeyCommand::TurnLeft));
        assert_eq!(state.turning, -0.5);

        // -0.25 after decay, right turn zeroes it
        state.tick(Some(KeyCommand::TurnRight));
        assert_eq!(state.turning, 0.0);

        state.tick(Some(KeyCommand::TurnRight));
        assert_eq!(state.turning, 0.5);

        state.tick(Some(KeyCommand::TurnLeft));
        assert_eq!(state.turning, 0.0);
    }

    #[test]
    fn gripper_keys_move_offset() {
        let mut state = ControlState::default();
        state.apply(KeyCommand::GripperXPlus);
        state.apply(KeyCommand::GripperXPlus);
        state.apply(KeyCommand::GripperXMinus);
        state.apply(KeyCommand::GripperYMinus);

        assert!(approx(state.gripper_offset[0], 0.02));
        assert!(approx(state.gripper_offset[1], -0.02));
        assert_eq!(state.gripper_offset[2], 0.0);

        state.apply(KeyCommand::GripperYPlus);
        assert!(approx(state.gripper_offset[1], 0.0));
    }

    #[test]
    fn toggle_flips_gripper() {
        let mut state = ControlState::default();
        assert!(state.gripper_open);
        state.apply(KeyCommand::ToggleGripper);
        assert!(!state.gripper_open);
        state.apply(KeyCommand::ToggleGripper);
        assert!(state.gripper_open);
    }

    #[test]
    fn step_keys_scale_both_steps() {
        let mut state = ControlState::default();
        state.apply(KeyCommand::StepUp);
        assert!(approx(state.wheel_step, 0.75));
        assert!(approx(state.gripper_step, 0.03));

        state.apply(KeyCommand::StepDown);
        assert!(approx(state.wheel_step, 0.75 * 0.7));
        assert!(approx(state.gripper_step, 0.03 * 0.7));
    }

    #[test]
    fn reset_keeps_steps_and_decays() {
        let config =
            MapperConfig { wheel_step: 0.2, gripper_step: 0.1, speed_decay: 0.8, turning_decay: 0.6 };
        let mut state = ControlState::from_config(&config);
        for key in [
            KeyCommand::Forward,
            KeyCommand::TurnRight,
            KeyCommand::GripperXPlus,
            KeyCommand::ToggleGripper,
            KeyCommand::StepUp,
        ] {
            state.apply(key);
        }

        state.reset();

        assert_eq!(state.speed, 0.0);
        assert_eq!(state.turning, 0.0);
        assert_eq!(state.gripper_offset, [0.0; 3]);
        assert!(state.gripper_open);
        assert!(approx(state.wheel_step, 0.3));
        assert!(approx(state.gripper_step, 0.15));
        assert_eq!(state.speed_decay, 0.8);
        assert_eq!(state.turning_decay, 0.6);
    }
}
