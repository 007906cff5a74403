//! Robot topologies and projection of control state into joint commands.
//!
//! The action vector layout is fixed per topology and consumed positionally by
//! the simulator, so element order here is part of the contract.

use std::fmt;

use crate::ControlState;

/// Fixed arm pose for the youbot, before gripper offsets are applied.
const YOUBOT_ARM_BASE: [f64; 6] = [0.0, 0.5, 0.3, -0.1, 0.2, 0.0];

/// Youbot finger joint command when open. Closed is the negation.
const YOUBOT_GRIPPER_OPEN: f64 = 0.5;

/// Kinematic topology of the controlled robot.
///
/// Resolved once from the simulator's agent name, then used every tick to lay
/// out the action vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentKind {
    /// Two-wheeled differential drive (`pioneer2dx_noplugin`, `turtlebot`).
    DiffDrive,
    /// Mobile manipulator with arm, gripper and four wheels.
    Youbot,
    /// Four-caster base with paired wheel joints.
    Pr2,
    /// Agent with no keyboard mapping. Projects to an empty vector.
    Unsupported(String),
}

impl AgentKind {
    /// Resolve an agent name.
    ///
    /// Unknown names resolve to [`AgentKind::Unsupported`] and emit a single
    /// informational event.
    pub fn from_name(name: &str) -> Self {
        match name {
            "pioneer2dx_noplugin" | "turtlebot" => Self::DiffDrive,
            "youbot" | "youbot_noplugin" => Self::Youbot,
            "pr2" | "pr2_noplugin" => Self::Pr2,
            other => {
                tracing::info!(agent_type = other, "agent type not supported yet: {other}");
                Self::Unsupported(other.to_owned())
            },
        }
    }

    /// Length of the action vector produced by [`AgentKind::project`].
    pub fn action_len(&self) -> usize {
        match self {
            Self::DiffDrive => 2,
            Self::Youbot => 13,
            Self::Pr2 => 8,
            Self::Unsupported(_) => 0,
        }
    }

    /// Whether a keyboard mapping exists for this agent.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Lay out `state` as this agent's action vector.
    pub fn project(&self, state: &ControlState) -> Vec<f64> {
        match self {
            Self::DiffDrive => diff_drive_action(state),
            Self::Youbot => youbot_action(state),
            Self::Pr2 => pr2_action(state),
            Self::Unsupported(_) => Vec::new(),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DiffDrive => write!(f, "diff-drive"),
            Self::Youbot => write!(f, "youbot"),
            Self::Pr2 => write!(f, "pr2"),
            Self::Unsupported(name) => write!(f, "unsupported ({name})"),
        }
    }
}

/// `[left, right]`.
fn diff_drive_action(state: &ControlState) -> Vec<f64> {
    vec![state.left_wheel(), state.right_wheel()]
}

/// Six arm joints, palm, two fingers, then wheels `bl, br, fl, fr`.
fn youbot_action(state: &ControlState) -> Vec<f64> {
    let [x, y, _] = state.gripper_offset;
    let gripper =
        if state.gripper_open { YOUBOT_GRIPPER_OPEN } else { -YOUBOT_GRIPPER_OPEN };
    let (left, right) = (state.left_wheel(), state.right_wheel());

    let mut arm = YOUBOT_ARM_BASE;
    arm[1] += y;
    arm[3] += x;

    let mut actions = Vec::with_capacity(13);
    actions.extend_from_slice(&arm);
    actions.push(0.0);
    actions.extend_from_slice(&[gripper, gripper]);
    actions.extend_from_slice(&[left, right, left, right]);
    actions
}

/// Each caster drives two joints: `fl, fl, fr, fr, bl, bl, br, br`.
fn pr2_action(state: &ControlState) -> Vec<f64> {
    let (left, right) = (state.left_wheel(), state.right_wheel());
    vec![left, left, right, right, left, left, right, right]
}
