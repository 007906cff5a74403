//! Recognized teleoperation keys.

/// A key with an effect on [`crate::ControlState`].
///
/// Keys are single, case-sensitive ASCII characters. Anything else is ignored
/// by the mapper and only the per-tick decay applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    /// `w`: drive forward, or stop if currently reversing.
    Forward,
    /// `s`: drive backward, or stop if currently moving forward.
    Backward,
    /// `a`: turn left, or stop turning if currently turning right.
    TurnLeft,
    /// `d`: turn right, or stop turning if currently turning left.
    TurnRight,
    /// `i`: move the gripper along -x.
    GripperXMinus,
    /// `k`: move the gripper along +x.
    GripperXPlus,
    /// `j`: move the gripper along -y.
    GripperYMinus,
    /// `l`: move the gripper along +y.
    GripperYPlus,
    /// `e`: open or close the gripper fingers.
    ToggleGripper,
    /// `+`: grow both step sizes.
    StepUp,
    /// `-`: shrink both step sizes.
    StepDown,
}

impl KeyCommand {
    /// All recognized commands.
    pub const ALL: [Self; 11] = [
        Self::Forward,
        Self::Backward,
        Self::TurnLeft,
        Self::TurnRight,
        Self::GripperXMinus,
        Self::GripperXPlus,
        Self::GripperYMinus,
        Self::GripperYPlus,
        Self::ToggleGripper,
        Self::StepUp,
        Self::StepDown,
    ];

    /// Parse a raw character. `None` if the key has no binding.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Self::Forward),
            's' => Some(Self::Backward),
            'a' => Some(Self::TurnLeft),
            'd' => Some(Self::TurnRight),
            'i' => Some(Self::GripperXMinus),
            'k' => Some(Self::GripperXPlus),
            'j' => Some(Self::GripperYMinus),
            'l' => Some(Self::GripperYPlus),
            'e' => Some(Self::ToggleGripper),
            '+' => Some(Self::StepUp),
            '-' => Some(Self::StepDown),
            _ => None,
        }
    }

    /// The character bound to this command.
    pub fn as_char(self) -> char {
        match self {
            Self::Forward => 'w',
            Self::Backward => 's',
            Self::TurnLeft => 'a',
            Self::TurnRight => 'd',
            Self::GripperXMinus => 'i',
            Self::GripperXPlus => 'k',
            Self::GripperYMinus => 'j',
            Self::GripperYPlus => 'l',
            Self::ToggleGripper => 'e',
            Self::StepUp => '+',
            Self::StepDown => '-',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_are_case_sensitive() {
        assert_eq!(KeyCommand::from_char('w'), Some(KeyCommand::Forward));
        assert_eq!(KeyCommand::from_char('W'), None);
        assert_eq!(KeyCommand::from_char('E'), None);
    }

    #[test]
    fn every_command_parses_from_its_char() {
        for cmd in KeyCommand::ALL {
            assert_eq!(KeyCommand::from_char(cmd.as_char()), Some(cmd));
        }
    }

    #[test]
    fn unbound_keys_are_ignored() {
        for c in ['q', ' ', '\n', '0', '=', '_', 'x'] {
            assert_eq!(KeyCommand::from_char(c), None);
        }
    }
}
