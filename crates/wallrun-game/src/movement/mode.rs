//! Locomotion modes

use serde::{Deserialize, Serialize};

/// Which way along the wall the character runs.
///
/// `Right` means travelling along the wall volume's right axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallSide {
    Left,
    Right,
}

/// The character's mutually exclusive locomotion state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Grounded,
    Airborne,
    WallRunning(WallSide),
}

impl Mode {
    pub fn is_grounded(&self) -> bool {
        matches!(self, Mode::Grounded)
    }

    pub fn is_airborne(&self) -> bool {
        matches!(self, Mode::Airborne)
    }

    pub fn is_wall_running(&self) -> bool {
        matches!(self, Mode::WallRunning(_))
    }

    /// Side of the active wall-run, if any
    pub fn wall_side(&self) -> Option<WallSide> {
        match self {
            Mode::WallRunning(side) => Some(*side),
            _ => None,
        }
    }

    /// Jumping is only possible with something underfoot or beside you
    pub fn can_jump(&self) -> bool {
        !self.is_airborne()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_grounded() {
        assert_eq!(Mode::default(), Mode::Grounded);
    }

    #[test]
    fn test_exactly_one_flag() {
        for mode in [
            Mode::Grounded,
            Mode::Airborne,
            Mode::WallRunning(WallSide::Left),
            Mode::WallRunning(WallSide::Right),
        ] {
            let flags = [mode.is_grounded(), mode.is_airborne(), mode.is_wall_running()];
            assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{mode:?}");
        }
    }

    #[test]
    fn test_can_jump() {
        assert!(Mode::Grounded.can_jump());
        assert!(Mode::WallRunning(WallSide::Right).can_jump());
        assert!(!Mode::Airborne.can_jump());
    }
}
