//! Wall-run direction geometry

use glam::Vec3;
use wallrun_core::{flatten, rotate_about_up};

use super::mode::WallSide;

/// Pick the run side from the character's facing and compute the frozen
/// wall-run direction, leaning `angle_to_wall` degrees into the wall.
pub fn wall_run_direction(wall_right: Vec3, facing: Vec3, angle_to_wall: f32) -> (WallSide, Vec3) {
    let right = flatten(wall_right).normalize_or_zero();
    let (side, direction) = if right.dot(facing) > 0.0 {
        (WallSide::Right, rotate_about_up(right, angle_to_wall))
    } else {
        (WallSide::Left, rotate_about_up(-right, -angle_to_wall))
    };
    (side, flatten(direction).normalize_or_zero())
}

/// Direction of a jump off the wall: the wall-run direction turned away from
/// the wall by `angle_to_wall + jump_off_angle` degrees.
pub fn jump_off_direction(
    side: WallSide,
    wall_direction: Vec3,
    angle_to_wall: f32,
    jump_off_angle: f32,
) -> Vec3 {
    let turn = angle_to_wall + jump_off_angle;
    let direction = match side {
        WallSide::Right => rotate_about_up(wall_direction, -turn),
        WallSide::Left => rotate_about_up(wall_direction, turn),
    };
    flatten(direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallrun_core::angle_between_deg;

    #[test]
    fn test_side_follows_facing() {
        let (side, dir) = wall_run_direction(Vec3::X, Vec3::new(1.0, 0.0, -0.2), 30.0);
        assert_eq!(side, WallSide::Right);
        assert!((angle_between_deg(dir, Vec3::X) - 30.0).abs() < 1e-3);

        let (side, dir) = wall_run_direction(Vec3::X, Vec3::new(-1.0, 0.0, 0.0), 30.0);
        assert_eq!(side, WallSide::Left);
        assert!((angle_between_deg(dir, Vec3::NEG_X) - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_perpendicular_facing_picks_left() {
        let (side, _) = wall_run_direction(Vec3::X, Vec3::NEG_Z, 30.0);
        assert_eq!(side, WallSide::Left);
    }

    #[test]
    fn test_direction_is_horizontal_unit() {
        let (_, dir) = wall_run_direction(Vec3::new(2.0, 1.0, 0.0), Vec3::X, 30.0);
        assert_eq!(dir.y, 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_jump_off_turns_away_from_wall() {
        for side_right in [Vec3::X, Vec3::NEG_X] {
            let (side, dir) = wall_run_direction(side_right, Vec3::X, 30.0);
            let along = if side == WallSide::Right { side_right } else { -side_right };
            let jump = jump_off_direction(side, dir, 30.0, 20.0);

            // Ends up jump_off_angle past the wall line, on the opposite side
            assert!((angle_between_deg(jump, along) - 20.0).abs() < 1e-3);
            let lean_in = along.cross(dir).y.signum();
            let lean_out = along.cross(jump).y.signum();
            assert_eq!(lean_in, -lean_out);
        }
    }
}
