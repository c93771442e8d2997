//! Animation state mapping
//!
//! Turns the movement signals into the integer state and playback speed an
//! animator consumes. Blending is the animator's business.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wallrun_core::error::ensure_positive;
use wallrun_core::ConfigError;

use crate::movement::{MovementSignals, WallSide};

/// Discrete animation state, with the integer codes the animator expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i32)]
pub enum AnimationState {
    #[default]
    Idle = 0,
    Running = 1,
    Jumping = 2,
    Falling = 3,
    WallRunningLeft = 4,
    WallRunningRight = 5,
}

impl AnimationState {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_wall_running(self) -> bool {
        matches!(self, Self::WallRunningLeft | Self::WallRunningRight)
    }
}

/// Playback speed tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Playback multiplier for the run cycle at max speed
    pub running_animation_speed: f32,
    /// Playback multiplier for the wall-run cycle at max speed
    pub wall_running_animation_speed: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            running_animation_speed: 1.0,
            wall_running_animation_speed: 1.0,
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("running_animation_speed", self.running_animation_speed)?;
        ensure_positive(
            "wall_running_animation_speed",
            self.wall_running_animation_speed,
        )?;
        Ok(())
    }
}

/// Pick the animation state. Wall-running wins over grounded, grounded over airborne.
pub fn map_state(signals: &MovementSignals) -> AnimationState {
    if let Some(side) = signals.wall_running {
        return match side {
            WallSide::Left => AnimationState::WallRunningLeft,
            WallSide::Right => AnimationState::WallRunningRight,
        };
    }

    if signals.grounded {
        if signals.horizontal_speed == 0.0 {
            AnimationState::Idle
        } else {
            AnimationState::Running
        }
    } else if signals.vertical_speed > 0.0 {
        AnimationState::Jumping
    } else {
        AnimationState::Falling
    }
}

/// Playback speed multiplier for a state
pub fn playback_speed(
    state: AnimationState,
    signals: &MovementSignals,
    config: &AnimationConfig,
) -> f32 {
    if signals.max_speed <= 0.0 {
        return 1.0;
    }
    match state {
        AnimationState::Running => {
            signals.speed / signals.max_speed * config.running_animation_speed
        }
        AnimationState::WallRunningLeft | AnimationState::WallRunningRight => {
            signals.wall_run_speed / signals.max_speed * config.wall_running_animation_speed
        }
        _ => 1.0,
    }
}

/// Animator capability
pub trait AnimatorSink {
    fn set_state(&mut self, code: i32);
    fn set_speed(&mut self, speed: f32);
    fn trigger(&mut self, name: &str);
}

/// Pushes the mapped state into an animator once per frame
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    config: AnimationConfig,
    state: AnimationState,
    speed: f32,
}

impl AnimationDriver {
    pub fn new(config: AnimationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: AnimationState::Idle,
            speed: 1.0,
        })
    }

    /// Map, then write state and speed to the animator
    pub fn update(&mut self, signals: &MovementSignals, sink: &mut dyn AnimatorSink) -> AnimationState {
        let state = map_state(signals);
        if state != self.state {
            debug!("Animation state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
        self.speed = playback_speed(state, signals, &self.config);

        sink.set_state(state.code());
        sink.set_speed(self.speed);
        state
    }

    pub fn trigger_victory(&self, sink: &mut dyn AnimatorSink) {
        sink.trigger("victory");
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingAnimator {
        state: Option<i32>,
        speed: Option<f32>,
        triggers: Vec<String>,
    }

    impl AnimatorSink for RecordingAnimator {
        fn set_state(&mut self, code: i32) {
            self.state = Some(code);
        }

        fn set_speed(&mut self, speed: f32) {
            self.speed = Some(speed);
        }

        fn trigger(&mut self, name: &str) {
            self.triggers.push(name.to_string());
        }
    }

    fn signals() -> MovementSignals {
        MovementSignals {
            max_speed: 20.0,
            speed: 10.0,
            wall_run_speed: 8.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_grounded_states() {
        let mut s = signals();
        s.grounded = true;
        assert_eq!(map_state(&s), AnimationState::Idle);
        s.horizontal_speed = 3.0;
        assert_eq!(map_state(&s), AnimationState::Running);
    }

    #[test]
    fn test_airborne_states() {
        let mut s = signals();
        s.vertical_speed = 2.0;
        assert_eq!(map_state(&s), AnimationState::Jumping);
        s.vertical_speed = 0.0;
        assert_eq!(map_state(&s), AnimationState::Falling);
        s.vertical_speed = -4.0;
        assert_eq!(map_state(&s), AnimationState::Falling);
    }

    #[test]
    fn test_wall_run_overrides_grounded() {
        let mut s = signals();
        s.grounded = true;
        s.horizontal_speed = 0.0;
        s.wall_running = Some(WallSide::Left);
        assert_eq!(map_state(&s), AnimationState::WallRunningLeft);

        s.horizontal_speed = 12.0;
        s.wall_running = Some(WallSide::Right);
        assert_eq!(map_state(&s), AnimationState::WallRunningRight);
    }

    #[test]
    fn test_state_codes() {
        assert_eq!(AnimationState::Idle.code(), 0);
        assert_eq!(AnimationState::Falling.code(), 3);
        assert_eq!(AnimationState::WallRunningRight.code(), 5);
    }

    #[test]
    fn test_playback_speed() {
        let config = AnimationConfig {
            running_animation_speed: 2.0,
            wall_running_animation_speed: 1.0,
        };
        let s = signals();
        assert_eq!(playback_speed(AnimationState::Running, &s, &config), 1.0);
        assert_eq!(
            playback_speed(AnimationState::WallRunningLeft, &s, &config),
            0.4
        );
        assert_eq!(playback_speed(AnimationState::Jumping, &s, &config), 1.0);
        assert_eq!(playback_speed(AnimationState::Idle, &s, &config), 1.0);
    }

    #[test]
    fn test_driver_writes_animator() {
        let mut driver = AnimationDriver::new(AnimationConfig::default()).unwrap();
        let mut animator = RecordingAnimator::default();

        let mut s = signals();
        s.grounded = true;
        s.horizontal_speed = 10.0;
        let state = driver.update(&s, &mut animator);
        assert_eq!(state, AnimationState::Running);
        assert_eq!(animator.state, Some(1));
        assert_eq!(animator.speed, Some(0.5));

        driver.trigger_victory(&mut animator);
        assert_eq!(animator.triggers, vec!["victory".to_string()]);
    }

    #[test]
    fn test_rejects_zero_speed_multiplier() {
        let config = AnimationConfig {
            running_animation_speed: 0.0,
            ..Default::default()
        };
        assert!(AnimationDriver::new(config).is_err());
    }
}
