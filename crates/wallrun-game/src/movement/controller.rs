//! Movement state machine
//!
//! One call to [`MovementController::tick`] per physics step. Horizontal
//! motion is kinematic (direction x speed x dt); only the vertical velocity
//! is integrated.

use glam::Vec3;
use tracing::debug;
use wallrun_core::{camera_relative, flatten, ConfigError};
use wallrun_physics::{CharacterBody, SurfaceInfo};

use crate::input::InputSample;

use super::config::MovementConfig;
use super::mode::{Mode, WallSide};
use super::ramp::SpeedRamp;
use super::rotation::face_towards;
use super::sensors::{GroundSensor, WallSensor};
use super::wall::{jump_off_direction, wall_run_direction};

/// Read-only snapshot published for animation and other observers
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementSignals {
    /// Horizontal speed commanded this tick (m/s)
    pub horizontal_speed: f32,
    /// Vertical velocity (m/s, up is positive)
    pub vertical_speed: f32,
    pub grounded: bool,
    /// Side of the active wall-run, `None` when not wall-running
    pub wall_running: Option<WallSide>,
    /// Current ground ramp speed
    pub speed: f32,
    /// Current wall-run speed
    pub wall_run_speed: f32,
    pub max_speed: f32,
}

/// What happened during one tick
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    /// Mode before the tick
    pub previous_mode: Mode,
    /// Mode after the tick
    pub mode: Mode,
    /// Whether a jump was performed
    pub jumped: bool,
    /// Horizontal displacement requested from the body
    pub horizontal: Vec3,
    /// Surfaces touched by this tick's moves
    pub collisions: Vec<SurfaceInfo>,
}

impl TickReport {
    pub fn mode_changed(&self) -> bool {
        self.previous_mode != self.mode
    }
}

/// Owns every piece of locomotion state for one character
#[derive(Debug, Clone)]
pub struct MovementController {
    config: MovementConfig,
    mode: Mode,

    ground_ramp: SpeedRamp,
    air_ramp: SpeedRamp,
    wall_ramp: SpeedRamp,

    /// Only `y` is integrated; `x`/`z` mirror the last commanded horizontal velocity
    velocity: Vec3,
    facing: Vec3,

    /// Camera-relative intent in world space
    move_direction: Vec3,
    /// `move_direction` scaled for air control
    air_direction: Vec3,
    /// Inherited trajectory plus accumulated air control
    total_air: Vec3,
    /// Speed inherited when the air trajectory was captured
    total_air_speed: f32,

    wall_direction: Vec3,
    /// Wall sensor entry count already acted on
    consumed_wall_entries: u64,

    jumping: bool,
}

impl MovementController {
    /// Create a controller, rejecting invalid tuning
    pub fn new(config: MovementConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            ground_ramp: SpeedRamp::accelerating(config.min_speed, config.max_speed, config.acceleration),
            air_ramp: SpeedRamp::accelerating(
                config.min_air_movement_speed,
                config.max_air_movement_speed,
                config.air_acceleration,
            ),
            wall_ramp: SpeedRamp::decelerating(config.min_wall_run_speed, config.wall_run_deceleration),
            config,
            mode: Mode::Grounded,
            velocity: Vec3::ZERO,
            facing: Vec3::NEG_Z,
            move_direction: Vec3::ZERO,
            air_direction: Vec3::ZERO,
            total_air: Vec3::ZERO,
            total_air_speed: 0.0,
            wall_direction: Vec3::ZERO,
            consumed_wall_entries: 0,
            jumping: false,
        })
    }

    /// Return to spawn defaults
    pub fn reset(&mut self) {
        self.ground_ramp.reset();
        self.air_ramp.reset();
        self.wall_ramp.reset();
        self.mode = Mode::Grounded;
        self.velocity = Vec3::ZERO;
        self.move_direction = Vec3::ZERO;
        self.air_direction = Vec3::ZERO;
        self.total_air = Vec3::ZERO;
        self.total_air_speed = 0.0;
        self.wall_direction = Vec3::ZERO;
        self.jumping = false;
    }

    /// Advance the state machine by one physics step
    pub fn tick(
        &mut self,
        input: InputSample,
        camera_yaw: f32,
        body: &mut dyn CharacterBody,
        ground: &GroundSensor,
        wall: &WallSensor,
        dt: f32,
    ) -> TickReport {
        let dt = dt.max(0.0);
        let mut report = TickReport {
            previous_mode: self.mode,
            ..Default::default()
        };

        self.move_direction = camera_relative(input.intent, camera_yaw);
        self.air_direction = self.move_direction * self.config.air_movement_factor;
        if input.stopped {
            self.stop_moving();
        }

        self.sample_wall(wall);

        let horizontal = self.horizontal_displacement(dt);
        if horizontal != Vec3::ZERO {
            let outcome = body.move_by(horizontal, dt);
            report.collisions.extend(outcome.collisions);
        }
        report.horizontal = horizontal;
        let horizontal_velocity = if dt > 0.0 { horizontal / dt } else { Vec3::ZERO };
        self.velocity.x = horizontal_velocity.x;
        self.velocity.z = horizontal_velocity.z;

        let target = if self.mode.is_wall_running() {
            self.wall_direction
        } else {
            self.move_direction
        };
        self.facing = face_towards(
            self.facing,
            target,
            self.config.rotation_speed,
            self.config.snap_angle,
            dt,
        );

        if input.jump {
            report.jumped = self.jump();
        }

        self.apply_gravity(dt);
        let vertical = Vec3::Y * self.velocity.y * dt;
        if vertical != Vec3::ZERO {
            let outcome = body.move_by(vertical, dt);
            report.collisions.extend(outcome.collisions);
        }

        if !self.mode.is_wall_running() {
            self.check_ground(ground.check(body));
        }

        report.mode = self.mode;
        report
    }

    /// Horizontal displacement for this tick, advancing the ramp of the active mode
    fn horizontal_displacement(&mut self, dt: f32) -> Vec3 {
        match self.mode {
            Mode::WallRunning(_) => {
                let displacement = self.wall_direction
                    * self.wall_ramp.value()
                    * self.config.initial_wall_run_boost
                    * dt;
                if self.wall_ramp.advance(dt) {
                    debug!("Wall-run decayed to {:.2}", self.wall_ramp.value());
                    self.leave_wall();
                }
                displacement
            }
            Mode::Grounded if self.move_direction != Vec3::ZERO => {
                let displacement = self.move_direction * self.ground_ramp.value() * dt;
                self.ground_ramp.arm();
                self.ground_ramp.advance(dt);
                displacement
            }
            Mode::Airborne => {
                self.total_air += self.air_direction
                    * (self.config.air_movement_scaling * self.total_air_speed)
                    * self.air_ramp.value();
                let displacement = self.total_air * self.total_air_speed * dt;
                self.air_ramp.arm();
                self.air_ramp.advance(dt);
                displacement
            }
            Mode::Grounded => {
                self.stop_moving();
                Vec3::ZERO
            }
        }
    }

    /// React to a fresh wall entry or a lost wall contact
    fn sample_wall(&mut self, wall: &WallSensor) {
        match wall.contact() {
            Some(contact) if wall.entries() != self.consumed_wall_entries => {
                self.consumed_wall_entries = wall.entries();
                self.enter_wall(contact.right);
            }
            Some(_) => {}
            None => {
                // Entries that came and went between ticks leave no trace
                self.consumed_wall_entries = wall.entries();
                if self.mode.is_wall_running() {
                    self.leave_wall();
                }
            }
        }
    }

    fn enter_wall(&mut self, wall_right: Vec3) {
        let (side, direction) = wall_run_direction(wall_right, self.facing, self.config.angle_to_wall);
        self.wall_direction = direction;
        // Momentum carries into the wall
        self.wall_ramp.restart_from(self.ground_ramp.value());
        self.set_mode(Mode::WallRunning(side));
    }

    /// End a wall-run without a jump, continuing along the wall direction
    fn leave_wall(&mut self) {
        let speed = self.wall_ramp.value() * self.config.initial_wall_run_boost;
        self.capture_air_trajectory(self.wall_direction, speed);
        self.set_mode(Mode::Airborne);
    }

    /// Perform a jump if the mode allows it. Returns whether it happened.
    fn jump(&mut self) -> bool {
        if !self.mode.can_jump() {
            return false;
        }
        match self.mode {
            // Still inside the probe range from a recent take-off
            Mode::Grounded if self.velocity.y > 0.0 => return false,
            Mode::WallRunning(side) => {
                let direction = jump_off_direction(
                    side,
                    self.wall_direction,
                    self.config.angle_to_wall,
                    self.config.jump_off_angle,
                );
                self.capture_air_trajectory(direction, self.ground_ramp.value());
                self.set_mode(Mode::Airborne);
            }
            _ => {}
        }

        let power = self.config.jump_power_at(self.ground_ramp.value());
        let impulse = self.config.jump_velocity(power);
        self.velocity.y = self.velocity.y.max(0.0) + impulse;
        self.jumping = true;
        debug!("Jump: power {:.2}, impulse {:.2}", power, impulse);
        true
    }

    fn apply_gravity(&mut self, dt: f32) {
        let wall_running = self.mode.is_wall_running();
        if (self.mode.is_grounded() && self.velocity.y < 0.0) || wall_running {
            self.velocity.y = 0.0;
        }
        self.velocity.y -= self.config.effective_gravity(wall_running) * dt;
    }

    fn check_ground(&mut self, grounded_now: bool) {
        match self.mode {
            Mode::Grounded if !grounded_now => {
                self.capture_air_trajectory(self.move_direction, self.ground_ramp.value());
                self.set_mode(Mode::Airborne);
            }
            Mode::Airborne if grounded_now && self.velocity.y <= 0.0 => {
                self.set_mode(Mode::Grounded);
                // Observers see grounded speed from the landing tick on
                let landed = self.move_direction * self.ground_ramp.value();
                self.velocity.x = landed.x;
                self.velocity.z = landed.z;
            }
            _ => {}
        }
        self.jumping = !self.mode.is_grounded();
    }

    /// Freeze the horizontal trajectory the character carries into the air
    fn capture_air_trajectory(&mut self, direction: Vec3, speed: f32) {
        self.total_air = flatten(direction);
        self.total_air_speed = speed;
        self.air_ramp.reset();
    }

    /// Reset ground and air ramps to their minimums
    fn stop_moving(&mut self) {
        self.ground_ramp.reset();
        self.air_ramp.reset();
    }

    /// Switch modes, disarming the ramp owned by the mode being left
    fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        match self.mode {
            Mode::Grounded => self.ground_ramp.cancel(),
            Mode::Airborne => self.air_ramp.reset(),
            Mode::WallRunning(_) => self.wall_ramp.cancel(),
        }
        debug!("Movement mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
    }

    // ---- Getters ----

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_grounded(&self) -> bool {
        self.mode.is_grounded()
    }

    pub fn is_wall_running(&self) -> bool {
        self.mode.is_wall_running()
    }

    pub fn wall_side(&self) -> Option<WallSide> {
        self.mode.wall_side()
    }

    /// True from take-off until landing
    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    /// Current ground speed
    pub fn speed(&self) -> f32 {
        self.ground_ramp.value()
    }

    pub fn max_speed(&self) -> f32 {
        self.config.max_speed
    }

    pub fn air_speed(&self) -> f32 {
        self.air_ramp.value()
    }

    pub fn wall_run_speed(&self) -> f32 {
        self.wall_ramp.value()
    }

    /// Frozen wall-run direction (zero before the first wall-run)
    pub fn wall_direction(&self) -> Vec3 {
        self.wall_direction
    }

    /// Inherited air trajectory
    pub fn air_trajectory(&self) -> Vec3 {
        self.total_air
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.velocity.y
    }

    pub fn horizontal_speed(&self) -> f32 {
        flatten(self.velocity).length()
    }

    pub fn facing(&self) -> Vec3 {
        self.facing
    }

    /// Snapshot for animation
    pub fn signals(&self) -> MovementSignals {
        MovementSignals {
            horizontal_speed: self.horizontal_speed(),
            vertical_speed: self.velocity.y,
            grounded: self.is_grounded(),
            wall_running: self.wall_side(),
            speed: self.speed(),
            wall_run_speed: self.wall_run_speed(),
            max_speed: self.config.max_speed,
        }
    }
}
