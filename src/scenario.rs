//! Headless scenario runner
//!
//! Builds a small rapier level, feeds a scripted input timeline through the
//! character at the fixed timestep, and records what happened.

use std::f32::consts::FRAC_PI_2;
use std::fs;
use std::path::Path;

use anyhow::Context;
use glam::{Vec2, Vec3};
use serde::Serialize;
use tracing::{debug, info};
use wallrun_audio::TracingAudioSink;
use wallrun_core::{GameTime, Transform};
use wallrun_game::{
    AnimationState, AnimatorSink, Character, MenuRole, MenuSink, Mode, OrbitCamera,
};
use wallrun_physics::{CharacterBody, CharacterController, PhysicsWorld, RapierBody};

use crate::settings::GameSettings;

/// One scripted input
#[derive(Debug, Clone, Copy)]
pub enum ScriptAction {
    /// Replace the movement intent
    Move(Vec2),
    Jump,
    /// Mouse delta in pixels
    Look(Vec2),
}

#[derive(Debug, Clone, Copy)]
pub struct ScriptEvent {
    /// Simulated seconds since start
    pub at: f32,
    pub action: ScriptAction,
}

impl ScriptEvent {
    pub const fn new(at: f32, action: ScriptAction) -> Self {
        Self { at, action }
    }
}

/// Run forward, jump off the wall mid-run, stop, turn, run and jump again
pub fn default_script() -> Vec<ScriptEvent> {
    vec![
        ScriptEvent::new(0.0, ScriptAction::Move(Vec2::new(0.0, 1.0))),
        ScriptEvent::new(1.5, ScriptAction::Jump),
        ScriptEvent::new(3.0, ScriptAction::Move(Vec2::ZERO)),
        ScriptEvent::new(3.5, ScriptAction::Look(Vec2::new(-300.0, 0.0))),
        ScriptEvent::new(4.0, ScriptAction::Move(Vec2::new(0.0, 1.0))),
        ScriptEvent::new(4.5, ScriptAction::Jump),
        ScriptEvent::new(5.5, ScriptAction::Move(Vec2::ZERO)),
    ]
}

/// Per-tick record written to the JSON trace
#[derive(Debug, Clone, Serialize)]
pub struct TraceEntry {
    pub tick: u64,
    pub time: f32,
    pub position: Vec3,
    pub mode: String,
    pub speed: f32,
    pub wall_run_speed: f32,
    pub vertical_speed: f32,
    pub jumped: bool,
}

/// Summary of a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScenarioOutcome {
    pub ticks: u64,
    pub jumps: u32,
    pub wall_runs: u32,
    pub landings: u32,
    pub final_position: Vec3,
    pub final_animation: AnimationState,
    pub trace: Vec<TraceEntry>,
}

/// Animator that only logs state changes
#[derive(Debug, Default)]
struct LoggingAnimator {
    state: Option<i32>,
}

impl AnimatorSink for LoggingAnimator {
    fn set_state(&mut self, code: i32) {
        if self.state != Some(code) {
            debug!(code, "animator state");
            self.state = Some(code);
        }
    }

    fn set_speed(&mut self, _speed: f32) {}

    fn trigger(&mut self, name: &str) {
        info!("Animator trigger '{}'", name);
    }
}

#[derive(Debug, Default)]
struct LoggingMenu;

impl MenuSink for LoggingMenu {
    fn set_visible(&mut self, role: MenuRole, visible: bool) {
        info!("Menu '{}' {}", role, if visible { "shown" } else { "hidden" });
    }
}

/// Floor, a long wall with a wall-run volume beside it, a metal deck past
/// the wall, and an intro sign near the spawn.
pub fn build_level(world: &mut PhysicsWorld, ground_tag: &str, wall_run_tag: &str, interaction_tag: &str) {
    world.create_ground(0.0, "Floor_Main", ground_tag);
    world.create_static_box(
        Vec3::new(0.5, 4.0, 10.0),
        Vec3::new(-2.5, 4.0, -20.0),
        "House_Wall",
        "Untagged",
    );
    // Local +X (the run axis) points down -Z
    world.create_volume(
        Vec3::new(10.0, 2.0, 1.5),
        Vec3::new(-0.5, 2.0, -20.0),
        FRAC_PI_2,
        "WallRun_A",
        wall_run_tag,
    );
    world.create_static_box(
        Vec3::new(6.0, 0.25, 6.0),
        Vec3::new(4.0, 0.25, -38.0),
        "AirDeck",
        ground_tag,
    );
    world.create_volume(
        Vec3::new(1.0, 1.0, 0.5),
        Vec3::new(0.0, 1.0, -3.0),
        0.0,
        "IntroSign",
        interaction_tag,
    );
    world.update_queries();
}

/// Run `script` against a fresh level with `settings`
pub fn run(settings: &GameSettings, script: &[ScriptEvent]) -> anyhow::Result<ScenarioOutcome> {
    let mut character =
        Character::new(settings.player.clone()).context("failed to build character")?;
    let mut camera = OrbitCamera::new(settings.camera.clone()).context("invalid camera settings")?;
    let mut time = GameTime::new(settings.time.clone());

    let mut world = PhysicsWorld::new();
    build_level(
        &mut world,
        &settings.player.sensors.ground_tag,
        &settings.player.sensors.wall_run_tag,
        &settings.player.interaction.tag,
    );
    let mut capsule = CharacterController::new();
    let handle = capsule.spawn(&mut world, Vec3::new(0.0, 0.05, 0.0));
    camera.set_ignored_collider(Some(handle));
    info!("Spawned '{}' at {:?}", character.name(), capsule.position);

    let mut audio = TracingAudioSink::default();
    let mut menu = LoggingMenu;
    let mut animator = LoggingAnimator::default();
    let mut outcome = ScenarioOutcome::default();

    let frame_dt = 1.0 / settings.scenario.frame_rate;
    let mut previous = character.transform(capsule.position);
    let mut current = previous;
    let mut pending = script.iter().peekable();
    let mut simulated = 0.0_f32;

    while simulated < settings.scenario.duration {
        while let Some(event) = pending.next_if(|event| event.at <= simulated) {
            apply(event.action, &mut character, &mut camera);
        }

        time.update(frame_dt);
        simulated += time.delta_time;

        for _ in 0..time.fixed_steps() {
            let dt = time.fixed_dt();
            let mut body = RapierBody::new(&mut world, &mut capsule);
            let report =
                character.fixed_update(&mut body, camera.yaw(), dt, &mut audio, &mut menu);
            let position = body.position();
            world.step();
            previous = current;
            current = character.transform(position);

            outcome.ticks += 1;
            if report.jumped {
                outcome.jumps += 1;
            }
            if report.mode_changed() {
                info!(
                    "t={:.2}s {:?} -> {:?} at ({:.2}, {:.2}, {:.2})",
                    time.total_time, report.previous_mode, report.mode, position.x, position.y, position.z
                );
                match report.mode {
                    Mode::WallRunning(_) => outcome.wall_runs += 1,
                    Mode::Grounded => outcome.landings += 1,
                    Mode::Airborne => {}
                }
            }

            let controller = character.controller();
            outcome.trace.push(TraceEntry {
                tick: outcome.ticks,
                time: time.total_time as f32,
                position,
                mode: format!("{:?}", report.mode),
                speed: controller.speed(),
                wall_run_speed: controller.wall_run_speed(),
                vertical_speed: controller.vertical_velocity(),
                jumped: report.jumped,
            });
        }

        outcome.final_animation = character.update(&mut animator);
        let pose = Transform::lerp(&previous, &current, time.fixed_interpolation());
        camera.update(pose.position, Some(&world), time.delta_time);
    }

    outcome.final_position = capsule.position;
    character.trigger_victory(&mut animator);
    info!(
        "Finished {} ticks: {} jumps, {} wall-runs, {} landings, {} audio switches",
        outcome.ticks, outcome.jumps, outcome.wall_runs, outcome.landings, audio.calls
    );

    if let Some(path) = &settings.scenario.trace_path {
        write_trace(path, &outcome)?;
    }
    Ok(outcome)
}

fn apply(action: ScriptAction, character: &mut Character, camera: &mut OrbitCamera) {
    debug!("Script: {:?}", action);
    let input = character.input_mut();
    match action {
        ScriptAction::Move(intent) => input.handle_axis(intent),
        ScriptAction::Jump => input.buffer.press_jump(),
        ScriptAction::Look(delta) => {
            input.handle_mouse_motion((delta.x as f64, delta.y as f64));
            camera.handle_mouse_look(input.take_mouse_delta());
        }
    }
}

fn write_trace(path: &Path, outcome: &ScenarioOutcome) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(outcome).context("failed to serialize trace")?;
    fs::write(path, json).with_context(|| format!("failed to write trace to {}", path.display()))?;
    info!("Wrote trace to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_script_is_sorted() {
        let script = default_script();
        assert!(script.windows(2).all(|w| w[0].at <= w[1].at));
    }

    #[test]
    fn test_idle_run_stays_grounded() {
        let mut settings = GameSettings::default();
        settings.scenario.duration = 1.0;
        let outcome = run(&settings, &[]).unwrap();

        assert!(outcome.ticks >= 49 && outcome.ticks <= 51);
        assert_eq!(outcome.jumps, 0);
        assert!(outcome.trace.iter().all(|entry| entry.mode == "Grounded"));
        assert!(outcome.final_position.y < 0.1);
        assert_eq!(outcome.final_animation, AnimationState::Idle);
    }

    #[test]
    fn test_default_script_wall_runs() {
        let settings = GameSettings::default();
        let outcome = run(&settings, &default_script()).unwrap();

        assert!(outcome.wall_runs >= 1);
        assert!(outcome.jumps >= 1);
        assert!(outcome.final_position.z < -5.0);
    }
}
