//! Integration tests for spta-motion.
//!
//! These tests verify the workflow from TOML parsing to a completed move.

mod common;

use common::{run_until_complete, NoopPin, PulseProbe, RecordingTimer};
use proptest::prelude::*;
use spta_motion::config::{validate_move, DEFAULT_TIMER_FREQUENCY_HZ};
use spta_motion::error::{ConfigError, Error, MotionError};
use spta_motion::motion::fixed::{quantum, MAX_LOAD_VALUE};
use spta_motion::{
    load_value_to_velocity, parse_config, velocity_to_load_value, Microsteps, MotionController,
    MoveConfig, ProfileShape, PulsesPerSec,
};

// =============================================================================
// Test configuration data
// =============================================================================

const FEEDER_CONFIG: &str = r#"
[timer]
frequency_hz = 50000

[motor]
name = "feeder"
steps_per_revolution = 200
microsteps = 16
invert_direction = true
enable_active_low = false

[moves.index]
steps = 200
target_velocity = 50
acceleration = 1

[moves.nudge]
steps = -4
target_velocity = 2000
acceleration = 5000
"#;

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn parse_feeder_config() {
    let config = parse_config(FEEDER_CONFIG).expect("Should parse feeder config");

    assert_eq!(config.timer.frequency_hz, 50_000);
    assert_eq!(config.motor.name.as_str(), "feeder");
    assert_eq!(config.motor.microsteps, Microsteps::SIXTEENTH);
    assert!(config.motor.invert_direction);
    assert!(!config.motor.enable_active_low);
    assert_eq!(config.motor.pulses_per_revolution(), 3200);

    let names: Vec<&str> = config.move_names().collect();
    assert_eq!(names, vec!["index", "nudge"]);
    assert_eq!(
        config.move_preset("nudge"),
        Some(&MoveConfig {
            steps: -4,
            target_velocity: 2000,
            acceleration: 5000,
        })
    );
}

#[test]
fn empty_config_uses_defaults() {
    let config = parse_config("").expect("Should parse empty config");

    assert_eq!(config.timer.frequency_hz, DEFAULT_TIMER_FREQUENCY_HZ);
    assert_eq!(config.motor.steps_per_revolution, 200);
    assert_eq!(config.motor.microsteps, Microsteps::FULL);
    assert!(config.motor.enable_active_low);
    assert_eq!(config.move_names().count(), 0);
}

#[test]
fn unknown_move_is_reported() {
    let config = parse_config(FEEDER_CONFIG).unwrap();

    match config.move_or_error("eject") {
        Err(Error::Config(ConfigError::MoveNotFound(name))) => assert_eq!(name.as_str(), "eject"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn invalid_microsteps_fail_to_parse() {
    let result = parse_config("[motor]\nmicrosteps = 3\n");
    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}

#[test]
fn zero_timer_frequency_fails_validation() {
    let result = parse_config("[timer]\nfrequency_hz = 0\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidTimerFrequency(0)))
    ));
}

#[test]
fn out_of_range_move_fails_validation() {
    let toml = r#"
[moves.fast]
steps = 10
target_velocity = 70000
acceleration = 10
"#;

    let result = parse_config(toml);
    assert!(matches!(
        result,
        Err(Error::Motion(MotionError::VelocityExceedsLimit {
            requested: 70000,
            max: MAX_LOAD_VALUE,
        }))
    ));

    let stalled = MoveConfig {
        steps: 10,
        target_velocity: 100,
        acceleration: 0,
    };
    assert!(matches!(
        validate_move(&stalled),
        Err(Error::Motion(MotionError::ZeroAcceleration))
    ));
}

// =============================================================================
// Planning
// =============================================================================

#[test]
fn presets_plan_expected_shapes() {
    let config = parse_config(FEEDER_CONFIG).unwrap();
    let microsteps = config.motor.microsteps;

    let index = config.move_or_error("index").unwrap().plan(microsteps);
    assert_eq!(index.steps_required, 3200);
    assert_eq!(index.shape, ProfileShape::Trapezoidal);

    let nudge = config.move_or_error("nudge").unwrap().plan(microsteps);
    assert_eq!(nudge.steps_required, 64);
    assert_eq!(nudge.shape, ProfileShape::Triangular);
}

// =============================================================================
// Config to motion
// =============================================================================

#[test]
fn preset_runs_through_configured_controller() {
    let config = parse_config(FEEDER_CONFIG).unwrap();

    let mut pulse = PulseProbe::default();
    let mut motor = MotionController::builder()
        .from_config(&config)
        .pulse_pin(&mut pulse)
        .dir_pin(NoopPin)
        .enable_pin(NoopPin)
        .timer(RecordingTimer::default())
        .build()
        .unwrap();

    assert_eq!(motor.name(), "feeder");
    assert_eq!(motor.timer_frequency(), 50_000);
    assert_eq!(motor.microsteps(), Microsteps::SIXTEENTH);

    let nudge = *config.move_or_error("nudge").unwrap();
    assert!(motor.start_preset(&nudge).unwrap());
    assert_eq!(motor.state().steps_required(), 64);
    assert!(run_until_complete(|| motor.on_tick(), 10_000_000).is_some());
    assert_eq!(motor.position().microsteps(), -64);
    assert!((motor.position().full_steps() + 4.0).abs() < f32::EPSILON);

    motor.set_origin();
    assert_eq!(motor.position().microsteps(), 0);
    assert_eq!(motor.position().steps_to(10), 10);

    drop(motor);
    assert_eq!(pulse.falling, 64);
}

#[test]
fn invalid_preset_is_rejected_before_starting() {
    let mut motor = MotionController::builder()
        .pulse_pin(NoopPin)
        .dir_pin(NoopPin)
        .enable_pin(NoopPin)
        .timer(RecordingTimer::default())
        .build()
        .unwrap();

    let preset = MoveConfig {
        steps: 10,
        target_velocity: 100,
        acceleration: 100_000,
    };
    assert!(matches!(
        motor.start_preset(&preset),
        Err(Error::Motion(MotionError::AccelerationExceedsLimit { .. }))
    ));
    assert!(!motor.is_busy());
}

// =============================================================================
// Unit conversion
// =============================================================================

#[test]
fn load_value_examples() {
    assert_eq!(velocity_to_load_value(PulsesPerSec(10.0), 50_000), 27);
    assert_eq!(velocity_to_load_value(PulsesPerSec(5.0), 50_000), 14);
    assert_eq!(velocity_to_load_value(PulsesPerSec(0.0), 50_000), 0);
    assert_eq!(
        velocity_to_load_value(PulsesPerSec(1.0e9), 50_000),
        MAX_LOAD_VALUE
    );
}

proptest! {
    #[test]
    fn prop_load_value_round_trip_within_one_quantum(
        velocity in 1.0f32..10_000.0,
        frequency in prop::sample::select(vec![50_000u32, 100_000, 500_000]),
    ) {
        let load = velocity_to_load_value(PulsesPerSec(velocity), frequency);
        let back = load_value_to_velocity(load, frequency).value();
        let q = quantum(frequency).value();

        prop_assert!(back >= velocity - q * 0.001, "{} -> {} -> {}", velocity, load, back);
        prop_assert!(back - velocity <= q * 1.001, "{} -> {} -> {}", velocity, load, back);
    }
}
