//! # End-to-End Clock Tests
//!
//! These tests drive the library the way the binary does: load a config, size
//! a [`ClockView`], request frames, render them and carry the rotation counter
//! across a simulated view recreation.

use analog_clock_lib::{
    config::Config,
    geometry::{Orientation, HOUR_HAND_LENGTH_PERCENT},
    renderer::render_ascii,
    state::RotationState,
    view::ClockView,
    DrawPrimitive, PointF, TimeSample,
};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use std::fs;
use tempfile::NamedTempFile;

fn hands(frame: &[DrawPrimitive]) -> Vec<(PointF, PointF, Rgb888, f32)> {
    frame[73..76]
        .iter()
        .map(|p| match p {
            DrawPrimitive::Line { from, to, style } => (*from, *to, style.color, style.width),
            other => panic!("expected a hand, got {:?}", other),
        })
        .collect()
}

/// A config file's colors and widths reach the emitted hands and face.
#[test]
fn configured_styles_reach_the_frame() {
    let config_file = NamedTempFile::new().expect("Should create temp file");
    fs::write(
        config_file.path(),
        r##"
[display]
width = 300
height = 300

[face]
circle_color = "#336699"
circle_style = "fill"
digit_color = "#00FF00"
radius_percent = 0.5

[hands]
hour_color = "#0000FF"
hour_stroke_width = 30.0
"##,
    )
    .expect("Should write config file");

    let config = Config::load_from_path(config_file.path());
    let mut view = ClockView::from_config(&config);
    let viewport = view.on_size_or_orientation_changed(300.0, 300.0, Orientation::Portrait);
    assert_eq!(viewport.radius, 75.0, "radius_percent should scale the face");

    let frame = view.on_tick(&TimeSample::new(9, 45, 0));
    assert_eq!(frame.len(), 77, "Frame should hold 77 primitives");

    match &frame[0] {
        DrawPrimitive::Circle { style, .. } => {
            assert_eq!(style.color, Rgb888::new(0x33, 0x66, 0x99));
            assert_eq!(style.mode, analog_clock_lib::CircleRenderMode::Fill);
        }
        other => panic!("expected face circle, got {:?}", other),
    }

    let hands = hands(&frame);
    assert_eq!(hands[0].2, Rgb888::BLUE, "hour hand color from config");
    assert_eq!(hands[0].3, 30.0, "hour hand width from config");
    assert_eq!(hands[2].2, Rgb888::RED, "second hand keeps its default");

    // Hub follows the configured hour stroke width
    match &frame[76] {
        DrawPrimitive::Circle { radius, style, .. } => {
            assert!((radius - 18.0).abs() < 1e-4);
            assert_eq!(style.color, Rgb888::GREEN);
        }
        other => panic!("expected hub, got {:?}", other),
    }
}

/// The 3 o'clock hour hand lies along +x at 45% of the radius.
#[test]
fn three_oclock_scenario() {
    let mut view = ClockView::default();
    view.on_size_or_orientation_changed(1000.0, 2000.0, Orientation::Portrait);
    let frame = view.on_tick(&TimeSample::new(3, 0, 0));
    let (from, to, _, _) = hands(&frame)[0];

    assert_eq!(from, PointF::new(500.0, 1000.0));
    let expected = PointF::new(500.0 + 500.0 * HOUR_HAND_LENGTH_PERCENT / 100.0, 1000.0);
    assert!(
        to.distance_to(expected) < 1e-3,
        "hour hand should end at {:?}, got {:?}",
        expected,
        to
    );
}

/// Each second the second hand advances by 6 degrees and nothing else moves.
#[test]
fn consecutive_ticks_advance_the_second_hand() {
    let mut view = ClockView::default();
    view.on_size_or_orientation_changed(400.0, 400.0, Orientation::Portrait);
    let center = view.viewport().center();

    let before = view.on_tick(&TimeSample::new(7, 20, 10));
    let after = view.on_tick(&TimeSample::new(7, 20, 11));
    assert_eq!(before[..75], after[..75], "face, hour and minute hand are unchanged");

    let angle = |frame: &[DrawPrimitive]| {
        let (_, to, _, _) = hands(frame)[2];
        (to.y - center.y).atan2(to.x - center.x).to_degrees()
    };
    let step = angle(&after) - angle(&before);
    assert!((step - 6.0).abs() < 1e-3, "second hand moved {step} degrees");
}

/// Frames are rebuilt from scratch: the same inputs give the same output.
#[test]
fn frames_are_deterministic() {
    let mut view = ClockView::default();
    view.on_size_or_orientation_changed(320.0, 480.0, Orientation::Portrait);
    let time = TimeSample::new(11, 59, 59);
    assert_eq!(view.on_tick(&time), view.on_tick(&time));
}

/// The rotation counter survives a save, a file round trip and a new view.
#[test]
fn rotation_survives_view_recreation() {
    let state_file = NamedTempFile::new().expect("Should create temp file");

    let mut first = ClockView::default();
    first.deserialize_rotation_state(2);
    let saved = first.save_instance_state();
    assert_eq!(saved.serialize(), 3, "save bumps the persisted counter");
    assert_eq!(first.serialize_rotation_state(), 2, "live counter is unchanged");
    saved
        .save_to_path(state_file.path())
        .expect("Should write state file");

    let mut second = ClockView::default();
    second.restore_rotation(RotationState::load_from_path(state_file.path()));
    assert_eq!(second.serialize_rotation_state(), 3);
}

/// A corrupted state file restarts the counter instead of failing.
#[test]
fn corrupted_rotation_state_resets() {
    let state_file = NamedTempFile::new().expect("Should create temp file");
    fs::write(state_file.path(), r#"{"rotation": [1, 2]}"#).expect("Should write state file");

    let mut view = ClockView::default();
    view.restore_rotation(RotationState::load_from_path(state_file.path()));
    assert_eq!(view.serialize_rotation_state(), 0);
}

/// Development mode output shows the dial and the red second hand.
#[test]
fn ascii_rendering_of_a_configured_view() {
    let config = Config::default();
    let mut view = ClockView::from_config(&config);
    let (width, height) = (config.display.width, config.display.height);
    let orientation = config
        .display
        .orientation
        .resolve(width as f32, height as f32);
    view.on_size_or_orientation_changed(width as f32, height as f32, orientation);

    let text = render_ascii(&view.on_tick(&TimeSample::new(2, 40, 15)), width, height);
    assert!(text.contains('#'), "dial should be drawn");
    assert!(text.contains('*'), "second hand should be drawn");
    assert!(
        text.lines().all(|line| line.chars().count() <= 80),
        "output should fit a terminal"
    );
}
