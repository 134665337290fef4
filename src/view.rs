//! Host-facing clock view.
//!
//! [`ClockView`] is the boundary between the geometry core and whatever owns
//! the screen. The host reports size changes, asks for a frame once per tick
//! and moves the rotation counter in and out of its own persistence.

use crate::config::Config;
use crate::geometry::{
    compute_frame, compute_viewport, ClockFaceStyle, HandStyles, Orientation, ViewportGeometry,
};
use crate::state::RotationState;
use crate::{DrawPrimitive, TimeSample};

/// Styles, current viewport and rotation counter of one clock widget.
#[derive(Debug, Clone)]
pub struct ClockView {
    face: ClockFaceStyle,
    hands: HandStyles,
    radius_percent: f32,
    viewport: ViewportGeometry,
    rotation: RotationState,
}

impl ClockView {
    /// A view with no size yet; frames collapse to the origin until the first
    /// [`on_size_or_orientation_changed`](Self::on_size_or_orientation_changed).
    pub fn new(face: ClockFaceStyle, hands: HandStyles, radius_percent: f32) -> Self {
        let viewport = compute_viewport(
            0.0,
            0.0,
            Orientation::Portrait,
            radius_percent,
            face.digit_size,
        );
        Self {
            face,
            hands,
            radius_percent,
            viewport,
            rotation: RotationState::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.face_style(),
            config.hand_styles(),
            config.face.radius_percent,
        )
    }

    /// Recompute the face layout for a new view size or orientation.
    pub fn on_size_or_orientation_changed(
        &mut self,
        width: f32,
        height: f32,
        orientation: Orientation,
    ) -> ViewportGeometry {
        self.viewport = compute_viewport(
            width,
            height,
            orientation,
            self.radius_percent,
            self.face.digit_size,
        );
        self.viewport
    }

    /// Primitives for the frame showing `time`.
    pub fn on_tick(&self, time: &TimeSample) -> Vec<DrawPrimitive> {
        compute_frame(time, &self.viewport, &self.face, &self.hands)
    }

    pub fn viewport(&self) -> &ViewportGeometry {
        &self.viewport
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn serialize_rotation_state(&self) -> u32 {
        self.rotation.serialize()
    }

    /// Restore the counter; invalid values reset it to zero.
    pub fn deserialize_rotation_state(&mut self, raw: i64) {
        self.rotation = RotationState::restore_or_reset(raw);
    }

    /// State to persist when the view is torn down: the counter plus one. The
    /// live counter keeps its value, so repeated saves persist the same state.
    pub fn save_instance_state(&self) -> RotationState {
        self.rotation.on_save()
    }

    /// Replace the counter with one loaded elsewhere, e.g. from the state file.
    pub fn restore_rotation(&mut self, rotation: RotationState) {
        self.rotation = rotation;
    }
}

impl Default for ClockView {
    fn default() -> Self {
        Self::new(
            ClockFaceStyle::default(),
            HandStyles::default(),
            crate::geometry::DEFAULT_RADIUS_PERCENT,
        )
    }
}
