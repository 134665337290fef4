//! # Analog Clock Core Library
//!
//! This library turns a wall-clock time and a handful of styling parameters into
//! an ordered list of drawable primitives for an analog clock face. It knows
//! nothing about pixels: a renderer (see [`renderer`]) walks the list and draws
//! it onto whatever surface the host owns.
//!
//! ## Design Philosophy
//!
//! ### Pure Geometry
//! - **Stateless per call**: [`geometry::compute_frame`] reads its inputs and
//!   returns a fresh `Vec<DrawPrimitive>`; nothing is cached between ticks
//! - **Total functions**: zero-size viewports, zero radii and odd radius
//!   percentages all produce defined (if degenerate) output
//! - **One trig primitive**: every hand endpoint, numeral and tick goes through
//!   [`geometry::point_on_circle`]
//!
//! ### Frame Layout
//! Each frame is exactly 77 primitives, back to front:
//! - **1** face circle
//! - **72** face marks: 12 numerals, 12 hour ticks, 48 minute ticks
//! - **3** hands: hour, minute, second (second on top)
//! - **1** center hub
//!
//! ### Host Boundary
//! The host (window, e-ink loop, terminal) owns sizing and scheduling. It calls
//! [`view::ClockView::on_size_or_orientation_changed`] on layout and
//! [`view::ClockView::on_tick`] once per second. The only persisted value is the
//! cosmetic rotation counter in [`state`].
//!
//! ## Core Types
//!
//! - [`TimeSample`]: the 12-hour time consumed by one tick
//! - [`PointF`]: a floating-point position in view coordinates
//! - [`DrawPrimitive`]: one circle, text or line with its style

use embedded_graphics::pixelcolor::Rgb888;
use serde::{Deserialize, Serialize};

// Module declarations
pub mod config;
pub mod geometry;
pub mod renderer;
pub mod state;
pub mod view;

/// Hours, minutes and seconds of a single draw tick.
///
/// Hours are on the 12-hour dial (`0..=11`, where 0 is twelve o'clock), the
/// same value a hand angle is computed from. The core only reads samples; it
/// never owns the clock they came from.
///
/// # Example
/// ```
/// use analog_clock_lib::TimeSample;
/// use chrono::NaiveTime;
///
/// let quarter_past = TimeSample::new(12, 15, 30);
/// assert_eq!(quarter_past.hour12, 0);
///
/// let evening = TimeSample::from_time(&NaiveTime::from_hms_opt(21, 5, 0).unwrap());
/// assert_eq!((evening.hour12, evening.minute, evening.second), (9, 5, 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeSample {
    /// Hour on the 12-hour dial (0-11)
    pub hour12: u32,
    /// Minute (0-59)
    pub minute: u32,
    /// Second (0-59)
    pub second: u32,
}

impl TimeSample {
    /// Build a sample, folding the hour onto the dial and wrapping minutes and
    /// seconds into `0..60`.
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour12: hour % 12,
            minute: minute % 60,
            second: second % 60,
        }
    }

    /// Sample any `chrono` time-of-day value.
    pub fn from_time<T: chrono::Timelike>(time: &T) -> Self {
        Self::new(time.hour(), time.minute(), time.second())
    }

    /// Sample the local wall clock.
    pub fn now() -> Self {
        Self::from_time(&chrono::Local::now())
    }
}

/// A position in view coordinates (origin top-left, y grows downwards).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: PointF) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// How the face circle is painted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleRenderMode {
    Fill,
    #[default]
    Stroke,
    FillAndStroke,
}

/// Paint for a [`DrawPrimitive::Circle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleStyle {
    pub color: Rgb888,
    pub stroke_width: f32,
    pub mode: CircleRenderMode,
}

/// Paint for a [`DrawPrimitive::Line`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Rgb888,
    pub width: f32,
}

/// Paint for a [`DrawPrimitive::Text`]. `size` is the requested glyph height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Rgb888,
    pub size: f32,
}

/// One element of a clock frame.
///
/// Frames are produced fresh every tick and consumed immediately by a
/// renderer; primitives carry their own style so a renderer needs no other
/// context.
///
/// # Example
/// ```
/// use analog_clock_lib::{DrawPrimitive, LineStyle, PointF};
/// use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
///
/// let hand = DrawPrimitive::Line {
///     from: PointF::new(50.0, 50.0),
///     to: PointF::new(50.0, 10.0),
///     style: LineStyle { color: Rgb888::RED, width: 8.0 },
/// };
/// assert!(hand.is_line());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum DrawPrimitive {
    Circle {
        center: PointF,
        radius: f32,
        style: CircleStyle,
    },
    /// `position` is the left end of the text baseline.
    Text {
        content: String,
        position: PointF,
        style: TextStyle,
    },
    Line {
        from: PointF,
        to: PointF,
        style: LineStyle,
    },
}

impl DrawPrimitive {
    pub fn is_circle(&self) -> bool {
        matches!(self, DrawPrimitive::Circle { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, DrawPrimitive::Text { .. })
    }

    pub fn is_line(&self) -> bool {
        matches!(self, DrawPrimitive::Line { .. })
    }
}
