//! # Clock Face Geometry
//!
//! Pure time-to-geometry calculator. Given a [`TimeSample`], a
//! [`ViewportGeometry`] and the face/hand styles, it emits the ordered
//! [`DrawPrimitive`] list for one frame.
//!
//! ## Angle Conventions
//!
//! Hand angles are "clock degrees": 0° is twelve o'clock and angles grow
//! clockwise. [`point_on_circle`] works in screen degrees where 0° points
//! along +x and, because screen y grows downwards, angles also grow clockwise.
//! Converting a clock angle to a screen angle is therefore a plain `- 90`.
//!
//! Numerals sit at screen angle `30 × (n − 3)`, which is clock angle `30 × n`.
//! The four minute ticks after numeral `n` sit at clock angle `6 × (5n + j)`
//! for `j` in `1..=4`, so each tick cluster fills the gap between numeral `n`
//! and numeral `n + 1`.
//!
//! ## Radii (fractions of the face radius)
//! - Numerals: 0.80
//! - Hour ticks: 0.88 → 0.96
//! - Minute ticks: 0.90 → 0.95
//! - Hands: 45% / 55% / 66% for hour / minute / second

use crate::{
    CircleRenderMode, CircleStyle, DrawPrimitive, LineStyle, PointF, TextStyle, TimeSample,
};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// Stroke width of the face circle outline
pub const DEFAULT_CLOCK_BORDER_WIDTH: f32 = 25.0;
/// Stroke width shared by hour and minute ticks
pub const DEFAULT_TICK_WIDTH: f32 = 5.0;
pub const DEFAULT_HOUR_HAND_WIDTH: f32 = 20.0;
pub const DEFAULT_MINUTE_HAND_WIDTH: f32 = 10.0;
pub const DEFAULT_SECOND_HAND_WIDTH: f32 = 8.0;
pub const DEFAULT_RADIUS_PERCENT: f32 = 1.0;
pub const HOUR_HAND_LENGTH_PERCENT: f32 = 45.0;
pub const MINUTE_HAND_LENGTH_PERCENT: f32 = 55.0;
pub const SECOND_HAND_LENGTH_PERCENT: f32 = 66.0;

/// Numeral size used when none is requested, as a fraction of view width
const AUTO_DIGIT_SIZE_FRACTION: f32 = 0.05;

const NUMERAL_RADIUS: f32 = 0.80;
const HOUR_TICK_INNER: f32 = 0.88;
const HOUR_TICK_OUTER: f32 = 0.96;
const MINUTE_TICK_INNER: f32 = 0.90;
const MINUTE_TICK_OUTER: f32 = 0.95;

/// Glyph nudge towards the lower left, as a fraction of `center_x`
const SINGLE_DIGIT_OFFSET: f32 = 0.03;
const DOUBLE_DIGIT_OFFSET: f32 = 0.05;

/// Hub radius as a fraction of the hour hand stroke width
const HUB_RADIUS_FACTOR: f32 = 0.6;

/// Device orientation; selects which dimension sizes the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Guess the orientation of a view from its size: portrait unless wider
    /// than tall.
    pub fn from_dimensions(width: f32, height: f32) -> Self {
        if height >= width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Layout of the face within the view, recomputed on every size or
/// orientation change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportGeometry {
    pub width: f32,
    pub height: f32,
    pub center_x: f32,
    pub center_y: f32,
    /// Face radius, never negative
    pub radius: f32,
    /// Resolved numeral size
    pub digit_size: f32,
}

impl ViewportGeometry {
    pub fn center(&self) -> PointF {
        PointF::new(self.center_x, self.center_y)
    }
}

/// Which hand a time value drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandUnit {
    Hour,
    Minute,
    Second,
}

impl HandUnit {
    /// Draw order of the hands; the last one ends up on top.
    pub const ALL: [HandUnit; 3] = [HandUnit::Hour, HandUnit::Minute, HandUnit::Second];

    fn divisions(self) -> u32 {
        match self {
            HandUnit::Hour => 12,
            HandUnit::Minute | HandUnit::Second => 60,
        }
    }

    /// The component of `time` this hand displays.
    pub fn value_of(self, time: &TimeSample) -> u32 {
        match self {
            HandUnit::Hour => time.hour12,
            HandUnit::Minute => time.minute,
            HandUnit::Second => time.second,
        }
    }
}

/// Paint and length of one hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandStyle {
    pub color: Rgb888,
    pub stroke_width: f32,
    /// Hand length as a percentage of the face radius
    pub length_percent: f32,
}

impl HandStyle {
    /// Default paint for `unit`: black hour and minute hands, a red second
    /// hand.
    pub fn default_for(unit: HandUnit) -> Self {
        match unit {
            HandUnit::Hour => HandStyle {
                color: Rgb888::BLACK,
                stroke_width: DEFAULT_HOUR_HAND_WIDTH,
                length_percent: HOUR_HAND_LENGTH_PERCENT,
            },
            HandUnit::Minute => HandStyle {
                color: Rgb888::BLACK,
                stroke_width: DEFAULT_MINUTE_HAND_WIDTH,
                length_percent: MINUTE_HAND_LENGTH_PERCENT,
            },
            HandUnit::Second => HandStyle {
                color: Rgb888::RED,
                stroke_width: DEFAULT_SECOND_HAND_WIDTH,
                length_percent: SECOND_HAND_LENGTH_PERCENT,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandStyles {
    pub hour: HandStyle,
    pub minute: HandStyle,
    pub second: HandStyle,
}

impl HandStyles {
    pub fn get(&self, unit: HandUnit) -> &HandStyle {
        match unit {
            HandUnit::Hour => &self.hour,
            HandUnit::Minute => &self.minute,
            HandUnit::Second => &self.second,
        }
    }
}

impl Default for HandStyles {
    fn default() -> Self {
        Self {
            hour: HandStyle::default_for(HandUnit::Hour),
            minute: HandStyle::default_for(HandUnit::Minute),
            second: HandStyle::default_for(HandUnit::Second),
        }
    }
}

/// Paint for the face: circle, numerals, ticks and hub.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockFaceStyle {
    pub circle_color: Rgb888,
    pub circle_mode: CircleRenderMode,
    /// Numeral, tick and hub color
    pub digit_color: Rgb888,
    /// Requested numeral size; `0.0` means auto
    pub digit_size: f32,
    pub border_width: f32,
    pub tick_width: f32,
}

impl Default for ClockFaceStyle {
    fn default() -> Self {
        Self {
            circle_color: Rgb888::BLACK,
            circle_mode: CircleRenderMode::Stroke,
            digit_color: Rgb888::BLACK,
            digit_size: 0.0,
            border_width: DEFAULT_CLOCK_BORDER_WIDTH,
            tick_width: DEFAULT_TICK_WIDTH,
        }
    }
}

/// Size the face for a `width × height` view.
///
/// The face radius is half the width in portrait and half the height in
/// landscape, scaled by `radius_percent` and clamped at zero. A
/// `requested_digit_size` of zero selects 5% of the width.
pub fn compute_viewport(
    width: f32,
    height: f32,
    orientation: Orientation,
    radius_percent: f32,
    requested_digit_size: f32,
) -> ViewportGeometry {
    let base_dimension = match orientation {
        Orientation::Portrait => width,
        Orientation::Landscape => height,
    };
    let radius = ((base_dimension / 2.0) * radius_percent).max(0.0);
    let digit_size = if requested_digit_size != 0.0 {
        requested_digit_size
    } else {
        width * AUTO_DIGIT_SIZE_FRACTION
    };

    log::debug!(
        "Viewport {}x{} ({:?}): radius {:.1}, digit size {:.1}",
        width,
        height,
        orientation,
        radius,
        digit_size
    );

    ViewportGeometry {
        width,
        height,
        center_x: width / 2.0,
        center_y: height / 2.0,
        radius,
        digit_size,
    }
}

/// Clock angle in whole degrees for a hand showing `value`.
///
/// The result is in `0..360`, so it repeats every 12 hours or 60
/// minutes/seconds.
pub fn angle_for_hand(unit: HandUnit, value: u32) -> i32 {
    let divisions = unit.divisions();
    let degrees_per_step = 360.0 / divisions as f32;
    // Reduce first: large values lose precision as f32 and saturate as i32
    let step = (value % divisions) as f32;
    ((degrees_per_step * step).round() as i32).rem_euclid(360)
}

/// Point at `radius` from `center` along screen angle `degree`.
pub fn point_on_circle(center: PointF, radius: f32, degree: f32) -> PointF {
    let angle = degree.to_radians();
    PointF::new(
        center.x + angle.cos() * radius,
        center.y + angle.sin() * radius,
    )
}

/// Line from the center to the tip of the hand showing `value`.
pub fn layout_hand(
    unit: HandUnit,
    value: u32,
    viewport: &ViewportGeometry,
    style: &HandStyle,
) -> DrawPrimitive {
    let center = viewport.center();
    let length = viewport.radius * style.length_percent / 100.0;
    let degree = angle_for_hand(unit, value) - 90;

    DrawPrimitive::Line {
        from: center,
        to: point_on_circle(center, length, degree as f32),
        style: LineStyle {
            color: style.color,
            width: style.stroke_width,
        },
    }
}

/// Numerals and tick marks.
///
/// For each numeral `n` in `1..=12` the output holds the numeral text, its
/// hour tick and the four minute ticks that follow it clockwise: 12 texts and
/// 60 lines in total.
pub fn layout_face(viewport: &ViewportGeometry, face: &ClockFaceStyle) -> Vec<DrawPrimitive> {
    let center = viewport.center();
    let radius = viewport.radius;
    let text_style = TextStyle {
        color: face.digit_color,
        size: viewport.digit_size,
    };
    let tick_style = LineStyle {
        color: face.digit_color,
        width: face.tick_width,
    };

    let tick = |degree: f32, inner: f32, outer: f32| DrawPrimitive::Line {
        from: point_on_circle(center, radius * inner, degree),
        to: point_on_circle(center, radius * outer, degree),
        style: tick_style,
    };

    let mut primitives = Vec::with_capacity(72);
    for number in 1..=12u32 {
        let degree = (30 * (number as i32 - 3)) as f32;

        let offset_fraction = if number > 9 {
            DOUBLE_DIGIT_OFFSET
        } else {
            SINGLE_DIGIT_OFFSET
        };
        let offset = viewport.center_x * offset_fraction;
        let anchor = point_on_circle(center, radius * NUMERAL_RADIUS, degree);
        primitives.push(DrawPrimitive::Text {
            content: number.to_string(),
            position: PointF::new(anchor.x - offset, anchor.y + offset),
            style: text_style,
        });

        primitives.push(tick(degree, HOUR_TICK_INNER, HOUR_TICK_OUTER));

        for j in 1..=4 {
            let minute = number * 5 + j;
            let degree = (6 * minute as i32 - 90) as f32;
            primitives.push(tick(degree, MINUTE_TICK_INNER, MINUTE_TICK_OUTER));
        }
    }
    primitives
}

/// Every primitive of one frame, back to front: face circle, numerals and
/// ticks, hour/minute/second hands, center hub.
pub fn compute_frame(
    time: &TimeSample,
    viewport: &ViewportGeometry,
    face: &ClockFaceStyle,
    hands: &HandStyles,
) -> Vec<DrawPrimitive> {
    let center = viewport.center();
    let mut frame = Vec::with_capacity(77);

    frame.push(DrawPrimitive::Circle {
        center,
        radius: viewport.radius,
        style: CircleStyle {
            color: face.circle_color,
            stroke_width: face.border_width,
            mode: face.circle_mode,
        },
    });

    frame.extend(layout_face(viewport, face));

    for unit in HandUnit::ALL {
        frame.push(layout_hand(
            unit,
            unit.value_of(time),
            viewport,
            hands.get(unit),
        ));
    }

    frame.push(DrawPrimitive::Circle {
        center,
        radius: hands.hour.stroke_width * HUB_RADIUS_FACTOR,
        style: CircleStyle {
            color: face.digit_color,
            stroke_width: 0.0,
            mode: CircleRenderMode::Fill,
        },
    });

    frame
}
