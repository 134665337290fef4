//! # Clock Frame Rendering
//!
//! This module turns the primitive list from [`crate::geometry::compute_frame`]
//! into pixels. It targets the `embedded-graphics` [`DrawTarget`] abstraction,
//! so the same code drives a framebuffer, a display driver or the test
//! `MockDisplay`, and it ships an [`AsciiCanvas`] for development on a
//! terminal.
//!
//! Rendering is best-effort: text uses the closest monospace bitmap font, hands
//! have square ends and nothing is anti-aliased.

use crate::{CircleRenderMode, CircleStyle, DrawPrimitive, PointF};
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10, FONT_8X13},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::{Rgb888, RgbColor},
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder},
    text::Text,
};
use std::fmt;

/// Terminal columns used by [`draw_ascii`]
pub const ASCII_COLUMNS: u32 = 80;

fn to_point(p: PointF) -> Point {
    Point::new(p.x.round() as i32, p.y.round() as i32)
}

/// Stroke widths and diameters in whole pixels; negative values draw nothing.
fn to_pixels(value: f32) -> u32 {
    value.round().max(0.0) as u32
}

/// Largest bundled font not taller than `size`, falling back to the smallest.
fn font_for_size(size: f32) -> &'static MonoFont<'static> {
    if size >= 20.0 {
        &FONT_10X20
    } else if size >= 13.0 {
        &FONT_8X13
    } else {
        &FONT_6X10
    }
}

fn circle_style(style: &CircleStyle) -> PrimitiveStyle<Rgb888> {
    let builder = PrimitiveStyleBuilder::new();
    let builder = match style.mode {
        CircleRenderMode::Fill => builder.fill_color(style.color),
        CircleRenderMode::Stroke => builder
            .stroke_color(style.color)
            .stroke_width(to_pixels(style.stroke_width)),
        CircleRenderMode::FillAndStroke => builder
            .fill_color(style.color)
            .stroke_color(style.color)
            .stroke_width(to_pixels(style.stroke_width)),
    };
    builder.build()
}

/// Draw one primitive.
pub fn draw_primitive<D>(primitive: &DrawPrimitive, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    match primitive {
        DrawPrimitive::Circle {
            center,
            radius,
            style,
        } => {
            Circle::with_center(to_point(*center), to_pixels(radius * 2.0))
                .into_styled(circle_style(style))
                .draw(target)?;
        }
        DrawPrimitive::Text {
            content,
            position,
            style,
        } => {
            let text_style = MonoTextStyle::new(font_for_size(style.size), style.color);
            Text::new(content, to_point(*position), text_style).draw(target)?;
        }
        DrawPrimitive::Line { from, to, style } => {
            Line::new(to_point(*from), to_point(*to))
                .into_styled(PrimitiveStyle::with_stroke(
                    style.color,
                    to_pixels(style.width),
                ))
                .draw(target)?;
        }
    }
    Ok(())
}

/// Draw a whole frame in order, so later primitives end up on top.
pub fn draw_frame<D>(frame: &[DrawPrimitive], target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    for primitive in frame {
        draw_primitive(primitive, target)?;
    }
    Ok(())
}

/// Character cell canvas on white "paper".
///
/// Dark colors become `#`, red-dominant colors `*`, light colors stay blank
/// and anything else is `+`.
#[derive(Clone, Debug)]
pub struct AsciiCanvas {
    width: u32,
    height: u32,
    cells: Vec<char>,
}

impl AsciiCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; (width as usize) * (height as usize)],
        }
    }

    /// Glyph at pixel `(x, y)`, `None` outside the canvas.
    pub fn cell(&self, x: u32, y: u32) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.cells[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    fn glyph_for(color: Rgb888) -> char {
        let (r, g, b) = (color.r() as u16, color.g() as u16, color.b() as u16);
        if r > 160 && g < 96 && b < 96 {
            '*'
        } else if r + g + b < 192 {
            '#'
        } else if r + g + b > 600 {
            ' '
        } else {
            '+'
        }
    }

    fn priority(glyph: char) -> u8 {
        match glyph {
            '*' => 3,
            '#' => 2,
            '+' => 1,
            _ => 0,
        }
    }

    /// Downsample to at most `columns` characters per line.
    ///
    /// Terminal cells are roughly twice as tall as wide, so each character
    /// covers a `scale × 2·scale` pixel block; the most prominent glyph in the
    /// block wins.
    pub fn to_text(&self, columns: u32) -> String {
        let scale = self.width.div_ceil(columns.max(1)).max(1);
        let (block_w, block_h) = (scale, scale * 2);
        let mut out = String::new();

        for block_y in (0..self.height).step_by(block_h as usize) {
            let mut line = String::new();
            for block_x in (0..self.width).step_by(block_w as usize) {
                let mut glyph = ' ';
                for y in block_y..(block_y + block_h).min(self.height) {
                    for x in block_x..(block_x + block_w).min(self.width) {
                        let candidate = self.cells[(y * self.width + x) as usize];
                        if Self::priority(candidate) > Self::priority(glyph) {
                            glyph = candidate;
                        }
                    }
                }
                line.push(glyph);
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(ASCII_COLUMNS))
    }
}

impl OriginDimensions for AsciiCanvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for AsciiCanvas {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < self.width && y < self.height {
                self.cells[(y * self.width + x) as usize] = Self::glyph_for(color);
            }
        }
        Ok(())
    }
}

/// Render a frame for a `width × height` view as terminal text.
pub fn render_ascii(frame: &[DrawPrimitive], width: u32, height: u32) -> String {
    let mut canvas = AsciiCanvas::new(width, height);
    match draw_frame(frame, &mut canvas) {
        Ok(()) => canvas.to_text(ASCII_COLUMNS),
        Err(never) => match never {},
    }
}

/// Render a frame to the terminal.
pub fn draw_ascii(frame: &[DrawPrimitive], width: u32, height: u32) {
    print!("{}", render_ascii(frame, width, height));
}
