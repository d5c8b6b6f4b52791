//! Drawing surface contract
//!
//! The renderer only talks to a [`Surface`]. Styling travels with each
//! primitive instead of living as mutable state on the surface.

use meshvault_core::Point;

use crate::Color;

/// Dash pattern for strokes. `offset` is the phase at which the pattern starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub dash: f64,
    pub gap: f64,
    pub offset: f64,
}

impl DashPattern {
    pub const fn new(dash: f64, gap: f64) -> Self {
        Self {
            dash,
            gap,
            offset: 0.0,
        }
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Length of one dash + gap cycle
    pub fn period(&self) -> f64 {
        self.dash + self.gap
    }

    /// Offset folded into `[0, period)`
    pub fn phase(&self) -> f64 {
        let period = self.period();
        if period <= 0.0 {
            return 0.0;
        }
        self.offset.rem_euclid(period)
    }
}

/// How a stroke is colored
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Color runs linearly from `from` at `start` to `to` at `end`
    LinearGradient {
        start: Point,
        end: Point,
        from: Color,
        to: Color,
    },
}

impl Paint {
    /// Color at fraction `t` along the paint's axis (clamped to 0..1)
    pub fn color_at(&self, t: f64) -> Color {
        match self {
            Paint::Solid(color) => *color,
            Paint::LinearGradient { from, to, .. } => from.lerp(to, t.clamp(0.0, 1.0) as f32),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
    /// None draws a solid line
    pub dash: Option<DashPattern>,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            paint: Paint::Solid(color),
            width,
            dash: None,
        }
    }

    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = Some(dash);
        self
    }
}

/// Blurred halo drawn around a filled shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub blur: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub color: Color,
    pub glow: Option<Glow>,
}

impl Fill {
    pub fn plain(color: Color) -> Self {
        Self { color, glow: None }
    }

    /// Opacity of the fill color
    pub fn opacity(&self) -> f32 {
        self.color.a
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub size_px: f64,
    pub align: TextAlign,
}

/// A fixed-size 2D raster target
pub trait Surface {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Erase the whole surface
    fn clear(&mut self);

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke);

    /// Full circle, filled
    fn fill_arc(&mut self, center: Point, radius: f64, fill: &Fill);

    /// Full circle, outlined
    fn stroke_arc(&mut self, center: Point, radius: f64, stroke: &Stroke);

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        (**self).line(from, to, stroke)
    }

    fn fill_arc(&mut self, center: Point, radius: f64, fill: &Fill) {
        (**self).fill_arc(center, radius, fill)
    }

    fn stroke_arc(&mut self, center: Point, radius: f64, stroke: &Stroke) {
        (**self).stroke_arc(center, radius, stroke)
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        (**self).fill_text(text, at, style)
    }
}
