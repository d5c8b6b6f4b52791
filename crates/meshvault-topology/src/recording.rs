//! In-memory surface that keeps the draw commands of the latest frame

use meshvault_core::Point;

use crate::{Fill, Stroke, Surface, TextStyle};

/// One primitive issued to a surface
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    FillArc {
        center: Point,
        radius: f64,
        fill: Fill,
    },
    StrokeArc {
        center: Point,
        radius: f64,
        stroke: Stroke,
    },
    Text {
        text: String,
        at: Point,
        style: TextStyle,
    },
}

/// Surface that records instead of rasterizing. `clear` starts a new frame.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            frames: 0,
        }
    }

    /// Commands since the last clear, the clear included
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of times the surface was cleared
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Point, &Point, &Stroke)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, stroke } => Some((from, to, stroke)),
            _ => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = (&Point, &Fill)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillArc { center, fill, .. } => Some((center, fill)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn fill_arc(&mut self, center: Point, radius: f64, fill: &Fill) {
        self.commands.push(DrawCommand::FillArc {
            center,
            radius,
            fill: *fill,
        });
    }

    fn stroke_arc(&mut self, center: Point, radius: f64, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeArc {
            center,
            radius,
            stroke: *stroke,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            style: *style,
        });
    }
}
