//! Visual rules for nodes and edges
//!
//! Every attribute here is a pure function of the animation clock and the
//! static node/edge state. Replaying the same clock values reproduces the
//! same strokes, fills and labels bit for bit.

use meshvault_core::Point;

use crate::{
    AnimationClock, DashPattern, Edge, Fill, Glow, Node, Paint, Palette, Stroke, TextAlign,
    TextStyle,
};

/// Node circle radius
pub const NODE_RADIUS: f64 = 20.0;
/// Blur radius of the glow around active nodes
pub const GLOW_BLUR: f64 = 20.0;
pub const NODE_BORDER_WIDTH: f64 = 2.0;

pub const ACTIVE_EDGE_WIDTH: f64 = 2.0;
pub const INACTIVE_EDGE_WIDTH: f64 = 1.0;
pub const ACTIVE_EDGE_DASH: DashPattern = DashPattern::new(10.0, 5.0);
pub const INACTIVE_EDGE_DASH: DashPattern = DashPattern::new(5.0, 5.0);
/// Dash phase moved per frame on active edges
pub const DASH_SPEED: f64 = 0.5;

/// Active node opacity: GLOW_BASE + GLOW_AMPLITUDE * sin(GLOW_FREQUENCY * clock)
pub const GLOW_BASE: f64 = 0.5;
pub const GLOW_AMPLITUDE: f64 = 0.3;
pub const GLOW_FREQUENCY: f64 = 0.03;

pub const LABEL_SIZE_PX: f64 = 12.0;
/// Id label sits above the node centre
pub const ID_LABEL_OFFSET: f64 = -35.0;
/// File count label sits below the node centre
pub const FILES_LABEL_OFFSET: f64 = 40.0;

/// Fill opacity of an active node at `clock`. Stays within [0.2, 0.8].
pub fn node_opacity(clock: AnimationClock) -> f64 {
    GLOW_BASE + GLOW_AMPLITUDE * (GLOW_FREQUENCY * clock.as_f64()).sin()
}

/// Dash phase of an active edge at `clock`
pub fn dash_offset(clock: AnimationClock) -> f64 {
    -DASH_SPEED * clock.as_f64()
}

/// Frames for the active dash pattern to return to the same phase
pub fn dash_cycle_frames() -> f64 {
    ACTIVE_EDGE_DASH.period() / DASH_SPEED
}

pub fn edge_stroke(
    edge: &Edge,
    from: Point,
    to: Point,
    clock: AnimationClock,
    palette: &Palette,
) -> Stroke {
    if edge.active {
        Stroke {
            paint: Paint::LinearGradient {
                start: from,
                end: to,
                from: palette.edge_start,
                to: palette.edge_end,
            },
            width: ACTIVE_EDGE_WIDTH,
            dash: Some(ACTIVE_EDGE_DASH.with_offset(dash_offset(clock))),
        }
    } else {
        Stroke::solid(palette.inactive_edge, INACTIVE_EDGE_WIDTH).with_dash(INACTIVE_EDGE_DASH)
    }
}

pub fn node_fill(node: &Node, clock: AnimationClock, palette: &Palette) -> Fill {
    if node.active {
        Fill {
            color: palette.active_node.with_alpha(node_opacity(clock) as f32),
            glow: Some(Glow {
                color: palette.active_node,
                blur: GLOW_BLUR,
            }),
        }
    } else {
        Fill::plain(palette.inactive_node)
    }
}

pub fn node_border(node: &Node, palette: &Palette) -> Stroke {
    let color = if node.active {
        palette.active_border
    } else {
        palette.inactive_border
    };
    Stroke::solid(color, NODE_BORDER_WIDTH)
}

/// A piece of text placed on the surface
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub at: Point,
    pub style: TextStyle,
}

/// Labels for one node: its short id above, and for active nodes the file
/// count below
pub fn node_labels(node: &Node, palette: &Palette) -> Vec<Label> {
    let style = TextStyle {
        color: palette.label,
        size_px: LABEL_SIZE_PX,
        align: TextAlign::Center,
    };

    let mut labels = vec![Label {
        text: node.id.short_label().to_string(),
        at: node.position.offset_y(ID_LABEL_OFFSET),
        style,
    }];
    if node.active {
        labels.push(Label {
            text: format!("{} files", node.file_count),
            at: node.position.offset_y(FILES_LABEL_OFFSET),
            style,
        });
    }
    labels
}
