//! meshvault Topology - Live network visualization engine
//!
//! Renders a fixed set of peers and links onto any 2D [`Surface`]:
//! - Topology: validated nodes and undirected edges
//! - Clock: one frame counter per renderer, advanced once per tick
//! - Style: visual attributes as pure functions of the clock
//! - Renderer: clear, edges, then nodes, every tick
//!
//! The renderer never schedules itself. A host calls [`TopologyRenderer::tick`]
//! from its frame callback and [`TopologyRenderer::stop`] when it is done.

pub mod clock;
pub mod color;
pub mod graph;
pub mod recording;
pub mod renderer;
pub mod style;
pub mod surface;

pub use clock::*;
pub use color::*;
pub use graph::*;
pub use recording::*;
pub use renderer::*;
pub use style::*;
pub use surface::*;
