//! Topology renderer - draws one frame per tick
//!
//! The host's frame callback calls `tick`. The renderer holds no timers and
//! never re-schedules itself; `stop` makes every later tick a no-op.

use meshvault_core::{CancelFlag, MeshResult};
use tracing::{debug, info};

use crate::{
    edge_stroke, node_border, node_fill, node_labels, AnimationClock, Edge, Node, Palette,
    Surface, Topology, NODE_RADIUS,
};

/// Counters for the renderer
#[derive(Clone, Debug, Default)]
pub struct RenderStats {
    pub frames: u64,
    /// Primitives issued in the most recent frame, clear included
    pub last_frame_draw_calls: usize,
}

struct Binding<S> {
    topology: Topology,
    surface: S,
}

/// Renders a validated topology onto a surface it owns
pub struct TopologyRenderer<S: Surface> {
    binding: Option<Binding<S>>,
    clock: AnimationClock,
    palette: Palette,
    stop: CancelFlag,
    stats: RenderStats,
}

impl<S: Surface> TopologyRenderer<S> {
    /// Create an unbound renderer. Ticks do nothing until `initialize`.
    pub fn new() -> Self {
        Self::with_palette(Palette::default())
    }

    pub fn with_palette(palette: Palette) -> Self {
        Self {
            binding: None,
            clock: AnimationClock::new(),
            palette,
            stop: CancelFlag::new(),
            stats: RenderStats::default(),
        }
    }

    /// Validate the node/edge set and bind the renderer to `surface`.
    ///
    /// Fails with `InvalidTopology` if any edge or neighbor entry names an
    /// unknown node; the previous binding is then left untouched.
    /// On success the clock restarts at zero and a stopped renderer is re-armed.
    pub fn initialize(&mut self, nodes: Vec<Node>, edges: Vec<Edge>, surface: S) -> MeshResult<()> {
        let topology = Topology::new(nodes, edges)?;
        self.bind(topology, surface);
        Ok(())
    }

    /// Bind an already validated topology
    pub fn bind(&mut self, topology: Topology, surface: S) {
        info!(
            nodes = topology.node_count(),
            edges = topology.edge_count(),
            width = surface.width(),
            height = surface.height(),
            "topology renderer initialized"
        );

        self.binding = Some(Binding { topology, surface });
        self.clock.reset();
        self.stop = CancelFlag::new();
        self.stats = RenderStats::default();
    }

    /// Draw one frame with the current clock, then advance the clock by one.
    /// No-op before `initialize` and after `stop`.
    pub fn tick(&mut self) {
        if self.stop.is_cancelled() {
            return;
        }
        let Some(binding) = self.binding.as_mut() else {
            return;
        };

        let draw_calls = draw_frame(
            &binding.topology,
            &mut binding.surface,
            self.clock,
            &self.palette,
        );
        self.clock.advance();

        self.stats.frames += 1;
        self.stats.last_frame_draw_calls = draw_calls;
    }

    /// Stop rendering. Idempotent.
    pub fn stop(&mut self) {
        if self.stop.cancel() {
            info!(frames = self.stats.frames, "topology renderer stopped");
        }
    }

    /// Handle that stops this renderer from elsewhere.
    /// A later `initialize` replaces it.
    pub fn stop_handle(&self) -> CancelFlag {
        self.stop.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.binding.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.is_initialized() && !self.stop.is_cancelled()
    }

    pub fn clock(&self) -> AnimationClock {
        self.clock
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn topology(&self) -> Option<&Topology> {
        self.binding.as_ref().map(|b| &b.topology)
    }

    /// Mutable access for activity and file-count updates
    pub fn topology_mut(&mut self) -> Option<&mut Topology> {
        self.binding.as_mut().map(|b| &mut b.topology)
    }

    pub fn surface(&self) -> Option<&S> {
        self.binding.as_ref().map(|b| &b.surface)
    }

    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }
}

impl<S: Surface> Default for TopologyRenderer<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Issue every primitive of one frame. Returns the number of draw calls.
fn draw_frame<S: Surface>(
    topology: &Topology,
    surface: &mut S,
    clock: AnimationClock,
    palette: &Palette,
) -> usize {
    surface.clear();
    let mut calls = 1;

    for edge in topology.edges() {
        // Endpoints were validated when the topology was built
        let Some((from, to)) = topology.endpoints(edge) else {
            continue;
        };
        surface.line(from, to, &edge_stroke(edge, from, to, clock, palette));
        calls += 1;
    }

    for node in topology.nodes() {
        surface.fill_arc(node.position, NODE_RADIUS, &node_fill(node, clock, palette));
        surface.stroke_arc(node.position, NODE_RADIUS, &node_border(node, palette));
        calls += 2;

        for label in node_labels(node, palette) {
            surface.fill_text(&label.text, label.at, &label.style);
            calls += 1;
        }
    }

    if clock.frame() % 600 == 0 {
        debug!(frame = clock.frame(), draw_calls = calls, "topology frame");
    }
    calls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{node_opacity, DrawCommand, RecordingSurface};
    use meshvault_core::MeshError;

    fn sample_renderer() -> TopologyRenderer<RecordingSurface> {
        let sample = Topology::sample();
        let mut renderer = TopologyRenderer::new();
        renderer
            .initialize(
                sample.nodes().to_vec(),
                sample.edges().to_vec(),
                RecordingSurface::new(500, 400),
            )
            .unwrap();
        renderer
    }

    #[test]
    fn test_tick_before_initialize_is_noop() {
        let mut renderer: TopologyRenderer<RecordingSurface> = TopologyRenderer::new();
        renderer.tick();
        renderer.tick();

        assert_eq!(renderer.clock(), AnimationClock::ZERO);
        assert_eq!(renderer.stats().frames, 0);
        assert!(!renderer.is_running());
    }

    #[test]
    fn test_initialize_rejects_dangling_edge() {
        let mut renderer = TopologyRenderer::new();
        let result = renderer.initialize(
            vec![Node::new("node-1", 0.0, 0.0)],
            vec![Edge::new("node-1", "node-2")],
            RecordingSurface::new(500, 400),
        );

        assert!(matches!(result, Err(MeshError::InvalidTopology(_))));
        assert!(!renderer.is_initialized());
    }

    #[test]
    fn test_failed_reinitialize_keeps_binding() {
        let mut renderer = sample_renderer();
        renderer.tick();

        let result = renderer.initialize(
            vec![Node::new("node-1", 0.0, 0.0)],
            vec![Edge::new("node-1", "node-9")],
            RecordingSurface::new(10, 10),
        );

        assert!(result.is_err());
        assert_eq!(renderer.topology().unwrap().node_count(), 5);
        assert_eq!(renderer.clock(), AnimationClock::at(1));
    }

    #[test]
    fn test_clock_advances_once_per_tick() {
        let mut renderer = sample_renderer();
        for expected in 1..=50 {
            renderer.tick();
            assert_eq!(renderer.clock().frame(), expected);
        }
        assert_eq!(renderer.surface().unwrap().frames(), 50);
    }

    #[test]
    fn test_frame_layout() {
        let mut renderer = sample_renderer();
        renderer.tick();

        let surface = renderer.surface().unwrap();
        let commands = surface.commands();
        assert_eq!(commands[0], DrawCommand::Clear);

        // 5 edges, then 5 nodes with fill + border each
        assert_eq!(surface.lines().count(), 5);
        assert_eq!(surface.fills().count(), 5);
        assert!(commands[1..6].iter().all(|c| matches!(c, DrawCommand::Line { .. })));

        // 5 id labels + 4 file counts (node-4 is offline)
        let texts: Vec<&str> = surface.texts().collect();
        assert_eq!(
            texts,
            vec!["1", "42 files", "2", "28 files", "3", "35 files", "4", "5", "19 files"]
        );

        assert_eq!(renderer.stats().last_frame_draw_calls, commands.len());
    }

    #[test]
    fn test_frame_uses_clock_before_advance() {
        let mut renderer = sample_renderer();
        for _ in 0..10 {
            renderer.tick();
        }
        // Eleventh frame is drawn at clock 10
        renderer.tick();

        let surface = renderer.surface().unwrap();
        let (center, fill) = surface.fills().next().unwrap();
        assert_eq!(*center, meshvault_core::Point::new(150.0, 100.0));
        assert_eq!(fill.opacity(), node_opacity(AnimationClock::at(10)) as f32);

        let (_, _, stroke) = surface.lines().next().unwrap();
        assert_eq!(stroke.dash.unwrap().offset, -5.0);
    }

    #[test]
    fn test_stop_is_idempotent_and_freezes_clock() {
        let mut renderer = sample_renderer();
        renderer.tick();
        renderer.stop();
        renderer.stop();

        renderer.tick();
        renderer.tick();

        assert_eq!(renderer.clock().frame(), 1);
        assert_eq!(renderer.stats().frames, 1);
        assert!(!renderer.is_running());
    }

    #[test]
    fn test_stop_handle_from_elsewhere() {
        let mut renderer = sample_renderer();
        let handle = renderer.stop_handle();

        renderer.tick();
        handle.cancel();
        renderer.tick();

        assert_eq!(renderer.clock().frame(), 1);
    }

    #[test]
    fn test_reinitialize_restarts_clock() {
        let mut renderer = sample_renderer();
        renderer.tick();
        renderer.tick();
        renderer.stop();

        let sample = Topology::sample();
        renderer.bind(sample, RecordingSurface::new(500, 400));
        assert_eq!(renderer.clock(), AnimationClock::ZERO);
        assert!(renderer.is_running());

        renderer.tick();
        assert_eq!(renderer.clock().frame(), 1);
    }

    #[test]
    fn test_topology_update_shows_next_frame() {
        let mut renderer = sample_renderer();
        renderer
            .topology_mut()
            .unwrap()
            .set_node_active(&"node-4".into(), true)
            .unwrap();
        renderer.tick();

        let texts: Vec<&str> = renderer.surface().unwrap().texts().collect();
        assert!(texts.contains(&"0 files"));
    }
}
