//! Live operations - one renderer and one simulator on a shared schedule
//!
//! The scheduler owns both timers. Each branch of the loop runs one engine
//! tick to completion before the next branch is polled, so a tick is never
//! re-entered and a cancel always lands between ticks.

use std::future::Future;
use std::sync::Arc;

use meshvault_core::{CancelFlag, MeshResult, TransferId};
use meshvault_topology::{RecordingSurface, Surface, Topology, TopologyRenderer};
use meshvault_transfer::{
    CompletionSink, DigestMint, RandomIncrement, TickSummary, TransferItem, TransferRequest,
    TransferSimulator, TransferStats,
};
use parking_lot::Mutex;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::LiveOpsConfig;

/// Why `run_until` returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The shutdown future resolved
    Shutdown,
    /// Both engines were cancelled through their handles
    EnginesStopped,
}

/// What one `run_until` call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub transfer_ticks: u64,
    pub completions: u64,
    pub reason: StopReason,
}

/// Shared handle onto the transfer queue.
///
/// Clones talk to the same simulator, so a UI task can submit and remove
/// while the live loop ticks. The completion sink runs after the simulator
/// lock is released and may call back into the queue; only `tick` and
/// `set_sink` are off limits from inside a sink.
#[derive(Clone)]
pub struct TransferQueue {
    inner: Arc<Mutex<TransferSimulator>>,
    sink: Arc<Mutex<Box<dyn CompletionSink + Send>>>,
}

impl TransferQueue {
    /// Wrap `simulator`, taking over its completion sink
    pub fn new(mut simulator: TransferSimulator) -> Self {
        let sink = simulator.take_sink();
        Self {
            inner: Arc::new(Mutex::new(simulator)),
            sink: Arc::new(Mutex::new(sink)),
        }
    }

    pub fn submit(&self, name: impl Into<String>, size_bytes: u64) -> TransferId {
        self.inner.lock().submit(TransferRequest::new(name, size_bytes))
    }

    /// Remove an item whatever its status; unknown ids are ignored
    pub fn remove(&self, id: TransferId) -> Option<TransferItem> {
        self.inner.lock().remove(id)
    }

    /// Fault injection, see [`TransferSimulator::fail`]
    pub fn fail(&self, id: TransferId) -> bool {
        self.inner.lock().fail(id)
    }

    /// Advance the queue once, then hand completions to the sink in queue order
    pub fn tick(&self) -> TickSummary {
        // Sink lock first: concurrent ticks dispatch in the order they stepped
        let mut sink = self.sink.lock();
        let summary = self.inner.lock().step();
        for event in &summary.events {
            sink.on_complete(event);
        }
        summary
    }

    pub fn cancel(&self) {
        self.inner.lock().cancel();
    }

    pub fn cancel_handle(&self) -> CancelFlag {
        self.inner.lock().cancel_handle()
    }

    pub fn set_sink(&self, sink: impl CompletionSink + Send + 'static) {
        *self.sink.lock() = Box::new(sink);
    }

    pub fn get(&self, id: TransferId) -> Option<TransferItem> {
        self.inner.lock().get(id).cloned()
    }

    /// Copy of the queue in insertion order
    pub fn snapshot(&self) -> Vec<TransferItem> {
        self.inner.lock().items().to_vec()
    }

    pub fn active_count(&self) -> usize {
        self.inner.lock().active_count()
    }

    pub fn is_idle(&self) -> bool {
        self.inner.lock().is_idle()
    }

    pub fn stats(&self) -> TransferStats {
        self.inner.lock().stats().clone()
    }
}

/// The live operations surface: network view plus upload queue
pub struct LiveOps<S: Surface> {
    config: LiveOpsConfig,
    renderer: TopologyRenderer<S>,
    transfers: TransferQueue,
}

impl LiveOps<RecordingSurface> {
    /// Live ops drawing onto an in-memory surface sized from the config
    pub fn recording(config: LiveOpsConfig, topology: Topology) -> MeshResult<Self> {
        let surface = RecordingSurface::new(config.surface_width, config.surface_height);
        Self::new(config, topology, surface)
    }
}

impl<S: Surface> LiveOps<S> {
    /// Bind `topology` to `surface` and build the simulator from `config`
    pub fn new(config: LiveOpsConfig, topology: Topology, surface: S) -> MeshResult<Self> {
        config.validate()?;

        let mut renderer = TopologyRenderer::new();
        renderer.bind(topology, surface);

        let simulator = build_simulator(&config);
        Ok(Self {
            config,
            renderer,
            transfers: TransferQueue::new(simulator),
        })
    }

    pub fn with_sink(self, sink: impl CompletionSink + Send + 'static) -> Self {
        self.transfers.set_sink(sink);
        self
    }

    pub fn config(&self) -> &LiveOpsConfig {
        &self.config
    }

    pub fn transfers(&self) -> TransferQueue {
        self.transfers.clone()
    }

    pub fn renderer(&self) -> &TopologyRenderer<S> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut TopologyRenderer<S> {
        &mut self.renderer
    }

    /// Stop both engines. Idempotent.
    pub fn stop(&mut self) {
        self.renderer.stop();
        self.transfers.cancel();
    }

    /// Drive both engines until `shutdown` resolves or both are cancelled.
    /// Both engines are stopped on return.
    pub async fn run_until<F>(&mut self, shutdown: F) -> RunSummary
    where
        F: Future<Output = ()>,
    {
        let render_stop = self.renderer.stop_handle();
        let transfer_stop = self.transfers.cancel_handle();
        let frames_before = self.renderer.stats().frames;
        let ticks_before = self.transfers.stats().ticks;

        let mut frames = interval(self.config.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut transfer_ticks = interval(self.config.transfer_interval);
        transfer_ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::pin!(shutdown);

        let mut summary = RunSummary {
            frames: 0,
            transfer_ticks: 0,
            completions: 0,
            reason: StopReason::Shutdown,
        };
        info!(
            frame_interval = ?self.config.frame_interval,
            transfer_interval = ?self.config.transfer_interval,
            "live ops started"
        );

        loop {
            if render_stop.is_cancelled() && transfer_stop.is_cancelled() {
                summary.reason = StopReason::EnginesStopped;
                break;
            }

            tokio::select! {
                biased;

                _ = &mut shutdown => break,

                _ = frames.tick(), if !render_stop.is_cancelled() => {
                    self.renderer.tick();
                }

                _ = transfer_ticks.tick(), if !transfer_stop.is_cancelled() => {
                    let tick = self.transfers.tick();
                    summary.completions += tick.completed.len() as u64;
                    if !tick.completed.is_empty() {
                        debug!(
                            completed = tick.completed.len(),
                            advanced = tick.advanced,
                            "transfer tick"
                        );
                    }
                }
            }
        }

        self.stop();
        // Engine counters skip ticks that landed after a cancel
        summary.frames = self.renderer.stats().frames - frames_before;
        summary.transfer_ticks = self.transfers.stats().ticks - ticks_before;
        info!(
            frames = summary.frames,
            transfer_ticks = summary.transfer_ticks,
            completions = summary.completions,
            reason = ?summary.reason,
            "live ops stopped"
        );
        summary
    }
}

fn build_simulator(config: &LiveOpsConfig) -> TransferSimulator {
    match config.seed {
        Some(seed) => TransferSimulator::with_increments(
            RandomIncrement::with_seed(seed).with_floor(config.min_increment),
        )
        .with_digests(DigestMint::with_seed(seed.wrapping_add(1))),
        None => TransferSimulator::with_increments(
            RandomIncrement::new().with_floor(config.min_increment),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshvault_core::MeshError;
    use meshvault_transfer::TransferStatus;

    #[test]
    fn test_invalid_config_rejected() {
        let config = LiveOpsConfig {
            min_increment: 0.0,
            ..LiveOpsConfig::default()
        };
        let result = LiveOps::recording(config, Topology::sample());
        assert!(matches!(result, Err(MeshError::InvalidConfig(_))));
    }

    #[test]
    fn test_queue_handles_share_state() {
        let live =
            LiveOps::recording(LiveOpsConfig::fast().with_seed(1), Topology::sample()).unwrap();
        let ui = live.transfers();
        let driver = live.transfers();

        let id = ui.submit("research.pdf", 2_400_000);
        driver.tick();

        let item = ui.get(id).unwrap();
        assert_eq!(item.status(), TransferStatus::InProgress);
        assert!(item.progress() > 0.0);
        assert_eq!(driver.snapshot().len(), 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut live = LiveOps::recording(LiveOpsConfig::fast(), Topology::sample()).unwrap();
        live.stop();
        live.stop();

        assert!(!live.renderer().is_running());
        assert!(live.transfers().cancel_handle().is_cancelled());
    }
}
