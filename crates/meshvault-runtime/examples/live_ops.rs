//! Live operations demo
//!
//! Renders the sample network onto an in-memory surface while a handful of
//! simulated uploads run to completion.
//!
//! Run with: cargo run -p meshvault-runtime --example live_ops
//! Set MESHVAULT_TRANSFER_INTERVAL=50ms or RUST_LOG=debug to change the pace or detail.

use std::time::Duration;

use meshvault_runtime::{init_tracing, LiveOps, LiveOpsConfig};
use meshvault_topology::Topology;
use meshvault_transfer::CompletionEvent;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = LiveOpsConfig::from_env()?;
    init_tracing(config.log_format)?;

    println!("=== meshvault live operations ===\n");

    let topology = Topology::sample();
    let stats = topology.stats();
    println!("Network");
    println!("   Active nodes: {}", stats.active_nodes);
    println!("   Offline:      {}", stats.offline_nodes);
    println!("   Connections:  {}", stats.active_connections);
    println!("   Total files:  {}\n", stats.total_files);

    let mut live = LiveOps::recording(config, topology)?.with_sink(|event: &CompletionEvent| {
        println!("   Upload completed: {} has been distributed to the network", event.name);
        println!("     Hash: {}", event.digest);
    });

    let queue = live.transfers();
    for (name, size) in [
        ("distributed-systems.pdf", 2_400_000u64),
        ("network-topology.json", 845_000),
        ("blockchain-research.tar", 15_700_000),
    ] {
        let id = queue.submit(name, size);
        println!("   Queued {id}: {name} ({:.2} MB)", size as f64 / 1024.0 / 1024.0);
    }
    println!();

    let watcher = queue.clone();
    let summary = live
        .run_until(async move {
            while !watcher.is_idle() {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        })
        .await;

    println!("\nRun summary");
    println!("   Frames drawn:   {}", summary.frames);
    println!("   Transfer ticks: {}", summary.transfer_ticks);
    println!("   Completions:    {}", summary.completions);
    if let Some(surface) = live.renderer().surface() {
        println!("   Last frame:     {} draw commands", surface.commands().len());
    }

    Ok(())
}
