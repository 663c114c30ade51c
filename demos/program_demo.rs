use std::env;
use std::sync::Arc;
use std::time::Duration;

use block_runner::config::{load_and_validate_config, RuntimeBuilder};
use block_runner::dispatch::{ChannelDispatcher, Delivery};
use block_runner::engine::Engine;
use block_runner::graph::Program;
use block_runner::observability::init_tracing;
use tokio::sync::mpsc;

/// Stand-in for the controller side: prints each command, takes a moment to
/// "deliver" it, then acknowledges.
async fn bridge(mut deliveries: mpsc::Receiver<Delivery>) -> usize {
    let mut delivered = 0;
    while let Some(delivery) = deliveries.recv().await {
        delivered += 1;
        println!("  → [{:>3}] {}", delivered, delivery.command.to_json());
        tokio::time::sleep(Duration::from_millis(20)).await;
        delivery.acknowledge();
    }
    delivered
}

/// Run a block program against a simulated acknowledging bridge.
/// Usage: cargo run --example program_demo [program_file]
async fn run_program_demo(program_file: String) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Block Program Demo ===\n");

    println!("Loading program from {}...", program_file);
    let config = load_and_validate_config(&program_file)
        .map_err(|e| format!("Failed to load program: {}", e))?;

    println!("Program loaded successfully!");
    println!("- Root chains: {}", config.program.len());
    println!("- Variables: {:?}", config.variables.keys().collect::<Vec<_>>());
    println!("- While loop cap: {}", config.engine.while_loop_cap);

    let program = Program::snapshot(&config.program)?;
    let (dispatcher, deliveries) = ChannelDispatcher::acknowledged(8);
    let bridge_handle = tokio::spawn(bridge(deliveries));

    let runtime = RuntimeBuilder::from_config(&config, Arc::new(dispatcher));
    let engine = Engine::new(runtime);

    println!("\n=== Running ({} nodes) ===", program.len());
    let report = engine.run(&program).await;

    // Dropping the engine closes the channel and lets the bridge finish.
    drop(engine);
    let delivered = bridge_handle.await?;

    println!("\n=== Report ===");
    println!("- Commands delivered: {}", delivered);
    println!("- Tasks run: {}", report.tasks_run);
    println!("- Tasks failed: {}", report.tasks_failed);
    println!("- Nodes skipped: {}", report.nodes_skipped);
    println!("- Loop caps hit: {}", report.loop_caps_hit);
    println!("- Duration: {:?}", report.duration);

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing("info");

    let program_file = env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/programs/blink.yaml".to_string());

    if let Err(e) = run_program_demo(program_file).await {
        eprintln!("Demo failed: {}", e);
        std::process::exit(1);
    }
}
