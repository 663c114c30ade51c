// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::sync::Arc;

use anyhow::Context;
use block_runner::config::{load_and_validate_config, RuntimeBuilder};
use block_runner::dispatch::JsonLinesDispatcher;
use block_runner::engine::{Engine, RunReport};
use block_runner::graph::Program;
use block_runner::observability::init_tracing;

// stdout carries the command stream (one JSON object per line); everything
// meant for people goes to stderr.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <program.yaml|program.toml> [more programs ...]", args[0]);
        eprintln!("Example: {} demos/programs/blink.yaml", args[0]);
        std::process::exit(1);
    }

    let mut failed = 0;
    for (i, path) in args[1..].iter().enumerate() {
        if i > 0 {
            eprintln!("{}", "─".repeat(60));
        }

        match run_program_file(path).await {
            Ok(report) => print_report(path, &report),
            Err(e) => {
                failed += 1;
                eprintln!("❌ Failed to run {}: {:#}", path, e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} programs could not be run", failed, args.len() - 1);
    }
    Ok(())
}

async fn run_program_file(path: &str) -> anyhow::Result<RunReport> {
    let cfg = load_and_validate_config(path).with_context(|| format!("loading '{}'", path))?;
    let program = Program::snapshot(&cfg.program).with_context(|| format!("snapshotting '{}'", path))?;

    let runtime = RuntimeBuilder::from_config(&cfg, Arc::new(JsonLinesDispatcher::stdout()));
    let engine = Engine::new(runtime);

    eprintln!("▶ {} ({} root chains, {} nodes)", path, program.roots().len(), program.len());
    Ok(engine.run(&program).await)
}

fn print_report(path: &str, report: &RunReport) {
    let marker = if report.is_clean() { "✅" } else { "⚠️" };
    eprintln!("{} {} finished in {:?}", marker, path, report.duration);
    eprintln!("   tasks run:            {}", report.tasks_run);
    eprintln!("   tasks failed:         {}", report.tasks_failed);
    eprintln!("   nodes skipped:        {}", report.nodes_skipped);
    eprintln!("   commands dispatched:  {}", report.commands_dispatched);
    eprintln!("   evaluation fallbacks: {}", report.evaluation_fallbacks);
    eprintln!("   loop caps hit:        {}", report.loop_caps_hit);
}
