//! ai-sim - run authored enemy behavior files headless.
//!
//! - `ai-sim run --behaviors grunt.yaml` - simulate one enemy against a scripted target
//! - `ai-sim check --behaviors grunt.yaml` - validate a behavior file

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use ai_rules::BehaviorFile;
use ai_sim::{RunOptions, ScenarioConfig, SimEvent, SimReport};

#[derive(Parser)]
#[command(name = "ai-sim")]
#[command(about = "Headless simulation for enemy behavior files", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one enemy against a target walking a scripted path
    Run {
        /// Behavior file (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        behaviors: PathBuf,

        /// Scenario file; built-in defaults when omitted
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// Number of ticks to simulate
        #[arg(long, default_value_t = 600)]
        ticks: u64,

        /// Seconds per tick
        #[arg(long, default_value_t = 1.0 / 30.0)]
        dt: f32,

        /// Override the seed from the behavior file
        #[arg(long)]
        seed: Option<u64>,

        /// Write the trace log as JSON
        #[arg(long)]
        trace: Option<PathBuf>,
    },

    /// Validate a behavior file
    Check {
        #[arg(short, long)]
        behaviors: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Run {
            behaviors,
            scenario,
            ticks,
            dt,
            seed,
            trace,
        } => {
            let options = RunOptions {
                ticks,
                dt,
                seed,
                trace: trace.is_some(),
            };
            run(&behaviors, scenario.as_deref(), options, trace.as_deref())
        }
        Commands::Check { behaviors } => check(&behaviors),
    }
}

fn load_behaviors(path: &Path) -> Result<BehaviorFile> {
    BehaviorFile::load(path)
        .with_context(|| format!("Failed to load behaviors from {}", path.display()))
}

fn run(
    behaviors_path: &Path,
    scenario_path: Option<&Path>,
    options: RunOptions,
    trace_path: Option<&Path>,
) -> Result<()> {
    anyhow::ensure!(
        options.dt.is_finite() && options.dt > 0.0,
        "--dt must be positive, got {}",
        options.dt
    );

    let behaviors = load_behaviors(behaviors_path)?;
    let scenario = match scenario_path {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::default(),
    };

    tracing::info!(behaviors = %behaviors_path.display(), "Loaded behavior file");
    let report = ai_sim::run(behaviors, &scenario, options)?;
    print_report(&report);

    if let (Some(path), Some(log)) = (trace_path, report.trace.as_ref()) {
        let file = File::create(path)
            .with_context(|| format!("Failed to create trace file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), log)
            .with_context(|| format!("Failed to write trace to {}", path.display()))?;
        tracing::info!(events = log.len(), path = %path.display(), "Wrote trace");
    }

    Ok(())
}

fn print_report(report: &SimReport) {
    for event in &report.events {
        match event {
            SimEvent::State { tick, from, to } => {
                println!("[{tick:>5}] state    {} -> {}", from.name(), to.name());
            }
            SimEvent::Behavior {
                tick,
                name,
                fallback,
            } => {
                let note = if *fallback { " (fallback)" } else { "" };
                println!("[{tick:>5}] behavior {name}{note}");
            }
            SimEvent::Impact { tick, impact } => {
                let outcome = if impact.hit { "hit" } else { "miss" };
                println!("[{tick:>5}] attack   {} {outcome}", impact.command.name());
            }
        }
    }

    println!();
    println!("Ticks:         {}", report.ticks);
    println!("Hits:          {}", report.hits);
    println!("Target health: {:.1}", report.target_health);
    if let Some(state) = report.final_state {
        println!("Final state:   {}", state.name());
    }
}

fn check(path: &Path) -> Result<()> {
    // Build the Brain the run would build, so check and run share one validation path.
    let brain = load_behaviors(path)?
        .into_brain(ai_sim::ENEMY)
        .with_context(|| format!("Invalid behaviors in {}", path.display()))?;
    let config = brain.config();
    let set = brain.behaviors();

    println!("{}: OK", path.display());
    println!("  decision interval: {:.3}s", config.decision_interval);
    println!("  seed:              {}", config.seed);
    for (index, behavior) in set.behaviors().iter().enumerate() {
        let fallback = if index == set.fallback_index() {
            "  [fallback]"
        } else {
            ""
        };
        println!(
            "  {index}. {} ({} groups, {} move, {} attack){fallback}",
            behavior.name,
            behavior.conditions.len(),
            behavior.move_actions.len(),
            behavior.attack_actions.len(),
        );
    }

    Ok(())
}
