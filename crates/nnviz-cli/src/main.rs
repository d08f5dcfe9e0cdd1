//! NNviz - Main entry point
//!
//! Reads a network description, plans the 3D scene, and writes the plan as
//! JSON for a host application to build.

mod config;
mod host;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use nnviz_scene::ScenePlan;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "nnviz")]
#[command(about = "Plan stylized 3D neural network diagrams")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "nnviz.toml")]
    config: PathBuf,

    /// Write the scene plan here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for color randomization
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Write a sample configuration to the config path and exit
    #[arg(long)]
    write_default_config: bool,

    /// Print an object summary instead of the JSON plan
    #[arg(long)]
    summary: bool,
}

/// JSON document written for hosts
#[derive(Serialize)]
struct PlanDocument<'a> {
    generator: &'static str,
    version: &'static str,
    generated_at: DateTime<Utc>,
    seed: Option<u64>,
    plan: &'a ScenePlan,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries the plan
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("NNviz v{}", env!("CARGO_PKG_VERSION"));

    if args.write_default_config {
        config::save_default_config(&args.config)
            .with_context(|| format!("writing {}", args.config.display()))?;
        info!(path = %args.config.display(), "Wrote sample configuration");
        return Ok(());
    }

    let config = config::load_config(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let layers = config.resolved_layers()?;
    let spec = config.to_network_spec(&layers);
    let styles = config::Config::to_layer_styles(&layers);
    let options = config.to_scene_options();

    info!(
        layers = spec.layer_count(),
        neurons = spec.neuron_count(),
        shape = %spec.shape,
        "Configuration loaded"
    );

    let plan = match args.seed {
        Some(seed) => ScenePlan::build(&spec, &styles, &options, &mut StdRng::seed_from_u64(seed))?,
        None => ScenePlan::generate(&spec, &styles, &options)?,
    };

    if args.summary {
        let mut log_host = host::LogHost::default();
        if let Err(never) = plan.apply(&mut log_host) {
            match never {}
        }
        let summary = log_host.summary;
        println!("Planned {} objects:", plan.object_count());
        println!("  - {} neurons", summary.neurons);
        println!("  - {} connections", summary.connections);
        println!("  - {} lights", summary.lights);
        if summary.world_color {
            println!("  - custom world color");
        }
        if summary.stage {
            println!("  - stage (radius {:.2})", options.stage_radius);
        }
        println!(
            "  - camera rig at [{:.3}, {:.3}, {:.3}] radius {:.3}",
            plan.camera_rig.center[0],
            plan.camera_rig.center[1],
            plan.camera_rig.center[2],
            plan.camera_rig.radius
        );
        return Ok(());
    }

    let document = PlanDocument {
        generator: "nnviz",
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Utc::now(),
        seed: args.seed,
        plan: &plan,
    };
    let json = serde_json::to_string_pretty(&document)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), objects = plan.object_count(), "Wrote scene plan");
        }
        None => println!("{}", json),
    }

    Ok(())
}
