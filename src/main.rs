use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use decimal_orrery::sim::{
    config::SystemConfig, initial_parameters::InitialParameters, system::SolarSystem,
};

/// Headless driver: advances a system and logs where the bodies end up.
#[derive(Parser, Debug)]
struct Args {
    /// JSON system description
    #[arg(short, long, default_value = "demos/environment.json")]
    config: PathBuf,

    /// Ignore the config and scatter this many bodies around a star
    #[arg(long)]
    scatter: Option<u32>,

    #[arg(short, long, default_value_t = 1_000)]
    steps: u64,

    /// Overrides the seed in the config
    #[arg(long)]
    seed: Option<u64>,

    /// Log body states every this many steps, 0 to disable
    #[arg(long, default_value_t = 100)]
    report_every: u64,
}

fn load_system(args: &Args) -> Result<SolarSystem> {
    let mut config = match args.scatter {
        Some(body_count) => {
            let params = InitialParameters {
                body_count,
                ..Default::default()
            };
            params
                .scatter(args.seed.unwrap_or(0))
                .context("invalid scatter parameters")?
        }
        None => SystemConfig::from_path(&args.config)
            .with_context(|| format!("failed to load {}", args.config.display()))?,
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    Ok(SolarSystem::from_config(config)?)
}

fn report(system: &SolarSystem) {
    for body in system.bodies() {
        info!(
            "t = {}: {} at {} (radius {})",
            system.elapsed(),
            body.name(),
            body.position(),
            body.radius()
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut system = load_system(&args)?;
    info!(
        "simulating {} bodies for {} steps of {} s",
        system.bodies().len(),
        args.steps,
        system.tick_period()
    );

    let mut collisions = 0;
    for step in 1..=args.steps {
        collisions += system.step().collisions.len();
        if args.report_every > 0 && step % args.report_every == 0 {
            report(&system);
        }
    }

    info!(
        "finished after {} ticks, {} collisions, total momentum {}",
        system.ticks(),
        collisions,
        system.total_momentum()
    );
    Ok(())
}
