// Entry point: parse arguments, load config, render the requested figure.
use std::error::Error;

use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use policy_surface::cli::{Args, Command};
use policy_surface::config::PlotConfig;
use policy_surface::figure::{surface, uncertainty};

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install log subscriber: {err}");
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let cfg = PlotConfig::load_or_default(&args.config);
    match args.command {
        Command::Surface { dir, name } => {
            let out = surface::plot_surface(&dir, &name, &cfg)?;
            info!("done: {}", out.display());
        }
        Command::Uncertainty { bounds, out_dir } => {
            let outs = uncertainty::plot_uncertainty(&bounds, &out_dir, &cfg)?;
            for out in outs {
                info!("done: {}", out.display());
            }
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);
    if let Err(err) = run(args) {
        error!("policy-surface failed: {err}");
        std::process::exit(1);
    }
}
