use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config TOML
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: String,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Pseudocolor CC4 surface for policies_<NAME>.csv, saved as surface_<NAME>.png
    Surface {
        /// Directory holding the policies file; the figure is written there too
        #[arg(long)]
        dir: PathBuf,

        /// Configuration name used in the file names
        #[arg(long)]
        name: String,
    },

    /// CC4 contours with policies colored by uncertainty share
    Uncertainty {
        /// JSON tuple [param_space, ub, lb, mean]
        #[arg(long)]
        bounds: PathBuf,

        /// Output directory for final_stdev_sharexy.{png,svg}
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_subcommand_parses() {
        let args = Args::try_parse_from([
            "policy-surface",
            "surface",
            "--dir",
            "runs/batch1",
            "--name",
            "batch1",
        ])
        .unwrap();
        assert_eq!(args.config, "config.toml");
        match args.command {
            Command::Surface { dir, name } => {
                assert_eq!(dir, PathBuf::from("runs/batch1"));
                assert_eq!(name, "batch1");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "policy-surface",
            "uncertainty",
            "--bounds",
            "4_bounds.json",
            "--config",
            "plots.toml",
            "-v",
        ])
        .unwrap();
        assert!(args.verbose);
        assert_eq!(args.config, "plots.toml");
        match args.command {
            Command::Uncertainty { bounds, out_dir } => {
                assert_eq!(bounds, PathBuf::from("4_bounds.json"));
                assert_eq!(out_dir, PathBuf::from("."));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn missing_subcommand_is_rejected() {
        assert!(Args::try_parse_from(["policy-surface"]).is_err());
    }
}
