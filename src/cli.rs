use crate::build_info;
use crate::equation::*;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Pipelined ring solver for u_t + a u_x = f
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print build information and quit
    #[arg(long)]
    pub build_info: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve once and optionally write the grid and a heatmap.
    Solve(SolveArgs),

    /// Measure the speedup of the in-process ring over 1..=max-ranks.
    Scaling(ScalingArgs),
}

/// Grid overrides, anything left out keeps the compiled-in value.
/// Every rank must be started with the same overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct GridArgs {
    /// Wave speed.
    #[arg(long)]
    pub a: Option<f64>,

    /// Spatial extent X.
    #[arg(long)]
    pub x_extent: Option<f64>,

    /// Time horizon T.
    #[arg(long)]
    pub t_horizon: Option<f64>,

    /// Spatial step.
    #[arg(long)]
    pub h: Option<f64>,

    /// Time step.
    #[arg(long)]
    pub tau: Option<f64>,
}

impl GridArgs {
    pub fn grid(&self) -> GridSpec {
        let d = GridSpec::default();
        GridSpec {
            a: self.a.unwrap_or(d.a),
            x_extent: self.x_extent.unwrap_or(d.x_extent),
            t_horizon: self.t_horizon.unwrap_or(d.t_horizon),
            h: self.h.unwrap_or(d.h),
            tau: self.tau.unwrap_or(d.tau),
        }
    }
}

#[derive(Args, Debug)]
pub struct SolveArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// Ranks of the in-process ring.
    #[arg(short, long, default_value = "4")]
    pub ranks: usize,

    /// Run on the MPI world communicator instead, the rank count
    /// comes from mpirun.
    #[cfg(feature = "mpi")]
    #[arg(long, conflicts_with("ranks"))]
    pub mpi: bool,

    /// Where to write the solution grid, nothing is written without it.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Where to write a heatmap of the solution.
    #[arg(short, long)]
    pub image: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ScalingArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// Largest ring to measure.
    #[arg(short, long, default_value = "8")]
    pub max_ranks: usize,

    /// Runs per ring size, the mean is reported.
    #[arg(short, long, default_value = "3")]
    pub repeats: usize,
}

impl Cli {
    /// Parses the command line. Exits after `--build-info`, and with
    /// the usage text when no subcommand was given.
    pub fn cli_setup(name: &str) -> (Self, Command) {
        let mut cli = Cli::parse();
        if cli.build_info {
            build_info::print_report(name);
            std::process::exit(0);
        }
        match cli.command.take() {
            Some(command) => (cli, command),
            None => {
                let _ = Cli::command().print_help();
                std::process::exit(2);
            }
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn overrides_keep_defaults() {
        let cli = Cli::try_parse_from(["ringfd", "solve", "--h", "0.05", "--ranks", "3"])
            .unwrap();
        let Some(Command::Solve(args)) = cli.command else {
            panic!("expected solve");
        };
        let grid = args.grid.grid();
        assert_eq!(grid.h, 0.05);
        assert_eq!(grid.tau, GridSpec::default().tau);
        assert_eq!(args.ranks, 3);
        assert!(args.output.is_none());
    }

    #[test]
    fn scaling_defaults() {
        let cli = Cli::try_parse_from(["ringfd", "scaling", "--max-ranks", "5"]).unwrap();
        let Some(Command::Scaling(args)) = cli.command else {
            panic!("expected scaling");
        };
        assert_eq!(args.max_ranks, 5);
        assert_eq!(args.repeats, 3);
        assert_eq!(args.grid.grid(), GridSpec::default());
    }

    #[test]
    fn build_info_needs_no_subcommand() {
        let cli = Cli::try_parse_from(["ringfd", "--build-info"]).unwrap();
        assert!(cli.build_info);
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["ringfd", "--build-info", "scaling"]).unwrap();
        assert!(cli.build_info);
        assert!(matches!(cli.command, Some(Command::Scaling(_))));
    }
}
