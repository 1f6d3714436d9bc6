use ringfd::build_info;
use ringfd::cli::*;
use ringfd::equation::*;
use ringfd::error::*;
use ringfd::image::write_heatmap;
use ringfd::scaling::sweep;
use ringfd::solver::*;
use tracing_subscriber::EnvFilter;

const NAME: &str = "ringfd";

fn solve_command(args: &SolveArgs) -> Result<()> {
    let equation = ExpSinEquation::new(args.grid.grid());

    #[cfg(feature = "mpi")]
    let outcome = if args.mpi {
        let Some(world) = ringfd::transport::MpiTransport::initialize() else {
            tracing::error!("MPI was already initialized");
            std::process::exit(1);
        };
        solve(&equation, world)?
    } else {
        solve_local(&equation, args.ranks)?
    };
    #[cfg(not(feature = "mpi"))]
    let outcome = solve_local(&equation, args.ranks)?;

    profiling::finish_frame!();

    if let Some(solution) = &outcome.solution {
        if let Some(path) = &args.output {
            solution.save(path)?;
        }
        if let Some(path) = &args.image {
            write_heatmap(solution, path)?;
        }
        println!("{}", build_info::run_report(NAME, &outcome));
    }
    Ok(())
}

fn scaling_command(args: &ScalingArgs) -> Result<()> {
    let equation = ExpSinEquation::new(args.grid.grid());
    let report = sweep(&equation, args.max_ranks, args.repeats)?;
    print!("{report}");
    Ok(())
}

fn main() {
    let (_cli, command) = Cli::cli_setup(NAME);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = {
        let server_addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        tracing::info!("Run this to view profiling data:  puffin_viewer {server_addr}");
        profiling::puffin::set_scopes_on(true);
        puffin_http::Server::new(&server_addr).ok()
    };

    let result = match &command {
        Command::Solve(args) => solve_command(args),
        Command::Scaling(args) => scaling_command(args),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "run failed");
        std::process::exit(1);
    }
}
