//! Render the Ising comparison report: nine charts (energy, magnetization,
//! specific heat; metropolis vs gibbs vs analytical solution) from the
//! precomputed CSV tables under `result/`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ising_report::pipeline::run_report;

#[derive(Parser)]
#[command(about = "Render comparison charts from Ising sampling results")]
struct Cli {
    /// Base directory containing result/ (inputs) and graph/ (outputs)
    #[arg(long, default_value = ".")]
    path: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Cli::parse();

    match run_report(&args.path) {
        Ok(written) => {
            println!("wrote {} charts", written.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
