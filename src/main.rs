//! dim - a small modal terminal text editor
//!
//! Parses the command line, installs logging and runs one editor session.
//! Errors are reported after the terminal has been restored.

use std::process::ExitCode;

use dim::cli::{Cli, USAGE};
use dim::config::Config;
use dim::error::DimError;
use dim::{logging, run};

fn main() -> ExitCode {
    let cli = match Cli::parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("dim: {err}\n\n{USAGE}");
            return ExitCode::from(err.exit_code());
        }
    };

    if cli.show_help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }
    if cli.show_version {
        println!("dim {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    logging::init_logging();
    let config = Config::from_cli(&cli);
    let debug = config.debug;

    let code = match run::run(config) {
        Ok(code) => code,
        Err(err) => {
            report(&err, debug);
            err.exit_code()
        }
    };
    println!("Exited the editor.");
    ExitCode::from(code)
}

fn report(err: &DimError, debug: bool) {
    tracing::error!(error = %err, "fatal error");
    eprintln!("{}\n", err.diagnostic());
    if debug {
        eprintln!("{err:#?}\n");
    }
}
