//! MLPerf Storage reporting CLI entry point.

use clap::Parser;
use mlps_report_cli::{exit_code_for, init_logging, run, Cli};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug, cli.verbose);

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for(&e)
        }
    };
    std::process::exit(code.code());
}
