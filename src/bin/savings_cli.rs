use std::process;

use savings_core::cli;

fn main() {
    savings_core::init();

    if let Err(err) = cli::run_cli() {
        cli::output::error(err.to_string());
        process::exit(1);
    }
}
