//! Douay Reader - reading plan and commentary lookup

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = douay_reader::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
