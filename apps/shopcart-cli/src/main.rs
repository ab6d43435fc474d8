//! shopcart binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match shopcart_cli::run(std::env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
