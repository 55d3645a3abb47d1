//! campdir entry point
//!
//! A minimal entrypoint that parses CLI arguments, dispatches, prints
//! errors to stderr and exits non-zero on failure. All logic lives in the
//! cli module.

use campdir::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
