//! rAttendance main entrypoint.

use log::LevelFilter;
use rattendance::run;

fn main() {
    // Warnings and errors by default; RUST_LOG overrides.
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
