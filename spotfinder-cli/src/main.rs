//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = spotfinder_cli::run() {
        eprintln!("spotfinder: {err}");
        std::process::exit(1);
    }
}
