use clap::Parser;
use ctxdo::cli::commands::Cli;
use ctxdo::cli::handlers;

fn main() {
    let cli = Cli::parse();

    // Logging is best effort; the app runs without it
    let log_guard = ctxdo::logging::init_logging().ok();

    let result = handlers::dispatch(cli);
    drop(log_guard);
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
