use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crate::cli::commands::{Cli, Commands, StatsArgs};
use crate::cli::output::stats_to_json;
use crate::io::config_io;
use crate::io::store_io::{self, Storage};
use crate::model::config::Config;
use crate::model::context::ContextRegistry;
use crate::ops::{context_ops, stats};

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config(cli.config.as_deref());

    match cli.command {
        None => {
            let path = resolve_document_path(cli.file.as_deref(), &config);
            debug!(path = %path.display(), "opening task document");
            crate::tui::run(Storage::new(path), &config)
        }
        Some(Commands::Stats(args)) => {
            let file = args.file.clone().or(cli.file);
            cmd_stats(args, file.as_deref(), &config)
        }
    }
}

/// The command line wins, then `[storage] path`, then the cache directory.
pub fn resolve_document_path(cli_path: Option<&Path>, config: &Config) -> PathBuf {
    cli_path
        .map(Path::to_path_buf)
        .or_else(|| config.storage.path.clone())
        .unwrap_or_else(store_io::default_document_path)
}

fn cmd_stats(
    args: StatsArgs,
    file: Option<&Path>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Storage::new(resolve_document_path(file, config));
    let doc = storage.load();

    let mut registry = ContextRegistry {
        names: doc.contexts.clone(),
        current: String::new(),
    };
    context_ops::reconcile(&mut registry, &doc.tasks);

    let today = Local::now().date_naive();
    let stats = stats::compute(&doc.tasks, &registry.names, today);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats_to_json(&stats))?);
    } else {
        print!("{}", stats::format_report(&stats));
    }
    Ok(())
}
