//! `annotate`: emit a log entry through a logger carrying the stack annotator.
//!
//! Useful for checking a hook configuration against a real binary's stack:
//!
//! ```text
//! annotate --config annotator.toml --level fatal "disk full"
//! ```

use std::path::PathBuf;

use clap::Parser;

use stack_annotator::config::{load_config, AppConfig, ConfigWatcher};
use stack_annotator::observability::init_logging;
use stack_annotator::{Level, Logger, ReloadableHook, StackAnnotator};

#[derive(Parser)]
#[command(name = "annotate")]
#[command(about = "Emit a log entry enriched with call-stack fields", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Level to emit at.
    #[arg(short, long, default_value = "error")]
    level: Level,

    /// Extra `key=value` fields.
    #[arg(short, long = "field", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// Keep running and re-emit on every config change (Ctrl-C to stop).
    #[arg(short, long)]
    watch: bool,

    /// Message to log.
    #[arg(default_value = "annotated entry")]
    message: String,
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{}`", s))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    init_logging(&config.logging);

    tracing::debug!(
        caller_levels = ?config.hook.caller_levels,
        stack_levels = ?config.hook.stack_levels,
        skip_frames = config.hook.skip_frames,
        "Configuration loaded"
    );

    let hook = ReloadableHook::new(StackAnnotator::from_config(&config.hook));
    let mut logger = Logger::new(config.logging.level);
    logger.add_hook(hook.clone());

    emit(&logger, &cli);

    if cli.watch {
        let Some(path) = &cli.config else {
            return Err("--watch requires --config".into());
        };
        let _watcher = ConfigWatcher::new(path, hook).run()?;
        loop {
            std::thread::sleep(std::time::Duration::from_secs(5));
            emit(&logger, &cli);
        }
    }

    Ok(())
}

#[inline(never)]
fn emit(logger: &Logger, cli: &Cli) {
    let mut entry = logger.with_field("pid", std::process::id());
    for (key, value) in &cli.fields {
        entry = entry.with_field(key.as_str(), value.as_str());
    }
    entry.log(cli.level, cli.message.as_str());
}
