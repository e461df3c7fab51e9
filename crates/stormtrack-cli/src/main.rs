//! stormtrack CLI: map viewer and tooling for storm event reports

use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use stormtrack_engine::{
    export_to_path, load_events, short_label, Config, ConfigError, Event, EventSet, Timeline,
    DEFAULT_CONFIG_FILE,
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE: &str = "stormtrack.log";

/// Terminal map of dated storm event reports
#[derive(Parser)]
#[command(name = "stormtrack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Event data file path or http(s) URL (overrides the config)
    #[arg(long, global = true)]
    source: Option<String>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Print the events visible at a slider value
    List {
        /// Slider value in days after the anchor (default: end of range)
        #[arg(long)]
        day: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load and normalize the data, reporting rejected rows
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print every slider value with its date label
    Labels,

    /// Write the normalized events as CSV
    Export {
        /// Output file
        #[arg(long)]
        out: PathBuf,

        /// Only events visible at this slider value
        #[arg(long)]
        day: Option<u32>,
    },

    /// Write a default configuration file
    Init,
}

fn main() {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(cli.verbose, interactive);

    let config = match resolve_config(&cli.config, cli.source.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to read {}: {e}", cli.config.display());
            std::process::exit(1);
        }
    };
    debug!(source = %config.source, "resolved configuration");

    match cli.command {
        None | Some(Commands::Tui) => {
            if let Err(e) = runtime().block_on(stormtrack_tui::run_tui(config)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::List { day, json }) => cmd_list(&config, day, json),
        Some(Commands::Check { json }) => cmd_check(&config, json),
        Some(Commands::Labels) => cmd_labels(&config),
        Some(Commands::Export { out, day }) => cmd_export(&config, &out, day),
        Some(Commands::Init) => cmd_init(&cli.config),
    }
}

/// Logs go to stderr, or to [`LOG_FILE`] while the TUI owns the terminal.
fn init_logging(verbose: u8, interactive: bool) {
    let default = match verbose {
        0 => "warn,stormtrack_engine=info",
        1 => "debug",
        _ => "trace",
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    if interactive {
        // Without a log file the TUI runs unlogged; stderr would corrupt the screen.
        if let Ok(file) = OpenOptions::new().create(true).append(true).open(LOG_FILE) {
            fmt::Subscriber::builder()
                .with_env_filter(env)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(env)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn resolve_config(path: &Path, source: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = Config::load_or_default(path)?;
    if let Some(source) = source {
        config.source = source.to_string();
    }
    Ok(config)
}

fn runtime() -> tokio::runtime::Runtime {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    }
}

fn load_or_exit(config: &Config) -> EventSet {
    match runtime().block_on(load_events(&config.source())) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", config.source);
            std::process::exit(1);
        }
    }
}

/// Slider value for `day`, clamped; the end of the range when absent.
fn window_day(timeline: &Timeline, day: Option<u32>) -> u32 {
    timeline.range.clamp(day.unwrap_or(timeline.range.max))
}

fn event_line(event: &Event) -> String {
    format!(
        "{:<8} {:<32} {}",
        short_label(event.date),
        event.place(),
        event.kind()
    )
}

fn cmd_list(config: &Config, day: Option<u32>, json: bool) {
    let events = load_or_exit(config);
    let timeline = config.timeline_for(&events);
    let value = window_day(&timeline, day);
    let visible = timeline.filter_events(&events.events, value);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&visible).expect("failed to serialize")
        );
        return;
    }

    println!("Events through {} (day {value})\n", timeline.label(value));
    for event in &visible {
        println!("  {}", event_line(event));
    }
    println!("\n{} of {} event(s) visible", visible.len(), events.len());
}

fn cmd_check(config: &Config, json: bool) {
    let events = load_or_exit(config);

    if json {
        let report = serde_json::json!({
            "source": config.source,
            "accepted": events.len(),
            "rejected": events.rejected,
            "date_span": events.date_span(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("failed to serialize")
        );
        return;
    }

    println!("Source: {}\n", config.source);
    println!("  Accepted: {}", events.len());
    println!("  Rejected: {}", events.rejected.len());
    if let Some((first, last)) = events.date_span() {
        println!("  Dates:    {first} to {last}");
    }
    if !events.rejected.is_empty() {
        println!();
        for rejection in &events.rejected {
            println!("    {rejection}");
        }
    }
}

fn cmd_labels(config: &Config) {
    let timeline = match config.anchor_mode {
        stormtrack_engine::AnchorMode::Fixed => config.timeline(),
        stormtrack_engine::AnchorMode::DataStart => config.timeline_for(&load_or_exit(config)),
    };
    for value in timeline.range.values() {
        println!("{value:>4}  {:<8} {}", timeline.label(value), timeline.cutoff(value));
    }
}

fn cmd_export(config: &Config, out: &Path, day: Option<u32>) {
    let events = load_or_exit(config);
    let timeline = config.timeline_for(&events);
    let result = match day {
        Some(day) => {
            let value = window_day(&timeline, Some(day));
            export_to_path(out, timeline.filter_events(&events.events, value))
        }
        None => export_to_path(out, &events.events),
    };
    match result {
        Ok(count) => {
            info!(count, path = %out.display(), "exported events");
            println!("Wrote {count} event(s) to {}", out.display());
        }
        Err(e) => {
            eprintln!("Failed to write {}: {e}", out.display());
            std::process::exit(1);
        }
    }
}

/// Write the default configuration unless `path` exists. Returns whether it wrote.
fn init_config(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }
    Config::default().save(path)?;
    Ok(true)
}

fn cmd_init(path: &Path) {
    match init_config(path) {
        Ok(true) => println!("Created {}", path.display()),
        Ok(false) => println!("Config already exists at {}", path.display()),
        Err(e) => {
            eprintln!("Failed to write config: {e}");
            std::process::exit(1);
        }
    }
}
