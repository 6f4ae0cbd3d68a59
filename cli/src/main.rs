//! Tidemark CLI - watch terminal size boundaries.
//!
//! # Architecture
//!
//! The binary wires [`tidemark_core`] (boundary engine) to the terminal:
//!
//! ```text
//! crossterm EventStream --Resize--> Viewport::notify_resize
//!                                        |
//!                           TokioScheduler (LocalSet timers)
//!                                        v
//!                                     Watcher --> JsonLineSink (stdout)
//! ```
//!
//! Boundaries and watcher options come from the TOML config
//! (`--config`, `$TIDEMARK_CONFIG`, or `~/.tidemark/config.toml`).
//! Each crossing prints one JSON line. Logs go to a file so stdout stays
//! machine-readable.

mod host;

use anyhow::{Context, Result, bail};
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use std::{
    env,
    fs::{self, OpenOptions},
    io,
    path::PathBuf,
    rc::Rc,
    sync::Mutex,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tidemark_config::{TargetMode, TidemarkConfig, default_config_path};
use tidemark_core::{EventTarget, Viewport, Watcher, WatcherConfig};

use host::{JsonLineSink, TerminalSource, TokioScheduler};

const USAGE: &str = "usage: tidemark [--config <path>]";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // stdout carries events; stderr is the only other place logs can go.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
    for warning in init_warnings {
        tracing::warn!("{warning}");
    }
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.tidemark/logs/tidemark.log
    if let Some(config_path) = default_config_path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("tidemark.log"));
    }

    // Fallback: ./.tidemark/logs/tidemark.log
    candidates.push(PathBuf::from(".tidemark").join("logs").join("tidemark.log"));

    candidates
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "-c" | "--config" => {
                let path = args.next().context("--config requires a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            other => {
                if let Some(path) = other.strip_prefix("--config=") {
                    parsed.config = Some(PathBuf::from(path));
                } else {
                    bail!("unexpected argument: {other}\n{USAGE}");
                }
            }
        }
    }

    Ok(parsed)
}

fn watcher_config(config: &TidemarkConfig) -> WatcherConfig {
    let target = match config.target {
        TargetMode::Global => EventTarget::Global,
        TargetMode::Detached => EventTarget::Detached,
    };
    WatcherConfig::new(config.watcher.clone()).with_target(target)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    init_tracing();

    let config = TidemarkConfig::load(args.config.as_deref())?.unwrap_or_default();
    if config.boundaries.is_empty() {
        tracing::warn!("No boundaries configured; nothing will be reported");
    }

    let local = tokio::task::LocalSet::new();
    local.run_until(run(config)).await
}

async fn run(config: TidemarkConfig) -> Result<()> {
    let source = Rc::new(TerminalSource::new().context("failed to read terminal size")?);
    let viewport = Viewport::with_global_sink(
        source.clone(),
        Rc::new(TokioScheduler),
        Rc::new(JsonLineSink::stdout()),
    );

    let watcher = Watcher::new(&viewport, watcher_config(&config));
    for spec in config.boundaries {
        watcher.register(spec);
    }
    // The CLI exists to listen; init_on_call only decides whether it starts
    // before or after the boundaries above are in place.
    watcher.listen_start();

    let dims = viewport.dimensions();
    tracing::info!(
        width = dims.width,
        height = dims.height,
        boundaries = watcher.len(),
        "Watching terminal size"
    );

    let mut events = EventStream::new();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let result: Result<()> = loop {
        tokio::select! {
            _ = &mut ctrl_c => break Ok(()),
            next = events.next() => match next {
                Some(Ok(Event::Resize(_, _))) => {
                    if source.is_subscribed() {
                        viewport.notify_resize();
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => break Err(e.into()),
                None => break Ok(()),
            },
        }
    };

    watcher.listen_end();
    tracing::info!(passes = watcher.passes(), "Stopped watching");
    result
}
