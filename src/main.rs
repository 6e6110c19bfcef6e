mod cli;
mod config;
mod models;
mod service;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::{Config, data_dir, default_config_path, load_config, load_required_config};
use crate::models::SubmitOutcome;
use crate::service::{HttpTextProcessor, TextProcessor, spawn_submit};
use crate::ui::{App, Effect, handle_key_event, render};

/// 终端被界面占用，日志写入文件
fn init_logging(path: &Path, verbose: u8) -> Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 显式传入的 --config 必须存在，默认路径缺失时使用默认值
    let config = match (&cli.config, default_config_path()) {
        (Some(path), _) => load_required_config(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        (None, Some(path)) => load_config(&path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        (None, None) => Config::default(),
    }
    .apply(cli.overrides());

    let log_path = match &config.log_file {
        Some(path) => path.clone(),
        None => data_dir()?.join("caddie.log"),
    };
    init_logging(&log_path, cli.verbose)?;
    info!(endpoint = %config.endpoint, overlap = ?config.overlap, "starting caddie");

    let processor: Arc<dyn TextProcessor> = Arc::new(HttpTextProcessor::new(config.endpoint));
    let mut app = App::new(config.overlap);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // panic 时也要恢复终端
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    // 主循环
    let result = run_app(&mut terminal, &mut app, processor).await;

    // 恢复终端
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("caddie exited");
    result.map_err(Into::into)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    processor: Arc<dyn TextProcessor>,
) -> io::Result<()> {
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<SubmitOutcome>();
    let mut events = EventStream::new();

    loop {
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match handle_key_event(app, key) {
                        Some(Effect::Quit) => break,
                        Some(Effect::Submit(ticket)) => {
                            spawn_submit(Arc::clone(&processor), ticket, outcome_tx.clone());
                        }
                        None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },

            Some(outcome) = outcome_rx.recv() => {
                app.apply_outcome(outcome);
            }
        }
    }
    Ok(())
}
