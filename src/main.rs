use clap::Parser;
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use diff_facets::{
    cli::{Cli, OutputFormat},
    scanner::{read_input, DiffScanner},
    ui::{self, RenderOptions},
    AppEvent, FacetsConfig, FilterSession, InputWatcher, Item,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = cli.validate() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    cli.setup_logging();

    let config = FacetsConfig::load_or_default(cli.config.as_deref())?;
    if let Err(err) = config.validate() {
        eprintln!("Error: invalid configuration: {}", err);
        std::process::exit(1);
    }

    tracing::debug!("Reading {:?} input from {}", cli.format, cli.input.display());

    if cli.watch {
        run_watch_mode(&cli, &config)
    } else {
        let scanner = DiffScanner::new(&config.scanner)?;
        let items = scanner.scan(&read_input(&cli.input)?, cli.format)?;
        let mut session = FilterSession::new(config.display.min_groups);
        print!("{}", render(&cli, &config, &mut session, &items)?);
        Ok(())
    }
}

fn run_watch_mode(cli: &Cli, config: &FacetsConfig) -> Result<()> {
    let scanner = DiffScanner::new(&config.scanner)?;
    let watcher = InputWatcher::new(&cli.input, config.watcher.event_debounce_duration())?;
    let mut session = FilterSession::new(config.display.min_groups);

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    tracing::info!("Watching {} (Ctrl+C to quit)", cli.input.display());
    refresh(cli, config, &scanner, &mut session);

    while running.load(Ordering::SeqCst) {
        match watcher.recv_timeout(Duration::from_millis(100)) {
            Ok(AppEvent::ContentChanged) => refresh(cli, config, &scanner, &mut session),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => continue,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Rescan the input and print again; a bad read is logged, not fatal
fn refresh(cli: &Cli, config: &FacetsConfig, scanner: &DiffScanner, session: &mut FilterSession) {
    let result = scanner
        .scan_file(&cli.input, cli.format)
        .and_then(|items| render(cli, config, session, &items));

    match result {
        Ok(out) => {
            if cli.output == OutputFormat::Text {
                println!("===");
            }
            print!("{}", out);
        }
        Err(err) => tracing::warn!("Failed to refresh filters: {:#}", err),
    }
}

/// Rebuild the session from `items`, apply the requested hides and render
fn render(cli: &Cli, config: &FacetsConfig, session: &mut FilterSession, items: &[Item]) -> Result<String> {
    session.rebuild(items);

    for (kind, label) in cli.hidden_groups() {
        let known = session
            .engine()
            .and_then(|engine| engine.store().group(kind, &label))
            .is_some();
        if !known {
            tracing::warn!("No {} group named {:?}", kind, label);
        }
        session.toggle_group(kind, &label, false);
    }

    let bars = session.bars();
    let Some(engine) = session.engine() else {
        return Ok(String::new());
    };

    let options = RenderOptions {
        color: !cli.no_color,
        show_counts: config.display.show_counts,
        show_hidden: config.display.show_hidden,
    };

    match cli.output {
        OutputFormat::Text => Ok(ui::format_text(&bars, items, engine, &options)),
        OutputFormat::Compact => Ok(ui::format_compact(items, engine)),
        OutputFormat::Json => Ok(format!("{}\n", ui::format_json(&bars, items, engine)?)),
    }
}
