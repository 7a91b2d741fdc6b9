use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use nekosheet::{App, Config, FileStorage, MemoryStorage, Storage, SystemClock, UiEvent};

/// Headless worksheet activity engine.
///
/// Reads line-delimited JSON UI events, dispatches them against the
/// engine, and emits one JSON ack per event. Downloaded worksheets are
/// written to --out-dir.
#[derive(Parser, Debug)]
#[command(name = "nekosheet", version)]
struct Args {
    /// Directory for persistent gallery storage; in-memory when omitted
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Directory downloaded worksheet PNGs are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// JSON-lines event file; reads stdin when omitted
    #[arg(long)]
    events: Option<PathBuf>,

    /// Suppress per-event acks on stdout
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Serialize)]
struct Ack {
    seq: u64,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    gallery_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    modal: Option<String>,
}

fn modal_title(app: &App) -> Option<String> {
    app.modal()
        .info()
        .map(|m| m.title.clone())
        .or_else(|| app.modal().confirm().map(|m| m.title.clone()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let storage: Box<dyn Storage> = match &args.storage_dir {
        Some(dir) => Box::new(
            FileStorage::new(dir)
                .with_context(|| format!("failed to open storage dir {}", dir.display()))?,
        ),
        None => Box::new(MemoryStorage::new()),
    };

    let mut app = App::with_backends(Config::default(), storage, Box::new(SystemClock))?;
    app.init()?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create out dir {}", args.out_dir.display()))?;
    let out_dir = args.out_dir.clone();
    app.on_download(move |file| {
        let path = out_dir.join(&file.name);
        if let Err(e) = fs::write(&path, &file.png_data) {
            log::error!("failed to write {}: {}", path.display(), e);
        }
    });

    let reader: Box<dyn BufRead> = match &args.events {
        Some(path) => Box::new(BufReader::new(
            fs::File::open(path)
                .with_context(|| format!("failed to open event file {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut seq: u64 = 0;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: UiEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                // Malformed lines are ignored, like the worker protocol
                log::warn!("ignoring malformed event line: {}", e);
                continue;
            }
        };

        seq += 1;
        let result = app.dispatch(event);
        if let Err(e) = &result {
            log::error!("event {} failed: {}", seq, e);
        }

        if !args.quiet {
            let ack = Ack {
                seq,
                ok: result.is_ok(),
                error: result.err().map(|e| e.to_string()),
                gallery_count: app.gallery().len(),
                modal: modal_title(&app),
            };
            let js = serde_json::to_string(&ack)
                .unwrap_or_else(|_| format!("{{\"seq\":{},\"ok\":false}}", seq));
            writeln!(out, "{}", js)?;
            out.flush()?;
        }
    }

    Ok(())
}
