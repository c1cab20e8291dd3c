//! `folio`: terminal admin for a portfolio site's content API.
//!
//! # Usage
//!
//! ```
//! folio --url http://localhost:5000/api
//! folio --config ~/.config/folio/config.toml --route /projects
//! ```

mod app;
mod config;
mod editor;
mod pages;
mod route;
mod ui;

#[cfg(test)]
mod tests;

use std::{
  io,
  path::PathBuf,
  sync::{Mutex, mpsc},
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::{Overrides, Settings};
use crossterm::{
  event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folio_client::{ClientConfig, Dispatcher, FileSessionStore, HttpTransport, PortfolioApi, SessionContext};
use ratatui::{Terminal, backend::CrosstermBackend};
use route::Route;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Terminal admin for portfolio content")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the content API (default: http://localhost:5000/api).
  #[arg(long, env = "FOLIO_URL")]
  url: Option<String>,

  /// Where the signed-in session is stored between runs.
  #[arg(long, value_name = "FILE")]
  session_file: Option<PathBuf>,

  /// Write logs to this file. Nothing is logged without it.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,

  /// Screen to open first, e.g. `/projects` or `/skills/add`.
  #[arg(long, default_value = "/")]
  route: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let overrides = Overrides {
    url:          args.url,
    session_file: args.session_file,
    log_file:     args.log_file,
  };
  let settings = Settings::load(args.config.as_deref(), &overrides)?;
  init_logging(&settings)?;
  tracing::info!(url = %settings.url, "starting");

  let transport = HttpTransport::new(ClientConfig {
    base_url: settings.url.clone(),
    timeout:  Duration::from_secs(settings.timeout_secs),
  })
  .context("building HTTP client")?;
  let session = SessionContext::hydrate(FileSessionStore::new(&settings.session_file));
  let (notifier, notices) = mpsc::channel();
  let api = PortfolioApi::new(Dispatcher::new(transport, session, notifier));
  let mut app = App::new(api, notices);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen, EnableBracketedPaste).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = match terminal.size() {
    Ok(size) => {
      app.resize(size.width, size.height);
      match app.navigate(Route::parse(&args.route)).await {
        Ok(()) => run_event_loop(&mut terminal, &mut app).await,
        Err(e) => Err(e),
      }
    }
    Err(e) => Err(e).context("reading terminal size"),
  };

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  if let Err(e) = &run_result {
    tracing::error!("exiting: {e:#}");
  }
  run_result
}

/// Log to the configured file. `RUST_LOG` takes precedence over the
/// configured filter.
fn init_logging(settings: &Settings) -> Result<()> {
  let Some(path) = &settings.log_file else {
    return Ok(());
  };
  if let Some(dir) = path.parent() {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
  }
  let file = std::fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("opening log file {}", path.display()))?;

  let filter = match EnvFilter::try_from_default_env() {
    Ok(filter) => filter,
    Err(_) => EnvFilter::try_new(&settings.log_filter)
      .with_context(|| format!("invalid log filter {:?}", settings.log_filter))?,
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();
  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    app.tick();
    terminal.draw(|f| ui::draw(f, &*app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    match maybe_event {
      Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key).await? {
          break;
        }
      }
      Some(Event::Paste(text)) => app.handle_paste(&text)?,
      Some(Event::Resize(width, height)) => app.resize(width, height),
      _ => {}
    }
  }

  Ok(())
}
