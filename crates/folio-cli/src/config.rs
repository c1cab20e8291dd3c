//! Layered settings: defaults, then an optional TOML file, then `FOLIO_*`
//! environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

pub const DEFAULT_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_SESSION_FILE: &str = "~/.config/folio/session.json";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
  /// API base URL.
  pub url:          String,
  /// Where the signed-in session is kept between runs.
  pub session_file: PathBuf,
  pub timeout_secs: u64,
  /// Log destination. Without one, nothing is logged: the terminal belongs
  /// to the UI.
  pub log_file:     Option<PathBuf>,
  /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or
  /// `folio_client=debug`.
  pub log_filter:   String,
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub url:          Option<String>,
  pub session_file: Option<PathBuf>,
  pub log_file:     Option<PathBuf>,
}

impl Settings {
  pub fn load(file: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Self> {
    let mut builder = config::Config::builder()
      .set_default("url", DEFAULT_URL)?
      .set_default("session_file", DEFAULT_SESSION_FILE)?
      .set_default("timeout_secs", 30)?
      .set_default("log_filter", "info")?;

    if let Some(path) = file {
      builder = builder.add_source(config::File::from(path).required(true));
    }
    builder = builder
      .add_source(config::Environment::with_prefix("FOLIO"))
      .set_override_option("url", overrides.url.clone())?
      .set_override_option(
        "session_file",
        overrides.session_file.as_ref().map(|p| p.to_string_lossy().into_owned()),
      )?
      .set_override_option(
        "log_file",
        overrides.log_file.as_ref().map(|p| p.to_string_lossy().into_owned()),
      )?;

    let mut settings: Settings = builder
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise settings")?;

    settings.session_file = expand_tilde(&settings.session_file);
    settings.log_file = settings.log_file.as_deref().map(expand_tilde);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
