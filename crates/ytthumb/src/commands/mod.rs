//! CLI command implementations.

pub(crate) mod fetch;
pub(crate) mod process;

pub(crate) use fetch::FetchArgs;
pub(crate) use process::ProcessArgs;

use std::path::PathBuf;

use clap::Args;
use ytthumb_config::{CliSettings, Config};
use ytthumb_core::{HttpSource, ThumbnailReplacer, ThumbnailSettings};

use crate::error::CliError;
use crate::output::Output;

/// Options shared by all commands.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover ytthumb.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site output directory (overrides OUTPUT_PATH).
    #[arg(short, long, env = "YTTHUMB_OUTPUT_PATH")]
    output_path: Option<PathBuf>,

    /// Base URL prepended to image paths (overrides SITEURL).
    #[arg(long)]
    site_url: Option<String>,

    /// Composite the play-button logo onto thumbnails (default: enabled).
    #[arg(long)]
    overlay: Option<bool>,

    /// Store thumbnails exactly as downloaded.
    #[arg(long, conflicts_with = "overlay")]
    no_overlay: bool,

    /// Enable verbose output (log every fetch).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration with command-line overrides applied.
    pub(crate) fn load_config(self) -> Result<Config, CliError> {
        let add_overlay = self.no_overlay.then_some(false).or(self.overlay);
        let cli_settings = CliSettings {
            output_path: self.output_path,
            site_url: self.site_url,
            add_overlay,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Build an HTTP-backed replacer from the resolved configuration.
pub(crate) fn replacer_from_config(config: &Config) -> ThumbnailReplacer<HttpSource> {
    let settings = ThumbnailSettings::new(&config.output_path)
        .with_site_url(&config.site_url)
        .with_overlay(config.add_overlay);
    ThumbnailReplacer::with_source(settings, HttpSource::new(config.fetch_timeout))
}

/// Print the effective settings.
pub(crate) fn print_settings(output: &Output, config: &Config) {
    if let Some(path) = &config.config_path {
        output.detail(&format!("Config: {}", path.display()));
    }
    output.detail(&format!("Output path: {}", config.output_path.display()));
    output.detail(&format!("Thumbnails: {}", config.thumbnail_dir().display()));
    if config.add_overlay {
        output.detail("Overlay: enabled");
    } else {
        output.detail("Overlay: disabled");
    }
}
