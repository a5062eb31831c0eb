//! `sdoc routes` command implementation.

use std::path::PathBuf;

use clap::Args;
use sdoc_config::{CliSettings, Config};

use crate::commands::site_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    /// Path to configuration file (default: auto-discover sdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Only list one collection, by identifier (`doc-surrealql`, `doc-sdk-rust`).
    #[arg(long, value_name = "ID")]
    collection: Option<String>,

    /// Print a JSON array instead of one path per line.
    #[arg(long)]
    json: bool,
}

impl RoutesArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = site_from_config(&config, false);
        let paths = match self.collection.as_deref() {
            Some(id) => site.collection_paths(&site.registry().parse(id)?)?,
            None => site.prerender_paths()?,
        };

        if self.json {
            output.data(&serde_json::to_string_pretty(&paths)?);
        } else {
            for path in paths.iter() {
                output.data(path);
            }
        }
        output.info(&format!("{} routes", paths.len()));
        Ok(())
    }
}
