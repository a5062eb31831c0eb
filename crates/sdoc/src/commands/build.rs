//! `sdoc build` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use sdoc_build::{BuildConfig, StaticSiteBuilder};
use sdoc_config::{CliSettings, Config};

use crate::commands::site_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover sdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Site name appended to page titles.
    #[arg(long, default_value = "Documentation")]
    site_name: String,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let output_dir = &config.docs_resolved.output_dir;

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!("Output: {}", output_dir.display()));

        let site = Arc::new(site_from_config(&config, false));
        let builder = StaticSiteBuilder::new(
            site,
            BuildConfig {
                site_name: self.site_name,
            },
        );
        let summary = builder.build(output_dir)?;

        output.success(&format!(
            "Built {} pages to {}",
            summary.pages,
            output_dir.display()
        ));
        Ok(())
    }
}
