//! `sdoc serve`.

use std::path::PathBuf;

use clap::Args;
use sdoc_config::{CliSettings, Config};
use sdoc_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Config file to use instead of the nearest sdoc.toml.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the collections.
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on.
    #[arg(short, long)]
    port: Option<u16>,

    /// Log requests and route resolution.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let overrides = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.source_dir,
            output_dir: None,
        };
        let config = Config::load(self.config.as_deref(), Some(&overrides))?;

        let output = Output::new();
        let collections = &config.collections;
        output.info(&format!(
            "Serving {} areas and {} SDKs from {} at http://{}:{}",
            collections.areas.len(),
            collections.sdks.len(),
            config.docs_resolved.source_dir.display(),
            config.server.host,
            config.server.port,
        ));

        run_server(server_config_from_config(&config, version.to_owned()))
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    }
}
