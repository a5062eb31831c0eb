//! `sdoc.toml` loading.
//!
//! A config file is looked up in this order: the path passed on the command
//! line, then the nearest `sdoc.toml` found walking up from the working
//! directory. Without either, built-in defaults rooted at the working
//! directory are used.
//!
//! `server.host`, `docs.source_dir` and `docs.output_dir` may reference the
//! environment as `${VAR}` (must be set) or `${VAR:-fallback}`. Relative
//! directories are anchored at the directory holding the config file.
//! Command-line overrides ([`CliSettings`]) win over everything else.

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

const FILE_NAME: &str = "sdoc.toml";
const DEFAULT_SOURCE_DIR: &str = "content";
const DEFAULT_OUTPUT_DIR: &str = "dist";

pub use sdoc_site::SDK_SEGMENT;

/// Values given on the command line. `None` leaves the file value alone.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub source_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Loaded sdoc configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub collections: CollectionsConfig,
    pub toc: TocConfig,
    #[serde(rename = "docs")]
    docs_paths: PathsSection,

    /// `[docs]` directories after expansion and anchoring.
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// File the configuration came from, if any.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::rooted_at(Path::new("."))
    }
}

/// `[server]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 7979,
        }
    }
}

/// `[docs]` exactly as written in the file.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PathsSection {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Absolute content and output directories.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Root holding one directory per collection.
    pub source_dir: PathBuf,
    /// Where `sdoc build` writes the static site.
    pub output_dir: PathBuf,
}

/// Known content areas and SDKs.
///
/// Each area becomes a `doc-<area>` collection served under `/<area>`, each SDK
/// a `doc-sdk-<sdk>` collection served under `/sdk/<sdk>`.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CollectionsConfig {
    pub areas: Vec<String>,
    pub sdks: Vec<String>,
    /// Prerender each collection root even when it has no `index` document.
    pub landing_pages: bool,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|&n| n.to_owned()).collect();
        Self {
            areas: owned(&[
                "surrealdb",
                "surrealql",
                "surrealist",
                "surrealkv",
                "surrealml",
                "cloud",
            ]),
            sdks: owned(&[
                "rust",
                "javascript",
                "python",
                "golang",
                "java",
                "dotnet",
                "php",
            ]),
            landing_pages: false,
        }
    }
}

/// `[toc]` section.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct TocConfig {
    /// Append `-1`, `-2`, ... to repeated heading IDs.
    pub dedupe_ids: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid sdoc.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// A `${VAR}` reference could not be expanded.
    #[error("{field}: {message}")]
    EnvVar { field: String, message: String },
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation(message.into())
}

/// A name usable as one lowercase URL segment.
fn is_segment(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_'))
}

fn check_names(names: &[String], field: &str) -> Result<(), ConfigError> {
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !is_segment(name) {
            return Err(invalid(format!(
                "{field}: {name:?} is not a lowercase URL segment"
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(invalid(format!("{field}: {name:?} is listed more than once")));
        }
    }
    Ok(())
}

/// Nearest `sdoc.toml` at or above `start`.
fn find_upwards(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(FILE_NAME))
        .find(|candidate| candidate.is_file())
}

impl Config {
    /// Load the configuration and apply command-line overrides.
    ///
    /// # Errors
    ///
    /// Fails when an explicitly named file is missing, the file can't be read
    /// or parsed, an environment reference is unset, or the result is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_owned())),
            Some(path) => Some(path.to_owned()),
            None => std::env::current_dir().ok().and_then(|cwd| find_upwards(&cwd)),
        };

        let mut config = match file {
            Some(path) => Self::read(&path)?,
            None => Self::rooted_at(&std::env::current_dir().unwrap_or_default()),
        };

        if let Some(settings) = cli_settings {
            config.override_with(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&text)?;

        config.interpolate_env()?;
        config.anchor_paths(path.parent().unwrap_or(Path::new(".")));
        config.config_path = Some(path.to_owned());
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Defaults with both directories under `root`.
    fn rooted_at(root: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            collections: CollectionsConfig::default(),
            toc: TocConfig::default(),
            docs_paths: PathsSection::default(),
            docs_resolved: DocsConfig {
                source_dir: root.join(DEFAULT_SOURCE_DIR),
                output_dir: root.join(DEFAULT_OUTPUT_DIR),
            },
            config_path: None,
        }
    }

    fn override_with(&mut self, settings: &CliSettings) {
        let CliSettings {
            host,
            port,
            source_dir,
            output_dir,
        } = settings;

        if let Some(value) = host {
            self.server.host.clone_from(value);
        }
        if let Some(value) = *port {
            self.server.port = value;
        }
        if let Some(value) = source_dir {
            self.docs_resolved.source_dir.clone_from(value);
        }
        if let Some(value) = output_dir {
            self.docs_resolved.output_dir.clone_from(value);
        }
    }

    fn interpolate_env(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        let paths = &mut self.docs_paths;
        for (slot, field) in [
            (&mut paths.source_dir, "docs.source_dir"),
            (&mut paths.output_dir, "docs.output_dir"),
        ] {
            if let Some(raw) = slot.as_deref() {
                *slot = Some(expand::expand_env(raw, field)?);
            }
        }
        Ok(())
    }

    fn anchor_paths(&mut self, base: &Path) {
        let paths = &self.docs_paths;
        self.docs_resolved = DocsConfig {
            source_dir: base.join(paths.source_dir.as_deref().unwrap_or(DEFAULT_SOURCE_DIR)),
            output_dir: base.join(paths.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)),
        };
    }

    /// Check server and collection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(invalid("server.host is empty"));
        }
        if self.server.port == 0 {
            return Err(invalid("server.port must be non-zero"));
        }

        let CollectionsConfig { areas, sdks, .. } = &self.collections;
        if areas.is_empty() && sdks.is_empty() {
            return Err(invalid("collections must list at least one area or sdk"));
        }
        check_names(areas, "collections.areas")?;
        check_names(sdks, "collections.sdks")?;
        if areas.iter().any(|area| area == SDK_SEGMENT) {
            return Err(invalid(format!(
                "collections.areas: {SDK_SEGMENT:?} is reserved for SDK routes"
            )));
        }

        Ok(())
    }
}
