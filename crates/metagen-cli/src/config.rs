//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, not here)
//! 2. Environment variables: `METAGEN__GENERATION__EXTENSION=kt`
//! 3. Config file: `--config FILE`, else the platform config dir
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Root the named templates are registered from.
    pub templates_dir: PathBuf,
    /// Root generated artifacts are written under.
    pub output_dir: PathBuf,
    /// Extension appended to generated artifacts, without the dot.
    pub extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig {
                templates_dir: PathBuf::from("templates"),
                output_dir: PathBuf::from("generated"),
                extension: "java".into(),
            },
            output: OutputConfig { no_color: false },
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default(
                "generation.templates_dir",
                path_str(&defaults.generation.templates_dir),
            )?
            .set_default("generation.output_dir", path_str(&defaults.generation.output_dir))?
            .set_default("generation.extension", defaults.generation.extension)?
            .set_default("output.no_color", defaults.output.no_color)?;

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder.add_source(File::from(Self::config_path()).required(false)),
        };

        let config = builder
            .add_source(
                Environment::with_prefix("METAGEN")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs`, falling back to `.metagen.toml` in
    /// the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "metagen", "metagen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".metagen.toml"))
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
