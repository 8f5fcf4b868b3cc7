//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use dawa_catalog::prelude::*;
use dawa_observability::{LogFormat, LogLevel, QueryId, StructuredLogger};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        if let Some(path) = &config_path {
            output.debug(&format!("Using config: {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }

    /// Catalog file: the `--catalog` flag, else `catalog.path` relative to
    /// the config file's directory.
    pub fn catalog_path(&self, flag: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(self.resolve_path(path));
        }

        let Some(path) = self.config.catalog.path.as_deref() else {
            bail!("No catalog given. Pass --catalog or set catalog.path in dawa.toml.");
        };

        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.cwd);
        Ok(resolve(base, path))
    }

    /// Load and validate the catalog.
    pub fn load_catalog(&self, flag: Option<&str>) -> Result<Catalog> {
        let path = self.catalog_path(flag)?;
        self.output.debug(&format!("Loading catalog: {}", path.display()));

        let catalog = Catalog::load(&path)
            .with_context(|| format!("Invalid catalog: {}", path.display()))?;

        let expected = &self.config.catalog.currency;
        if !catalog.currency().code().eq_ignore_ascii_case(expected) {
            bail!(
                "Catalog {} is priced in {}, but catalog.currency is {}",
                path.display(),
                catalog.currency(),
                expected
            );
        }

        Ok(catalog)
    }

    /// Locale from a flag, else `listing.locale`.
    pub fn locale(&self, flag: Option<&str>) -> Result<Locale> {
        let code = flag.unwrap_or(&self.config.listing.locale);
        match Locale::from_str(code) {
            Some(locale) => Ok(locale),
            None => bail!("Unknown locale '{}'. Expected 'en' or 'ar'.", code),
        }
    }

    /// Logger for one command run. `--verbose` lowers the level to debug.
    pub fn logger(&self, command: &str) -> StructuredLogger {
        let configured = LogLevel::from_str(&self.config.logging.level).unwrap_or_default();
        let level = if self.output.is_verbose() {
            configured.min(LogLevel::Debug)
        } else {
            configured
        };
        let format = LogFormat::from_str(&self.config.logging.format).unwrap_or_default();

        StructuredLogger::new(QueryId::generate())
            .with_command(command)
            .with_min_level(level)
            .with_format(format)
    }
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    })
}
