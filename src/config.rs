use eyre::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::export::{DirectoryDownload, ExportFormat};
use crate::share::{ClipboardShare, CommandShare};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub catalog: CatalogConfig,
    pub export: ExportConfig,
    pub share: ShareConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Override the bundled catalog with a YAML file
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Where exports land; platform download dir when unset
    pub dir: Option<PathBuf>,
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Page the shared link points at
    pub base_url: String,
    /// Platform share command; `{title}`, `{text}`, `{url}` are substituted
    pub command: Option<String>,
    /// Clipboard commands tried in order when sharing falls back
    pub clipboard_commands: Vec<String>,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/".to_string(),
            command: None,
            clipboard_commands: vec![
                "pbcopy".to_string(),
                "wl-copy".to_string(),
                "xclip -selection clipboard".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub tick_rate_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            catalog: CatalogConfig::default(),
            export: ExportConfig::default(),
            share: ShareConfig::default(),
            tui: TuiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Load the configured catalog, or the bundled one
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog.path {
            Some(path) => {
                Catalog::from_file(path).context(format!("Failed to load catalog from {}", path.display()))
            }
            None => Catalog::builtin().context("Failed to load bundled catalog"),
        }
    }

    /// Log filter from `log_level`, falling back to info when unset or unknown
    pub fn log_filter(&self) -> LevelFilter {
        let Some(level) = self.log_level.as_deref() else {
            return LevelFilter::Info;
        };
        level.parse().unwrap_or_else(|_| {
            log::warn!("Unknown log_level '{}', using info", level);
            LevelFilter::Info
        })
    }

    /// Download sink for exports
    pub fn download(&self) -> DirectoryDownload {
        match &self.export.dir {
            Some(dir) => DirectoryDownload::new(dir),
            None => DirectoryDownload::platform_default(),
        }
    }

    /// Platform share target, when one is configured
    pub fn share_command(&self) -> Option<CommandShare> {
        self.share
            .command
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(CommandShare::new)
    }

    /// Clipboard fallback target
    pub fn clipboard(&self) -> ClipboardShare {
        ClipboardShare::new(self.share.clipboard_commands.iter().cloned())
    }
}
