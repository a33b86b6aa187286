mod contact;
mod property;

pub use contact::ContactConfig;
pub use property::PropertyConfig;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use stayview_core::{CarouselOptions, LightboxOptions};

use crate::loader::Environment;

pub const CONFIG_PATH_VAR: &str = "STAYVIEW_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "STAYVIEW_CONFIG_JSON";

/// Source that produced the site configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => f.write_str("built-in defaults"),
            ConfigSource::EnvPath(path) => {
                write!(f, "${CONFIG_PATH_VAR} ({})", path.display())
            }
            ConfigSource::EnvInline => write!(f, "${CONFIG_JSON_VAR}"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Everything the site pages need to drive the engines.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    pub contact: ContactConfig,
    pub properties: Vec<PropertyConfig>,
    /// Hero slider tuning; see [`CarouselOptions`] for the keys.
    pub carousel: CarouselOptions,
    pub lightbox: LightboxOptions,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            contact: ContactConfig::default(),
            properties: property::default_properties(),
            carousel: CarouselOptions::default(),
            lightbox: LightboxOptions::default(),
        }
    }
}

impl SiteConfig {
    /// Resolve the configuration document.
    /// Evaluation order:
    /// 1) `$STAYVIEW_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$STAYVIEW_CONFIG_JSON` (inline JSON),
    /// 3) `stayview.toml`/`stayview.json` under `root`, then under `root/config`,
    /// 4) defaults.
    pub fn resolve(env: &Environment, root: &Path) -> anyhow::Result<(Self, ConfigSource)> {
        if let Some(path_str) = env.get(CONFIG_PATH_VAR) {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = env.get(CONFIG_JSON_VAR) {
            let parsed = Self::parse_json(raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            return Ok((parsed, ConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file(root) {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((Self::default(), ConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read site config from {}", path.display()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents)
                .with_context(|| format!("invalid site config {}", path.display())),
            Some("toml") | Some("tml") => toml::from_str(&contents)
                .map_err(|err| anyhow!("invalid site config {}: {}", path.display(), err)),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse site config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).map_err(|err| anyhow!("invalid site config json: {err}"))
    }

    pub fn property(&self, slug: &str) -> Option<&PropertyConfig> {
        self.properties.iter().find(|p| p.slug == slug)
    }

    fn find_default_file(root: &Path) -> Option<PathBuf> {
        const CANDIDATES: &[&str] = &[
            "stayview.toml",
            "stayview.json",
            "config/stayview.toml",
            "config/stayview.json",
        ];

        CANDIDATES
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|path| path.exists())
    }
}
