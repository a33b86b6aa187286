pub mod error;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::models::{ConfigSource, SiteConfig};
use crate::util::{parse_bool, parse_millis};
use crate::validation::{ConfigWarnings, apply_guard_rails};
use error::ConfigLoadError;

pub const WHATSAPP_NUMBER_VAR: &str = "STAYVIEW_WHATSAPP_NUMBER";
pub const AUTOPLAY_VAR: &str = "STAYVIEW_AUTOPLAY";
pub const INTERVAL_MS_VAR: &str = "STAYVIEW_INTERVAL_MS";

/// Snapshot of environment variables used during loading.
///
/// Loading reads from this map instead of the live process environment, so
/// a `.env` file can be layered in without mutating the process.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Add entries from a dotenv file. Variables already present win.
    pub fn with_env_file(mut self, path: &Path) -> Result<Self, dotenvy::Error> {
        for item in dotenvy::from_path_iter(path)? {
            let (key, value) = item?;
            self.vars.entry(key).or_insert(value);
        }
        Ok(self)
    }

    /// Trimmed value; unset and blank are the same.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: SiteConfig,
    pub source: ConfigSource,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
    env_file: Option<PathBuf>,
    config_path: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            env_file: Some(PathBuf::from(".env")),
            config_path: None,
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory searched for default config files and a relative `.env`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// `None` disables dotenv loading.
    pub fn with_env_file(mut self, env_file: Option<PathBuf>) -> Self {
        self.env_file = env_file;
        self
    }

    /// Explicit config file; takes precedence over every other source.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let mut env = Environment::from_process();
        if let Some(env_file) = &self.env_file {
            let path = self.root.join(env_file);
            if path.exists() {
                env = env.with_env_file(&path)?;
                debug!(path = %path.display(), "layered dotenv file");
            }
        }
        self.load_with(&env)
    }

    pub fn load_with(&self, env: &Environment) -> Result<ConfigLoad, ConfigLoadError> {
        let (mut config, source) = match &self.config_path {
            Some(path) => {
                let config = SiteConfig::load_from_file(path).map_err(ConfigLoadError::Site)?;
                (config, ConfigSource::File(path.clone()))
            }
            None => SiteConfig::resolve(env, &self.root).map_err(ConfigLoadError::Site)?,
        };

        apply_env_overrides(&mut config, env)?;
        let warnings = apply_guard_rails(&config)?;
        for warning in warnings.iter() {
            warn!(%warning, "site configuration");
        }
        info!(%source, properties = config.properties.len(), "site configuration loaded");

        Ok(ConfigLoad {
            config,
            source,
            warnings,
        })
    }
}

fn apply_env_overrides(config: &mut SiteConfig, env: &Environment) -> Result<(), ConfigLoadError> {
    if let Some(number) = env.get(WHATSAPP_NUMBER_VAR) {
        config.contact.whatsapp_number = number.to_string();
    }

    if let Some(raw) = env.get(AUTOPLAY_VAR) {
        config.carousel.autoplay = parse_bool(raw).ok_or_else(|| ConfigLoadError::InvalidOverride {
            var: AUTOPLAY_VAR,
            value: raw.to_string(),
        })?;
    }

    if let Some(raw) = env.get(INTERVAL_MS_VAR) {
        let ms = parse_millis(raw).ok_or_else(|| ConfigLoadError::InvalidOverride {
            var: INTERVAL_MS_VAR,
            value: raw.to_string(),
        })?;
        config.carousel.auto_advance_interval = Duration::from_millis(ms);
    }

    Ok(())
}
