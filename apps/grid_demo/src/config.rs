use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use card_grid::DEFAULT_GRID_SIZE;
use entity_client::{DEFAULT_API_BASE_URL, DEFAULT_TOTAL_ENTITY_COUNT};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "card_grid.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub grid_size: usize,
    pub simulated_delay_ms: u64,
    pub total_entity_count: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            grid_size: DEFAULT_GRID_SIZE,
            simulated_delay_ms: 0,
            total_entity_count: DEFAULT_TOTAL_ENTITY_COUNT,
        }
    }
}

impl Settings {
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }

    pub fn api_base_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.api_base_url)
            .with_context(|| format!("invalid api base url '{}'", self.api_base_url))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.total_entity_count == 0 {
            bail!("total_entity_count must be at least 1");
        }
        self.api_base_url()?;
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    grid_size: Option<usize>,
    simulated_delay_ms: Option<u64>,
    total_entity_count: Option<u32>,
}

/// Defaults, then the TOML file at `path` if it exists, then environment
/// overrides.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if path.is_file() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        apply_file_overrides(&mut settings, &raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.grid_size {
        settings.grid_size = v;
    }
    if let Some(v) = file_cfg.simulated_delay_ms {
        settings.simulated_delay_ms = v;
    }
    if let Some(v) = file_cfg.total_entity_count {
        settings.total_entity_count = v;
    }
    Ok(())
}

/// `APP__`-prefixed variables win over the bare names.
fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let read = |name: &str| lookup(&format!("APP__{name}")).or_else(|| lookup(name));

    if let Some(v) = read("API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = parsed(read("GRID_SIZE"), "GRID_SIZE") {
        settings.grid_size = v;
    }
    if let Some(v) = parsed(read("SIMULATED_DELAY_MS"), "SIMULATED_DELAY_MS") {
        settings.simulated_delay_ms = v;
    }
    if let Some(v) = parsed(read("TOTAL_ENTITY_COUNT"), "TOTAL_ENTITY_COUNT") {
        settings.total_entity_count = v;
    }
}

fn parsed<T: std::str::FromStr>(value: Option<String>, name: &str) -> Option<T> {
    let value = value?;
    match value.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(setting = name, value = %value, "config: ignoring unparseable override");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
