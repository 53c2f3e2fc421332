use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::date::UnknownMonthPolicy;
use crate::mods::ExtractOptions;

/// Root configuration structure, deserialized from `.mods-migrate/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dates: DateConfig,
    #[serde(default)]
    pub titles: TitleConfig,
}

/// Date repair settings.
#[derive(Debug, Default, Deserialize)]
pub struct DateConfig {
    /// `fall-through` (default) or the legacy `sentinel`.
    #[serde(default)]
    pub unknown_month: UnknownMonthPolicy,
    /// Extra literal corrections keyed by the exact malformed value.
    #[serde(default)]
    pub corrections: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct TitleConfig {
    /// Records without `<titleInfo>` fail when set. Defaults to `true`.
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl Default for TitleConfig {
    fn default() -> Self {
        TitleConfig { required: true }
    }
}

impl Config {
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            unknown_month: self.dates.unknown_month,
            date_corrections: self.dates.corrections.clone(),
            require_title_info: self.titles.required,
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<workdir>/.mods-migrate/config.toml`
/// 3. `~/.config/mods-migrate/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(workdir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = workdir.join(".mods-migrate").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("mods-migrate").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}
