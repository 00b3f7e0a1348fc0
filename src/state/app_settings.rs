use crate::components::theme::Theme;
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_REFRESH_SECS: u64 = 60;

pub const ENV_ENDPOINT: &str = "FESTUI_ENDPOINT";
pub const ENV_REFRESH_SECS: &str = "FESTUI_REFRESH_SECS";
pub const ENV_CATALOG_JSON: &str = "FESTUI_CATALOG_JSON";
pub const ENV_LOG: &str = "FESTUI_LOG";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub endpoint: Option<String>,
    pub refresh_interval: Duration,
    pub catalog_path: Option<PathBuf>,
    pub theme: Theme,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            endpoint: None,
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            catalog_path: None,
            theme: Theme::default(),
        }
    }
}

/// The part of the settings written to disk.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Persisted {
    #[serde(default)]
    theme: Theme,
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let theme = settings_path(&env)
            .and_then(|path| read_persisted(&path))
            .map(|p| p.theme)
            .unwrap_or_default();

        Self {
            full_screen: false,
            log_level: non_blank(ENV_LOG).and_then(|v| LevelFilter::from_str(v.trim()).ok()),
            endpoint: non_blank(ENV_ENDPOINT).map(|v| v.trim().to_string()),
            refresh_interval: parse_refresh_secs(env(ENV_REFRESH_SECS).as_deref()),
            catalog_path: non_blank(ENV_CATALOG_JSON).map(PathBuf::from),
            theme,
        }
    }

    /// Write the persisted preferences. Errors are returned as text for the log pane.
    pub fn save(&self) -> Result<(), String> {
        let path = settings_path(&|key: &str| std::env::var(key).ok())
            .ok_or_else(|| "no config directory (HOME unset)".to_string())?;
        write_persisted(&path, &Persisted { theme: self.theme })
    }
}

/// Seconds between periodic refreshes; unset, unparseable or zero falls back to the default.
pub fn parse_refresh_secs(raw: Option<&str>) -> Duration {
    let secs = raw
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|&s| s > 0)
        .unwrap_or(DEFAULT_REFRESH_SECS);
    Duration::from_secs(secs)
}

fn settings_path(env: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    if let Some(config_dir) = env("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return Some(PathBuf::from(config_dir).join("festui").join("settings.json"));
    }
    if let Some(home) = env("HOME")
        && !home.trim().is_empty()
    {
        return Some(PathBuf::from(home).join(".config").join("festui").join("settings.json"));
    }
    None
}

fn read_persisted(path: &Path) -> Option<Persisted> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(p) => Some(p),
        Err(e) => {
            warn!("ignoring unreadable settings file {}: {e}", path.display());
            None
        }
    }
}

fn write_persisted(path: &Path, persisted: &Persisted) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| format!("create dir failed: {e}"))?;
    }
    let payload =
        serde_json::to_string_pretty(persisted).map_err(|e| format!("serialize settings failed: {e}"))?;
    std::fs::write(path, payload).map_err(|e| format!("write settings failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("festui-test-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn refresh_interval_fallbacks() {
        assert_eq!(parse_refresh_secs(None), Duration::from_secs(60));
        assert_eq!(parse_refresh_secs(Some("0")), Duration::from_secs(60));
        assert_eq!(parse_refresh_secs(Some("soon")), Duration::from_secs(60));
        assert_eq!(parse_refresh_secs(Some(" 15 ")), Duration::from_secs(15));
    }

    #[test]
    fn env_values_are_read_and_blank_ones_ignored() {
        let settings = AppSettings::from_lookup(env_from(&[
            (ENV_ENDPOINT, " https://example.test/exec "),
            (ENV_REFRESH_SECS, "30"),
            (ENV_CATALOG_JSON, "  "),
            (ENV_LOG, "debug"),
        ]));
        assert_eq!(settings.endpoint.as_deref(), Some("https://example.test/exec"));
        assert_eq!(settings.refresh_interval, Duration::from_secs(30));
        assert!(settings.catalog_path.is_none());
        assert_eq!(settings.log_level, Some(LevelFilter::Debug));
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn config_path_prefers_xdg() {
        let env = env_from(&[("XDG_CONFIG_HOME", "/x"), ("HOME", "/home/u")]);
        assert_eq!(settings_path(&env), Some(PathBuf::from("/x/festui/settings.json")));
        let env = env_from(&[("HOME", "/home/u")]);
        assert_eq!(settings_path(&env), Some(PathBuf::from("/home/u/.config/festui/settings.json")));
        assert_eq!(settings_path(&env_from(&[])), None);
    }

    #[test]
    fn persisted_theme_round_trips_through_disk() {
        let dir = scratch_dir("theme");
        let xdg = dir.display().to_string();
        let path = settings_path(&env_from(&[("XDG_CONFIG_HOME", xdg.as_str())])).unwrap();
        write_persisted(&path, &Persisted { theme: Theme::Light }).unwrap();

        let settings = AppSettings::from_lookup(env_from(&[("XDG_CONFIG_HOME", xdg.as_str())]));
        assert_eq!(settings.theme, Theme::Light);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn corrupt_settings_file_falls_back_to_default() {
        let dir = scratch_dir("corrupt");
        std::fs::create_dir_all(dir.join("festui")).unwrap();
        std::fs::write(dir.join("festui").join("settings.json"), "not json").unwrap();
        let xdg = dir.display().to_string();
        let settings = AppSettings::from_lookup(env_from(&[("XDG_CONFIG_HOME", xdg.as_str())]));
        assert_eq!(settings.theme, Theme::Dark);
        let _ = std::fs::remove_dir_all(dir);
    }
}
