use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api: Option<ApiConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
}

/// Platform config directory path: `<config_dir>/kartei/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("kartei").join("config.toml"))
}

/// Load config by cascading CWD `.kartei.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".kartei.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        api: Some(ApiConfig {
            url: overlay
                .api
                .as_ref()
                .and_then(|a| a.url.clone())
                .or_else(|| base.api.as_ref().and_then(|a| a.url.clone())),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
                .or_else(|| base.display.as_ref().and_then(|d| d.theme.clone())),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_overlay_values() {
        let base = ConfigFile {
            api: Some(ApiConfig {
                url: Some("http://base".into()),
            }),
            display: Some(DisplayConfig {
                theme: Some("hacker".into()),
            }),
        };
        let overlay = ConfigFile {
            api: Some(ApiConfig {
                url: Some("http://overlay".into()),
            }),
            display: None,
        };

        let merged = merge(base, overlay);
        assert_eq!(merged.api.unwrap().url.unwrap(), "http://overlay");
        assert_eq!(merged.display.unwrap().theme.unwrap(), "hacker");
    }
}
