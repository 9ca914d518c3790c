use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use client_core::DEFAULT_SERVER_URL;

const DEFAULT_CONFIG_FILE: &str = "calculator.toml";
const DEFAULT_ERROR_REVERT_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub data_dir: PathBuf,
    pub error_revert_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            data_dir: default_data_dir(),
            error_revert_delay_ms: DEFAULT_ERROR_REVERT_DELAY_MS,
        }
    }
}

impl Settings {
    pub fn error_revert_delay(&self) -> Duration {
        Duration::from_millis(self.error_revert_delay_ms)
    }

    pub fn with_cli_overrides(mut self, server_url: Option<String>, data_dir: Option<PathBuf>) -> Self {
        if let Some(server_url) = server_url {
            self.server_url = server_url;
        }
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }
        self
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("calculator")
}

/// Defaults, then the TOML file, then environment variables.
pub fn load_settings(config_path: Option<&Path>) -> Settings {
    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, path);
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn apply_file_overrides(settings: &mut Settings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };
    match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
        Ok(file_cfg) => {
            if let Some(v) = file_cfg.get("server_url").and_then(toml::Value::as_str) {
                settings.server_url = v.to_string();
            }
            if let Some(v) = file_cfg.get("data_dir").and_then(toml::Value::as_str) {
                settings.data_dir = PathBuf::from(v);
            }
            if let Some(v) = file_cfg
                .get("error_revert_delay_ms")
                .and_then(toml::Value::as_integer)
                .and_then(|v| u64::try_from(v).ok())
            {
                settings.error_revert_delay_ms = v;
            }
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "ignoring malformed config file: {err}");
        }
    }
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("CALCULATOR_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = lookup("CALCULATOR_DATA_DIR") {
        settings.data_dir = PathBuf::from(v);
    }

    if let Some(v) = lookup("APP__ERROR_REVERT_DELAY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.error_revert_delay_ms = parsed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_point_at_local_service() {
        let settings = Settings::default();
        assert_eq!(settings.server_url, "http://127.0.0.1:8000");
        assert_eq!(settings.error_revert_delay(), Duration::from_millis(1500));
        assert!(settings.data_dir.ends_with("calculator"));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("calculator.toml");
        fs::write(
            &path,
            "server_url = \"https://calc.example.com\"\ndata_dir = \"/tmp/calc\"\nerror_revert_delay_ms = 250\n",
        )
        .expect("write config");

        let mut settings = Settings::default();
        apply_file_overrides(&mut settings, &path);

        assert_eq!(settings.server_url, "https://calc.example.com");
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/calc"));
        assert_eq!(settings.error_revert_delay_ms, 250);
    }

    #[test]
    fn malformed_file_is_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("calculator.toml");
        fs::write(&path, "server_url = [unterminated").expect("write config");

        let mut settings = Settings::default();
        apply_file_overrides(&mut settings, &path);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn app_prefixed_env_wins_over_plain_env() {
        let mut settings = Settings::default();
        apply_env_overrides(
            &mut settings,
            env_from(&[
                ("CALCULATOR_SERVER_URL", "http://plain:1"),
                ("APP__SERVER_URL", "http://prefixed:2"),
                ("APP__ERROR_REVERT_DELAY_MS", "not-a-number"),
            ]),
        );

        assert_eq!(settings.server_url, "http://prefixed:2");
        assert_eq!(settings.error_revert_delay_ms, 1500);
    }

    #[test]
    fn cli_flags_override_everything() {
        let settings = Settings::default().with_cli_overrides(
            Some("http://cli:3".to_string()),
            Some(PathBuf::from("/var/calc")),
        );
        assert_eq!(settings.server_url, "http://cli:3");
        assert_eq!(settings.data_dir, PathBuf::from("/var/calc"));
    }
}
