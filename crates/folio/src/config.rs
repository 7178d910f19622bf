use directories::ProjectDirs;
use folio_core::content::{Content, ContentError};
use folio_core::selection::TRANSITION_DELAY;
use folio_core::submit::DEFAULT_ENDPOINT;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MotionConfig {
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            transition_ms: default_transition_ms(),
        }
    }
}

fn default_transition_ms() -> u64 {
    TRANSITION_DELAY.as_millis() as u64
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub content: Option<PathBuf>,
    #[serde(default)]
    pub resume: Option<PathBuf>,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub motion: MotionConfig,
}

impl Config {
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.motion.transition_ms)
    }

    /// `override_path` (from the command line) wins over the configured
    /// document; with neither, the bundled sample is used.
    pub fn load_content(&self, override_path: Option<&Path>) -> Result<Content, ContentError> {
        match override_path.or(self.content.as_deref()) {
            Some(path) => Content::load(path),
            None => Content::sample(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "folio", "folio").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// `FOLIO_CONTACT__ENDPOINT` overrides `contact.endpoint`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("FOLIO")
        .prefix_separator("_")
        .separator("__")
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

fn watch_dir(
    dir: &Path,
    events: Sender<notify::Result<notify::Event>>,
) -> Result<RecommendedWatcher, ConfigError> {
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = events.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    // dropping the watcher stops the events
    let _watcher = match watch_dir(&config_dir, bridge_tx) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to watch config directory: {}", e);
            return;
        }
    };

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("");
        assert_eq!(config.contact.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.transition_delay(), TRANSITION_DELAY);
        assert!(config.content.is_none());
    }

    #[test]
    fn test_default_config_file_parses() {
        let config = parse(DEFAULT_CONFIG);
        assert_eq!(config.motion.transition_ms, 150);
        assert_eq!(config.contact.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_overrides() {
        let config = parse(
            r#"
content = "/srv/portfolio/content.json"

[contact]
endpoint = "https://relay.example/f/abc"

[motion]
transition_ms = 0
"#,
        );
        assert_eq!(config.contact.endpoint, "https://relay.example/f/abc");
        assert_eq!(config.transition_delay(), Duration::ZERO);
        assert_eq!(
            config.content.as_deref(),
            Some(Path::new("/srv/portfolio/content.json"))
        );
    }

    fn parse_with_env(vars: &[(&str, &str)]) -> Config {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_env_overrides_endpoint() {
        let config = parse_with_env(&[("FOLIO_CONTACT__ENDPOINT", "https://relay.example/f/env")]);
        assert_eq!(config.contact.endpoint, "https://relay.example/f/env");
    }

    #[test]
    fn test_unrelated_env_is_ignored() {
        let config = parse_with_env(&[("OTHER_CONTACT__ENDPOINT", "https://relay.example/f/no")]);
        assert_eq!(config.contact.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_watch_missing_dir_is_notify_error() {
        let (tx, _rx) = async_channel::unbounded();
        let result = watch_dir(Path::new("/nonexistent/folio-config-dir"), tx);
        assert!(matches!(result, Err(ConfigError::Notify(_))));
    }

    #[test]
    fn test_content_falls_back_to_sample() {
        let content = Config::default().load_content(None).unwrap();
        assert!(!content.experience.is_empty());

        let missing = Config::default().load_content(Some(Path::new("/nonexistent/content.json")));
        assert!(matches!(missing, Err(ContentError::Io(_))));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.motion.transition_ms, 150);
    }
}
