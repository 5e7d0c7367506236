use crate::anim::{
    DEFAULT_BACKGROUND, DEFAULT_INTERVAL_MS, DEFAULT_NODES, DEFAULT_STEP, DEFAULT_STROKE,
    DEFAULT_STROKE_DIVISOR,
};
use derive_more::{Deref, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgb;
use palette::rgb::FromHexError;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// What the frame driver does once a segment settles.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DriverMode {
    /// Stop ticking; the next tap moves the next segment.
    #[default]
    #[strum(serialize = "step", serialize = "single", serialize = "tap")]
    Step,
    /// Start the next segment right away and keep bouncing.
    #[strum(serialize = "continuous", serialize = "loop", serialize = "perpetual")]
    Continuous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deref, From, Into, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub fn into_f64(self) -> Srgb<f64> {
        self.0.into_format()
    }
}

impl FromStr for HexColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<Srgb<u8>>().map(Self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

fn default_color(hex: &str) -> HexColor {
    HexColor::from_str(hex).unwrap_or(HexColor(Srgb::new(0, 0, 0)))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub nodes: usize,
    pub step: f64,
    pub interval_ms: u64,
    pub mode: DriverMode,
}

impl AnimationConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            nodes: DEFAULT_NODES,
            step: DEFAULT_STEP,
            interval_ms: DEFAULT_INTERVAL_MS,
            mode: DriverMode::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StyleConfig {
    pub background: HexColor,
    pub stroke: HexColor,
    pub stroke_divisor: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background: default_color(DEFAULT_BACKGROUND),
            stroke: default_color(DEFAULT_STROKE),
            stroke_divisor: DEFAULT_STROKE_DIVISOR,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub fullscreen: bool,
    pub width: i32,
    pub height: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Line Rotate".to_string(),
            fullscreen: true,
            width: 480,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub animation: AnimationConfig,
    pub style: StyleConfig,
    pub window: WindowConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        let animation = &self.animation;

        if animation.nodes == 0 {
            return invalid("animation.nodes must be at least 1");
        }
        if !animation.step.is_finite() || animation.step <= 0.0 || animation.step > 1.0 {
            return invalid("animation.step must be in (0, 1]");
        }
        if animation.interval_ms == 0 {
            return invalid("animation.interval_ms must be at least 1");
        }
        if !self.style.stroke_divisor.is_finite() || self.style.stroke_divisor <= 0.0 {
            return invalid("style.stroke_divisor must be positive");
        }
        Ok(())
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
    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "linerotate", "linerotate")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Makes `path` absolute against the working directory. Watcher events carry absolute paths,
/// so a relative config path would never match them.
pub fn resolve_config_path(path: PathBuf) -> PathBuf {
    match std::path::absolute(&path) {
        Ok(abs) => abs,
        Err(e) => {
            log::warn!("Failed to resolve {}: {}", path.display(), e);
            path
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("LINEROTATE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_or_default(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };

    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config from {}: {}", path.display(), e);
            Config::default()
        }
    }
}

pub fn write_default_config(path: &Path) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>, config_path: PathBuf) {
    let config_path = resolve_config_path(config_path);
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

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
