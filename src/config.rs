// src/config.rs
use std::path::{Path, PathBuf};
use anyhow::Context;
use serde::Deserialize;
use crate::telemetry::source::MAX_NOISE;
pub const CONFIG_ENV: &str = "ACCEL_GAUGE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "accel_gauge.json";
pub const MAX_PRECISION: usize = 8;
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Digits after the decimal point on every gauge.
    pub precision: usize,
    /// Number of simulated accelerometer groups.
    pub accelerometers: usize,
    pub frame_interval_ms: u64,
    /// Peak uniform noise added to simulated samples (m/s²).
    pub noise: f64,
    /// Newline-delimited JSON frames to replay instead of simulating.
    pub replay_path: Option<PathBuf>,
}
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            precision: 2,
            accelerometers: 2,
            frame_interval_ms: 50,
            noise: 0.15,
            replay_path: None,
        }
    }
}
impl AppConfig {
    /// Loads `path`, falling back to defaults if the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))
    }
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let mut config: Self = serde_json::from_str(text)?;
        config.precision = config.precision.min(MAX_PRECISION);
        config.frame_interval_ms = config.frame_interval_ms.max(1);
        config.noise = if config.noise.is_finite() {
            config.noise.abs().min(MAX_NOISE)
        } else {
            Self::default().noise
        };
        Ok(config)
    }
    pub fn path_from_env() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}
