use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Default business-hours window: candidate slots start on the whole hour
/// from `OPEN_HOUR` up to (but not including) `CLOSE_HOUR`.
pub const DEFAULT_OPEN_HOUR: u32 = 8;
pub const DEFAULT_CLOSE_HOUR: u32 = 18;
/// Default forward search window for relocating a job, in calendar days.
pub const DEFAULT_HORIZON_DAYS: u32 = 7;
/// Default cadence of the rescheduling sweep: once per day.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Top-level config (bizworx.toml + BIZWORX_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BizworxConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Rescheduler tuning knobs. The defaults reproduce the daily sweep over a
/// 7-day horizon with an 08:00–18:00 placement window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between sweeps. The first sweep runs immediately on start.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
    /// First candidate start hour of the day (inclusive).
    #[serde(default = "default_open_hour")]
    pub open_hour: u32,
    /// A slot must end no later than this clock hour.
    #[serde(default = "default_close_hour")]
    pub close_hour: u32,
    /// Number of calendar days (starting today) searched for an open slot.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            open_hour: DEFAULT_OPEN_HOUR,
            close_hour: DEFAULT_CLOSE_HOUR,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

fn default_sweep_interval() -> u64 {
    DEFAULT_SWEEP_INTERVAL_SECS
}
fn default_open_hour() -> u32 {
    DEFAULT_OPEN_HOUR
}
fn default_close_hour() -> u32 {
    DEFAULT_CLOSE_HOUR
}
fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}
fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.bizworx/bizworx.db", home)
}

impl BizworxConfig {
    /// Load config from a TOML file with BIZWORX_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.bizworx/bizworx.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: BizworxConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("BIZWORX_").split("_"))
            .extract()
            .map_err(|e| crate::error::BizworxError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.bizworx/bizworx.toml", home)
}
