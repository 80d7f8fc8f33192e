use config::{Config, ConfigError, Environment, File};
use domain::settings::FarmSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_probe_interval")]
    pub probe_interval_secs: u64,
}

fn default_poll_interval() -> u64 {
    15
}
fn default_probe_interval() -> u64 {
    5
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PrinterConfig {
    #[serde(default = "default_printer_enabled")]
    pub enabled: bool,
    #[serde(default = "default_printer_host")]
    pub host: String,
    #[serde(default = "default_printer_port")]
    pub port: u16,

    // Extended config for File/Shared printers
    pub r#type: Option<String>, // "Network" (default) or "File"
    pub path: Option<String>,   // Required if type is "File"
}

fn default_printer_enabled() -> bool {
    false
}
fn default_printer_host() -> String {
    "127.0.0.1".to_string()
}
fn default_printer_port() -> u16 {
    9100
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TerminalConfig {
    /// Recorded as `createdBy` on new sessions
    pub operator: String,
    pub remote: RemoteConfig,
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    #[serde(default)]
    pub printer: Option<PrinterConfig>,
    #[serde(default)]
    pub farm: Option<FarmSettings>,
}

fn default_storage_path() -> String {
    "data/terminal.db".to_string()
}

impl TerminalConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start with default settings
            .set_default("remote.base_url", "http://localhost:8080")?
            // Base config file - required so the terminal never starts half-configured
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(true))
            // Per-device overrides
            .add_source(File::with_name(&format!("{}/local", config_dir)).required(false))
            // Run-mode overlay (development, production, ...)
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Environment variables (e.g. TIMBANG__REMOTE__BASE_URL=https://...)
            .add_source(Environment::with_prefix("TIMBANG").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
