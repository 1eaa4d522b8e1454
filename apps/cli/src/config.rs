use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::args::CliArgs;

const DEFAULT_CONFIG_FILE: &str = "telemetry.toml";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_STATIC_DIR: &str = "./public";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

const PORT_ENV: &str = "PORT";
const DATA_DIR_ENV: &str = "TELEMETRY_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub busy_timeout_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: ServerConfig,
    /// File the settings came from, if any.
    pub source: Option<PathBuf>,
}

/// Defaults, then the TOML file, then environment, then command line.
pub fn load(args: &CliArgs) -> Result<ConfigLoad, String> {
    load_with_env(args, |key| std::env::var(key).ok())
}

fn load_with_env(
    args: &CliArgs,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ConfigLoad, String> {
    let (mut config, source) = match &args.config {
        Some(path) => (read_file(path)?, Some(path.clone())),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if path.exists() {
                (read_file(&path)?, Some(path))
            } else {
                (ServerConfig::default(), None)
            }
        }
    };

    if let Some(value) = env(PORT_ENV).filter(|value| !value.trim().is_empty()) {
        config.port = value
            .trim()
            .parse()
            .map_err(|_| format!("invalid {PORT_ENV} value: {value}"))?;
    }
    if let Some(value) = env(DATA_DIR_ENV).filter(|value| !value.trim().is_empty()) {
        config.data_dir = PathBuf::from(value);
    }

    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(dir) = &args.static_dir {
        config.static_dir = dir.clone();
    }

    validate(&config)?;
    Ok(ConfigLoad { config, source })
}

/// A lock wait must give up before the request does, or a timed-out write
/// could still land after its 500.
fn validate(config: &ServerConfig) -> Result<(), String> {
    if config.request_timeout_secs == 0 {
        return Err("request_timeout_secs must be at least 1".to_string());
    }
    if config.busy_timeout() >= config.request_timeout() {
        return Err(format!(
            "busy_timeout_ms ({}) must be shorter than request_timeout_secs ({}s)",
            config.busy_timeout_ms, config.request_timeout_secs
        ));
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<ServerConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("read config {}: {}", path.display(), err))?;
    toml::from_str(&contents).map_err(|err| format!("parse config {}: {}", path.display(), err))
}
