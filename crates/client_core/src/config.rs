use std::{collections::HashMap, fmt, fs, str::FromStr};

use thiserror::Error;
use tracing::warn;

/// Network name that selects the production boundary node.
pub const IC_NETWORK: &str = "ic";
pub const IC_HOST: &str = "https://ic0.app";
pub const LOCAL_HOST: &str = "http://127.0.0.1:4943";

const SETTINGS_FILE: &str = "client.toml";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown execution context '{0}', expected 'client' or 'server'")]
    UnknownExecutionContext(String),
}

/// Where the client is running. Root-key bootstrap only happens on the client side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionContext {
    #[default]
    Client,
    Server,
}

impl FromStr for ExecutionContext {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "server" => Ok(Self::Server),
            _ => Err(ConfigError::UnknownExecutionContext(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkMode {
    Ic,
    Local,
}

impl NetworkMode {
    /// Only the exact name `ic` means production; everything else is local.
    pub fn from_name(name: &str) -> Self {
        if name == IC_NETWORK {
            Self::Ic
        } else {
            Self::Local
        }
    }

    pub fn host(self) -> &'static str {
        match self {
            Self::Ic => IC_HOST,
            Self::Local => LOCAL_HOST,
        }
    }
}

impl fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ic => f.write_str("ic"),
            Self::Local => f.write_str("local"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub canister_id: String,
    pub network: String,
    pub execution_context: ExecutionContext,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canister_id: String::new(),
            network: "local".into(),
            execution_context: ExecutionContext::Client,
        }
    }
}

impl Settings {
    pub fn network_mode(&self) -> NetworkMode {
        NetworkMode::from_name(&self.network)
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

/// Layers defaults, an optional flat TOML document and environment lookups.
pub fn load_settings_from(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("canister_id") {
                    settings.canister_id = v.clone();
                }
                if let Some(v) = file_cfg.get("network") {
                    settings.network = v.clone();
                }
                if let Some(v) = file_cfg.get("execution_context") {
                    apply_execution_context(&mut settings, v);
                }
            }
            Err(err) => warn!("config: ignoring unreadable {SETTINGS_FILE}: {err}"),
        }
    }

    if let Some(v) = env("CANISTER_ID_BACKEND") {
        settings.canister_id = v;
    }
    if let Some(v) = env("APP__CANISTER_ID") {
        settings.canister_id = v;
    }

    if let Some(v) = env("DFX_NETWORK") {
        settings.network = v;
    }
    if let Some(v) = env("APP__NETWORK") {
        settings.network = v;
    }

    if let Some(v) = env("APP__EXECUTION_CONTEXT") {
        apply_execution_context(&mut settings, &v);
    }

    settings
}

fn apply_execution_context(settings: &mut Settings, raw: &str) {
    match raw.parse() {
        Ok(context) => settings.execution_context = context,
        Err(err) => warn!("config: {err}"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
