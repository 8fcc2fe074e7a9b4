//! Configuration types.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which authenticator the CLI composition root builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthModule {
    /// Remote assistant API over HTTP.
    #[default]
    AssistApi,
    /// Users listed in the config file; no network access.
    Memory,
}

impl AuthModule {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthModule::AssistApi => "assist_api",
            AuthModule::Memory => "memory",
        }
    }
}

impl fmt::Display for AuthModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthModule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assist_api" | "assist-api" | "api" => Ok(AuthModule::AssistApi),
            "memory" => Ok(AuthModule::Memory),
            other => Err(format!("unknown auth module: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub module: AuthModule,
    /// Base URL of the assistant API, e.g. `https://assist.example.com/`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Client identifier used when a request does not carry one.
    #[serde(default = "default_client")]
    pub default_client: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Accounts served by the `memory` module.
    #[serde(default)]
    pub users: Vec<MemoryUserConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            module: AuthModule::default(),
            api_base_url: default_api_base_url(),
            default_client: default_client(),
            timeout_secs: default_timeout_secs(),
            users: Vec::new(),
        }
    }
}

/// A single account for the `memory` auth module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryUserConfig {
    pub id: String,
    /// Plaintext password; hashed the same way clients hash it.
    pub password: String,
    #[serde(default = "default_access_level")]
    pub access_level: i32,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub birth: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: Option<String>,
    /// Log format: json, pretty, or compact. Default: pretty.
    pub format: Option<String>,
    /// Output target: stdout or stderr. Default: stderr.
    pub output: Option<String>,
    /// Per-module log level filters (e.g., {"assist_auth": "debug", "reqwest": "warn"}).
    #[serde(default)]
    pub filters: HashMap<String, String>,
}
