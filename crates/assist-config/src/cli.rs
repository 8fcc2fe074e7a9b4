//! CLI override definitions and application logic.

use clap::Parser;

use crate::{AuthModule, Config};

#[derive(Debug, Clone, Parser, Default)]
pub struct CliOverrides {
    /// Override assistant API base URL, e.g. https://assist.example.com/
    #[arg(long, env = "ASSIST_API_URL")]
    pub api_url: Option<String>,
    /// Override the default client identifier
    #[arg(long = "default-client")]
    pub default_client: Option<String>,
    /// Override HTTP request timeout (seconds)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    /// Override auth module (assist_api, memory)
    #[arg(long)]
    pub auth_module: Option<AuthModule>,
    /// Override log level (trace/debug/info/warn/error)
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) {
    if let Some(v) = &overrides.api_url {
        config.auth.api_base_url = v.clone();
    }
    if let Some(v) = &overrides.default_client {
        config.auth.default_client = v.clone();
    }
    if let Some(v) = overrides.timeout_secs {
        config.auth.timeout_secs = v;
    }
    if let Some(v) = overrides.auth_module {
        config.auth.module = v;
    }
    if let Some(v) = &overrides.log_level {
        config.logging.level = Some(v.clone());
    }
}
