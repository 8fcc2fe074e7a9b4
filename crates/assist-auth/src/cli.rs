//! CLI module for assist-auth.
//!
//! Authenticates an account against the configured backend and prints the
//! exported account data. It can be used either as a standalone binary or
//! as a subcommand of the main assist-rs CLI.
//!
//! # Usage
//!
//! ```bash
//! # Log in with a user/password pair
//! assist-auth login --guuid jane@example.com --pwd secret
//!
//! # Log in with a ready-made key and require a role
//! assist-auth login --key "uid1001;<token>" --require-role admin
//!
//! # Show the client password token
//! assist-auth hash secret
//!
//! # Summarize an exported account file
//! assist-auth inspect account.json
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use assist_config::{
    AuthConfig, AuthModule, CliOverrides, LoggingConfig, apply_overrides, load_config_or_default,
    validate_config,
};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    Account, AssistApiAuth, AuthError, Authenticator, CredentialResolver, MemoryAuth,
    RequestParams, hash_client_password,
};

/// Account authentication CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "assist-auth",
    version,
    about = "Authenticate accounts against the assistant API"
)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommands,
}

/// Auth CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommands {
    /// Authenticate and print the account as JSON.
    Login {
        /// Config file path (json/yaml/toml). Defaults apply if it does not exist.
        #[arg(short, long, default_value = "assist.toml")]
        config: PathBuf,

        /// Credential key of the form "<identity>;<secret>".
        #[arg(short, long, env = "ASSIST_KEY", hide_env_values = true)]
        key: Option<String>,

        /// User identity (used with --pwd when no key is given).
        #[arg(short, long)]
        guuid: Option<String>,

        /// Plaintext password (hashed before it is sent).
        #[arg(short, long, env = "ASSIST_PWD", hide_env_values = true)]
        pwd: Option<String>,

        /// Client identifier sent to the auth server.
        #[arg(long)]
        client: Option<String>,

        /// Fail unless the account has this role.
        #[arg(long)]
        require_role: Option<String>,

        #[command(flatten)]
        overrides: CliOverrides,
    },

    /// Show the client password token (for manual key construction).
    Hash {
        /// Password to hash.
        password: String,
    },

    /// Import an exported account file and print a summary.
    Inspect {
        /// Path to the account JSON file.
        file: PathBuf,
    },
}

/// Run the auth CLI with the given arguments.
///
/// This is the main entry point for the auth CLI, used by both the
/// standalone binary and the unified assist-rs CLI.
pub async fn run(args: AuthArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        AuthCommands::Login {
            config,
            key,
            guuid,
            pwd,
            client,
            require_role,
            overrides,
        } => {
            let mut cfg = load_config_or_default(&config)?;
            apply_overrides(&mut cfg, &overrides);
            validate_config(&cfg)?;
            init_tracing(&cfg.logging);

            let params = RequestParams {
                key,
                guuid,
                pwd,
                client,
            };
            login(&cfg.auth, &params, require_role.as_deref()).await
        }
        AuthCommands::Hash { password } => {
            println!("{}", hash_client_password(&password));
            Ok(())
        }
        AuthCommands::Inspect { file } => inspect(&file),
    }
}

/// Build the authenticator selected by the `[auth]` config section.
pub fn build_authenticator(config: &AuthConfig) -> Result<Box<dyn Authenticator>, AuthError> {
    match config.module {
        AuthModule::AssistApi => Ok(Box::new(AssistApiAuth::from_config(config)?)),
        AuthModule::Memory => Ok(Box::new(MemoryAuth::from_config(&config.users))),
    }
}

async fn login(
    config: &AuthConfig,
    params: &RequestParams,
    require_role: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = CredentialResolver::new(&config.default_client);
    let credential = resolver.resolve(params)?;
    let mut auth = build_authenticator(config)?;

    info!(
        module = %config.module,
        user = %credential.identity,
        client = %credential.client,
        "authenticating"
    );

    let mut account = Account::new();
    if !account.authenticate_credential(&credential, &mut auth).await {
        return Err(format!(
            "authentication failed for '{}' (error code {})",
            auth.user_id(),
            auth.error_code()
        )
        .into());
    }

    if let Some(role) = require_role.filter(|role| !account.has_role(role)) {
        return Err(format!("account '{}' lacks role '{role}'", account.user_id()).into());
    }

    println!("{}", serde_json::to_string_pretty(&account.export_json())?);
    Ok(())
}

fn inspect(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&data)?;

    let mut account = Account::new();
    account.import_json(&value)?;

    println!("user id:      {}", account.user_id());
    println!("name:         {}", account.user_name_short());
    println!("language:     {}", account.preferred_language());
    println!("access level: {}", account.access_level());
    println!(
        "roles:        {}",
        account.user_roles().map(|r| r.join(", ")).unwrap_or_default()
    );
    Ok(())
}

/// Initialize tracing subscriber with the given logging configuration.
///
/// Supports:
/// - `level`: Base log level (trace, debug, info, warn, error). Default: warn
/// - `format`: Output format (json, pretty, compact). Default: pretty
/// - `output`: Output target (stdout, stderr). Default: stderr
/// - `filters`: Per-module log level overrides
pub fn init_tracing(config: &LoggingConfig) {
    // Build the env filter from base level and per-module filters
    let base_level = config.level.as_deref().unwrap_or("warn");
    let mut filter_str = base_level.to_string();

    for (module, level) in &config.filters {
        filter_str.push(',');
        filter_str.push_str(module);
        filter_str.push('=');
        filter_str.push_str(level);
    }

    let filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new("warn"));

    let format = config.format.as_deref().unwrap_or("pretty");
    let output = config.output.as_deref().unwrap_or("stderr");

    // stdout carries the account JSON, so logs default to stderr
    let registry = tracing_subscriber::registry().with(filter);
    let result = match (format, output) {
        ("json", "stdout") => registry
            .with(fmt::layer().json().with_writer(io::stdout))
            .try_init(),
        ("json", _) => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
        ("compact", "stdout") => registry
            .with(fmt::layer().compact().with_writer(io::stdout))
            .try_init(),
        ("compact", _) => registry
            .with(fmt::layer().compact().with_writer(io::stderr))
            .try_init(),
        (_, "stdout") => registry.with(fmt::layer().with_writer(io::stdout)).try_init(),
        _ => registry.with(fmt::layer().with_writer(io::stderr)).try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_login_with_password_pair() {
        let args = AuthArgs::try_parse_from([
            "assist-auth",
            "login",
            "--guuid",
            "jane",
            "--pwd",
            "secret",
            "--require-role",
            "admin",
            "--auth-module",
            "memory",
        ])
        .unwrap();
        match args.command {
            AuthCommands::Login {
                guuid,
                pwd,
                require_role,
                overrides,
                ..
            } => {
                assert_eq!(guuid.as_deref(), Some("jane"));
                assert_eq!(pwd.as_deref(), Some("secret"));
                assert_eq!(require_role.as_deref(), Some("admin"));
                assert_eq!(overrides.auth_module, Some(AuthModule::Memory));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn builds_selected_module() {
        let mut config = AuthConfig::default();
        let auth = build_authenticator(&config).unwrap();
        assert_eq!(auth.error_code().as_i32(), 0);

        config.module = AuthModule::Memory;
        assert!(build_authenticator(&config).is_ok());
    }

    #[tokio::test]
    async fn login_against_memory_module() {
        let mut config = AuthConfig::default();
        config.module = AuthModule::Memory;
        config.users.push(assist_config::MemoryUserConfig {
            id: "jane".into(),
            password: "secret".into(),
            access_level: 1,
            nick: None,
            first: None,
            last: None,
            language: None,
            birth: None,
            roles: vec!["Admin".into()],
        });

        let params = RequestParams::with_password("jane", "secret");
        assert!(login(&config, &params, Some("admin")).await.is_ok());
        assert!(login(&config, &params, Some("owner")).await.is_err());

        let params = RequestParams::with_password("jane", "wrong");
        assert!(login(&config, &params, None).await.is_err());

        let params = RequestParams::default();
        assert!(login(&config, &params, None).await.is_err());
    }
}
