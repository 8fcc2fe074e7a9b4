//! # assist-rs
//!
//! Account authentication against a remote assistant API.
//!
//! ## Crates
//!
//! - [`assist_core`] - Shared constants and default values
//! - [`assist_config`] - Configuration loading and validation
//! - [`assist_auth`] - Credential resolution, authenticators and account snapshots

pub use assist_auth as auth;
pub use assist_config as config;
pub use assist_core as core;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use assist_auth::{
        Account, AssistApiAuth, AuthError, Authenticator, CredentialResolver, ErrorCode,
        MemoryAuth, RequestParams,
    };
    pub use assist_config::{Config, load_config, validate_config};
}
