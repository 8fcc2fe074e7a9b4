//! Default configuration values.
//!
//! Centralized default constants for use across all crates.

// ============================================================================
// Remote API Defaults
// ============================================================================

/// Default base URL of the assistant API (the auth endpoint is appended).
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:20721/";
/// Path of the authentication endpoint, relative to the API base URL.
pub const AUTH_ENDPOINT_PATH: &str = "authentication";
/// Default client identifier sent when a request does not name one.
pub const DEFAULT_CLIENT_INFO: &str = "web_app_v1.0.0";
/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Account Defaults
// ============================================================================

/// Access level of an account that has not been authenticated.
pub const DEFAULT_ACCESS_LEVEL: i32 = -1;
/// Access level granted to config-defined accounts (password proof).
pub const DEFAULT_MEMORY_ACCESS_LEVEL: i32 = 1;
/// Default account language (ISO-639 code).
pub const DEFAULT_LANGUAGE: &str = "en";
/// Display name used when an account has no usable name parts.
pub const DEFAULT_SHORT_NAME: &str = "Boss";

// ============================================================================
// Credential Defaults
// ============================================================================

/// Separator between identity and secret in a credential key.
pub const KEY_SEPARATOR: char = ';';
/// Salt appended to client passwords before hashing.
pub const CLIENT_PASSWORD_SALT: &str = "salty1";
