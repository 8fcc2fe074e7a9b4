//! Credential resolution from request parameters.
//!
//! A request carries either a ready-made `KEY` of the form
//! `<identity>;<secret>`, or a `GUUID`/`PWD` pair from which the key is
//! built by hashing the password with [`hash_client_password`].

use assist_core::{DEFAULT_CLIENT_INFO, KEY_SEPARATOR};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::hash::hash_client_password;

/// Authentication-related request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParams {
    #[serde(rename = "KEY", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "GUUID", default, skip_serializing_if = "Option::is_none")]
    pub guuid: Option<String>,
    #[serde(rename = "PWD", default, skip_serializing_if = "Option::is_none")]
    pub pwd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

impl RequestParams {
    /// Collect parameters from name/value pairs, e.g. a parsed query string.
    ///
    /// Unknown names are ignored; a repeated name keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (name, value) in pairs {
            let slot = match name.as_ref() {
                "KEY" => &mut params.key,
                "GUUID" => &mut params.guuid,
                "PWD" => &mut params.pwd,
                "client" => &mut params.client,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        params
    }

    /// Parameters carrying a ready-made key.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Parameters carrying a user/password pair.
    pub fn with_password(guuid: impl Into<String>, pwd: impl Into<String>) -> Self {
        Self {
            guuid: Some(guuid.into()),
            pwd: Some(pwd.into()),
            ..Self::default()
        }
    }

    /// Set the client identifier.
    pub fn client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }
}

/// A resolved credential, ready to hand to an [`Authenticator`](crate::Authenticator).
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub identity: String,
    pub secret: String,
    pub client: String,
}

impl Credential {
    /// Split a `<identity>;<secret>` key on its first separator.
    pub fn from_key(key: &str, client: impl Into<String>) -> Result<Self, AuthError> {
        let (identity, secret) = key
            .split_once(KEY_SEPARATOR)
            .ok_or(AuthError::MalformedCredential)?;
        Ok(Self {
            identity: identity.to_owned(),
            secret: secret.to_owned(),
            client: client.into(),
        })
    }

    /// The combined `<identity>;<secret>` key.
    pub fn key(&self) -> String {
        format!("{}{KEY_SEPARATOR}{}", self.identity, self.secret)
    }
}

// Keep secrets out of logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("identity", &self.identity)
            .field("secret", &"<redacted>")
            .field("client", &self.client)
            .finish()
    }
}

/// Builds [`Credential`]s from [`RequestParams`].
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    default_client: String,
}

impl CredentialResolver {
    /// Create a resolver that substitutes `default_client` for a missing client.
    pub fn new(default_client: impl Into<String>) -> Self {
        Self {
            default_client: default_client.into(),
        }
    }

    /// The client identifier used when a request names none.
    pub fn default_client(&self) -> &str {
        &self.default_client
    }

    /// Build the credential key from `params`, without splitting it.
    ///
    /// A non-empty `KEY` wins; otherwise `GUUID` and `PWD` must both be
    /// non-empty.
    pub fn resolve_key(&self, params: &RequestParams) -> Result<String, AuthError> {
        if let Some(key) = non_empty(&params.key) {
            return Ok(key.to_owned());
        }
        match (non_empty(&params.guuid), non_empty(&params.pwd)) {
            (Some(guuid), Some(pwd)) => Ok(format!(
                "{guuid}{KEY_SEPARATOR}{}",
                hash_client_password(pwd)
            )),
            _ => Err(AuthError::MissingCredential),
        }
    }

    /// Resolve `params` into a full credential.
    pub fn resolve(&self, params: &RequestParams) -> Result<Credential, AuthError> {
        let key = self.resolve_key(params)?;
        let client = non_empty(&params.client).unwrap_or(&self.default_client);
        Credential::from_key(&key, client)
    }
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT_INFO)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
