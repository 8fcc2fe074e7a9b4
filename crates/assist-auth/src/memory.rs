//! In-memory authentication backend.

use std::collections::HashMap;

use assist_config::MemoryUserConfig;
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::hash::hash_client_password;
use crate::result::{BasicInfo, ErrorCode, UserName};
use crate::traits::Authenticator;

#[derive(Debug, Clone)]
struct MemoryUser {
    /// Client password token, as produced by [`hash_client_password`].
    secret: String,
    access_level: i32,
    info: BasicInfo,
}

/// Authenticator backed by a fixed set of accounts.
///
/// Suitable for offline use and tests. Identities are matched
/// case-insensitively and secrets are compared against the client password
/// token, so requests built from a `GUUID`/`PWD` pair work unchanged.
/// Unknown users and wrong secrets are reported as rejections; this backend
/// never produces transport errors.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuth {
    /// Map from lower-cased identity to account
    users: HashMap<String, MemoryUser>,
    user_id: String,
    access_level: i32,
    basic_info: BasicInfo,
    error_code: ErrorCode,
}

impl MemoryAuth {
    /// Create a new empty auth backend.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from the `[[auth.users]]` config entries.
    pub fn from_config(users: &[MemoryUserConfig]) -> Self {
        let mut auth = Self::new();
        for user in users {
            let name = UserName {
                nick: user.nick.clone(),
                first: user.first.clone(),
                last: user.last.clone(),
            };
            let info = BasicInfo {
                user_name: (!name.is_empty()).then_some(name),
                language: user.language.clone(),
                birth: user.birth.clone(),
                roles: Some(user.roles.clone()),
                extra: Default::default(),
            };
            auth.add_password(&user.id, &user.password, user.access_level, info);
        }
        auth
    }

    /// Add a user with a plaintext password.
    #[inline]
    pub fn add_password(
        &mut self,
        identity: &str,
        password: &str,
        access_level: i32,
        info: BasicInfo,
    ) {
        self.add_token(identity, hash_client_password(password), access_level, info);
    }

    /// Add a user with a pre-computed client password token.
    #[inline]
    pub fn add_token(
        &mut self,
        identity: &str,
        token: String,
        access_level: i32,
        info: BasicInfo,
    ) {
        self.users.insert(
            identity.to_lowercase(),
            MemoryUser {
                secret: token,
                access_level,
                info,
            },
        );
    }

    /// Remove a user by identity.
    #[inline]
    pub fn remove(&mut self, identity: &str) -> bool {
        self.users.remove(&identity.to_lowercase()).is_some()
    }

    /// Get the number of registered users.
    #[inline]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check if no users are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Check if an identity is registered.
    #[inline]
    pub fn contains(&self, identity: &str) -> bool {
        self.users.contains_key(&identity.to_lowercase())
    }
}

#[async_trait]
impl Authenticator for MemoryAuth {
    async fn authenticate(&mut self, identity: &str, secret: &str, _client: &str) -> bool {
        let identity = identity.to_lowercase();
        if secret.trim().is_empty() {
            warn!(user = %identity, "secret is empty");
        }
        self.user_id = identity.clone();
        self.access_level = 0;
        self.basic_info = BasicInfo::default();

        match self.users.get(&identity) {
            Some(user) if user.secret == secret => {
                self.access_level = user.access_level;
                self.basic_info = user.info.clone();
                self.error_code = ErrorCode::Success;
                debug!(user = %identity, "authenticated against memory backend");
                true
            }
            _ => {
                warn!(user = %identity, "memory backend rejected credentials");
                self.error_code = ErrorCode::AuthRejected;
                false
            }
        }
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn access_level(&self) -> i32 {
        self.access_level
    }

    fn basic_info(&self) -> &BasicInfo {
        &self.basic_info
    }

    fn error_code(&self) -> ErrorCode {
        self.error_code
    }
}
