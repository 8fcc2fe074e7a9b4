//! Account snapshot populated by authentication.
//!
//! An [`Account`] starts empty and is filled exactly once, either by a
//! successful [`Account::authenticate`] or by [`Account::import_json`].
//! Afterwards it is a read-only value owned by the caller's session.

use assist_core::{DEFAULT_ACCESS_LEVEL, DEFAULT_LANGUAGE};
use serde_json::{Map, Value};
use tracing::error;

use crate::convert::{to_i32, to_string_list};
use crate::credential::{Credential, CredentialResolver, RequestParams};
use crate::error::AuthError;
use crate::result::UserName;
use crate::traits::Authenticator;

/// Basic account data acquired during authentication.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    user_id: String,
    email: Option<String>,
    phone: Option<String>,
    access_level: i32,
    user_name: Option<UserName>,
    user_name_short: String,
    language: String,
    user_birth: String,
    user_roles: Option<Vec<String>>,
    info: Map<String, Value>,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            email: None,
            phone: None,
            access_level: DEFAULT_ACCESS_LEVEL,
            user_name: None,
            user_name_short: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            user_birth: String::new(),
            user_roles: None,
            info: Map::new(),
        }
    }
}

impl Account {
    /// Create an empty, unauthenticated account.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique user ID.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Email identifier; only set by [`import_json`](Self::import_json).
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Phone identifier; only set by [`import_json`](Self::import_json).
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Access level: -1 none, 0 token, 1 password, as defined by the auth server.
    pub fn access_level(&self) -> i32 {
        self.access_level
    }

    pub fn user_name(&self) -> Option<&UserName> {
        self.user_name.as_ref()
    }

    /// Name to address the user with in a UI. Empty until a name is known.
    pub fn user_name_short(&self) -> &str {
        &self.user_name_short
    }

    /// Preferred language (ISO-639 code).
    pub fn preferred_language(&self) -> &str {
        &self.language
    }

    pub fn birth_date(&self) -> &str {
        &self.user_birth
    }

    /// Lower-cased role names; `None` until the account is populated.
    pub fn user_roles(&self) -> Option<&[String]> {
        self.user_roles.as_deref()
    }

    /// Response fields that have no named accessor.
    pub fn info(&self) -> &Map<String, Value> {
        &self.info
    }

    /// Check role membership. Role names are compared lower-cased.
    pub fn has_role(&self, role: &str) -> bool {
        let role = role.to_lowercase();
        self.user_roles
            .as_ref()
            .is_some_and(|roles| roles.iter().any(|r| *r == role))
    }

    /// Resolve the request credential and authenticate it.
    ///
    /// On success the account is populated from `auth` and `true` is
    /// returned. A missing or malformed credential is logged and fails
    /// before `auth` is called. On any failure the account is unchanged.
    pub async fn authenticate<A>(
        &mut self,
        params: &RequestParams,
        resolver: &CredentialResolver,
        auth: &mut A,
    ) -> bool
    where
        A: Authenticator + ?Sized,
    {
        let credential = match resolver.resolve(params) {
            Ok(credential) => credential,
            Err(e) => {
                error!(error = %e, "authentication failed");
                return false;
            }
        };
        self.authenticate_credential(&credential, auth).await
    }

    /// Authenticate an already resolved credential.
    pub async fn authenticate_credential<A>(
        &mut self,
        credential: &Credential,
        auth: &mut A,
    ) -> bool
    where
        A: Authenticator + ?Sized,
    {
        if !auth
            .authenticate(&credential.identity, &credential.secret, &credential.client)
            .await
        {
            return false;
        }
        self.populate(&*auth);
        true
    }

    fn populate<A: Authenticator + ?Sized>(&mut self, auth: &A) {
        let info = auth.basic_info();

        self.user_id = auth.user_id().to_owned();
        self.access_level = auth.access_level();

        if let Some(lang) = info.language.as_deref().filter(|l| !l.is_empty()) {
            self.language = lang.to_owned();
        }
        match info.user_name.as_ref() {
            Some(name) if !name.is_empty() => self.set_user_name(name.clone()),
            // Name object without fields: nothing to store, but still addressable.
            Some(name) => self.user_name_short = name.short_name().to_owned(),
            None => {}
        }
        if let Some(birth) = info.birth.as_deref().filter(|b| !b.is_empty()) {
            self.user_birth = birth.to_owned();
        }
        self.user_roles = Some(
            info.roles
                .as_deref()
                .map(lowercase_roles)
                .unwrap_or_default(),
        );
        self.info = info.extra.clone();
    }

    fn set_user_name(&mut self, name: UserName) {
        self.user_name_short = name.short_name().to_owned();
        self.user_name = Some(name);
    }

    /// Export account data as a JSON object.
    ///
    /// `userName` is the name object serialized to a string; it is left out
    /// while no name is known, as is `userRoles` while there are no roles.
    pub fn export_json(&self) -> Value {
        let mut account = Map::new();
        account.insert("userId".into(), self.user_id.clone().into());
        account.insert("email".into(), self.email.clone().unwrap_or_default().into());
        account.insert("phone".into(), self.phone.clone().unwrap_or_default().into());
        if let Some(name) = &self.user_name {
            account.insert("userName".into(), name.to_value().to_string().into());
        }
        account.insert("accessLevel".into(), self.access_level.into());
        if let Some(roles) = self.user_roles.as_ref().filter(|r| !r.is_empty()) {
            account.insert("userRoles".into(), roles.clone().into());
        }
        account.insert("prefLanguage".into(), self.language.clone().into());
        account.insert("userBirth".into(), self.user_birth.clone().into());
        Value::Object(account)
    }

    /// Import account data produced by [`export_json`](Self::export_json).
    ///
    /// Missing keys leave the current value in place. `userName` may be a
    /// nested object or a serialized string. Roles are lower-cased. Nothing
    /// is changed if the data is rejected.
    pub fn import_json(&mut self, account: &Value) -> Result<(), AuthError> {
        let obj = account
            .as_object()
            .ok_or_else(|| AuthError::InvalidAccount("expected a JSON object".into()))?;

        let user_name = match obj.get("userName") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => {
                let parsed: Value = serde_json::from_str(s).map_err(|e| {
                    AuthError::InvalidAccount(format!("userName is not valid JSON: {e}"))
                })?;
                Some(parse_user_name(&parsed)?)
            }
            Some(other) => Some(parse_user_name(other)?),
        };

        self.info = Map::new();
        if let Some(id) = obj.get("userId").and_then(Value::as_str) {
            self.user_id = id.to_owned();
        }
        self.email = non_empty_str(obj.get("email")).or(self.email.take());
        self.phone = non_empty_str(obj.get("phone")).or(self.phone.take());
        if let Some(level) = obj.get("accessLevel") {
            self.access_level = to_i32(Some(level));
        }
        if let Some(name) = user_name {
            self.set_user_name(name);
        }
        if let Some(lang) = non_empty_str(obj.get("prefLanguage")) {
            self.language = lang;
        }
        if let Some(birth) = non_empty_str(obj.get("userBirth")) {
            self.user_birth = birth;
        }
        match obj
            .get("userRoles")
            .map(to_string_list)
            .filter(|roles| !roles.is_empty())
        {
            Some(roles) => self.user_roles = Some(lowercase_roles(&roles)),
            None => {
                self.user_roles.get_or_insert_with(Vec::new);
            }
        }
        Ok(())
    }
}

fn lowercase_roles(roles: &[String]) -> Vec<String> {
    roles.iter().map(|r| r.to_lowercase()).collect()
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn parse_user_name(value: &Value) -> Result<UserName, AuthError> {
    UserName::from_value(value)
        .ok_or_else(|| AuthError::InvalidAccount("userName must be an object".into()))
}
