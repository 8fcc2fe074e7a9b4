//! Remote assistant-API authentication backend.
//!
//! Posts the credential key to `<base>/authentication` as JSON and reads
//! the account fields from the JSON answer.
//!
//! # Example
//!
//! ```no_run
//! use assist_auth::{AssistApiAuth, Authenticator};
//!
//! # async fn example() {
//! let mut auth = AssistApiAuth::new("https://assist.example.com/", "web_app_v1.0.0");
//! if auth.authenticate("jane@example.com", "token", "").await {
//!     println!("access level {}", auth.access_level());
//! }
//! # }
//! ```

use std::time::Duration;

use assist_config::AuthConfig;
use assist_core::{AUTH_ENDPOINT_PATH, KEY_SEPARATOR};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::convert::{to_i32, to_opt_string, to_string_list};
use crate::{AuthError, Authenticator, BasicInfo, ErrorCode, UserName};

// ── AssistApiAuth ─────────────────────────────────────────────────

/// Authenticator that delegates to the remote assistant API.
#[derive(Debug)]
pub struct AssistApiAuth {
    client: Client,
    auth_url: String,
    default_client: String,
    user_id: String,
    access_level: i32,
    basic_info: BasicInfo,
    error_code: ErrorCode,
}

impl AssistApiAuth {
    /// Create a new assistant-API authenticator.
    ///
    /// `base_url` is the API root (e.g. `https://assist.example.com/`).
    /// `default_client` is sent when a call passes an empty client.
    pub fn new(base_url: impl Into<String>, default_client: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, default_client)
    }

    /// Create with a custom reqwest [`Client`] (for timeouts, proxies, etc.).
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        default_client: impl Into<String>,
    ) -> Self {
        let base = base_url.into();
        let base = base.trim_end_matches('/');
        Self {
            client,
            auth_url: format!("{base}/{AUTH_ENDPOINT_PATH}"),
            default_client: default_client.into(),
            user_id: String::new(),
            access_level: 0,
            basic_info: BasicInfo::default(),
            error_code: ErrorCode::Success,
        }
    }

    /// Create from the `[auth]` config section, applying its request timeout.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AuthError::transport)?;
        Ok(Self::with_client(
            client,
            &config.api_base_url,
            &config.default_client,
        ))
    }

    /// Full URL of the authentication endpoint.
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Send the check request and classify the answer.
    async fn check(&self, key: String, client: &str) -> Result<wire::CheckResponse, AuthError> {
        let body = wire::CheckRequest {
            key,
            action: "check",
            client,
        };
        let resp = self
            .client
            .post(&self.auth_url)
            .json(&body)
            .send()
            .await
            .map_err(AuthError::transport)?;

        if !resp.status().is_success() {
            return Err(AuthError::Transport(format!(
                "HTTP {}",
                resp.status().as_u16()
            )));
        }

        let value: Value = resp.json().await.map_err(AuthError::transport)?;
        if !value.is_object() {
            return Err(AuthError::Transport(
                "response is not a JSON object".to_string(),
            ));
        }
        let response: wire::CheckResponse =
            serde_json::from_value(value).map_err(AuthError::transport)?;
        if response.is_fail() {
            return Err(AuthError::Rejected);
        }
        Ok(response)
    }
}

#[async_trait]
impl Authenticator for AssistApiAuth {
    async fn authenticate(&mut self, identity: &str, secret: &str, client: &str) -> bool {
        let identity = identity.to_lowercase();
        let client = if client.trim().is_empty() {
            self.default_client.clone()
        } else {
            client.to_owned()
        };
        if secret.trim().is_empty() {
            warn!(user = %identity, "secret is empty, leaving the decision to the auth server");
        }

        self.user_id = identity.clone();
        self.access_level = 0;
        self.basic_info = BasicInfo::default();

        let key = format!("{identity}{KEY_SEPARATOR}{secret}");
        match self.check(key, &client).await {
            Ok(response) => {
                self.access_level = to_i32(response.access_level.as_ref());
                self.basic_info = response.into();
                self.error_code = ErrorCode::Success;
                debug!(
                    user = %identity,
                    access_level = self.access_level,
                    "authenticated against assistant API"
                );
                true
            }
            Err(AuthError::Rejected) => {
                warn!(user = %identity, "auth server rejected credentials");
                self.error_code = ErrorCode::AuthRejected;
                false
            }
            Err(e) => {
                warn!(user = %identity, error = %e, "no success in auth response");
                self.error_code = ErrorCode::Transport;
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

// ── Wire types (must match the assistant API exactly) ─────────────

#[allow(missing_debug_implementations)]
mod wire {
    use serde::{Deserialize, Serialize};
    use serde_json::{Map, Value};

    #[derive(Serialize)]
    pub struct CheckRequest<'a> {
        #[serde(rename = "KEY")]
        pub key: String,
        pub action: &'static str,
        pub client: &'a str,
    }

    /// Loosely typed answer; field types are not trusted.
    #[derive(Deserialize)]
    pub struct CheckResponse {
        #[serde(default)]
        pub result: Option<Value>,
        #[serde(default)]
        pub access_level: Option<Value>,
        #[serde(default)]
        pub user_name: Option<Value>,
        #[serde(default)]
        pub user_lang_code: Option<Value>,
        #[serde(default)]
        pub user_birth: Option<Value>,
        #[serde(default)]
        pub user_roles: Option<Value>,
        #[serde(flatten)]
        pub extra: Map<String, Value>,
    }

    impl CheckResponse {
        pub fn is_fail(&self) -> bool {
            self.result.as_ref().and_then(Value::as_str) == Some("fail")
        }
    }
}

// ── Wire → core conversions ───────────────────────────────────────

impl From<wire::CheckResponse> for BasicInfo {
    fn from(w: wire::CheckResponse) -> Self {
        Self {
            user_name: w.user_name.as_ref().and_then(UserName::from_value),
            language: to_opt_string(w.user_lang_code.as_ref()),
            birth: to_opt_string(w.user_birth.as_ref()),
            roles: w.user_roles.as_ref().map(to_string_list),
            extra: w.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: Value) -> wire::CheckResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn auth_url_joins_base() {
        let auth = AssistApiAuth::new("https://assist.example.com/", "web");
        assert_eq!(auth.auth_url(), "https://assist.example.com/authentication");

        let auth = AssistApiAuth::new("http://localhost:20721", "web");
        assert_eq!(auth.auth_url(), "http://localhost:20721/authentication");
    }

    #[test]
    fn request_body_shape() {
        let body = wire::CheckRequest {
            key: "jane;tok".into(),
            action: "check",
            client: "web",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"KEY": "jane;tok", "action": "check", "client": "web"})
        );
    }

    #[test]
    fn fail_detection() {
        assert!(parse(json!({"result": "fail"})).is_fail());
        assert!(!parse(json!({"result": "success"})).is_fail());
        assert!(!parse(json!({})).is_fail());
        assert!(!parse(json!({"result": 0})).is_fail());
    }

    #[test]
    fn basic_info_from_response() {
        let info: BasicInfo = parse(json!({
            "result": "success",
            "access_level": 1,
            "user_name": {"nick": "JJ"},
            "user_lang_code": "de",
            "user_roles": ["Admin"],
            "keyToken": "abc"
        }))
        .into();
        assert_eq!(info.user_name.unwrap().nick.as_deref(), Some("JJ"));
        assert_eq!(info.language.as_deref(), Some("de"));
        assert!(info.birth.is_none());
        assert_eq!(info.roles, Some(vec!["Admin".to_string()]));
        assert_eq!(info.extra.get("keyToken"), Some(&json!("abc")));
        assert!(!info.extra.contains_key("result"));
    }

    #[test]
    fn absent_roles_differ_from_empty() {
        let info: BasicInfo = parse(json!({"result": "success"})).into();
        assert!(info.roles.is_none());

        let info: BasicInfo = parse(json!({"user_roles": []})).into();
        assert_eq!(info.roles, Some(Vec::new()));
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        // Port 9 on localhost is expected to refuse connections.
        let mut auth = AssistApiAuth::new("http://127.0.0.1:9/", "web");
        assert!(!auth.authenticate("Jane", "secret", "").await);
        assert_eq!(auth.error_code(), ErrorCode::Transport);
        assert_eq!(auth.user_id(), "jane");
        assert_eq!(auth.basic_info(), &BasicInfo::default());
    }
}
