//! Authentication result types.

use std::fmt;

use assist_core::DEFAULT_SHORT_NAME;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::convert::to_opt_string;

/// Classification of the last `authenticate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ErrorCode {
    /// The auth server accepted the credentials.
    #[default]
    Success = 0,
    /// The auth server answered `result: "fail"`.
    AuthRejected = 2,
    /// Connection error, non-2xx status or malformed response.
    Transport = 3,
}

impl ErrorCode {
    /// Numeric code as reported to callers.
    #[inline]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

/// Structured user name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

impl UserName {
    /// Read a name from a JSON object, ignoring non-string parts.
    ///
    /// Returns `None` if the value is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            nick: to_opt_string(obj.get("nick")),
            first: to_opt_string(obj.get("first")),
            last: to_opt_string(obj.get("last")),
        })
    }

    /// Convert to a JSON object containing only the parts that are set.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        let parts = [("nick", &self.nick), ("first", &self.first), ("last", &self.last)];
        for (key, part) in parts {
            if let Some(part) = part {
                obj.insert(key.to_owned(), Value::String(part.clone()));
            }
        }
        Value::Object(obj)
    }

    /// True if no name part is set.
    pub fn is_empty(&self) -> bool {
        self.nick.is_none() && self.first.is_none() && self.last.is_none()
    }

    /// Name to address the user with: nick, first, last, then `"Boss"`.
    pub fn short_name(&self) -> &str {
        [&self.nick, &self.first, &self.last]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .find(|part| !part.is_empty())
            .unwrap_or(DEFAULT_SHORT_NAME)
    }
}

/// Account fields reported by the auth server on success.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicInfo {
    pub user_name: Option<UserName>,
    pub language: Option<String>,
    pub birth: Option<String>,
    /// `None` if the server did not send a role list at all.
    pub roles: Option<Vec<String>>,
    /// Response fields that are not promoted to named attributes.
    pub extra: Map<String, Value>,
}
