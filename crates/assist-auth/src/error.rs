//! Authentication error types.

/// Authentication error.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Neither a key nor a user/password pair was supplied.
    #[error("missing credential key")]
    MissingCredential,

    /// The key has no `<identity>;<secret>` separator.
    #[error("malformed credential key")]
    MalformedCredential,

    /// Network error, non-2xx status or unreadable response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The auth server answered with `result: "fail"`.
    #[error("authentication rejected")]
    Rejected,

    /// Serialized account data could not be imported.
    #[error("invalid account data: {0}")]
    InvalidAccount(String),
}

impl AuthError {
    /// Create a transport error from any error type.
    #[inline]
    pub fn transport<E: std::fmt::Display>(err: E) -> Self {
        Self::Transport(err.to_string())
    }
}
