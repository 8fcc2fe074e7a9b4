//! Authenticator trait.

use async_trait::async_trait;

use crate::result::{BasicInfo, ErrorCode};

/// A service that can check a credential and report account details.
///
/// An instance holds the outcome of its last call, so it serves one
/// request at a time; `authenticate` takes `&mut self` to enforce that.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Check `identity`/`secret` for the given client.
    ///
    /// Returns `true` on success. On failure, [`error_code`](Self::error_code)
    /// tells why. An empty `client` selects the implementation's default.
    async fn authenticate(&mut self, identity: &str, secret: &str, client: &str) -> bool;

    /// Identity used by the last call, as sent to the server.
    fn user_id(&self) -> &str;

    /// Access level reported by the last successful call.
    fn access_level(&self) -> i32;

    /// Account fields reported by the last successful call.
    fn basic_info(&self) -> &BasicInfo;

    /// Outcome of the last call.
    fn error_code(&self) -> ErrorCode;
}

/// Blanket implementation for `&mut A` where `A: Authenticator`.
#[async_trait]
impl<A: Authenticator + ?Sized> Authenticator for &mut A {
    #[inline]
    async fn authenticate(&mut self, identity: &str, secret: &str, client: &str) -> bool {
        (**self).authenticate(identity, secret, client).await
    }

    #[inline]
    fn user_id(&self) -> &str {
        (**self).user_id()
    }

    #[inline]
    fn access_level(&self) -> i32 {
        (**self).access_level()
    }

    #[inline]
    fn basic_info(&self) -> &BasicInfo {
        (**self).basic_info()
    }

    #[inline]
    fn error_code(&self) -> ErrorCode {
        (**self).error_code()
    }
}

/// Blanket implementation for `Box<A>` where `A: Authenticator`.
///
/// This allows passing `Box<dyn Authenticator>` directly to functions expecting `impl Authenticator`.
#[async_trait]
impl<A: Authenticator + ?Sized> Authenticator for Box<A> {
    #[inline]
    async fn authenticate(&mut self, identity: &str, secret: &str, client: &str) -> bool {
        (**self).authenticate(identity, secret, client).await
    }

    #[inline]
    fn user_id(&self) -> &str {
        (**self).user_id()
    }

    #[inline]
    fn access_level(&self) -> i32 {
        (**self).access_level()
    }

    #[inline]
    fn basic_info(&self) -> &BasicInfo {
        (**self).basic_info()
    }

    #[inline]
    fn error_code(&self) -> ErrorCode {
        (**self).error_code()
    }
}
