//! Account authentication against a remote assistant API.
//!
//! This crate resolves request credentials, checks them with an
//! [`Authenticator`], and fills an [`Account`] snapshot from the result.
//!
//! # Example
//!
//! ```
//! use assist_auth::{Account, CredentialResolver, MemoryAuth, RequestParams};
//!
//! # async fn example() {
//! let mut auth = MemoryAuth::new();
//! auth.add_password("jane", "secret", 1, Default::default());
//!
//! let resolver = CredentialResolver::default();
//! let params = RequestParams::with_password("jane", "secret");
//!
//! let mut account = Account::new();
//! assert!(account.authenticate(&params, &resolver, &mut auth).await);
//! assert_eq!(account.user_id(), "jane");
//! # }
//! ```

mod account;
pub mod cli;
mod convert;
mod credential;
mod error;
mod hash;
pub mod http;
mod memory;
mod result;
mod traits;

pub use account::Account;
pub use cli::AuthArgs;
pub use credential::{Credential, CredentialResolver, RequestParams};
pub use error::AuthError;
pub use hash::{hash_client_password, sha256_hex};
pub use http::AssistApiAuth;
pub use memory::MemoryAuth;
pub use result::{BasicInfo, ErrorCode, UserName};
pub use traits::Authenticator;
