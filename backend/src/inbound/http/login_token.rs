//! Shared-secret check for the login hand-off.
//!
//! The identity provider proves it issued a login by sending the configured
//! token in the [`LOGIN_TOKEN_HEADER`] header. Only the SHA-256 digest of
//! the token is kept in memory, and presented tokens are compared digest to
//! digest.

use sha2::{Digest, Sha256};
use tracing::warn;

use crate::domain::Error;

/// Request header carrying the identity provider's token.
pub const LOGIN_TOKEN_HEADER: &str = "x-login-token";
/// Shortest token accepted from configuration.
pub const LOGIN_TOKEN_MIN_LEN: usize = 16;
/// Token accepted by [`LoginTokenVerifier::fixture`].
pub const FIXTURE_LOGIN_TOKEN: &str = "fixture-login-token";

/// Number of digest bytes shown by [`LoginTokenVerifier::fingerprint`].
const FINGERPRINT_BYTES: usize = 8;

/// Configured login token that cannot be used.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LoginTokenError {
    #[error("login token too short: need >= {min_len} characters, got {length}")]
    TooShort { length: usize, min_len: usize },
}

/// Verifies the identity provider's token on `POST /api/v1/login`.
///
/// # Examples
/// ```
/// use schedule_backend::inbound::http::login_token::LoginTokenVerifier;
///
/// let verifier = LoginTokenVerifier::new("0123456789abcdef").expect("long enough");
/// assert!(verifier.verify(Some("0123456789abcdef")).is_ok());
/// assert!(verifier.verify(Some("guess")).is_err());
/// assert!(verifier.verify(None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginTokenVerifier {
    digest: [u8; 32],
}

impl LoginTokenVerifier {
    /// Build a verifier for `token`.
    ///
    /// # Errors
    /// [`LoginTokenError::TooShort`] when `token` has fewer than
    /// [`LOGIN_TOKEN_MIN_LEN`] characters once trimmed.
    pub fn new(token: &str) -> Result<Self, LoginTokenError> {
        let token = token.trim();
        let length = token.chars().count();
        if length < LOGIN_TOKEN_MIN_LEN {
            return Err(LoginTokenError::TooShort {
                length,
                min_len: LOGIN_TOKEN_MIN_LEN,
            });
        }
        Ok(Self {
            digest: digest(token),
        })
    }

    /// Verifier for [`FIXTURE_LOGIN_TOKEN`], used with fixture ports.
    #[must_use]
    pub fn fixture() -> Self {
        Self {
            digest: digest(FIXTURE_LOGIN_TOKEN),
        }
    }

    /// Check the token presented with a login request.
    ///
    /// # Errors
    /// `unauthorized` when the token is missing or does not match.
    pub fn verify(&self, presented: Option<&str>) -> Result<(), Error> {
        let Some(presented) = presented else {
            return Err(Error::unauthorized(
                "login must be forwarded by the identity provider",
            ));
        };
        if digest(presented.trim()) == self.digest {
            Ok(())
        } else {
            warn!("login rejected: identity provider token mismatch");
            Err(Error::unauthorized("identity provider token rejected"))
        }
    }

    /// Short hex digest prefix for start-up logs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.digest[..FINGERPRINT_BYTES])
    }
}

fn digest(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}
