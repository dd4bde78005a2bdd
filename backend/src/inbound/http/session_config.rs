//! Session cookie settings.
//!
//! Start-up turns [`SessionToggles`] (the raw values from `AppSettings`) into
//! [`SessionSettings`]: the private-cookie key plus the `Secure` and
//! `SameSite` attributes. Release builds are strict about key material; debug
//! builds fall back to a throwaway key so a fresh checkout can log in.

use actix_web::cookie::{Key, SameSite};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use zeroize::Zeroizing;

/// Minimum key file length accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;
/// `Key::derive_from` panics below this length.
const DERIVE_MIN_LEN: usize = 32;

/// Which validation rules apply to the session configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Lenient: generated keys and `SameSite=Lax`.
    Debug,
    /// Strict: a readable key file of [`SESSION_KEY_MIN_LEN`] bytes and
    /// `SameSite=Strict`.
    Release,
}

impl BuildMode {
    /// Mode matching how the binary was compiled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use schedule_backend::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) {
    ///     BuildMode::Debug
    /// } else {
    ///     BuildMode::Release
    /// };
    /// assert_eq!(BuildMode::from_debug_assertions(), expected);
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn same_site(self) -> SameSite {
        match self {
            Self::Debug => SameSite::Lax,
            Self::Release => SameSite::Strict,
        }
    }
}

/// Session values as loaded from configuration.
#[derive(Clone, Debug)]
pub struct SessionToggles {
    /// Path to the cookie key material.
    pub key_file: PathBuf,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
    /// Accept a generated key when `key_file` is unreadable.
    pub allow_ephemeral: bool,
}

/// Resolved cookie-session parameters.
#[derive(Clone)]
pub struct SessionSettings {
    /// Encrypts and authenticates the session cookie.
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Session configuration failures; all of them abort start-up.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("ephemeral session keys are not allowed in release builds")]
    EphemeralNotAllowed,
}

/// Resolve session settings for `mode`.
///
/// # Errors
/// Release builds fail when `allow_ephemeral` is set, when the key file
/// cannot be read, or when it holds fewer than [`SESSION_KEY_MIN_LEN`] bytes.
///
/// # Examples
///
/// ```rust
/// use schedule_backend::inbound::http::session_config::{
///     BuildMode, SessionToggles, session_settings,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("schedule_session_key_example");
/// std::fs::write(&key_path, vec![b'k'; 64])?;
///
/// let settings = session_settings(
///     &SessionToggles {
///         key_file: key_path.clone(),
///         cookie_secure: true,
///         allow_ephemeral: false,
///     },
///     BuildMode::Release,
/// )?;
/// assert!(settings.cookie_secure);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings(
    toggles: &SessionToggles,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    if mode == BuildMode::Release && toggles.allow_ephemeral {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    if !toggles.cookie_secure {
        warn!("session cookie will be sent without the Secure attribute");
    }

    let lenient = mode == BuildMode::Debug || toggles.allow_ephemeral;
    let key = match read_key_material(&toggles.key_file, lenient)? {
        Some(material) => key_from_material(&toggles.key_file, &material, mode)?,
        None => Key::generate(),
    };

    Ok(SessionSettings {
        key,
        cookie_secure: toggles.cookie_secure,
        same_site: mode.same_site(),
    })
}

/// Read the key file; `None` means a generated key is acceptable instead.
fn read_key_material(
    path: &Path,
    lenient: bool,
) -> Result<Option<Zeroizing<Vec<u8>>>, SessionConfigError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(Zeroizing::new(bytes))),
        Err(error) if lenient => {
            warn!(path = %path.display(), %error, "session key unreadable; using an ephemeral key");
            Ok(None)
        }
        Err(source) => Err(SessionConfigError::KeyRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn key_from_material(
    path: &Path,
    material: &[u8],
    mode: BuildMode,
) -> Result<Key, SessionConfigError> {
    let length = material.len();
    if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
        return Err(SessionConfigError::KeyTooShort {
            path: path.to_path_buf(),
            length,
            min_len: SESSION_KEY_MIN_LEN,
        });
    }
    if length < DERIVE_MIN_LEN {
        warn!(path = %path.display(), length, "session key too short to derive from; using an ephemeral key");
        return Ok(Key::generate());
    }
    info!(path = %path.display(), "session key loaded");
    Ok(Key::derive_from(material))
}

#[cfg(test)]
mod tests;
