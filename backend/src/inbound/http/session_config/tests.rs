//! Unit tests for session settings.

use super::*;
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temporary key file");
    file.write_all(&vec![b'a'; len]).expect("write key material");
    file
}

fn toggles(path: &Path) -> SessionToggles {
    SessionToggles {
        key_file: path.to_path_buf(),
        cookie_secure: true,
        allow_ephemeral: false,
    }
}

fn missing_path() -> PathBuf {
    let dir = tempfile::tempdir().expect("temporary dir");
    dir.path().join("absent-session-key")
}

#[rstest]
fn release_accepts_long_key() {
    let file = key_file(SESSION_KEY_MIN_LEN);
    let settings =
        session_settings(&toggles(file.path()), BuildMode::Release).expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
fn release_rejects_short_key() {
    let file = key_file(SESSION_KEY_MIN_LEN - 1);
    let err = session_settings(&toggles(file.path()), BuildMode::Release)
        .err()
        .expect("short key rejected");
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length, min_len, .. }
            if length == SESSION_KEY_MIN_LEN - 1 && min_len == SESSION_KEY_MIN_LEN
    ));
}

#[rstest]
#[case(32)]
#[case(8)]
fn debug_accepts_short_keys(#[case] len: usize) {
    let file = key_file(len);
    let settings = session_settings(&toggles(file.path()), BuildMode::Debug).expect("debug key");
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn release_requires_readable_key() {
    let err = session_settings(&toggles(&missing_path()), BuildMode::Release)
        .err()
        .expect("missing key rejected");
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_falls_back_to_generated_key() {
    let settings =
        session_settings(&toggles(&missing_path()), BuildMode::Debug).expect("ephemeral key");
    assert!(settings.cookie_secure);
}

#[rstest]
fn release_refuses_ephemeral_keys() {
    let file = key_file(SESSION_KEY_MIN_LEN);
    let mut toggles = toggles(file.path());
    toggles.allow_ephemeral = true;
    let err = session_settings(&toggles, BuildMode::Release)
        .err()
        .expect("ephemeral rejected");
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
#[case(true)]
#[case(false)]
fn cookie_secure_is_passed_through(#[case] secure: bool) {
    let file = key_file(SESSION_KEY_MIN_LEN);
    let mut toggles = toggles(file.path());
    toggles.cookie_secure = secure;
    let settings = session_settings(&toggles, BuildMode::Debug).expect("settings");
    assert_eq!(settings.cookie_secure, secure);
}

#[rstest]
fn allow_ephemeral_does_not_discard_a_readable_key() {
    let file = key_file(SESSION_KEY_MIN_LEN);
    let mut toggles = toggles(file.path());
    toggles.allow_ephemeral = true;

    let first = session_settings(&toggles, BuildMode::Debug).expect("first");
    let second = session_settings(&toggles, BuildMode::Debug).expect("second");

    assert_eq!(first.key.master(), second.key.master());
}
