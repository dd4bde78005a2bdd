//! Normalisation shared by every user-supplied text column.
//!
//! PostgreSQL `text` and `varchar` values cannot hold U+0000, so NUL
//! characters are dropped before anything reaches a repository.

/// Maximum stored length, in characters, of names, usernames and comments.
pub const MAX_TEXT_CHARS: usize = 255;

/// Remove every NUL character from `value`.
pub(crate) fn strip_nul_chars(mut value: String) -> String {
    if value.contains('\0') {
        value.retain(|c| c != '\0');
    }
    value
}

/// Drop NUL characters, then truncate to at most [`MAX_TEXT_CHARS`]
/// characters.
///
/// Cuts on a character boundary so multi-byte input stays valid UTF-8.
pub(crate) fn truncate_to_limit(value: String) -> String {
    let mut value = strip_nul_chars(value);
    if let Some((byte_index, _)) = value.char_indices().nth(MAX_TEXT_CHARS) {
        value.truncate(byte_index);
    }
    value
}
