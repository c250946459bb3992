//! Name transformer
//!
//! Turns an exported name such as `Meeting%20Notes 0123abcd...ef.md` back into
//! `Meeting Notes.md`. The same UUID pattern is used to scrub file content.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::constants as C;
use crate::error::TidyError;

static UUID_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(C::UUID_SUFFIX_PATTERN).unwrap());

/// Compute the cleaned form of a basename.
///
/// Removes the first UUID suffix, trims, then percent-decodes. A name that
/// does not decode to valid UTF-8 is returned undecoded with a warning.
pub fn clean(name: &str) -> String {
    match clean_with_diagnostics(name) {
        Ok(cleaned) => cleaned,
        Err(TidyError::Decode { name, source }) => {
            warn!("Failed to percent-decode {:?}: {}", name, source);
            name
        }
        Err(other) => {
            warn!("{}", other);
            name.trim().to_string()
        }
    }
}

/// Like [`clean`], but hands back the decode error instead of logging it.
/// The error carries the undecoded (already stripped and trimmed) name.
pub fn clean_with_diagnostics(name: &str) -> Result<String, TidyError> {
    let stripped = UUID_SUFFIX.replace(name, "");
    let trimmed = stripped.trim();

    match urlencoding::decode(trimmed) {
        Ok(decoded) => Ok(decoded.into_owned()),
        Err(source) => Err(TidyError::Decode {
            name: trimmed.to_string(),
            source,
        }),
    }
}

/// Remove every UUID reference from file content
pub fn strip_uuids(content: &str) -> Cow<'_, str> {
    UUID_SUFFIX.replace_all(content, "")
}

/// Percent-encode a name the way exported links spell it
pub fn percent_encode(name: &str) -> String {
    urlencoding::encode(name).into_owned()
}
