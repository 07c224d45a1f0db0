//! Title normalization.
//!
//! Every comparison between a catalog title, a filename, and a catalog row
//! goes through [`NormalizedKey`]. Two strings "match" when their keys are
//! equal (catalog rows) or one key contains the other (filenames).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowercase, alphanumeric-only form of a title or filename.
///
/// Built only through [`normalize`] / [`normalize_opt`], so the invariant
/// "contains nothing but lowercase letters and digits" always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `self` appears anywhere inside `haystack`.
    ///
    /// This is the filename matching rule: "title-a-final.jpg" normalizes to
    /// "titleafinaljpg", which contains "titlea".
    pub fn is_within(&self, haystack: &NormalizedKey) -> bool {
        haystack.0.contains(&self.0)
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalize free text into a comparable key.
///
/// Lowercasing happens before filtering: some uppercase letters lowercase
/// into a base letter plus a combining mark, and filtering afterwards keeps
/// the function idempotent.
pub fn normalize(text: &str) -> NormalizedKey {
    NormalizedKey(
        text.chars()
            .flat_map(char::to_lowercase)
            .filter(|c| c.is_alphanumeric())
            .collect(),
    )
}

/// Absent input is treated as the empty string.
pub fn normalize_opt(text: Option<&str>) -> NormalizedKey {
    normalize(text.unwrap_or(""))
}
