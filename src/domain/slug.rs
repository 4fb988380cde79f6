//! URL slugs derived from advisor display names.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Normalizes a display name into a slug base: lowercase, whitespace runs
/// collapsed into a single hyphen, diacritics stripped.
///
/// ```rust
/// use colmena::domain::normalize_slug;
///
/// assert_eq!(normalize_slug("Juan Pérez"), "juan-perez");
/// ```
#[must_use]
pub fn normalize_slug(name: &str) -> String {
    let hyphenated = name
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    hyphenated
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

/// A slug candidate. The first candidate is the normalized base itself,
/// subsequent ones append `-1`, `-2`, ...
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    #[must_use]
    pub fn candidate(base: &str, attempt: u32) -> Self {
        if attempt == 0 {
            Self(base.to_string())
        } else {
            Self(format!("{base}-{attempt}"))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_diacritics_and_hyphenates() {
        assert_eq!(normalize_slug("Juan Pérez"), "juan-perez");
        assert_eq!(normalize_slug("María José  Núñez"), "maria-jose-nunez");
        assert_eq!(normalize_slug("ÁLVARO\tSOTO"), "alvaro-soto");
    }

    #[test]
    fn test_normalize_trims_surrounding_whitespace() {
        assert_eq!(normalize_slug("  Ana  "), "ana");
        assert_eq!(normalize_slug("ana"), "ana");
    }

    #[test]
    fn test_candidates_append_numeric_suffix() {
        assert_eq!(Slug::candidate("juan-perez", 0).as_str(), "juan-perez");
        assert_eq!(Slug::candidate("juan-perez", 1).as_str(), "juan-perez-1");
        assert_eq!(Slug::candidate("juan-perez", 12).to_string(), "juan-perez-12");
    }
}
