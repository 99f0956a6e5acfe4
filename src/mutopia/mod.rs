//! Static publication tables: valid styles, licenses and clefs.
//!
//! These are external enumerations consulted for validation and suggestion
//! only; nothing in the editor mutates them. Comparison is case-insensitive
//! so users can type `baroque` for `Baroque`.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Styles accepted by the publication archive.
pub const STYLES: &[&str] = &[
    "Baroque",
    "Classical",
    "Folk",
    "Hymn",
    "Jazz",
    "Medieval",
    "Modern",
    "Popular",
    "Ragtime",
    "Renaissance",
    "Romantic",
];

/// Licenses accepted by the publication archive.
pub const LICENSES: &[&str] = &[
    "Public Domain",
    "Creative Commons Attribution 4.0",
    "Creative Commons Attribution-ShareAlike 4.0",
    "Creative Commons Attribution 3.0",
    "Creative Commons Attribution-ShareAlike 3.0",
];

/// Clefs the notation engine understands.
pub const VALID_CLEFS: &[&str] = &[
    "treble",
    "treble8",
    "bass",
    "bass8",
    "alto",
    "tenor",
    "percussion",
];

static STYLE_SET: Lazy<HashSet<String>> =
    Lazy::new(|| STYLES.iter().map(|s| s.to_lowercase()).collect());

static LICENSE_SET: Lazy<HashSet<String>> =
    Lazy::new(|| LICENSES.iter().map(|s| s.to_lowercase()).collect());

static CLEF_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| VALID_CLEFS.iter().copied().collect());

pub fn is_valid_style(style: &str) -> bool {
    STYLE_SET.contains(&style.trim().to_lowercase())
}

pub fn is_valid_license(license: &str) -> bool {
    LICENSE_SET.contains(&license.trim().to_lowercase())
}

pub fn is_valid_clef(clef: &str) -> bool {
    CLEF_SET.contains(clef.trim().to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_membership() {
        assert!(is_valid_style("Baroque"));
        assert!(is_valid_style("baroque"));
        assert!(!is_valid_style("bogus"));
    }

    #[test]
    fn test_license_membership() {
        assert!(is_valid_license("Public Domain"));
        assert!(is_valid_license("public domain"));
        assert!(!is_valid_license("All Rights Reserved"));
    }

    #[test]
    fn test_clef_membership() {
        assert!(is_valid_clef("treble"));
        assert!(is_valid_clef(" Bass "));
        assert!(!is_valid_clef("soprano"));
    }
}
