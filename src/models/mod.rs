//! Domain models for the score-in-progress.
//!
//! This module contains the core data structures mutated by the editing
//! session:
//!
//! - [`Piece`] - The whole score metadata document
//! - [`Headers`] - Score-level headers, owning one [`Composer`]
//! - [`MutopiaHeaders`] - Publication metadata with validated style/license
//! - [`Instrument`] - One instrumental part, identified by canonical name
//! - [`Ensemble`] - A named, ordered group of instruments
//! - [`Movement`] - One movement with optional tempo/time/key

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::mutopia;
use crate::names::{abbreviate_name, display_name, mutopia_name_guess, normalize_name};

// =============================================================================
// Composer
// =============================================================================

/// A person credited for a piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composer {
    /// Display name, as typed by the user.
    pub name: String,
    /// Abbreviated name for part headers; derived from `name` when absent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub shortname: Option<String>,
    /// Publication-formatted name (e.g. `BachJS`).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mutopianame: Option<String>,
}

impl Composer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shortname: None,
            mutopianame: None,
        }
    }

    /// Canonical registry key for this composer.
    pub fn canonical_key(&self) -> String {
        normalize_name(&self.name)
    }

    /// Short name, falling back to an abbreviation of the display name.
    pub fn short_name(&self) -> String {
        self.shortname
            .clone()
            .unwrap_or_else(|| abbreviate_name(&self.name))
    }

    /// Publication name, falling back to a derived guess.
    pub fn publication_name(&self) -> String {
        self.mutopianame
            .clone()
            .unwrap_or_else(|| mutopia_name_guess(&self.name))
    }
}

// =============================================================================
// Mutopia Headers
// =============================================================================

/// Publication metadata for a specific distribution target.
///
/// `style` and `license` must belong to the fixed enumerations in
/// [`crate::mutopia`]; construction and the mutating setters fail with a
/// [`ValidationError`] naming the offending field otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutopiaHeaders {
    pub source: String,
    style: String,
    license: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub maintainer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub maintainer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub maintainer_web: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mutopiatitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mutopiapoet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mutopiaopus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub moreinfo: Option<String>,
}

impl MutopiaHeaders {
    /// Build headers from the three mandatory fields.
    ///
    /// Style is validated before license, so a record with both invalid
    /// reports `style` first.
    pub fn new(
        source: impl Into<String>,
        style: impl Into<String>,
        license: impl Into<String>,
    ) -> ValidationResult<Self> {
        let style = style.into();
        let license = license.into();
        if !mutopia::is_valid_style(&style) {
            return Err(ValidationError::invalid(
                "style",
                format!("'{style}' is not a known style"),
            ));
        }
        if !mutopia::is_valid_license(&license) {
            return Err(ValidationError::invalid(
                "license",
                format!("'{license}' is not a known license"),
            ));
        }
        Ok(Self {
            source: source.into(),
            style,
            license,
            maintainer: None,
            maintainer_email: None,
            maintainer_web: None,
            mutopiatitle: None,
            mutopiapoet: None,
            mutopiaopus: None,
            date: None,
            moreinfo: None,
        })
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn set_style(&mut self, style: impl Into<String>) -> ValidationResult<()> {
        let style = style.into();
        if !mutopia::is_valid_style(&style) {
            return Err(ValidationError::invalid(
                "style",
                format!("'{style}' is not a known style"),
            ));
        }
        self.style = style;
        Ok(())
    }

    pub fn set_license(&mut self, license: impl Into<String>) -> ValidationResult<()> {
        let license = license.into();
        if !mutopia::is_valid_license(&license) {
            return Err(ValidationError::invalid(
                "license",
                format!("'{license}' is not a known license"),
            ));
        }
        self.license = license;
        Ok(())
    }
}

// =============================================================================
// Headers
// =============================================================================

/// Score-level metadata. Owns its [`Composer`] and optional
/// [`MutopiaHeaders`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headers {
    pub title: String,
    pub composer: Composer,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dedication: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subsubtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub poet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub meter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub arranger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mutopiaheaders: Option<MutopiaHeaders>,
}

impl Headers {
    pub fn new(title: impl Into<String>, composer: Composer) -> Self {
        Self {
            title: title.into(),
            composer,
            dedication: None,
            subtitle: None,
            subsubtitle: None,
            poet: None,
            meter: None,
            arranger: None,
            tagline: None,
            copyright: None,
            mutopiaheaders: None,
        }
    }

    /// Headers are complete once they carry a non-blank title.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

// =============================================================================
// Instrument
// =============================================================================

/// One instrumental part.
///
/// Identity for registry purposes is the canonical `name` alone; the numeric
/// disambiguator distinguishes multiple parts of the same family (Violin 1,
/// Violin 2) and never participates in lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// Canonical family name (`violin`, `english_horn`).
    pub name: String,
    /// Numeric disambiguator, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub abbr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    clef: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub transposition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub midi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub family: Option<String>,
    /// Keyboard (grand staff) instrument.
    #[serde(default)]
    pub keyboard: bool,
}

impl Instrument {
    /// Create an instrument from a display or canonical name. The name is
    /// canonicalized on construction.
    pub fn new(name: &str) -> Self {
        Self {
            name: normalize_name(name),
            number: None,
            abbr: None,
            clef: None,
            transposition: None,
            midi: None,
            family: None,
            keyboard: false,
        }
    }

    pub fn clef(&self) -> Option<&str> {
        self.clef.as_deref()
    }

    /// Set the clef, which must belong to the valid-clef set. `None` clears
    /// it.
    pub fn set_clef(&mut self, clef: Option<String>) -> ValidationResult<()> {
        match clef {
            None => {
                self.clef = None;
                Ok(())
            }
            Some(clef) => {
                if !mutopia::is_valid_clef(&clef) {
                    return Err(ValidationError::invalid(
                        "clef",
                        format!("'{clef}' is not a valid clef"),
                    ));
                }
                self.clef = Some(clef.trim().to_lowercase());
                Ok(())
            }
        }
    }

    /// Human-readable part name: `"Violin 2"`, `"English Horn"`.
    pub fn part_name(&self) -> String {
        match self.number {
            Some(n) => format!("{} {n}", display_name(&self.name)),
            None => display_name(&self.name),
        }
    }

    /// Copy used when persisting to the registry: the disambiguator is
    /// excluded so all numbered parts share one entry per family.
    pub fn registry_form(&self) -> Self {
        let mut entry = self.clone();
        entry.number = None;
        entry
    }
}

// =============================================================================
// Ensemble
// =============================================================================

/// A named, ordered group of instruments. Order is musically meaningful: it
/// determines part order in the generated score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ensemble {
    pub name: String,
    pub instruments: Vec<Instrument>,
}

impl Ensemble {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instruments: Vec::new(),
        }
    }

    pub fn add_instrument(&mut self, instrument: Instrument) {
        self.instruments.push(instrument);
    }
}

// =============================================================================
// Movement
// =============================================================================

/// One movement of the piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub num: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tempo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub key: Option<String>,
}

impl Movement {
    pub fn new(num: u32) -> Self {
        Self {
            num,
            tempo: None,
            time: None,
            key: None,
        }
    }
}

// =============================================================================
// Piece
// =============================================================================

/// The whole score-in-progress. Exclusively owns its headers and its
/// instrument/movement sequences; instrument order is significant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub headers: Option<Headers>,
    #[serde(default)]
    pub instruments: Vec<Instrument>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub opus: Option<String>,
    #[serde(default)]
    pub movements: Vec<Movement>,
}

impl Piece {
    /// Title for display, `"Untitled"` until headers exist.
    pub fn title(&self) -> &str {
        self.headers
            .as_ref()
            .map(|h| h.title.as_str())
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Untitled")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composer_short_name_default() {
        let composer = Composer::new("Johann Sebastian Bach");
        assert_eq!(composer.short_name(), "J.S. Bach");
        assert_eq!(composer.canonical_key(), "johann_sebastian_bach");

        let single = Composer::new("Bach");
        assert_eq!(single.short_name(), "Bach");
    }

    #[test]
    fn test_composer_explicit_short_name_wins() {
        let mut composer = Composer::new("Johann Sebastian Bach");
        composer.shortname = Some("Bach".into());
        assert_eq!(composer.short_name(), "Bach");
    }

    #[test]
    fn test_mutopia_headers_invalid_style_names_field() {
        let err = MutopiaHeaders::new("Urtext", "bogus", "Public Domain").unwrap_err();
        assert_eq!(err.field(), "style");
    }

    #[test]
    fn test_mutopia_headers_invalid_license_names_field() {
        let err = MutopiaHeaders::new("Urtext", "Baroque", "bogus").unwrap_err();
        assert_eq!(err.field(), "license");
    }

    #[test]
    fn test_mutopia_headers_valid_construction() {
        let headers = MutopiaHeaders::new("Urtext", "Baroque", "Public Domain").unwrap();
        assert_eq!(headers.style(), "Baroque");
        assert_eq!(headers.license(), "Public Domain");
        assert!(headers.maintainer.is_none());
    }

    #[test]
    fn test_mutopia_headers_setters_revalidate() {
        let mut headers = MutopiaHeaders::new("Urtext", "Baroque", "Public Domain").unwrap();
        assert!(headers.set_style("nope").is_err());
        assert_eq!(headers.style(), "Baroque");
        headers.set_style("Romantic").unwrap();
        assert_eq!(headers.style(), "Romantic");
    }

    #[test]
    fn test_instrument_part_name() {
        let mut violin = Instrument::new("Violin");
        assert_eq!(violin.part_name(), "Violin");
        violin.number = Some(2);
        assert_eq!(violin.part_name(), "Violin 2");

        let horn = Instrument::new("English Horn");
        assert_eq!(horn.name, "english_horn");
        assert_eq!(horn.part_name(), "English Horn");
    }

    #[test]
    fn test_instrument_clef_validation() {
        let mut ins = Instrument::new("Viola");
        assert!(ins.set_clef(Some("alto".into())).is_ok());
        assert_eq!(ins.clef(), Some("alto"));
        let err = ins.set_clef(Some("sideways".into())).unwrap_err();
        assert_eq!(err.field(), "clef");
        assert_eq!(ins.clef(), Some("alto"));
        ins.set_clef(None).unwrap();
        assert!(ins.clef().is_none());
    }

    #[test]
    fn test_instrument_registry_form_drops_number() {
        let mut violin = Instrument::new("Violin");
        violin.number = Some(2);
        let entry = violin.registry_form();
        assert_eq!(entry.name, "violin");
        assert!(entry.number.is_none());
    }

    #[test]
    fn test_piece_title_fallback() {
        let mut piece = Piece::default();
        assert_eq!(piece.title(), "Untitled");
        piece.headers = Some(Headers::new("Cello Suite No. 1", Composer::new("Bach")));
        assert_eq!(piece.title(), "Cello Suite No. 1");
    }

    #[test]
    fn test_piece_serialization_roundtrip() {
        let mut piece = Piece::default();
        piece.opus = Some("BWV 1007".into());
        piece.headers = Some(Headers::new(
            "Cello Suite No. 1",
            Composer::new("Johann Sebastian Bach"),
        ));
        piece.instruments.push(Instrument::new("Violoncello"));
        let json = serde_json::to_string(&piece).unwrap();
        let back: Piece = serde_json::from_str(&json).unwrap();
        assert_eq!(back, piece);
    }
}
