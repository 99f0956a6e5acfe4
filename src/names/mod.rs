//! Name normalization and derivation.
//!
//! Canonical keys are the comparison-stable identifiers used for registry
//! lookup: lowercase, whitespace collapsed to underscores. Everything here is
//! a pure function of its input.

/// Turn a free-form display name into a canonical lookup key.
///
/// Lowercases and joins whitespace-separated words with `_`. Idempotent:
/// `normalize_name(normalize_name(s)) == normalize_name(s)`.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Presentation form of a canonical key: underscores back to spaces, each
/// word title-cased (`"english_horn"` -> `"English Horn"`).
pub fn display_name(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(titlecase_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn titlecase_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Abbreviated form of a person's name, used as the default composer short
/// name: initials of all but the last word, then the last word.
///
/// `"Johann Sebastian Bach"` -> `"J.S. Bach"`; a single word passes through.
pub fn abbreviate_name(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    match words.split_last() {
        None => String::new(),
        Some((last, [])) => (*last).to_string(),
        Some((last, rest)) => {
            let initials: String = rest
                .iter()
                .filter_map(|word| word.chars().next())
                .map(|c| format!("{}.", c.to_uppercase()))
                .collect();
            format!("{initials} {last}")
        }
    }
}

/// Best-effort guess at a publication-formatted name: last word followed by
/// the initials of the preceding words (`"Johann Sebastian Bach"` ->
/// `"BachJS"`).
pub fn mutopia_name_guess(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    match words.split_last() {
        None => String::new(),
        Some((last, rest)) => {
            let initials: String = rest
                .iter()
                .filter_map(|word| word.chars().next())
                .flat_map(char::to_uppercase)
                .collect();
            format!("{last}{initials}")
        }
    }
}

/// Strip a standalone numeral token out of an instrument name.
///
/// A numeral token is a whitespace-delimited word made entirely of digits; at
/// most one is expected and the first wins. Returns the remaining words
/// re-joined plus the parsed number, so `"Violin 2"` -> `("Violin", Some(2))`.
pub fn split_number(input: &str) -> (String, Option<u32>) {
    let mut number = None;
    let mut words = Vec::new();
    for word in input.split_whitespace() {
        if number.is_none() && !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
            number = word.parse().ok();
        } else {
            words.push(word);
        }
    }
    (words.join(" "), number)
}
