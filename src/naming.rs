//! Filename parsing for the `NNN-name` convention.
//!
//! Documents are usually named with a numeric prefix (`001.md`,
//! `002-rainy-day.md`, `2024-05-01.md`). The prefix only orders the files;
//! the remainder, with dashes turned into spaces, is the display title used
//! when `site.labels = "title"`.
//!
//! - `002-rainy-day` → "rainy day"
//! - `001` → "001" (nothing after the prefix, so the stem is kept)
//! - `notes` → "notes"

/// The part of a stem after its `NNN-` prefix. Stems without a numeric
/// prefix come back whole; a bare number gives an empty string.
pub fn strip_number_prefix(stem: &str) -> &str {
    if let Some((prefix, rest)) = stem.split_once('-')
        && prefix.parse::<u32>().is_ok()
    {
        return rest;
    }
    if stem.parse::<u32>().is_ok() {
        return "";
    }
    stem
}

/// Display title for a stem, falling back to the stem itself when the name
/// part is empty (`001` → "001").
pub fn display_title(stem: &str) -> String {
    match strip_number_prefix(stem) {
        "" => stem.to_string(),
        rest => rest.replace('-', " "),
    }
}
