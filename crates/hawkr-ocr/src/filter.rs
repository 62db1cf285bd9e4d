//! Junk-line filtering and decoration stripping.

/// Substrings that mark a line as menu-template noise rather than an item.
///
/// Matched case-insensitively anywhere in the line. "your menu" is kept as a
/// phrase — bare "your" or "menu" would reject legitimate item names, so the
/// filter stays deliberately conservative there.
const NOISE_PHRASES: &[&str] = &[
    "insert",
    "description",
    "placeholder",
    "your menu",
    "add item",
    "edit",
    "delete",
    "example",
    "logo",
    "profile",
];

/// Characters treated as decorative bullets/punctuation at line edges.
const DECORATION: &[char] = &['•', '-', '·', '$', '[', ']', '|', '.', '_', '…'];

/// Characters stripped from the edges of an extracted item name.
const NAME_TRIM: &[char] = &['.', '_', '-', '…', '•', '·'];

/// Whether a trimmed line is template/placeholder noise.
pub(crate) fn is_noise_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    NOISE_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// Strip a leading run of decorative bullet/punctuation characters and
/// whitespace, leaving the item text.
pub(crate) fn strip_leading_decoration(line: &str) -> &str {
    line.trim_start_matches(|c: char| c.is_whitespace() || DECORATION.contains(&c))
}

/// Strip leading/trailing runs of dot-leader and bullet characters from an
/// extracted name, e.g. `"Tacos al Pastor ....."` -> `"Tacos al Pastor"`.
pub(crate) fn clean_name(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(NAME_TRIM)
        .trim_start_matches(NAME_TRIM)
        .trim()
        .to_string()
}

/// Whether a cleaned name is only digits and spaces (an OCR fragment of a
/// price column, not an item).
pub(crate) fn is_digits_and_spaces(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_digit() || c == ' ')
}
