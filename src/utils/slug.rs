//! Anchor slugification.

use deunicode::deunicode;

/// Turn arbitrary text into an ASCII anchor id.
///
/// Text is transliterated first, then every run of characters other than
/// ASCII alphanumerics and `_` collapses into a single `-`. Leading and
/// trailing separators are dropped.
///
/// # Examples
///
/// - `slugify("Hello World!")` -> `"hello-world"`
/// - `slugify("Café")` -> `"cafe"`
/// - `slugify("C++ / Rust")` -> `"c-rust"`
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
