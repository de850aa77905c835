//! Count formatting for log lines.

/// Format count with noun, appending `s` unless the count is exactly one.
///
/// - `plural_count(0, "tag")` -> `"0 tags"`
/// - `plural_count(1, "tag")` -> `"1 tag"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "tag"), "0 tags");
        assert_eq!(plural_count(1, "page"), "1 page");
        assert_eq!(plural_count(12, "file"), "12 files");
    }
}
