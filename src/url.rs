//! Share-link parsing.

use std::sync::LazyLock;

use regex::Regex;

static PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gofile\.io/d/([a-zA-Z0-9]+)").expect("valid regex"));

static QUERY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gofile\.io/\?c=([a-zA-Z0-9]+)").expect("valid regex"));

static BARE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z0-9]{6,})").expect("valid regex"));

/// Extracts a content identifier from a pasted share link.
///
/// Tries, in order: the path form (`gofile.io/d/<id>`), the legacy query
/// form (`gofile.io/?c=<id>`), and finally any alphanumeric run of at
/// least 6 characters. Returns the first match's captured group.
///
/// The bare fallback is permissive by design of the original UI and will
/// match substrings of unrelated URLs; callers pasting arbitrary text get
/// whatever run it finds first.
///
/// # Panics
///
/// Panics if the internal regexes fail to compile (compile-time constants,
/// will not happen in practice).
#[must_use]
pub fn extract_content_id(input: &str) -> Option<&str> {
    for re in [&*PATH_RE, &*QUERY_RE, &*BARE_RE] {
        if let Some(captures) = re.captures(input)
            && let Some(m) = captures.get(1)
        {
            return Some(m.as_str());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- path form ---

    #[test]
    fn extract_path_form() {
        assert_eq!(
            extract_content_id("https://gofile.io/d/abc123"),
            Some("abc123")
        );
    }

    #[test]
    fn extract_path_form_mixed_case_id() {
        assert_eq!(
            extract_content_id("https://gofile.io/d/AbC9xY"),
            Some("AbC9xY")
        );
    }

    #[test]
    fn extract_path_form_embedded_in_text() {
        assert_eq!(
            extract_content_id("check this out: https://gofile.io/d/xyz789 thanks"),
            Some("xyz789")
        );
    }

    #[test]
    fn extract_path_form_stops_at_non_alphanumeric() {
        assert_eq!(
            extract_content_id("https://gofile.io/d/abc123?foo=bar"),
            Some("abc123")
        );
    }

    // --- query form ---

    #[test]
    fn extract_query_form() {
        assert_eq!(
            extract_content_id("https://gofile.io/?c=def456"),
            Some("def456")
        );
    }

    #[test]
    fn extract_query_form_http() {
        assert_eq!(
            extract_content_id("http://gofile.io/?c=qq11ww"),
            Some("qq11ww")
        );
    }

    // --- fallback ---

    #[test]
    fn extract_bare_identifier() {
        assert_eq!(extract_content_id("abc123"), Some("abc123"));
    }

    #[test]
    fn extract_bare_requires_six_chars() {
        assert_eq!(extract_content_id("abc12"), None);
        assert_eq!(extract_content_id("abc123"), Some("abc123"));
    }

    #[test]
    fn fallback_matches_unrelated_urls() {
        // Known permissive behavior: the bare run grabs the first long
        // alphanumeric substring of any input.
        assert_eq!(
            extract_content_id("https://example.com/file"),
            Some("example")
        );
    }

    // --- no match ---

    #[test]
    fn extract_empty_input() {
        assert_eq!(extract_content_id(""), None);
    }

    #[test]
    fn extract_short_garbage() {
        assert_eq!(extract_content_id("a b c 1 2 3"), None);
        assert_eq!(extract_content_id("!!-??_.."), None);
    }

    #[test]
    fn extract_whitespace_only() {
        assert_eq!(extract_content_id("   \n\t  "), None);
    }

    // --- precedence ---

    #[test]
    fn path_form_wins_over_bare_run() {
        // "gofile" itself is a 6-char alphanumeric run, the /d/ capture
        // must still take precedence.
        assert_eq!(
            extract_content_id("https://gofile.io/d/ab12cd"),
            Some("ab12cd")
        );
    }

    #[test]
    fn query_form_wins_over_bare_run() {
        assert_eq!(
            extract_content_id("https://gofile.io/?c=zz99zz"),
            Some("zz99zz")
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn extract_never_panics(input in ".*") {
                let _ = extract_content_id(&input);
            }

            #[test]
            fn path_form_roundtrip(id in "[a-zA-Z0-9]{6,12}") {
                let url = format!("https://gofile.io/d/{id}");
                prop_assert_eq!(extract_content_id(&url), Some(id.as_str()));
            }

            #[test]
            fn query_form_roundtrip(id in "[a-zA-Z0-9]{6,12}") {
                let url = format!("https://gofile.io/?c={id}");
                prop_assert_eq!(extract_content_id(&url), Some(id.as_str()));
            }
        }
    }
}
