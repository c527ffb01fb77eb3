//! Small string helpers shared by the admin surfaces and the renderer.

/// Marker a masked key always contains; saving a value with it is a no-op.
pub const MASK_MARKER: &str = "****";

/// Mask the middle of a string, keeping `head` leading and `tail` trailing characters.
///
/// The hidden part is always replaced by exactly `between` mask characters, so
/// the output length says nothing about the secret. Strings of
/// `len <= head + tail` are returned unchanged.
///
/// `550e8400-e29b-41d4-a716-446655440000` becomes `550e********440000`.
pub fn mask_string(value: &str, head: usize, tail: usize, between: usize, mask: char) -> String {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len();

    if len <= head + tail {
        return value.to_string();
    }

    let mut out = String::with_capacity(head + between + tail);
    out.extend(&chars[..head]);
    out.extend(std::iter::repeat_n(mask, between));
    out.extend(&chars[len - tail..]);
    out
}

/// Keys and informer IDs as shown in admin forms: 4 leading, 8 stars, 6 trailing.
pub fn mask_api_key(value: &str) -> String {
    mask_string(value, 4, 6, 8, '*')
}

/// Whether a submitted key is the masked echo of the stored one.
pub fn is_masked(value: &str) -> bool {
    value.contains(MASK_MARKER)
}

/// Lower-cased host of a URL or bare domain.
///
/// `https://WWW.Example.com/path` and `www.example.com` both yield
/// `www.example.com`. Returns an empty string for empty input.
pub fn host_from_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    if let Ok(parsed) = url::Url::parse(raw)
        && let Some(host) = parsed.host_str()
    {
        return host.to_lowercase();
    }

    let stripped = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .or_else(|| raw.strip_prefix("//"))
        .unwrap_or(raw);
    let host = stripped.split(['/', '?', '#']).next().unwrap_or_default();
    let host = host.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    host.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_uuid() {
        assert_eq!(mask_api_key("550e8400-e29b-41d4-a716-446655440000"), "550e********440000");
    }

    #[test]
    fn test_mask_fixed_star_count() {
        // 12 chars with 2 hidden still yield 8 stars
        assert_eq!(mask_api_key("abcdXYuvwxyz"), "abcd********uvwxyz");
    }

    #[test]
    fn test_mask_short_returned_unchanged() {
        assert_eq!(mask_api_key("abc123"), "abc123");
        assert_eq!(mask_api_key("abcdefghij"), "abcdefghij");
        assert_eq!(mask_api_key(""), "");
    }

    #[test]
    fn test_mask_custom_parameters() {
        assert_eq!(mask_string("secretvalue", 2, 2, 3, '#'), "se###ue");
    }

    #[test]
    fn test_masked_output_is_detected() {
        assert!(is_masked(&mask_api_key("abcd1234567890uvwxyz")));
        assert!(!is_masked("abcd1234567890uvwxyz"));
    }

    #[test]
    fn test_host_from_full_url() {
        assert_eq!(host_from_url("https://WWW.WordPress.org/news/"), "www.wordpress.org");
        assert_eq!(host_from_url("http://example.com:8080/x"), "example.com");
    }

    #[test]
    fn test_host_from_bare_domain() {
        assert_eq!(host_from_url("Sub.Example.com"), "sub.example.com");
        assert_eq!(host_from_url("example.com/path"), "example.com");
    }

    #[test]
    fn test_host_from_empty() {
        assert_eq!(host_from_url(""), "");
        assert_eq!(host_from_url("   "), "");
    }
}
