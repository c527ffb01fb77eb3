//! Output escaping for emitted markup.

/// Escape HTML special characters for text and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a value used both inside a double-quoted JS string and an HTML attribute.
///
/// Markup characters become entities, quotes cannot terminate either context,
/// and line breaks are flattened to `\n` escapes.
pub fn escape_js(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Make serialized JSON safe to inline in a `<script>` element.
pub fn inline_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#), "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;");
    }

    #[test]
    fn test_escape_js_leaves_ids_alone() {
        assert_eq!(escape_js("11111111-1111-1111-aa3a-5bb2d44d4fd1"), "11111111-1111-1111-aa3a-5bb2d44d4fd1");
    }

    #[test]
    fn test_escape_js_breakout_attempt() {
        let escaped = escape_js("x\"});</script><script>alert('1')\r\n");
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains('<'));
        assert_eq!(escaped, "x&quot;});&lt;/script&gt;&lt;script&gt;alert(\\'1\\')\\n");
    }

    #[test]
    fn test_inline_json() {
        assert_eq!(inline_json(r#"{"u":"</script>"}"#), r#"{"u":"<\/script>"}"#);
    }
}
