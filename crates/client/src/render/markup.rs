//! Placeholder and shortcode recognition in free text.

use regex::Regex;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
static SHORTCODE_REGEX: OnceLock<Regex> = OnceLock::new();
static ATTR_REGEX: OnceLock<Regex> = OnceLock::new();

/// `{meteoprog_informer}` or `{meteoprog_informer_<id>}`.
///
/// `{meteoprog_informer_}` does not match and stays literal.
fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"\{meteoprog_informer(?:_([A-Za-z0-9\-]+))?\}").expect("placeholder pattern is valid")
    })
}

/// `[meteoprog_informer ...]` and `[su_meteoprog_informer ...]`, optionally
/// doubled (`[[...]]`) to print the tag literally.
fn shortcode_regex() -> &'static Regex {
    SHORTCODE_REGEX.get_or_init(|| {
        Regex::new(r"\[(\[?)(su_meteoprog_informer|meteoprog_informer)((?:\s[^\]]*)?)\](\]?)")
            .expect("shortcode pattern is valid")
    })
}

fn attr_regex() -> &'static Regex {
    ATTR_REGEX.get_or_init(|| {
        Regex::new(r#"([A-Za-z_][\w-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'/]+))"#).expect("attribute pattern is valid")
    })
}

/// A placeholder found in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMatch {
    pub range: Range<usize>,
    /// The `<id>` suffix, if present.
    pub id: Option<String>,
}

/// Shortcode tags this crate handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcodeTag {
    Informer,
    ShortcodesUltimate,
}

impl ShortcodeTag {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "meteoprog_informer" => Some(Self::Informer),
            "su_meteoprog_informer" => Some(Self::ShortcodesUltimate),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Informer => "meteoprog_informer",
            Self::ShortcodesUltimate => "su_meteoprog_informer",
        }
    }
}

/// A shortcode found in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcodeMatch {
    pub range: Range<usize>,
    pub tag: ShortcodeTag,
    pub attrs: HashMap<String, String>,
    /// Written as `[[tag]]`; render the inner `[tag]` verbatim.
    pub escaped: Option<String>,
}

impl ShortcodeMatch {
    pub fn id(&self) -> &str {
        self.attrs.get("id").map(String::as_str).unwrap_or_default()
    }
}

/// All placeholders in `content`, in order.
pub fn find_placeholders(content: &str) -> Vec<PlaceholderMatch> {
    placeholder_regex()
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(PlaceholderMatch { range: whole.range(), id: caps.get(1).map(|m| m.as_str().to_string()) })
        })
        .collect()
}

/// All handled shortcodes in `content`, in order.
pub fn find_shortcodes(content: &str) -> Vec<ShortcodeMatch> {
    shortcode_regex()
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let tag = ShortcodeTag::parse(caps.get(2)?.as_str())?;
            let attrs = parse_attrs(caps.get(3).map(|m| m.as_str()).unwrap_or_default());
            let open = caps.get(1).is_some_and(|m| !m.is_empty());
            let close = caps.get(4).is_some_and(|m| !m.is_empty());
            let mut range = whole.range();
            let escaped = if open && close {
                let raw = whole.as_str();
                Some(raw[1..raw.len() - 1].to_string())
            } else {
                // a lone extra bracket stays in the surrounding text
                if open {
                    range.start += 1;
                }
                if close {
                    range.end -= 1;
                }
                None
            };
            Some(ShortcodeMatch { range, tag, attrs, escaped })
        })
        .collect()
}

/// Parse `name="value"`, `name='value'` and `name=value` pairs.
///
/// Names are lower-cased; later duplicates win.
pub fn parse_attrs(text: &str) -> HashMap<String, String> {
    attr_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_lowercase();
            let value = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4))?.as_str().to_string();
            Some((name, value))
        })
        .collect()
}
