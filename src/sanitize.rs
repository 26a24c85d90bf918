//! Allowlist sanitizer for article bodies.
//!
//! Article `content` arrives as an HTML fragment from the dataset and is
//! untrusted. It is parsed with `scraper` (html5ever, so malformed markup is
//! repaired the way a browser would) and re-serialized from scratch:
//!
//! - allowed tags are kept, with only `href`, `src`, `alt` and `title`
//!   attributes;
//! - active content (`script`, `style`, `iframe`, ...) is removed together
//!   with everything inside it;
//! - any other tag is unwrapped: the tag goes, its text stays;
//! - URL attributes must be relative or use `http`, `https` or `mailto`;
//! - comments and doctypes are dropped.
//!
//! Text is escaped on the way out, so the result is safe to embed with
//! `maud::PreEscaped`.

use crate::config::{ContentConfig, FORBIDDEN_TAGS};
use maud::Escaper;
use scraper::{ElementRef, Html, Node};
use std::collections::HashSet;
use std::fmt::Write;

const ALLOWED_ATTRS: &[&str] = &["href", "src", "alt", "title"];
const URL_ATTRS: &[&str] = &["href", "src"];
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];
const VOID_TAGS: &[&str] = &["br", "hr", "img", "wbr"];

/// Result of sanitizing one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    /// Clean HTML.
    pub html: String,
    /// Elements and attributes that were removed or unwrapped.
    pub stripped: usize,
}

#[derive(Debug, Clone)]
pub struct Sanitizer {
    allowed_tags: HashSet<String>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(&ContentConfig::default())
    }
}

impl Sanitizer {
    pub fn new(config: &ContentConfig) -> Self {
        let allowed_tags = config
            .allowed_tags
            .iter()
            .map(|t| t.to_ascii_lowercase())
            .filter(|t| !FORBIDDEN_TAGS.contains(&t.as_str()))
            .collect();
        Self { allowed_tags }
    }

    pub fn sanitize(&self, fragment: &str) -> Sanitized {
        let document = Html::parse_fragment(fragment);
        let mut out = Sanitized {
            html: String::with_capacity(fragment.len()),
            stripped: 0,
        };
        self.write_children(document.root_element(), &mut out);
        out
    }

    fn write_children(&self, parent: ElementRef<'_>, out: &mut Sanitized) {
        for child in parent.children() {
            match child.value() {
                Node::Text(text) => escape_into(&mut out.html, text),
                Node::Element(_) => {
                    if let Some(element) = ElementRef::wrap(child) {
                        self.write_element(element, out);
                    }
                }
                Node::Comment(_) | Node::ProcessingInstruction(_) => out.stripped += 1,
                _ => {}
            }
        }
    }

    fn write_element(&self, element: ElementRef<'_>, out: &mut Sanitized) {
        let name = element.value().name();

        if FORBIDDEN_TAGS.contains(&name) {
            out.stripped += 1;
            return;
        }
        if !self.allowed_tags.contains(name) {
            out.stripped += 1;
            self.write_children(element, out);
            return;
        }

        out.html.push('<');
        out.html.push_str(name);
        for (attr, value) in element.value().attrs() {
            if !ALLOWED_ATTRS.contains(&attr)
                || (URL_ATTRS.contains(&attr) && !is_safe_url(value))
            {
                out.stripped += 1;
                continue;
            }
            out.html.push(' ');
            out.html.push_str(attr);
            out.html.push_str("=\"");
            escape_into(&mut out.html, value);
            out.html.push('"');
        }
        out.html.push('>');

        if VOID_TAGS.contains(&name) {
            return;
        }
        self.write_children(element, out);
        out.html.push_str("</");
        out.html.push_str(name);
        out.html.push('>');
    }
}

fn escape_into(buffer: &mut String, text: &str) {
    // Writing into a String cannot fail.
    let _ = Escaper::new(buffer).write_str(text);
}

/// Relative URLs and the schemes in [`SAFE_SCHEMES`] pass.
///
/// Browsers ignore whitespace and control characters inside a scheme
/// (`java\tscript:`), so those are removed before looking for it.
fn is_safe_url(url: &str) -> bool {
    let compact: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();
    let scheme_end = compact.find(':');
    let path_start = compact.find(['/', '?', '#']);
    match (scheme_end, path_start) {
        (None, _) => true,
        (Some(colon), Some(slash)) if slash < colon => true,
        (Some(colon), _) => {
            let scheme = compact[..colon].to_ascii_lowercase();
            SAFE_SCHEMES.contains(&scheme.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(html: &str) -> String {
        Sanitizer::default().sanitize(html).html
    }

    #[test]
    fn keeps_allowed_markup() {
        let html = "<p>Hello <strong>world</strong></p><h2>Heading</h2>";
        assert_eq!(clean(html), html);
    }

    #[test]
    fn removes_script_with_content() {
        let result = Sanitizer::default().sanitize("<p>ok</p><script>alert('xss')</script>");
        assert_eq!(result.html, "<p>ok</p>");
        assert_eq!(result.stripped, 1);
    }

    #[test]
    fn removes_style_and_iframe() {
        let html = "<style>body{display:none}</style><iframe src=\"https://evil.test\"></iframe><p>text</p>";
        assert_eq!(clean(html), "<p>text</p>");
    }

    #[test]
    fn unwraps_unknown_tags_keeping_text() {
        assert_eq!(clean("<div><span>inner</span></div>"), "inner");
    }

    #[test]
    fn strips_event_handler_attributes() {
        let result = Sanitizer::default().sanitize("<p onclick=\"steal()\" class=\"x\">hi</p>");
        assert_eq!(result.html, "<p>hi</p>");
        assert_eq!(result.stripped, 2);
    }

    #[test]
    fn rejects_javascript_urls() {
        assert_eq!(clean("<a href=\"javascript:alert(1)\">x</a>"), "<a>x</a>");
        assert_eq!(clean("<a href=\"java\tscript:alert(1)\">x</a>"), "<a>x</a>");
        assert_eq!(clean("<img src=\"data:image/svg+xml,abc\">"), "<img>");
    }

    #[test]
    fn keeps_safe_urls() {
        assert_eq!(
            clean("<a href=\"https://example.com/a?b=1\">x</a>"),
            "<a href=\"https://example.com/a?b=1\">x</a>"
        );
        assert_eq!(clean("<a href=\"/article/2\">x</a>"), "<a href=\"/article/2\">x</a>");
        assert_eq!(
            clean("<a href=\"mailto:desk@example.com\">x</a>"),
            "<a href=\"mailto:desk@example.com\">x</a>"
        );
    }

    #[test]
    fn escapes_text_and_attribute_values() {
        assert_eq!(clean("<p>1 &lt; 2 &amp; 3</p>"), "<p>1 &lt; 2 &amp; 3</p>");
        assert_eq!(
            clean("<img alt='say \"hi\"'>"),
            "<img alt=\"say &quot;hi&quot;\">"
        );
    }

    #[test]
    fn drops_comments() {
        assert_eq!(clean("<p>a<!-- hidden -->b</p>"), "<p>ab</p>");
    }

    #[test]
    fn repairs_unclosed_tags() {
        assert_eq!(clean("<p>open <em>emphasis"), "<p>open <em>emphasis</em></p>");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(clean("Just words."), "Just words.");
    }

    #[test]
    fn forbidden_tags_cannot_be_allowed() {
        let config = ContentConfig {
            allowed_tags: vec!["p".to_string(), "script".to_string()],
        };
        let sanitizer = Sanitizer::new(&config);
        assert_eq!(sanitizer.sanitize("<script>x()</script><p>y</p>").html, "<p>y</p>");
    }

    #[test]
    fn custom_allowlist_unwraps_everything_else() {
        let config = ContentConfig {
            allowed_tags: vec!["p".to_string()],
        };
        let sanitizer = Sanitizer::new(&config);
        assert_eq!(
            sanitizer.sanitize("<p><strong>bold</strong></p>").html,
            "<p>bold</p>"
        );
    }

    #[test]
    fn safe_url_rules() {
        assert!(is_safe_url("https://example.com"));
        assert!(is_safe_url("HTTP://EXAMPLE.COM"));
        assert!(is_safe_url("relative/path"));
        assert!(is_safe_url("/a:b"));
        assert!(is_safe_url("#anchor"));
        assert!(!is_safe_url("javascript:void(0)"));
        assert!(!is_safe_url(" JavaScript:void(0)"));
        assert!(!is_safe_url("vbscript:x"));
    }
}
