//! Markup sanitization built on the `ammonia` primitive.

use std::collections::{HashMap, HashSet};

use ammonia::Builder;

/// Elements allowed through `sanitize_markup`.
const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "b", "strong", "i", "em", "u", "h1", "h2", "h3", "h4", "h5", "h6", "ol", "ul",
    "li", "a", "img", "blockquote", "div", "span",
];

/// Attributes allowed on any element.
const GENERIC_ATTRIBUTES: &[&str] = &["class", "style", "title"];

/// URL schemes allowed on `a[href]` and `img[src]`. Relative and local
/// paths pass through; anything else (`javascript:` included) is removed.
const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Elements whose content is dropped wholesale instead of unwrapped to
/// text. Script and style bodies are not safely extractable.
const DROP_CONTENT_TAGS: &[&str] = &["script", "style"];

fn tag_attributes() -> HashMap<&'static str, HashSet<&'static str>> {
    let mut map = HashMap::new();
    map.insert("a", ["href"].into_iter().collect());
    map.insert("img", ["src", "alt"].into_iter().collect());
    map
}

fn markup_builder() -> Builder<'static> {
    let mut builder = Builder::default();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .generic_attributes(GENERIC_ATTRIBUTES.iter().copied().collect())
        .tag_attributes(tag_attributes())
        .url_schemes(ALLOWED_URL_SCHEMES.iter().copied().collect())
        .clean_content_tags(DROP_CONTENT_TAGS.iter().copied().collect())
        .link_rel(Some("noopener noreferrer"));
    builder
}

/// Strip every element and attribute outside the allow-list.
///
/// Content of removed elements is kept as plain text where that is safe;
/// script and style bodies are discarded. Empty input yields an empty
/// string, never an error.
pub fn sanitize_markup(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    markup_builder().clean(input).to_string()
}

/// Strip all markup, keeping only the textual content.
pub fn sanitize_text(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    let mut builder = Builder::default();
    builder
        .tags(HashSet::new())
        .generic_attributes(HashSet::new())
        .tag_attributes(HashMap::new())
        .clean_content_tags(DROP_CONTENT_TAGS.iter().copied().collect());
    builder.clean(input).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_element_removed_with_content() {
        let out = sanitize_markup("<p>hi</p><script>alert('x')</script>");
        assert!(!out.contains("<script"));
        assert!(!out.contains("alert"));
        assert!(out.contains("<p>hi</p>"));
    }

    #[test]
    fn test_event_handler_attributes_stripped() {
        let out = sanitize_markup(r#"<p onclick="steal()">ok</p><img src="a.png" onerror="x()">"#);
        assert!(!out.contains("onclick"));
        assert!(!out.contains("onerror"));
        assert!(out.contains("ok"));
        assert!(out.contains(r#"src="a.png""#));
    }

    #[test]
    fn test_javascript_scheme_neutralized() {
        let out = sanitize_markup(r#"<a href="javascript:alert(1)">click</a>"#);
        assert!(!out.contains("javascript:"));
        assert!(out.contains("click"));
    }

    #[test]
    fn test_allowed_schemes_and_relative_urls_kept() {
        let out = sanitize_markup(concat!(
            r#"<a href="https://example.com/a">a</a>"#,
            r#"<a href="mailto:x@y.com">m</a>"#,
            r#"<a href="tel:+15550100">t</a>"#,
            r#"<a href="/archive/42">l</a>"#,
        ));
        assert!(out.contains("https://example.com/a"));
        assert!(out.contains("mailto:x@y.com"));
        assert!(out.contains("tel:+15550100"));
        assert!(out.contains("/archive/42"));
    }

    #[test]
    fn test_form_controls_removed_content_preserved() {
        let out = sanitize_markup("<form action=\"/x\"><input value=\"a\"><textarea>b</textarea>keep me</form>");
        assert!(!out.contains("<form"));
        assert!(!out.contains("<input"));
        assert!(!out.contains("<textarea"));
        assert!(out.contains("keep me"));
    }

    #[test]
    fn test_object_and_embed_removed() {
        let out = sanitize_markup(r#"<object data="x"></object><embed src="y"><p>text</p>"#);
        assert!(!out.contains("<object"));
        assert!(!out.contains("<embed"));
        assert!(out.contains("<p>text</p>"));
    }

    #[test]
    fn test_structural_elements_kept() {
        let input = "<h2>Title</h2><ul><li>one</li></ul><blockquote>q</blockquote><div><span>s</span></div>";
        let out = sanitize_markup(input);
        assert!(out.contains("<h2>"));
        assert!(out.contains("<li>one</li>"));
        assert!(out.contains("<blockquote>"));
        assert!(out.contains("<span>s</span>"));
    }

    #[test]
    fn test_unknown_attributes_stripped() {
        let out = sanitize_markup(r#"<img src="a.png" alt="pic" title="t" width="300" data-x="y">"#);
        assert!(out.contains(r#"alt="pic""#));
        assert!(out.contains(r#"title="t""#));
        assert!(!out.contains("width"));
        assert!(!out.contains("data-x"));
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert_eq!(sanitize_markup(""), "");
        assert_eq!(sanitize_text(""), "");
    }

    #[test]
    fn test_text_strips_all_markup() {
        let out = sanitize_text("<h1>Title</h1><p>body</p>");
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
        assert!(out.contains("Title"));
        assert!(out.contains("body"));
    }

    #[test]
    fn test_text_drops_script_content() {
        let out = sanitize_text("before<script>alert(1)</script>after");
        assert!(!out.contains("alert"));
        assert!(out.contains("before"));
        assert!(out.contains("after"));
    }
}
