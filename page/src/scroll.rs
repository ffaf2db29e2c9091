//! Same-page anchor links.

/// Anchors whose `href` starts with this are intercepted.
pub const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;

/// Element id an in-page `href` points at.
///
/// `"#skills"` gives `Some("skills")`; a bare `"#"` or an href that is not
/// a fragment gives `None`.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
