//! Shared HTML components: base layout, flash alert, formatting filters.

use crate::flash::Flash;

use super::styles::STYLE;

/// Module the page controller is compiled to. Built by
/// `wasm-pack build page --target web --out-dir ../static/pkg`.
pub const PAGE_MODULE: &str = "/static/pkg/resume_matcher_page.js";

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/js/bootstrap.bundle.min.js";
const FONT_AWESOME_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css";

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Filters
// ============================================================================

/// `73.456` -> `73.5%`. Non-finite values render as `0.0%`.
pub fn format_percentage(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}%", value)
    } else {
        "0.0%".to_string()
    }
}

/// At most `max` leading items.
pub fn format_list<T>(items: &[T], max: usize) -> &[T] {
    &items[..items.len().min(max)]
}

// ============================================================================
// Flash Alert
// ============================================================================

pub fn flash_alert(flash: Option<&Flash>) -> String {
    let Some(flash) = flash else {
        return String::new();
    };
    format!(
        r#"<div class="container mt-3">
        <div class="alert alert-{level} alert-dismissible fade show" role="alert">
            {message}
            <button type="button" class="btn-close" data-bs-dismiss="alert"></button>
        </div>
    </div>"#,
        level = flash.level.as_str(),
        message = html_escape(&flash.message),
    )
}

// ============================================================================
// Base HTML Template
// ============================================================================

pub fn base_html(title: &str, content: &str, flash: Option<&Flash>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - AI Resume Matcher</title>
    <link rel="stylesheet" href="{bootstrap_css}">
    <link rel="stylesheet" href="{font_awesome}">
    <style>{STYLE}</style>
</head>
<body>
    <nav class="navbar navbar-dark" style="background: var(--brand-dark);">
        <div class="container">
            <a class="navbar-brand" href="/"><i class="fas fa-file-alt me-2"></i>AI Resume Matcher</a>
        </div>
    </nav>
    {flash}
    {content}
    <script src="{bootstrap_js}"></script>
    <script type="module">
    import init, {{ showAlert, copyToClipboard, animateProgressBar, createSkillsChart }} from '{page_module}';

    await init();
    document.documentElement.classList.add('page-ready');
    window.ResumeMatcherApp = {{ showAlert, copyToClipboard, animateProgressBar, createSkillsChart }};
    document.dispatchEvent(new Event('resume-matcher:ready'));
    </script>
</body>
</html>"#,
        title = html_escape(title),
        bootstrap_css = BOOTSTRAP_CSS,
        font_awesome = FONT_AWESOME_CSS,
        bootstrap_js = BOOTSTRAP_JS,
        page_module = PAGE_MODULE,
        flash = flash_alert(flash),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(73.456), "73.5%");
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(f64::NAN), "0.0%");
    }

    #[test]
    fn test_format_list() {
        let items = [1, 2, 3, 4, 5, 6, 7];
        assert_eq!(format_list(&items, 5), &[1, 2, 3, 4, 5]);
        assert_eq!(format_list(&items[..2], 5), &[1, 2]);
        assert!(format_list::<u8>(&[], 5).is_empty());
    }

    #[test]
    fn test_flash_alert_is_escaped() {
        let html = flash_alert(Some(&Flash::danger("<b>bad</b>")));
        assert!(html.contains("alert-danger"));
        assert!(html.contains("&lt;b&gt;bad&lt;/b&gt;"));
        assert_eq!(flash_alert(None), "");
    }

    #[test]
    fn test_base_html_loads_page_module() {
        let html = base_html("Analyze", "<p>hi</p>", None);
        assert!(html.contains(PAGE_MODULE));
        assert!(html.contains("window.ResumeMatcherApp"));
        assert!(html.contains("<title>Analyze - AI Resume Matcher</title>"));
    }

    #[test]
    fn test_reveal_targets_stay_visible_until_module_loads() {
        let html = base_html("Analyze", "", None);
        let init = html.find("await init();").unwrap();
        let ready = html.find("classList.add('page-ready')").unwrap();
        assert!(init < ready);

        assert!(STYLE.contains(".page-ready .animate-on-scroll:not(.fade-in-up)"));
        assert!(!STYLE.contains("\n.animate-on-scroll {"));
    }
}
