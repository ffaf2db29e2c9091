//! CSS for the resume matcher pages.
//!
//! Bootstrap supplies the layout; this adds the upload zone, score bars and
//! the scroll-reveal animation the page controller toggles.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
:root {
    --brand: #4f46e5;
    --brand-dark: #3730a3;
    --muted: #6b7280;
    --surface: #f9fafb;
    --border: #e5e7eb;
    --good: #16a34a;
    --fair: #d97706;
    --poor: #dc2626;
}

body {
    background: var(--surface);
    min-height: 100vh;
}

.hero {
    background: linear-gradient(135deg, var(--brand) 0%, var(--brand-dark) 100%);
    color: #fff;
    padding: 3rem 0 2rem;
    margin-bottom: 2rem;
}

.hero p { opacity: 0.85; }

/* Upload zone */
.upload-area {
    border: 2px dashed var(--border);
    border-radius: 12px;
    padding: 2.5rem 1rem;
    text-align: center;
    cursor: pointer;
    background: #fff;
    transition: border-color 0.2s ease, background 0.2s ease;
}

.upload-area:hover,
.upload-area.dragover {
    border-color: var(--brand);
    background: #eef2ff;
}

.upload-area .upload-icon {
    font-size: 2.5rem;
    color: var(--brand);
}

.file-info {
    display: none;
    border: 1px solid var(--border);
    border-radius: 12px;
    padding: 1rem;
    background: #fff;
}

/* Results */
.score-circle {
    width: 160px;
    height: 160px;
    border-radius: 50%;
    display: flex;
    align-items: center;
    justify-content: center;
    margin: 0 auto;
    font-size: 2.5rem;
    font-weight: 700;
    color: #fff;
}

.score-good { background: var(--good); }
.score-fair { background: var(--fair); }
.score-poor { background: var(--poor); }

.progress { height: 1.25rem; }
.progress-bar { transition: width 0.1s linear; }

.skill-badge {
    display: inline-block;
    margin: 0.15rem;
}

.suggestion {
    border-left: 4px solid var(--border);
    padding-left: 1rem;
    margin-bottom: 1rem;
}

.suggestion.priority-high { border-left-color: var(--poor); }
.suggestion.priority-medium { border-left-color: var(--fair); }

/* Scroll reveal. Targets hide only once the page module can reveal them. */
.page-ready .animate-on-scroll:not(.fade-in-up) {
    opacity: 0;
    transform: translateY(24px);
}

.fade-in-up {
    opacity: 1;
    transform: translateY(0);
    transition: opacity 0.6s ease, transform 0.6s ease;
}

.error-page {
    text-align: center;
    padding: 5rem 1rem;
}

.error-page .code {
    font-size: 5rem;
    font-weight: 700;
    color: var(--brand);
}
"#;
