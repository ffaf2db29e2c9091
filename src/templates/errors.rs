//! 404 and 500 pages.

use super::components::base_html;

fn error_page(code: u16, title: &str, message: &str) -> String {
    let content = format!(
        r#"<div class="container error-page">
        <div class="code">{code}</div>
        <h2>{title}</h2>
        <p class="text-muted">{message}</p>
        <a href="/" class="btn btn-primary mt-3"><i class="fas fa-home me-2"></i>Back to analyzer</a>
    </div>"#
    );
    base_html(title, &content, None)
}

pub fn render_not_found() -> String {
    error_page(
        404,
        "Page Not Found",
        "The page you are looking for does not exist.",
    )
}

pub fn render_server_error() -> String {
    error_page(
        500,
        "Something Went Wrong",
        "An unexpected error occurred. Please try again later.",
    )
}
