//! HTML templates and styling for the resume matcher.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants
//! - `components` - Base layout, flash alert, formatting filters
//! - `index` - Analyze page
//! - `results` - Match report page
//! - `errors` - 404 and 500 pages

mod components;
mod errors;
mod index;
mod results;
mod styles;

pub use components::{
    base_html, flash_alert, format_list, format_percentage, html_escape, PAGE_MODULE,
};
pub use errors::{render_not_found, render_server_error};
pub use index::render_index;
pub use results::render_results;
pub use styles::STYLE;
