//! Resume matcher library - re-exports for testing and external use.
//!
//! - `config`: layered server configuration
//! - `extract`: PDF / DOCX text extraction
//! - `preprocess`: cleaning and section detection
//! - `skills`, `extractor`, `similarity`, `matcher`: the analysis pipeline
//! - `handlers`, `flash`, `templates`: the web layer

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod extract;
pub mod extractor;
pub mod flash;
pub mod handlers;
pub mod matcher;
pub mod models;
pub mod preprocess;
pub mod similarity;
pub mod skills;
pub mod templates;

// ============================================================================
// Application State
// ============================================================================

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self { config }
    }
}

// ============================================================================
// Router
// ============================================================================

/// All routes, with the upload limit and request tracing applied.
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(handlers::index).post(handlers::analyze_form))
        .route("/api/analyze", post(handlers::api_analyze))
        .route("/health", get(handlers::health))
        .nest_service("/static", static_files)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Re-export commonly used types
pub use config::{Config, Overrides};
pub use error::{AppError, ConfigError, ExtractError};
pub use extract::{allowed_file, extract_text, DocumentKind};
pub use extractor::{
    extract_education, extract_experience_level, extract_skills, EducationInfo,
    ExperienceProfile, Level, SkillMatches,
};
pub use matcher::match_resume;
pub use models::{MatchReport, SectionScore, Suggestion};
pub use preprocess::{clean_text, extract_sections, normalize, Sections};
pub use similarity::compute_similarity;
pub use skills::{all_skills, skills_by_category};
