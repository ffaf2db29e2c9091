//! HTTP route handlers.
//!
//! The HTML form flow reports every problem as a flash message plus a
//! redirect back to `/`; the JSON API reports them through [`AppError`].

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde_json::json;
use std::sync::Arc;

use crate::error::{ApiResult, AppError};
use crate::extract::{allowed_file, extract_text};
use crate::flash::{set_flash, take_flash, Flash};
use crate::matcher::match_resume;
use crate::models::MatchReport;
use crate::preprocess::normalize;
use crate::skills::all_skills;
use crate::templates::{render_index, render_not_found, render_results};
use crate::AppState;

/// Shortest job description the form accepts, in characters after trimming.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;

pub const MSG_NO_RESUME: &str = "No resume file uploaded";
pub const MSG_NO_JOB_DESCRIPTION: &str = "No job description provided";
pub const MSG_NO_FILE_SELECTED: &str = "No file selected";
pub const MSG_INVALID_TYPE: &str = "Invalid file type. Please upload PDF or DOCX files only.";
pub const MSG_TOO_SHORT: &str = "Job description is too short. Please provide more details.";
pub const MSG_NO_TEXT: &str =
    "Could not extract text from the resume. Please check the file format.";
pub const MSG_GENERIC: &str =
    "An error occurred while processing your request. Please try again.";

/// Flash text for an upload over `max_bytes`, with the limit in the largest whole unit.
pub fn too_large_message(max_bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    let limit = if max_bytes >= MB && max_bytes % MB == 0 {
        format!("{}MB", max_bytes / MB)
    } else if max_bytes >= KB && max_bytes % KB == 0 {
        format!("{}KB", max_bytes / KB)
    } else {
        format!("{} bytes", max_bytes)
    };
    format!("File is too large. Please upload a file smaller than {}.", limit)
}

// ============================================================================
// Upload Parsing
// ============================================================================

/// Uploaded resume file.
#[derive(Debug)]
pub struct ResumeUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Fields of the analyze form. Each is `None` when the part was absent.
#[derive(Debug, Default)]
pub struct AnalyzeUpload {
    pub resume: Option<ResumeUpload>,
    pub job_description: Option<String>,
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(format!("Malformed upload: {}", err.body_text()))
    }
}

/// Read the `resume` and `job_description` parts, ignoring anything else.
pub async fn read_upload(mut multipart: Multipart) -> ApiResult<AnalyzeUpload> {
    let mut upload = AnalyzeUpload::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("resume") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                upload.resume = Some(ResumeUpload {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            Some("job_description") => {
                upload.job_description = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    Ok(upload)
}

/// Form-level checks, in the order the user should see them.
pub fn validate_form(upload: AnalyzeUpload) -> Result<(ResumeUpload, String), Flash> {
    let resume = upload.resume.ok_or_else(|| Flash::danger(MSG_NO_RESUME))?;
    let job_description = upload
        .job_description
        .ok_or_else(|| Flash::danger(MSG_NO_JOB_DESCRIPTION))?;
    let job_description = job_description.trim().to_string();

    if resume.filename.is_empty() {
        return Err(Flash::warning(MSG_NO_FILE_SELECTED));
    }
    if !allowed_file(&resume.filename) {
        return Err(Flash::danger(MSG_INVALID_TYPE));
    }
    if job_description.chars().count() < MIN_JOB_DESCRIPTION_CHARS {
        return Err(Flash::warning(MSG_TOO_SHORT));
    }

    Ok((resume, job_description))
}

// ============================================================================
// Analysis
// ============================================================================

/// Extract, normalize and score. `Ok(None)` means the file held no text.
///
/// Runs on the blocking pool; PDF parsing is CPU-bound.
pub async fn analyze(resume: ResumeUpload, job_description: String) -> ApiResult<Option<MatchReport>> {
    tracing::info!("Processing resume: {}", resume.filename);

    let report = tokio::task::spawn_blocking(move || -> ApiResult<Option<MatchReport>> {
        let text = extract_text(&resume.bytes, &resume.filename)?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        let resume_text = normalize(&text);
        let jd_text = normalize(&job_description);
        tracing::debug!(
            resume_chars = resume_text.len(),
            jd_chars = jd_text.len(),
            "Text extraction and preprocessing completed"
        );

        Ok(Some(match_resume(&resume_text, &jd_text, &all_skills())))
    })
    .await
    .map_err(|e| AppError::Internal(format!("analysis task failed: {}", e)))??;

    if let Some(report) = &report {
        tracing::info!(
            "Analysis completed. Overall score: {}",
            report.overall_match_score
        );
    }
    Ok(report)
}

// ============================================================================
// HTML Form
// ============================================================================

fn flash_redirect(jar: CookieJar, flash: Flash) -> Response {
    (set_flash(jar, &flash), Redirect::to("/")).into_response()
}

pub async fn index(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = take_flash(jar);
    (jar, Html(render_index(flash.as_ref())))
}

pub async fn analyze_form(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let upload = match multipart {
        Ok(multipart) => read_upload(multipart).await,
        Err(rejection) => {
            tracing::warn!("Rejected analyze request: {}", rejection);
            Ok(AnalyzeUpload::default())
        }
    };

    let upload = match upload {
        Ok(upload) => upload,
        Err(AppError::PayloadTooLarge) => {
            tracing::warn!("Upload exceeded the size limit");
            let message = too_large_message(state.config.max_upload_bytes);
            return flash_redirect(jar, Flash::danger(message));
        }
        Err(e) => {
            tracing::error!("Error reading upload: {}", e);
            return flash_redirect(jar, Flash::danger(MSG_GENERIC));
        }
    };

    let (resume, job_description) = match validate_form(upload) {
        Ok(fields) => fields,
        Err(flash) => {
            tracing::warn!("Form rejected: {}", flash.message);
            return flash_redirect(jar, flash);
        }
    };

    match analyze(resume, job_description).await {
        Ok(Some(report)) => Html(render_results(&report)).into_response(),
        Ok(None) => flash_redirect(jar, Flash::danger(MSG_NO_TEXT)),
        Err(e) => {
            tracing::error!("Error processing request: {}", e);
            flash_redirect(jar, Flash::danger(MSG_GENERIC))
        }
    }
}

// ============================================================================
// JSON API
// ============================================================================

pub async fn api_analyze(
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<MatchReport>> {
    let multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let upload = read_upload(multipart).await?;

    let (Some(resume), Some(job_description)) = (upload.resume, upload.job_description) else {
        return Err(AppError::BadRequest(
            "Missing resume file or job description".to_string(),
        ));
    };
    if !allowed_file(&resume.filename) {
        return Err(AppError::BadRequest("Invalid file type".to_string()));
    }

    match analyze(resume, job_description).await? {
        Some(report) => Ok(Json(report)),
        None => Err(AppError::BadRequest(MSG_NO_TEXT.to_string())),
    }
}

// ============================================================================
// Misc
// ============================================================================

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "AI Resume Matcher is running"
    }))
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(render_not_found()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(filename: &str, jd: &str) -> AnalyzeUpload {
        AnalyzeUpload {
            resume: Some(ResumeUpload {
                filename: filename.to_string(),
                bytes: vec![1, 2, 3],
            }),
            job_description: Some(jd.to_string()),
        }
    }

    fn long_jd() -> String {
        "We are hiring a backend engineer with Rust and PostgreSQL experience.".to_string()
    }

    #[test]
    fn test_missing_fields() {
        let err = validate_form(AnalyzeUpload::default()).unwrap_err();
        assert_eq!(err, Flash::danger(MSG_NO_RESUME));

        let mut missing_jd = upload("cv.pdf", "");
        missing_jd.job_description = None;
        assert_eq!(
            validate_form(missing_jd).unwrap_err(),
            Flash::danger(MSG_NO_JOB_DESCRIPTION)
        );
    }

    #[test]
    fn test_empty_filename_is_a_warning() {
        assert_eq!(
            validate_form(upload("", &long_jd())).unwrap_err(),
            Flash::warning(MSG_NO_FILE_SELECTED)
        );
    }

    #[test]
    fn test_wrong_extension() {
        assert_eq!(
            validate_form(upload("cv.txt", &long_jd())).unwrap_err(),
            Flash::danger(MSG_INVALID_TYPE)
        );
    }

    #[test]
    fn test_short_description_counts_trimmed_chars() {
        let padded = format!("   {}   ", "x".repeat(49));
        assert_eq!(
            validate_form(upload("cv.pdf", &padded)).unwrap_err(),
            Flash::warning(MSG_TOO_SHORT)
        );

        let (resume, jd) = validate_form(upload("CV.DOCX", &"x".repeat(50))).unwrap();
        assert_eq!(resume.filename, "CV.DOCX");
        assert_eq!(jd.len(), 50);
    }

    #[test]
    fn test_too_large_message_names_the_limit() {
        assert_eq!(
            too_large_message(16 * 1024 * 1024),
            "File is too large. Please upload a file smaller than 16MB."
        );
        assert_eq!(
            too_large_message(1024),
            "File is too large. Please upload a file smaller than 1KB."
        );
        assert_eq!(
            too_large_message(1500),
            "File is too large. Please upload a file smaller than 1500 bytes."
        );
    }

    #[tokio::test]
    async fn test_analyze_rejects_unreadable_docx() {
        let resume = ResumeUpload {
            filename: "cv.docx".to_string(),
            bytes: b"not a zip".to_vec(),
        };
        let result = analyze(resume, long_jd()).await;
        assert!(matches!(result, Err(AppError::Extract(_))));
    }
}
