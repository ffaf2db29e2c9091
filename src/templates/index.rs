//! Analyze page: upload zone, job description, loading modal.

use crate::flash::Flash;

use super::components::base_html;

pub fn render_index(flash: Option<&Flash>) -> String {
    let content = r#"
    <section class="hero">
        <div class="container text-center">
            <h1 class="display-5 fw-bold"><i class="fas fa-robot me-2"></i>AI Resume Matcher</h1>
            <p class="lead">Upload your resume and paste a job description to see how well they match.</p>
        </div>
    </section>

    <div class="container pb-5">
        <div class="row justify-content-center">
            <div class="col-lg-8">
                <form id="analyzeForm" method="POST" action="/" enctype="multipart/form-data" class="card shadow-sm">
                    <div class="card-body p-4">
                        <h5 class="mb-3">
                            1. Your resume
                            <i class="fas fa-info-circle text-muted" data-bs-toggle="tooltip" title="PDF or DOCX, up to 16MB"></i>
                        </h5>

                        <input type="file" id="resume" name="resume" accept=".pdf,.docx" hidden>

                        <div id="uploadArea" class="upload-area mb-3">
                            <div class="upload-icon"><i class="fas fa-cloud-upload-alt"></i></div>
                            <p class="mb-1 fw-semibold">Drag &amp; drop your resume here</p>
                            <p class="text-muted mb-0">or click to browse</p>
                        </div>

                        <div id="fileInfo" class="file-info mb-3">
                            <div class="d-flex align-items-center justify-content-between">
                                <span><i class="fas fa-file-alt text-primary me-2"></i><span id="fileName"></span></span>
                                <button type="button" id="removeFile" class="btn btn-sm btn-outline-danger">
                                    <i class="fas fa-times"></i> Remove
                                </button>
                            </div>
                        </div>

                        <h5 class="mt-4 mb-3">
                            2. Job description
                            <i class="fas fa-info-circle text-muted" data-bs-toggle="tooltip" title="At least 50 characters"></i>
                        </h5>
                        <textarea id="job_description" name="job_description" class="form-control" rows="10"
                                  placeholder="Paste the full job description here..."></textarea>

                        <div class="d-grid mt-4">
                            <button type="submit" id="submitBtn" class="btn btn-primary btn-lg">
                                <i class="fas fa-search me-2"></i>Analyze Match
                            </button>
                        </div>
                    </div>
                </form>

                <div class="row mt-5 text-center">
                    <div class="col-md-4 animate-on-scroll">
                        <i class="fas fa-brain fa-2x text-primary mb-2"></i>
                        <h6>Text Similarity</h6>
                        <p class="text-muted small">Weighted term overlap between resume and role.</p>
                    </div>
                    <div class="col-md-4 animate-on-scroll">
                        <i class="fas fa-tools fa-2x text-primary mb-2"></i>
                        <h6>Skill Matching</h6>
                        <p class="text-muted small">Exact, fuzzy and synonym matches against a skills database.</p>
                    </div>
                    <div class="col-md-4 animate-on-scroll">
                        <i class="fas fa-lightbulb fa-2x text-primary mb-2"></i>
                        <h6>Suggestions</h6>
                        <p class="text-muted small">Concrete ways to close the gaps.</p>
                    </div>
                </div>
            </div>
        </div>
    </div>

    <div class="modal fade" id="loadingModal" tabindex="-1" data-bs-backdrop="static" data-bs-keyboard="false">
        <div class="modal-dialog modal-dialog-centered">
            <div class="modal-content">
                <div class="modal-body text-center p-4">
                    <div class="spinner-border text-primary mb-3" role="status"></div>
                    <h5>Analyzing your resume...</h5>
                    <p class="text-muted">Extracting text, matching skills and scoring.</p>
                    <div class="progress">
                        <div id="progressBar" class="progress-bar progress-bar-striped progress-bar-animated" style="width: 0%"></div>
                    </div>
                </div>
            </div>
        </div>
    </div>
    "#;

    base_html("Analyze", content, flash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_has_controller_hooks() {
        let html = render_index(None);
        for id in [
            "uploadArea",
            "resume",
            "fileInfo",
            "fileName",
            "removeFile",
            "analyzeForm",
            "submitBtn",
            "loadingModal",
            "progressBar",
            "job_description",
        ] {
            assert!(html.contains(&format!(r#"id="{}""#, id)), "missing #{}", id);
        }
    }

    #[test]
    fn test_file_input_is_outside_upload_area() {
        let html = render_index(None);
        let input = html.find(r#"id="resume""#).unwrap();
        let area = html.find(r#"id="uploadArea""#).unwrap();
        assert!(input < area);
    }

    #[test]
    fn test_index_shows_flash() {
        let html = render_index(Some(&Flash::warning("No file selected")));
        assert!(html.contains("alert-warning"));
        assert!(html.contains("No file selected"));
    }
}
