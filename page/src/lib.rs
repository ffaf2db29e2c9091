//! Page controller for the resume matcher.
//!
//! Drives the analyze page (upload zone, form checks, loading modal) and the
//! results page (animated score bars, clipboard copy, scroll reveals). The
//! logic lives in plain state machines so it runs and tests natively; the
//! `web` module binds it to the browser when built for `wasm32`.
//!
//! - `file_picker`: one-file selection with MIME checks
//! - `form`: pre-submit validation
//! - `progress`: simulated loading bar and results bar animation
//! - `notify`: alert banners
//! - `reveal`, `scroll`: scroll-reveal bookkeeping and in-page anchors
//! - `dom`: the `Dom` and `Scheduler` seams, plus a virtual-clock scheduler
//! - `controller`: `PageController`, which owns all of the above

pub mod controller;
pub mod dom;
pub mod file_picker;
pub mod form;
pub mod notify;
pub mod progress;
pub mod reveal;
pub mod scroll;

#[cfg(target_arch = "wasm32")]
pub mod web;

// ============================================================================
// DOM contract
// ============================================================================

/// Element ids the controller expects the markup to provide.
pub mod ids {
    pub const UPLOAD_AREA: &str = "uploadArea";
    pub const FILE_INPUT: &str = "resume";
    pub const FILE_INFO: &str = "fileInfo";
    pub const FILE_NAME: &str = "fileName";
    pub const REMOVE_FILE: &str = "removeFile";
    pub const ANALYZE_FORM: &str = "analyzeForm";
    pub const SUBMIT_BUTTON: &str = "submitBtn";
    pub const LOADING_MODAL: &str = "loadingModal";
    pub const PROGRESS_BAR: &str = "progressBar";
    pub const JOB_DESCRIPTION: &str = "job_description";
}

/// Class toggled on the upload area while a drag hovers it.
pub const DRAGOVER_CLASS: &str = "dragover";

/// Elements with this attribute get a tooltip at startup.
pub const TOOLTIP_SELECTOR: &str = r#"[data-bs-toggle="tooltip"]"#;

pub use controller::{PageController, COPY_FAILURE_MESSAGE, COPY_SUCCESS_MESSAGE};
pub use dom::{Dom, ManualScheduler, Scheduler, TimerId};
pub use file_picker::{FileMeta, FilePicker, PickerView, Selection};
pub use form::{validate, ValidationError};
pub use notify::{Alert, AlertId, Notifier, Severity};
pub use progress::{Frame, ProgressAnimation, SimulatedProgress};
pub use reveal::{RevealId, RevealTracker};
