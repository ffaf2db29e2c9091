//! End-to-end behavior of the page controller against a recording document.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use resume_matcher_page::file_picker::{DOCX_MIME, INVALID_TYPE_MESSAGE, PDF_MIME};
use resume_matcher_page::progress::LOADING_CAP;
use resume_matcher_page::{
    Alert, AlertId, Dom, FileMeta, Frame, ManualScheduler, PageController, PickerView, RevealId,
    Selection, Severity, ValidationError, COPY_FAILURE_MESSAGE, COPY_SUCCESS_MESSAGE,
};

// ============================================================================
// Recording document
// ============================================================================

#[derive(Debug, Default)]
struct FakeDom {
    elements: BTreeSet<String>,
    picker: PickerView,
    input_cleared: usize,
    // Files held by the resume input.
    input_files: usize,
    committed_drops: usize,
    dialogs_opened: usize,
    alerts: BTreeMap<AlertId, Alert>,
    alert_log: Vec<(String, Severity)>,
    modal_shows: usize,
    loading_values: Vec<f64>,
    submits: Vec<Duration>,
    bars: BTreeMap<String, Vec<Frame>>,
    scrolled: Vec<String>,
    tooltip_targets: usize,
    tooltip_activations: usize,
    tooltips_bound: usize,
    reveal_targets: usize,
    revealed: Vec<RevealId>,
    unobserved: Vec<RevealId>,
    disconnected: bool,
    clipboard: Vec<String>,
    console: Vec<String>,
    // End of the step being run, set by `run`.
    clock: Duration,
}

impl FakeDom {
    fn with_elements(ids: &[&str]) -> Self {
        Self {
            elements: ids.iter().map(|id| id.to_string()).collect(),
            ..Self::default()
        }
    }

    fn warnings(&self) -> Vec<&str> {
        self.alert_log
            .iter()
            .filter(|(_, severity)| *severity == Severity::Warning)
            .map(|(message, _)| message.as_str())
            .collect()
    }

    /// The user closes a banner with its close button.
    fn click_close(&mut self, id: AlertId) {
        self.alerts.remove(&id);
    }
}

impl Dom for FakeDom {
    fn element_exists(&self, id: &str) -> bool {
        self.elements.contains(id)
    }

    fn render_picker(&mut self, view: &PickerView) {
        self.picker = view.clone();
    }

    fn open_file_dialog(&mut self) {
        self.dialogs_opened += 1;
    }

    fn clear_file_input(&mut self) {
        self.input_cleared += 1;
        self.input_files = 0;
    }

    fn file_input_count(&self) -> usize {
        self.input_files
    }

    fn commit_dropped_files(&mut self) {
        self.committed_drops += 1;
        self.input_files = 1;
    }

    fn append_alert(&mut self, alert: &Alert) {
        self.alert_log.push((alert.message.clone(), alert.severity));
        self.alerts.insert(alert.id, alert.clone());
    }

    fn alert_attached(&self, id: AlertId) -> bool {
        self.alerts.contains_key(&id)
    }

    fn remove_alert(&mut self, id: AlertId) {
        assert!(
            self.alerts.remove(&id).is_some(),
            "removed a banner that was not attached"
        );
    }

    fn show_loading_modal(&mut self) {
        self.modal_shows += 1;
    }

    fn set_loading_progress(&mut self, percent: f64) {
        self.loading_values.push(percent);
    }

    fn submit_form(&mut self) {
        assert!(self.modal_shows > 0, "submitted before the modal was shown");
        self.submits.push(self.clock);
    }

    fn set_progress_bar(&mut self, element_id: &str, frame: &Frame) {
        self.bars.entry(element_id.to_string()).or_default().push(*frame);
    }

    fn scroll_into_view(&mut self, element_id: &str) {
        self.scrolled.push(element_id.to_string());
    }

    fn activate_tooltips(&mut self) -> usize {
        self.tooltip_activations += 1;
        self.tooltips_bound += self.tooltip_targets;
        self.tooltip_targets
    }

    fn observe_reveal_targets(&mut self) -> usize {
        self.reveal_targets
    }

    fn reveal(&mut self, target: RevealId) {
        self.revealed.push(target);
    }

    fn unobserve(&mut self, target: RevealId) {
        self.unobserved.push(target);
    }

    fn disconnect_observer(&mut self) {
        self.disconnected = true;
    }

    fn write_clipboard(&mut self, text: &str) {
        self.clipboard.push(text.to_string());
    }

    fn console_log(&mut self, message: &str) {
        self.console.push(message.to_string());
    }
}

type Controller = PageController<FakeDom, ManualScheduler>;

fn controller(dom: FakeDom) -> Controller {
    let mut c = PageController::with_rng(dom, ManualScheduler::new(), StdRng::seed_from_u64(7));
    c.init();
    c
}

/// Advance in 10ms steps. Every delay the controller uses is a multiple of
/// the step, so anything firing during a step fires at its end.
fn run(c: &mut Controller, total: Duration) {
    let step = Duration::from_millis(10);
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        let end = c.scheduler().now() + step;
        c.dom_mut().clock = end;
        c.advance(step);
        elapsed += step;
    }
}

fn pdf(name: &str) -> FileMeta {
    FileMeta::new(name, PDF_MIME)
}

fn long_description() -> String {
    "We are hiring a backend engineer with Rust, SQL and AWS experience.".to_string()
}

// ============================================================================
// File picker
// ============================================================================

#[test]
fn test_drag_toggles_affordance_only() {
    let mut c = controller(FakeDom::default());
    c.on_drag_over();
    assert!(c.dom().picker.dragging);
    c.on_drag_leave();
    assert!(!c.dom().picker.dragging);
    assert!(c.dom().alert_log.is_empty());
}

#[test]
fn test_valid_drop_shows_summary() {
    let mut c = controller(FakeDom::default());
    c.on_drag_over();
    let result = c.on_drop(&[FileMeta::new("cv.docx", DOCX_MIME), pdf("other.pdf")]);

    assert!(matches!(result, Selection::Accepted(_)));
    assert_eq!(c.dom().committed_drops, 1);
    assert_eq!(
        c.dom().picker,
        PickerView {
            dragging: false,
            file_name: Some("cv.docx".to_string())
        }
    );
}

#[test]
fn test_invalid_types_warn_exactly_once() {
    for mime in ["image/png", "text/plain", "application/msword", ""] {
        let mut c = controller(FakeDom::default());
        c.on_file_change(&[FileMeta::new("resume", mime)]);
        assert_eq!(c.dom().warnings(), vec![INVALID_TYPE_MESSAGE]);
        assert_eq!(c.dom().input_cleared, 1);

        let mut c = controller(FakeDom::default());
        c.on_drop(&[FileMeta::new("resume", mime)]);
        assert_eq!(c.dom().warnings(), vec![INVALID_TYPE_MESSAGE]);
        assert_eq!(c.dom().committed_drops, 0);
    }
}

#[test]
fn test_rejected_drop_keeps_selected_file() {
    let mut c = controller(FakeDom::default());
    c.on_file_change(&[pdf("keep.pdf")]);
    c.on_drop(&[FileMeta::new("photo.png", "image/png")]);

    assert_eq!(c.picker().selected(), Some(&pdf("keep.pdf")));
    assert_eq!(c.dom().picker.file_name.as_deref(), Some("keep.pdf"));
    assert_eq!(c.dom().input_cleared, 0);
}

#[test]
fn test_remove_restores_drop_zone() {
    let mut c = controller(FakeDom::default());
    c.on_file_change(&[pdf("cv.pdf")]);
    c.on_remove_file();

    assert!(!c.picker().has_file());
    assert_eq!(c.dom().picker.file_name, None);
    assert_eq!(c.dom().input_cleared, 1);
}

#[test]
fn test_upload_area_click_opens_dialog() {
    let mut c = controller(FakeDom::default());
    c.on_upload_area_click();
    assert_eq!(c.dom().dialogs_opened, 1);
}

// ============================================================================
// Form
// ============================================================================

#[test]
fn test_submit_without_file_is_blocked() {
    let mut c = controller(FakeDom::default());
    assert_eq!(
        c.on_submit(&long_description()),
        Err(ValidationError::MissingResume)
    );
    run(&mut c, Duration::from_secs(2));

    assert!(c.dom().submits.is_empty());
    assert_eq!(c.dom().modal_shows, 0);
    assert_eq!(c.dom().warnings(), vec!["Please select a resume file."]);
}

#[test]
fn test_restored_file_input_counts_as_selected() {
    // The browser refilled the input; no change event reached the picker.
    let dom = FakeDom {
        input_files: 1,
        ..FakeDom::default()
    };
    let mut c = controller(dom);
    assert!(!c.picker().has_file());

    assert_eq!(c.on_submit(&long_description()), Ok(()));
    run(&mut c, Duration::from_millis(500));
    assert_eq!(c.dom().submits.len(), 1);
    assert!(c.dom().warnings().is_empty());
}

#[test]
fn test_short_descriptions_never_submit() {
    for len in [0, 1, 25, 49] {
        let mut c = controller(FakeDom::default());
        c.on_file_change(&[pdf("cv.pdf")]);
        let description = format!("   {}   ", "a".repeat(len));

        assert!(c.on_submit(&description).is_err());
        run(&mut c, Duration::from_secs(1));

        assert!(c.dom().submits.is_empty());
        assert_eq!(c.dom().warnings().len(), 1);
    }
}

#[test]
fn test_fifty_characters_submits_after_delay() {
    let mut c = controller(FakeDom::default());
    c.on_file_change(&[pdf("cv.pdf")]);

    assert_eq!(c.on_submit(&format!(" {} ", "a".repeat(50))), Ok(()));
    assert_eq!(c.dom().modal_shows, 1);
    assert!(c.dom().submits.is_empty());

    run(&mut c, Duration::from_millis(490));
    assert!(c.dom().submits.is_empty());

    run(&mut c, Duration::from_millis(2000));
    assert_eq!(c.dom().submits, vec![Duration::from_millis(500)]);
}

// ============================================================================
// Loading indicator
// ============================================================================

#[test]
fn test_loading_bar_caps_at_ninety_and_halts() {
    let mut c = controller(FakeDom::default());
    c.on_file_change(&[pdf("cv.pdf")]);
    c.on_submit(&long_description()).unwrap();

    run(&mut c, Duration::from_secs(30));

    let values = &c.dom().loading_values;
    assert!(!values.is_empty());
    assert!(values.iter().all(|v| *v <= LOADING_CAP));
    assert_eq!(values.last().copied(), Some(LOADING_CAP));
    assert!(!c.loading().is_running());

    let ticks = values.len();
    run(&mut c, Duration::from_secs(5));
    assert_eq!(c.dom().loading_values.len(), ticks);
}

#[test]
fn test_second_submission_replaces_loading_timer() {
    let mut c = controller(FakeDom::default());
    c.on_file_change(&[pdf("cv.pdf")]);
    c.on_submit(&long_description()).unwrap();
    c.on_submit(&long_description()).unwrap();

    // One loading interval plus two pending submits.
    assert_eq!(c.pending_timers(), 3);
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn test_banner_expires_after_five_seconds() {
    let mut c = controller(FakeDom::default());
    let id = c.notify("done", Severity::Success);
    assert!(c.dom().alert_attached(id));

    run(&mut c, Duration::from_millis(4990));
    assert!(c.dom().alert_attached(id));

    run(&mut c, Duration::from_millis(10));
    assert!(!c.dom().alert_attached(id));
    assert!(!c.notifier().is_live(id));
}

#[test]
fn test_manual_dismissal_then_expiry_is_quiet() {
    let mut c = controller(FakeDom::default());
    let id = c.notify("done", Severity::Success);
    c.dom_mut().click_close(id);

    // FakeDom::remove_alert panics on a detached banner.
    run(&mut c, Duration::from_secs(6));
    assert!(!c.dom().alert_attached(id));
}

#[test]
fn test_banners_are_independent() {
    let mut c = controller(FakeDom::default());
    let first = c.notify("one", Severity::Info);
    run(&mut c, Duration::from_secs(2));
    let second = c.notify("two", Severity::Danger);

    run(&mut c, Duration::from_secs(3));
    assert!(!c.dom().alert_attached(first));
    assert!(c.dom().alert_attached(second));

    c.dismiss_alert(second);
    assert!(!c.dom().alert_attached(second));
    run(&mut c, Duration::from_secs(3));
}

// ============================================================================
// Utilities
// ============================================================================

#[test]
fn test_animate_progress_bar_converges() {
    let mut c = controller(FakeDom::with_elements(&["x"]));
    c.animate_progress_bar("x", 73.0);
    run(&mut c, Duration::from_secs(2));

    let frames = &c.dom().bars["x"];
    assert!(frames.iter().all(|f| f.value <= 73.0));
    let last = frames.last().unwrap();
    assert_eq!(last.width(), "73%");
    assert_eq!(last.label(), "73%");
    assert_eq!(c.pending_timers(), 0);
}

#[test]
fn test_animate_missing_element_is_noop() {
    let mut c = controller(FakeDom::default());
    c.animate_progress_bar("missing", 50.0);
    assert_eq!(c.pending_timers(), 0);
    run(&mut c, Duration::from_secs(1));
    assert!(c.dom().bars.is_empty());
}

#[test]
fn test_clipboard_outcomes() {
    let mut c = controller(FakeDom::default());
    c.copy_to_clipboard("python, sql");
    assert_eq!(c.dom().clipboard, vec!["python, sql".to_string()]);

    c.on_clipboard_settled(Ok(()));
    c.on_clipboard_settled(Err("NotAllowedError".to_string()));
    assert_eq!(
        c.dom().alert_log,
        vec![
            (COPY_SUCCESS_MESSAGE.to_string(), Severity::Success),
            (COPY_FAILURE_MESSAGE.to_string(), Severity::Danger),
        ]
    );
}

#[test]
fn test_chart_hook_only_logs() {
    let mut c = controller(FakeDom::with_elements(&["skillsChart"]));
    let data = serde_json::json!({"python": 3});

    c.create_skills_chart("missing", &data);
    assert!(c.dom().console.is_empty());

    c.create_skills_chart("skillsChart", &data);
    assert_eq!(c.dom().console, vec![r#"Chart data: {"python":3}"#.to_string()]);
}

#[test]
fn test_anchor_clicks() {
    let mut c = controller(FakeDom::with_elements(&["skills"]));
    c.on_anchor_click("#skills");
    c.on_anchor_click("#nowhere");
    c.on_anchor_click("#");
    assert_eq!(c.dom().scrolled, vec!["skills".to_string()]);
}

#[test]
fn test_scroll_reveal_fires_once_per_element() {
    let dom = FakeDom {
        reveal_targets: 2,
        ..FakeDom::default()
    };
    let mut c = controller(dom);

    c.on_intersection(RevealId(0), true);
    c.on_intersection(RevealId(0), false);
    c.on_intersection(RevealId(0), true);
    c.on_intersection(RevealId(1), false);

    assert_eq!(c.dom().revealed, vec![RevealId(0)]);
    assert_eq!(c.dom().unobserved, vec![RevealId(0)]);
}

#[test]
fn test_init_binds_each_tooltip_once() {
    let dom = FakeDom {
        tooltip_targets: 3,
        reveal_targets: 2,
        ..FakeDom::default()
    };
    let mut c = controller(dom);
    c.init();

    assert_eq!(c.dom().tooltip_activations, 1);
    assert_eq!(c.dom().tooltips_bound, 3);

    c.on_intersection(RevealId(1), true);
    assert_eq!(c.dom().revealed, vec![RevealId(1)]);
}

#[test]
fn test_teardown_cancels_everything() {
    let dom = FakeDom {
        reveal_targets: 1,
        elements: ["bar".to_string()].into_iter().collect(),
        ..FakeDom::default()
    };
    let mut c = controller(dom);
    c.on_file_change(&[pdf("cv.pdf")]);
    c.on_submit(&long_description()).unwrap();
    c.notify("bye", Severity::Info);
    c.animate_progress_bar("bar", 40.0);

    c.teardown();
    assert_eq!(c.pending_timers(), 0);
    assert_eq!(c.scheduler().armed_count(), 0);
    assert!(c.dom().disconnected);

    run(&mut c, Duration::from_secs(10));
    assert!(c.dom().submits.is_empty());
    c.on_intersection(RevealId(0), true);
    assert!(c.dom().revealed.is_empty());
}
