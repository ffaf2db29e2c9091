//! The page controller: one object owning every component's state.
//!
//! Browser events come in through the `on_*` methods, timer expiries through
//! [`PageController::on_timer`]. All document changes go out through the
//! [`Dom`] implementation, all delays through the [`Scheduler`].

use std::collections::HashMap;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::dom::{Dom, ManualScheduler, Scheduler, TimerId};
use crate::file_picker::{FileMeta, FilePicker, Selection, INVALID_TYPE_MESSAGE};
use crate::form::{self, ValidationError, SUBMIT_DELAY};
use crate::notify::{AlertId, Notifier, Severity, ALERT_LIFETIME};
use crate::progress::{
    ProgressAnimation, SimulatedProgress, ANIMATION_TICK, LOADING_CAP, LOADING_TICK,
};
use crate::reveal::{RevealId, RevealTracker};
use crate::scroll::fragment_target;

pub const COPY_SUCCESS_MESSAGE: &str = "Copied to clipboard!";
pub const COPY_FAILURE_MESSAGE: &str = "Failed to copy to clipboard.";

/// What an armed timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    ExpireAlert(AlertId),
    SubmitForm,
    LoadingTick,
    AnimateTick,
}

pub struct PageController<D: Dom, S: Scheduler> {
    dom: D,
    scheduler: S,
    rng: StdRng,
    picker: FilePicker,
    notifier: Notifier,
    loading: SimulatedProgress,
    loading_timer: Option<TimerId>,
    animations: HashMap<TimerId, (String, ProgressAnimation)>,
    reveal: RevealTracker,
    timers: HashMap<TimerId, Task>,
    next_timer: u64,
    ready: bool,
}

impl<D: Dom, S: Scheduler> PageController<D, S> {
    pub fn new(dom: D, scheduler: S) -> Self {
        Self::with_rng(dom, scheduler, StdRng::from_entropy())
    }

    pub fn with_rng(dom: D, scheduler: S, rng: StdRng) -> Self {
        Self {
            dom,
            scheduler,
            rng,
            picker: FilePicker::new(),
            notifier: Notifier::new(),
            loading: SimulatedProgress::new(),
            loading_timer: None,
            animations: HashMap::new(),
            reveal: RevealTracker::new(),
            timers: HashMap::new(),
            next_timer: 0,
            ready: false,
        }
    }

    /// Page-ready setup: tooltips and the scroll-reveal observer.
    ///
    /// Runs once; later calls are ignored until [`teardown`](Self::teardown).
    pub fn init(&mut self) {
        if self.ready {
            debug!("page controller already initialized");
            return;
        }
        self.ready = true;

        let tooltips = self.dom.activate_tooltips();
        let targets = self.dom.observe_reveal_targets();
        self.reveal.observe_all(targets);
        debug!(tooltips, reveal_targets = targets, "page controller ready");
    }

    /// Cancel every pending timer and stop watching for scroll reveals.
    pub fn teardown(&mut self) {
        for (id, _) in self.timers.drain() {
            self.scheduler.disarm(id);
        }
        self.animations.clear();
        self.loading.stop();
        self.loading_timer = None;
        self.reveal.disconnect();
        self.dom.disconnect_observer();
        self.ready = false;
        debug!("page controller torn down");
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn picker(&self) -> &FilePicker {
        &self.picker
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn loading(&self) -> &SimulatedProgress {
        &self.loading
    }

    pub fn reveal(&self) -> &RevealTracker {
        &self.reveal
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // ------------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------------

    fn arm(&mut self, delay: Duration, repeat: bool, task: Task) -> TimerId {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        self.timers.insert(id, task);
        self.scheduler.arm(id, delay, repeat);
        id
    }

    fn disarm(&mut self, id: TimerId) {
        self.timers.remove(&id);
        self.scheduler.disarm(id);
    }

    /// Dispatch an expired timer. Ids that were already disarmed are ignored.
    pub fn on_timer(&mut self, id: TimerId) {
        let Some(task) = self.timers.get(&id).copied() else {
            return;
        };

        match task {
            Task::ExpireAlert(alert) => {
                self.disarm(id);
                self.notifier.expire(alert);
                if self.dom.alert_attached(alert) {
                    self.dom.remove_alert(alert);
                }
            }
            Task::SubmitForm => {
                self.disarm(id);
                debug!("submitting analyze form");
                self.dom.submit_form();
            }
            Task::LoadingTick => {
                let value = self.loading.step(&mut self.rng);
                self.dom.set_loading_progress(value);
                if !self.loading.is_running() {
                    self.disarm(id);
                    if self.loading_timer == Some(id) {
                        self.loading_timer = None;
                    }
                }
            }
            Task::AnimateTick => {
                let frame = match self.animations.get_mut(&id) {
                    Some((element_id, animation)) => animation
                        .next()
                        .map(|frame| (element_id.clone(), frame, animation.is_done())),
                    None => None,
                };
                match frame {
                    Some((element_id, frame, done)) => {
                        self.dom.set_progress_bar(&element_id, &frame);
                        if done {
                            self.animations.remove(&id);
                            self.disarm(id);
                        }
                    }
                    None => {
                        self.animations.remove(&id);
                        self.disarm(id);
                    }
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------------

    /// Show a banner that removes itself after [`ALERT_LIFETIME`].
    pub fn notify(&mut self, message: &str, severity: Severity) -> AlertId {
        let alert = self.notifier.push(message, severity);
        self.dom.append_alert(&alert);
        self.arm(ALERT_LIFETIME, false, Task::ExpireAlert(alert.id));
        alert.id
    }

    /// Close a banner before its timer runs out.
    pub fn dismiss_alert(&mut self, id: AlertId) {
        self.notifier.expire(id);
        if self.dom.alert_attached(id) {
            self.dom.remove_alert(id);
        }
    }

    // ------------------------------------------------------------------------
    // File picker
    // ------------------------------------------------------------------------

    pub fn on_drag_over(&mut self) {
        self.picker.drag_over();
        self.dom.render_picker(&self.picker.view());
    }

    pub fn on_drag_leave(&mut self) {
        self.picker.drag_leave();
        self.dom.render_picker(&self.picker.view());
    }

    pub fn on_upload_area_click(&mut self) {
        self.dom.open_file_dialog();
    }

    pub fn on_drop(&mut self, files: &[FileMeta]) -> Selection {
        let selection = self.picker.drop_files(files);
        match &selection {
            Selection::Accepted(file) => {
                debug!(name = %file.name, "resume dropped");
                self.dom.commit_dropped_files();
            }
            Selection::Rejected(file) => {
                debug!(name = %file.name, mime = %file.mime, "dropped file rejected");
                self.notify(INVALID_TYPE_MESSAGE, Severity::Warning);
            }
            Selection::Ignored => {}
        }
        self.dom.render_picker(&self.picker.view());
        selection
    }

    pub fn on_file_change(&mut self, files: &[FileMeta]) -> Selection {
        let selection = self.picker.choose(files);
        match &selection {
            Selection::Accepted(file) => {
                debug!(name = %file.name, "resume selected");
                self.dom.render_picker(&self.picker.view());
            }
            Selection::Rejected(file) => {
                debug!(name = %file.name, mime = %file.mime, "selected file rejected");
                self.notify(INVALID_TYPE_MESSAGE, Severity::Warning);
                self.dom.clear_file_input();
            }
            Selection::Ignored => {}
        }
        selection
    }

    pub fn on_remove_file(&mut self) {
        self.dom.clear_file_input();
        self.picker.clear();
        self.dom.render_picker(&self.picker.view());
    }

    // ------------------------------------------------------------------------
    // Form
    // ------------------------------------------------------------------------

    /// Handle an intercepted submit. On success the loading modal is shown
    /// at once and the native submission follows after [`SUBMIT_DELAY`].
    pub fn on_submit(&mut self, job_description: &str) -> Result<(), ValidationError> {
        let has_resume = self.picker.has_file() || self.dom.file_input_count() > 0;
        if let Err(err) = form::validate(has_resume, job_description) {
            debug!(%err, "analyze form rejected");
            self.notify(&err.to_string(), Severity::Warning);
            return Err(err);
        }

        self.start_loading(LOADING_CAP);
        self.arm(SUBMIT_DELAY, false, Task::SubmitForm);
        Ok(())
    }

    /// Show the loading modal and start the simulated bar towards `cap`.
    ///
    /// Any bar already running is stopped first.
    pub fn start_loading(&mut self, cap: f64) {
        self.stop_loading();
        self.dom.show_loading_modal();
        self.loading.start(cap);
        let id = self.arm(LOADING_TICK, true, Task::LoadingTick);
        self.loading_timer = Some(id);
    }

    pub fn stop_loading(&mut self) {
        self.loading.stop();
        if let Some(id) = self.loading_timer.take() {
            self.disarm(id);
        }
    }

    // ------------------------------------------------------------------------
    // Utilities
    // ------------------------------------------------------------------------

    pub fn copy_to_clipboard(&mut self, text: &str) {
        self.dom.write_clipboard(text);
    }

    pub fn on_clipboard_settled(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.notify(COPY_SUCCESS_MESSAGE, Severity::Success);
            }
            Err(reason) => {
                debug!(%reason, "clipboard write failed");
                self.notify(COPY_FAILURE_MESSAGE, Severity::Danger);
            }
        }
    }

    /// Chart hook. Rendering is not implemented; the data is only logged.
    pub fn create_skills_chart(&mut self, canvas_id: &str, data: &serde_json::Value) {
        if !self.dom.element_exists(canvas_id) {
            return;
        }
        self.dom.console_log(&format!("Chart data: {}", data));
    }

    /// Ease the bar `element_id` from 0 to `target` percent.
    pub fn animate_progress_bar(&mut self, element_id: &str, target: f64) {
        if !self.dom.element_exists(element_id) {
            return;
        }
        let id = self.arm(ANIMATION_TICK, true, Task::AnimateTick);
        self.animations
            .insert(id, (element_id.to_string(), ProgressAnimation::new(target)));
    }

    /// Same-page link click. The default jump is always suppressed by the caller.
    pub fn on_anchor_click(&mut self, href: &str) {
        if let Some(target) = fragment_target(href) {
            if self.dom.element_exists(target) {
                self.dom.scroll_into_view(target);
            }
        }
    }

    pub fn on_intersection(&mut self, target: RevealId, is_intersecting: bool) {
        if self.reveal.intersect(target, is_intersecting) {
            self.dom.reveal(target);
            self.dom.unobserve(target);
        }
    }
}

impl<D: Dom> PageController<D, ManualScheduler> {
    /// Run the virtual clock forward, firing everything that falls due.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(id) = self.scheduler.next_due(until) {
            self.on_timer(id);
        }
        self.scheduler.settle(until);
    }
}
