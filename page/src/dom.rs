//! Seams between the page controller and the page it drives.
//!
//! The controller never touches the browser directly. Everything it needs
//! from the document goes through [`Dom`], and every delayed or repeating
//! action goes through [`Scheduler`]. The browser binding implements both
//! with `web-sys` and `gloo`; tests use a recording fake and
//! [`ManualScheduler`].

use std::collections::BTreeMap;
use std::time::Duration;

use crate::file_picker::PickerView;
use crate::notify::{Alert, AlertId};
use crate::progress::Frame;
use crate::reveal::RevealId;

// ============================================================================
// Document
// ============================================================================

/// Document operations the controller relies on.
///
/// Element ids and class names are fixed by the markup; implementations
/// resolve them however the host sees fit.
pub trait Dom {
    /// Whether an element with this id is present.
    fn element_exists(&self, id: &str) -> bool;

    /// Apply the drop-zone / selected-file view.
    fn render_picker(&mut self, view: &PickerView);

    /// Open the native file chooser of the resume input.
    fn open_file_dialog(&mut self);

    /// Reset the resume input so it holds no file.
    fn clear_file_input(&mut self);

    /// Number of files the resume input currently holds. This can be
    /// non-zero without a change event, e.g. after the browser restores
    /// form state on back navigation.
    fn file_input_count(&self) -> usize;

    /// Move the files of the drop currently being handled into the resume input.
    fn commit_dropped_files(&mut self);

    fn append_alert(&mut self, alert: &Alert);

    /// Whether the banner is still attached to the document.
    fn alert_attached(&self, id: AlertId) -> bool;

    fn remove_alert(&mut self, id: AlertId);

    fn show_loading_modal(&mut self);

    /// Set the loading bar width, in percent.
    fn set_loading_progress(&mut self, percent: f64);

    /// Perform the native form submission (full page navigation).
    fn submit_form(&mut self);

    fn set_progress_bar(&mut self, element_id: &str, frame: &Frame);

    fn scroll_into_view(&mut self, element_id: &str);

    /// Bind a tooltip to every tooltip-flagged element. Returns how many were bound.
    fn activate_tooltips(&mut self) -> usize;

    /// Start observing every scroll-reveal element with the shared observer.
    ///
    /// Returns the number of targets; they are addressed as `RevealId(0..n)`.
    fn observe_reveal_targets(&mut self) -> usize;

    fn reveal(&mut self, target: RevealId);

    fn unobserve(&mut self, target: RevealId);

    fn disconnect_observer(&mut self);

    /// Start an asynchronous clipboard write. The outcome is reported back
    /// through `PageController::on_clipboard_settled`.
    fn write_clipboard(&mut self, text: &str);

    fn console_log(&mut self, message: &str);
}

// ============================================================================
// Timers
// ============================================================================

/// Identifies one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Timer service. Firing is reported back through `PageController::on_timer`.
pub trait Scheduler {
    /// Arm `id` to fire after `delay`, and every `delay` after that when `repeat` is set.
    fn arm(&mut self, id: TimerId, delay: Duration, repeat: bool);

    /// Disarm `id`. Unknown or already fired ids are ignored.
    fn disarm(&mut self, id: TimerId);
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    due: Duration,
    period: Option<Duration>,
}

/// A scheduler driven by a virtual clock.
///
/// Nothing fires on its own; the owner pulls due timers with
/// [`ManualScheduler::next_due`] in deadline order.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    armed: BTreeMap<TimerId, Armed>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.armed.contains_key(&id)
    }

    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline. Repeating timers are re-armed one period later.
    pub fn next_due(&mut self, until: Duration) -> Option<TimerId> {
        let (id, armed) = self
            .armed
            .iter()
            .min_by_key(|(id, armed)| (armed.due, **id))
            .map(|(id, armed)| (*id, *armed))?;

        if armed.due > until {
            return None;
        }

        self.now = self.now.max(armed.due);
        match armed.period {
            Some(period) => {
                self.armed.insert(
                    id,
                    Armed {
                        due: armed.due + period,
                        period: Some(period),
                    },
                );
            }
            None => {
                self.armed.remove(&id);
            }
        }
        Some(id)
    }

    /// Move the clock forward to `until` once nothing else is due.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl Scheduler for ManualScheduler {
    fn arm(&mut self, id: TimerId, delay: Duration, repeat: bool) {
        self.armed.insert(
            id,
            Armed {
                due: self.now + delay,
                period: repeat.then_some(delay),
            },
        );
    }

    fn disarm(&mut self, id: TimerId) {
        self.armed.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once_at_deadline() {
        let mut sched = ManualScheduler::new();
        sched.arm(TimerId(1), Duration::from_millis(500), false);

        assert_eq!(sched.next_due(Duration::from_millis(499)), None);
        assert_eq!(sched.next_due(Duration::from_millis(500)), Some(TimerId(1)));
        assert_eq!(sched.now(), Duration::from_millis(500));
        assert_eq!(sched.next_due(Duration::from_secs(10)), None);
    }

    #[test]
    fn test_repeating_timer_rearms() {
        let mut sched = ManualScheduler::new();
        sched.arm(TimerId(7), Duration::from_millis(200), true);

        let mut fired = 0;
        while sched.next_due(Duration::from_millis(1000)).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 5);
        assert!(sched.is_armed(TimerId(7)));
    }

    #[test]
    fn test_earliest_deadline_first() {
        let mut sched = ManualScheduler::new();
        sched.arm(TimerId(1), Duration::from_millis(300), false);
        sched.arm(TimerId(2), Duration::from_millis(100), false);

        assert_eq!(sched.next_due(Duration::from_secs(1)), Some(TimerId(2)));
        assert_eq!(sched.next_due(Duration::from_secs(1)), Some(TimerId(1)));
    }

    #[test]
    fn test_disarm_unknown_is_ignored() {
        let mut sched = ManualScheduler::new();
        sched.disarm(TimerId(42));
        assert_eq!(sched.armed_count(), 0);
    }
}
