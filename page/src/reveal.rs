//! Scroll-triggered reveal of flagged elements.

use std::collections::BTreeSet;

/// Elements carrying this class are watched.
pub const REVEAL_TARGET_CLASS: &str = "animate-on-scroll";

/// Class added on first intersection.
pub const REVEAL_CLASS: &str = "fade-in-up";

/// Fraction of the element that must be visible.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Viewport margin; the bottom edge is pulled in by 50px.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Index of a watched element in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RevealId(pub usize);

/// Which elements are still watched and which have been revealed.
#[derive(Debug, Default)]
pub struct RevealTracker {
    observed: BTreeSet<RevealId>,
    revealed: BTreeSet<RevealId>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching targets `0..count`.
    pub fn observe_all(&mut self, count: usize) {
        self.observed.extend((0..count).map(RevealId));
    }

    /// Record an intersection report. Returns `true` exactly once per
    /// element: on its first intersecting report while watched.
    pub fn intersect(&mut self, id: RevealId, is_intersecting: bool) -> bool {
        if !is_intersecting || !self.observed.remove(&id) {
            return false;
        }
        self.revealed.insert(id);
        true
    }

    pub fn is_revealed(&self, id: RevealId) -> bool {
        self.revealed.contains(&id)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Stop watching everything.
    pub fn disconnect(&mut self) {
        self.observed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveals_once() {
        let mut tracker = RevealTracker::new();
        tracker.observe_all(2);

        assert!(!tracker.intersect(RevealId(0), false));
        assert!(tracker.intersect(RevealId(0), true));
        assert!(!tracker.intersect(RevealId(0), true));
        assert!(tracker.is_revealed(RevealId(0)));
        assert_eq!(tracker.observed_count(), 1);
    }

    #[test]
    fn test_unknown_target_ignored() {
        let mut tracker = RevealTracker::new();
        tracker.observe_all(1);
        assert!(!tracker.intersect(RevealId(5), true));
    }

    #[test]
    fn test_disconnect_stops_reveals() {
        let mut tracker = RevealTracker::new();
        tracker.observe_all(3);
        tracker.disconnect();
        assert!(!tracker.intersect(RevealId(1), true));
    }
}
