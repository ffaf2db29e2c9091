//! Toast-style alert banners.
//!
//! Banners stack at the top-right of the page and remove themselves after
//! [`ALERT_LIFETIME`]. The user may close one earlier with its close button;
//! the expiry then finds nothing to remove and does nothing.

use std::collections::BTreeMap;
use std::time::Duration;

/// How long a banner stays up unless dismissed first.
pub const ALERT_LIFETIME: Duration = Duration::from_millis(5000);

/// Inline style shared by every banner.
pub const ALERT_STYLE: &str = "top: 20px; right: 20px; z-index: 9999; min-width: 300px;";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    Warning,
    Danger,
    #[default]
    Info,
}

impl Severity {
    /// Parse a Bootstrap contextual tag. Anything unrecognized is `Info`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "success" => Severity::Success,
            "warning" => Severity::Warning,
            "danger" => Severity::Danger,
            _ => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
            Severity::Info => "info",
        }
    }

    /// Font Awesome icon name.
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "check-circle",
            Severity::Warning => "exclamation-triangle",
            Severity::Danger => "exclamation-circle",
            Severity::Info => "info-circle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlertId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: AlertId,
    pub message: String,
    pub severity: Severity,
}

impl Alert {
    pub fn class_name(&self) -> String {
        format!(
            "alert alert-{} alert-dismissible fade show position-fixed",
            self.severity.as_str()
        )
    }

    /// Banner body: icon, escaped message, close button.
    pub fn inner_html(&self) -> String {
        format!(
            r#"<i class="fas fa-{icon} me-2"></i>
        {message}
        <button type="button" class="btn-close" data-bs-dismiss="alert"></button>"#,
            icon = self.severity.icon(),
            message = html_escape(&self.message),
        )
    }
}

/// Tracks banners that have been shown and not yet expired.
#[derive(Debug, Default)]
pub struct Notifier {
    next_id: u64,
    live: BTreeMap<AlertId, Alert>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new banner. Every call yields a distinct id.
    pub fn push(&mut self, message: &str, severity: Severity) -> Alert {
        self.next_id += 1;
        let alert = Alert {
            id: AlertId(self.next_id),
            message: message.to_string(),
            severity,
        };
        self.live.insert(alert.id, alert.clone());
        alert
    }

    /// Forget a banner, returning it if it was still tracked.
    pub fn expire(&mut self, id: AlertId) -> Option<Alert> {
        self.live.remove(&id)
    }

    pub fn is_live(&self, id: AlertId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_severity_defaults_to_info() {
        assert_eq!(Severity::from_tag("primary"), Severity::Info);
        assert_eq!(Severity::from_tag(""), Severity::Info);
        assert_eq!(Severity::from_tag("danger"), Severity::Danger);
    }

    #[test]
    fn test_icons() {
        assert_eq!(Severity::Success.icon(), "check-circle");
        assert_eq!(Severity::Warning.icon(), "exclamation-triangle");
        assert_eq!(Severity::Danger.icon(), "exclamation-circle");
        assert_eq!(Severity::Info.icon(), "info-circle");
    }

    #[test]
    fn test_markup() {
        let mut notifier = Notifier::new();
        let alert = notifier.push("Saved <b>ok</b>", Severity::Success);

        assert_eq!(
            alert.class_name(),
            "alert alert-success alert-dismissible fade show position-fixed"
        );
        let html = alert.inner_html();
        assert!(html.contains("fa-check-circle"));
        assert!(html.contains("Saved &lt;b&gt;ok&lt;/b&gt;"));
        assert!(html.contains(r#"data-bs-dismiss="alert""#));
    }

    #[test]
    fn test_ids_are_distinct_and_expire_once() {
        let mut notifier = Notifier::new();
        let a = notifier.push("one", Severity::Info);
        let b = notifier.push("one", Severity::Info);
        assert_ne!(a.id, b.id);
        assert_eq!(notifier.live_count(), 2);

        assert!(notifier.expire(a.id).is_some());
        assert!(notifier.expire(a.id).is_none());
        assert!(notifier.is_live(b.id));
    }
}
