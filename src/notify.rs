use std::fmt;
use std::time::Duration;

use kuchiki::NodeRef;

use crate::builtin;
use crate::dom::{self, Page};
use crate::timers;

pub const NOTIFICATION_CLASS: &str = "notification";
pub const CLOSE_CLASS: &str = "notification-close";

pub const LIFETIME: Duration = Duration::from_millis(5000);
pub const EXIT_ANIMATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Severity::Success => "var(--secondary)",
            Severity::Error => "var(--destructive)",
            Severity::Warning => "#f59e0b",
            Severity::Info => "var(--primary)",
        }
    }
}

impl From<&str> for Severity {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Must run inside a `LocalSet`; expiry is a local timer.
pub fn show_notification(page: &Page, message: &str, severity: Severity) -> Option<NodeRef> {
    for existing in page.select_all(&format!(".{}", NOTIFICATION_CLASS)) {
        existing.detach();
    }

    let body = page.body()?;
    let markup = maud::html! {
        div class=(format!("{} {}-{}", NOTIFICATION_CLASS, NOTIFICATION_CLASS, severity)) role="status" {
            span { (message) }
            button type="button" class=(CLOSE_CLASS) aria-label="Close" style=(builtin::NOTIFICATION_CLOSE_STYLE) {
                "×"
            }
        }
    };
    let node = dom::parse_fragment(&markup.into_string())
        .into_iter()
        .find(|n| dom::has_class(n, NOTIFICATION_CLASS))?;

    dom::set_styles(&node, builtin::NOTIFICATION_STYLE);
    dom::set_style(&node, "background", severity.background());
    body.append(node.clone());
    tracing::debug!(%severity, text = message, "notification shown");

    let expiring = node.clone();
    timers::set_timeout(LIFETIME, move || {
        if !dom::is_attached(&expiring) {
            return;
        }
        dom::set_style(&expiring, "animation", "slideOutRight 0.3s ease");
        timers::set_timeout(EXIT_ANIMATION, move || expiring.detach());
    });

    Some(node)
}

pub fn dismiss_from_close(close: &NodeRef) -> bool {
    if !dom::has_class(close, CLOSE_CLASS) {
        return false;
    }
    let Some(parent) = close.parent() else {
        return false;
    };
    if !dom::has_class(&parent, NOTIFICATION_CLASS) || !dom::is_attached(&parent) {
        return false;
    }
    parent.detach();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(page: &Page) -> Vec<NodeRef> {
        page.select_all(".notification")
    }

    #[test]
    fn severity_names() {
        assert_eq!(Severity::from("warning"), Severity::Warning);
        assert_eq!(Severity::from("ERROR"), Severity::Error);
        assert_eq!(Severity::from("shiny"), Severity::Info);
        assert_eq!(Severity::Warning.background(), "#f59e0b");
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[tokio::test(start_paused = true)]
    async fn second_notification_replaces_first() {
        tokio::task::LocalSet::new()
            .run_until(async {
                let page = Page::parse("<body></body>");
                show_notification(&page, "first", Severity::Info).unwrap();
                show_notification(&page, "second <b>", Severity::Error).unwrap();

                let nodes = visible(&page);
                assert_eq!(nodes.len(), 1);
                let node = &nodes[0];
                assert!(node.text_contents().contains("second <b>"));
                assert!(dom::has_class(node, "notification-error"));
                assert_eq!(dom::style(node, "background").as_deref(), Some("var(--destructive)"));
                assert_eq!(dom::style(node, "position").as_deref(), Some("fixed"));
                assert_eq!(dom::style(node, "z-index").as_deref(), Some("1000"));
                assert_eq!(
                    dom::style(node, "animation").as_deref(),
                    Some("slideInRight 0.3s ease")
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn expires_after_lifetime_and_exit_animation() {
        tokio::task::LocalSet::new()
            .run_until(async {
                let page = Page::parse("<body></body>");
                let node = show_notification(&page, "bye", Severity::Success).unwrap();

                tokio::time::sleep(Duration::from_millis(4990)).await;
                assert_eq!(visible(&page).len(), 1);

                tokio::time::sleep(Duration::from_millis(20)).await;
                assert_eq!(
                    dom::style(&node, "animation").as_deref(),
                    Some("slideOutRight 0.3s ease")
                );
                assert_eq!(visible(&page).len(), 1);

                tokio::time::sleep(Duration::from_millis(300)).await;
                assert!(visible(&page).is_empty());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn close_control_removes_immediately() {
        tokio::task::LocalSet::new()
            .run_until(async {
                let page = Page::parse("<body></body>");
                let node = show_notification(&page, "closable", Severity::Warning).unwrap();
                let close = dom::first_within(&node, ".notification-close").unwrap();

                assert!(dismiss_from_close(&close));
                assert!(visible(&page).is_empty());
                assert!(!dismiss_from_close(&close));

                // The lifetime timer finds the node gone and does nothing.
                tokio::time::sleep(Duration::from_secs(6)).await;
                assert!(visible(&page).is_empty());
            })
            .await;
    }
}
