use std::cell::RefCell;

use kuchiki::NodeRef;

use crate::builtin;
use crate::dom::{self, Page};
use crate::notify::{self, Severity};
use crate::storage::Storage;
use crate::theme;

pub struct UiRuntime {
    page: Page,
    storage: Box<dyn Storage>,
    focused: RefCell<Option<NodeRef>>,
}

impl UiRuntime {
    pub fn new(page: Page, storage: Box<dyn Storage>) -> Self {
        Self {
            page,
            storage,
            focused: RefCell::new(None),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn focus(&self, node: &NodeRef) {
        *self.focused.borrow_mut() = Some(node.clone());
    }

    pub fn active_element(&self) -> Option<NodeRef> {
        self.focused
            .borrow()
            .as_ref()
            .filter(|n| dom::is_attached(n))
            .cloned()
    }

    pub fn inject_notification_styles(&self) {
        let selector = format!("style#{}", builtin::NOTIFICATION_KEYFRAMES_ID);
        if self.page.select_first(&selector).is_some() {
            return;
        }
        let Some(head) = self.page.head() else {
            tracing::debug!("no <head>; skipping keyframes injection");
            return;
        };
        let markup = maud::html! {
            style id=(builtin::NOTIFICATION_KEYFRAMES_ID) {
                (maud::PreEscaped(builtin::NOTIFICATION_KEYFRAMES_CSS))
            }
        };
        for node in dom::parse_fragment(&markup.into_string()) {
            head.append(node);
        }
    }

    pub fn load_theme(&self) {
        theme::load_theme(&self.page, self.storage())
    }

    pub fn toggle_theme(&self) -> theme::Theme {
        theme::toggle_theme(&self.page, self.storage())
    }

    pub fn show_notification(&self, message: &str, severity: Severity) -> Option<NodeRef> {
        notify::show_notification(&self.page, message, severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn keyframes_injected_once() {
        let rt = UiRuntime::new(
            Page::parse("<html><head><title>x</title></head><body></body></html>"),
            Box::new(MemoryStorage::new()),
        );
        rt.inject_notification_styles();
        rt.inject_notification_styles();
        let styles = rt.page().select_all("head style");
        assert_eq!(styles.len(), 1);
        let css = styles[0].text_contents();
        assert!(css.contains("@keyframes slideInRight"));
        assert!(css.contains("@keyframes slideOutRight"));
    }

    #[test]
    fn focus_forgets_detached_nodes() {
        let rt = UiRuntime::new(
            Page::parse(r#"<input id="q">"#),
            Box::new(MemoryStorage::new()),
        );
        let input = rt.page().select_first("#q").unwrap();
        rt.focus(&input);
        assert!(rt.active_element().is_some_and(|n| n == input));
        input.detach();
        assert!(rt.active_element().is_none());
    }
}
