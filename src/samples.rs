use std::time::Duration;

use kuchiki::NodeRef;

use crate::dom;
use crate::runtime::UiRuntime;
use crate::timers;

const HIGHLIGHT: Duration = Duration::from_millis(1000);

pub struct SampleTitlePicker {
    titles: Vec<NodeRef>,
    input: Option<NodeRef>,
}

impl SampleTitlePicker {
    pub fn new(titles: Vec<NodeRef>, input: Option<NodeRef>) -> Self {
        Self { titles, input }
    }

    pub fn owns(&self, node: &NodeRef) -> bool {
        self.titles.iter().any(|t| t == node)
    }

    pub fn titles(&self) -> &[NodeRef] {
        &self.titles
    }

    // False when there is no search input to fill.
    pub fn pick(&self, rt: &UiRuntime, title: &NodeRef) -> bool {
        self.fill(rt, &title.text_contents())
    }

    pub fn fill(&self, rt: &UiRuntime, text: &str) -> bool {
        let Some(input) = &self.input else {
            return false;
        };
        dom::set_attr(input, "value", text);
        rt.focus(input);
        dom::set_style(input, "border-color", "var(--primary)");
        let input = input.clone();
        timers::set_timeout(HIGHLIGHT, move || {
            dom::set_style(&input, "border-color", "var(--border)");
        });
        tracing::debug!(title = text, "sample title picked");
        true
    }
}
