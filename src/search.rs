use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kuchiki::NodeRef;

use crate::bindings::{SearchBinding, Selectors};
use crate::dom;
use crate::timers::Debouncer;

pub const INPUT_DEBOUNCE: Duration = Duration::from_millis(300);

pub type SuggestionHook = Rc<dyn Fn(&str)>;

pub struct SearchFormEnhancer {
    form: NodeRef,
    input: Option<NodeRef>,
    button: Option<NodeRef>,
    label_selector: String,
    loading_selector: String,
    debouncer: Debouncer,
    suggestions: RefCell<Option<SuggestionHook>>,
}

impl SearchFormEnhancer {
    pub fn new(binding: SearchBinding, selectors: &Selectors) -> Self {
        Self {
            form: binding.form,
            input: binding.input,
            button: binding.button,
            label_selector: selectors.button_label.clone(),
            loading_selector: selectors.button_loading.clone(),
            debouncer: Debouncer::new(INPUT_DEBOUNCE),
            suggestions: RefCell::new(None),
        }
    }

    pub fn form(&self) -> &NodeRef {
        &self.form
    }

    pub fn input(&self) -> Option<&NodeRef> {
        self.input.as_ref()
    }

    // Without a hook the debounce still runs but nothing happens when it elapses.
    pub fn set_suggestion_hook(&self, hook: SuggestionHook) {
        *self.suggestions.borrow_mut() = Some(hook);
    }

    pub fn on_submit(&self) {
        let Some(button) = &self.button else {
            return;
        };
        let label = dom::first_within(button, &self.label_selector);
        let loading = dom::first_within(button, &self.loading_selector);
        if let (Some(label), Some(loading)) = (label, loading) {
            dom::set_style(&label, "display", "none");
            dom::set_style(&loading, "display", "inline-block");
            dom::set_attr(button, "disabled", "");
            tracing::debug!("search submitted; button locked");
        }
    }

    pub fn on_input(&self) {
        let Some(input) = &self.input else {
            return;
        };
        let input = input.clone();
        let hook = self.suggestions.borrow().clone();
        self.debouncer.call(move || {
            if let Some(hook) = hook {
                let value = dom::attr(&input, "value").unwrap_or_default();
                hook(&value);
            }
        });
    }
}
