use std::rc::Rc;

use kuchiki::NodeRef;

use crate::bindings::{Bindings, Selectors};
use crate::dom::Page;
use crate::notify;
use crate::rating::StarRating;
use crate::reveal::{Layout, Rect, ScrollAnimator};
use crate::runtime::UiRuntime;
use crate::samples::SampleTitlePicker;
use crate::search::SearchFormEnhancer;
use crate::storage::Storage;
use crate::submit::{self, RatingClient, SubmitOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    MouseEnter,
    MouseLeave,
    Click,
    Submit,
    Input,
}

pub struct App {
    runtime: UiRuntime,
    client: RatingClient,
    selectors: Selectors,
    widgets: Vec<Rc<StarRating>>,
    search: Option<SearchFormEnhancer>,
    samples: Option<SampleTitlePicker>,
    animator: Option<ScrollAnimator>,
}

impl App {
    pub fn new(
        page: Page,
        storage: Box<dyn Storage>,
        client: RatingClient,
        selectors: Selectors,
    ) -> Self {
        let runtime = UiRuntime::new(page, storage);
        runtime.inject_notification_styles();
        runtime.load_theme();
        Self {
            runtime,
            client,
            selectors,
            widgets: Vec::new(),
            search: None,
            samples: None,
            animator: None,
        }
    }

    pub fn runtime(&self) -> &UiRuntime {
        &self.runtime
    }

    pub fn page(&self) -> &Page {
        self.runtime.page()
    }

    pub fn initialize(&mut self) {
        let bindings = Bindings::discover(self.runtime.page(), &self.selectors);
        self.initialize_with(bindings);
    }

    pub fn initialize_with(&mut self, bindings: Bindings) {
        self.widgets = bindings
            .rating_widgets
            .into_iter()
            .map(|b| Rc::new(StarRating::new(b)))
            .collect();

        let input = bindings
            .search_input
            .clone()
            .or_else(|| bindings.search.as_ref().and_then(|s| s.input.clone()));
        self.search = match bindings.search {
            Some(binding) => Some(SearchFormEnhancer::new(binding, &self.selectors)),
            None => {
                tracing::debug!("no search form; skipping");
                None
            }
        };

        self.samples = (!bindings.sample_titles.is_empty())
            .then(|| SampleTitlePicker::new(bindings.sample_titles, input));

        self.animator = (!bindings.cards.is_empty()).then(|| ScrollAnimator::new(bindings.cards));

        tracing::info!(
            rating_widgets = self.widgets.len(),
            search_form = self.search.is_some(),
            sample_titles = self.samples.as_ref().map_or(0, |s| s.titles().len()),
            cards = self.animator.as_ref().map_or(0, |a| a.cards().len()),
            "page initialized"
        );
    }

    pub fn widgets(&self) -> &[Rc<StarRating>] {
        &self.widgets
    }

    pub fn widget(&self, manga_id: &str) -> Option<Rc<StarRating>> {
        self.widgets
            .iter()
            .find(|w| w.manga_id().as_deref() == Some(manga_id))
            .cloned()
    }

    pub fn search(&self) -> Option<&SearchFormEnhancer> {
        self.search.as_ref()
    }

    pub fn samples(&self) -> Option<&SampleTitlePicker> {
        self.samples.as_ref()
    }

    pub fn cards(&self) -> &[NodeRef] {
        self.animator.as_ref().map(|a| a.cards()).unwrap_or(&[])
    }

    // Must run inside a `LocalSet`; several handlers start timers.
    pub fn dispatch(&self, target: &NodeRef, event: UiEvent) -> bool {
        for node in target.inclusive_ancestors() {
            if self.handle(&node, event) {
                return true;
            }
        }
        false
    }

    fn handle(&self, node: &NodeRef, event: UiEvent) -> bool {
        for widget in &self.widgets {
            if let Some(position) = widget.position_of(node) {
                match event {
                    UiEvent::MouseEnter => widget.hover(position),
                    UiEvent::MouseLeave => widget.leave(),
                    UiEvent::Click => widget.click(position),
                    UiEvent::Submit | UiEvent::Input => return false,
                }
                return true;
            }
        }

        if let Some(search) = &self.search {
            if event == UiEvent::Submit && search.form() == node {
                search.on_submit();
                return true;
            }
            if event == UiEvent::Input && search.input() == Some(node) {
                search.on_input();
                return true;
            }
        }

        if event == UiEvent::Click {
            if let Some(samples) = &self.samples {
                if samples.owns(node) {
                    return samples.pick(&self.runtime, node);
                }
            }
            if notify::dismiss_from_close(node) {
                return true;
            }
        }

        false
    }

    pub async fn submit_rating(&self, manga_id: &str, control: &NodeRef) -> SubmitOutcome {
        submit::submit_rating(&self.runtime, &self.client, manga_id, control).await
    }

    pub fn scroll(&self, viewport: &Rect, layout: &dyn Layout) -> usize {
        self.animator
            .as_ref()
            .map_or(0, |a| a.on_scroll(viewport, layout))
    }

    pub fn toggle_theme(&self) -> crate::theme::Theme {
        self.runtime.toggle_theme()
    }

    pub fn show_notification(&self, message: &str, severity: notify::Severity) -> Option<NodeRef> {
        self.runtime.show_notification(message, severity)
    }
}
