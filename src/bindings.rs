use std::path::Path;

use anyhow::Context as _;
use kuchiki::NodeRef;
use serde::Deserialize;

use crate::dom::{self, Page};

// Missing fields in a JSON override keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub rating_widget: String,
    pub star: String,
    pub search_form: String,
    pub search_input: String,
    pub search_button: String,
    pub button_label: String,
    pub button_loading: String,
    pub sample_title: String,
    pub card: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            rating_widget: ".rating-stars".to_string(),
            star: ".star".to_string(),
            search_form: ".search-form".to_string(),
            search_input: ".search-input".to_string(),
            search_button: ".search-btn".to_string(),
            button_label: ".btn-text".to_string(),
            button_loading: ".loading".to_string(),
            sample_title: ".sample-title".to_string(),
            card: ".card".to_string(),
        }
    }
}

impl Selectors {
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parse selectors {}", path.display()))
    }
}

#[derive(Debug, Clone)]
pub struct RatingBinding {
    pub container: NodeRef,
    pub stars: Vec<NodeRef>,
}

#[derive(Debug, Clone)]
pub struct SearchBinding {
    pub form: NodeRef,
    pub input: Option<NodeRef>,
    pub button: Option<NodeRef>,
}

#[derive(Debug, Clone, Default)]
pub struct Bindings {
    pub rating_widgets: Vec<RatingBinding>,
    pub search: Option<SearchBinding>,
    pub search_input: Option<NodeRef>,
    pub sample_titles: Vec<NodeRef>,
    pub cards: Vec<NodeRef>,
}

impl Bindings {
    pub fn discover(page: &Page, selectors: &Selectors) -> Self {
        let rating_widgets = page
            .select_all(&selectors.rating_widget)
            .into_iter()
            .map(|container| {
                let stars = dom::select_within(&container, &selectors.star);
                RatingBinding { container, stars }
            })
            .collect();

        let search_input = page.select_first(&selectors.search_input);
        let search = page
            .select_first(&selectors.search_form)
            .map(|form| SearchBinding {
                form,
                input: search_input.clone(),
                button: page.select_first(&selectors.search_button),
            });

        let bindings = Self {
            rating_widgets,
            search,
            search_input,
            sample_titles: page.select_all(&selectors.sample_title),
            cards: page.select_all(&selectors.card),
        };
        tracing::debug!(
            rating_widgets = bindings.rating_widgets.len(),
            search_form = bindings.search.is_some(),
            search_input = bindings.search_input.is_some(),
            sample_titles = bindings.sample_titles.len(),
            cards = bindings.cards.len(),
            "discovered page roles"
        );
        bindings
    }

    pub fn with_rating_widget(mut self, container: NodeRef, stars: Vec<NodeRef>) -> Self {
        self.rating_widgets.push(RatingBinding { container, stars });
        self
    }

    pub fn with_search(
        mut self,
        form: NodeRef,
        input: Option<NodeRef>,
        button: Option<NodeRef>,
    ) -> Self {
        if self.search_input.is_none() {
            self.search_input = input.clone();
        }
        self.search = Some(SearchBinding {
            form,
            input,
            button,
        });
        self
    }

    pub fn with_search_input(mut self, input: NodeRef) -> Self {
        self.search_input = Some(input);
        self
    }

    pub fn with_sample_title(mut self, node: NodeRef) -> Self {
        self.sample_titles.push(node);
        self
    }

    pub fn with_card(mut self, node: NodeRef) -> Self {
        self.cards.push(node);
        self
    }
}
