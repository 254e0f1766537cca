use std::cell::Cell;
use std::time::Duration;

use kuchiki::NodeRef;

use crate::bindings::RatingBinding;
use crate::dom;
use crate::timers;

pub const ACTIVE_CLASS: &str = "active";
pub const RATING_ATTR: &str = "data-rating";
pub const MANGA_ID_ATTR: &str = "data-manga-id";
pub const DEFAULT_STAR_COUNT: u32 = 5;

const PULSE: Duration = Duration::from_millis(200);

pub struct StarRating {
    container: NodeRef,
    stars: Vec<NodeRef>,
    current: Cell<u32>,
}

impl StarRating {
    pub fn new(binding: RatingBinding) -> Self {
        Self {
            container: binding.container,
            stars: binding.stars,
            current: Cell::new(0),
        }
    }

    pub fn manga_id(&self) -> Option<String> {
        dom::attr(&self.container, MANGA_ID_ATTR)
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    pub fn current(&self) -> u32 {
        self.current.get()
    }

    pub fn position_of(&self, node: &NodeRef) -> Option<u32> {
        self.stars
            .iter()
            .position(|s| s == node)
            .map(|idx| idx as u32 + 1)
    }

    pub fn hover(&self, position: u32) {
        self.highlight(position);
    }

    pub fn leave(&self) {
        self.highlight(self.current.get());
    }

    // Must run inside a `LocalSet`; the pulse is a timer.
    pub fn click(&self, position: u32) {
        let Some(star) = position
            .checked_sub(1)
            .and_then(|idx| self.stars.get(idx as usize))
        else {
            return;
        };

        self.current.set(position);
        self.highlight(position);
        dom::set_attr(&self.container, RATING_ATTR, position.to_string());
        tracing::debug!(manga_id = ?self.manga_id(), rating = position, "rating committed");

        dom::set_style(star, "transform", "scale(1.3)");
        let star = star.clone();
        timers::set_timeout(PULSE, move || dom::set_style(&star, "transform", "scale(1)"));
    }

    fn highlight(&self, rating: u32) {
        for (idx, star) in self.stars.iter().enumerate() {
            if (idx as u32) < rating {
                dom::add_class(star, ACTIVE_CLASS);
            } else {
                dom::remove_class(star, ACTIVE_CLASS);
            }
        }
    }
}
