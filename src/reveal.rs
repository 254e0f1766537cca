use std::cell::RefCell;

use kuchiki::NodeRef;

use crate::dom;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < x || bottom < y {
            return None;
        }
        Some(Rect::new(x, y, right - x, bottom - y))
    }
}

// Positive values grow the viewport on that side, negative ones shrink it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    pub fn apply(&self, viewport: &Rect) -> Rect {
        Rect::new(
            viewport.x - self.left,
            viewport.y - self.top,
            viewport.width + self.left + self.right,
            viewport.height + self.top + self.bottom,
        )
    }
}

pub trait Layout {
    fn bounding_rect(&self, node: &NodeRef) -> Option<Rect>;
}

impl<F> Layout for F
where
    F: Fn(&NodeRef) -> Option<Rect>,
{
    fn bounding_rect(&self, node: &NodeRef) -> Option<Rect> {
        self(node)
    }
}

pub struct StackedLayout {
    boxes: Vec<(NodeRef, Rect)>,
}

impl StackedLayout {
    pub fn new(nodes: &[NodeRef], top: f64, height: f64, gap: f64, width: f64) -> Self {
        let boxes = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| {
                let y = top + idx as f64 * (height + gap);
                (node.clone(), Rect::new(0.0, y, width, height))
            })
            .collect();
        Self { boxes }
    }
}

impl Layout for StackedLayout {
    fn bounding_rect(&self, node: &NodeRef) -> Option<Rect> {
        self.boxes.iter().find(|(n, _)| n == node).map(|(_, r)| *r)
    }
}

#[derive(Debug, Clone)]
pub struct IntersectionEntry {
    pub target: NodeRef,
    pub ratio: f64,
    pub is_intersecting: bool,
}

struct Observed {
    target: NodeRef,
    last: Option<bool>,
}

pub struct IntersectionWatcher {
    threshold: f64,
    margin: RootMargin,
    observed: RefCell<Vec<Observed>>,
}

impl IntersectionWatcher {
    pub fn new(threshold: f64, margin: RootMargin) -> Self {
        Self {
            threshold,
            margin,
            observed: RefCell::new(Vec::new()),
        }
    }

    pub fn observe(&self, target: NodeRef) {
        let mut observed = self.observed.borrow_mut();
        if observed.iter().any(|o| o.target == target) {
            return;
        }
        observed.push(Observed { target, last: None });
    }

    pub fn observed_count(&self) -> usize {
        self.observed.borrow().len()
    }

    pub fn update(&self, viewport: &Rect, layout: &dyn Layout) -> Vec<IntersectionEntry> {
        let root = self.margin.apply(viewport);
        let mut entries = Vec::new();
        for observed in self.observed.borrow_mut().iter_mut() {
            let Some(rect) = layout.bounding_rect(&observed.target) else {
                continue;
            };
            let ratio = intersection_ratio(&rect, &root);
            let is_intersecting = ratio > 0.0 && ratio >= self.threshold;
            if observed.last == Some(is_intersecting) {
                continue;
            }
            observed.last = Some(is_intersecting);
            entries.push(IntersectionEntry {
                target: observed.target.clone(),
                ratio,
                is_intersecting,
            });
        }
        entries
    }
}

fn intersection_ratio(target: &Rect, root: &Rect) -> f64 {
    let Some(overlap) = target.intersection(root) else {
        return 0.0;
    };
    let area = target.area();
    if area == 0.0 {
        // A zero-sized target inside the root counts as fully visible.
        return 1.0;
    }
    (overlap.area() / area).min(1.0)
}

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_MARGIN: RootMargin = RootMargin {
    top: 0.0,
    right: 0.0,
    bottom: -50.0,
    left: 0.0,
};

pub struct ScrollAnimator {
    watcher: IntersectionWatcher,
    cards: Vec<NodeRef>,
}

impl ScrollAnimator {
    pub fn new(cards: Vec<NodeRef>) -> Self {
        let watcher = IntersectionWatcher::new(REVEAL_THRESHOLD, REVEAL_MARGIN);
        for (idx, card) in cards.iter().enumerate() {
            let delay = stagger_delay(idx);
            let transition = format!(
                "opacity 0.6s ease {delay}s, transform 0.6s ease {delay}s"
            );
            dom::set_styles(
                card,
                &[
                    ("opacity", "0"),
                    ("transform", "translateY(30px)"),
                    ("transition", transition.as_str()),
                ],
            );
            watcher.observe(card.clone());
        }
        tracing::debug!(cards = cards.len(), "scroll reveal armed");
        Self { watcher, cards }
    }

    pub fn cards(&self) -> &[NodeRef] {
        &self.cards
    }

    pub fn on_scroll(&self, viewport: &Rect, layout: &dyn Layout) -> usize {
        let mut revealed = 0;
        for entry in self.watcher.update(viewport, layout) {
            if entry.is_intersecting {
                dom::set_styles(&entry.target, &[("opacity", "1"), ("transform", "translateY(0)")]);
                revealed += 1;
            }
        }
        revealed
    }
}

fn stagger_delay(index: usize) -> f64 {
    index as f64 / 10.0
}
