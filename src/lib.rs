mod app;
mod bindings;
mod builtin;
mod cli;
mod dom;
mod markup;
mod notify;
mod rating;
mod reveal;
mod runtime;
mod samples;
mod search;
mod storage;
mod style;
mod submit;
mod theme;
mod timers;

use std::time::Duration;

use anyhow::Context as _;
use cli::Args;

pub use app::{App, UiEvent};
pub use bindings::{Bindings, RatingBinding, SearchBinding, Selectors};
pub use cli::{Args as CliArgs, RateArg};
pub use dom::Page;
pub use notify::{LIFETIME as NOTIFICATION_LIFETIME, Severity};
pub use rating::StarRating;
pub use reveal::{
    IntersectionEntry, IntersectionWatcher, Layout, Rect, RootMargin, ScrollAnimator,
    StackedLayout,
};
pub use runtime::UiRuntime;
pub use samples::SampleTitlePicker;
pub use search::{SearchFormEnhancer, SuggestionHook};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use submit::{RateRequest, RateResponse, RatingClient, SubmitOutcome};
pub use theme::{DARK_THEME_CLASS, THEME_KEY, Theme};
pub use timers::Debouncer;

pub mod element {
    pub use crate::dom::{
        add_class, attr, classes, first_within, has_attr, has_class, inner_html, remove_class,
        select_within, set_attr, style,
    };
}

pub use markup::{DemoManga, demo_page};

const CARD_HEIGHT: f64 = 320.0;
const CARD_GAP: f64 = 24.0;
const VIEWPORT_WIDTH: f64 = 1280.0;
const SETTLE_MARGIN: Duration = Duration::from_millis(50);

pub async fn run(args: Args) -> anyhow::Result<()> {
    tokio::task::LocalSet::new().run_until(drive(args)).await
}

async fn drive(args: Args) -> anyhow::Result<()> {
    let html = std::fs::read_to_string(&args.input)
        .with_context(|| format!("read {}", args.input.display()))?;
    let page = Page::parse(&html);

    let storage: Box<dyn Storage> = match &args.storage {
        Some(path) => Box::new(FileStorage::open(path)?),
        None => Box::new(MemoryStorage::new()),
    };
    let selectors = match &args.selectors {
        Some(path) => Selectors::from_json_file(path)?,
        None => Selectors::default(),
    };
    let client = RatingClient::new(&args.api_base, &args.user_agent)?;

    let mut app = App::new(page, storage, client, selectors);
    app.initialize();

    if let Some(message) = &args.notify {
        app.show_notification(message, Severity::from(args.severity.as_str()));
    }

    if args.toggle_theme {
        let theme = app.toggle_theme();
        tracing::info!(theme = theme.as_str(), "theme toggled");
    }

    if let Some(index) = args.pick_sample {
        let title = app
            .samples()
            .and_then(|s| s.titles().get(index).cloned())
            .with_context(|| format!("no sample title at index {}", index))?;
        if !app.dispatch(&title, UiEvent::Click) {
            tracing::warn!(index, "no search input to fill");
        }
    }

    for rate in &args.rate {
        rate_one(&app, rate).await?;
    }

    if let Some(scroll_y) = args.scroll_y {
        let layout = StackedLayout::new(app.cards(), 0.0, CARD_HEIGHT, CARD_GAP, VIEWPORT_WIDTH);
        let viewport = Rect::new(0.0, scroll_y, VIEWPORT_WIDTH, args.viewport_height);
        let revealed = app.scroll(&viewport, &layout);
        tracing::info!(scroll_y, revealed, "cards revealed");
    }

    let timers_started =
        args.notify.is_some() || args.pick_sample.is_some() || !args.rate.is_empty();
    if timers_started && !args.snapshot {
        // The longest chain is a notification's lifetime plus its exit animation.
        tokio::time::sleep(notify::LIFETIME + notify::EXIT_ANIMATION + SETTLE_MARGIN).await;
    }

    let out = app.page().to_html()?;
    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("create {}", parent.display()))?;
                }
            }
            std::fs::write(path, out).with_context(|| format!("write {}", path.display()))?;
        }
        None => println!("{}", out),
    }
    Ok(())
}

async fn rate_one(app: &App, rate: &RateArg) -> anyhow::Result<()> {
    match app.widget(&rate.manga_id) {
        Some(widget) => {
            if rate.stars as usize > widget.star_count() {
                anyhow::bail!(
                    "manga {} has {} stars; cannot rate {}",
                    rate.manga_id,
                    widget.star_count(),
                    rate.stars
                );
            }
            widget.click(rate.stars);
        }
        None => tracing::warn!(manga_id = %rate.manga_id, "no rating widget for manga"),
    }

    let control = app
        .page()
        .find_by_attr("data-rate-for", &rate.manga_id)
        .with_context(|| format!("no rate control for manga {}", rate.manga_id))?;

    match app.submit_rating(&rate.manga_id, &control).await {
        SubmitOutcome::Accepted => {
            tracing::info!(manga_id = %rate.manga_id, stars = rate.stars, "rating accepted")
        }
        SubmitOutcome::MissingRating => {
            tracing::warn!(manga_id = %rate.manga_id, "no rating committed; nothing sent")
        }
        SubmitOutcome::Failed(reason) => {
            tracing::warn!(manga_id = %rate.manga_id, %reason, "rating rejected")
        }
    }
    Ok(())
}
