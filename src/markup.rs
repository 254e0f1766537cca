use maud::{DOCTYPE, Markup, html};

pub struct DemoManga<'a> {
    pub id: &'a str,
    pub title: &'a str,
}

pub fn rating_widget(manga_id: &str, stars: u32) -> Markup {
    html! {
        div class="rating-stars" data-manga-id=(manga_id) {
            @for _ in 0..stars {
                span class="star" { "★" }
            }
        }
    }
}

pub fn rate_button(manga_id: &str) -> Markup {
    html! {
        button type="button" class="btn rate-btn" data-rate-for=(manga_id) { "Rate" }
    }
}

pub fn search_form(action: &str) -> Markup {
    html! {
        form class="search-form" method="get" action=(action) {
            input class="search-input" type="text" name="q" placeholder="Search manga...";
            button class="search-btn" type="submit" {
                span class="btn-text" { "Search" }
                span class="loading" style="display: none;" {}
            }
        }
    }
}

pub fn sample_titles(titles: &[&str]) -> Markup {
    html! {
        div class="sample-titles" {
            @for title in titles {
                span class="sample-title" { (title) }
            }
        }
    }
}

pub fn manga_card(manga: &DemoManga<'_>) -> Markup {
    html! {
        article class="card" {
            h3 class="card-title" { (manga.title) }
            (rating_widget(manga.id, crate::rating::DEFAULT_STAR_COUNT))
            (rate_button(manga.id))
        }
    }
}

pub fn demo_page(titles: &[&str], mangas: &[DemoManga<'_>]) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Manga Recommendations" }
            }
            body {
                main class="container" {
                    (search_form("/search"))
                    (sample_titles(titles))
                    section class="results" {
                        @for manga in mangas {
                            (manga_card(manga))
                        }
                    }
                }
            }
        }
    };
    markup.into_string()
}
