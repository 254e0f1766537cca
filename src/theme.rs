use crate::dom::{self, Page};
use crate::storage::Storage;

pub const THEME_KEY: &str = "theme";
pub const DARK_THEME_CLASS: &str = "dark-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    // Anything other than "dark", including nothing stored, is light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

pub fn load_theme(page: &Page, storage: &dyn Storage) {
    let saved = storage.get(THEME_KEY);
    if Theme::from_stored(saved.as_deref()) != Theme::Dark {
        return;
    }
    match page.body() {
        Some(body) => {
            dom::add_class(&body, DARK_THEME_CLASS);
            tracing::debug!("applied saved dark theme");
        }
        None => tracing::debug!("no <body>; saved theme not applied"),
    }
}

pub fn toggle_theme(page: &Page, storage: &dyn Storage) -> Theme {
    let Some(body) = page.body() else {
        return Theme::Light;
    };
    let theme = if dom::toggle_class(&body, DARK_THEME_CLASS) {
        Theme::Dark
    } else {
        Theme::Light
    };
    if let Err(err) = storage.set(THEME_KEY, theme.as_str()) {
        tracing::warn!(error = %format!("{:#}", err), theme = theme.as_str(), "failed to persist theme");
    }
    theme
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn body_is_dark(page: &Page) -> bool {
        dom::has_class(&page.body().unwrap(), DARK_THEME_CLASS)
    }

    #[test]
    fn load_applies_only_dark() {
        let page = Page::parse("<body class=\"home\"></body>");
        load_theme(&page, &MemoryStorage::with_entry(THEME_KEY, "light"));
        assert!(!body_is_dark(&page));
        load_theme(&page, &MemoryStorage::new());
        assert!(!body_is_dark(&page));
        load_theme(&page, &MemoryStorage::with_entry(THEME_KEY, "dark"));
        assert!(body_is_dark(&page));
        assert!(dom::has_class(&page.body().unwrap(), "home"));
    }

    #[test]
    fn toggle_persists_resulting_state() {
        let page = Page::parse("<body></body>");
        let storage = MemoryStorage::new();

        assert_eq!(toggle_theme(&page, &storage), Theme::Dark);
        assert!(body_is_dark(&page));
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("dark"));

        assert_eq!(toggle_theme(&page, &storage), Theme::Light);
        assert!(!body_is_dark(&page));
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("light"));
    }

    struct ReadOnly;

    impl Storage for ReadOnly {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
            anyhow::bail!("storage is read-only")
        }
    }

    #[test]
    fn toggle_still_applies_when_storage_fails() {
        let page = Page::parse("<body></body>");
        assert_eq!(toggle_theme(&page, &ReadOnly), Theme::Dark);
        assert!(body_is_dark(&page));
    }
}
