use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use url::Url;

/// `ID=N`: commit `N` stars on the widget for `ID`, then submit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateArg {
    pub manga_id: String,
    pub stars: u32,
}

impl FromStr for RateArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, stars) = s
            .split_once('=')
            .ok_or_else(|| format!("expected ID=N, got {s:?}"))?;
        let id = id.trim();
        if id.is_empty() {
            return Err(format!("missing manga id in {s:?}"));
        }
        let stars: u32 = stars
            .trim()
            .parse()
            .map_err(|_| format!("invalid star count in {s:?}"))?;
        if stars == 0 {
            return Err("star count starts at 1".to_string());
        }
        Ok(Self {
            manga_id: id.to_string(),
            stars,
        })
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// HTML page to drive.
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the resulting HTML. Defaults to stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// JSON file backing page storage (the saved theme). In-memory when omitted.
    #[arg(long)]
    pub storage: Option<PathBuf>,

    /// Base URL of the backend serving `api/rate`.
    #[arg(long, default_value = "http://127.0.0.1:5000/")]
    pub api_base: Url,

    /// JSON file overriding the role selectors (e.g. `{"card": ".tile"}`).
    #[arg(long)]
    pub selectors: Option<PathBuf>,

    /// Flip the light/dark theme and persist the result.
    #[arg(long)]
    pub toggle_theme: bool,

    /// Rate a manga: `ID=N` clicks star N of its widget, then submits. Repeatable.
    #[arg(long = "rate", value_name = "ID=N")]
    pub rate: Vec<RateArg>,

    /// Click the sample title at this 0-based index.
    #[arg(long)]
    pub pick_sample: Option<usize>,

    /// Scroll position used to reveal cards (stacked layout).
    #[arg(long)]
    pub scroll_y: Option<f64>,

    /// Show a notification with this message.
    #[arg(long)]
    pub notify: Option<String>,

    /// Severity for `--notify`: success, error, warning or info.
    #[arg(long, default_value = "info")]
    pub severity: String,

    /// Write the page as soon as the actions finish instead of waiting for
    /// pending timers (pulses, highlights, notification expiry).
    #[arg(long)]
    pub snapshot: bool,

    /// Viewport height used with `--scroll-y`.
    #[arg(long, default_value_t = 800.0)]
    pub viewport_height: f64,

    /// HTTP User-Agent for rating submissions.
    #[arg(long, default_value = "manga-page-ui/0.1")]
    pub user_agent: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_arg_parsing() {
        assert_eq!(
            "42=4".parse::<RateArg>().unwrap(),
            RateArg {
                manga_id: "42".to_string(),
                stars: 4
            }
        );
        assert!("42".parse::<RateArg>().is_err());
        assert!("=3".parse::<RateArg>().is_err());
        assert!("42=x".parse::<RateArg>().is_err());
        assert!("42=0".parse::<RateArg>().is_err());
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from([
            "manga-page-ui",
            "--input",
            "page.html",
            "--rate",
            "1=5",
            "--rate",
            "2=3",
            "--toggle-theme",
        ])
        .unwrap();
        assert_eq!(args.rate.len(), 2);
        assert!(args.toggle_theme);
        assert_eq!(args.api_base.as_str(), "http://127.0.0.1:5000/");
        assert!(args.out.is_none());
        assert_eq!(args.severity, "info");
        assert!(!args.snapshot);
    }
}
