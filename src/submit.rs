use anyhow::{Context as _, anyhow};
use kuchiki::NodeRef;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::dom;
use crate::notify::Severity;
use crate::rating::{MANGA_ID_ATTR, RATING_ATTR};
use crate::runtime::UiRuntime;

pub const RATE_PATH: &str = "api/rate";

pub const MSG_MISSING: &str = "Please select a rating first!";
pub const MSG_SUCCESS: &str = "Rating submitted successfully!";
pub const MSG_FAILURE: &str = "Failed to submit rating. Please try again.";

const LOADING_LABEL: &str = r#"<span class="loading"></span> Rating..."#;
const RATED_LABEL: &str = "✓ Rated";

#[derive(Debug, Serialize)]
pub struct RateRequest {
    pub manga_id: serde_json::Value,
    pub rating: u32,
}

#[derive(Debug, Deserialize)]
pub struct RateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    MissingRating,
    Accepted,
    Failed(String),
}

pub fn manga_id_value(id: &str) -> serde_json::Value {
    match id.trim().parse::<i64>() {
        Ok(n) => serde_json::Value::from(n),
        Err(_) => serde_json::Value::from(id),
    }
}

#[derive(Clone)]
pub struct RatingClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl RatingClient {
    pub fn new(api_base: &Url, user_agent: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("build reqwest client")?;
        let endpoint = api_base
            .join(RATE_PATH)
            .with_context(|| format!("resolve {} against {}", RATE_PATH, api_base))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    // One POST, no retries. A non-2xx status or `success: false` is an error.
    pub async fn rate(&self, request: &RateRequest) -> anyhow::Result<()> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .with_context(|| format!("POST {}", self.endpoint))?;

        let status = resp.status();
        let body: RateResponse = resp.json().await.context("parse rating response")?;
        if !status.is_success() {
            return Err(anyhow!(
                "POST {} failed with status {}: {}",
                self.endpoint,
                status,
                body.message.as_deref().unwrap_or("no message")
            ));
        }
        if !body.success {
            return Err(anyhow!(
                "{}",
                body.message
                    .unwrap_or_else(|| "Failed to submit rating".to_string())
            ));
        }
        Ok(())
    }
}

pub async fn submit_rating(
    rt: &UiRuntime,
    client: &RatingClient,
    manga_id: &str,
    control: &NodeRef,
) -> SubmitOutcome {
    let rating = rt
        .page()
        .find_by_attr(MANGA_ID_ATTR, manga_id)
        .and_then(|container| dom::attr(&container, RATING_ATTR))
        .and_then(|raw| raw.trim().parse::<u32>().ok());

    let Some(rating) = rating else {
        rt.show_notification(MSG_MISSING, Severity::Warning);
        return SubmitOutcome::MissingRating;
    };

    let original_label = match dom::inner_html(control) {
        Ok(html) => html,
        Err(err) => {
            tracing::warn!(error = %format!("{:#}", err), "could not capture control label");
            String::new()
        }
    };
    dom::set_inner_html(control, LOADING_LABEL);
    dom::set_attr(control, "disabled", "");

    let request = RateRequest {
        manga_id: manga_id_value(manga_id),
        rating,
    };
    tracing::info!(manga_id, rating, endpoint = %client.endpoint(), "submitting rating");

    match client.rate(&request).await {
        Ok(()) => {
            rt.show_notification(MSG_SUCCESS, Severity::Success);
            dom::set_inner_html(control, RATED_LABEL);
            dom::set_style(control, "background", "var(--secondary)");
            SubmitOutcome::Accepted
        }
        Err(err) => {
            let reason = format!("{:#}", err);
            tracing::error!(manga_id, rating, error = %reason, "rating submission failed");
            rt.show_notification(MSG_FAILURE, Severity::Error);
            dom::set_inner_html(control, &original_label);
            dom::remove_attr(control, "disabled");
            SubmitOutcome::Failed(reason)
        }
    }
}
