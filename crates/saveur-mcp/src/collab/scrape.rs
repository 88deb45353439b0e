//! Recipe-title scraping collaborator
//!
//! Best-effort extraction of recipe titles from the Marmiton search page.
//! The remote markup carries no schema guarantee; extraction is a fixed
//! anchor pattern and anything structurally surprising simply yields fewer
//! titles. Network and status failures are upstream errors.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;

use crate::error::ToolError;

const MARMITON_BASE_URL: &str = "https://www.marmiton.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Cap on returned titles.
pub const MAX_TITLES: usize = 10;

/// Anchors whose href points at a recipe page; group 1 is the anchor body.
static RECIPE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a[^>]*href="[^"]*/recettes/recette_[^"]*"[^>]*>(.*?)</a>"#)
        .expect("Invalid recipe anchor regex")
});

/// Tags inside an anchor body, stripped before trimming.
static INNER_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid inner tag regex"));

/// Scraping collaborator interface.
#[async_trait]
pub trait RecipeScraper: Send + Sync {
    /// Fetch up to [`MAX_TITLES`] recipe titles for a search topic.
    async fn fetch_titles(&self, topic: &str) -> Result<Vec<String>, ToolError>;
}

/// Scraper for marmiton.org search results.
pub struct MarmitonScraper {
    client: reqwest::Client,
    base_url: String,
}

impl MarmitonScraper {
    pub fn new() -> Self {
        Self::with_base_url(MARMITON_BASE_URL.to_string())
    }

    /// Override the site base URL, for tests against a local mock server.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

impl Default for MarmitonScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecipeScraper for MarmitonScraper {
    async fn fetch_titles(&self, topic: &str) -> Result<Vec<String>, ToolError> {
        let url = format!("{}/recettes/recherche.aspx", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("aqt", topic)])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ToolError::Upstream(format!(
                "Marmiton error {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        Ok(extract_titles(&body))
    }
}

/// Pull recipe titles out of a search-results page.
fn extract_titles(html: &str) -> Vec<String> {
    RECIPE_ANCHOR
        .captures_iter(html)
        .map(|c| INNER_TAG.replace_all(&c[1], " ").trim().to_string())
        .filter(|title| !title.is_empty())
        .take(MAX_TITLES)
        .collect()
}
