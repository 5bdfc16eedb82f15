pub mod images;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::{Client, Url};
use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::prelude::{AppError, Result};
pub use images::extract_image_url;

const EXCERPT_CHARS: usize = 150;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Enclosure {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub pub_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub enclosure: Option<Enclosure>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    pub status: String,
    #[serde(default)]
    pub feed: FeedMeta,
    #[serde(default)]
    pub items: Vec<FeedItem>,
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<FeedResponse>;
}

/// RSS feed converted to json by a hosted conversion endpoint.
#[derive(Debug, Clone)]
pub struct Rss2JsonClient {
    http: Client,
    url: Url,
}

impl Rss2JsonClient {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| AppError::malformed("ERR-FEED-000", format!("{}: {}", url, e)))?;
        Ok(Rss2JsonClient {
            http: Client::builder().build()?,
            url,
        })
    }
}

#[async_trait]
impl FeedSource for Rss2JsonClient {
    async fn fetch(&self) -> Result<FeedResponse> {
        tracing::debug!("fetching feed: {}", &self.url);
        let res = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| AppError::vendor("ERR-FEED-001", e))?;
        let status = res.status();
        if !status.is_success() {
            return Err(AppError::vendor("ERR-FEED-001", status));
        }
        let feed: FeedResponse = res
            .json()
            .await
            .map_err(|e| AppError::malformed("ERR-FEED-002", e))?;
        if feed.status != "ok" {
            return Err(AppError::malformed(
                "ERR-FEED-002",
                format!("feed status {}", &feed.status),
            ));
        }
        tracing::debug!("feed {} returned {} items", &feed.feed.title, feed.items.len());
        Ok(feed)
    }
}

/// Items whose title contains `needle`, ignoring case.
pub fn roundup_posts(items: Vec<FeedItem>, needle: &str) -> Vec<FeedItem> {
    let needle = needle.to_lowercase();
    items
        .into_iter()
        .filter(|item| item.title.to_lowercase().contains(&needle))
        .collect()
}

/// Tag-free, entity-decoded preview of a post body.
pub fn excerpt(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text = fragment.root_element().text().collect::<String>();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out: String = text.chars().take(EXCERPT_CHARS).collect();
    out.push_str("...");
    out
}

/// "2024-01-05 14:00:00" → "January 5, 2024"; anything unparseable is returned as is.
pub fn format_pub_date(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoundupPost {
    pub title: String,
    pub link: String,
    pub author: String,
    pub pub_date: String,
    pub published: String,
    pub image_url: Option<String>,
    pub excerpt: String,
}

impl RoundupPost {
    pub fn from_item(item: &FeedItem) -> Self {
        RoundupPost {
            title: item.title.clone(),
            link: item.link.clone(),
            author: item.author.clone(),
            pub_date: item.pub_date.clone(),
            published: format_pub_date(&item.pub_date),
            image_url: extract_image_url(item),
            excerpt: excerpt(&item.description),
        }
    }
}
