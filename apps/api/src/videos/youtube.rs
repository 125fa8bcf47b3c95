//! YouTube Data API v3 search client.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::models::video::{Thumbnails, VideoCandidate};

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

pub struct YouTubeClient {
    http: reqwest::Client,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }

    /// Runs one search.list query and maps the items to candidates.
    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<VideoCandidate>> {
        let max = max_results.clamp(1, 50).to_string();
        let response: SearchListResponse = self
            .http
            .get(SEARCH_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", &max),
                ("relevanceLanguage", "en"),
                ("safeSearch", "none"),
            ])
            .send()
            .await
            .context("Failed to call YouTube search.list API")?
            .json()
            .await
            .context("Failed to parse YouTube search.list response")?;

        if let Some(error) = response.error {
            bail!("YouTube API error: {} ({})", error.message, error.code);
        }

        Ok(into_candidates(response))
    }
}

pub fn into_candidates(response: SearchListResponse) -> Vec<VideoCandidate> {
    response
        .items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.and_then(|id| id.video_id)?;
            let snippet = item.snippet?;
            Some(VideoCandidate {
                video_id,
                title: snippet.title,
                description: snippet.description,
                channel_title: snippet.channel_title.unwrap_or_default(),
                channel_id: snippet.channel_id.unwrap_or_default(),
                thumbnails: snippet.thumbnails.unwrap_or_default(),
                published_at: snippet.published_at,
            })
        })
        .collect()
}

// --- YouTube Data API v3 response types ---

#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Option<Vec<SearchItem>>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: u32,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub id: Option<SearchItemId>,
    pub snippet: Option<SearchSnippet>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItemId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
    #[serde(rename = "channelTitle")]
    pub channel_title: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}
