use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{VideoLookupError, VideoMetadata, VideoMetadataProvider, thumbnail_url};
use crate::config::VideoConfig;

/// YouTube Data API v3 client (`videos.list` with the `snippet` part).
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(config: &VideoConfig, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }
}

#[derive(Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Deserialize)]
struct VideoItem {
    snippet: Snippet,
}

#[derive(Deserialize)]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Deserialize, Default)]
struct Thumbnails {
    high: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: String,
}

#[async_trait]
impl VideoMetadataProvider for YouTubeClient {
    async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, VideoLookupError> {
        let response = self
            .client
            .get(format!("{}/videos", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("id", video_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(VideoLookupError::Status(status));
        }

        let body: VideoListResponse = response.json().await?;
        let item = body
            .items
            .into_iter()
            .next()
            .ok_or_else(|| VideoLookupError::NotFound(video_id.to_string()))?;

        Ok(VideoMetadata {
            title: item.snippet.title,
            description: item.snippet.description,
            thumbnail: item
                .snippet
                .thumbnails
                .high
                .map(|t| t.url)
                .unwrap_or_else(|| thumbnail_url(video_id)),
        })
    }
}
