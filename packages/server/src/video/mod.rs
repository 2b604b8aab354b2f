//! Video link metadata: ID extraction plus an optional live lookup that
//! degrades to a payload synthesized from the ID alone.

mod youtube;

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;

pub use youtube::YouTubeClient;

use crate::error::AppError;
use crate::models::portfolio::VideoDataResponse;

/// Recognized link shapes, tried in order.
static VIDEO_ID_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&?/]+)")
            .expect("watch link regex should compile"),
        Regex::new(r"vid:([a-zA-Z0-9_-]+)").expect("search result regex should compile"),
        Regex::new(r"youtube\.com/shorts/([^&?/]+)").expect("shorts regex should compile"),
    ]
});

pub const FALLBACK_TITLE: &str = "YouTube Video";
pub const FALLBACK_DESCRIPTION: &str = "Please add title and description manually";

/// Metadata returned by a live lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub thumbnail: String,
}

#[derive(Debug, Error)]
pub enum VideoLookupError {
    #[error("metadata request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("metadata service responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error("video {0} not found")]
    NotFound(String),
}

/// Source of live video metadata.
#[async_trait]
pub trait VideoMetadataProvider: Send + Sync {
    async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, VideoLookupError>;
}

/// Pull the platform video ID out of a link, if it has a recognized shape.
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/maxresdefault.jpg")
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}")
}

/// Response built from the video ID alone.
pub fn fallback(video_id: &str, notice: impl Into<String>) -> VideoDataResponse {
    VideoDataResponse {
        title: FALLBACK_TITLE.into(),
        description: FALLBACK_DESCRIPTION.into(),
        thumbnail: thumbnail_url(video_id),
        video_id: video_id.into(),
        embed_url: embed_url(video_id),
        notice: Some(notice.into()),
    }
}

/// Resolve a link to embeddable metadata.
///
/// Only an unusable URL is an error. A missing provider or a failed lookup
/// yields the fallback payload.
pub async fn lookup(
    provider: Option<&dyn VideoMetadataProvider>,
    url: &str,
) -> Result<VideoDataResponse, AppError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AppError::field("url", "YouTube URL is required"));
    }
    let video_id = extract_video_id(url)
        .ok_or_else(|| AppError::field("url", "Invalid YouTube URL"))?;

    let Some(provider) = provider else {
        return Ok(fallback(
            video_id,
            "YouTube API key not configured. Using basic video information.",
        ));
    };

    match provider.fetch(video_id).await {
        Ok(meta) => Ok(VideoDataResponse {
            title: meta.title,
            description: meta.description,
            thumbnail: meta.thumbnail,
            video_id: video_id.into(),
            embed_url: embed_url(video_id),
            notice: None,
        }),
        Err(e) => {
            tracing::warn!(video_id, error = %e, "Video metadata lookup failed, using fallback");
            Ok(fallback(
                video_id,
                "Video details could not be fetched. Using basic video information.",
            ))
        }
    }
}
