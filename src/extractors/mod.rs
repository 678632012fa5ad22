use async_trait::async_trait;
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub mod innertube;
pub mod oembed;

use crate::{ArticleError, Result};

static VIDEO_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").unwrap());

/// An 11-character YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    /// Extract a video id from a URL-like string.
    ///
    /// Accepts any string containing an 11-character token after `v=` or a
    /// path separator; the first match wins. Whether the id refers to an
    /// existing video is only discovered by the extractor.
    pub fn parse(url: &str) -> Result<Self> {
        VIDEO_ID_REGEX
            .captures(url)
            .map(|captures| Self(captures[1].to_string()))
            .ok_or_else(|| ArticleError::InvalidUrl(url.to_string()).into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this id
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One timed caption line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionEntry {
    /// Spoken text
    pub text: String,

    /// Start offset in seconds
    pub start: f64,

    /// Duration in seconds
    pub duration: f64,
}

/// Title and channel of a video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub channel: String,
}

/// Everything the extractor stage produces for one video
#[derive(Debug, Clone)]
pub struct ExtractedVideo {
    /// Caption entries in chronological order
    pub captions: Vec<CaptionEntry>,

    pub metadata: VideoMetadata,
}

/// Join caption texts with newlines, preserving chronological order.
pub fn join_captions(captions: &[CaptionEntry]) -> String {
    captions
        .iter()
        .map(|entry| entry.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Trait for fetching captions and metadata from different backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptExtractor: Send + Sync {
    /// Fetch the ordered caption sequence and video metadata for an id
    async fn extract(&self, id: &VideoId) -> Result<ExtractedVideo>;

    /// Get the name of this backend
    fn backend_name(&self) -> &'static str;
}

/// Selectable extraction backends
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractorBackend {
    /// Captions and metadata from the player API in one call
    Innertube,
    /// Captions from the player API, metadata from the oEmbed resolver
    Oembed,
}

/// Construct the extractor for the chosen backend
pub fn for_backend(backend: ExtractorBackend) -> Box<dyn TranscriptExtractor> {
    match backend {
        ExtractorBackend::Innertube => Box::new(innertube::InnertubeExtractor::new()),
        ExtractorBackend::Oembed => Box::new(oembed::OEmbedExtractor::new()),
    }
}
