use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use super::{innertube::InnertubeExtractor, ExtractedVideo, TranscriptExtractor, VideoId, VideoMetadata};
use crate::ArticleError;
use async_trait::async_trait;

const OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: String,
    author_name: String,
}

/// Extractor that resolves title and channel through the oEmbed endpoint.
///
/// Captions still come from the player API; only the metadata source is
/// swapped. Useful when the player response carries thin or localized
/// metadata, and a worked example of substituting one side of the backend
/// without touching callers.
pub struct OEmbedExtractor {
    client: Client,
    captions: InnertubeExtractor,
}

impl OEmbedExtractor {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            captions: InnertubeExtractor::new(),
        }
    }

    /// Resolve title and channel for a video
    async fn fetch_metadata(&self, id: &VideoId) -> Result<VideoMetadata> {
        let mut endpoint = Url::parse(OEMBED_ENDPOINT).context("Invalid oEmbed endpoint")?;
        endpoint
            .query_pairs_mut()
            .append_pair("url", &id.watch_url())
            .append_pair("format", "json");

        tracing::debug!("Resolving metadata via oEmbed for video: {}", id);

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .context("Failed to reach the oEmbed endpoint")?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(ArticleError::VideoNotFound(id.to_string()).into())
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(ArticleError::RateLimited.into()),
            status if !status.is_success() => {
                anyhow::bail!("oEmbed request failed: HTTP {}", status);
            }
            _ => {}
        }

        let oembed: OEmbedResponse = response
            .json()
            .await
            .context("Failed to parse oEmbed response")?;

        Ok(VideoMetadata {
            title: oembed.title,
            channel: oembed.author_name,
        })
    }
}

#[async_trait]
impl TranscriptExtractor for OEmbedExtractor {
    async fn extract(&self, id: &VideoId) -> Result<ExtractedVideo> {
        let metadata = self.fetch_metadata(id).await?;
        let (captions, _) = self.captions.extract_with_details(id).await?;

        tracing::info!(
            "Extracted {} caption entries for \"{}\"",
            captions.len(),
            metadata.title
        );

        Ok(ExtractedVideo { captions, metadata })
    }

    fn backend_name(&self) -> &'static str {
        "oembed"
    }
}

impl Default for OEmbedExtractor {
    fn default() -> Self {
        Self::new()
    }
}
