use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use super::{CaptionEntry, ExtractedVideo, TranscriptExtractor, VideoId, VideoMetadata};
use crate::ArticleError;
use async_trait::async_trait;

const PLAYER_ENDPOINT: &str = "https://www.youtube.com/youtubei/v1/player";

// The Android client receives caption track URLs that need no signature
// deciphering, unlike the web client.
const CLIENT_NAME: &str = "ANDROID";
const CLIENT_VERSION: &str = "19.09.37";

/// Player API response, reduced to the fields the pipeline needs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: PlayabilityStatus,
    video_details: Option<VideoDetails>,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayabilityStatus {
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoDetails {
    title: String,
    author: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: TracklistRenderer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    #[serde(default)]
    language_code: String,
    /// "asr" marks an auto-generated track
    kind: Option<String>,
}

/// Timed text document in json3 format
#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs", default)]
    start_ms: u64,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: u64,
    #[serde(default)]
    segs: Vec<TimedTextSegment>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSegment {
    #[serde(default)]
    utf8: String,
}

/// Default extractor: captions and metadata from the player API
pub struct InnertubeExtractor {
    client: Client,
}

impl InnertubeExtractor {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetch and parse the player response for a video
    async fn fetch_player_response(&self, id: &VideoId) -> Result<PlayerResponse> {
        tracing::debug!("Fetching player response for video: {}", id);

        let body = json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION,
                    "androidSdkVersion": 30,
                }
            },
            "videoId": id.as_str(),
        });

        let response = self
            .client
            .post(PLAYER_ENDPOINT)
            .json(&body)
            .send()
            .await
            .context("Failed to reach the video platform")?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(ArticleError::RateLimited.into());
        }

        if !response.status().is_success() {
            anyhow::bail!("Player request failed: HTTP {}", response.status());
        }

        response
            .json::<PlayerResponse>()
            .await
            .context("Failed to parse player response")
    }

    /// Download and parse the caption track as json3 timed text
    async fn fetch_caption_entries(&self, track: &CaptionTrack) -> Result<Vec<CaptionEntry>> {
        tracing::debug!(
            "Fetching caption track: lang={} kind={:?}",
            track.language_code,
            track.kind
        );

        let track_url = format!("{}&fmt=json3", track.base_url);
        let response = self
            .client
            .get(&track_url)
            .send()
            .await
            .context("Failed to download caption track")?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(ArticleError::RateLimited.into());
        }

        if !response.status().is_success() {
            anyhow::bail!("Caption track request failed: HTTP {}", response.status());
        }

        let body = response
            .text()
            .await
            .context("Failed to read caption track body")?;

        parse_timed_text(&body)
    }

    pub(super) async fn extract_with_details(
        &self,
        id: &VideoId,
    ) -> Result<(Vec<CaptionEntry>, Option<VideoMetadata>)> {
        let player = self.fetch_player_response(id).await?;

        if player.playability_status.status != "OK" {
            let reason = player
                .playability_status
                .reason
                .unwrap_or(player.playability_status.status);
            return Err(ArticleError::VideoNotFound(format!("{} ({})", id, reason)).into());
        }

        let tracks = player
            .captions
            .map(|captions| captions.player_captions_tracklist_renderer.caption_tracks)
            .unwrap_or_default();

        let track = select_caption_track(&tracks)
            .ok_or_else(|| ArticleError::NoCaptions(id.to_string()))?;

        let entries = self.fetch_caption_entries(track).await?;
        if entries.is_empty() {
            return Err(ArticleError::NoCaptions(id.to_string()).into());
        }

        let metadata = player.video_details.map(|details| VideoMetadata {
            title: details.title,
            channel: details.author,
        });

        Ok((entries, metadata))
    }
}

#[async_trait]
impl TranscriptExtractor for InnertubeExtractor {
    async fn extract(&self, id: &VideoId) -> Result<ExtractedVideo> {
        let (captions, metadata) = self.extract_with_details(id).await?;

        // The Android player response always carries videoDetails for
        // playable videos, but don't bet the run on it.
        let metadata = metadata.unwrap_or_else(|| VideoMetadata {
            title: id.to_string(),
            channel: "Unknown".to_string(),
        });

        tracing::info!(
            "Extracted {} caption entries for \"{}\"",
            captions.len(),
            metadata.title
        );

        Ok(ExtractedVideo { captions, metadata })
    }

    fn backend_name(&self) -> &'static str {
        "innertube"
    }
}

impl Default for InnertubeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the caption track to fetch: a manually authored track wins over an
/// auto-generated ("asr") one, otherwise the first listed track is used.
fn select_caption_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    tracks
        .iter()
        .find(|track| track.kind.as_deref() != Some("asr"))
        .or_else(|| tracks.first())
}

/// Parse a json3 timed text document into ordered caption entries.
///
/// Events without text segments (styling/window events) and entries that are
/// only whitespace are skipped; segments within one event are concatenated.
fn parse_timed_text(body: &str) -> Result<Vec<CaptionEntry>> {
    let timed_text: TimedText =
        serde_json::from_str(body).context("Failed to parse timed text document")?;

    let entries = timed_text
        .events
        .into_iter()
        .filter_map(|event| {
            if event.segs.is_empty() {
                return None;
            }

            let text = event
                .segs
                .iter()
                .map(|seg| seg.utf8.as_str())
                .collect::<String>();
            let text = text.trim();
            if text.is_empty() {
                return None;
            }

            Some(CaptionEntry {
                text: text.to_string(),
                start: event.start_ms as f64 / 1000.0,
                duration: event.duration_ms as f64 / 1000.0,
            })
        })
        .collect();

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(lang: &str, kind: Option<&str>) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://example.com/timedtext?lang={}", lang),
            language_code: lang.to_string(),
            kind: kind.map(|k| k.to_string()),
        }
    }

    #[test]
    fn test_select_prefers_manual_track_over_asr() {
        let tracks = vec![track("en", Some("asr")), track("en", None)];
        let selected = select_caption_track(&tracks).unwrap();
        assert!(selected.kind.is_none());
    }

    #[test]
    fn test_select_falls_back_to_first_track() {
        let tracks = vec![track("en", Some("asr")), track("de", Some("asr"))];
        let selected = select_caption_track(&tracks).unwrap();
        assert_eq!(selected.language_code, "en");
    }

    #[test]
    fn test_select_empty_track_list() {
        assert!(select_caption_track(&[]).is_none());
    }

    #[test]
    fn test_parse_timed_text_events() {
        let body = r#"{
            "events": [
                {"tStartMs": 0, "dDurationMs": 2000},
                {"tStartMs": 500, "dDurationMs": 1500, "segs": [{"utf8": "hel"}, {"utf8": "lo"}]},
                {"tStartMs": 2000, "dDurationMs": 1000, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 2000, "dDurationMs": 1000, "segs": [{"utf8": "world"}]}
            ]
        }"#;

        let entries = parse_timed_text(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "hello");
        assert_eq!(entries[0].start, 0.5);
        assert_eq!(entries[0].duration, 1.5);
        assert_eq!(entries[1].text, "world");
        assert_eq!(entries[1].start, 2.0);
    }

    #[test]
    fn test_parse_timed_text_empty_document() {
        let entries = parse_timed_text("{}").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_player_response_deserializes() {
        let body = r#"{
            "playabilityStatus": {"status": "OK"},
            "videoDetails": {"title": "A Video", "author": "A Channel", "videoId": "dQw4w9WgXcQ"},
            "captions": {
                "playerCaptionsTracklistRenderer": {
                    "captionTracks": [
                        {"baseUrl": "https://example.com/tt", "languageCode": "en", "kind": "asr"}
                    ]
                }
            }
        }"#;

        let player: PlayerResponse = serde_json::from_str(body).unwrap();
        assert_eq!(player.playability_status.status, "OK");
        let details = player.video_details.unwrap();
        assert_eq!(details.title, "A Video");
        assert_eq!(details.author, "A Channel");
        let tracks = player
            .captions
            .unwrap()
            .player_captions_tracklist_renderer
            .caption_tracks;
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].kind.as_deref(), Some("asr"));
    }

    #[test]
    fn test_player_response_without_captions() {
        let body = r#"{"playabilityStatus": {"status": "OK"}}"#;
        let player: PlayerResponse = serde_json::from_str(body).unwrap();
        assert!(player.captions.is_none());
    }
}
