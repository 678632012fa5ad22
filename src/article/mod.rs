use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub mod processor;
pub mod prompts;

pub use processor::ArticleProcessor;

use crate::config::Config;
use crate::extractors::{ExtractedVideo, TranscriptExtractor, VideoId};

/// Fetch captions and metadata for a video, with a progress spinner.
///
/// Shared by the raw path (which needs no completion credentials) and the
/// full pipeline.
pub async fn fetch_video(
    extractor: &dyn TranscriptExtractor,
    id: &VideoId,
) -> Result<ExtractedVideo> {
    let progress = spinner(&format!(
        "Fetching captions via {}...",
        extractor.backend_name()
    ));

    let video = extractor.extract(id).await;
    match &video {
        Ok(extracted) => progress.finish_with_message(format!(
            "Fetched {} caption entries",
            extracted.captions.len()
        )),
        Err(_) => progress.finish_with_message("Caption fetch failed"),
    }

    video
}

/// Sequences extraction and article generation for processed runs
pub struct ArticlePipeline {
    processor: ArticleProcessor,
    extractor: Box<dyn TranscriptExtractor>,
}

impl ArticlePipeline {
    pub fn new(config: Config, extractor: Box<dyn TranscriptExtractor>) -> Self {
        Self {
            processor: ArticleProcessor::new(config.llm),
            extractor,
        }
    }

    /// Run extraction and rewrite the transcript into an article.
    ///
    /// Returns the article markdown together with the extracted video so the
    /// caller can reuse title and channel for rendering.
    pub async fn produce_article(&self, id: &VideoId) -> Result<(String, ExtractedVideo)> {
        let video = fetch_video(self.extractor.as_ref(), id).await?;

        let progress = spinner("Writing article...");
        let article = self.processor.write_article(&video).await;
        match &article {
            Ok(_) => progress.finish_with_message("Article ready"),
            Err(_) => progress.finish_with_message("Article generation failed"),
        }

        Ok((article?, video))
    }
}

fn spinner(message: &str) -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    progress.set_message(message.to_string());
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;
    use crate::extractors::{CaptionEntry, MockTranscriptExtractor, VideoMetadata};
    use crate::ArticleError;

    fn test_config() -> Config {
        Config {
            llm: LlmConfig {
                api_key: "sk-test".to_string(),
                api_base: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
                temperature: 0.6,
            },
        }
    }

    fn extracted(captions: Vec<CaptionEntry>) -> ExtractedVideo {
        ExtractedVideo {
            captions,
            metadata: VideoMetadata {
                title: "A Video".to_string(),
                channel: "A Channel".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_fetch_video_returns_extractor_output() {
        let mut mock = MockTranscriptExtractor::new();
        mock.expect_backend_name().return_const("mock");
        mock.expect_extract().returning(|_| {
            Ok(extracted(vec![CaptionEntry {
                text: "hello".to_string(),
                start: 0.5,
                duration: 1.0,
            }]))
        });

        let id = VideoId::parse("https://youtu.be/dQw4w9WgXcQ").unwrap();
        let video = fetch_video(&mock, &id).await.unwrap();
        assert_eq!(video.captions.len(), 1);
        assert_eq!(video.metadata.title, "A Video");
    }

    #[tokio::test]
    async fn test_pipeline_propagates_extraction_failure() {
        let mut mock = MockTranscriptExtractor::new();
        mock.expect_backend_name().return_const("mock");
        mock.expect_extract()
            .returning(|id| Err(ArticleError::NoCaptions(id.to_string()).into()));

        let pipeline = ArticlePipeline::new(test_config(), Box::new(mock));
        let id = VideoId::parse("https://youtu.be/dQw4w9WgXcQ").unwrap();
        let err = pipeline.produce_article(&id).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ArticleError>(),
            Some(ArticleError::NoCaptions(_))
        ));
    }

    #[tokio::test]
    async fn test_pipeline_rejects_empty_transcript_without_completion_call() {
        let mut mock = MockTranscriptExtractor::new();
        mock.expect_backend_name().return_const("mock");
        mock.expect_extract().returning(|_| Ok(extracted(vec![])));

        let pipeline = ArticlePipeline::new(test_config(), Box::new(mock));
        let id = VideoId::parse("https://youtu.be/dQw4w9WgXcQ").unwrap();
        let err = pipeline.produce_article(&id).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ArticleError>(),
            Some(ArticleError::EmptyTranscript)
        ));
    }
}
