//! yt-article - A Rust CLI tool that rewrites YouTube caption tracks into long-form articles
//!
//! This library fetches a video's caption track, sends it to an OpenAI-compatible
//! chat-completion endpoint to be rewritten as an article, and renders the result
//! as styled HTML or PDF in the platform's default viewer.

pub mod article;
pub mod cli;
pub mod config;
pub mod extractors;
pub mod output;
pub mod render;
pub mod utils;

pub use article::ArticlePipeline;
pub use cli::{Cli, RenderFormat};
pub use config::Config;
pub use extractors::{CaptionEntry, ExtractedVideo, TranscriptExtractor, VideoId, VideoMetadata};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to the article pipeline
#[derive(thiserror::Error, Debug)]
pub enum ArticleError {
    #[error("could not find a video id in: {0}")]
    InvalidUrl(String),

    #[error("video not found: {0}")]
    VideoNotFound(String),

    #[error("no captions available for video {0}")]
    NoCaptions(String),

    #[error("rate limited by the video platform, try again later")]
    RateLimited,

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("completion endpoint error: {0}")]
    Upstream(String),

    #[error("transcript is empty, nothing to write an article from")]
    EmptyTranscript,

    #[error("document rendering failed: {0}")]
    Render(String),
}
