use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::extractors::ExtractorBackend;

#[derive(Parser)]
#[command(
    name = "yt-article",
    about = "Turn a YouTube video's captions into a long-form article rendered as HTML or PDF",
    version,
    long_about = "Fetches the caption track for a YouTube video, rewrites it into a long-form \
article through an OpenAI-compatible completion endpoint, and renders the result as styled HTML \
or PDF opened in your default viewer. Pass --raw to dump the timestamped captions instead."
)]
pub struct Cli {
    /// YouTube video URL (watch, youtu.be, embed and shorts forms are accepted)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Print the raw captions with timestamps and skip article generation
    #[arg(long)]
    pub raw: bool,

    /// How to render the generated article
    #[arg(short, long, value_enum, default_value = "html")]
    pub format: RenderFormat,

    /// Directory where rendered documents are written
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Override the article title (defaults to the video title)
    #[arg(short, long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Transcript extraction backend
    #[arg(long, value_enum, default_value = "innertube")]
    pub extractor: ExtractorBackend,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderFormat {
    /// Print the article markdown to stdout
    Text,
    /// Styled HTML document with a light/dark theme toggle
    Html,
    /// PDF printed through a headless browser
    Pdf,
}

impl std::fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderFormat::Text => write!(f, "text"),
            RenderFormat::Html => write!(f, "html"),
            RenderFormat::Pdf => write!(f, "pdf"),
        }
    }
}
