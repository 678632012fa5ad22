use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

pub mod html;
pub mod pdf;

pub use html::HtmlRenderer;
pub use pdf::PdfRenderer;

use crate::ArticleError;

/// Trait for rendering an article to a document on disk
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Render the markdown article and return the written file path
    async fn render(&self, article: &str, title: &str, author: &str) -> Result<PathBuf>;

    /// Get the name of this document format
    fn format_name(&self) -> &'static str;
}

/// Render the article, then open the document best-effort.
///
/// The written path is the authoritative result; a failed viewer launch is
/// logged and swallowed.
pub async fn render_and_open(
    renderer: &dyn DocumentRenderer,
    article: &str,
    title: &str,
    author: &str,
) -> Result<PathBuf> {
    tracing::debug!("Rendering {} document for \"{}\"", renderer.format_name(), title);
    let path = renderer.render(article, title, author).await?;

    if path.exists() {
        open_document(&path).await;
    } else {
        tracing::warn!("Rendered file missing at {}, skipping viewer", path.display());
    }

    Ok(path)
}

/// Open a document with the platform's default viewer, fire-and-forget.
pub async fn open_document(path: &Path) {
    let result = match std::env::consts::OS {
        "macos" => Command::new("open").arg(path).spawn(),
        "linux" => Command::new("xdg-open").arg(path).spawn(),
        "windows" => Command::new("cmd").args(["/C", "start", ""]).arg(path).spawn(),
        other => {
            tracing::warn!("No viewer strategy for platform '{}', not opening", other);
            return;
        }
    };

    if let Err(error) = result {
        tracing::warn!("Could not open {}: {}", path.display(), error);
    }
}

/// Derive a filesystem-safe base name from a title.
///
/// Keeps alphanumeric characters, spaces, hyphens and underscores, drops
/// everything else, and collapses whitespace runs into single underscores.
/// Idempotent: sanitizing a sanitized name is a no-op.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .collect();

    let name = kept.split_whitespace().collect::<Vec<_>>().join("_");

    if name.is_empty() {
        "article".to_string()
    } else {
        name
    }
}

/// Build the output path for a rendered document, creating the directory
/// if it does not exist yet.
pub fn output_file(output_dir: &Path, title: &str, extension: &str) -> Result<PathBuf> {
    fs_err::create_dir_all(output_dir)?;
    Ok(output_dir.join(format!("{}.{}", sanitize_title(title), extension)))
}

/// Convert markdown to an HTML fragment using the GFM extension set
/// (headings, emphasis, blockquotes, code, links, images, tables).
pub fn markdown_to_html(article: &str) -> Result<String> {
    markdown::to_html_with_options(article, &markdown::Options::gfm())
        .map_err(|message| ArticleError::Render(message.to_string()).into())
}

/// Escape text for insertion into HTML element content or attributes
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
