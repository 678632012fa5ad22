use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use super::{html_escape, markdown_to_html, output_file, DocumentRenderer};
use crate::ArticleError;

/// Executable names probed for a usable browser, in order of preference
const BROWSER_EXECUTABLES: &[&str] = &["google-chrome", "chromium", "chromium-browser", "chrome"];

/// Renders articles as PDF by printing through a headless browser
pub struct PdfRenderer {
    output_dir: PathBuf,
}

impl PdfRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Find a Chrome/Chromium binary on PATH
    fn discover_browser() -> Result<PathBuf> {
        for executable in BROWSER_EXECUTABLES {
            if let Ok(path) = which::which(executable) {
                tracing::debug!("Using browser for PDF printing: {}", path.display());
                return Ok(path);
            }
        }

        Err(ArticleError::Render(
            "no Chrome or Chromium executable found on PATH (required for PDF output)".to_string(),
        )
        .into())
    }

    /// Print an HTML file to PDF with the discovered browser
    async fn print_to_pdf(browser: &Path, input: &Path, output: &Path) -> Result<()> {
        let run = Command::new(browser)
            .arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", output.display()))
            .arg(input)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context("Failed to launch the browser for PDF printing")?;

        if !run.status.success() {
            let stderr = String::from_utf8_lossy(&run.stderr);
            return Err(ArticleError::Render(format!(
                "browser exited with {}: {}",
                run.status,
                stderr.trim()
            ))
            .into());
        }

        Ok(())
    }
}

#[async_trait]
impl DocumentRenderer for PdfRenderer {
    async fn render(&self, article: &str, title: &str, author: &str) -> Result<PathBuf> {
        let browser = Self::discover_browser()?;
        let page = build_print_page(article, title, author)?;
        let path = output_file(&self.output_dir, title, "pdf")?;

        // The intermediate page must outlive the browser run.
        let mut intermediate = tempfile::Builder::new()
            .prefix("yt-article-")
            .suffix(".html")
            .tempfile()
            .context("Failed to create intermediate HTML file")?;
        intermediate
            .write_all(page.as_bytes())
            .context("Failed to write intermediate HTML")?;
        intermediate.flush()?;

        Self::print_to_pdf(&browser, intermediate.path(), &path).await?;

        tracing::info!("Wrote PDF article to {}", path.display());
        Ok(path)
    }

    fn format_name(&self) -> &'static str {
        "pdf"
    }
}

/// Minimal standalone page for printing. The PDF variant skips the themed
/// template; print styling stays close to the browser defaults.
fn build_print_page(article: &str, title: &str, author: &str) -> Result<String> {
    let content = markdown_to_html(article)?;

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{title}</title>\n</head>\n\
<body>\n<h1>{title}</h1>\n<p><em>By {author}</em></p>\n{content}\n</body>\n</html>\n",
        title = html_escape(title),
        author = html_escape(author),
        content = content,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_page_contains_title_author_and_content() {
        let page = build_print_page("**bold** body", "A Title", "An Author").unwrap();
        assert!(page.contains("<h1>A Title</h1>"));
        assert!(page.contains("By An Author"));
        assert!(page.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_print_page_escapes_title() {
        let page = build_print_page("body", "Q&A", "a").unwrap();
        assert!(page.contains("Q&amp;A"));
    }
}
