use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::{html_escape, markdown_to_html, output_file, DocumentRenderer};

/// Page template. Tokens are substituted at render time; the inline script
/// restores the persisted theme choice before first paint and falls back to
/// the device preference.
const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}</title>
    <style>
        :root {
            --bg-color: #ffffff;
            --text-color: #292929;
            --meta-color: #757575;
            --border-color: #eeeeee;
            --quote-color: #666666;
            --code-bg: #f6f6f6;
            --link-color: #1a8917;
        }

        [data-theme="dark"] {
            --bg-color: #1a1a1a;
            --text-color: #e0e0e0;
            --meta-color: #a0a0a0;
            --border-color: #333333;
            --quote-color: #999999;
            --code-bg: #2d2d2d;
            --link-color: #4caf50;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", sans-serif;
            line-height: 1.6;
            color: var(--text-color);
            background-color: var(--bg-color);
            max-width: 700px;
            margin: 0 auto;
            padding: 20px;
            transition: background-color 0.3s ease, color 0.3s ease;
        }
        h1, h2, h3, h4, h5, h6 {
            font-weight: 600;
            margin-top: 2em;
            margin-bottom: 0.5em;
        }
        h1 {
            font-size: 2.5em;
            margin-top: 1em;
        }
        p {
            font-size: 18px;
            margin-bottom: 1.5em;
        }
        .meta {
            color: var(--meta-color);
            font-size: 0.9em;
            border-bottom: 1px solid var(--border-color);
            padding-bottom: 1em;
            margin-bottom: 2em;
            display: flex;
            justify-content: space-between;
        }
        blockquote {
            border-left: 3px solid var(--text-color);
            margin-left: 0;
            padding-left: 20px;
            font-style: italic;
            color: var(--quote-color);
        }
        code {
            background-color: var(--code-bg);
            padding: 2px 4px;
            border-radius: 3px;
            font-family: Menlo, Monaco, "Courier New", monospace;
        }
        pre {
            background-color: var(--code-bg);
            padding: 15px;
            border-radius: 5px;
            overflow-x: auto;
        }
        img {
            max-width: 100%;
            height: auto;
            margin: 2em 0;
        }
        a {
            color: var(--link-color);
            text-decoration: none;
        }
        a:hover {
            text-decoration: underline;
        }
        .theme-toggle {
            position: fixed;
            top: 20px;
            right: 20px;
            background: var(--bg-color);
            border: 2px solid var(--text-color);
            color: var(--text-color);
            padding: 8px 16px;
            border-radius: 20px;
            cursor: pointer;
            font-size: 14px;
        }
        .theme-toggle:hover {
            opacity: 0.8;
        }
    </style>
    <script>
        function applyTheme(theme) {
            document.documentElement.setAttribute('data-theme', theme);
            const button = document.getElementById('theme-toggle');
            if (button) {
                button.textContent = theme === 'dark' ? '☀️ Light Mode' : '🌙 Dark Mode';
            }
        }

        function toggleTheme() {
            const current = document.documentElement.getAttribute('data-theme');
            const next = current === 'dark' ? 'light' : 'dark';
            localStorage.setItem('theme', next);
            applyTheme(next);
        }

        document.addEventListener('DOMContentLoaded', () => {
            const saved = localStorage.getItem('theme');
            const prefersDark = window.matchMedia('(prefers-color-scheme: dark)').matches;
            applyTheme(saved || (prefersDark ? 'dark' : 'light'));
        });
    </script>
</head>
<body>
    <button onclick="toggleTheme()" id="theme-toggle" class="theme-toggle">&#127769; Dark Mode</button>
    <article>
        <h1>{{title}}</h1>
        <div class="meta">
            <span class="date">{{date}}</span>
            <span class="author">By {{author}}</span>
        </div>
        {{content}}
    </article>
</body>
</html>
"#;

/// Renders articles as styled HTML documents
pub struct HtmlRenderer {
    output_dir: PathBuf,
}

impl HtmlRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Build the full HTML page for an article
    fn build_page(&self, article: &str, title: &str, author: &str) -> Result<String> {
        let content = markdown_to_html(article)?;
        let date = chrono::Local::now().format("%B %d, %Y").to_string();

        Ok(PAGE_TEMPLATE
            .replace("{{title}}", &html_escape(title))
            .replace("{{date}}", &date)
            .replace("{{author}}", &html_escape(author))
            .replace("{{content}}", &content))
    }
}

#[async_trait]
impl DocumentRenderer for HtmlRenderer {
    async fn render(&self, article: &str, title: &str, author: &str) -> Result<PathBuf> {
        let page = self.build_page(article, title, author)?;
        let path = output_file(&self.output_dir, title, "html")?;

        fs_err::write(&path, page)
            .with_context(|| format!("Failed to write HTML to {}", path.display()))?;

        tracing::info!("Wrote HTML article to {}", path.display());
        Ok(path)
    }

    fn format_name(&self) -> &'static str {
        "html"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "## A Heading\n\nSome **bold** text.\n\n> A quote to remember.";

    #[test]
    fn test_page_contains_title_author_and_rendered_markdown() {
        let renderer = HtmlRenderer::new("output");
        let page = renderer
            .build_page(FIXTURE, "My Test Article", "The Author")
            .unwrap();

        assert!(page.contains("My Test Article"));
        assert!(page.contains("By The Author"));
        assert!(page.contains("<h2>A Heading</h2>"));
        assert!(page.contains("<strong>bold</strong>"));
        assert!(page.contains("<blockquote>"));
    }

    #[test]
    fn test_page_escapes_title_markup() {
        let renderer = HtmlRenderer::new("output");
        let page = renderer.build_page("body", "Click & <win>", "author").unwrap();
        assert!(page.contains("Click &amp; &lt;win&gt;"));
        assert!(!page.contains("<win>"));
    }

    #[test]
    fn test_page_keeps_theme_toggle_wiring() {
        let renderer = HtmlRenderer::new("output");
        let page = renderer.build_page("body", "t", "a").unwrap();
        assert!(page.contains("localStorage.getItem('theme')"));
        assert!(page.contains("prefers-color-scheme: dark"));
        assert!(page.contains("data-theme"));
    }

    #[tokio::test]
    async fn test_render_writes_file_with_sanitized_name() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = HtmlRenderer::new(dir.path());
        let path = renderer
            .render(FIXTURE, "My Video: Part 1!", "The Author")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("My_Video_Part_1.html"));
        let written = fs_err::read_to_string(&path).unwrap();
        assert!(written.contains("<strong>bold</strong>"));
    }
}
