use anyhow::Result;
use clap::Parser;
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_article::article::{self, ArticlePipeline};
use yt_article::cli::{Cli, RenderFormat};
use yt_article::config::Config;
use yt_article::render::{self, DocumentRenderer, HtmlRenderer, PdfRenderer};
use yt_article::{extractors, output, utils, VideoId};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr: in raw mode stdout carries only caption lines.
    let default_filter = if cli.verbose {
        "yt_article=debug"
    } else {
        "yt_article=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(error) = run(cli).await {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let video_id = VideoId::parse(&cli.url)?;
    tracing::debug!("Parsed video id: {}", video_id);

    if cli.raw {
        let extractor = extractors::for_backend(cli.extractor);
        let video = article::fetch_video(extractor.as_ref(), &video_id).await?;

        let span = video
            .captions
            .last()
            .map(|entry| entry.start + entry.duration)
            .unwrap_or(0.0);
        tracing::info!(
            "\"{}\" by {}, captions span {}",
            video.metadata.title,
            video.metadata.channel,
            utils::format_duration(span)
        );

        output::print_captions(&video.captions);
        return Ok(());
    }

    // Configuration problems must surface before any network call is made.
    let config = Config::from_env()?;

    let pipeline = ArticlePipeline::new(config, extractors::for_backend(cli.extractor));
    let (article_text, video) = pipeline.produce_article(&video_id).await?;

    let title = cli.title.unwrap_or_else(|| video.metadata.title.clone());
    let author = video.metadata.channel.clone();

    match cli.format {
        RenderFormat::Text => output::print_article(&article_text),
        format => {
            let renderer: Box<dyn DocumentRenderer> = match format {
                RenderFormat::Pdf => Box::new(PdfRenderer::new(&cli.output_dir)),
                _ => Box::new(HtmlRenderer::new(&cli.output_dir)),
            };

            let path =
                render::render_and_open(renderer.as_ref(), &article_text, &title, &author).await?;
            println!(
                "{} {}",
                style("Article saved to:").green().bold(),
                path.display()
            );
        }
    }

    Ok(())
}
