use crate::extractors::CaptionEntry;
use crate::utils::format_caption_line;

/// Print raw captions to stdout, one timestamped line per entry, in
/// chronological order.
pub fn print_captions(captions: &[CaptionEntry]) {
    for entry in captions {
        println!("{}", format_caption_line(entry));
    }
}

/// Print the generated article markdown to stdout
pub fn print_article(article: &str) {
    println!("{}", article);
}
