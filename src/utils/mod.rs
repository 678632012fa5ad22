use crate::extractors::CaptionEntry;

/// Format one caption entry as a timestamped line, e.g. `[0.50s] hello`
pub fn format_caption_line(entry: &CaptionEntry) -> String {
    format!("[{:.2}s] {}", entry.start, entry.text)
}

/// Format a duration in seconds for log output
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds as u64;
    let minutes = total_seconds / 60;
    let secs = total_seconds % 60;

    if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
