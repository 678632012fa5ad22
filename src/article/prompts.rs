/// System message for the completion request
pub const SYSTEM_PROMPT: &str =
    "You are a skilled writer who turns video transcripts into clear, well-formatted articles.";

/// Build the article instruction prompt for one transcript.
///
/// The transcript goes in wrapped in tags so the model can tell instruction
/// from source material. The instruction asks for full coverage of the
/// content, a first-person voice, and a closing TLDR section that bolds
/// keywords instead of using lists.
pub fn article_prompt(transcript: &str, title: &str, channel: &str) -> String {
    format!(
        r#"<Transcript>
{transcript}
</Transcript>
The transcript above belongs to the video "{title}" published by {channel}. It is an automated transcription and may contain small errors; correct them where it makes sense.

Rewrite the transcript as a comprehensive long-form article. Cover all the key points and main ideas of the original content, including the details and examples that support them, while leaving out filler, sponsor reads and repetition. Write it as a personal article in the author's own first-person voice, taking inspiration from how they speak in the transcript; if the material lends itself to it, give the article a narrative arc to keep it captivating (without calling it a story). Use markdown with bold and italics where it helps. Make the article long enough that nothing important from the video is missing.

At the end add a "TLDR" section as its own markdown heading: an objective wrap-up of what the video was about that naturally weaves in the parts which make it interesting. Do not use markdown lists there; **embolden** the keywords instead."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_interpolates_all_parts() {
        let prompt = article_prompt("hello\nworld", "My Video", "My Channel");
        assert!(prompt.contains("hello\nworld"));
        assert!(prompt.contains("\"My Video\""));
        assert!(prompt.contains("My Channel"));
    }

    #[test]
    fn test_prompt_keeps_transcript_inside_tags() {
        let prompt = article_prompt("the content", "t", "c");
        let open = prompt.find("<Transcript>").unwrap();
        let close = prompt.find("</Transcript>").unwrap();
        let body = prompt.find("the content").unwrap();
        assert!(open < body && body < close);
    }

    #[test]
    fn test_prompt_asks_for_tldr() {
        let prompt = article_prompt("text", "t", "c");
        assert!(prompt.contains("TLDR"));
    }
}
