use crate::{
    error::Result, summarize::Summarizer, transcript::TranscriptSource, video::extract_video_id,
};

/// Fetch the transcript for `url`, then turn it into notes.
///
/// Strictly sequential: the summarizer is never called when the fetch
/// fails, and the first error short-circuits the cycle.
pub async fn generate_notes(
    source: &dyn TranscriptSource,
    summarizer: &dyn Summarizer,
    url: &str,
) -> Result<String> {
    let video_id = extract_video_id(url);
    let transcript = source.fetch_transcript(&video_id).await?;
    summarizer.summarize(&transcript.text()).await
}
