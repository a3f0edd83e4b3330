use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    error::{NotesError, Result},
    types::{Fragment, Transcript},
    video::VideoId,
};

/// YouTube's caption endpoint. Answers `fmt=json3` with a list of timed
/// events; answers 200 with an empty body when the id is unknown or the
/// video has captions disabled.
pub const TIMEDTEXT_URL: &str = "https://www.youtube.com/api/timedtext";

/// Source of spoken-text transcripts for a video id.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch_transcript(&self, video_id: &VideoId) -> Result<Transcript>;
}

/// Caption client for the timed-text endpoint.
pub struct TimedTextClient {
    http: reqwest::Client,
    base_url: String,
    lang: String,
}

impl TimedTextClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: TIMEDTEXT_URL.to_string(),
            lang: "en".to_string(),
        }
    }

    /// Caption language to request (default `en`).
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Point the client at a different endpoint (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for TimedTextClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct TimedTextResponse {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs", default)]
    start_ms: u64,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: u64,
    #[serde(default)]
    segs: Vec<TimedTextSeg>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

fn fetch_error(video_id: &VideoId, reason: impl Into<String>) -> NotesError {
    NotesError::TranscriptFailed {
        video_id: video_id.to_string(),
        reason: reason.into(),
    }
}

#[async_trait]
impl TranscriptSource for TimedTextClient {
    async fn fetch_transcript(&self, video_id: &VideoId) -> Result<Transcript> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("v", video_id.as_str()),
                ("lang", self.lang.as_str()),
                ("fmt", "json3"),
            ])
            .send()
            .await
            .map_err(|e| fetch_error(video_id, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(video_id, format!("endpoint answered {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| fetch_error(video_id, e.to_string()))?;
        if body.trim().is_empty() {
            return Err(fetch_error(
                video_id,
                "no caption track (unknown video id or captions disabled)",
            ));
        }

        let parsed: TimedTextResponse = serde_json::from_str(&body)
            .map_err(|e| fetch_error(video_id, format!("unexpected caption payload: {e}")))?;

        let fragments: Vec<Fragment> = parsed
            .events
            .into_iter()
            .filter_map(|event| {
                let text: String = event.segs.iter().map(|seg| seg.utf8.as_str()).collect();
                let text = text.trim();
                if text.is_empty() {
                    // Window-styling events carry no segs; newline-only
                    // segs carry no speech.
                    return None;
                }
                Some(Fragment {
                    text: text.to_string(),
                    start: event.start_ms as f64 / 1000.0,
                    duration: event.duration_ms as f64 / 1000.0,
                })
            })
            .collect();

        if fragments.is_empty() {
            return Err(fetch_error(video_id, "caption track contains no text"));
        }

        Ok(Transcript::new(fragments))
    }
}
