use std::fmt;

/// Short key a video-hosting URL uses to address a specific video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Best-effort id extraction: everything after the first `v=`, cut at the
/// next `&`. A link without the marker yields the whole link, which is not
/// a usable id and fails later at the transcript fetch rather than here.
pub fn extract_video_id(url: &str) -> VideoId {
    let candidate = url.split_once("v=").map_or(url, |(_, rest)| rest);
    let candidate = candidate.split('&').next().unwrap_or(candidate);
    VideoId::new(candidate)
}

/// Strict parse used for the thumbnail preview. `None` suppresses the
/// preview; the main flow still proceeds with the best-effort id.
pub fn parse_video_id(url: &str) -> Option<VideoId> {
    let (_, rest) = url.split_once("v=")?;
    let candidate = rest.split('&').next().unwrap_or(rest);
    let valid = !candidate.is_empty()
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    valid.then(|| VideoId::new(candidate))
}

pub fn thumbnail_url(id: &VideoId) -> String {
    format!("http://img.youtube.com/vi/{}/0.jpg", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_up_to_next_parameter() {
        let id = extract_video_id("https://youtube.com/watch?v=abc123&t=5s");
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn extracts_id_at_end_of_url() {
        let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn uses_first_marker_occurrence() {
        let id = extract_video_id("https://youtube.com/watch?v=first&other=v=second");
        assert_eq!(id.as_str(), "first");
    }

    #[test]
    fn url_without_marker_yields_unusable_id() {
        let url = "https://youtube.com/playlist?list=PL123";
        let id = extract_video_id(url);
        // The whole URL comes back; not a valid key, so the transcript
        // fetch fails downstream instead of panicking here.
        assert_eq!(id.as_str(), "https://youtube.com/playlist?list=PL123");
        assert!(parse_video_id(url).is_none());
    }

    #[test]
    fn strict_parse_rejects_empty_and_junk_ids() {
        assert!(parse_video_id("https://youtube.com/watch?v=&t=5s").is_none());
        assert!(parse_video_id("https://youtube.com/watch?v=a/b").is_none());
        assert_eq!(
            parse_video_id("https://youtube.com/watch?v=abc123&t=5s"),
            Some(VideoId::new("abc123"))
        );
    }

    #[test]
    fn thumbnail_url_matches_expected_pattern() {
        let id = extract_video_id("https://youtube.com/watch?v=abc123&t=5s");
        assert_eq!(thumbnail_url(&id), "http://img.youtube.com/vi/abc123/0.jpg");
    }
}
