use serde::{Deserialize, Serialize};

/// One timed caption unit. Only `text` feeds the notes; timing is kept as
/// the caption endpoint returned it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    pub fragments: Vec<Fragment>,
}

impl Transcript {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }

    /// Spoken text of the whole video: fragment texts joined with single
    /// spaces, in their original order.
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|fragment| fragment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str, start: f64) -> Fragment {
        Fragment {
            text: text.to_string(),
            start,
            duration: 1.0,
        }
    }

    #[test]
    fn text_joins_fragments_in_order() {
        let transcript = Transcript::new(vec![
            fragment("Hello", 0.0),
            fragment("world", 1.0),
            fragment("again", 2.0),
        ]);
        assert_eq!(transcript.text(), "Hello world again");
    }

    #[test]
    fn text_is_idempotent() {
        let transcript = Transcript::new(vec![fragment("Hello", 0.0), fragment("world", 1.0)]);
        assert_eq!(transcript.text(), transcript.text());
    }

    #[test]
    fn empty_transcript_yields_empty_text() {
        let transcript = Transcript::default();
        assert!(transcript.is_empty());
        assert_eq!(transcript.text(), "");
    }
}
