use std::sync::Arc;

use iced::widget::{button, checkbox, column, image, scrollable, text, text_input};
use iced::{Element, Task};

use konspekt_core::{
    GeminiClient, GeminiConfig, ModelInfo, NotesError, Summarizer, TimedTextClient, Transcript,
    TranscriptSource, extract_video_id, parse_video_id, thumbnail_url,
};

fn main() -> iced::Result {
    dotenvy::dotenv().ok();
    iced::application(App::new, App::update, App::view)
        .title("Konspekt")
        .run()
}

/// One user-triggered request cycle, from idle input to rendered notes.
/// Every trigger restarts the cycle from whatever link is entered.
#[derive(Debug, Clone, Default, PartialEq)]
enum Phase {
    #[default]
    Idle,
    LinkEntered,
    Fetching,
    Summarizing,
    Error(String),
    Done(String),
}

struct App {
    url: String,
    phase: Phase,
    thumbnail: Option<image::Handle>,
    link_warning: bool,
    show_models: bool,
    models: Option<Result<Vec<ModelInfo>, String>>,
    source: Arc<TimedTextClient>,
    gemini: Option<Arc<GeminiClient>>,
}

#[derive(Debug, Clone)]
enum Message {
    UrlChanged(String),
    ThumbnailLoaded(Option<image::Handle>),
    GetNotes,
    TranscriptFetched(Result<Transcript, String>),
    NotesReady(Result<String, String>),
    ToggleModels(bool),
    ModelsListed(Result<Vec<ModelInfo>, String>),
}

impl App {
    fn new() -> (Self, Task<Message>) {
        // A missing key must not kill the UI; summarization reports the
        // authentication error instead.
        let gemini = GeminiConfig::from_env()
            .ok()
            .map(|config| Arc::new(GeminiClient::new(config)));
        (
            Self {
                url: String::new(),
                phase: Phase::Idle,
                thumbnail: None,
                link_warning: false,
                show_models: false,
                models: None,
                source: Arc::new(TimedTextClient::new()),
                gemini,
            },
            Task::none(),
        )
    }

    fn busy(&self) -> bool {
        matches!(self.phase, Phase::Fetching | Phase::Summarizing)
    }

    fn missing_key_error() -> String {
        NotesError::MissingApiKey {
            env_var: GeminiConfig::API_KEY_ENV.to_string(),
        }
        .to_string()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::UrlChanged(url) => {
                self.url = url;
                if !self.busy() {
                    self.phase = if self.url.is_empty() {
                        Phase::Idle
                    } else {
                        Phase::LinkEntered
                    };
                }
                match parse_video_id(&self.url) {
                    Some(id) => {
                        self.link_warning = false;
                        Task::perform(load_thumbnail(thumbnail_url(&id)), Message::ThumbnailLoaded)
                    }
                    None => {
                        self.thumbnail = None;
                        self.link_warning = !self.url.is_empty();
                        Task::none()
                    }
                }
            }
            Message::ThumbnailLoaded(handle) => {
                self.thumbnail = handle;
                Task::none()
            }
            Message::GetNotes => {
                if self.busy() || self.url.is_empty() {
                    return Task::none();
                }
                self.phase = Phase::Fetching;
                let source = Arc::clone(&self.source);
                let video_id = extract_video_id(&self.url);
                Task::perform(
                    async move {
                        source
                            .fetch_transcript(&video_id)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    Message::TranscriptFetched,
                )
            }
            Message::TranscriptFetched(result) => match result {
                Err(reason) => {
                    self.phase = Phase::Error(reason);
                    Task::none()
                }
                Ok(transcript) => {
                    let Some(gemini) = self.gemini.clone() else {
                        self.phase = Phase::Error(Self::missing_key_error());
                        return Task::none();
                    };
                    self.phase = Phase::Summarizing;
                    Task::perform(
                        async move {
                            gemini
                                .summarize(&transcript.text())
                                .await
                                .map_err(|e| e.to_string())
                        },
                        Message::NotesReady,
                    )
                }
            },
            Message::NotesReady(result) => {
                self.phase = match result {
                    Ok(notes) => Phase::Done(notes),
                    Err(reason) => Phase::Error(reason),
                };
                Task::none()
            }
            Message::ToggleModels(show) => {
                self.show_models = show;
                if !show || self.models.is_some() {
                    return Task::none();
                }
                let Some(gemini) = self.gemini.clone() else {
                    self.models = Some(Err(Self::missing_key_error()));
                    return Task::none();
                };
                Task::perform(
                    async move { gemini.list_models().await.map_err(|e| e.to_string()) },
                    Message::ModelsListed,
                )
            }
            Message::ModelsListed(result) => {
                self.models = Some(result);
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let mut content = column![
            text("YouTube Transcript to Notes").size(24),
            text_input("Enter YouTube Video Link:", &self.url).on_input(Message::UrlChanged),
        ]
        .padding(20)
        .spacing(10);

        if let Some(handle) = &self.thumbnail {
            content = content.push(image(handle.clone()).width(480));
        }
        if self.link_warning {
            content = content.push(text("Invalid YouTube link format.").style(text::danger));
        }

        content = content.push(
            button("Get Detailed Notes")
                .on_press_maybe((!self.busy()).then_some(Message::GetNotes)),
        );

        match &self.phase {
            Phase::Fetching => content = content.push(text("Fetching transcript...")),
            Phase::Summarizing => content = content.push(text("Generating summary...")),
            Phase::Error(reason) => {
                content = content.push(text(reason.clone()).style(text::danger));
            }
            Phase::Done(notes) => {
                content = content.push(text("Detailed Notes:").size(20));
                content = content.push(scrollable(text(notes.clone())));
            }
            Phase::Idle | Phase::LinkEntered => {}
        }

        content = content.push(
            checkbox(self.show_models)
                .label("Show available models (debug)")
                .on_toggle(Message::ToggleModels),
        );
        if self.show_models {
            match &self.models {
                Some(Ok(models)) => {
                    for model in models {
                        content = content.push(
                            text(format!(
                                "{} — supports: {}",
                                model.name,
                                model.supported_generation_methods.join(", ")
                            ))
                            .size(14),
                        );
                    }
                }
                Some(Err(reason)) => {
                    content = content
                        .push(text(format!("Error listing models: {reason}")).style(text::danger));
                }
                None => content = content.push(text("Loading models...").size(14)),
            }
        }

        content.into()
    }
}

async fn load_thumbnail(url: String) -> Option<image::Handle> {
    let response = reqwest::get(&url).await.ok()?.error_for_status().ok()?;
    let bytes = response.bytes().await.ok()?;
    Some(image::Handle::from_bytes(bytes.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use konspekt_core::Fragment;

    fn app() -> App {
        App {
            url: String::new(),
            phase: Phase::Idle,
            thumbnail: None,
            link_warning: false,
            show_models: false,
            models: None,
            source: Arc::new(TimedTextClient::new()),
            gemini: None,
        }
    }

    fn transcript() -> Transcript {
        Transcript::new(vec![Fragment {
            text: "Hello world".to_string(),
            start: 0.0,
            duration: 1.0,
        }])
    }

    #[test]
    fn typing_enters_link_entered() {
        let mut app = app();
        let _ = app.update(Message::UrlChanged(
            "https://youtube.com/watch?v=abc123".to_string(),
        ));
        assert_eq!(app.phase, Phase::LinkEntered);
        assert!(!app.link_warning);
    }

    #[test]
    fn unparseable_link_warns_without_blocking() {
        let mut app = app();
        let _ = app.update(Message::UrlChanged("https://youtube.com/watch".to_string()));
        assert_eq!(app.phase, Phase::LinkEntered);
        assert!(app.link_warning);
        assert!(app.thumbnail.is_none());
    }

    #[test]
    fn clearing_the_input_returns_to_idle() {
        let mut app = app();
        let _ = app.update(Message::UrlChanged("x".to_string()));
        let _ = app.update(Message::UrlChanged(String::new()));
        assert_eq!(app.phase, Phase::Idle);
        assert!(!app.link_warning);
    }

    #[test]
    fn trigger_starts_fetching() {
        let mut app = app();
        let _ = app.update(Message::UrlChanged(
            "https://youtube.com/watch?v=abc123".to_string(),
        ));
        let _ = app.update(Message::GetNotes);
        assert_eq!(app.phase, Phase::Fetching);
        assert!(app.busy());
    }

    #[test]
    fn transcript_error_shows_message_verbatim() {
        let mut app = app();
        app.phase = Phase::Fetching;
        let _ = app.update(Message::TranscriptFetched(Err(
            "no caption track".to_string()
        )));
        assert_eq!(app.phase, Phase::Error("no caption track".to_string()));
    }

    #[test]
    fn missing_key_fails_summarization_with_auth_error() {
        let mut app = app();
        app.phase = Phase::Fetching;
        let _ = app.update(Message::TranscriptFetched(Ok(transcript())));
        match &app.phase {
            Phase::Error(reason) => assert!(reason.contains("GOOGLE_API_KEY")),
            phase => panic!("expected error phase, got {phase:?}"),
        }
    }

    #[test]
    fn notes_render_verbatim() {
        let mut app = app();
        app.phase = Phase::Summarizing;
        let _ = app.update(Message::NotesReady(Ok("  the notes  ".to_string())));
        assert_eq!(app.phase, Phase::Done("  the notes  ".to_string()));
    }

    #[test]
    fn busy_phases_ignore_new_triggers() {
        let mut app = app();
        app.url = "https://youtube.com/watch?v=abc123".to_string();
        app.phase = Phase::Summarizing;
        let _ = app.update(Message::GetNotes);
        assert_eq!(app.phase, Phase::Summarizing);
    }

    #[test]
    fn missing_key_surfaces_in_models_panel_only() {
        let mut app = app();
        let _ = app.update(Message::ToggleModels(true));
        assert!(app.show_models);
        assert!(matches!(&app.models, Some(Err(reason)) if reason.contains("GOOGLE_API_KEY")));
        assert_eq!(app.phase, Phase::Idle);
    }
}
