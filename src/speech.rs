use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpeechOptions {
    pub language: String,
    pub pitch: f32,
    pub rate: f32,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            language: "en-US".to_owned(),
            pitch: 1.0,
            rate: 0.8,
        }
    }
}

/// Platform text-to-speech. Playback is fire-and-forget: callers never wait
/// for the utterance to finish and only log failures.
#[async_trait]
pub trait SpeechService: Send + Sync + 'static {
    async fn speak(&self, text: &str, options: &SpeechOptions) -> anyhow::Result<()>;
}

pub struct LogSpeechService;

#[async_trait]
impl SpeechService for LogSpeechService {
    async fn speak(&self, text: &str, options: &SpeechOptions) -> anyhow::Result<()> {
        log::info!(
            "Speaking. [language = {}, pitch = {}, rate = {}, text = {:?}]",
            options.language,
            options.pitch,
            options.rate,
            text
        );
        Ok(())
    }
}
