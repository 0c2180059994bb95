use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Instant;

use crate::{
    dialog::ConfirmationDialog,
    picker::{WheelId, WheelSurfaces},
    scroll::ScrollSurface,
    speech::{SpeechOptions, SpeechService},
};

#[derive(Default, Clone)]
pub struct RecordingSpeech {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl RecordingSpeech {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechService for RecordingSpeech {
    async fn speak(&self, text: &str, _options: &SpeechOptions) -> anyhow::Result<()> {
        self.spoken.lock().unwrap().push(text.to_owned());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    Confirm { title: String, message: String },
    Acknowledge { title: String, message: String },
}

#[derive(Clone)]
pub struct ScriptedDialog {
    answer: bool,
    prompts: Arc<Mutex<Vec<Prompt>>>,
}

impl ScriptedDialog {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Default::default(),
        }
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfirmationDialog for ScriptedDialog {
    async fn confirm(&self, title: &str, message: &str) -> bool {
        self.prompts.lock().unwrap().push(Prompt::Confirm {
            title: title.to_owned(),
            message: message.to_owned(),
        });
        self.answer
    }

    async fn acknowledge(&self, title: &str, message: &str) {
        self.prompts.lock().unwrap().push(Prompt::Acknowledge {
            title: title.to_owned(),
            message: message.to_owned(),
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snap {
    pub wheel: WheelId,
    pub offset: f64,
    pub animated: bool,
    pub at: Instant,
}

struct RecordingSurface {
    wheel: WheelId,
    snaps: Arc<Mutex<Vec<Snap>>>,
}

impl ScrollSurface for RecordingSurface {
    fn scroll_to(&self, offset: f64, animated: bool) {
        self.snaps.lock().unwrap().push(Snap {
            wheel: self.wheel,
            offset,
            animated,
            at: Instant::now(),
        });
    }
}

/// Shared log of every `scroll_to` call made on any of the three wheels.
#[derive(Default, Clone)]
pub struct SnapLog {
    snaps: Arc<Mutex<Vec<Snap>>>,
}

impl SnapLog {
    pub fn surfaces(&self) -> WheelSurfaces {
        let surface = |wheel| {
            Arc::new(RecordingSurface {
                wheel,
                snaps: Arc::clone(&self.snaps),
            })
        };

        WheelSurfaces {
            hour: surface(WheelId::Hour),
            minute: surface(WheelId::Minute),
            period: surface(WheelId::Period),
        }
    }

    pub fn snaps(&self) -> Vec<Snap> {
        self.snaps.lock().unwrap().clone()
    }

    pub fn animated(&self) -> Vec<Snap> {
        self.snaps()
            .into_iter()
            .filter(|snap| snap.animated)
            .collect()
    }

    pub fn clear(&self) {
        self.snaps.lock().unwrap().clear();
    }
}
