use async_trait::async_trait;

/// Blocking prompts shown over the screen.
#[async_trait]
pub trait ConfirmationDialog: Send + Sync + 'static {
    /// Two-choice prompt. Returns `true` only on explicit confirm.
    async fn confirm(&self, title: &str, message: &str) -> bool;

    /// Single "OK" prompt.
    async fn acknowledge(&self, title: &str, message: &str);
}

/// Answers every prompt with a fixed choice.
pub struct AutoConfirmDialog {
    answer: bool,
}

impl AutoConfirmDialog {
    pub fn new(answer: bool) -> Self {
        Self { answer }
    }
}

#[async_trait]
impl ConfirmationDialog for AutoConfirmDialog {
    async fn confirm(&self, title: &str, message: &str) -> bool {
        log::info!(
            "Prompt {:?}: {:?} -> {}",
            title,
            message,
            if self.answer { "confirm" } else { "cancel" }
        );
        self.answer
    }

    async fn acknowledge(&self, title: &str, message: &str) {
        log::info!("Prompt {:?}: {:?} -> OK", title, message);
    }
}
