use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

struct ArmedTimer {
    task_handle: JoinHandle<()>,
    cancellation_token: CancellationToken,
}

impl ArmedTimer {
    fn cancel(self) {
        self.cancellation_token.cancel();
        self.task_handle.abort();
    }
}

/// A single outstanding "fire after N ms of silence" timer.
///
/// Arming replaces (and cancels) the previously armed timer. When the delay
/// elapses the message is posted to the given channel. Dropping the timer
/// cancels it.
#[derive(Default)]
pub struct DebounceTimer {
    armed: Option<ArmedTimer>,
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm<T>(&mut self, delay: Duration, sender: mpsc::Sender<T>, message: T)
    where
        T: Send + 'static,
    {
        self.cancel();

        let cancellation_token = CancellationToken::new();
        let task_cancellation_token = cancellation_token.child_token();
        let task_handle = tokio::spawn(async move {
            tokio::select! {
                _ = task_cancellation_token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if sender.send(message).await.is_err() {
                        log::debug!("Timer fired after its receiver was closed.");
                    }
                }
            }
        });

        self.armed = Some(ArmedTimer {
            task_handle,
            cancellation_token,
        });
    }

    pub fn cancel(&mut self) {
        if let Some(timer) = self.armed.take() {
            timer.cancel();
        }
    }

    /// True while a timer is armed and has not delivered its message yet.
    pub fn is_pending(&self) -> bool {
        self.armed
            .as_ref()
            .is_some_and(|timer| !timer.task_handle.is_finished())
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
