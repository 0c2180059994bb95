use crate::picker::WheelId;

/// Imperative side of a wheel's scroll view. Called on the event loop, must
/// not block.
pub trait ScrollSurface: Send + Sync + 'static {
    fn scroll_to(&self, offset: f64, animated: bool);
}

pub struct LogScrollSurface {
    wheel: WheelId,
}

impl LogScrollSurface {
    pub fn new(wheel: WheelId) -> Self {
        Self { wheel }
    }
}

impl ScrollSurface for LogScrollSurface {
    fn scroll_to(&self, offset: f64, animated: bool) {
        log::debug!(
            "Scrolling wheel. [wheel = {:?}, offset = {}, animated = {}]",
            self.wheel,
            offset,
            animated
        );
    }
}
