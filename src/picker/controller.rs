use std::{sync::Arc, time::Duration};

use tokio::sync::mpsc;

use crate::{appsettings::PickerSettings, debounce::DebounceTimer, scroll::ScrollSurface};

use super::{
    state::{PickerEffect, PickerEvent, PickerSelection, PickerState, WheelId},
    wheel::{WheelEffect, WheelEvent},
};

/// Identifies one opening of the add form. Timer messages from an earlier
/// opening are dropped by the controller of a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerSession(pub u64);

/// Posted back to the owner's channel when a picker timer elapses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerTimerMessage {
    pub session: PickerSession,
    pub event: PickerEvent,
}

#[derive(Clone)]
pub struct WheelSurfaces {
    pub hour: Arc<dyn ScrollSurface>,
    pub minute: Arc<dyn ScrollSurface>,
    pub period: Arc<dyn ScrollSurface>,
}

impl WheelSurfaces {
    pub fn get(&self, wheel: WheelId) -> &dyn ScrollSurface {
        match wheel {
            WheelId::Hour => self.hour.as_ref(),
            WheelId::Minute => self.minute.as_ref(),
            WheelId::Period => self.period.as_ref(),
        }
    }
}

pub struct TimePickerController<M> {
    session: PickerSession,
    state: PickerState,
    settle_timers: [DebounceTimer; 3],
    layout_timer: DebounceTimer,
    settle_delay: Duration,
    surfaces: WheelSurfaces,
    sender: mpsc::WeakSender<M>,
}

impl<M> TimePickerController<M>
where
    M: From<PickerTimerMessage> + Send + 'static,
{
    /// Starts a picker at `requested` and schedules the initial snap once the
    /// scroll surfaces have had time to lay out.
    pub fn open(
        session: PickerSession,
        requested: PickerSelection,
        settings: &PickerSettings,
        surfaces: WheelSurfaces,
        sender: mpsc::WeakSender<M>,
    ) -> anyhow::Result<Self> {
        let mut controller = Self {
            session,
            state: PickerState::new(requested, settings.item_height)?,
            settle_timers: Default::default(),
            layout_timer: DebounceTimer::new(),
            settle_delay: Duration::from_millis(settings.settle_delay_ms),
            surfaces,
            sender,
        };

        if let Some(sender) = controller.sender.upgrade() {
            let message = controller.timer_message(PickerEvent::LayoutReady);
            controller.layout_timer.arm(
                Duration::from_millis(settings.layout_delay_ms),
                sender,
                message,
            );
        }

        log::debug!("Opened time picker. [session = {:?}]", session);
        Ok(controller)
    }

    pub fn session(&self) -> PickerSession {
        self.session
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn selection(&self) -> PickerSelection {
        self.state.selection()
    }

    /// Handles scroll and tap input coming from the UI.
    pub fn handle(&mut self, event: PickerEvent) {
        for effect in self.state.update(event) {
            self.apply(effect);
        }
    }

    /// Handles a timer message, dropping it if it belongs to another session.
    pub fn handle_timer(&mut self, message: PickerTimerMessage) {
        if message.session != self.session {
            log::trace!(
                "Dropping picker timer from another session. [session = {:?}, current = {:?}]",
                message.session,
                self.session
            );
            return;
        }

        self.handle(message.event);
    }

    /// Tears the picker down and cancels every outstanding timer.
    pub fn close(mut self) -> PickerSelection {
        self.layout_timer.cancel();
        self.handle(PickerEvent::Teardown);
        for timer in &mut self.settle_timers {
            timer.cancel();
        }

        log::debug!("Closed time picker. [session = {:?}]", self.session);
        self.state.selection()
    }

    fn apply(&mut self, PickerEffect { wheel, effect }: PickerEffect) {
        match effect {
            WheelEffect::ArmSettle { ticket } => {
                let Some(sender) = self.sender.upgrade() else {
                    log::debug!("Owner channel is closed, not arming settle timer.");
                    return;
                };
                let message = self.timer_message(PickerEvent::Wheel {
                    wheel,
                    event: WheelEvent::SettleElapsed { ticket },
                });
                self.settle_timers[wheel.slot()].arm(self.settle_delay, sender, message);
            }
            WheelEffect::CancelSettle => self.settle_timers[wheel.slot()].cancel(),
            WheelEffect::SnapTo { offset, animated } => {
                self.surfaces.get(wheel).scroll_to(offset, animated)
            }
        }
    }

    fn timer_message(&self, event: PickerEvent) -> M {
        M::from(PickerTimerMessage {
            session: self.session,
            event,
        })
    }
}
