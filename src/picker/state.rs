use crate::alarm::{AlarmTime, Period};

use super::wheel::{Wheel, WheelEffect, WheelEvent};

pub const HOUR_DEFAULT_INDEX: usize = 8;
pub const MINUTE_DEFAULT_INDEX: usize = 0;
pub const PERIOD_DEFAULT_INDEX: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelId {
    Hour,
    Minute,
    Period,
}

impl WheelId {
    pub const ALL: [WheelId; 3] = [WheelId::Hour, WheelId::Minute, WheelId::Period];

    pub(crate) fn slot(&self) -> usize {
        match self {
            WheelId::Hour => 0,
            WheelId::Minute => 1,
            WheelId::Period => 2,
        }
    }
}

/// Committed time chosen on the wheels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerSelection {
    pub hour: u8,
    pub minute: u8,
    pub period: Period,
}

impl PickerSelection {
    /// Committed wheel values always lie on the dial, so this never fails for
    /// a selection read back from a [`PickerState`].
    pub fn time(&self) -> anyhow::Result<AlarmTime> {
        AlarmTime::new(self.hour, self.minute)
    }
}

impl Default for PickerSelection {
    fn default() -> Self {
        Self {
            hour: 9,
            minute: 0,
            period: Period::Am,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickerEvent {
    Wheel { wheel: WheelId, event: WheelEvent },
    LayoutReady,
    Teardown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerEffect {
    pub wheel: WheelId,
    pub effect: WheelEffect,
}

#[derive(Debug, Clone)]
pub struct PickerState {
    hour: Wheel<u8>,
    minute: Wheel<u8>,
    period: Wheel<Period>,
}

impl PickerState {
    pub fn new(requested: PickerSelection, item_height: f64) -> anyhow::Result<Self> {
        Ok(Self {
            hour: Wheel::new(
                (1..=12).collect(),
                item_height,
                requested.hour,
                HOUR_DEFAULT_INDEX,
            )?,
            minute: Wheel::new(
                (0..60).collect(),
                item_height,
                requested.minute,
                MINUTE_DEFAULT_INDEX,
            )?,
            period: Wheel::new(
                Period::ALL.to_vec(),
                item_height,
                requested.period,
                PERIOD_DEFAULT_INDEX,
            )?,
        })
    }

    pub fn hour(&self) -> &Wheel<u8> {
        &self.hour
    }

    pub fn minute(&self) -> &Wheel<u8> {
        &self.minute
    }

    pub fn period(&self) -> &Wheel<Period> {
        &self.period
    }

    pub fn selection(&self) -> PickerSelection {
        PickerSelection {
            hour: self.hour.committed_value(),
            minute: self.minute.committed_value(),
            period: self.period.committed_value(),
        }
    }

    /// Values under the viewport centers while the wheels are moving.
    pub fn highlighted(&self) -> PickerSelection {
        PickerSelection {
            hour: self.hour.highlighted_value(),
            minute: self.minute.highlighted_value(),
            period: self.period.highlighted_value(),
        }
    }

    pub fn update(&mut self, event: PickerEvent) -> Vec<PickerEffect> {
        match event {
            PickerEvent::Wheel { wheel, event } => self.dispatch(wheel, event),
            PickerEvent::LayoutReady => self.broadcast(WheelEvent::LayoutReady),
            PickerEvent::Teardown => self.broadcast(WheelEvent::Teardown),
        }
    }

    fn broadcast(&mut self, event: WheelEvent) -> Vec<PickerEffect> {
        WheelId::ALL
            .into_iter()
            .flat_map(|wheel| self.dispatch(wheel, event))
            .collect()
    }

    fn dispatch(&mut self, wheel: WheelId, event: WheelEvent) -> Vec<PickerEffect> {
        let effects = match wheel {
            WheelId::Hour => self.hour.handle(event),
            WheelId::Minute => self.minute.handle(event),
            WheelId::Period => self.period.handle(event),
        };

        effects
            .into_iter()
            .map(|effect| PickerEffect { wheel, effect })
            .collect()
    }
}
