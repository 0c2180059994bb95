//! Scrolling hour/minute/period wheels of the add form.
//!
//! [`PickerState`] is the pure state machine: it consumes [`PickerEvent`]s and
//! returns [`PickerEffect`]s. [`TimePickerController`] owns one for the
//! lifetime of an open add form and carries out the effects with real timers
//! and scroll surfaces.

mod controller;
mod state;
mod wheel;

pub use controller::{PickerSession, PickerTimerMessage, TimePickerController, WheelSurfaces};
pub use state::{
    HOUR_DEFAULT_INDEX, MINUTE_DEFAULT_INDEX, PERIOD_DEFAULT_INDEX, PickerEffect, PickerEvent,
    PickerSelection, PickerState, WheelId,
};
pub use wheel::{SettleTicket, Wheel, WheelEffect, WheelEvent, WheelPhase};
