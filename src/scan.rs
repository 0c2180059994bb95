//! Simulated NFC scan. There is no tag reader: after the scan delay the
//! screen creates this canned reminder.

use crate::{
    alarm::{Alarm, AlarmId, AlarmTime, Period},
    repeat_days::RepeatDays,
};

pub const DETECTED_TITLE: &str = "NFC Tag Detected";
pub const DETECTED_MESSAGE: &str = "Creating alarm from NFC data...";

pub fn scanned_alarm(id: AlarmId) -> Alarm {
    Alarm {
        id,
        time: AlarmTime::clamped(8, 30),
        period: Period::Am,
        label: "NFC Reminder".to_owned(),
        speech_text: "Your NFC reminder is now active! Don't forget your scheduled task."
            .to_owned(),
        is_active: true,
        days: RepeatDays::Daily,
    }
}
