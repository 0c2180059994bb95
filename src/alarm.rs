use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::repeat_days::RepeatDays;

pub type AlarmId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Period {
    Am,
    Pm,
}

impl Period {
    pub const ALL: [Period; 2] = [Period::Am, Period::Pm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Am => "AM",
            Period::Pm => "PM",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wall-clock time on a 12-hour dial. Hours are `1..=12`, minutes `0..=59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmTime {
    hour: u8,
    minute: u8,
}

impl AlarmTime {
    pub fn new(hour: u8, minute: u8) -> anyhow::Result<Self> {
        anyhow::ensure!((1..=12).contains(&hour), "hour {hour} is outside 1..=12");
        anyhow::ensure!(minute < 60, "minute {minute} is outside 0..=59");

        Ok(Self { hour, minute })
    }

    /// Pulls out-of-dial values onto the nearest valid hour and minute.
    pub const fn clamped(hour: u8, minute: u8) -> Self {
        let hour = if hour < 1 {
            1
        } else if hour > 12 {
            12
        } else {
            hour
        };
        let minute = if minute > 59 { 59 } else { minute };

        Self { hour, minute }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alarm {
    pub id: AlarmId,
    pub time: AlarmTime,
    pub period: Period,
    pub label: String,
    pub speech_text: String,
    pub is_active: bool,
    pub days: RepeatDays,
}

/// Hands out timestamp-based ids. Two alarms created within the same
/// millisecond (or with a clock that went backwards) still get distinct,
/// increasing ids.
#[derive(Debug, Default)]
pub struct AlarmIdSource {
    last: Option<AlarmId>,
}

impl AlarmIdSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> AlarmId {
        let candidate = now.timestamp_millis();
        let id = match self.last {
            Some(last) if candidate <= last => last + 1,
            _ => candidate,
        };
        self.last = Some(id);
        id
    }

    pub fn next_now(&mut self) -> AlarmId {
        self.next(Utc::now())
    }

    /// Makes sure ids handed out later never collide with `id`.
    pub fn observe(&mut self, id: AlarmId) {
        if self.last.is_none_or(|last| id > last) {
            self.last = Some(id);
        }
    }
}
