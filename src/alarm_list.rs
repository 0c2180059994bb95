use crate::{
    alarm::{Alarm, AlarmId, AlarmTime, Period},
    repeat_days::{Day, RepeatDays},
};

pub const DELETE_TITLE: &str = "Delete Alarm";
pub const DELETE_MESSAGE: &str = "Are you sure you want to delete this alarm?";

const SPEECH_PREVIEW_CHARS: usize = 50;
const HEADER_SWITCH_OFFSET: f64 = 200.0;

#[derive(Debug, Clone, PartialEq)]
pub enum AlarmListAction {
    Add(Alarm),
    Toggle(AlarmId),
    RequestDelete(AlarmId),
    ConfirmDelete(AlarmId),
    CancelDelete,
    SpeakPreview(String),
    TestAlarm(AlarmId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlarmListEffect {
    ConfirmDelete {
        id: AlarmId,
        title: &'static str,
        message: &'static str,
    },
    Speak {
        text: String,
    },
}

/// Display projection of one alarm card.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmRow {
    pub id: AlarmId,
    pub time: String,
    pub period: &'static str,
    pub label: String,
    pub speech_preview: String,
    pub repeat: String,
    pub is_active: bool,
}

impl From<&Alarm> for AlarmRow {
    fn from(alarm: &Alarm) -> Self {
        Self {
            id: alarm.id,
            time: alarm.time.to_string(),
            period: alarm.period.as_str(),
            label: alarm.label.clone(),
            speech_preview: speech_preview(&alarm.speech_text),
            repeat: alarm.days.summary(),
            is_active: alarm.is_active,
        }
    }
}

#[derive(Debug, Default)]
pub struct AlarmListState {
    alarms: Vec<Alarm>,
    pending_delete: Option<AlarmId>,
}

impl AlarmListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alarms(alarms: Vec<Alarm>) -> Self {
        let mut state = Self::new();
        for alarm in alarms {
            state.update(AlarmListAction::Add(alarm));
        }
        state
    }

    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    pub fn get(&self, id: AlarmId) -> Option<&Alarm> {
        self.alarms.iter().find(|alarm| alarm.id == id)
    }

    pub fn pending_delete(&self) -> Option<AlarmId> {
        self.pending_delete
    }

    pub fn rows(&self) -> Vec<AlarmRow> {
        self.alarms.iter().map(AlarmRow::from).collect()
    }

    pub fn update(&mut self, action: AlarmListAction) -> Vec<AlarmListEffect> {
        match action {
            AlarmListAction::Add(alarm) => {
                if self.get(alarm.id).is_some() {
                    log::warn!(
                        "Rejecting alarm with duplicate id. [alarm_id = {}]",
                        alarm.id
                    );
                    return vec![];
                }

                log::info!(
                    "Adding alarm. [alarm_id = {}, time = {} {}, label = {:?}]",
                    alarm.id,
                    alarm.time,
                    alarm.period,
                    alarm.label
                );
                self.alarms.push(alarm);
                vec![]
            }
            AlarmListAction::Toggle(id) => {
                if let Some(alarm) = self.alarms.iter_mut().find(|alarm| alarm.id == id) {
                    alarm.is_active = !alarm.is_active;
                    log::debug!(
                        "Toggled alarm. [alarm_id = {}, is_active = {}]",
                        id,
                        alarm.is_active
                    );
                }
                vec![]
            }
            AlarmListAction::RequestDelete(id) => {
                if self.get(id).is_none() {
                    return vec![];
                }

                self.pending_delete = Some(id);
                vec![AlarmListEffect::ConfirmDelete {
                    id,
                    title: DELETE_TITLE,
                    message: DELETE_MESSAGE,
                }]
            }
            AlarmListAction::ConfirmDelete(id) => {
                if self.pending_delete != Some(id) {
                    log::warn!(
                        "Ignoring delete confirmation for an alarm that was not requested. [alarm_id = {}]",
                        id
                    );
                    return vec![];
                }

                self.pending_delete = None;
                self.alarms.retain(|alarm| alarm.id != id);
                log::info!("Deleted alarm. [alarm_id = {}]", id);
                vec![]
            }
            AlarmListAction::CancelDelete => {
                self.pending_delete = None;
                vec![]
            }
            AlarmListAction::SpeakPreview(text) => vec![AlarmListEffect::Speak { text }],
            AlarmListAction::TestAlarm(id) => self
                .get(id)
                .map(|alarm| AlarmListEffect::Speak {
                    text: alarm.speech_text.clone(),
                })
                .into_iter()
                .collect(),
        }
    }
}

pub fn speech_preview(text: &str) -> String {
    let excerpt: String = text.chars().take(SPEECH_PREVIEW_CHARS).collect();
    format!("{excerpt}...")
}

pub fn header_title(list_offset: f64) -> &'static str {
    if list_offset > HEADER_SWITCH_OFFSET {
        "Your Reminders"
    } else {
        "Set Reminder"
    }
}

/// Alarms every fresh screen starts with.
pub fn seed_alarms() -> Vec<Alarm> {
    vec![
        Alarm {
            id: 1,
            time: AlarmTime::clamped(7, 0),
            period: Period::Am,
            label: "Wake up".to_owned(),
            speech_text: "Good morning! Time to wake up and start your day!".to_owned(),
            is_active: true,
            days: RepeatDays::from_days([Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri]),
        },
        Alarm {
            id: 2,
            time: AlarmTime::clamped(12, 30),
            period: Period::Pm,
            label: "Lunch break".to_owned(),
            speech_text:
                "It's lunch time! Don't forget to take a break and eat something healthy."
                    .to_owned(),
            is_active: false,
            days: RepeatDays::Daily,
        },
    ]
}
