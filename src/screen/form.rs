use crate::{
    alarm::{Alarm, AlarmId},
    picker::PickerSelection,
    repeat_days::{DayTag, RepeatDays},
};

pub const DEFAULT_LABEL: &str = "New Alarm";
pub const DEFAULT_SPEECH_TEXT: &str = "This is your reminder!";

/// Contents of the add form. Survives cancelling the form and is reset to
/// defaults once an alarm has been saved from it.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmDraft {
    pub label: String,
    pub speech_text: String,
    pub days: RepeatDays,
    pub selection: PickerSelection,
}

impl AlarmDraft {
    pub fn new(selection: PickerSelection) -> Self {
        Self {
            label: DEFAULT_LABEL.to_owned(),
            speech_text: DEFAULT_SPEECH_TEXT.to_owned(),
            days: RepeatDays::Daily,
            selection,
        }
    }

    pub fn toggle_day(&mut self, tag: DayTag) {
        self.days = self.days.toggle(tag);
    }

    pub fn to_alarm(&self, id: AlarmId) -> anyhow::Result<Alarm> {
        Ok(Alarm {
            id,
            time: self.selection.time()?,
            period: self.selection.period,
            label: self.label.clone(),
            speech_text: self.speech_text.clone(),
            is_active: true,
            days: self.days.clone(),
        })
    }
}
