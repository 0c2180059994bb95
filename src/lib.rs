//! Alarm and reminder screen: a list of spoken reminders, an add form with a
//! scrolling time picker and a simulated NFC scan that creates reminders.

pub mod alarm;
pub mod alarm_list;
pub mod appsettings;
pub mod debounce;
pub mod dialog;
pub mod picker;
pub mod repeat_days;
pub mod scan;
pub mod screen;
pub mod scroll;
pub mod speech;

#[cfg(test)]
mod test_utils;
