use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::{alarm::Period, picker::PickerSelection, speech::SpeechOptions};

#[derive(Deserialize, Debug, Clone)]
pub struct PickerSettings {
    pub item_height: f64,
    pub settle_delay_ms: u64,
    pub layout_delay_ms: u64,
    pub default_hour: u8,
    pub default_minute: u8,
    pub default_period: Period,
}

impl PickerSettings {
    /// Selection a freshly opened add form starts from. Values that are not on
    /// a wheel fall back to that wheel's default item at layout time.
    pub fn default_selection(&self) -> PickerSelection {
        PickerSelection {
            hour: self.default_hour,
            minute: self.default_minute,
            period: self.default_period,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ScanSettings {
    pub delay_ms: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ScreenSettings {
    pub seed_alarms: bool,
    pub confirm_prompts: bool,
    pub channel_capacity: usize,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    pub picker: PickerSettings,
    pub scan: ScanSettings,
    pub speech: SpeechOptions,
    pub screen: ScreenSettings,
}

impl AppSettings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("appsettings").required(false))
            .add_source(File::with_name("appsettings.local").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only, ignoring files and the environment.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let speech = SpeechOptions::default();

        Config::builder()
            .set_default("picker.item_height", 50.0)?
            .set_default("picker.settle_delay_ms", 150_i64)?
            .set_default("picker.layout_delay_ms", 100_i64)?
            .set_default("picker.default_hour", 9_i64)?
            .set_default("picker.default_minute", 0_i64)?
            .set_default("picker.default_period", "AM")?
            .set_default("scan.delay_ms", 2000_i64)?
            .set_default("speech.language", speech.language)?
            .set_default("speech.pitch", f64::from(speech.pitch))?
            .set_default("speech.rate", f64::from(speech.rate))?
            .set_default("screen.seed_alarms", true)?
            .set_default("screen.confirm_prompts", true)?
            .set_default("screen.channel_capacity", 64_i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reminder_screen() {
        let settings = AppSettings::defaults().unwrap();

        assert_eq!(settings.picker.item_height, 50.0);
        assert_eq!(settings.picker.settle_delay_ms, 150);
        assert_eq!(settings.scan.delay_ms, 2000);
        assert_eq!(settings.speech.language, "en-US");
        assert_eq!(
            settings.picker.default_selection(),
            PickerSelection {
                hour: 9,
                minute: 0,
                period: Period::Am
            }
        );
        assert!(settings.screen.seed_alarms);
    }
}
