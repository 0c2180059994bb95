use std::{sync::Arc, time::Duration};

use tokio::time::{Instant, sleep};

use crate::{
    alarm::Period,
    alarm_list::{DELETE_MESSAGE, DELETE_TITLE, seed_alarms},
    appsettings::AppSettings,
    picker::{PickerSelection, WheelId},
    repeat_days::{Day, DayTag},
    scan::{DETECTED_MESSAGE, DETECTED_TITLE},
    test_utils::{Prompt, RecordingSpeech, ScriptedDialog, Snap, SnapLog},
};

use super::*;

struct Harness {
    screen: AlarmScreenHandle,
    speech: RecordingSpeech,
    dialog: ScriptedDialog,
    snaps: SnapLog,
}

impl Harness {
    fn start(confirm: bool) -> Self {
        let settings = AppSettings::defaults().unwrap();
        let speech = RecordingSpeech::default();
        let dialog = ScriptedDialog::answering(confirm);
        let snaps = SnapLog::default();
        let screen = AlarmScreenHandle::spawn(
            settings,
            ScreenCollaborators {
                speech: Arc::new(speech.clone()),
                dialog: Arc::new(dialog.clone()),
                surfaces: snaps.surfaces(),
            },
        );

        Self {
            screen,
            speech,
            dialog,
            snaps,
        }
    }

    /// Opens the add form and waits out the initial layout snap.
    async fn open_form(&self) {
        self.screen.open_add_form().await.unwrap();
        sleep(Duration::from_millis(200)).await;
        self.snaps.clear();
    }

    async fn form(&self) -> FormSnapshot {
        self.screen
            .snapshot()
            .await
            .unwrap()
            .form
            .expect("Expected the add form to be open.")
    }

    async fn labels(&self) -> Vec<String> {
        self.screen
            .snapshot()
            .await
            .unwrap()
            .rows
            .into_iter()
            .map(|row| row.label)
            .collect()
    }
}

#[tokio::test(start_paused = true)]
async fn starts_with_seeded_alarms_and_closed_form() {
    let harness = Harness::start(true);

    let snapshot = harness.screen.snapshot().await.unwrap();

    assert_eq!(snapshot.header_title, "Set Reminder");
    assert!(!snapshot.is_scanning);
    assert!(snapshot.form.is_none());
    assert_eq!(snapshot.rows.len(), 2);
    assert_eq!(snapshot.rows[0].repeat, "Weekdays");
    assert_eq!(snapshot.rows[1].repeat, "Daily");
}

#[tokio::test(start_paused = true)]
async fn opening_form_snaps_wheels_once_laid_out() {
    let harness = Harness::start(true);
    let start = Instant::now();

    harness.screen.open_add_form().await.unwrap();
    sleep(Duration::from_millis(99)).await;
    assert!(harness.snaps.snaps().is_empty());

    sleep(Duration::from_millis(2)).await;
    let snaps = harness.snaps.snaps();
    assert_eq!(snaps.len(), 3);
    assert!(snaps.iter().all(|snap| !snap.animated));
    assert!(
        snaps
            .iter()
            .all(|snap| snap.at == start + Duration::from_millis(100))
    );
    assert_eq!(
        harness.form().await.selection,
        PickerSelection {
            hour: 9,
            minute: 0,
            period: Period::Am
        }
    );
}

#[tokio::test(start_paused = true)]
async fn burst_of_scrolls_commits_once_after_last_one() {
    let harness = Harness::start(true);
    harness.open_form().await;
    let start = Instant::now();

    harness.screen.scroll_wheel(WheelId::Minute, 260.0).await.unwrap();
    sleep(Duration::from_millis(50)).await;
    harness.screen.scroll_wheel(WheelId::Minute, 510.0).await.unwrap();
    sleep(Duration::from_millis(50)).await;
    harness.screen.scroll_wheel(WheelId::Minute, 760.0).await.unwrap();

    sleep(Duration::from_millis(149)).await;
    let form = harness.form().await;
    assert_eq!(form.highlighted.minute, 15);
    assert_eq!(form.selection.minute, 0);
    assert!(harness.snaps.snaps().is_empty());

    sleep(Duration::from_millis(10)).await;
    assert_eq!(harness.form().await.selection.minute, 15);
    assert_eq!(
        harness.snaps.snaps(),
        vec![Snap {
            wheel: WheelId::Minute,
            offset: 750.0,
            animated: true,
            at: start + Duration::from_millis(250),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn tap_wins_over_pending_settle() {
    let harness = Harness::start(true);
    harness.open_form().await;

    harness.screen.scroll_wheel(WheelId::Minute, 500.0).await.unwrap();
    sleep(Duration::from_millis(50)).await;
    harness.screen.tap_wheel(WheelId::Minute, 45).await.unwrap();

    assert_eq!(harness.form().await.selection.minute, 45);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(harness.form().await.selection.minute, 45);
    let snaps = harness.snaps.animated();
    assert_eq!(snaps.len(), 1);
    assert_eq!(snaps[0].offset, 2_250.0);
}

#[tokio::test(start_paused = true)]
async fn tap_before_layout_survives_initial_snap() {
    let harness = Harness::start(true);

    harness.screen.open_add_form().await.unwrap();
    sleep(Duration::from_millis(20)).await;
    harness.screen.tap_wheel(WheelId::Minute, 45).await.unwrap();
    assert_eq!(harness.form().await.selection.minute, 45);

    sleep(Duration::from_millis(300)).await;

    let form = harness.form().await;
    assert_eq!(form.selection.minute, 45);
    assert_eq!(form.selection.hour, 9);
    let minute_snaps: Vec<Snap> = harness
        .snaps
        .snaps()
        .into_iter()
        .filter(|snap| snap.wheel == WheelId::Minute)
        .collect();
    assert_eq!(minute_snaps.len(), 1);
    assert!(minute_snaps[0].animated);
    assert_eq!(minute_snaps[0].offset, 2_250.0);
}

#[tokio::test(start_paused = true)]
async fn saving_adds_alarm_speaks_it_and_resets_form() {
    let harness = Harness::start(true);
    harness.open_form().await;

    harness.screen.tap_wheel(WheelId::Hour, 8).await.unwrap();
    harness.screen.tap_wheel(WheelId::Minute, 5).await.unwrap();
    harness.screen.tap_wheel(WheelId::Period, 0).await.unwrap();
    harness.screen.set_label("Take pills").await.unwrap();
    harness.screen.toggle_day(DayTag::Day(Day::Mon)).await.unwrap();
    assert_eq!(harness.form().await.repeat, "Mon");

    harness.screen.save_add_form().await.unwrap();
    sleep(Duration::from_millis(1)).await;

    let snapshot = harness.screen.snapshot().await.unwrap();
    assert!(snapshot.form.is_none());
    assert_eq!(snapshot.rows.len(), 3);
    let saved = &snapshot.rows[2];
    assert_eq!(saved.time, "09:05");
    assert_eq!(saved.period, "AM");
    assert_eq!(saved.label, "Take pills");
    assert_eq!(saved.repeat, "Mon");
    assert!(saved.is_active);
    assert_eq!(harness.speech.spoken(), vec![DEFAULT_SPEECH_TEXT]);

    harness.screen.open_add_form().await.unwrap();
    let form = harness.form().await;
    assert_eq!(form.label, DEFAULT_LABEL);
    assert_eq!(form.repeat, "Daily");
    assert_eq!(form.selection.minute, 0);
}

#[tokio::test(start_paused = true)]
async fn cancelling_form_keeps_draft() {
    let harness = Harness::start(true);
    harness.open_form().await;
    harness.screen.set_label("Pills").await.unwrap();
    harness.screen.tap_wheel(WheelId::Minute, 30).await.unwrap();

    harness.screen.cancel_add_form().await.unwrap();
    assert_eq!(harness.labels().await.len(), 2);

    harness.screen.open_add_form().await.unwrap();
    let form = harness.form().await;
    assert_eq!(form.label, "Pills");
    assert_eq!(form.selection.minute, 30);
}

#[tokio::test(start_paused = true)]
async fn closing_form_cancels_its_timers() {
    let harness = Harness::start(true);

    harness.screen.open_add_form().await.unwrap();
    harness.screen.scroll_wheel(WheelId::Minute, 500.0).await.unwrap();
    harness.screen.cancel_add_form().await.unwrap();
    sleep(Duration::from_secs(1)).await;

    assert!(harness.snaps.snaps().is_empty());

    harness.screen.open_add_form().await.unwrap();
    assert_eq!(harness.form().await.selection.minute, 0);
}

#[tokio::test(start_paused = true)]
async fn picker_input_without_open_form_is_ignored() {
    let harness = Harness::start(true);

    harness.screen.tap_wheel(WheelId::Hour, 3).await.unwrap();
    harness.screen.save_add_form().await.unwrap();

    assert!(harness.screen.snapshot().await.unwrap().form.is_none());
    assert_eq!(harness.labels().await.len(), 2);
    assert!(harness.snaps.snaps().is_empty());
}

#[tokio::test(start_paused = true)]
async fn declined_delete_keeps_alarm() {
    let harness = Harness::start(false);

    harness.screen.delete_alarm(1).await.unwrap();

    assert_eq!(harness.labels().await.len(), 2);
    assert_eq!(
        harness.dialog.prompts(),
        vec![Prompt::Confirm {
            title: DELETE_TITLE.to_owned(),
            message: DELETE_MESSAGE.to_owned(),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn confirmed_delete_removes_alarm() {
    let harness = Harness::start(true);

    harness.screen.delete_alarm(1).await.unwrap();

    let rows = harness.screen.snapshot().await.unwrap().rows;
    assert_eq!(rows.iter().map(|row| row.id).collect::<Vec<_>>(), vec![2]);
}

#[tokio::test(start_paused = true)]
async fn toggling_and_testing_alarms() {
    let harness = Harness::start(true);

    harness.screen.toggle_alarm(2).await.unwrap();
    harness.screen.test_alarm(1).await.unwrap();
    sleep(Duration::from_millis(1)).await;

    let rows = harness.screen.snapshot().await.unwrap().rows;
    assert!(rows[1].is_active);
    assert_eq!(harness.speech.spoken(), vec![seed_alarms()[0].speech_text.clone()]);
}

#[tokio::test(start_paused = true)]
async fn preview_speaks_draft_text() {
    let harness = Harness::start(true);
    harness.open_form().await;

    harness.screen.set_speech_text("Drink water").await.unwrap();
    harness.screen.preview_form_speech().await.unwrap();
    sleep(Duration::from_millis(1)).await;

    assert_eq!(harness.speech.spoken(), vec!["Drink water"]);
}

#[tokio::test(start_paused = true)]
async fn header_follows_list_scroll() {
    let harness = Harness::start(true);

    harness.screen.scroll_list(250.0).await.unwrap();
    assert_eq!(
        harness.screen.snapshot().await.unwrap().header_title,
        "Your Reminders"
    );

    harness.screen.scroll_list(200.0).await.unwrap();
    assert_eq!(
        harness.screen.snapshot().await.unwrap().header_title,
        "Set Reminder"
    );
}

#[tokio::test(start_paused = true)]
async fn scan_creates_reminder_after_delay() {
    let harness = Harness::start(true);

    harness.screen.start_scan().await.unwrap();
    assert!(harness.screen.snapshot().await.unwrap().is_scanning);

    sleep(Duration::from_millis(1_999)).await;
    assert_eq!(harness.labels().await.len(), 2);

    sleep(Duration::from_millis(2)).await;
    let snapshot = harness.screen.snapshot().await.unwrap();
    assert!(!snapshot.is_scanning);
    let scanned = snapshot.rows.last().unwrap();
    assert_eq!(scanned.label, "NFC Reminder");
    assert_eq!(scanned.time, "08:30");
    assert_eq!(scanned.repeat, "Daily");
    assert_eq!(
        harness.dialog.prompts(),
        vec![Prompt::Acknowledge {
            title: DETECTED_TITLE.to_owned(),
            message: DETECTED_MESSAGE.to_owned(),
        }]
    );
    assert_eq!(
        harness.speech.spoken(),
        vec!["Your NFC reminder is now active! Don't forget your scheduled task."]
    );
}

#[tokio::test(start_paused = true)]
async fn scan_requested_while_scanning_is_ignored() {
    let harness = Harness::start(true);

    harness.screen.start_scan().await.unwrap();
    sleep(Duration::from_millis(500)).await;
    harness.screen.start_scan().await.unwrap();
    sleep(Duration::from_secs(5)).await;

    let labels = harness.labels().await;
    assert_eq!(
        labels.iter().filter(|label| *label == "NFC Reminder").count(),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn dismissing_mid_scan_cancels_it() {
    let harness = Harness::start(true);

    harness.screen.start_scan().await.unwrap();
    sleep(Duration::from_millis(500)).await;
    harness.screen.dismiss().await.unwrap();
    sleep(Duration::from_secs(5)).await;

    assert!(harness.dialog.prompts().is_empty());
    assert!(harness.speech.spoken().is_empty());
}

#[tokio::test(start_paused = true)]
async fn dismissing_with_open_form_stops_picker_timers() {
    let harness = Harness::start(true);
    harness.open_form().await;
    harness.screen.scroll_wheel(WheelId::Hour, 100.0).await.unwrap();

    harness.screen.dismiss().await.unwrap();
    sleep(Duration::from_secs(1)).await;

    assert!(harness.snaps.snaps().is_empty());
}
