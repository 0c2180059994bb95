use std::{sync::Arc, time::Duration};

use pharmapack::{
    appsettings::AppSettings,
    dialog::AutoConfirmDialog,
    picker::{WheelId, WheelSurfaces},
    repeat_days::{Day, DayTag},
    screen::{AlarmScreenHandle, ScreenCollaborators},
    scroll::LogScrollSurface,
    speech::LogSpeechService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = AppSettings::load()?;
    log::debug!("Loaded settings. {:?}", settings);

    let scan_delay = Duration::from_millis(settings.scan.delay_ms);
    let settle_delay = Duration::from_millis(settings.picker.settle_delay_ms);
    let layout_delay = Duration::from_millis(settings.picker.layout_delay_ms);

    let collaborators = ScreenCollaborators {
        speech: Arc::new(LogSpeechService),
        dialog: Arc::new(AutoConfirmDialog::new(settings.screen.confirm_prompts)),
        surfaces: WheelSurfaces {
            hour: Arc::new(LogScrollSurface::new(WheelId::Hour)),
            minute: Arc::new(LogScrollSurface::new(WheelId::Minute)),
            period: Arc::new(LogScrollSurface::new(WheelId::Period)),
        },
    };
    let screen = AlarmScreenHandle::spawn(settings.clone(), collaborators);

    screen.start_scan().await?;
    tokio::time::sleep(scan_delay * 2).await;

    screen.open_add_form().await?;
    tokio::time::sleep(layout_delay * 2).await;

    let item_height = settings.picker.item_height;
    for step in 1..=3 {
        screen
            .scroll_wheel(WheelId::Hour, item_height * f64::from(step) + 7.0)
            .await?;
        tokio::time::sleep(settle_delay / 3).await;
    }
    screen.end_wheel_scroll(WheelId::Hour, item_height * 5.0 + 3.0).await?;
    screen.tap_wheel(WheelId::Minute, 45).await?;
    screen.tap_wheel(WheelId::Period, 1).await?;
    tokio::time::sleep(settle_delay * 2).await;

    screen.set_label("Evening pills").await?;
    screen.set_speech_text("Time to take your evening pills.").await?;
    screen.toggle_day(DayTag::Day(Day::Mon)).await?;
    screen.toggle_day(DayTag::Day(Day::Thu)).await?;
    screen.preview_form_speech().await?;
    screen.save_add_form().await?;

    let snapshot = screen.snapshot().await?;
    if let Some(first) = snapshot.rows.first() {
        screen.toggle_alarm(first.id).await?;
        screen.test_alarm(first.id).await?;
        screen.delete_alarm(first.id).await?;
    }

    screen.scroll_list(item_height * 5.0).await?;

    let snapshot = screen.snapshot().await?;
    log::info!("{}", snapshot.header_title);
    for row in &snapshot.rows {
        log::info!(
            "{} {} {:<14} {:<24} {} {}",
            row.time,
            row.period,
            row.label,
            row.repeat,
            if row.is_active { "on " } else { "off" },
            row.speech_preview
        );
    }

    screen.dismiss().await
}
