//! The reminder screen runtime.
//!
//! All screen state lives in one task that handles [`ScreenMessage`]s in
//! order. UI input arrives through [`AlarmScreenHandle`]; timers post their
//! firings back into the same channel, so every state change happens on
//! that single task.

mod form;

pub use form::{AlarmDraft, DEFAULT_LABEL, DEFAULT_SPEECH_TEXT};

use std::{collections::VecDeque, ops::ControlFlow, sync::Arc, time::Duration};

use anyhow::Context;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::{
    alarm::{AlarmId, AlarmIdSource},
    alarm_list::{AlarmListAction, AlarmListEffect, AlarmListState, AlarmRow, header_title, seed_alarms},
    appsettings::AppSettings,
    debounce::DebounceTimer,
    dialog::ConfirmationDialog,
    picker::{
        PickerEvent, PickerSelection, PickerSession, PickerTimerMessage, TimePickerController,
        WheelEvent, WheelId, WheelSurfaces,
    },
    repeat_days::DayTag,
    scan,
    speech::SpeechService,
};

#[derive(Debug)]
pub enum ScreenMessage {
    OpenAddForm,
    CancelAddForm,
    SaveAddForm,
    Picker(PickerEvent),
    PickerTimer(PickerTimerMessage),
    SetLabel(String),
    SetSpeechText(String),
    ToggleDay(DayTag),
    PreviewFormSpeech,
    ToggleAlarm(AlarmId),
    DeleteAlarm(AlarmId),
    TestAlarm(AlarmId),
    ListScrolled { offset: f64 },
    StartScan,
    ScanElapsed,
    Snapshot(oneshot::Sender<ScreenSnapshot>),
    Dismiss,
}

impl From<PickerTimerMessage> for ScreenMessage {
    fn from(message: PickerTimerMessage) -> Self {
        ScreenMessage::PickerTimer(message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub label: String,
    pub speech_text: String,
    pub days: Vec<&'static str>,
    pub repeat: String,
    pub selection: PickerSelection,
    pub highlighted: PickerSelection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSnapshot {
    pub header_title: &'static str,
    pub rows: Vec<AlarmRow>,
    pub is_scanning: bool,
    pub form: Option<FormSnapshot>,
}

#[derive(Clone)]
pub struct ScreenCollaborators {
    pub speech: Arc<dyn SpeechService>,
    pub dialog: Arc<dyn ConfirmationDialog>,
    pub surfaces: WheelSurfaces,
}

pub struct AlarmScreenHandle {
    sender: mpsc::Sender<ScreenMessage>,
    task: JoinHandle<()>,
}

impl AlarmScreenHandle {
    pub fn spawn(settings: AppSettings, collaborators: ScreenCollaborators) -> Self {
        let (sender, receiver) = mpsc::channel(settings.screen.channel_capacity.max(1));
        let screen = AlarmScreen::new(settings, collaborators, sender.downgrade());
        let task = tokio::spawn(screen.run(receiver));

        Self { sender, task }
    }

    pub async fn open_add_form(&self) -> anyhow::Result<()> {
        self.send(ScreenMessage::OpenAddForm).await
    }

    pub async fn cancel_add_form(&self) -> anyhow::Result<()> {
        self.send(ScreenMessage::CancelAddForm).await
    }

    pub async fn save_add_form(&self) -> anyhow::Result<()> {
        self.send(ScreenMessage::SaveAddForm).await
    }

    pub async fn scroll_wheel(&self, wheel: WheelId, offset: f64) -> anyhow::Result<()> {
        self.wheel(wheel, WheelEvent::Scrolled { offset }).await
    }

    pub async fn end_wheel_scroll(&self, wheel: WheelId, offset: f64) -> anyhow::Result<()> {
        self.wheel(wheel, WheelEvent::ScrollEnded { offset }).await
    }

    pub async fn tap_wheel(&self, wheel: WheelId, index: usize) -> anyhow::Result<()> {
        self.wheel(wheel, WheelEvent::Tapped { index }).await
    }

    pub async fn set_label(&self, label: impl Into<String>) -> anyhow::Result<()> {
        self.send(ScreenMessage::SetLabel(label.into())).await
    }

    pub async fn set_speech_text(&self, text: impl Into<String>) -> anyhow::Result<()> {
        self.send(ScreenMessage::SetSpeechText(text.into())).await
    }

    pub async fn toggle_day(&self, tag: DayTag) -> anyhow::Result<()> {
        self.send(ScreenMessage::ToggleDay(tag)).await
    }

    pub async fn preview_form_speech(&self) -> anyhow::Result<()> {
        self.send(ScreenMessage::PreviewFormSpeech).await
    }

    pub async fn toggle_alarm(&self, id: AlarmId) -> anyhow::Result<()> {
        self.send(ScreenMessage::ToggleAlarm(id)).await
    }

    pub async fn delete_alarm(&self, id: AlarmId) -> anyhow::Result<()> {
        self.send(ScreenMessage::DeleteAlarm(id)).await
    }

    pub async fn test_alarm(&self, id: AlarmId) -> anyhow::Result<()> {
        self.send(ScreenMessage::TestAlarm(id)).await
    }

    pub async fn scroll_list(&self, offset: f64) -> anyhow::Result<()> {
        self.send(ScreenMessage::ListScrolled { offset }).await
    }

    pub async fn start_scan(&self) -> anyhow::Result<()> {
        self.send(ScreenMessage::StartScan).await
    }

    pub async fn snapshot(&self) -> anyhow::Result<ScreenSnapshot> {
        let (reply, response) = oneshot::channel();
        self.send(ScreenMessage::Snapshot(reply)).await?;

        response
            .await
            .context("Alarm screen stopped before answering the snapshot request")
    }

    /// Dismisses the screen: pending scan and picker timers are cancelled and
    /// the screen task is awaited.
    pub async fn dismiss(self) -> anyhow::Result<()> {
        if self.sender.send(ScreenMessage::Dismiss).await.is_err() {
            log::debug!("Alarm screen already stopped before dismissal.");
        }

        self.task.await.context("Alarm screen task failed")
    }

    async fn wheel(&self, wheel: WheelId, event: WheelEvent) -> anyhow::Result<()> {
        self.send(ScreenMessage::Picker(PickerEvent::Wheel { wheel, event }))
            .await
    }

    async fn send(&self, message: ScreenMessage) -> anyhow::Result<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| anyhow::anyhow!("Alarm screen is no longer running"))
    }
}

struct AlarmScreen {
    settings: AppSettings,
    list: AlarmListState,
    ids: AlarmIdSource,
    draft: AlarmDraft,
    picker: Option<TimePickerController<ScreenMessage>>,
    next_session: u64,
    is_scanning: bool,
    scan_timer: DebounceTimer,
    list_offset: f64,
    collaborators: ScreenCollaborators,
    sender: mpsc::WeakSender<ScreenMessage>,
}

impl AlarmScreen {
    fn new(
        settings: AppSettings,
        collaborators: ScreenCollaborators,
        sender: mpsc::WeakSender<ScreenMessage>,
    ) -> Self {
        let mut ids = AlarmIdSource::new();
        let list = if settings.screen.seed_alarms {
            let seeded = seed_alarms();
            seeded.iter().for_each(|alarm| ids.observe(alarm.id));
            AlarmListState::with_alarms(seeded)
        } else {
            AlarmListState::new()
        };
        let draft = AlarmDraft::new(settings.picker.default_selection());

        Self {
            settings,
            list,
            ids,
            draft,
            picker: None,
            next_session: 0,
            is_scanning: false,
            scan_timer: DebounceTimer::new(),
            list_offset: 0.0,
            collaborators,
            sender,
        }
    }

    async fn run(mut self, mut receiver: mpsc::Receiver<ScreenMessage>) {
        log::info!(
            "Alarm screen started. [alarms = {}]",
            self.list.alarms().len()
        );

        while let Some(message) = receiver.recv().await {
            log::trace!("Alarm screen got message. {:?}", message);
            if self.handle(message).await.is_break() {
                break;
            }
        }

        self.teardown();
    }

    async fn handle(&mut self, message: ScreenMessage) -> ControlFlow<()> {
        match message {
            ScreenMessage::OpenAddForm => self.open_form(),
            ScreenMessage::CancelAddForm => self.cancel_form(),
            ScreenMessage::SaveAddForm => self.save_form().await,
            ScreenMessage::Picker(event) => match self.picker.as_mut() {
                Some(picker) => picker.handle(event),
                None => log::debug!("Ignoring picker input while the add form is closed."),
            },
            ScreenMessage::PickerTimer(message) => {
                if let Some(picker) = self.picker.as_mut() {
                    picker.handle_timer(message);
                }
            }
            ScreenMessage::SetLabel(label) => self.draft.label = label,
            ScreenMessage::SetSpeechText(text) => self.draft.speech_text = text,
            ScreenMessage::ToggleDay(tag) => self.draft.toggle_day(tag),
            ScreenMessage::PreviewFormSpeech => {
                let text = self.draft.speech_text.clone();
                self.apply(AlarmListAction::SpeakPreview(text)).await
            }
            ScreenMessage::ToggleAlarm(id) => self.apply(AlarmListAction::Toggle(id)).await,
            ScreenMessage::DeleteAlarm(id) => self.apply(AlarmListAction::RequestDelete(id)).await,
            ScreenMessage::TestAlarm(id) => self.apply(AlarmListAction::TestAlarm(id)).await,
            ScreenMessage::ListScrolled { offset } => self.list_offset = offset,
            ScreenMessage::StartScan => self.start_scan(),
            ScreenMessage::ScanElapsed => self.finish_scan().await,
            ScreenMessage::Snapshot(reply) => {
                if reply.send(self.snapshot()).is_err() {
                    log::debug!("Snapshot requester went away.");
                }
            }
            ScreenMessage::Dismiss => return ControlFlow::Break(()),
        }

        ControlFlow::Continue(())
    }

    async fn apply(&mut self, action: AlarmListAction) {
        let mut effects = VecDeque::from(self.list.update(action));

        while let Some(effect) = effects.pop_front() {
            match effect {
                AlarmListEffect::ConfirmDelete { id, title, message } => {
                    let dialog = Arc::clone(&self.collaborators.dialog);
                    let follow_up = if dialog.confirm(title, message).await {
                        AlarmListAction::ConfirmDelete(id)
                    } else {
                        log::info!("Delete cancelled. [alarm_id = {}]", id);
                        AlarmListAction::CancelDelete
                    };
                    effects.extend(self.list.update(follow_up));
                }
                AlarmListEffect::Speak { text } => self.speak(text),
            }
        }
    }

    fn open_form(&mut self) {
        if self.picker.is_some() {
            log::debug!("Add form is already open.");
            return;
        }

        let session = PickerSession(self.next_session);
        self.next_session += 1;
        match TimePickerController::open(
            session,
            self.draft.selection,
            &self.settings.picker,
            self.collaborators.surfaces.clone(),
            self.sender.clone(),
        ) {
            Ok(picker) => self.picker = Some(picker),
            Err(error) => log::error!("Could not open the time picker. error = {}", error),
        }
    }

    fn cancel_form(&mut self) {
        if let Some(picker) = self.picker.take() {
            self.draft.selection = picker.close();
        }
    }

    async fn save_form(&mut self) {
        let Some(picker) = self.picker.take() else {
            log::warn!("Save requested while the add form is closed.");
            return;
        };
        self.draft.selection = picker.close();

        let alarm = match self.draft.to_alarm(self.ids.next_now()) {
            Ok(alarm) => alarm,
            Err(error) => {
                log::error!("Could not build alarm from the add form. error = {}", error);
                return;
            }
        };

        let speech_text = alarm.speech_text.clone();
        self.apply(AlarmListAction::Add(alarm)).await;
        self.draft = AlarmDraft::new(self.settings.picker.default_selection());
        self.apply(AlarmListAction::SpeakPreview(speech_text)).await;
    }

    fn start_scan(&mut self) {
        if self.is_scanning {
            log::info!("Scan already in progress.");
            return;
        }

        let Some(sender) = self.sender.upgrade() else {
            return;
        };

        self.is_scanning = true;
        let delay = Duration::from_millis(self.settings.scan.delay_ms);
        log::info!("[SCAN] Waiting {:?} for a tag.", delay);
        self.scan_timer.arm(delay, sender, ScreenMessage::ScanElapsed);
    }

    async fn finish_scan(&mut self) {
        if !self.is_scanning {
            return;
        }
        self.is_scanning = false;

        let dialog = Arc::clone(&self.collaborators.dialog);
        dialog
            .acknowledge(scan::DETECTED_TITLE, scan::DETECTED_MESSAGE)
            .await;

        let alarm = scan::scanned_alarm(self.ids.next_now());
        let speech_text = alarm.speech_text.clone();
        self.apply(AlarmListAction::Add(alarm)).await;
        self.apply(AlarmListAction::SpeakPreview(speech_text)).await;
    }

    fn speak(&self, text: String) {
        let speech = Arc::clone(&self.collaborators.speech);
        let options = self.settings.speech.clone();
        tokio::spawn(async move {
            if let Err(error) = speech.speak(&text, &options).await {
                log::warn!("Speech playback failed. error = {}", error);
            }
        });
    }

    fn snapshot(&self) -> ScreenSnapshot {
        ScreenSnapshot {
            header_title: header_title(self.list_offset),
            rows: self.list.rows(),
            is_scanning: self.is_scanning,
            form: self.picker.as_ref().map(|picker| FormSnapshot {
                label: self.draft.label.clone(),
                speech_text: self.draft.speech_text.clone(),
                days: self.draft.days.tags(),
                repeat: self.draft.days.summary(),
                selection: picker.selection(),
                highlighted: picker.state().highlighted(),
            }),
        }
    }

    fn teardown(&mut self) {
        self.scan_timer.cancel();
        self.is_scanning = false;
        if let Some(picker) = self.picker.take() {
            picker.close();
        }

        log::info!("Alarm screen dismissed.");
    }
}

#[cfg(test)]
mod tests;
