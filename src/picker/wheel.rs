use std::fmt::Debug;

/// Identifies the latest armed settle timer of a wheel. Timer firings that
/// carry an older ticket are stale and get dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettleTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelPhase {
    Idle,
    Scrolling,
    Settling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelEvent {
    Scrolled { offset: f64 },
    ScrollEnded { offset: f64 },
    SettleElapsed { ticket: SettleTicket },
    Tapped { index: usize },
    LayoutReady,
    Teardown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelEffect {
    ArmSettle { ticket: SettleTicket },
    CancelSettle,
    SnapTo { offset: f64, animated: bool },
}

/// One scrollable value column.
///
/// `current_index` follows the scroll position on every event and drives
/// highlighting; `committed_index` only moves on settle, tap or layout.
/// Once the user has scrolled or tapped a wheel, the initial layout snap
/// leaves it alone.
#[derive(Debug, Clone)]
pub struct Wheel<T> {
    values: Vec<T>,
    item_height: f64,
    default_index: usize,
    requested: T,
    phase: WheelPhase,
    current_index: usize,
    committed_index: usize,
    last_offset: f64,
    ticket: SettleTicket,
    touched: bool,
}

impl<T: Copy + PartialEq + Debug> Wheel<T> {
    pub fn new(
        values: Vec<T>,
        item_height: f64,
        requested: T,
        default_index: usize,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(!values.is_empty(), "a wheel needs at least one value");
        anyhow::ensure!(
            item_height.is_finite() && item_height > 0.0,
            "item height {item_height} must be positive"
        );

        let default_index = default_index.min(values.len() - 1);
        let mut wheel = Self {
            values,
            item_height,
            default_index,
            requested,
            phase: WheelPhase::Idle,
            current_index: default_index,
            committed_index: default_index,
            last_offset: 0.0,
            ticket: SettleTicket::default(),
            touched: false,
        };

        let index = wheel.resolve_requested();
        wheel.current_index = index;
        wheel.committed_index = index;
        wheel.last_offset = wheel.offset_of(index);
        Ok(wheel)
    }

    pub fn phase(&self) -> WheelPhase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn committed_index(&self) -> usize {
        self.committed_index
    }

    pub fn committed_value(&self) -> T {
        self.values[self.committed_index]
    }

    /// Value under the viewport center, used for highlighting.
    pub fn highlighted_value(&self) -> T {
        self.values[self.current_index]
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn item_count(&self) -> usize {
        self.values.len()
    }

    pub fn ticket(&self) -> SettleTicket {
        self.ticket
    }

    pub fn index_for_offset(&self, offset: f64) -> usize {
        let max_index = self.values.len() - 1;
        let position = (offset / self.item_height).round();
        if position.is_nan() || position <= 0.0 {
            0
        } else if position >= max_index as f64 {
            max_index
        } else {
            position as usize
        }
    }

    pub fn offset_of(&self, index: usize) -> f64 {
        index as f64 * self.item_height
    }

    pub fn handle(&mut self, event: WheelEvent) -> Vec<WheelEffect> {
        match (self.phase, event) {
            (_, WheelEvent::Scrolled { offset }) => {
                self.track(offset);
                self.phase = WheelPhase::Scrolling;
                vec![self.rearm()]
            }
            (WheelPhase::Idle, WheelEvent::ScrollEnded { offset }) => {
                log::trace!("Ignoring scroll end of an idle wheel. [offset = {}]", offset);
                vec![]
            }
            (_, WheelEvent::ScrollEnded { offset }) => {
                self.track(offset);
                self.phase = WheelPhase::Settling;
                vec![self.rearm()]
            }
            (WheelPhase::Idle, WheelEvent::SettleElapsed { ticket }) => {
                log::trace!("Dropping settle for idle wheel. [ticket = {:?}]", ticket);
                vec![]
            }
            (_, WheelEvent::SettleElapsed { ticket }) => {
                if ticket != self.ticket {
                    log::trace!(
                        "Dropping stale settle. [ticket = {:?}, latest = {:?}]",
                        ticket,
                        self.ticket
                    );
                    return vec![];
                }

                let index = self.index_for_offset(self.last_offset);
                if index != self.committed_index {
                    log::debug!(
                        "Committing settled value. [value = {:?}, index = {}]",
                        self.values[index],
                        index
                    );
                }
                self.commit(index);
                self.phase = WheelPhase::Idle;
                vec![WheelEffect::SnapTo {
                    offset: self.offset_of(index),
                    animated: true,
                }]
            }
            (phase, WheelEvent::Tapped { index }) => {
                let index = index.min(self.values.len() - 1);
                self.touched = true;
                let mut effects = self.invalidate(phase);
                self.commit(index);
                log::debug!(
                    "Committing tapped value. [value = {:?}, index = {}]",
                    self.values[index],
                    index
                );
                effects.push(WheelEffect::SnapTo {
                    offset: self.offset_of(index),
                    animated: true,
                });
                effects
            }
            (WheelPhase::Idle, WheelEvent::LayoutReady) if !self.touched => {
                let index = self.resolve_requested();
                self.commit(index);
                vec![WheelEffect::SnapTo {
                    offset: self.offset_of(index),
                    animated: false,
                }]
            }
            (phase, WheelEvent::LayoutReady) => {
                log::debug!(
                    "Skipping initial snap of a wheel the user already moved. [phase = {:?}]",
                    phase
                );
                vec![]
            }
            (phase, WheelEvent::Teardown) => self.invalidate(phase),
        }
    }

    fn track(&mut self, offset: f64) {
        self.touched = true;
        self.last_offset = offset;
        self.current_index = self.index_for_offset(offset);
    }

    fn rearm(&mut self) -> WheelEffect {
        self.ticket = SettleTicket(self.ticket.0 + 1);
        WheelEffect::ArmSettle {
            ticket: self.ticket,
        }
    }

    fn invalidate(&mut self, phase: WheelPhase) -> Vec<WheelEffect> {
        self.ticket = SettleTicket(self.ticket.0 + 1);
        self.phase = WheelPhase::Idle;
        match phase {
            WheelPhase::Idle => vec![],
            WheelPhase::Scrolling | WheelPhase::Settling => vec![WheelEffect::CancelSettle],
        }
    }

    fn commit(&mut self, index: usize) {
        self.committed_index = index;
        self.current_index = index;
        self.last_offset = self.offset_of(index);
    }

    fn resolve_requested(&self) -> usize {
        self.values
            .iter()
            .position(|value| *value == self.requested)
            .unwrap_or(self.default_index)
    }
}
