//! Open/closed lifecycle of one anchor + surface pair.
//!
//! [`InteractionMachine`] turns pointer, hover, and keyboard events into
//! `Closed <-> Open` transitions. It owns everything whose lifetime is tied
//! to the open state:
//!
//! - the hover-close grace timer (a cancellable [`TimerId`] in its own
//!   [`TimerQueue`]), and
//! - the document-level listener registrations ([`ListenerGuard`]s) for
//!   outside-pointer dismissal and repositioning.
//!
//! Both are released on every path out of `Open`: close, disable, and drop.
//!
//! The machine never reads a clock. Callers pass `now` with each event and
//! call [`InteractionMachine::advance`] when [`InteractionMachine::next_deadline`]
//! says a timer is due.

use std::time::{Duration, Instant};

use horizon_anchor_core::logging::targets;
use horizon_anchor_core::{ListenerGuard, ListenerKind, ListenerRegistry, OwnerId, Signal, TimerId, TimerQueue};
use serde::{Deserialize, Serialize};

use super::events::HoverRegion;

/// Default delay before a hover-triggered surface closes after the pointer leaves.
pub const DEFAULT_HOVER_CLOSE_DELAY: Duration = Duration::from_millis(200);

/// Open/closed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    #[default]
    Closed,
    Open,
}

/// What opens the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trigger {
    /// Clicking the anchor toggles the surface.
    #[default]
    Click,
    /// Hovering the anchor opens it; leaving anchor and surface closes it after a grace period.
    Hover,
}

/// Why the surface opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenReason {
    AnchorActivated,
    HoverEntered,
    Keyboard,
    Programmatic,
}

/// Why the surface closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    AnchorToggled,
    HoverGraceElapsed,
    OutsidePointer,
    Escape,
    ItemCommitted,
    Disabled,
    FocusLost,
    Programmatic,
}

impl CloseReason {
    /// Whether keyboard focus should go back to the anchor.
    pub fn returns_focus(self) -> bool {
        matches!(self, Self::Escape | Self::ItemCommitted)
    }
}

/// A state change produced by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Opened(OpenReason),
    Closed(CloseReason),
}

/// Semantic events the machine reacts to.
///
/// Controls derive these from raw input after hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionEvent {
    /// Anchor clicked.
    AnchorActivated,
    /// Pointer entered the anchor or the surface.
    HoverEnter(HoverRegion),
    /// Pointer left the anchor or the surface.
    HoverLeave(HoverRegion),
    /// An opening key (arrow, Enter, Space) pressed on the closed anchor.
    OpenKey,
    /// Pointer pressed outside both anchor and surface.
    OutsidePointerDown,
    /// Escape pressed.
    Escape,
    /// An item was committed; `close` is the selection model's verdict.
    ItemCommitted { close: bool },
    /// Focus left the control.
    FocusLost,
}

/// The open/closed state machine for one control.
pub struct InteractionMachine {
    state: InteractionState,
    trigger: Trigger,
    disabled: bool,
    hover_close_delay: Duration,
    timers: TimerQueue,
    pending_close: Option<TimerId>,
    hovering_anchor: bool,
    hovering_surface: bool,
    owner: OwnerId,
    registry: Option<ListenerRegistry>,
    guards: Vec<ListenerGuard>,
    /// Emitted with the new open state on every transition.
    pub open_changed: Signal<bool>,
}

impl Default for InteractionMachine {
    fn default() -> Self {
        Self::new(Trigger::default())
    }
}

impl InteractionMachine {
    /// Create a closed machine.
    pub fn new(trigger: Trigger) -> Self {
        Self {
            state: InteractionState::Closed,
            trigger,
            disabled: false,
            hover_close_delay: DEFAULT_HOVER_CLOSE_DELAY,
            timers: TimerQueue::new(),
            pending_close: None,
            hovering_anchor: false,
            hovering_surface: false,
            owner: OwnerId::next(),
            registry: None,
            guards: Vec::new(),
            open_changed: Signal::new(),
        }
    }

    /// Register document listeners in `registry` while open.
    #[must_use]
    pub fn with_listener_registry(mut self, registry: ListenerRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn with_hover_close_delay(mut self, delay: Duration) -> Self {
        self.hover_close_delay = delay;
        self
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == InteractionState::Open
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn hover_close_delay(&self) -> Duration {
        self.hover_close_delay
    }

    /// The ID under which this machine registers document listeners.
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Whether a hover-close is scheduled.
    pub fn is_close_pending(&self) -> bool {
        self.pending_close.is_some()
    }

    /// Number of document listeners currently held.
    pub fn listener_count(&self) -> usize {
        self.guards.len()
    }

    /// Time until [`advance`](Self::advance) has work to do.
    pub fn next_deadline(&mut self, now: Instant) -> Option<Duration> {
        self.timers.time_until_next(now)
    }

    /// Enable or disable the control. Disabling closes an open surface.
    pub fn set_disabled(&mut self, disabled: bool) -> Option<Transition> {
        self.disabled = disabled;
        if disabled {
            self.close(CloseReason::Disabled)
        } else {
            None
        }
    }

    /// Feed one event.
    pub fn handle(&mut self, event: InteractionEvent, now: Instant) -> Option<Transition> {
        match event {
            InteractionEvent::AnchorActivated => match (self.state, self.trigger) {
                (InteractionState::Closed, _) => self.open(OpenReason::AnchorActivated),
                (InteractionState::Open, Trigger::Click) => self.close(CloseReason::AnchorToggled),
                (InteractionState::Open, Trigger::Hover) => None,
            },
            InteractionEvent::HoverEnter(HoverRegion::Surface) if !self.is_open() => None,
            InteractionEvent::HoverEnter(region) => {
                self.set_hovering(region, true);
                self.cancel_pending_close();
                if self.trigger == Trigger::Hover && region == HoverRegion::Anchor {
                    self.open(OpenReason::HoverEntered)
                } else {
                    None
                }
            }
            InteractionEvent::HoverLeave(region) => {
                self.set_hovering(region, false);
                if self.trigger == Trigger::Hover
                    && self.is_open()
                    && !self.hovering_anchor
                    && !self.hovering_surface
                    && self.pending_close.is_none()
                {
                    let id = self.timers.start_one_shot(now, self.hover_close_delay);
                    self.pending_close = Some(id);
                    tracing::debug!(target: targets::INTERACTION, owner = %self.owner, "hover close scheduled");
                }
                None
            }
            InteractionEvent::OpenKey => self.open(OpenReason::Keyboard),
            InteractionEvent::OutsidePointerDown => self.close(CloseReason::OutsidePointer),
            InteractionEvent::Escape => self.close(CloseReason::Escape),
            InteractionEvent::ItemCommitted { close: true } => self.close(CloseReason::ItemCommitted),
            InteractionEvent::ItemCommitted { close: false } => None,
            InteractionEvent::FocusLost => self.close(CloseReason::FocusLost),
        }
    }

    /// Fire due timers.
    pub fn advance(&mut self, now: Instant) -> Option<Transition> {
        let fired = self.timers.process_expired(now);
        match self.pending_close {
            Some(id) if fired.contains(&id) => {
                self.pending_close = None;
                self.close(CloseReason::HoverGraceElapsed)
            }
            _ => None,
        }
    }

    /// Open the surface. No-op when already open or disabled.
    pub fn open(&mut self, reason: OpenReason) -> Option<Transition> {
        if self.is_open() || self.disabled {
            return None;
        }

        self.state = InteractionState::Open;
        if let Some(registry) = &self.registry {
            self.guards = vec![
                registry.add(ListenerKind::OutsidePointer, self.owner),
                registry.add(ListenerKind::Reposition, self.owner),
            ];
        }
        tracing::debug!(target: targets::INTERACTION, owner = %self.owner, ?reason, "surface opened");
        self.open_changed.emit(true);
        Some(Transition::Opened(reason))
    }

    /// Close the surface. No-op when already closed.
    pub fn close(&mut self, reason: CloseReason) -> Option<Transition> {
        if !self.is_open() {
            return None;
        }

        self.state = InteractionState::Closed;
        // The surface is unmounted, so no leave event will follow.
        self.hovering_surface = false;
        self.cancel_pending_close();
        self.guards.clear();
        tracing::debug!(target: targets::INTERACTION, owner = %self.owner, ?reason, "surface closed");
        self.open_changed.emit(false);
        Some(Transition::Closed(reason))
    }

    fn set_hovering(&mut self, region: HoverRegion, hovering: bool) {
        match region {
            HoverRegion::Anchor => self.hovering_anchor = hovering,
            HoverRegion::Surface => self.hovering_surface = hovering,
        }
    }

    fn cancel_pending_close(&mut self) {
        if let Some(id) = self.pending_close.take() {
            let _ = self.timers.stop(id);
            tracing::debug!(target: targets::INTERACTION, owner = %self.owner, "hover close cancelled");
        }
    }
}

impl std::fmt::Debug for InteractionMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionMachine")
            .field("state", &self.state)
            .field("trigger", &self.trigger)
            .field("disabled", &self.disabled)
            .field("pending_close", &self.pending_close.is_some())
            .field("listeners", &self.guards.len())
            .finish()
    }
}
