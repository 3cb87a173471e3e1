//! The anchored selectable surface shared by Select and Dropdown.
//!
//! [`AnchoredSurface`] glues together the pieces every floating list needs:
//!
//! - the [`InteractionMachine`] deciding when the surface is open,
//! - the [`HighlightCursor`] over the visible rows,
//! - the geometry (anchor, surface, viewport, scroll) and the last
//!   [`PlacementResult`], recomputed whenever any of them changes while open,
//! - hit testing of pointer positions against anchor, rows, and surface.
//!
//! It deals in row indices only. The owning control keeps the items and
//! decides what activating a row means (commit a value, run a command).
//! Raw [`InputEvent`]s go through [`AnchoredSurface::dispatch`], which handles
//! everything generic and returns a [`Dispatch`] for the rest.

use std::time::{Duration, Instant};

use horizon_anchor_core::logging::targets;
use horizon_anchor_core::{ListenerRegistry, OwnerId, Signal};

use super::events::{InputEvent, Key, KeyPressEvent, PointerButton};
use super::highlight::{Direction, HighlightCursor};
use super::interaction::{
    CloseReason, InteractionEvent, InteractionMachine, InteractionState, OpenReason, Transition,
    Trigger,
};
use super::placement::{compute_placement, PlacementRequest, PlacementResult};
use crate::geometry::{Point, Rect, Size};

/// Default height of one row in the surface.
pub const DEFAULT_ROW_HEIGHT: f32 = 32.0;

/// Default number of rows shown before the surface scrolls.
pub const DEFAULT_MAX_VISIBLE_ROWS: usize = 8;

/// Region of the control under a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfacePart {
    /// The anchor (trigger).
    Anchor,
    /// A visible row, by visual index.
    Row(usize),
    /// Inside the surface but not on a row (padding, empty list).
    Surface,
    /// Neither anchor nor surface.
    Outside,
}

/// What [`AnchoredSurface::dispatch`] made of an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Not relevant to this control.
    Ignored,
    /// Consumed; nothing further for the control to do.
    Handled,
    /// The surface opened or closed.
    Transition(Transition),
    /// A visible row was activated by click, Enter, or Space.
    Activate(usize),
    /// Text typed while search input is enabled.
    Text(String),
    /// Backspace pressed while search input is enabled.
    Backspace,
}

/// Shared open/highlight/placement state of one anchored surface.
pub struct AnchoredSurface {
    machine: InteractionMachine,
    cursor: HighlightCursor,
    /// Item indices of the visible rows, in display order.
    visible: Vec<usize>,
    request: PlacementRequest,
    anchor_rect: Option<Rect>,
    measured_size: Option<Size>,
    viewport: Size,
    scroll: Point,
    placement: Option<PlacementResult>,
    row_height: f32,
    max_visible_rows: usize,
    /// First row shown when the list is longer than the surface.
    scroll_offset: usize,
    /// Route typed text to the owner instead of treating Space as activation.
    text_input: bool,
    /// Emitted when keyboard focus should return to the anchor.
    pub focus_requested: Signal<()>,
}

impl AnchoredSurface {
    /// Create a closed surface.
    pub fn new(trigger: Trigger) -> Self {
        Self {
            machine: InteractionMachine::new(trigger),
            cursor: HighlightCursor::new(),
            visible: Vec::new(),
            request: PlacementRequest::default(),
            anchor_rect: None,
            measured_size: None,
            viewport: Size::ZERO,
            scroll: Point::ZERO,
            placement: None,
            row_height: DEFAULT_ROW_HEIGHT,
            max_visible_rows: DEFAULT_MAX_VISIBLE_ROWS,
            scroll_offset: 0,
            text_input: false,
            focus_requested: Signal::new(),
        }
    }

    #[must_use]
    pub fn with_placement_request(mut self, request: PlacementRequest) -> Self {
        self.request = request;
        self
    }

    #[must_use]
    pub fn with_listener_registry(mut self, registry: ListenerRegistry) -> Self {
        self.machine = self.machine.with_listener_registry(registry);
        self
    }

    #[must_use]
    pub fn with_hover_close_delay(mut self, delay: Duration) -> Self {
        self.machine = self.machine.with_hover_close_delay(delay);
        self
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: HighlightCursor) -> Self {
        self.cursor = cursor;
        self
    }

    #[must_use]
    pub fn with_row_height(mut self, height: f32) -> Self {
        self.row_height = height;
        self
    }

    #[must_use]
    pub fn with_max_visible_rows(mut self, rows: usize) -> Self {
        self.max_visible_rows = rows.max(1);
        self
    }

    #[must_use]
    pub fn with_text_input(mut self, enabled: bool) -> Self {
        self.text_input = enabled;
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_anchor_rect(mut self, rect: Rect) -> Self {
        self.anchor_rect = Some(rect);
        self
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn state(&self) -> InteractionState {
        self.machine.state()
    }

    pub fn is_open(&self) -> bool {
        self.machine.is_open()
    }

    /// The surface exists exactly while open.
    pub fn is_surface_mounted(&self) -> bool {
        self.machine.is_open()
    }

    pub fn machine(&self) -> &InteractionMachine {
        &self.machine
    }

    pub fn owner(&self) -> OwnerId {
        self.machine.owner()
    }

    pub fn open_changed(&self) -> &Signal<bool> {
        &self.machine.open_changed
    }

    /// Highlighted visible row.
    pub fn highlighted(&self) -> Option<usize> {
        self.cursor.index()
    }

    /// Item index of the highlighted row.
    pub fn highlighted_item(&self) -> Option<usize> {
        self.cursor.index().and_then(|row| self.visible.get(row).copied())
    }

    /// Item indices of the visible rows.
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// First row currently scrolled into view.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn placement_request(&self) -> &PlacementRequest {
        &self.request
    }

    /// Last computed placement. `None` while closed or before geometry is known.
    pub fn placement(&self) -> Option<PlacementResult> {
        self.placement
    }

    /// The surface size: measured if known, otherwise estimated from the rows.
    pub fn surface_size(&self) -> Option<Size> {
        if let Some(size) = self.measured_size {
            return Some(size);
        }
        let anchor = self.anchor_rect?;
        let rows = self.visible.len().min(self.max_visible_rows);
        Some(Size::new(anchor.width(), rows as f32 * self.row_height))
    }

    /// The surface rectangle at its current placement.
    pub fn surface_rect(&self) -> Option<Rect> {
        let placement = self.placement?;
        Some(placement.rect(self.surface_size()?))
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Replace the visible rows. Clears the highlight.
    pub fn set_visible(&mut self, visible: Vec<usize>) {
        self.visible = visible;
        self.cursor.reset();
        self.scroll_offset = 0;
        if self.is_open() && self.measured_size.is_none() {
            self.reposition();
        }
    }

    /// Move the highlight. `item_disabled` reports whether an item index is disabled.
    pub fn move_highlight(
        &mut self,
        direction: Direction,
        item_disabled: &dyn Fn(usize) -> bool,
    ) -> Option<usize> {
        let visible = &self.visible;
        let index = self
            .cursor
            .move_by(direction, visible.len(), |row| item_disabled(visible[row]));
        self.ensure_highlighted_visible();
        index
    }

    /// Highlight a row directly (pointer hover).
    pub fn set_highlight(&mut self, row: usize) -> Option<usize> {
        let index = self.cursor.set(row, self.visible.len());
        self.ensure_highlighted_visible();
        index
    }

    fn ensure_highlighted_visible(&mut self) {
        let Some(row) = self.cursor.index() else {
            return;
        };
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + self.max_visible_rows {
            self.scroll_offset = row + 1 - self.max_visible_rows;
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn set_anchor_rect(&mut self, rect: Option<Rect>) {
        self.anchor_rect = rect;
        self.reposition();
    }

    pub fn set_surface_size(&mut self, size: Option<Size>) {
        self.measured_size = size;
        self.reposition();
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.reposition();
    }

    pub fn set_scroll(&mut self, scroll: Point) {
        self.scroll = scroll;
        self.reposition();
    }

    /// Recompute the placement if open.
    ///
    /// When geometry is unavailable the previous placement is kept.
    pub fn reposition(&mut self) -> Option<PlacementResult> {
        if !self.is_open() {
            return None;
        }
        if let Some(result) = compute_placement(
            self.anchor_rect,
            self.surface_size(),
            &self.request,
            self.viewport,
            self.scroll,
        ) {
            self.placement = Some(result);
        } else {
            tracing::trace!(target: targets::PLACEMENT, owner = %self.owner(), "keeping previous placement");
        }
        self.placement
    }

    /// Which part of the control is under `position`.
    pub fn hit_test(&self, position: Point) -> SurfacePart {
        if self.anchor_rect.is_some_and(|r| r.contains(position)) {
            return SurfacePart::Anchor;
        }

        let Some(surface) = self.surface_rect().filter(|_| self.is_open()) else {
            return SurfacePart::Outside;
        };
        if !surface.contains(position) {
            return SurfacePart::Outside;
        }

        if self.row_height > 0.0 {
            let row = ((position.y - surface.top()) / self.row_height) as usize + self.scroll_offset;
            if row < self.visible.len() {
                return SurfacePart::Row(row);
            }
        }
        SurfacePart::Surface
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Open programmatically.
    pub fn open(&mut self) -> Option<Transition> {
        let transition = self.machine.open(OpenReason::Programmatic);
        self.after(transition)
    }

    /// Close programmatically.
    pub fn close(&mut self) -> Option<Transition> {
        let transition = self.machine.close(CloseReason::Programmatic);
        self.after(transition)
    }

    /// Feed a semantic interaction event.
    pub fn interact(&mut self, event: InteractionEvent, now: Instant) -> Option<Transition> {
        let transition = self.machine.handle(event, now);
        self.after(transition)
    }

    /// Fire due timers (hover-close grace period).
    pub fn advance(&mut self, now: Instant) -> Option<Transition> {
        let transition = self.machine.advance(now);
        self.after(transition)
    }

    /// Time until [`advance`](Self::advance) has work to do.
    pub fn next_deadline(&mut self, now: Instant) -> Option<Duration> {
        self.machine.next_deadline(now)
    }

    pub fn set_disabled(&mut self, disabled: bool) -> Option<Transition> {
        let transition = self.machine.set_disabled(disabled);
        self.after(transition)
    }

    fn after(&mut self, transition: Option<Transition>) -> Option<Transition> {
        match transition {
            Some(Transition::Opened(_)) => {
                self.cursor.reset();
                self.scroll_offset = 0;
                self.reposition();
            }
            Some(Transition::Closed(reason)) => {
                self.cursor.reset();
                self.scroll_offset = 0;
                self.placement = None;
                self.measured_size = None;
                if reason.returns_focus() {
                    self.focus_requested.emit(());
                }
            }
            None => {}
        }
        transition
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Route a raw input event.
    ///
    /// `item_disabled` reports whether an item index is disabled (used when
    /// the cursor skips disabled rows).
    pub fn dispatch(
        &mut self,
        event: &InputEvent,
        now: Instant,
        item_disabled: &dyn Fn(usize) -> bool,
    ) -> Dispatch {
        match event {
            InputEvent::PointerDown { position, button } => {
                match (self.hit_test(*position), button) {
                    (SurfacePart::Outside, _) => self.transition(InteractionEvent::OutsidePointerDown, now),
                    (SurfacePart::Anchor, PointerButton::Primary) => {
                        self.transition(InteractionEvent::AnchorActivated, now)
                    }
                    (SurfacePart::Row(row), PointerButton::Primary) => Dispatch::Activate(row),
                    _ => Dispatch::Handled,
                }
            }
            InputEvent::PointerMove { position } => match self.hit_test(*position) {
                SurfacePart::Row(row) if self.cursor.index() != Some(row) => {
                    self.set_highlight(row);
                    Dispatch::Handled
                }
                _ => Dispatch::Ignored,
            },
            InputEvent::HoverEnter(region) => {
                self.transition_or_handled(InteractionEvent::HoverEnter(*region), now)
            }
            InputEvent::HoverLeave(region) => {
                self.transition_or_handled(InteractionEvent::HoverLeave(*region), now)
            }
            InputEvent::KeyPress(key) => self.dispatch_key(key, now, item_disabled),
            InputEvent::FocusOut => self.transition(InteractionEvent::FocusLost, now),
            InputEvent::AnchorGeometry(rect) => {
                self.set_anchor_rect(*rect);
                Dispatch::Handled
            }
            InputEvent::SurfaceGeometry(size) => {
                self.set_surface_size(*size);
                Dispatch::Handled
            }
            InputEvent::ViewportResize(size) => {
                self.set_viewport(*size);
                Dispatch::Handled
            }
            InputEvent::Scroll(offset) => {
                self.set_scroll(*offset);
                Dispatch::Handled
            }
        }
    }

    fn dispatch_key(
        &mut self,
        event: &KeyPressEvent,
        now: Instant,
        item_disabled: &dyn Fn(usize) -> bool,
    ) -> Dispatch {
        if !self.is_open() {
            return match event.key {
                Key::ArrowDown | Key::ArrowUp | Key::Enter => {
                    self.transition(InteractionEvent::OpenKey, now)
                }
                Key::Space if !self.text_input => self.transition(InteractionEvent::OpenKey, now),
                Key::Backspace if self.text_input => Dispatch::Backspace,
                _ => self.typed_text(event),
            };
        }

        let direction = match event.key {
            Key::ArrowDown => Some(Direction::Next),
            Key::ArrowUp => Some(Direction::Previous),
            Key::Home => Some(Direction::First),
            Key::End => Some(Direction::Last),
            Key::PageDown => Some(Direction::PageNext),
            Key::PageUp => Some(Direction::PagePrevious),
            _ => None,
        };
        if let Some(direction) = direction {
            self.move_highlight(direction, item_disabled);
            return Dispatch::Handled;
        }

        match event.key {
            Key::Escape => self.transition(InteractionEvent::Escape, now),
            Key::Enter => match self.cursor.index() {
                Some(row) => Dispatch::Activate(row),
                None => Dispatch::Handled,
            },
            Key::Space if !self.text_input => match self.cursor.index() {
                Some(row) => Dispatch::Activate(row),
                None => Dispatch::Handled,
            },
            Key::Backspace if self.text_input => Dispatch::Backspace,
            _ => self.typed_text(event),
        }
    }

    fn typed_text(&self, event: &KeyPressEvent) -> Dispatch {
        let printable = !event.text.is_empty()
            && !event.modifiers.control
            && !event.modifiers.meta
            && !event.text.chars().any(char::is_control);
        if self.text_input && printable {
            Dispatch::Text(event.text.clone())
        } else {
            Dispatch::Ignored
        }
    }

    fn transition(&mut self, event: InteractionEvent, now: Instant) -> Dispatch {
        match self.interact(event, now) {
            Some(transition) => Dispatch::Transition(transition),
            None => Dispatch::Ignored,
        }
    }

    fn transition_or_handled(&mut self, event: InteractionEvent, now: Instant) -> Dispatch {
        match self.transition(event, now) {
            Dispatch::Ignored => Dispatch::Handled,
            other => other,
        }
    }
}

impl std::fmt::Debug for AnchoredSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnchoredSurface")
            .field("machine", &self.machine)
            .field("highlighted", &self.cursor.index())
            .field("visible", &self.visible.len())
            .field("placement", &self.placement)
            .finish()
    }
}

static_assertions::assert_impl_all!(AnchoredSurface: Send, Sync);
