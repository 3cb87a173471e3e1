//! Dropdown (action menu) control.
//!
//! A [`Dropdown`] opens a list of actions next to its anchor. Activating an
//! enabled item emits [`Dropdown::activated`] with the item's value and closes
//! the menu. It keeps no selection and has no search field.

use std::time::{Duration, Instant};

use horizon_anchor_core::logging::targets;
use horizon_anchor_core::{ListenerRegistry, Signal};

use crate::config::SurfaceOptions;
use crate::widget::accessibility::AccessibilityState;
use crate::widget::events::InputEvent;
use crate::widget::interaction::{InteractionEvent, InteractionState, Trigger};
use crate::widget::item::Item;
use crate::widget::placement::PlacementResult;
use crate::widget::surface::{AnchoredSurface, Dispatch};

/// An action menu anchored to a trigger.
pub struct Dropdown<V> {
    items: Vec<Item<V>>,
    surface: AnchoredSurface,
    /// Emitted once with the value of each activated item.
    pub activated: Signal<V>,
}

impl<V: Clone + 'static> Dropdown<V> {
    pub fn new(trigger: Trigger) -> Self {
        Self::from_options(&SurfaceOptions {
            trigger,
            ..SurfaceOptions::default()
        })
    }

    /// Create a dropdown configured by `options`. Search and selection mode are ignored.
    pub fn from_options(options: &SurfaceOptions) -> Self {
        let mut dropdown = Self {
            items: Vec::new(),
            surface: options.build_surface().with_text_input(false),
            activated: Signal::new(),
        };
        dropdown.surface.set_disabled(options.disabled);
        dropdown
    }

    #[must_use]
    pub fn with_items(mut self, items: Vec<Item<V>>) -> Self {
        self.set_items(items);
        self
    }

    #[must_use]
    pub fn with_listener_registry(mut self, registry: ListenerRegistry) -> Self {
        self.surface = self.surface.with_listener_registry(registry);
        self
    }

    pub fn items(&self) -> &[Item<V>] {
        &self.items
    }

    pub fn set_items(&mut self, items: Vec<Item<V>>) {
        self.surface.set_visible((0..items.len()).collect());
        self.items = items;
    }

    pub fn state(&self) -> InteractionState {
        self.surface.state()
    }

    pub fn is_open(&self) -> bool {
        self.surface.is_open()
    }

    pub fn is_disabled(&self) -> bool {
        self.surface.machine().is_disabled()
    }

    pub fn surface(&self) -> &AnchoredSurface {
        &self.surface
    }

    pub fn placement(&self) -> Option<PlacementResult> {
        self.surface.placement()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.surface.highlighted()
    }

    pub fn highlighted_item(&self) -> Option<&Item<V>> {
        self.surface.highlighted_item().and_then(|i| self.items.get(i))
    }

    pub fn open_changed(&self) -> &Signal<bool> {
        self.surface.open_changed()
    }

    pub fn focus_requested(&self) -> &Signal<()> {
        &self.surface.focus_requested
    }

    pub fn accessibility(&self) -> AccessibilityState {
        AccessibilityState {
            expanded: self.is_open(),
            active_descendant: self.highlighted_item().map(|item| item.key.clone()),
            selected_keys: Vec::new(),
            disabled: self.is_disabled(),
        }
    }

    pub fn open(&mut self) -> bool {
        self.surface.open().is_some()
    }

    pub fn close(&mut self) -> bool {
        self.surface.close().is_some()
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.surface.set_disabled(disabled);
    }

    pub fn advance(&mut self, now: Instant) -> bool {
        self.surface.advance(now).is_some()
    }

    pub fn next_deadline(&mut self, now: Instant) -> Option<Duration> {
        self.surface.next_deadline(now)
    }

    /// Handle an input event. Returns `true` if it was consumed.
    pub fn handle_event(&mut self, event: &InputEvent, now: Instant) -> bool {
        let items = &self.items;
        let dispatch = self
            .surface
            .dispatch(event, now, &|i| items.get(i).is_some_and(|item| item.disabled));

        match dispatch {
            Dispatch::Ignored => false,
            Dispatch::Activate(row) => {
                self.activate(row, now);
                true
            }
            // No text input: these never arrive.
            Dispatch::Text(_) | Dispatch::Backspace => false,
            Dispatch::Handled | Dispatch::Transition(_) => true,
        }
    }

    fn activate(&mut self, row: usize, now: Instant) {
        let Some(item) = self.surface.visible().get(row).and_then(|&i| self.items.get(i)) else {
            return;
        };
        if item.disabled {
            tracing::trace!(target: targets::CONTROL, key = %item.key, "activation on disabled item ignored");
            return;
        }

        let value = item.value.clone();
        tracing::debug!(target: targets::CONTROL, key = %item.key, "dropdown item activated");
        self.activated.emit(value);
        self.surface.interact(InteractionEvent::ItemCommitted { close: true }, now);
    }
}

impl<V> std::fmt::Debug for Dropdown<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropdown")
            .field("items", &self.items.len())
            .field("surface", &self.surface)
            .finish()
    }
}

static_assertions::assert_impl_all!(Dropdown<String>: Send, Sync);
