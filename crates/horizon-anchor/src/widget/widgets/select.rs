//! Select (combobox) control.
//!
//! A [`Select`] shows a list of [`Item`]s in an anchored surface and commits
//! one value (single mode) or toggles a set of values (multiple mode). With
//! search enabled, typing filters the list.
//!
//! Everything is driven through [`Select::handle_event`]; time only advances
//! through the `now` passed with each event and [`Select::advance`].
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use horizon_anchor::geometry::{Rect, Size};
//! use horizon_anchor::widget::events::{InputEvent, Key};
//! use horizon_anchor::widget::item::Item;
//! use horizon_anchor::widget::selection::{Selection, SelectionMode};
//! use horizon_anchor::widget::widgets::Select;
//!
//! let mut select = Select::new(SelectionMode::Single).with_items(vec![
//!     Item::new("fr", "France", "fr"),
//!     Item::new("de", "Germany", "de"),
//! ]);
//! select.changed().connect(|value| println!("changed: {value:?}"));
//!
//! let now = Instant::now();
//! select.handle_event(&InputEvent::ViewportResize(Size::new(800.0, 600.0)), now);
//! select.handle_event(&InputEvent::AnchorGeometry(Some(Rect::new(10.0, 10.0, 160.0, 32.0))), now);
//! select.handle_event(&InputEvent::key(Key::ArrowDown), now);
//! select.handle_event(&InputEvent::key(Key::ArrowDown), now);
//! select.handle_event(&InputEvent::key(Key::Enter), now);
//!
//! assert_eq!(select.selected(), &Selection::Single(Some("fr")));
//! assert!(!select.is_open());
//! ```

use std::time::{Duration, Instant};

use horizon_anchor_core::logging::targets;
use horizon_anchor_core::{ListenerRegistry, Signal};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::SurfaceOptions;
use crate::widget::accessibility::AccessibilityState;
use crate::widget::events::InputEvent;
use crate::widget::filter::{filter_items, FilterPredicate};
use crate::widget::interaction::{InteractionEvent, InteractionState, Transition};
use crate::widget::item::Item;
use crate::widget::placement::PlacementResult;
use crate::widget::selection::{CommitOutcome, Selection, SelectionMode, SelectionModel, ValueOwnership};
use crate::widget::surface::{AnchoredSurface, Dispatch};

/// A single- or multi-value select with optional search.
pub struct Select<V> {
    items: Vec<Item<V>>,
    selection: SelectionModel<V>,
    surface: AnchoredSurface,
    allow_search: bool,
    filter: FilterPredicate<V>,
    query: String,
    placeholder: String,
    /// Emitted with the new query whenever it changes, including the reset on open/close.
    pub query_changed: Signal<String>,
}

impl<V: Clone + PartialEq + 'static> Select<V> {
    /// Create an empty select with default options.
    pub fn new(mode: SelectionMode) -> Self {
        Self::from_options(&SurfaceOptions {
            mode,
            ..SurfaceOptions::default()
        })
    }

    /// Create an empty select configured by `options`.
    pub fn from_options(options: &SurfaceOptions) -> Self {
        let mut select = Self {
            items: Vec::new(),
            selection: SelectionModel::new(options.mode),
            surface: options.build_surface(),
            allow_search: options.allow_search,
            filter: FilterPredicate::default(),
            query: String::new(),
            placeholder: String::new(),
            query_changed: Signal::new(),
        };
        select.surface.set_disabled(options.disabled);
        select
    }

    // =========================================================================
    // Builders
    // =========================================================================

    #[must_use]
    pub fn with_items(mut self, items: Vec<Item<V>>) -> Self {
        self.set_items(items);
        self
    }

    /// Make the value controlled.
    #[must_use]
    pub fn with_value(mut self, value: Selection<V>) -> Self {
        self.selection.set_value(value);
        self
    }

    /// Seed the uncontrolled value.
    #[must_use]
    pub fn with_default_value(mut self, value: Selection<V>) -> Self {
        self.selection = self.selection.with_default_value(value);
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: FilterPredicate<V>) -> Self {
        self.filter = filter;
        self.refilter();
        self
    }

    #[must_use]
    pub fn with_search(mut self, enabled: bool) -> Self {
        self.allow_search = enabled;
        self.surface = self.surface.with_text_input(enabled);
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    #[must_use]
    pub fn with_listener_registry(mut self, registry: ListenerRegistry) -> Self {
        self.surface = self.surface.with_listener_registry(registry);
        self
    }

    // =========================================================================
    // Items and Value
    // =========================================================================

    pub fn items(&self) -> &[Item<V>] {
        &self.items
    }

    /// Replace the items. Recomputes the visible rows and clears the highlight.
    pub fn set_items(&mut self, items: Vec<Item<V>>) {
        self.items = items;
        self.refilter();
    }

    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    /// The authoritative value.
    pub fn selected(&self) -> &Selection<V> {
        self.selection.selected()
    }

    /// Items whose value is selected, in item-list order.
    pub fn selected_items(&self) -> Vec<&Item<V>> {
        self.items
            .iter()
            .filter(|item| self.selection.is_selected(&item.value))
            .collect()
    }

    /// Labels of the selected items, or the placeholder when nothing is selected.
    pub fn display_text(&self) -> String {
        let labels: Vec<&str> = self
            .selected_items()
            .into_iter()
            .map(|item| item.label.as_str())
            .collect();
        if labels.is_empty() {
            self.placeholder.clone()
        } else {
            labels.join(", ")
        }
    }

    /// Supply or update the controlled value.
    pub fn set_value(&mut self, value: Selection<V>) {
        self.selection.set_value(value);
    }

    pub fn set_ownership(&mut self, ownership: ValueOwnership<V>) {
        self.selection.set_ownership(ownership);
    }

    pub fn is_controlled(&self) -> bool {
        self.selection.is_controlled()
    }

    /// Clear the value. Emits `changed` once if anything was selected.
    pub fn clear(&mut self) -> bool {
        self.selection.clear()
    }

    /// Emitted once per commit with the new value.
    pub fn changed(&self) -> &Signal<Selection<V>> {
        &self.selection.changed
    }

    // =========================================================================
    // Surface State
    // =========================================================================

    pub fn state(&self) -> InteractionState {
        self.surface.state()
    }

    pub fn is_open(&self) -> bool {
        self.surface.is_open()
    }

    pub fn is_disabled(&self) -> bool {
        self.surface.machine().is_disabled()
    }

    pub fn allows_search(&self) -> bool {
        self.allow_search
    }

    pub fn surface(&self) -> &AnchoredSurface {
        &self.surface
    }

    pub fn placement(&self) -> Option<PlacementResult> {
        self.surface.placement()
    }

    /// Items currently shown, in display order.
    pub fn visible_items(&self) -> Vec<&Item<V>> {
        self.surface
            .visible()
            .iter()
            .filter_map(|&i| self.items.get(i))
            .collect()
    }

    /// Highlighted row, as an index into [`visible_items`](Self::visible_items).
    pub fn highlighted(&self) -> Option<usize> {
        self.surface.highlighted()
    }

    pub fn highlighted_item(&self) -> Option<&Item<V>> {
        self.surface.highlighted_item().and_then(|i| self.items.get(i))
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn open_changed(&self) -> &Signal<bool> {
        self.surface.open_changed()
    }

    /// Emitted when keyboard focus should return to the anchor.
    pub fn focus_requested(&self) -> &Signal<()> {
        &self.surface.focus_requested
    }

    pub fn accessibility(&self) -> AccessibilityState {
        AccessibilityState {
            expanded: self.is_open(),
            active_descendant: self.highlighted_item().map(|item| item.key.clone()),
            selected_keys: self
                .selected_items()
                .into_iter()
                .map(|item| item.key.clone())
                .collect(),
            disabled: self.is_disabled(),
        }
    }

    // =========================================================================
    // Control
    // =========================================================================

    pub fn open(&mut self) -> bool {
        let transition = self.surface.open();
        self.apply(transition)
    }

    pub fn close(&mut self) -> bool {
        let transition = self.surface.close();
        self.apply(transition)
    }

    /// Enable or disable the control. Disabling closes it.
    pub fn set_disabled(&mut self, disabled: bool) {
        let transition = self.surface.set_disabled(disabled);
        self.apply(transition);
    }

    /// Replace the search query. Ignored when search is disabled.
    ///
    /// A non-empty query opens a closed surface first, as typing does. An
    /// empty query on a closed surface is a no-op.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if !self.allow_search || (query.is_empty() && !self.is_open()) {
            return false;
        }
        if !self.is_open() && !self.open() {
            return false;
        }
        self.replace_query(query)
    }

    /// Fire due timers.
    pub fn advance(&mut self, now: Instant) -> bool {
        let transition = self.surface.advance(now);
        self.apply(transition)
    }

    /// Time until [`advance`](Self::advance) has work to do.
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
            Dispatch::Handled => true,
            Dispatch::Transition(transition) => {
                self.apply(Some(transition));
                true
            }
            Dispatch::Activate(row) => {
                self.activate(row, now);
                true
            }
            Dispatch::Text(text) => {
                if !self.is_open() {
                    let transition = self.surface.interact(InteractionEvent::OpenKey, now);
                    self.apply(transition);
                    if !self.is_open() {
                        return false;
                    }
                }
                let mut query = self.query.clone();
                query.push_str(&text);
                self.replace_query(query);
                true
            }
            Dispatch::Backspace => {
                let mut query = self.query.clone();
                if let Some((start, _)) = query.grapheme_indices(true).next_back() {
                    query.truncate(start);
                    self.replace_query(query);
                }
                true
            }
        }
    }

    fn activate(&mut self, row: usize, now: Instant) {
        let Some(item) = self.surface.visible().get(row).and_then(|&i| self.items.get(i)) else {
            return;
        };
        if let CommitOutcome::Committed { close } = self.selection.commit(item, &self.items) {
            let transition = self.surface.interact(InteractionEvent::ItemCommitted { close }, now);
            self.apply(transition);
        }
    }

    /// Reset the query on every open and close.
    fn apply(&mut self, transition: Option<Transition>) -> bool {
        let Some(transition) = transition else {
            return false;
        };
        tracing::trace!(target: targets::CONTROL, ?transition, "select transition");
        self.replace_query(String::new());
        true
    }

    fn replace_query(&mut self, query: String) -> bool {
        if query == self.query {
            return false;
        }
        self.query = query;
        self.refilter();
        tracing::trace!(target: targets::CONTROL, query = %self.query, visible = self.surface.visible().len(), "query changed");
        self.query_changed.emit(self.query.clone());
        true
    }

    fn refilter(&mut self) {
        let visible = filter_items(&self.items, &self.query, &self.filter);
        self.surface.set_visible(visible);
    }
}

impl<V> std::fmt::Debug for Select<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Select")
            .field("items", &self.items.len())
            .field("surface", &self.surface)
            .field("allow_search", &self.allow_search)
            .field("query", &self.query)
            .finish()
    }
}

static_assertions::assert_impl_all!(Select<String>: Send, Sync);
