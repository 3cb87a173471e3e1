//! Selection model: current value, ownership, and commit rules.
//!
//! A [`SelectionModel`] holds either a single optional value or a set of
//! values ([`Selection`]) and knows who owns it ([`ValueOwnership`]):
//!
//! - **Uncontrolled**: the model keeps the value itself, seeded from an
//!   optional default, and updates it on every commit.
//! - **Controlled**: the application supplies the value. Commits never change
//!   what [`SelectionModel::selected`] reports; they compute the next value,
//!   record it in an internal shadow copy, and hand it to the owner through
//!   [`SelectionModel::changed`]. The owner applies it by calling
//!   [`SelectionModel::set_value`]. If the owner later gives up control, the
//!   shadow copy becomes the value.
//!
//! In multiple mode the value set is always kept in item-list order.
//! Values the item list does not contain (for example an externally supplied
//! value for an item that was removed) keep their relative order after the
//! known values.

use horizon_anchor_core::logging::targets;
use horizon_anchor_core::Signal;
use serde::{Deserialize, Serialize};

use super::item::{position_of, Item};

/// Whether one value or a set of values can be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    #[default]
    Single,
    Multiple,
}

/// A selected value (single mode) or set of values (multiple mode).
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<V> {
    Single(Option<V>),
    Multiple(Vec<V>),
}

impl<V> Selection<V> {
    /// The empty selection for `mode`.
    pub fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Self::Single(None),
            SelectionMode::Multiple => Self::Multiple(Vec::new()),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        match self {
            Self::Single(_) => SelectionMode::Single,
            Self::Multiple(_) => SelectionMode::Multiple,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.is_none(),
            Self::Multiple(values) => values.is_empty(),
        }
    }

    /// Iterate over the selected values.
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        let slice: &[V] = match self {
            Self::Single(value) => value.as_slice(),
            Self::Multiple(values) => values,
        };
        slice.iter()
    }

    /// The single value, or the first value of a set.
    pub fn first(&self) -> Option<&V> {
        self.iter().next()
    }

    /// Convert to `mode`, keeping the first value when narrowing to single.
    pub fn into_mode(self, mode: SelectionMode) -> Self {
        match (self, mode) {
            (Self::Multiple(values), SelectionMode::Single) => {
                Self::Single(values.into_iter().next())
            }
            (Self::Single(value), SelectionMode::Multiple) => {
                Self::Multiple(value.into_iter().collect())
            }
            (selection, _) => selection,
        }
    }
}

impl<V: PartialEq> Selection<V> {
    pub fn contains(&self, value: &V) -> bool {
        self.iter().any(|v| v == value)
    }
}

/// Who owns the selected value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueOwnership<V> {
    /// Supplied by the application. `Single(None)` means "explicitly empty".
    Controlled(Selection<V>),
    /// Kept by the model.
    Uncontrolled,
}

/// Result of a commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The item was disabled; nothing changed and nothing was emitted.
    Ignored,
    /// The change was emitted. `close` asks the surface to close.
    Committed { close: bool },
}

/// Selected value plus ownership rules.
pub struct SelectionModel<V> {
    mode: SelectionMode,
    ownership: ValueOwnership<V>,
    /// Internal value (uncontrolled) or shadow copy (controlled).
    store: Selection<V>,
    /// Emitted once per commit with the new value.
    pub changed: Signal<Selection<V>>,
}

impl<V: Clone + PartialEq + 'static> SelectionModel<V> {
    /// Create an uncontrolled model with an empty value.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ownership: ValueOwnership::Uncontrolled,
            store: Selection::empty(mode),
            changed: Signal::new(),
        }
    }

    /// Seed the internal value.
    #[must_use]
    pub fn with_default_value(mut self, value: Selection<V>) -> Self {
        self.store = value.into_mode(self.mode);
        self
    }

    /// Make the model controlled with `value`.
    #[must_use]
    pub fn with_value(mut self, value: Selection<V>) -> Self {
        self.set_value(value);
        self
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.ownership, ValueOwnership::Controlled(_))
    }

    pub fn ownership(&self) -> &ValueOwnership<V> {
        &self.ownership
    }

    /// Supply (or update) the controlled value.
    pub fn set_value(&mut self, value: Selection<V>) {
        self.ownership = ValueOwnership::Controlled(value.into_mode(self.mode));
    }

    /// Replace the ownership outright.
    ///
    /// Switching to [`ValueOwnership::Uncontrolled`] makes the shadow copy
    /// (the last committed value) the displayed value.
    pub fn set_ownership(&mut self, ownership: ValueOwnership<V>) {
        self.ownership = match ownership {
            ValueOwnership::Controlled(value) => {
                ValueOwnership::Controlled(value.into_mode(self.mode))
            }
            ValueOwnership::Uncontrolled => ValueOwnership::Uncontrolled,
        };
    }

    /// The authoritative value: the controlled value if present, the internal one otherwise.
    pub fn selected(&self) -> &Selection<V> {
        match &self.ownership {
            ValueOwnership::Controlled(value) => value,
            ValueOwnership::Uncontrolled => &self.store,
        }
    }

    /// The internal copy, updated on every commit regardless of ownership.
    pub fn shadow(&self) -> &Selection<V> {
        &self.store
    }

    pub fn is_selected(&self, value: &V) -> bool {
        self.selected().contains(value)
    }

    /// Commit `item`.
    ///
    /// Single mode replaces the value and asks to close. Multiple mode toggles
    /// membership and keeps the surface open. Disabled items are ignored.
    /// `items` is the full item list, used to order multiple values.
    pub fn commit(&mut self, item: &Item<V>, items: &[Item<V>]) -> CommitOutcome {
        if item.disabled {
            tracing::trace!(target: targets::SELECTION, key = %item.key, "commit on disabled item ignored");
            return CommitOutcome::Ignored;
        }

        let (next, close) = match self.selected() {
            Selection::Single(_) => (Selection::Single(Some(item.value.clone())), true),
            Selection::Multiple(values) => {
                let mut values = values.clone();
                if let Some(pos) = values.iter().position(|v| *v == item.value) {
                    values.remove(pos);
                } else {
                    values.push(item.value.clone());
                }
                values.sort_by_key(|v| position_of(items, v).unwrap_or(usize::MAX));
                (Selection::Multiple(values), false)
            }
        };

        tracing::debug!(
            target: targets::SELECTION,
            key = %item.key,
            controlled = self.is_controlled(),
            "selection committed"
        );
        self.store = next.clone();
        self.changed.emit(next);
        CommitOutcome::Committed { close }
    }

    /// Clear the value. Emits once if anything was selected.
    pub fn clear(&mut self) -> bool {
        if self.selected().is_empty() {
            return false;
        }
        let next = Selection::empty(self.mode);
        self.store = next.clone();
        self.changed.emit(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn items() -> Vec<Item<&'static str>> {
        vec![
            Item::new("a", "A", "a"),
            Item::new("b", "B", "b"),
            Item::new("c", "C", "c").disabled(true),
            Item::new("d", "D", "d"),
        ]
    }

    fn record<V: Clone + PartialEq + Send + 'static>(
        model: &SelectionModel<V>,
    ) -> Arc<Mutex<Vec<Selection<V>>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        model.changed.connect(move |s| sink.lock().push(s.clone()));
        log
    }

    #[test]
    fn test_single_commit_replaces_and_closes() {
        let items = items();
        let mut model = SelectionModel::new(SelectionMode::Single);
        let log = record(&model);

        assert_eq!(
            model.commit(&items[0], &items),
            CommitOutcome::Committed { close: true }
        );
        model.commit(&items[1], &items);
        assert_eq!(model.selected(), &Selection::Single(Some("b")));
        assert_eq!(log.lock().len(), 2);
    }

    #[test]
    fn test_multiple_toggles_in_item_order() {
        let items = items();
        let mut model = SelectionModel::new(SelectionMode::Multiple);

        assert_eq!(
            model.commit(&items[3], &items),
            CommitOutcome::Committed { close: false }
        );
        model.commit(&items[0], &items);
        assert_eq!(model.selected(), &Selection::Multiple(vec!["a", "d"]));

        model.commit(&items[3], &items);
        assert_eq!(model.selected(), &Selection::Multiple(vec!["a"]));
    }

    #[test]
    fn test_disabled_commit_is_ignored() {
        let items = items();
        let mut model = SelectionModel::new(SelectionMode::Single);
        let log = record(&model);

        assert_eq!(model.commit(&items[2], &items), CommitOutcome::Ignored);
        assert!(model.selected().is_empty());
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_controlled_value_is_authoritative() {
        let items = items();
        let mut model =
            SelectionModel::new(SelectionMode::Single).with_value(Selection::Single(Some("a")));
        let log = record(&model);

        model.commit(&items[1], &items);
        assert_eq!(model.selected(), &Selection::Single(Some("a")));
        assert_eq!(model.shadow(), &Selection::Single(Some("b")));
        assert_eq!(*log.lock(), vec![Selection::Single(Some("b"))]);

        // Owner applies the change.
        model.set_value(Selection::Single(Some("b")));
        assert_eq!(model.selected(), &Selection::Single(Some("b")));
    }

    #[test]
    fn test_controlled_explicit_empty_differs_from_uncontrolled() {
        let model = SelectionModel::new(SelectionMode::Single)
            .with_default_value(Selection::Single(Some("a")))
            .with_value(Selection::Single(None));
        assert!(model.is_controlled());
        assert!(model.selected().is_empty());
        assert_eq!(model.shadow(), &Selection::Single(Some("a")));
    }

    #[test]
    fn test_release_control_falls_back_to_shadow() {
        let items = items();
        let mut model = SelectionModel::new(SelectionMode::Multiple)
            .with_value(Selection::Multiple(vec!["b"]));

        model.commit(&items[0], &items);
        assert_eq!(model.selected(), &Selection::Multiple(vec!["b"]));

        model.set_ownership(ValueOwnership::Uncontrolled);
        assert_eq!(model.selected(), &Selection::Multiple(vec!["a", "b"]));
    }

    #[test]
    fn test_unknown_values_keep_order_after_known() {
        let items = items();
        let mut model = SelectionModel::new(SelectionMode::Multiple)
            .with_default_value(Selection::Multiple(vec!["zz", "d"]));

        model.commit(&items[0], &items);
        assert_eq!(model.selected(), &Selection::Multiple(vec!["a", "d", "zz"]));
    }

    #[test]
    fn test_default_value_coerced_to_mode() {
        let model = SelectionModel::new(SelectionMode::Multiple)
            .with_default_value(Selection::Single(Some("a")));
        assert_eq!(model.selected(), &Selection::Multiple(vec!["a"]));
    }

    #[test]
    fn test_clear() {
        let items = items();
        let mut model = SelectionModel::new(SelectionMode::Single);
        let log = record(&model);

        assert!(!model.clear());
        model.commit(&items[0], &items);
        assert!(model.clear());
        assert!(model.selected().is_empty());
        assert_eq!(log.lock().len(), 2);
    }
}
