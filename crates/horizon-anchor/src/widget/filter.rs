//! Client-side filtering of the item list for searchable selects.
//!
//! [`filter_items`] reduces the full item list to the indices of the items
//! matching the current query. It runs synchronously on every query edit;
//! there is no debouncing and no asynchronous source.

use std::fmt;
use std::sync::Arc;

use super::item::Item;

/// Signature of a custom filter predicate.
pub type FilterFn<V> = dyn Fn(&Item<V>, &str) -> bool + Send + Sync;

/// Decides whether an item matches the query.
pub enum FilterPredicate<V> {
    /// Case-insensitive substring match against the item label.
    LabelContains,
    /// Application-supplied predicate. Fully replaces the default.
    Custom(Arc<FilterFn<V>>),
}

impl<V> FilterPredicate<V> {
    /// Wrap a closure as a custom predicate.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Item<V>, &str) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }
}

impl<V> Default for FilterPredicate<V> {
    fn default() -> Self {
        Self::LabelContains
    }
}

impl<V> Clone for FilterPredicate<V> {
    fn clone(&self) -> Self {
        match self {
            Self::LabelContains => Self::LabelContains,
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

impl<V> fmt::Debug for FilterPredicate<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LabelContains => f.write_str("LabelContains"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Indices of the items visible for `query`, in item-list order.
///
/// An empty query shows every item.
pub fn filter_items<V>(items: &[Item<V>], query: &str, predicate: &FilterPredicate<V>) -> Vec<usize> {
    if query.is_empty() {
        return (0..items.len()).collect();
    }

    match predicate {
        FilterPredicate::LabelContains => {
            let needle = query.to_lowercase();
            items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.label.to_lowercase().contains(&needle))
                .map(|(i, _)| i)
                .collect()
        }
        FilterPredicate::Custom(matches) => items
            .iter()
            .enumerate()
            .filter(|(_, item)| matches(item, query))
            .map(|(i, _)| i)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruits() -> Vec<Item<String>> {
        ["Apple", "Apricot", "Banana", "Grape", "Papaya", "Cherry"]
            .into_iter()
            .map(Item::text)
            .collect()
    }

    #[test]
    fn test_default_is_case_insensitive_substring() {
        let items = fruits();
        let visible = filter_items(&items, "AP", &FilterPredicate::default());
        assert_eq!(visible, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_empty_query_shows_all() {
        let items = fruits();
        assert_eq!(filter_items(&items, "", &FilterPredicate::default()).len(), 6);
    }

    #[test]
    fn test_no_match() {
        let items = fruits();
        assert!(filter_items(&items, "xyz", &FilterPredicate::default()).is_empty());
    }

    #[test]
    fn test_custom_predicate_replaces_default() {
        let items = fruits();
        let prefix = FilterPredicate::custom(|item: &Item<String>, query: &str| {
            item.label.starts_with(query)
        });

        // Case-sensitive prefix only; "Papaya" and "Grape" no longer match.
        assert_eq!(filter_items(&items, "Ap", &prefix), vec![0, 1]);
        assert!(filter_items(&items, "ap", &prefix).is_empty());
    }

    #[test]
    fn test_custom_predicate_sees_value() {
        let items = vec![Item::new("a", "One", 1), Item::new("b", "Two", 2)];
        let even = FilterPredicate::custom(|item: &Item<i32>, _query: &str| item.value % 2 == 0);
        assert_eq!(filter_items(&items, "anything", &even), vec![1]);
    }
}
