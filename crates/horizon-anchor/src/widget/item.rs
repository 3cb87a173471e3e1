//! Items shown in a floating surface.

/// One selectable row (Select) or command (Dropdown).
///
/// Items are supplied by the application and never mutated by the controls.
/// Identity is by `key`, which must be unique within one item list.
#[derive(Debug, Clone, PartialEq)]
pub struct Item<V> {
    /// Unique key of this item.
    pub key: String,
    /// Display text; also what the default search predicate matches against.
    pub label: String,
    /// The value committed when this item is chosen.
    pub value: V,
    /// Disabled items can be highlighted but never committed.
    pub disabled: bool,
    /// Optional icon name for the presentation layer.
    pub icon: Option<String>,
    /// Draw a divider after this item (menus).
    pub divider_after: bool,
}

impl<V> Item<V> {
    /// Create an enabled item.
    pub fn new(key: impl Into<String>, label: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value,
            disabled: false,
            icon: None,
            divider_after: false,
        }
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_divider_after(mut self, divider: bool) -> Self {
        self.divider_after = divider;
        self
    }
}

impl Item<String> {
    /// Create an item whose key, label, and value are all `text`.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(text.clone(), text.clone(), text)
    }
}

/// Index of the first item whose value equals `value`.
pub(crate) fn position_of<V: PartialEq>(items: &[Item<V>], value: &V) -> Option<usize> {
    items.iter().position(|item| &item.value == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_builders() {
        let item = Item::new("cut", "Cut", 1)
            .disabled(true)
            .with_icon("scissors")
            .with_divider_after(true);
        assert_eq!(item.key, "cut");
        assert!(item.disabled);
        assert_eq!(item.icon.as_deref(), Some("scissors"));
        assert!(item.divider_after);
    }

    #[test]
    fn test_text_item() {
        let item = Item::text("Apple");
        assert_eq!(item.key, "Apple");
        assert_eq!(item.value, "Apple");
        assert!(!item.disabled);
    }
}
