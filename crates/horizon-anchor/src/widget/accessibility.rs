//! Semantic state for the presentation layer's accessibility tree.
//!
//! The controls never produce markup. They expose an [`AccessibilityState`]
//! snapshot that the host mirrors into roles and attributes (expanded,
//! active descendant, selected).

/// Snapshot of a control's accessible state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessibilityState {
    /// Whether the surface is open.
    pub expanded: bool,
    /// Key of the highlighted item.
    pub active_descendant: Option<String>,
    /// Keys of the selected items, in item-list order.
    pub selected_keys: Vec<String>,
    /// Whether the control is disabled.
    pub disabled: bool,
}

impl AccessibilityState {
    pub fn is_selected(&self, key: &str) -> bool {
        self.selected_keys.iter().any(|k| k == key)
    }
}
