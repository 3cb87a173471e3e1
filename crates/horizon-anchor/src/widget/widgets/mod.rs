//! Anchored-surface controls for Horizon Anchor.
//!
//! This module provides the two controls built on [`AnchoredSurface`](super::surface::AnchoredSurface):
//!
//! - [`Select`]: single- or multi-value combobox with optional search
//! - [`Dropdown`]: action menu that emits the activated item's value

mod dropdown;
mod select;

pub use dropdown::Dropdown;
pub use select::Select;
