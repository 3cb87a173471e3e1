//! Prelude module for Horizon Anchor.
//!
//! ```
//! use horizon_anchor::prelude::*;
//! ```
//!
//! This provides access to:
//! - Signals (`Signal`, `ConnectionId`)
//! - Geometry types (`Point`, `Size`, `Rect`)
//! - The controls (`Select`, `Dropdown`) and their configuration
//! - Items, selections, and input events

// ============================================================================
// Signals
// ============================================================================

pub use crate::signal::{ConnectionId, Signal};

// ============================================================================
// Geometry
// ============================================================================

pub use crate::geometry::{Point, Rect, Size};

// ============================================================================
// Controls
// ============================================================================

pub use crate::config::{ConfigError, SurfaceOptions};
pub use crate::widget::{
    AccessibilityState, Dropdown, InputEvent, Item, Key, Placement, PlacementRequest, Select,
    Selection, SelectionMode, Side, Trigger, ValueOwnership,
};
