//! Building blocks of anchored selectable surfaces.
//!
//! Each concern lives in its own module and can be used on its own:
//!
//! - [`placement`]: pure collision-aware positioning ([`compute_placement`])
//! - [`interaction`]: the `Closed <-> Open` state machine ([`InteractionMachine`])
//! - [`selection`]: value ownership and commit rules ([`SelectionModel`])
//! - [`highlight`]: keyboard cursor over the visible rows ([`HighlightCursor`])
//! - [`filter`]: query-driven reduction of the item list ([`filter_items`])
//!
//! [`surface::AnchoredSurface`] combines them for one anchor, and the
//! [`widgets`] module builds [`Select`] and [`Dropdown`] on top.
//!
//! # Overview
//!
//! ```text
//! InputEvent ──> AnchoredSurface::dispatch ──> InteractionMachine ──> open/close
//!                        │                          │
//!                        │                          └─> compute_placement on open
//!                        ├─> HighlightCursor (arrows, hover)
//!                        └─> Activate(row) ──> SelectionModel::commit / Dropdown::activated
//! ```

pub mod accessibility;
pub mod events;
pub mod filter;
pub mod highlight;
pub mod interaction;
pub mod item;
pub mod placement;
pub mod selection;
pub mod surface;
pub mod widgets;

pub use accessibility::AccessibilityState;
pub use events::{HoverRegion, InputEvent, Key, KeyPressEvent, KeyboardModifiers, PointerButton};
pub use filter::{filter_items, FilterFn, FilterPredicate};
pub use highlight::{Direction, HighlightCursor};
pub use interaction::{
    CloseReason, InteractionEvent, InteractionMachine, InteractionState, OpenReason, Transition,
    Trigger, DEFAULT_HOVER_CLOSE_DELAY,
};
pub use item::Item;
pub use placement::{
    compute_placement, Alignment, ParsePlacementError, Placement, PlacementRequest,
    PlacementResult, Side,
};
pub use selection::{CommitOutcome, Selection, SelectionMode, SelectionModel, ValueOwnership};
pub use surface::{AnchoredSurface, Dispatch, SurfacePart};
pub use widgets::{Dropdown, Select};
