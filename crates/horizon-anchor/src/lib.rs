//! Horizon Anchor - anchored selectable surfaces.
//!
//! Headless behavior for floating lists attached to a trigger element:
//! selects, comboboxes, and dropdown menus. The crate decides *where* the
//! surface goes, *when* it is open, *what* is highlighted and selected, and
//! *which* items are visible. Rendering is left to the host, which feeds
//! [`InputEvent`](widget::InputEvent)s in and reads state back out.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use horizon_anchor::prelude::*;
//!
//! let mut select = Select::new(SelectionMode::Multiple).with_items(vec![
//!     Item::text("Red"),
//!     Item::text("Green"),
//!     Item::text("Blue"),
//! ]);
//!
//! let now = Instant::now();
//! select.handle_event(&InputEvent::ViewportResize(Size::new(800.0, 600.0)), now);
//! select.handle_event(&InputEvent::AnchorGeometry(Some(Rect::new(0.0, 0.0, 120.0, 32.0))), now);
//! select.handle_event(&InputEvent::click(10.0, 10.0), now);
//! assert!(select.is_open());
//! assert!(select.placement().is_some());
//! ```

pub use horizon_anchor_core::*;

pub mod config;
pub mod geometry;
pub mod prelude;
pub mod widget;

pub use config::{ConfigError, SurfaceOptions};
