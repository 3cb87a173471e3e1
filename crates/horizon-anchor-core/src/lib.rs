//! Core systems for Horizon Anchor.
//!
//! This crate provides the foundation shared by the anchored-surface
//! controls in `horizon-anchor`:
//!
//! - **Signals**: type-safe change notification ([`Signal`])
//! - **Timers**: cancellable one-shot timers driven by a caller clock ([`TimerQueue`])
//! - **Listeners**: document-level listener bookkeeping with RAII release ([`ListenerRegistry`])
//! - **Logging**: `tracing` targets for every subsystem ([`logging::targets`])
//!
//! # Signal Example
//!
//! ```
//! use horizon_anchor_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use horizon_anchor_core::TimerQueue;
//!
//! let start = Instant::now();
//! let mut timers = TimerQueue::new();
//! let id = timers.start_one_shot(start, Duration::from_millis(200));
//! assert_eq!(timers.process_expired(start + Duration::from_millis(250)), vec![id]);
//! ```

mod error;
pub mod listener;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{AnchorError, ListenerError, Result, TimerError};
pub use listener::{ListenerGuard, ListenerId, ListenerKind, ListenerRegistry, OwnerId};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{TimerId, TimerQueue};
