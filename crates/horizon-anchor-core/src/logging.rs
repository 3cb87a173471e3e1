//! Logging facilities for Horizon Anchor.
//!
//! Horizon Anchor uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_anchor=debug")
//!     .init();
//! ```
//!
//! State transitions log at `debug`. Placement computations, signal
//! emission, timers, and listener bookkeeping log at `trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal emission.
    pub const SIGNAL: &str = "horizon_anchor_core::signal";
    /// Timer queue.
    pub const TIMER: &str = "horizon_anchor_core::timer";
    /// Document listener registry.
    pub const LISTENER: &str = "horizon_anchor_core::listener";
    /// Placement engine.
    pub const PLACEMENT: &str = "horizon_anchor::placement";
    /// Open/closed interaction state machine.
    pub const INTERACTION: &str = "horizon_anchor::interaction";
    /// Selection model.
    pub const SELECTION: &str = "horizon_anchor::selection";
    /// Highlight cursor and filtering.
    pub const NAVIGATION: &str = "horizon_anchor::navigation";
    /// Select and Dropdown controls.
    pub const CONTROL: &str = "horizon_anchor::control";
}
