//! Error types for Horizon Anchor core.

/// A specialized Result type for Horizon Anchor core operations.
pub type Result<T> = std::result::Result<T, AnchorError>;

/// The main error type for core bookkeeping operations.
///
/// None of these are user-facing. They are returned from explicit
/// stop/remove calls so callers can detect double-release bugs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnchorError {
    /// Timer-related error.
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),
    /// Listener-related error.
    #[error("Listener error: {0}")]
    Listener(#[from] ListenerError),
}

/// Timer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// The timer ID is invalid, has already fired, or was already stopped.
    #[error("Invalid or expired timer ID")]
    InvalidTimerId,
}

/// Listener-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListenerError {
    /// The listener ID is invalid or has already been removed.
    #[error("Invalid or removed listener ID")]
    InvalidListenerId,
}
