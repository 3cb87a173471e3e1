//! Collision-aware placement of a floating surface relative to its anchor.
//!
//! [`compute_placement`] is a pure function: given the anchor rectangle, the
//! surface size, a [`PlacementRequest`], and the viewport, it returns where
//! the surface should go and which side it ended up on. It holds no state and
//! is safe to call on every scroll, resize, or geometry change.
//!
//! The algorithm runs in three steps:
//!
//! 1. **Flip**: if the surface does not fit on the preferred side and the
//!    opposite side has more room, use the opposite side. If neither fits but
//!    a perpendicular side does, use that instead (cross-axis fallback).
//! 2. **Align**: the alignment picks the cross-axis anchor point (start edge,
//!    center, or end edge of the anchor).
//! 3. **Shift**: slide along the cross axis by the minimum amount that keeps
//!    the surface inside the viewport minus padding. Shifting never changes
//!    the side.
//!
//! # Example
//!
//! ```
//! use horizon_anchor::geometry::{Point, Rect, Size};
//! use horizon_anchor::widget::placement::{compute_placement, Placement, PlacementRequest, Side};
//!
//! let request = PlacementRequest::new(Placement::BOTTOM_START);
//! let anchor = Rect::new(100.0, 740.0, 120.0, 32.0);
//! let result = compute_placement(
//!     Some(anchor),
//!     Some(Size::new(200.0, 240.0)),
//!     &request,
//!     Size::new(1024.0, 800.0),
//!     Point::ZERO,
//! )
//! .unwrap();
//!
//! // Not enough room below, so the surface flips above the anchor.
//! assert_eq!(result.side, Side::Top);
//! ```

use std::fmt;
use std::str::FromStr;

use horizon_anchor_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

// ============================================================================
// Side / Alignment / Placement
// ============================================================================

/// The side of the anchor the surface is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Side {
    /// The side across the anchor from this one.
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether the main axis of this side is vertical (top/bottom).
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// The two sides on the other axis, start side first.
    pub fn perpendicular(self) -> [Self; 2] {
        if self.is_vertical() {
            [Self::Left, Self::Right]
        } else {
            [Self::Top, Self::Bottom]
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Where along the cross axis the surface lines up with the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    /// Surface start edge meets anchor start edge (left, or top).
    #[default]
    Start,
    /// Surface centered on the anchor.
    Center,
    /// Surface end edge meets anchor end edge (right, or bottom).
    End,
}

impl Alignment {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

/// A requested side and alignment.
///
/// Parses from and formats to kebab-case strings such as `"bottom-start"`,
/// `"top"` (center alignment), or `"right-end"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Placement {
    pub side: Side,
    pub alignment: Alignment,
}

impl Placement {
    pub const TOP: Self = Self::new(Side::Top, Alignment::Center);
    pub const TOP_START: Self = Self::new(Side::Top, Alignment::Start);
    pub const TOP_END: Self = Self::new(Side::Top, Alignment::End);
    pub const BOTTOM: Self = Self::new(Side::Bottom, Alignment::Center);
    pub const BOTTOM_START: Self = Self::new(Side::Bottom, Alignment::Start);
    pub const BOTTOM_END: Self = Self::new(Side::Bottom, Alignment::End);
    pub const LEFT: Self = Self::new(Side::Left, Alignment::Center);
    pub const LEFT_START: Self = Self::new(Side::Left, Alignment::Start);
    pub const LEFT_END: Self = Self::new(Side::Left, Alignment::End);
    pub const RIGHT: Self = Self::new(Side::Right, Alignment::Center);
    pub const RIGHT_START: Self = Self::new(Side::Right, Alignment::Start);
    pub const RIGHT_END: Self = Self::new(Side::Right, Alignment::End);

    /// Create a placement from a side and alignment.
    pub const fn new(side: Side, alignment: Alignment) -> Self {
        Self { side, alignment }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alignment {
            Alignment::Center => f.write_str(self.side.as_str()),
            alignment => write!(f, "{}-{}", self.side.as_str(), alignment.as_str()),
        }
    }
}

/// Error returned when a placement string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown placement '{0}', expected e.g. 'bottom-start', 'top' or 'right-end'")]
pub struct ParsePlacementError(pub String);

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (side, alignment) = match s.split_once('-') {
            Some((side, alignment)) => (side, Some(alignment)),
            None => (s, None),
        };

        let side = match side {
            "top" => Side::Top,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            "right" => Side::Right,
            _ => return Err(ParsePlacementError(s.to_string())),
        };
        let alignment = match alignment {
            None | Some("center") => Alignment::Center,
            Some("start") => Alignment::Start,
            Some("end") => Alignment::End,
            Some(_) => return Err(ParsePlacementError(s.to_string())),
        };

        Ok(Self::new(side, alignment))
    }
}

impl TryFrom<String> for Placement {
    type Error = ParsePlacementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Placement> for String {
    fn from(value: Placement) -> Self {
        value.to_string()
    }
}

// ============================================================================
// Request / Result
// ============================================================================

/// How a control wants its surface placed. Configured once per control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    /// Preferred side and alignment.
    pub placement: Placement,
    /// Distance between anchor and surface along the main axis.
    pub gap: f32,
    /// Minimum distance kept between the surface and the viewport edges.
    pub viewport_padding: f32,
    /// Try the perpendicular sides when neither the preferred side nor its
    /// opposite fits.
    pub cross_axis_fallback: bool,
}

impl Default for PlacementRequest {
    fn default() -> Self {
        Self {
            placement: Placement::BOTTOM_START,
            gap: 4.0,
            viewport_padding: 8.0,
            cross_axis_fallback: true,
        }
    }
}

impl PlacementRequest {
    /// Create a request for `placement` with default gap and padding.
    pub fn new(placement: Placement) -> Self {
        Self {
            placement,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    #[must_use]
    pub fn with_viewport_padding(mut self, padding: f32) -> Self {
        self.viewport_padding = padding;
        self
    }

    #[must_use]
    pub fn with_cross_axis_fallback(mut self, enabled: bool) -> Self {
        self.cross_axis_fallback = enabled;
        self
    }
}

/// The resolved position of a floating surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementResult {
    /// Left edge of the surface, in the anchor's coordinate space.
    pub x: f32,
    /// Top edge of the surface, in the anchor's coordinate space.
    pub y: f32,
    /// Side actually used after flipping.
    pub side: Side,
    /// Alignment used (unchanged from the request).
    pub alignment: Alignment,
}

impl PlacementResult {
    /// The surface rectangle at this position.
    pub fn rect(&self, surface: Size) -> Rect {
        Rect::from_origin_size(Point::new(self.x, self.y), surface)
    }

    /// Whether the surface ended up on a different side than requested.
    pub fn is_flipped(&self, requested: Placement) -> bool {
        self.side != requested.side
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Compute where to place a surface of size `surface` next to `anchor`.
///
/// `viewport` is the size of the visible area and `scroll` its offset in the
/// same coordinate space as `anchor`. Returns `None` when either piece of
/// geometry is unavailable (unmounted or not yet measured); callers should
/// keep the previous result and wait for the next valid measurement.
pub fn compute_placement(
    anchor: Option<Rect>,
    surface: Option<Size>,
    request: &PlacementRequest,
    viewport: Size,
    scroll: Point,
) -> Option<PlacementResult> {
    let (Some(anchor), Some(surface)) = (anchor, surface) else {
        tracing::trace!(target: targets::PLACEMENT, "geometry unavailable, skipping placement");
        return None;
    };

    let bounds = Rect::new(scroll.x, scroll.y, viewport.width, viewport.height)
        .inset(request.viewport_padding);
    let frame = Frame {
        anchor,
        surface,
        bounds,
        gap: request.gap,
    };

    let side = frame.resolve_side(request.placement.side, request.cross_axis_fallback);
    let alignment = request.placement.alignment;
    let main = frame.main_start(side);
    let cross = frame.shift(side, frame.aligned_cross_start(side, alignment));

    let (x, y) = if side.is_vertical() {
        (cross, main)
    } else {
        (main, cross)
    };

    let result = PlacementResult {
        x,
        y,
        side,
        alignment,
    };
    tracing::trace!(
        target: targets::PLACEMENT,
        requested = %request.placement,
        ?side,
        x,
        y,
        "placement computed"
    );
    Some(result)
}

/// Geometry shared by every step of one computation.
struct Frame {
    anchor: Rect,
    surface: Size,
    bounds: Rect,
    gap: f32,
}

impl Frame {
    fn resolve_side(&self, preferred: Side, cross_axis_fallback: bool) -> Side {
        if self.fits(preferred) {
            return preferred;
        }

        let opposite = preferred.opposite();
        if self.fits(opposite) {
            return opposite;
        }

        if cross_axis_fallback
            && let Some(side) = preferred.perpendicular().into_iter().find(|&s| self.fits(s))
        {
            return side;
        }

        // Nothing fits: take whichever of the pair has more room and accept clipping.
        if self.available(opposite) > self.available(preferred) {
            opposite
        } else {
            preferred
        }
    }

    /// Room between the anchor (plus gap) and the bounds edge on `side`.
    fn available(&self, side: Side) -> f32 {
        match side {
            Side::Top => self.anchor.top() - self.gap - self.bounds.top(),
            Side::Bottom => self.bounds.bottom() - (self.anchor.bottom() + self.gap),
            Side::Left => self.anchor.left() - self.gap - self.bounds.left(),
            Side::Right => self.bounds.right() - (self.anchor.right() + self.gap),
        }
    }

    fn main_size(&self, side: Side) -> f32 {
        if side.is_vertical() {
            self.surface.height
        } else {
            self.surface.width
        }
    }

    fn cross_size(&self, side: Side) -> f32 {
        if side.is_vertical() {
            self.surface.width
        } else {
            self.surface.height
        }
    }

    /// Bounds interval along the cross axis of `side`.
    fn cross_bounds(&self, side: Side) -> (f32, f32) {
        if side.is_vertical() {
            (self.bounds.left(), self.bounds.right())
        } else {
            (self.bounds.top(), self.bounds.bottom())
        }
    }

    /// Bounds interval along the main axis of `side`.
    fn main_bounds(&self, side: Side) -> (f32, f32) {
        if side.is_vertical() {
            (self.bounds.top(), self.bounds.bottom())
        } else {
            (self.bounds.left(), self.bounds.right())
        }
    }

    /// Whether the surface fits entirely inside the bounds on `side`.
    fn fits(&self, side: Side) -> bool {
        let start = self.main_start(side);
        let end = start + self.main_size(side);
        let (lo, hi) = self.main_bounds(side);
        let (cross_lo, cross_hi) = self.cross_bounds(side);

        start >= lo && end <= hi && self.cross_size(side) <= cross_hi - cross_lo
    }

    /// Main-axis coordinate of the surface's leading edge on `side`.
    fn main_start(&self, side: Side) -> f32 {
        match side {
            Side::Top => self.anchor.top() - self.gap - self.surface.height,
            Side::Bottom => self.anchor.bottom() + self.gap,
            Side::Left => self.anchor.left() - self.gap - self.surface.width,
            Side::Right => self.anchor.right() + self.gap,
        }
    }

    fn aligned_cross_start(&self, side: Side, alignment: Alignment) -> f32 {
        let (anchor_start, anchor_len) = if side.is_vertical() {
            (self.anchor.left(), self.anchor.width())
        } else {
            (self.anchor.top(), self.anchor.height())
        };
        let size = self.cross_size(side);

        match alignment {
            Alignment::Start => anchor_start,
            Alignment::Center => anchor_start + (anchor_len - size) / 2.0,
            Alignment::End => anchor_start + anchor_len - size,
        }
    }

    /// Clamp the cross-axis start so the surface stays inside the bounds.
    fn shift(&self, side: Side, start: f32) -> f32 {
        let (lo, hi) = self.cross_bounds(side);
        let max_start = hi - self.cross_size(side);
        if max_start < lo {
            // Wider than the bounds: pin to the start edge.
            lo
        } else {
            start.clamp(lo, max_start)
        }
    }
}
