//! Declarative options for anchored-surface controls.
//!
//! [`SurfaceOptions`] collects every tunable that is not code (items, values,
//! and filter predicates are set through builders). It deserializes from TOML
//! so hosts can keep control presets in configuration files:
//!
//! ```
//! use horizon_anchor::config::SurfaceOptions;
//! use horizon_anchor::widget::placement::Placement;
//!
//! let options = SurfaceOptions::from_toml_str(r#"
//!     placement = "top-end"
//!     gap = 6.0
//!     allow_search = true
//! "#).unwrap();
//!
//! assert_eq!(options.placement, Placement::TOP_END);
//! assert!(options.allow_search);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::widget::highlight::HighlightCursor;
use crate::widget::interaction::{Trigger, DEFAULT_HOVER_CLOSE_DELAY};
use crate::widget::placement::{Placement, PlacementRequest};
use crate::widget::selection::SelectionMode;
use crate::widget::surface::{AnchoredSurface, DEFAULT_MAX_VISIBLE_ROWS, DEFAULT_ROW_HEIGHT};

/// Error loading or validating [`SurfaceOptions`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML could not be parsed or did not match the schema.
    #[error("invalid surface options: {0}")]
    Parse(#[from] toml::de::Error),

    /// The options could not be written as TOML.
    #[error("failed to serialize surface options: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field holds a value outside its allowed range.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Options shared by Select and Dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurfaceOptions {
    pub trigger: Trigger,
    pub placement: Placement,
    /// Distance between anchor and surface.
    pub gap: f32,
    /// Margin kept between the surface and the viewport edges.
    pub viewport_padding: f32,
    /// Try perpendicular sides when neither the preferred nor the opposite side fits.
    pub cross_axis_fallback: bool,
    /// Grace period before a hover-triggered surface closes.
    pub hover_close_delay_ms: u64,
    pub row_height: f32,
    /// Rows shown before the surface scrolls.
    pub max_visible_rows: usize,
    pub mode: SelectionMode,
    pub allow_search: bool,
    pub disabled: bool,
    /// Step over disabled rows during keyboard navigation.
    pub skip_disabled: bool,
    /// Rows moved by PageUp/PageDown.
    pub page_size: usize,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        let request = PlacementRequest::default();
        Self {
            trigger: Trigger::Click,
            placement: request.placement,
            gap: request.gap,
            viewport_padding: request.viewport_padding,
            cross_axis_fallback: request.cross_axis_fallback,
            hover_close_delay_ms: DEFAULT_HOVER_CLOSE_DELAY.as_millis() as u64,
            row_height: DEFAULT_ROW_HEIGHT,
            max_visible_rows: DEFAULT_MAX_VISIBLE_ROWS,
            mode: SelectionMode::Single,
            allow_search: false,
            disabled: false,
            skip_disabled: false,
            page_size: HighlightCursor::new().page_size(),
        }
    }
}

impl SurfaceOptions {
    /// Parse and validate options from TOML. Missing fields take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(source)?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("gap", self.gap)?;
        non_negative("viewport_padding", self.viewport_padding)?;
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(invalid("row_height", format!("must be positive, got {}", self.row_height)));
        }
        if self.max_visible_rows == 0 {
            return Err(invalid("max_visible_rows", "must be at least 1".into()));
        }
        if self.page_size == 0 {
            return Err(invalid("page_size", "must be at least 1".into()));
        }
        Ok(())
    }

    pub fn placement_request(&self) -> PlacementRequest {
        PlacementRequest::new(self.placement)
            .with_gap(self.gap)
            .with_viewport_padding(self.viewport_padding)
            .with_cross_axis_fallback(self.cross_axis_fallback)
    }

    pub fn hover_close_delay(&self) -> Duration {
        Duration::from_millis(self.hover_close_delay_ms)
    }

    pub fn cursor(&self) -> HighlightCursor {
        HighlightCursor::new()
            .with_skip_disabled(self.skip_disabled)
            .with_page_size(self.page_size)
    }

    /// Build a closed surface configured by these options.
    ///
    /// `disabled` is left to the owning control so it can apply it after wiring.
    pub fn build_surface(&self) -> AnchoredSurface {
        AnchoredSurface::new(self.trigger)
            .with_placement_request(self.placement_request())
            .with_hover_close_delay(self.hover_close_delay())
            .with_cursor(self.cursor())
            .with_row_height(self.row_height)
            .with_max_visible_rows(self.max_visible_rows)
            .with_text_input(self.allow_search)
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a non-negative number, got {value}")))
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::placement::{Alignment, Side};

    #[test]
    fn test_empty_document_is_default() {
        let options = SurfaceOptions::from_toml_str("").unwrap();
        assert_eq!(options, SurfaceOptions::default());
        assert_eq!(options.placement, Placement::BOTTOM_START);
        assert_eq!(options.hover_close_delay(), Duration::from_millis(200));
    }

    #[test]
    fn test_full_document() {
        let options = SurfaceOptions::from_toml_str(
            r#"
            trigger = "hover"
            placement = "right-center"
            gap = 2.5
            viewport_padding = 0.0
            cross_axis_fallback = false
            hover_close_delay_ms = 350
            row_height = 24.0
            max_visible_rows = 5
            mode = "multiple"
            allow_search = true
            disabled = true
            skip_disabled = true
            page_size = 4
            "#,
        )
        .unwrap();

        assert_eq!(options.trigger, Trigger::Hover);
        assert_eq!(options.placement.side, Side::Right);
        assert_eq!(options.placement.alignment, Alignment::Center);
        assert_eq!(options.mode, SelectionMode::Multiple);
        assert!(!options.placement_request().cross_axis_fallback);
        assert_eq!(options.hover_close_delay(), Duration::from_millis(350));

        let cursor = options.cursor();
        assert!(cursor.skips_disabled());
        assert_eq!(cursor.page_size(), 4);
    }

    #[test]
    fn test_rejects_negative_gap() {
        let err = SurfaceOptions::from_toml_str("gap = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "gap", .. }));
    }

    #[test]
    fn test_rejects_zero_row_height() {
        let err = SurfaceOptions::from_toml_str("row_height = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "row_height", .. }));
        assert!(err.to_string().contains("row_height"));
    }

    #[test]
    fn test_rejects_unknown_placement_and_fields() {
        assert!(matches!(
            SurfaceOptions::from_toml_str(r#"placement = "middle""#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SurfaceOptions::from_toml_str("colour = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let options = SurfaceOptions {
            placement: Placement::LEFT_END,
            allow_search: true,
            ..SurfaceOptions::default()
        };
        let text = options.to_toml_string().unwrap();
        assert!(text.contains("placement = \"left-end\""));
        assert_eq!(SurfaceOptions::from_toml_str(&text).unwrap(), options);
    }
}
