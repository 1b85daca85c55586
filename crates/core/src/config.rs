use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Layout and interaction tuning for a flame graph.
///
/// Every field has a default, so hosts can pass a partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlameConfig {
    /// Height of one stack row, in pixels.
    pub row_height: f64,
    /// Height of the header strip above depth 0, in pixels.
    pub header_height: f64,
    /// Narrowest visible window, as a fraction of the whole timeline.
    pub min_window: f64,
    /// A press/release pair closer than this (pixels) may be a click.
    pub click_max_distance: f64,
    /// A press/release pair quicker than this (ms) may be a click.
    pub click_max_duration_ms: f64,
    /// Wheel delta that zooms by 100% of the distance to the pivot.
    pub wheel_divisor: f64,
    /// Grab tolerance around the window edges in the header, in pixels.
    pub handle_grab: f64,
    /// Boxes narrower than this (pixels) are not emitted.
    pub min_box_width: f64,
}

impl Default for FlameConfig {
    fn default() -> Self {
        Self {
            row_height: 20.0,
            header_height: 22.0,
            min_window: 0.0001,
            click_max_distance: 10.0,
            click_max_duration_ms: 300.0,
            wheel_divisor: 400.0,
            handle_grab: 4.0,
            min_box_width: 0.5,
        }
    }
}

// NaN fails both.
fn positive(v: f64) -> bool {
    v > 0.0
}

fn non_negative(v: f64) -> bool {
    v >= 0.0
}

impl FlameConfig {
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });
        if !positive(self.row_height) {
            return invalid("rowHeight", "must be positive");
        }
        if !non_negative(self.header_height) {
            return invalid("headerHeight", "must not be negative");
        }
        if !(positive(self.min_window) && self.min_window < 1.0) {
            return invalid("minWindow", "must be between 0 and 1 exclusive");
        }
        if !positive(self.wheel_divisor) {
            return invalid("wheelDivisor", "must be positive");
        }
        if !(non_negative(self.click_max_distance) && non_negative(self.click_max_duration_ms)) {
            return invalid("clickMaxDistance", "click thresholds must not be negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FlameConfig::from_json(br#"{"rowHeight": 1, "headerHeight": 1}"#).unwrap();
        assert_eq!(config.row_height, 1.0);
        assert_eq!(config.header_height, 1.0);
        assert_eq!(config.wheel_divisor, FlameConfig::default().wheel_divisor);
    }

    #[test]
    fn rejects_out_of_range_min_window() {
        let err = FlameConfig::from_json(br#"{"minWindow": 1.5}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "minWindow", .. }));
    }

    #[test]
    fn rejects_zero_row_height() {
        assert!(FlameConfig::from_json(br#"{"rowHeight": 0}"#).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            FlameConfig::from_json(b"{rowHeight"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn defaults_are_valid() {
        assert!(FlameConfig::default().validate().is_ok());
    }
}
