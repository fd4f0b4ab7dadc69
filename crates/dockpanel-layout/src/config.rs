//! Stack panel configuration.
//!
//! Defaults can be overridden from the environment with
//! [`StackPanelConfig::from_env`]:
//!
//! - `DOCKPANEL_MIN_PROPORTION`: proportion floor applied to every active
//!   child, in `[0, 1)`.
//! - `DOCKPANEL_SPLITTER_THICKNESS`: thickness given to splitters added
//!   without an explicit one.

use std::fmt;

use dockpanel_core::warn;
use serde::{Deserialize, Serialize};

/// Environment variable for [`StackPanelConfig::min_proportion_floor`].
pub const ENV_MIN_PROPORTION: &str = "DOCKPANEL_MIN_PROPORTION";

/// Environment variable for [`StackPanelConfig::default_splitter_thickness`].
pub const ENV_SPLITTER_THICKNESS: &str = "DOCKPANEL_SPLITTER_THICKNESS";

/// Tunables for a [`StackPanel`](crate::StackPanel).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackPanelConfig {
    /// Smallest proportion an active child may be clamped to.
    pub min_proportion_floor: f64,
    /// Thickness for splitters added through `add_splitter`.
    pub default_splitter_thickness: f64,
}

impl Default for StackPanelConfig {
    fn default() -> Self {
        Self {
            min_proportion_floor: 0.0,
            default_splitter_thickness: 4.0,
        }
    }
}

impl StackPanelConfig {
    /// Set the proportion floor.
    #[must_use]
    pub fn min_proportion_floor(mut self, floor: f64) -> Self {
        self.min_proportion_floor = floor;
        self
    }

    /// Set the default splitter thickness.
    #[must_use]
    pub fn default_splitter_thickness(mut self, thickness: f64) -> Self {
        self.default_splitter_thickness = thickness;
        self
    }

    /// Check that every field is within range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floor = self.min_proportion_floor;
        if !(floor.is_finite() && (0.0..1.0).contains(&floor)) {
            return Err(ConfigError::InvalidFloor { value: floor });
        }
        let thickness = self.default_splitter_thickness;
        if !(thickness.is_finite() && thickness >= 0.0) {
            return Err(ConfigError::InvalidSplitterThickness { value: thickness });
        }
        Ok(())
    }

    /// Replace every out-of-range field with its default.
    ///
    /// ```
    /// use dockpanel_layout::StackPanelConfig;
    ///
    /// let config = StackPanelConfig::default()
    ///     .min_proportion_floor(1.5)
    ///     .default_splitter_thickness(2.0)
    ///     .validated();
    /// assert_eq!(config.min_proportion_floor, 0.0);
    /// assert_eq!(config.default_splitter_thickness, 2.0);
    /// ```
    #[must_use]
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if let Err(err) = defaults.min_proportion_floor(self.min_proportion_floor).validate() {
            warn!(error = %err, "resetting config value to default");
            self.min_proportion_floor = defaults.min_proportion_floor;
        }
        if let Err(err) = defaults
            .default_splitter_thickness(self.default_splitter_thickness)
            .validate()
        {
            warn!(error = %err, "resetting config value to default");
            self.default_splitter_thickness = defaults.default_splitter_thickness;
        }
        self
    }

    /// Defaults overridden by the process environment.
    ///
    /// Unparsable or out-of-range values are ignored and the default kept.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MIN_PROPORTION) {
            let candidate = raw.trim().parse::<f64>().ok().map(|v| config.min_proportion_floor(v));
            match candidate.map(|c| c.validate().map(|()| c)) {
                Some(Ok(c)) => config = c,
                _ => warn!(key = ENV_MIN_PROPORTION, value = %raw, "ignoring invalid config value"),
            }
        }

        if let Some(raw) = lookup(ENV_SPLITTER_THICKNESS) {
            let candidate = raw
                .trim()
                .parse::<f64>()
                .ok()
                .map(|v| config.default_splitter_thickness(v));
            match candidate.map(|c| c.validate().map(|()| c)) {
                Some(Ok(c)) => config = c,
                _ => warn!(key = ENV_SPLITTER_THICKNESS, value = %raw, "ignoring invalid config value"),
            }
        }

        config
    }
}

/// Rejected configuration values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    InvalidFloor { value: f64 },
    InvalidSplitterThickness { value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFloor { value } => {
                write!(f, "minimum proportion floor {value} must be finite and in [0, 1)")
            }
            Self::InvalidSplitterThickness { value } => {
                write!(f, "splitter thickness {value} must be finite and non-negative")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_is_valid() {
        assert_eq!(StackPanelConfig::default().validate(), Ok(()));
    }

    #[test]
    fn floor_must_be_below_one() {
        let err = StackPanelConfig::default()
            .min_proportion_floor(1.0)
            .validate()
            .expect_err("floor of 1 leaves no room for siblings");
        assert_eq!(err, ConfigError::InvalidFloor { value: 1.0 });
        assert!(
            StackPanelConfig::default()
                .min_proportion_floor(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn negative_thickness_is_rejected() {
        let err = StackPanelConfig::default()
            .default_splitter_thickness(-1.0)
            .validate()
            .expect_err("negative thickness");
        assert_eq!(err.to_string(), "splitter thickness -1 must be finite and non-negative");
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = StackPanelConfig::from_lookup(lookup(&[
            (ENV_MIN_PROPORTION, "0.05"),
            (ENV_SPLITTER_THICKNESS, " 6 "),
        ]));
        assert_eq!(config.min_proportion_floor, 0.05);
        assert_eq!(config.default_splitter_thickness, 6.0);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = StackPanelConfig::from_lookup(lookup(&[
            (ENV_MIN_PROPORTION, "1.5"),
            (ENV_SPLITTER_THICKNESS, "thick"),
        ]));
        assert_eq!(config, StackPanelConfig::default());
    }

    #[test]
    fn validated_resets_only_the_bad_fields() {
        let config = StackPanelConfig::default()
            .min_proportion_floor(0.1)
            .default_splitter_thickness(f64::NAN)
            .validated();
        assert_eq!(config.min_proportion_floor, 0.1);
        assert_eq!(config.default_splitter_thickness, 4.0);

        let config = StackPanelConfig::default()
            .min_proportion_floor(1.0)
            .default_splitter_thickness(-3.0)
            .validated();
        assert_eq!(config, StackPanelConfig::default());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let config: StackPanelConfig =
            serde_json::from_str(r#"{"min_proportion_floor":0.1}"#).expect("deserialize");
        assert_eq!(config.min_proportion_floor, 0.1);
        assert_eq!(config.default_splitter_thickness, 4.0);
    }
}
