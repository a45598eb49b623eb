//! Configuration for timetable building.
//!
//! Calendar parameters and placement options are read from TOML:
//!
//! ```
//! use u_timetable::config::TimetableConfig;
//!
//! let config = TimetableConfig::from_toml_str(r#"
//!     [calendar]
//!     days = 5
//!     hours_per_day = 8
//!     midday_break = [4, 5]
//!     first_afternoon_hour = 5
//!
//!     [placement]
//!     place_preassigned = false
//! "#).unwrap();
//!
//! let grid = config.calendar.to_grid().unwrap();
//! assert_eq!(grid.slots_per_week(), 40);
//! assert!(!config.placement.place_preassigned);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::WeekGrid;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TimetableConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub placement: PlacementConfig,
}

impl TimetableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

/// The school week.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CalendarConfig {
    #[serde(default = "default_days")]
    pub days: usize,

    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: usize,

    /// Hours of the midday break; must be contiguous.
    #[serde(default)]
    pub midday_break: Vec<usize>,

    #[serde(default)]
    pub first_afternoon_hour: Option<usize>,
}

fn default_days() -> usize {
    5
}

fn default_hours_per_day() -> usize {
    8
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            hours_per_day: default_hours_per_day(),
            midday_break: Vec::new(),
            first_afternoon_hour: None,
        }
    }
}

impl CalendarConfig {
    /// Builds the week grid.
    ///
    /// # Errors
    ///
    /// An empty week, a midday break outside the day or a non-contiguous
    /// midday break.
    pub fn to_grid(&self) -> Result<WeekGrid, ConfigError> {
        if self.days == 0 {
            return Err(ConfigError::Invalid("no days".into()));
        }
        if self.hours_per_day == 0 {
            return Err(ConfigError::Invalid("no hours".into()));
        }
        if let Some(&h) = self.midday_break.iter().find(|&&h| h >= self.hours_per_day) {
            return Err(ConfigError::Invalid(format!(
                "midday break hour {h} outside the day"
            )));
        }

        let mut grid = WeekGrid::new(self.days, self.hours_per_day)
            .with_midday_break(self.midday_break.clone());
        if let Some(h) = self.first_afternoon_hour {
            grid = grid.with_first_afternoon_hour(h);
        }
        if !grid.midday_break_is_contiguous() {
            return Err(ConfigError::Invalid(
                "midday break hours not contiguous".into(),
            ));
        }
        Ok(grid)
    }
}

/// Placement options.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlacementConfig {
    /// Try pre-assigned slots of non-fixed lessons after the fixed pass.
    #[serde(default = "default_true")]
    pub place_preassigned: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            place_preassigned: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TimetableConfig::from_toml_str("").unwrap();
        assert_eq!(config, TimetableConfig::default());
        assert_eq!(config.calendar.days, 5);
        assert_eq!(config.calendar.hours_per_day, 8);
        assert!(config.placement.place_preassigned);
    }

    #[test]
    fn test_partial_calendar() {
        let config = TimetableConfig::from_toml_str(
            r#"
            [calendar]
            hours_per_day = 6
            "#,
        )
        .unwrap();
        assert_eq!(config.calendar.days, 5);
        assert_eq!(config.calendar.hours_per_day, 6);
    }

    #[test]
    fn test_non_contiguous_break_rejected() {
        let config = TimetableConfig::from_toml_str(
            r#"
            [calendar]
            midday_break = [3, 5]
            "#,
        )
        .unwrap();
        let err = config.calendar.to_grid().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains("contiguous")));
    }

    #[test]
    fn test_break_outside_day_rejected() {
        let calendar = CalendarConfig {
            hours_per_day: 4,
            midday_break: vec![4],
            ..CalendarConfig::default()
        };
        assert!(calendar.to_grid().is_err());
    }

    #[test]
    fn test_empty_week_rejected() {
        let calendar = CalendarConfig {
            days: 0,
            ..CalendarConfig::default()
        };
        assert!(calendar.to_grid().is_err());
    }

    #[test]
    fn test_parse_error() {
        let err = TimetableConfig::from_toml_str("[calendar\ndays = ").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = TimetableConfig::load("/nonexistent/timetable.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
