use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Wire format for every date string handled by the crate
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Body and performance snapshot for one athlete.
///
/// Every field is optional because the external profile table allows nulls.
/// Missing values are resolved against [`ProfileDefaults`] at the start of
/// each analysis; a present value (even `0.0`) is always used as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Standing height in centimeters
    pub height_cm: Option<f64>,

    /// Body weight in kilograms
    pub weight_kg: Option<f64>,

    /// Stationary overhead fingertip reach in centimeters
    pub standing_reach_cm: Option<f64>,

    /// Best fingertip touch height at the peak of a jump
    pub max_touch_height_cm: Option<f64>,

    /// Touch height the athlete is training towards
    pub target_touch_height_cm: Option<f64>,

    /// One-rep max bench press in kilograms
    pub bench_press_kg: Option<f64>,

    /// One-rep max back squat in kilograms
    pub squat_kg: Option<f64>,

    /// One-rep max deadlift in kilograms
    pub deadlift_kg: Option<f64>,
}

/// Fallback values for missing profile fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDefaults {
    pub height_cm: f64,
    pub weight_kg: f64,
    /// Standing reach as a multiple of height
    pub reach_to_height_ratio: f64,
    /// Touch height above standing reach when no jump has been recorded
    pub touch_over_reach_cm: f64,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        ProfileDefaults {
            height_cm: 170.0,
            weight_kg: 70.0,
            reach_to_height_ratio: 1.3,
            touch_over_reach_cm: 20.0,
        }
    }
}

/// Profile with every jump-related default applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpMetrics {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub standing_reach_cm: f64,
    pub max_touch_height_cm: f64,
    pub target_touch_height_cm: f64,
}

impl JumpMetrics {
    /// Jump height implied by touch height over standing reach, floored at zero
    pub fn current_jump(&self) -> f64 {
        (self.max_touch_height_cm - self.standing_reach_cm).max(0.0)
    }
}

impl Profile {
    /// Resolve the jump-related fields, filling gaps from `defaults`.
    ///
    /// Reach falls back to height × ratio, max touch to reach + offset, and
    /// target touch to the max touch height (no headroom).
    pub fn jump_metrics(&self, defaults: &ProfileDefaults) -> JumpMetrics {
        let height_cm = self.height_cm.unwrap_or(defaults.height_cm);
        let weight_kg = self.weight_kg.unwrap_or(defaults.weight_kg);
        let standing_reach_cm = self
            .standing_reach_cm
            .unwrap_or(height_cm * defaults.reach_to_height_ratio);
        let max_touch_height_cm = self
            .max_touch_height_cm
            .unwrap_or(standing_reach_cm + defaults.touch_over_reach_cm);
        let target_touch_height_cm = self.target_touch_height_cm.unwrap_or(max_touch_height_cm);

        JumpMetrics {
            height_cm,
            weight_kg,
            standing_reach_cm,
            max_touch_height_cm,
            target_touch_height_cm,
        }
    }
}

/// One workout-log row as exported from the external store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLogRecord {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,

    /// Free-form completion status (e.g. "completed", "skipped")
    #[serde(default)]
    pub status: Option<String>,

    /// Free-form mood tag
    #[serde(default)]
    pub mood: Option<String>,

    /// Session length in minutes
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

impl WorkoutLogRecord {
    /// Record carrying only a date, as used for streak queries
    pub fn on(date: impl Into<String>) -> Self {
        WorkoutLogRecord {
            date: date.into(),
            ..Default::default()
        }
    }

    /// Parse the record's date
    pub fn log_date(&self) -> Result<NaiveDate, InputError> {
        parse_date("date", &self.date)
    }

    /// Duration with missing values counted as zero
    pub fn minutes(&self) -> u32 {
        self.duration_minutes.unwrap_or(0)
    }
}

/// Parse a canonical `YYYY-MM-DD` string, naming `field` in the error.
///
/// Only the zero-padded form is accepted, so two strings parse to the same
/// date exactly when they are equal.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, InputError> {
    let invalid = || InputError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    };

    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())?;
    if date.format(DATE_FORMAT).to_string() != value {
        return Err(invalid());
    }
    Ok(date)
}

/// Round half-up to the nearest integer
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round half-up to one decimal place
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// `numerator / denominator`, or zero when the quotient is undefined
pub(crate) fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Clamp a 0-100 style value into a whole-number percentage
pub(crate) fn to_score(value: f64) -> u32 {
    round_half_up(value.clamp(0.0, 100.0)) as u32
}
