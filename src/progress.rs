//! Jump-progress projection
//!
//! Produces an *estimated* jump-height trend from workout history. Nothing
//! here is measured: every session adds a fixed increment scaled by its
//! duration, and the running total is capped a little above the athlete's
//! target. Present it to users as a projection, not as recorded data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InputError;
use crate::models::{round_to_tenth, Profile, ProfileDefaults, WorkoutLogRecord};

/// Parameters of the linear per-session improvement model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressModel {
    /// Centimeters gained per full hour of training
    pub increment_cm_per_hour: f64,
    /// Session length (hours) beyond which no further gain is credited
    pub max_credited_hours: f64,
    /// Projection ceiling as a multiple of the target jump
    pub ceiling_factor: f64,
}

impl Default for ProgressModel {
    fn default() -> Self {
        ProgressModel {
            increment_cm_per_hour: 0.5,
            max_credited_hours: 1.5,
            ceiling_factor: 1.2,
        }
    }
}

/// One projected point, aligned 1:1 with an input log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpProgressPoint {
    pub date: NaiveDate,
    /// Estimated jump height in centimeters
    pub jump_height: f64,
    /// Standing reach plus estimated jump height
    pub max_touch_height: f64,
    pub target_height: f64,
}

/// Jump-progress projector
pub struct ProgressProjector {
    model: ProgressModel,
    defaults: ProfileDefaults,
}

impl ProgressProjector {
    pub fn new() -> Self {
        ProgressProjector {
            model: ProgressModel::default(),
            defaults: ProfileDefaults::default(),
        }
    }

    pub fn with_config(model: ProgressModel, defaults: ProfileDefaults) -> Self {
        ProgressProjector { model, defaults }
    }

    /// Project jump height across the logs, sorted ascending by date
    pub fn project(
        &self,
        profile: &Profile,
        logs: &[WorkoutLogRecord],
    ) -> Result<Vec<JumpProgressPoint>, InputError> {
        let metrics = profile.jump_metrics(&self.defaults);
        let base_jump = metrics.current_jump();
        let target_jump = metrics.target_touch_height_cm - metrics.standing_reach_cm;
        let ceiling = target_jump * self.model.ceiling_factor;

        let mut dated = logs
            .iter()
            .map(|log| log.log_date().map(|date| (date, log.minutes())))
            .collect::<Result<Vec<_>, _>>()?;
        dated.sort_by_key(|(date, _)| *date);

        let mut jump_height = base_jump;
        let points: Vec<JumpProgressPoint> = dated
            .into_iter()
            .map(|(date, minutes)| {
                jump_height = (jump_height + self.session_gain(minutes)).min(ceiling);
                JumpProgressPoint {
                    date,
                    jump_height: round_to_tenth(jump_height),
                    max_touch_height: round_to_tenth(metrics.standing_reach_cm + jump_height),
                    target_height: metrics.target_touch_height_cm,
                }
            })
            .collect();

        debug!(base_jump, target_jump, sessions = points.len(), "Jump progress projected");
        Ok(points)
    }

    fn session_gain(&self, minutes: u32) -> f64 {
        let hours = (f64::from(minutes) / 60.0).min(self.model.max_credited_hours);
        self.model.increment_cm_per_hour * hours
    }
}

impl Default for ProgressProjector {
    fn default() -> Self {
        Self::new()
    }
}

/// Project jump progress with the default model
pub fn calculate_jump_progress(
    profile: &Profile,
    logs: &[WorkoutLogRecord],
) -> Result<Vec<JumpProgressPoint>, InputError> {
    ProgressProjector::new().project(profile, logs)
}
