//! Full athlete report
//!
//! Runs every analytics component over one profile and one log history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info_span;

use crate::calendar::{aggregate_logs_by_date, CalendarDaySummary};
use crate::config::AnalysisConfig;
use crate::diagnosis::Problem;
use crate::error::InputError;
use crate::jump::JumpAnalysis;
use crate::models::{Profile, WorkoutLogRecord};
use crate::progress::JumpProgressPoint;
use crate::streak::{calculate_streak_stats, StreakStats};
use crate::strength::StrengthAssessment;

/// Every derived view of an athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteReport {
    pub jump: JumpAnalysis,
    pub strength: StrengthAssessment,
    pub problems: Vec<Problem>,
    pub streak: StreakStats,
    pub calendar: Vec<CalendarDaySummary>,
    /// Estimated, not measured
    pub progress: Vec<JumpProgressPoint>,
}

impl AthleteReport {
    pub fn build(
        profile: &Profile,
        logs: &[WorkoutLogRecord],
        today: NaiveDate,
        config: &AnalysisConfig,
    ) -> Result<Self, InputError> {
        let _span = info_span!("athlete_report", logs = logs.len(), %today).entered();

        let jump = config.jump_analyzer().analyze(profile);
        let strength = config.strength_assessor().assess(profile);
        let problems = config.diagnoser().diagnose(&jump, &strength);

        let mut sorted_logs = logs.to_vec();
        sorted_logs.sort_by(|a, b| a.date.cmp(&b.date));
        let calendar = aggregate_logs_by_date(&sorted_logs)?;

        Ok(AthleteReport {
            jump,
            strength,
            problems,
            streak: calculate_streak_stats(logs, today)?,
            calendar,
            progress: config.progress_projector().project(profile, logs)?,
        })
    }
}
