// Library interface for VertRS modules
// The analytics modules are pure; import, config and logging serve the CLI

pub mod calendar;
pub mod config;
pub mod diagnosis;
pub mod error;
pub mod import;
pub mod jump;
pub mod logging;
pub mod models;
pub mod progress;
pub mod report;
pub mod streak;
pub mod strength;

// Re-export commonly used types for convenience
pub use calendar::{
    aggregate_logs_by_date, fill_calendar_range, summarize_period, CalendarDaySummary,
    PeriodSummary,
};
pub use config::{AnalysisConfig, AppConfig};
pub use diagnosis::{
    diagnose, DiagnosisThresholds, Problem, ProblemDiagnoser, ProblemType, Severity,
};
pub use error::{InputError, Result, VertRsError};
pub use jump::{analyze_jump_ability, JumpAnalysis, JumpAnalyzer};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::*;
pub use progress::{calculate_jump_progress, JumpProgressPoint, ProgressModel, ProgressProjector};
pub use report::AthleteReport;
pub use streak::{calculate_streak_days, calculate_streak_stats, StreakStats};
pub use strength::{assess_strength_structure, StrengthAssessment, StrengthAssessor};
