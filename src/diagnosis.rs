//! Core-problem diagnosis
//!
//! Turns a jump analysis and a strength assessment into a ranked list of
//! training deficiencies. Every rule is evaluated independently; the result
//! is ordered by severity with rule order preserved among equal severities.
//!
//! Note that `relative_strength` arrives on the ×100 scale produced by
//! [`crate::jump`], while the default strength threshold of `1.5` reads as an
//! unscaled jump/weight ratio. The two are compared as-is.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use tracing::debug;

use crate::jump::JumpAnalysis;
use crate::strength::StrengthAssessment;

/// Deficiency category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
    Technique,
    Strength,
    Power,
    UpperBody,
    Core,
    Balance,
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemType::Technique => write!(f, "technique"),
            ProblemType::Strength => write!(f, "strength"),
            ProblemType::Power => write!(f, "power"),
            ProblemType::UpperBody => write!(f, "upper_body"),
            ProblemType::Core => write!(f, "core"),
            ProblemType::Balance => write!(f, "balance"),
        }
    }
}

/// How urgently a problem should be addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Ordinal used for ranking: high=3, medium=2, low=1
    pub fn weight(&self) -> u8 {
        match self {
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// A diagnosed training deficiency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub problem_type: ProblemType,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub recommendations: Vec<String>,
}

/// Rule thresholds; a problem fires when the metric is strictly below
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosisThresholds {
    pub jump_efficiency: f64,
    pub relative_strength: f64,
    pub speed_strength: f64,
    pub upper_body_score: u32,
    pub core_score: u32,
    pub balance_score: u32,
}

impl Default for DiagnosisThresholds {
    fn default() -> Self {
        DiagnosisThresholds {
            jump_efficiency: 80.0,
            relative_strength: 1.5,
            speed_strength: 70.0,
            upper_body_score: 70,
            core_score: 75,
            balance_score: 70,
        }
    }
}

/// Rule-based problem diagnoser
pub struct ProblemDiagnoser {
    thresholds: DiagnosisThresholds,
}

impl ProblemDiagnoser {
    pub fn new() -> Self {
        ProblemDiagnoser {
            thresholds: DiagnosisThresholds::default(),
        }
    }

    pub fn with_thresholds(thresholds: DiagnosisThresholds) -> Self {
        ProblemDiagnoser { thresholds }
    }

    /// Diagnose problems, highest severity first
    pub fn diagnose(&self, jump: &JumpAnalysis, strength: &StrengthAssessment) -> Vec<Problem> {
        let t = &self.thresholds;
        let fired = [
            (f64::from(jump.jump_efficiency) < t.jump_efficiency, ProblemType::Technique),
            (jump.relative_strength < t.relative_strength, ProblemType::Strength),
            (f64::from(jump.speed_strength) < t.speed_strength, ProblemType::Power),
            (strength.upper_body_score < t.upper_body_score, ProblemType::UpperBody),
            (strength.core_score < t.core_score, ProblemType::Core),
            (strength.balance_score < t.balance_score, ProblemType::Balance),
        ];

        let mut problems: Vec<Problem> = fired
            .iter()
            .filter(|(hit, _)| *hit)
            .map(|(_, problem_type)| Self::problem(*problem_type))
            .collect();

        // sort_by_key is stable: equal severities keep rule order
        problems.sort_by_key(|p| Reverse(p.severity.weight()));

        debug!(count = problems.len(), "Problems diagnosed");
        problems
    }

    fn problem(problem_type: ProblemType) -> Problem {
        let (title, description, severity, recommendations) = match problem_type {
            ProblemType::Technique => (
                "Jump technique needs work",
                "Your jump converts less of your physical potential into height than expected.",
                Severity::Medium,
                [
                    "Film your approach and take-off to check arm swing timing",
                    "Practice a fast, low penultimate step",
                    "Add 10 minutes of approach-jump drills to each session",
                ],
            ),
            ProblemType::Strength => (
                "Insufficient relative strength",
                "Your strength relative to body weight limits how much force you can put into the ground.",
                Severity::High,
                [
                    "Squat and deadlift twice a week in the 3-6 rep range",
                    "Add single-leg work such as Bulgarian split squats",
                    "Manage body weight to improve strength-to-weight ratio",
                ],
            ),
            ProblemType::Power => (
                "Low explosive power",
                "You cannot yet produce force quickly enough to jump high.",
                Severity::High,
                [
                    "Add plyometrics: depth jumps, box jumps and bounds",
                    "Train Olympic lift variations such as hang cleans",
                    "Keep plyometric sets short and fully recovered",
                ],
            ),
            ProblemType::UpperBody => (
                "Upper-body strength deficit",
                "A weak upper body reduces arm-swing contribution and overall stability.",
                Severity::Medium,
                [
                    "Bench press or push-up progressions twice a week",
                    "Balance pressing with rows and pull-ups",
                    "Train overhead pressing for shoulder stability",
                ],
            ),
            ProblemType::Core => (
                "Weak core and posterior chain",
                "Force leaks through the trunk during take-off and landing.",
                Severity::High,
                [
                    "Deadlift or Romanian deadlift weekly",
                    "Anti-rotation work such as Pallof presses and planks",
                    "Hip thrusts and back extensions for the posterior chain",
                ],
            ),
            ProblemType::Balance => (
                "Unbalanced strength profile",
                "Large gaps between your lifts increase injury risk and limit transfer.",
                Severity::Medium,
                [
                    "Give extra volume to your weakest lift",
                    "Use unilateral exercises to expose side-to-side differences",
                    "Reassess your lifts every 4-6 weeks",
                ],
            ),
        };

        Problem {
            problem_type,
            title: title.to_string(),
            description: description.to_string(),
            severity,
            recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl Default for ProblemDiagnoser {
    fn default() -> Self {
        Self::new()
    }
}

/// Diagnose problems with the default thresholds
pub fn diagnose(jump: &JumpAnalysis, strength: &StrengthAssessment) -> Vec<Problem> {
    ProblemDiagnoser::new().diagnose(jump, strength)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jump(efficiency: u32, relative: f64, speed: u32) -> JumpAnalysis {
        JumpAnalysis {
            current_jump: 50,
            improvement_needed: 0,
            relative_strength: relative,
            speed_strength: speed,
            jump_efficiency: efficiency,
            recommendations: vec![],
        }
    }

    fn strength(upper: u32, core: u32, balance: u32) -> StrengthAssessment {
        StrengthAssessment {
            overall_score: 80,
            upper_body_score: upper,
            lower_body_score: 85,
            core_score: core,
            balance_score: balance,
            recommendations: vec![],
        }
    }

    #[test]
    fn test_no_problems() {
        let problems = diagnose(&jump(90, 70.0, 90), &strength(85, 85, 90));
        assert!(problems.is_empty());
    }

    #[test]
    fn test_all_rules_fire_sorted_by_severity() {
        let problems = diagnose(&jump(50, 1.0, 40), &strength(40, 40, 40));
        let types: Vec<ProblemType> = problems.iter().map(|p| p.problem_type).collect();

        assert_eq!(
            types,
            vec![
                ProblemType::Strength,
                ProblemType::Power,
                ProblemType::Core,
                ProblemType::Technique,
                ProblemType::UpperBody,
                ProblemType::Balance,
            ]
        );
        assert!(problems.windows(2).all(|w| w[0].severity.weight() >= w[1].severity.weight()));
        assert!(problems.iter().all(|p| p.recommendations.len() == 3));
    }

    #[test]
    fn test_equal_severity_keeps_rule_order() {
        // Power and core are both high; power comes first in the rule table
        let problems = diagnose(&jump(90, 70.0, 40), &strength(85, 50, 90));
        let types: Vec<ProblemType> = problems.iter().map(|p| p.problem_type).collect();
        assert_eq!(types, vec![ProblemType::Power, ProblemType::Core]);
    }

    #[test]
    fn test_relative_strength_threshold_uses_unscaled_ratio() {
        // relative_strength is on the x100 scale, so 40.0 (a weak jumper)
        // does not trigger the 1.5 threshold; only near-zero values do.
        let problems = diagnose(&jump(90, 40.0, 90), &strength(85, 85, 90));
        assert!(problems.is_empty());

        let problems = diagnose(&jump(90, 1.2, 90), &strength(85, 85, 90));
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].problem_type, ProblemType::Strength);
        assert_eq!(problems[0].severity, Severity::High);
    }

    #[test]
    fn test_custom_thresholds() {
        let diagnoser = ProblemDiagnoser::with_thresholds(DiagnosisThresholds {
            relative_strength: 50.0,
            ..Default::default()
        });
        let problems = diagnoser.diagnose(&jump(90, 40.0, 90), &strength(85, 85, 90));
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].problem_type, ProblemType::Strength);
    }

    #[test]
    fn test_problem_serialization() {
        let problems = diagnose(&jump(90, 70.0, 90), &strength(40, 85, 90));
        let json = serde_json::to_value(&problems[0]).unwrap();
        assert_eq!(json["type"], "upper_body");
        assert_eq!(json["severity"], "medium");
        assert_eq!(ProblemType::UpperBody.to_string(), "upper_body");
    }
}
