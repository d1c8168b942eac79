//! Strength-structure assessment
//!
//! Each main lift is scored by its ratio to body weight on a stepped scale.
//! Balance compares the weakest and strongest of the trained lifts, and the
//! overall score is the rounded mean of all four.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{round_half_up, safe_ratio, Profile, ProfileDefaults};

/// Bodyweight-ratio thresholds and their scores, strongest first
type ScoreTable = [(f64, u32); 5];

const UPPER_BODY_TABLE: ScoreTable = [(1.5, 100), (1.2, 85), (1.0, 70), (0.8, 55), (0.6, 40)];
const LOWER_BODY_TABLE: ScoreTable = [(2.0, 100), (1.75, 85), (1.5, 70), (1.25, 55), (1.0, 40)];
const CORE_TABLE: ScoreTable = [(2.5, 100), (2.0, 85), (1.75, 70), (1.5, 55), (1.25, 40)];

/// Score for a trained lift below every threshold
const FLOOR_SCORE: u32 = 25;

const WEAK_AREA_THRESHOLD: u32 = 50;
const BALANCE_THRESHOLD: u32 = 70;
const STRONG_OVERALL_THRESHOLD: u32 = 80;

/// Strength-structure scores, all 0-100
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthAssessment {
    pub overall_score: u32,
    pub upper_body_score: u32,
    pub lower_body_score: u32,
    pub core_score: u32,
    pub balance_score: u32,
    pub recommendations: Vec<String>,
}

/// Strength-structure assessor
pub struct StrengthAssessor {
    defaults: ProfileDefaults,
}

impl StrengthAssessor {
    pub fn new() -> Self {
        StrengthAssessor {
            defaults: ProfileDefaults::default(),
        }
    }

    pub fn with_defaults(defaults: ProfileDefaults) -> Self {
        StrengthAssessor { defaults }
    }

    /// Assess the profile's strength structure
    pub fn assess(&self, profile: &Profile) -> StrengthAssessment {
        let weight_kg = profile.weight_kg.unwrap_or(self.defaults.weight_kg);

        let upper_body_score =
            Self::lift_score(profile.bench_press_kg.unwrap_or(0.0), weight_kg, &UPPER_BODY_TABLE);
        let lower_body_score =
            Self::lift_score(profile.squat_kg.unwrap_or(0.0), weight_kg, &LOWER_BODY_TABLE);
        let core_score =
            Self::lift_score(profile.deadlift_kg.unwrap_or(0.0), weight_kg, &CORE_TABLE);
        let balance_score = Self::balance_score(&[upper_body_score, lower_body_score, core_score]);

        let total = upper_body_score + lower_body_score + core_score + balance_score;
        let overall_score = round_half_up(f64::from(total) / 4.0) as u32;

        debug!(
            upper_body_score,
            lower_body_score, core_score, balance_score, overall_score, "Strength structure assessed"
        );

        let recommendations = Self::recommendations(
            upper_body_score,
            lower_body_score,
            core_score,
            balance_score,
            overall_score,
        );

        StrengthAssessment {
            overall_score,
            upper_body_score,
            lower_body_score,
            core_score,
            balance_score,
            recommendations,
        }
    }

    /// Stepped score for one lift; zero when the lift or body weight is absent
    fn lift_score(lift_kg: f64, weight_kg: f64, table: &ScoreTable) -> u32 {
        if lift_kg <= 0.0 || weight_kg <= 0.0 {
            return 0;
        }
        let ratio = safe_ratio(lift_kg, weight_kg);
        table
            .iter()
            .find(|(threshold, _)| ratio >= *threshold)
            .map(|(_, score)| *score)
            .unwrap_or(FLOOR_SCORE)
    }

    /// Weakest over strongest trained lift, as a percentage
    fn balance_score(scores: &[u32]) -> u32 {
        let trained: Vec<u32> = scores.iter().copied().filter(|s| *s > 0).collect();
        match (trained.iter().min(), trained.iter().max()) {
            (Some(&min), Some(&max)) => {
                round_half_up(safe_ratio(f64::from(min), f64::from(max)) * 100.0) as u32
            }
            _ => 0,
        }
    }

    fn recommendations(
        upper_body_score: u32,
        lower_body_score: u32,
        core_score: u32,
        balance_score: u32,
        overall_score: u32,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if upper_body_score < WEAK_AREA_THRESHOLD {
            recommendations
                .push("Strengthen the upper body: bench press, push-ups and rows".to_string());
        }
        if lower_body_score < WEAK_AREA_THRESHOLD {
            recommendations.push(
                "Prioritise lower-body strength: back squats, front squats and lunges".to_string(),
            );
        }
        if core_score < WEAK_AREA_THRESHOLD {
            recommendations.push(
                "Build posterior chain and core strength: deadlifts, planks and hip thrusts"
                    .to_string(),
            );
        }
        if balance_score < BALANCE_THRESHOLD {
            recommendations.push(
                "Even out strength imbalances by giving extra volume to your weakest lift"
                    .to_string(),
            );
        }
        if overall_score >= STRONG_OVERALL_THRESHOLD {
            recommendations.push(
                "Strong, well-rounded base: shift focus towards power and speed work".to_string(),
            );
        }
        if recommendations.is_empty() {
            recommendations
                .push("Maintain your current strength program and progress gradually".to_string());
        }

        recommendations
    }
}

impl Default for StrengthAssessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Assess a profile's strength structure with the standard defaults
pub fn assess_strength_structure(profile: &Profile) -> StrengthAssessment {
    StrengthAssessor::new().assess(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lifter(weight: f64, bench: f64, squat: f64, deadlift: f64) -> Profile {
        Profile {
            weight_kg: Some(weight),
            bench_press_kg: Some(bench),
            squat_kg: Some(squat),
            deadlift_kg: Some(deadlift),
            ..Default::default()
        }
    }

    #[test]
    fn test_elite_lifter() {
        let assessment = assess_strength_structure(&lifter(80.0, 120.0, 160.0, 200.0));

        assert_eq!(assessment.upper_body_score, 100);
        assert_eq!(assessment.lower_body_score, 100);
        assert_eq!(assessment.core_score, 100);
        assert_eq!(assessment.balance_score, 100);
        assert_eq!(assessment.overall_score, 100);
        assert_eq!(assessment.recommendations.len(), 1);
        assert!(assessment.recommendations[0].starts_with("Strong"));
    }

    #[test]
    fn test_stepped_thresholds() {
        // bench 1.0x -> 70, squat 1.5x -> 70, deadlift 1.75x -> 70
        let assessment = assess_strength_structure(&lifter(100.0, 100.0, 150.0, 175.0));
        assert_eq!(assessment.upper_body_score, 70);
        assert_eq!(assessment.lower_body_score, 70);
        assert_eq!(assessment.core_score, 70);

        // Below every threshold but trained -> floor score
        let assessment = assess_strength_structure(&lifter(100.0, 20.0, 30.0, 40.0));
        assert_eq!(assessment.upper_body_score, FLOOR_SCORE);
        assert_eq!(assessment.lower_body_score, FLOOR_SCORE);
        assert_eq!(assessment.core_score, FLOOR_SCORE);
    }

    #[test]
    fn test_balance_ignores_untrained_lifts() {
        // bench 1.2x -> 85, squat untrained, deadlift 1.25x -> 40
        let assessment = assess_strength_structure(&lifter(80.0, 96.0, 0.0, 100.0));
        assert_eq!(assessment.upper_body_score, 85);
        assert_eq!(assessment.lower_body_score, 0);
        assert_eq!(assessment.core_score, 40);
        // 40 / 85 = 47.06%
        assert_eq!(assessment.balance_score, 47);
        // (85 + 0 + 40 + 47) / 4 = 43
        assert_eq!(assessment.overall_score, 43);
    }

    #[test]
    fn test_overall_rounds_half_up() {
        // 100 + 85 + 100 + 85 = 370 / 4 = 92.5 -> 93
        let assessment = assess_strength_structure(&lifter(100.0, 150.0, 175.0, 250.0));
        assert_eq!(assessment.lower_body_score, 85);
        assert_eq!(assessment.balance_score, 85);
        assert_eq!(assessment.overall_score, 93);
    }

    #[test]
    fn test_no_lifts_recorded() {
        let assessment = assess_strength_structure(&Profile::default());
        assert_eq!(assessment.overall_score, 0);
        assert_eq!(assessment.balance_score, 0);
        // upper, lower, core and balance messages
        assert_eq!(assessment.recommendations.len(), 4);
    }

    #[test]
    fn test_zero_weight_scores_zero() {
        let assessment = assess_strength_structure(&lifter(0.0, 100.0, 140.0, 180.0));
        assert_eq!(assessment.upper_body_score, 0);
        assert_eq!(assessment.lower_body_score, 0);
        assert_eq!(assessment.core_score, 0);
        assert_eq!(assessment.balance_score, 0);
        assert_eq!(assessment.overall_score, 0);
    }

    #[test]
    fn test_maintain_message_when_nothing_fires() {
        // 70 / 70 / 70, balance 100, overall 78 -> no rule fires
        let assessment = assess_strength_structure(&lifter(100.0, 100.0, 150.0, 175.0));
        assert_eq!(assessment.overall_score, 78);
        assert_eq!(assessment.recommendations.len(), 1);
        assert!(assessment.recommendations[0].starts_with("Maintain"));
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_strength_scores_bounded(
            weight in 0.0f64..200.0,
            bench in 0.0f64..300.0,
            squat in 0.0f64..400.0,
            deadlift in 0.0f64..450.0,
        ) {
            let assessment = assess_strength_structure(&lifter(weight, bench, squat, deadlift));
            for score in [
                assessment.overall_score,
                assessment.upper_body_score,
                assessment.lower_body_score,
                assessment.core_score,
                assessment.balance_score,
            ] {
                prop_assert!(score <= 100);
            }
            prop_assert_eq!(assessment.clone(), assess_strength_structure(&lifter(weight, bench, squat, deadlift)));
        }
    }
}
