//! Jump-ability scoring
//!
//! Scores an athlete's vertical jump from a single profile snapshot. Jump
//! height is the gap between peak touch height and standing reach; the
//! theoretical ceiling grows with height and shrinks with body weight above
//! 100 kg:
//!
//! ```text
//! theoretical_max = height × 0.25 + max(0, 100 − weight) × 0.2
//! ```
//!
//! `relative_strength` is reported as jump-per-kilogram × 100, capped at 100.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{round_half_up, safe_ratio, to_score, Profile, ProfileDefaults};

/// Jump height (cm) treated as a full speed-strength score
const SPEED_STRENGTH_REFERENCE_CM: f64 = 40.0;

const BASIC_JUMP_THRESHOLD_CM: f64 = 30.0;
const RELATIVE_STRENGTH_THRESHOLD: f64 = 50.0;
const SPEED_STRENGTH_THRESHOLD: f64 = 70.0;
const JUMP_EFFICIENCY_THRESHOLD: f64 = 80.0;

/// Derived jump-ability scores for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpAnalysis {
    /// Current vertical jump in centimeters
    pub current_jump: u32,

    /// Centimeters between the current jump and the theoretical ceiling
    pub improvement_needed: u32,

    /// Jump per body kilogram × 100, capped at 100 (not rounded)
    pub relative_strength: f64,

    /// Jump as a percentage of a 40 cm reference, capped at 100
    pub speed_strength: u32,

    /// Jump as a percentage of the theoretical ceiling, capped at 100
    pub jump_efficiency: u32,

    /// Training advice, most fundamental first
    pub recommendations: Vec<String>,
}

/// Jump-ability analyzer
pub struct JumpAnalyzer {
    defaults: ProfileDefaults,
}

impl JumpAnalyzer {
    /// Create an analyzer using the standard profile defaults
    pub fn new() -> Self {
        JumpAnalyzer {
            defaults: ProfileDefaults::default(),
        }
    }

    /// Create an analyzer with custom fallbacks for missing profile fields
    pub fn with_defaults(defaults: ProfileDefaults) -> Self {
        JumpAnalyzer { defaults }
    }

    /// Score the profile's jump ability
    pub fn analyze(&self, profile: &Profile) -> JumpAnalysis {
        let metrics = profile.jump_metrics(&self.defaults);

        let current_jump = metrics.current_jump();
        let theoretical_max =
            metrics.height_cm * 0.25 + (100.0 - metrics.weight_kg).max(0.0) * 0.2;
        let improvement_needed = (theoretical_max - current_jump).max(0.0);

        let relative_strength = (safe_ratio(current_jump, metrics.weight_kg) * 100.0).min(100.0);
        let speed_strength =
            (safe_ratio(current_jump, SPEED_STRENGTH_REFERENCE_CM) * 100.0).min(100.0);
        let jump_efficiency = (safe_ratio(current_jump, theoretical_max) * 100.0).min(100.0);

        debug!(
            current_jump,
            theoretical_max, relative_strength, speed_strength, jump_efficiency, "Jump ability scored"
        );

        let recommendations =
            Self::recommendations(current_jump, relative_strength, speed_strength, jump_efficiency);

        JumpAnalysis {
            current_jump: round_half_up(current_jump) as u32,
            improvement_needed: round_half_up(improvement_needed) as u32,
            relative_strength,
            speed_strength: to_score(speed_strength),
            jump_efficiency: to_score(jump_efficiency),
            recommendations,
        }
    }

    /// Threshold rules evaluated on the unrounded values, in fixed order
    fn recommendations(
        current_jump: f64,
        relative_strength: f64,
        speed_strength: f64,
        jump_efficiency: f64,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if current_jump < BASIC_JUMP_THRESHOLD_CM {
            recommendations.push(
                "Build basic jumping ability first: practice squat jumps and box jumps 2-3 times per week"
                    .to_string(),
            );
        }
        if relative_strength < RELATIVE_STRENGTH_THRESHOLD {
            recommendations.push(
                "Increase lower-body strength relative to body weight with squats and deadlifts"
                    .to_string(),
            );
        }
        if speed_strength < SPEED_STRENGTH_THRESHOLD {
            recommendations.push(
                "Develop explosive power with plyometrics such as depth jumps and bounding"
                    .to_string(),
            );
        }
        if jump_efficiency < JUMP_EFFICIENCY_THRESHOLD {
            recommendations.push(
                "Refine take-off technique: arm swing, approach rhythm and penultimate step"
                    .to_string(),
            );
        }
        if recommendations.is_empty() {
            recommendations.push(
                "Excellent jump profile: keep your current training and focus on consistency"
                    .to_string(),
            );
        }

        recommendations
    }
}

impl Default for JumpAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Score a profile's jump ability with the standard defaults
pub fn analyze_jump_ability(profile: &Profile) -> JumpAnalysis {
    JumpAnalyzer::new().analyze(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_profile() -> Profile {
        Profile {
            height_cm: Some(180.0),
            weight_kg: Some(75.0),
            standing_reach_cm: Some(235.0),
            max_touch_height_cm: Some(290.0),
            target_touch_height_cm: Some(310.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_analyze_reference_profile() {
        let analysis = analyze_jump_ability(&test_profile());

        // theoretical_max = 45 + 5 = 50, jump = 55
        assert_eq!(analysis.current_jump, 55);
        assert_eq!(analysis.improvement_needed, 0);
        assert_eq!(analysis.relative_strength, 55.0 / 75.0 * 100.0);
        assert_eq!(analysis.speed_strength, 100);
        assert_eq!(analysis.jump_efficiency, 100);
        assert_eq!(analysis.recommendations.len(), 1);
        assert!(analysis.recommendations[0].starts_with("Excellent"));
    }

    #[test]
    fn test_default_profile_fires_every_rule_in_order() {
        // Defaults: height 170, weight 70, reach 221, touch 241 -> 20 cm jump
        let analysis = analyze_jump_ability(&Profile::default());

        assert_eq!(analysis.current_jump, 20);
        // theoretical_max = 42.5 + 6 = 48.5
        assert_eq!(analysis.improvement_needed, 29);
        assert_eq!(analysis.speed_strength, 50);
        assert_eq!(analysis.jump_efficiency, 41);
        assert_eq!(analysis.recommendations.len(), 4);
        assert!(analysis.recommendations[0].starts_with("Build basic"));
        assert!(analysis.recommendations[1].contains("strength"));
        assert!(analysis.recommendations[2].contains("explosive"));
        assert!(analysis.recommendations[3].contains("technique"));
    }

    #[test]
    fn test_zero_weight_yields_zero_relative_strength() {
        let profile = Profile {
            weight_kg: Some(0.0),
            ..test_profile()
        };
        let analysis = analyze_jump_ability(&profile);
        assert_eq!(analysis.relative_strength, 0.0);
        assert!(!analysis.relative_strength.is_nan());
    }

    #[test]
    fn test_zero_theoretical_max_yields_zero_efficiency() {
        let profile = Profile {
            height_cm: Some(0.0),
            weight_kg: Some(120.0),
            standing_reach_cm: Some(200.0),
            max_touch_height_cm: Some(230.0),
            ..Default::default()
        };
        let analysis = analyze_jump_ability(&profile);
        assert_eq!(analysis.jump_efficiency, 0);
        assert_eq!(analysis.improvement_needed, 0);
    }

    #[test]
    fn test_touch_below_reach_is_zero_jump() {
        let profile = Profile {
            standing_reach_cm: Some(240.0),
            max_touch_height_cm: Some(230.0),
            ..test_profile()
        };
        let analysis = analyze_jump_ability(&profile);
        assert_eq!(analysis.current_jump, 0);
        assert_eq!(analysis.speed_strength, 0);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let profile = test_profile();
        let first = serde_json::to_string(&analyze_jump_ability(&profile)).unwrap();
        let second = serde_json::to_string(&analyze_jump_ability(&profile)).unwrap();
        assert_eq!(first, second);
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_jump_scores_bounded(
            height in 0.0f64..230.0,
            weight in 0.0f64..180.0,
            reach in 0.0f64..300.0,
            touch in 0.0f64..400.0,
        ) {
            let profile = Profile {
                height_cm: Some(height),
                weight_kg: Some(weight),
                standing_reach_cm: Some(reach),
                max_touch_height_cm: Some(touch),
                ..Default::default()
            };
            let analysis = analyze_jump_ability(&profile);

            prop_assert!(analysis.relative_strength.is_finite());
            prop_assert!(analysis.relative_strength >= 0.0 && analysis.relative_strength <= 100.0);
            prop_assert!(analysis.speed_strength <= 100);
            prop_assert!(analysis.jump_efficiency <= 100);
            prop_assert!(!analysis.recommendations.is_empty());
        }
    }
}
