use proptest::prelude::*;

use super::*;
use crate::model::{OverheadSquat, ShoulderMobility, SingleLegBalance};

fn uniform_categories(score: f64) -> CategoryScores {
    CategoryScores {
        strength: Some(score),
        mobility: Some(score),
        balance: Some(score),
        cardio: Some(score),
    }
}

fn names(risk: &InjuryRisk) -> Vec<&str> {
    risk.factors.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn no_inputs_means_no_risk() {
    let risk = calculate_injury_risk(&RiskInputs::default());
    assert_eq!(risk.score, 0.0);
    assert!(risk.factors.is_empty());
}

#[test]
fn baseline_from_inverted_categories() {
    let inputs = RiskInputs {
        categories: uniform_categories(60.0),
        ..Default::default()
    };
    let risk = calculate_injury_risk(&inputs);
    assert!((risk.baseline - 20.0).abs() < 1e-9);
    assert!((risk.score - 20.0).abs() < 1e-9);
}

#[test]
fn weaker_categories_raise_baseline() {
    let strong = calculate_injury_risk(&RiskInputs {
        categories: uniform_categories(90.0),
        ..Default::default()
    });
    let weak = calculate_injury_risk(&RiskInputs {
        categories: uniform_categories(30.0),
        ..Default::default()
    });
    assert!(weak.score > strong.score);
}

#[test]
fn baseline_falls_back_to_overall() {
    let inputs = RiskInputs {
        overall: Some(80.0),
        ..Default::default()
    };
    assert!((calculate_injury_risk(&inputs).baseline - 10.0).abs() < 1e-9);
}

#[test]
fn knee_valgus_adds_penalty_and_factor() {
    let inputs = RiskInputs {
        categories: uniform_categories(100.0),
        flags: MovementFlags {
            knee_valgus: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let risk = calculate_injury_risk(&inputs);
    assert!((risk.score - PENALTY_KNEE_VALGUS).abs() < 1e-9);
    assert_eq!(names(&risk), vec!["knee_valgus"]);
    assert_eq!(risk.factors[0].source, RiskSource::Physical);
    assert_eq!(risk.factors[0].weight, PENALTY_KNEE_VALGUS);
}

#[test]
fn every_flag_with_zero_fitness_clamps_to_hundred() {
    let inputs = RiskInputs {
        categories: uniform_categories(0.0),
        overall: Some(0.0),
        flags: MovementFlags {
            squat_pain: true,
            knee_valgus: true,
            forward_lean: true,
            heel_lift: true,
            shoulder_pain: true,
            shoulder_asymmetry_cm: Some(40.0),
            balance_asymmetry_s: Some(40.0),
        },
    };
    let risk = calculate_injury_risk(&inputs);
    assert_eq!(risk.score, 100.0);
    assert_eq!(risk.factors.len(), 7);
}

#[test]
fn shoulder_asymmetry_threshold_and_cap() {
    let with_gap = |gap: f64| {
        calculate_injury_risk(&RiskInputs {
            flags: MovementFlags {
                shoulder_asymmetry_cm: Some(gap),
                ..Default::default()
            },
            ..Default::default()
        })
    };
    assert!(with_gap(4.9).factors.is_empty());
    assert!((with_gap(7.0).score - 7.0).abs() < 1e-9);
    assert!((with_gap(30.0).score - 10.0).abs() < 1e-9);
    assert_eq!(names(&with_gap(7.0)), vec!["shoulder_asymmetry"]);
}

#[test]
fn balance_asymmetry_half_point_per_second() {
    let risk = calculate_injury_risk(&RiskInputs {
        flags: MovementFlags {
            balance_asymmetry_s: Some(8.0),
            ..Default::default()
        },
        ..Default::default()
    });
    assert!((risk.score - 4.0).abs() < 1e-9);
    assert_eq!(risk.factors[0].category, "balance");
}

#[test]
fn flags_from_measurements() {
    let m = RawMeasurements {
        overhead_squat: Some(OverheadSquat {
            knee_valgus: true,
            heel_lift: true,
            ..Default::default()
        }),
        shoulder_mobility: Some(ShoulderMobility {
            right_gap_cm: Some(5.0),
            left_gap_cm: Some(12.0),
            pain: true,
        }),
        single_leg_balance: Some(SingleLegBalance {
            right_eyes_open: Some(30.0),
            left_eyes_open: Some(18.0),
            ..Default::default()
        }),
        ..Default::default()
    };
    let flags = MovementFlags::from_measurements(&m);
    assert!(flags.knee_valgus && flags.heel_lift && flags.shoulder_pain);
    assert!(!flags.forward_lean && !flags.squat_pain);
    assert_eq!(flags.shoulder_asymmetry_cm, Some(7.0));
    assert_eq!(flags.balance_asymmetry_s, Some(12.0));
}

#[test]
fn flags_from_empty_measurements() {
    assert_eq!(
        MovementFlags::from_measurements(&RawMeasurements::default()),
        MovementFlags::default()
    );
}

#[test]
fn risk_level_boundaries() {
    assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(24.9), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(25.0), RiskLevel::Moderate);
    assert_eq!(RiskLevel::from_score(50.0), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(75.0), RiskLevel::VeryHigh);
    assert_eq!(RiskLevel::VeryHigh.label(), "Very High");
}

fn flags_from_mask(mask: u8, shoulder_gap: f64, balance_gap: f64) -> MovementFlags {
    MovementFlags {
        squat_pain: mask & 1 != 0,
        knee_valgus: mask & 2 != 0,
        forward_lean: mask & 4 != 0,
        heel_lift: mask & 8 != 0,
        shoulder_pain: mask & 16 != 0,
        shoulder_asymmetry_cm: (mask & 32 != 0).then_some(shoulder_gap),
        balance_asymmetry_s: (mask & 64 != 0).then_some(balance_gap),
    }
}

proptest! {
    #[test]
    fn adding_a_flag_never_lowers_risk(
        mask in 0u8..128,
        extra in 0u32..7,
        fitness in 0.0f64..100.0,
        shoulder_gap in 0.0f64..40.0,
        balance_gap in 0.0f64..40.0,
    ) {
        let categories = uniform_categories(fitness);
        let fewer = RiskInputs {
            categories,
            overall: None,
            flags: flags_from_mask(mask, shoulder_gap, balance_gap),
        };
        let more = RiskInputs {
            flags: flags_from_mask(mask | (1 << extra), shoulder_gap, balance_gap),
            ..fewer
        };
        prop_assert!(calculate_injury_risk(&more).score >= calculate_injury_risk(&fewer).score);
    }

    #[test]
    fn risk_is_always_within_bounds(
        mask in 0u8..128,
        fitness in -50.0f64..150.0,
        shoulder_gap in 0.0f64..100.0,
        balance_gap in 0.0f64..100.0,
    ) {
        let risk = calculate_injury_risk(&RiskInputs {
            categories: uniform_categories(fitness),
            overall: Some(fitness),
            flags: flags_from_mask(mask, shoulder_gap, balance_gap),
        });
        prop_assert!((0.0..=100.0).contains(&risk.score));
    }
}
