//! Test grades → four category scores → one overall score, all on 0–100.
//!
//! Each ordinal grade is normalized against its own scale (0–3 or 1–4) before
//! averaging, so a perfect movement screen and a perfect performance test both
//! count as 100. Categories with no performed tests stay empty and drop out of
//! the overall weighted mean.

use serde::Serialize;

use crate::physical::{MOVEMENT_SCALE_MAX, PERFORMANCE_SCALE_MAX};

/// Category weights in the overall score (must sum to 1.0).
pub const W_STRENGTH: f64 = 0.30;
pub const W_MOBILITY: f64 = 0.25;
pub const W_BALANCE: f64 = 0.20;
pub const W_CARDIO: f64 = 0.25;

/// Final per-test grades (computed or trainer-overridden).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TestGrades {
    pub overhead_squat: Option<u8>,
    pub push_up: Option<u8>,
    pub single_leg_balance: Option<u8>,
    pub toe_touch: Option<u8>,
    pub shoulder_mobility: Option<u8>,
    pub farmer_carry: Option<u8>,
    pub harvard_step_test: Option<u8>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryScores {
    pub strength: Option<f64>,
    pub mobility: Option<f64>,
    pub balance: Option<f64>,
    pub cardio: Option<f64>,
}

impl CategoryScores {
    /// (name, weight, score) for each category, in display order.
    pub fn weighted(&self) -> [(&'static str, f64, Option<f64>); 4] {
        [
            ("strength", W_STRENGTH, self.strength),
            ("mobility", W_MOBILITY, self.mobility),
            ("balance", W_BALANCE, self.balance),
            ("cardio", W_CARDIO, self.cardio),
        ]
    }
}

/// Ordinal grade as a percentage of its scale maximum.
pub fn normalize_ordinal(grade: u8, scale_max: u8) -> f64 {
    if scale_max == 0 {
        return 0.0;
    }
    (f64::from(grade.min(scale_max)) / f64::from(scale_max)) * 100.0
}

fn mean(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    Some(present.iter().sum::<f64>() / present.len() as f64)
}

fn performance(grade: Option<u8>) -> Option<f64> {
    grade.map(|g| normalize_ordinal(g, PERFORMANCE_SCALE_MAX))
}

fn movement(grade: Option<u8>) -> Option<f64> {
    grade.map(|g| normalize_ordinal(g, MOVEMENT_SCALE_MAX))
}

pub fn strength_score(push_up: Option<u8>, farmer_carry: Option<u8>) -> Option<f64> {
    mean(&[performance(push_up), performance(farmer_carry)])
}

pub fn mobility_score(
    toe_touch: Option<u8>,
    shoulder_mobility: Option<u8>,
    overhead_squat: Option<u8>,
) -> Option<f64> {
    mean(&[
        performance(toe_touch),
        movement(shoulder_mobility),
        movement(overhead_squat),
    ])
}

pub fn balance_score(single_leg_balance: Option<u8>) -> Option<f64> {
    performance(single_leg_balance)
}

pub fn cardio_score(harvard_step_test: Option<u8>) -> Option<f64> {
    performance(harvard_step_test)
}

pub fn category_scores(grades: &TestGrades) -> CategoryScores {
    CategoryScores {
        strength: strength_score(grades.push_up, grades.farmer_carry),
        mobility: mobility_score(
            grades.toe_touch,
            grades.shoulder_mobility,
            grades.overhead_squat,
        ),
        balance: balance_score(grades.single_leg_balance),
        cardio: cardio_score(grades.harvard_step_test),
    }
}

/// Weighted mean of the present categories, before any temperature nudge.
/// Weights of missing categories are redistributed proportionally.
pub fn overall_score(categories: &CategoryScores) -> Option<f64> {
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    for (_, weight, score) in categories.weighted() {
        if let Some(s) = score.filter(|s| s.is_finite()) {
            weighted_sum += s * weight;
            weight_sum += weight;
        }
    }
    if weight_sum == 0.0 {
        None
    } else {
        Some(weighted_sum / weight_sum)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
