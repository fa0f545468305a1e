//! One scoring function per physical test.
//!
//! Ordinal scales: overhead squat and shoulder mobility grade 0–3, every other
//! test 1–4. Scorers consult the injected [`StandardsRepository`] first and
//! fall back to the built-in [`tables`] when nothing resolves. A `None` return
//! means the test was not performed.

pub mod tables;
pub mod temperature;

use tracing::debug;

use crate::error::{ScoringError, ensure_finite};
use crate::model::{
    FarmerCarry, Gender, HarvardStep, OverheadSquat, PushUp, ShoulderMobility, SingleLegBalance,
    TestType, ToeTouch,
};
use crate::standards::{StandardQuery, StandardsRepository, Thresholds, score_for_value};

pub use temperature::{
    DefaultTemperaturePolicy, TemperatureAdjustment, apply_temperature_adjustment,
};

/// Upper bound of the 0–3 movement-screen scales.
pub const MOVEMENT_SCALE_MAX: u8 = 3;
/// Upper bound of the 1–4 performance scales.
pub const PERFORMANCE_SCALE_MAX: u8 = 4;

/// Heavier carries earn credit up to this multiple of bodyweight.
pub const MAX_CARRY_LOAD_FACTOR: f64 = 1.5;

/// Demographics the scorers key their lookups on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    pub age: u32,
    pub gender: Gender,
}

impl Subject {
    pub fn new(age: u32, gender: Gender) -> Self {
        Self { age, gender }
    }

    fn query(&self, test_type: TestType) -> StandardQuery<'static> {
        StandardQuery::new(test_type, self.gender, self.age)
    }
}

/// The miss reported when no standard resolves for `query`.
fn missing_standard(query: &StandardQuery<'_>) -> ScoringError {
    let mut key = format!("{} {} age {}", query.test_type, query.gender, query.age);
    for extra in [query.variation_type, query.conditions].into_iter().flatten() {
        key.push_str(", ");
        key.push_str(extra);
    }
    ScoringError::MissingReferenceData(key)
}

/// Grade `value` on the resolved standard, or on `fallback` when none resolves.
fn grade<R: StandardsRepository + ?Sized>(
    repo: &R,
    query: &StandardQuery<'_>,
    value: f64,
    fallback: impl FnOnce() -> Thresholds,
) -> u8 {
    match repo.resolve(query) {
        Some(standard) => score_for_value(standard, value),
        None => {
            debug!(miss = %missing_standard(query), "using built-in table");
            fallback().score(value)
        }
    }
}

/// Overhead squat, 0–3: pain scores 0; otherwise 3 minus one per compensation.
pub fn score_overhead_squat(m: &OverheadSquat) -> u8 {
    if m.pain {
        return 0;
    }
    let compensations = [m.knee_valgus, m.forward_lean, m.heel_lift]
        .iter()
        .filter(|&&flag| flag)
        .count() as u8;
    MOVEMENT_SCALE_MAX.saturating_sub(compensations)
}

/// Push-up, 1–4, keyed by gender, age band and variation.
///
/// A standard resolved without a variation key describes standard push-ups,
/// so its thresholds are scaled by the variation multiplier, the same way the
/// built-in tables are.
pub fn score_push_up<R: StandardsRepository + ?Sized>(
    repo: &R,
    subject: Subject,
    m: &PushUp,
) -> u8 {
    let variation = m.variation;
    let query = subject.query(TestType::PushUp).variation(variation.as_str());
    let reps = f64::from(m.reps);
    match repo.resolve(&query) {
        Some(standard) if standard.variation_type.is_some() => score_for_value(standard, reps),
        Some(standard) => standard.thresholds.scaled(variation.multiplier()).score(reps),
        None => {
            debug!(miss = %missing_standard(&query), "using built-in table");
            tables::push_up(subject.gender, subject.age)
                .scaled(variation.multiplier())
                .score(reps)
        }
    }
}

/// Visual condition of a balance trial, used as the standard's `conditions` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceCondition {
    EyesOpen,
    EyesClosed,
}

impl BalanceCondition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EyesOpen => "eyes_open",
            Self::EyesClosed => "eyes_closed",
        }
    }

    fn fallback(self) -> Thresholds {
        match self {
            Self::EyesOpen => tables::BALANCE_EYES_OPEN,
            Self::EyesClosed => tables::BALANCE_EYES_CLOSED,
        }
    }
}

fn mean_present(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }
}

fn side_gap(right: Option<f64>, left: Option<f64>) -> Option<f64> {
    Some((right? - left?).abs())
}

/// Single-leg balance, 1–4.
///
/// Each visual condition averages its held times across sides and is graded
/// on that condition's standard. With both conditions tested the final grade
/// is their mean, rounded half up.
pub fn score_single_leg_balance<R: StandardsRepository + ?Sized>(
    repo: &R,
    subject: Subject,
    m: &SingleLegBalance,
) -> Result<Option<u8>, ScoringError> {
    for (field, v) in [
        ("right_eyes_open", m.right_eyes_open),
        ("left_eyes_open", m.left_eyes_open),
        ("right_eyes_closed", m.right_eyes_closed),
        ("left_eyes_closed", m.left_eyes_closed),
    ] {
        if let Some(v) = v {
            ensure_finite(field, v)?;
        }
    }

    let trials = [
        (BalanceCondition::EyesOpen, mean_present(&[m.right_eyes_open, m.left_eyes_open])),
        (BalanceCondition::EyesClosed, mean_present(&[m.right_eyes_closed, m.left_eyes_closed])),
    ];
    let grades: Vec<u8> = trials
        .iter()
        .filter_map(|&(condition, held)| {
            let held = held?;
            let query = subject
                .query(TestType::SingleLegBalance)
                .conditions(condition.as_str());
            Some(grade(repo, &query, held, || condition.fallback()))
        })
        .collect();

    if grades.is_empty() {
        return Ok(None);
    }
    let sum: u32 = grades.iter().map(|&g| u32::from(g)).sum();
    let count = grades.len() as u32;
    Ok(Some(((sum * 2 + count) / (count * 2)) as u8))
}

/// Largest left/right difference in held seconds across visual conditions.
pub fn balance_asymmetry(m: &SingleLegBalance) -> Option<f64> {
    let open = side_gap(m.right_eyes_open, m.left_eyes_open);
    let closed = side_gap(m.right_eyes_closed, m.left_eyes_closed);
    let widest = match (open, closed) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    };
    widest.filter(|v| v.is_finite())
}

/// Toe touch, 1–4: farther reach past the toes is better.
pub fn score_toe_touch<R: StandardsRepository + ?Sized>(
    repo: &R,
    subject: Subject,
    m: &ToeTouch,
) -> Result<u8, ScoringError> {
    let distance = ensure_finite("toe_touch.distance_cm", m.distance_cm)?;
    let query = subject.query(TestType::ToeTouch);
    Ok(grade(repo, &query, distance, || tables::toe_touch(subject.gender)))
}

/// Shoulder mobility, 0–3.
///
/// Pain scores 0. Otherwise the wider of the two fist gaps is negated so a
/// smaller gap ranks higher, graded on the standard, and mapped
/// excellent → 3, good → 2, anything lower → 1. Side-to-side asymmetry is
/// reported separately by [`shoulder_asymmetry`].
pub fn score_shoulder_mobility<R: StandardsRepository + ?Sized>(
    repo: &R,
    subject: Subject,
    m: &ShoulderMobility,
) -> Result<Option<u8>, ScoringError> {
    if m.pain {
        return Ok(Some(0));
    }
    let gaps = [m.right_gap_cm, m.left_gap_cm];
    for g in gaps.iter().flatten() {
        ensure_finite("shoulder_mobility.gap_cm", *g)?;
    }
    let Some(widest) = gaps.iter().flatten().copied().reduce(f64::max) else {
        return Ok(None);
    };
    let query = subject.query(TestType::ShoulderMobility);
    let tier = grade(repo, &query, -widest, || tables::SHOULDER_MOBILITY);
    Ok(Some(match tier {
        4 => 3,
        3 => 2,
        _ => 1,
    }))
}

/// Absolute difference between the right and left fist gaps in cm.
pub fn shoulder_asymmetry(m: &ShoulderMobility) -> Option<f64> {
    side_gap(m.right_gap_cm, m.left_gap_cm).filter(|v| v.is_finite())
}

/// Farmer's carry, 1–4.
///
/// Duration is scaled by the carried fraction of bodyweight (capped at
/// [`MAX_CARRY_LOAD_FACTOR`]) and graded against the 100%-bodyweight
/// benchmark, so lighter loads score lower for the same time.
pub fn score_farmer_carry<R: StandardsRepository + ?Sized>(
    repo: &R,
    subject: Subject,
    m: &FarmerCarry,
) -> Result<u8, ScoringError> {
    let duration = ensure_finite("farmer_carry.duration_seconds", m.duration_seconds)?;
    let percent = ensure_finite("farmer_carry.percent_bodyweight", m.percent_bodyweight)?;
    let load_factor = (percent / 100.0).clamp(0.0, MAX_CARRY_LOAD_FACTOR);
    let effective = duration * load_factor;
    let query = subject.query(TestType::FarmerCarry);
    Ok(grade(repo, &query, effective, || tables::farmer_carry(subject.gender)))
}

/// Harvard step test physical fitness index:
/// `duration × 100 / (2 × (hr1 + hr2 + hr3))`.
pub fn harvard_pfi(m: &HarvardStep) -> Result<f64, ScoringError> {
    let duration = ensure_finite("harvard_step.duration_seconds", m.duration_seconds)?;
    let beats = ensure_finite("harvard_step.hr1", m.hr1)?
        + ensure_finite("harvard_step.hr2", m.hr2)?
        + ensure_finite("harvard_step.hr3", m.hr3)?;
    if beats <= 0.0 {
        return Err(ScoringError::invalid(
            "harvard_step",
            format!("heart-rate samples must be positive, sum was {beats}"),
        ));
    }
    Ok(duration * 100.0 / (2.0 * beats))
}

/// Harvard step test, 1–4, graded on the PFI. Returns the grade and the PFI.
pub fn score_harvard_step<R: StandardsRepository + ?Sized>(
    repo: &R,
    subject: Subject,
    m: &HarvardStep,
) -> Result<(u8, f64), ScoringError> {
    let pfi = harvard_pfi(m)?;
    let query = subject.query(TestType::HarvardStepTest);
    Ok((grade(repo, &query, pfi, || tables::HARVARD_PFI), pfi))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
