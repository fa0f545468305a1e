//! Questionnaire scoring: points per response, percentage per category, and
//! risk factors from risky choices.
//!
//! `points_earned` is derived data. The owning service calls
//! [`response_mutated`] right after it changes a response's selection, inside
//! the same transaction, and then re-runs the assessment pipeline.

pub mod insight;

use std::collections::BTreeSet;

use tracing::debug;

use crate::model::{McqCategory, Question, QuestionResponse, QuestionType};
use crate::risk::RiskFactor;

pub use insight::{CategoryInsight, category_insight};

/// Read-only questionnaire definitions injected into the engine.
pub trait QuestionBank {
    fn questions(&self) -> &[Question];

    fn question(&self, id: u32) -> Option<&Question> {
        self.questions().iter().find(|q| q.id == id)
    }
}

impl QuestionBank for [Question] {
    fn questions(&self) -> &[Question] {
        self
    }
}

impl QuestionBank for Vec<Question> {
    fn questions(&self) -> &[Question] {
        self
    }
}

/// Points for a selection. Multiple-choice questions sum their distinct
/// selected choices; single and scale questions earn the best selected
/// choice, so a stray extra id cannot push them past one answer's worth.
/// Unknown choice ids and free-text questions earn nothing.
pub fn points_for(question: &Question, selected: &[u32]) -> f64 {
    let distinct: BTreeSet<u32> = selected.iter().copied().collect();
    let points = distinct
        .into_iter()
        .filter_map(|id| question.choice(id))
        .map(|c| c.points)
        .filter(|p| p.is_finite());
    match question.question_type {
        QuestionType::Text => 0.0,
        QuestionType::Multiple => points.sum(),
        QuestionType::Single | QuestionType::Scale => points.reduce(f64::max).unwrap_or(0.0),
    }
}

/// Keep one response per question, the last one given. Earlier answers to
/// the same question are dropped; returns how many were.
pub fn dedupe_responses(responses: &mut Vec<QuestionResponse>) -> usize {
    let before = responses.len();
    let mut seen = BTreeSet::new();
    let mut kept: Vec<QuestionResponse> = responses
        .drain(..)
        .rev()
        .filter(|r| seen.insert(r.question_id))
        .collect();
    kept.reverse();
    *responses = kept;
    before - responses.len()
}

/// Recompute `points_earned` after the selection changed. Returns the new value.
pub fn response_mutated<B: QuestionBank + ?Sized>(bank: &B, response: &mut QuestionResponse) -> f64 {
    let points = match bank.question(response.question_id) {
        Some(q) => points_for(q, &response.selected_choices),
        None => {
            debug!(question_id = response.question_id, "response to unknown question earns no points");
            0.0
        }
    };
    response.points_earned = points;
    points
}

/// Recompute `points_earned` on every response.
pub fn refresh_points<B: QuestionBank + ?Sized>(bank: &B, responses: &mut [QuestionResponse]) {
    for r in responses {
        response_mutated(bank, r);
    }
}

/// Category percentage: `100 × Σ points_earned / Σ max_points` over the
/// responses whose question belongs to `category`, clamped to 0–100.
/// Free-text questions earn nothing and count toward neither sum.
/// No responses, or no attainable points, scores 0.
pub fn category_score<B: QuestionBank + ?Sized>(
    bank: &B,
    category: McqCategory,
    responses: &[QuestionResponse],
) -> f64 {
    let mut earned = 0.0;
    let mut possible = 0.0;
    for r in responses {
        let Some(q) = bank.question(r.question_id) else {
            continue;
        };
        if q.category != category || q.question_type == QuestionType::Text {
            continue;
        }
        if r.points_earned.is_finite() {
            earned += r.points_earned;
        }
        if q.max_points.is_finite() {
            possible += q.max_points;
        }
    }
    if possible <= 0.0 {
        return 0.0;
    }
    (100.0 * earned / possible).clamp(0.0, 100.0)
}

/// One entry per response with at least one risky selected choice. Several
/// risky choices on one response share an entry: their texts are joined and
/// the largest risk weight is kept.
pub fn extract_risk_factors<B: QuestionBank + ?Sized>(
    bank: &B,
    responses: &[QuestionResponse],
) -> Vec<RiskFactor> {
    let mut factors = Vec::new();
    for r in responses {
        let Some(q) = bank.question(r.question_id) else {
            continue;
        };
        let distinct: BTreeSet<u32> = r.selected_choices.iter().copied().collect();
        let risky: Vec<_> = distinct
            .into_iter()
            .filter_map(|id| q.choice(id))
            .filter(|c| c.is_risky())
            .collect();
        if risky.is_empty() {
            continue;
        }
        let detail = risky
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        let weight = risky
            .iter()
            .map(|c| c.risk_weight.min(1.0))
            .fold(0.0, f64::max);
        factors.push(RiskFactor::mcq(q.category.as_str(), &q.text, detail, weight));
    }
    factors
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
