//! Full scoring of one assessment.
//!
//! [`ScoringEngine::compute`] is pure: it reads the assessment and the
//! injected reference data and returns a complete replacement for every
//! computed field. [`ScoringEngine::apply`] swaps that bundle in as a whole,
//! so callers never observe a half-scored assessment. Overridden fields pass
//! through untouched, and running the engine twice on unchanged inputs yields
//! identical fields.

mod batch;
mod diff;
mod report;
pub mod store;

use std::error::Error;
use std::path::Path;

use tracing::{info, warn};

use crate::category::{CategoryScores, TestGrades, category_scores, overall_score};
use crate::composite::{CompositeInputs, comprehensive_score};
use crate::error::ScoringError;
use crate::mcq::{self, CategoryInsight, QuestionBank, category_insight, category_score};
use crate::model::{
    Assessment, AssessmentScores, Environment, McqCategory, QuestionResponse, Scored, TestType,
};
use crate::normative::{
    NormativeRepository, PercentileResult, PerformanceAge, lookup_percentile, performance_age,
};
use crate::physical::{
    DefaultTemperaturePolicy, Subject, TemperatureAdjustment, apply_temperature_adjustment,
    harvard_pfi, score_farmer_carry, score_harvard_step, score_overhead_squat, score_push_up,
    score_shoulder_mobility, score_single_leg_balance, score_toe_touch,
};
use crate::reference::{self, ReferenceData};
use crate::risk::{MovementFlags, RiskInputs, calculate_injury_risk};
use crate::standards::StandardsRepository;

pub use batch::{BatchSummary, recalculate};
pub use diff::{AssessmentDiff, FieldDelta, compute_diff};
pub use store::{load_assessment, save_assessment};

static DEFAULT_TEMPERATURE_POLICY: DefaultTemperaturePolicy = DefaultTemperaturePolicy;
static NO_TEMPERATURE_ADJUSTMENT: fn(f64, Environment) -> f64 = |_, _| 0.0;

/// A scoring step that failed; its field kept the prior value (or zero).
#[derive(Debug, Clone, PartialEq)]
pub struct StepFailure {
    pub field: &'static str,
    pub error: ScoringError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOutcome {
    pub scores: AssessmentScores,
    /// One response per question, the last given, with `points_earned`
    /// recomputed.
    pub responses: Vec<QuestionResponse>,
    pub failures: Vec<StepFailure>,
}

/// Overall-score ranking against the `overall` normative rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverallStanding {
    pub percentile: Option<PercentileResult>,
    pub performance_age: Option<PerformanceAge>,
}

#[derive(Default)]
struct Steps {
    failures: Vec<StepFailure>,
}

impl Steps {
    /// Refresh a fallible field. A failed step is logged and keeps the prior
    /// value, or zero when there was none.
    fn refresh<T: Copy + Default>(
        &mut self,
        field: &'static str,
        prior: Scored<T>,
        compute: impl FnOnce() -> Result<Option<T>, ScoringError>,
    ) -> Scored<T> {
        prior.refreshed(|| match compute() {
            Ok(value) => value,
            Err(error) => {
                warn!(field, %error, "scoring step failed, keeping prior value");
                self.failures.push(StepFailure { field, error });
                Some(prior.value().unwrap_or_default())
            }
        })
    }
}

/// Scores assessments against injected, read-only reference data.
#[derive(Clone, Copy)]
pub struct ScoringEngine<'a> {
    standards: &'a dyn StandardsRepository,
    normative: &'a dyn NormativeRepository,
    questions: &'a dyn QuestionBank,
    temperature: &'a dyn TemperatureAdjustment,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self::from_parts(reference, reference, reference)
    }

    pub fn from_parts(
        standards: &'a dyn StandardsRepository,
        normative: &'a dyn NormativeRepository,
        questions: &'a dyn QuestionBank,
    ) -> Self {
        Self {
            standards,
            normative,
            questions,
            temperature: &DEFAULT_TEMPERATURE_POLICY,
        }
    }

    pub fn with_temperature_policy(mut self, policy: &'a dyn TemperatureAdjustment) -> Self {
        self.temperature = policy;
        self
    }

    /// Score overall as measured, ignoring test-day temperature.
    pub fn without_temperature_adjustment(self) -> Self {
        self.with_temperature_policy(&NO_TEMPERATURE_ADJUSTMENT)
    }

    /// Every computed field for `assessment`, without modifying it.
    pub fn compute(&self, assessment: &Assessment) -> ScoringOutcome {
        let prior = &assessment.scores;
        let m = &assessment.measurements;
        let subject = Subject::new(assessment.client.age, assessment.client.gender);
        let standards = self.standards;
        let mut steps = Steps::default();

        let overhead_squat = steps.refresh("overhead_squat", prior.overhead_squat, || {
            Ok(m.overhead_squat.as_ref().map(score_overhead_squat))
        });
        let push_up = steps.refresh("push_up", prior.push_up, || {
            Ok(m.push_up.as_ref().map(|p| score_push_up(standards, subject, p)))
        });
        let single_leg_balance =
            steps.refresh("single_leg_balance", prior.single_leg_balance, || {
                match m.single_leg_balance.as_ref() {
                    Some(b) => score_single_leg_balance(standards, subject, b),
                    None => Ok(None),
                }
            });
        let toe_touch = steps.refresh("toe_touch", prior.toe_touch, || {
            m.toe_touch
                .as_ref()
                .map(|t| score_toe_touch(standards, subject, t))
                .transpose()
        });
        let shoulder_mobility = steps.refresh("shoulder_mobility", prior.shoulder_mobility, || {
            Ok(m.shoulder_mobility
                .as_ref()
                .map(|s| score_shoulder_mobility(standards, subject, s))
                .transpose()?
                .flatten())
        });
        let farmer_carry = steps.refresh("farmer_carry", prior.farmer_carry, || {
            m.farmer_carry
                .as_ref()
                .map(|f| score_farmer_carry(standards, subject, f))
                .transpose()
        });
        let harvard_step_test = steps.refresh("harvard_step_test", prior.harvard_step_test, || {
            m.harvard_step
                .as_ref()
                .map(|h| score_harvard_step(standards, subject, h).map(|(grade, _)| grade))
                .transpose()
        });
        let harvard_pfi = m.harvard_step.as_ref().and_then(|h| harvard_pfi(h).ok());

        let grades = TestGrades {
            overhead_squat: overhead_squat.value(),
            push_up: push_up.value(),
            single_leg_balance: single_leg_balance.value(),
            toe_touch: toe_touch.value(),
            shoulder_mobility: shoulder_mobility.value(),
            farmer_carry: farmer_carry.value(),
            harvard_step_test: harvard_step_test.value(),
        };
        let fresh = category_scores(&grades);
        let strength = prior.strength.refreshed(|| fresh.strength);
        let mobility = prior.mobility.refreshed(|| fresh.mobility);
        let balance = prior.balance.refreshed(|| fresh.balance);
        let cardio = prior.cardio.refreshed(|| fresh.cardio);

        let categories = CategoryScores {
            strength: strength.value(),
            mobility: mobility.value(),
            balance: balance.value(),
            cardio: cardio.value(),
        };
        let conditions = assessment.conditions;
        let overall = prior.overall.refreshed(|| {
            overall_score(&categories).map(|score| {
                apply_temperature_adjustment(
                    score,
                    conditions.temperature_c,
                    conditions.environment,
                    self.temperature,
                )
            })
        });

        let flags = MovementFlags::from_measurements(m);
        let risk = calculate_injury_risk(&RiskInputs {
            categories,
            overall: overall.value(),
            flags,
        });
        let has_physical = overall.value().is_some() || flags != MovementFlags::default();
        let injury_risk = prior
            .injury_risk
            .refreshed(|| has_physical.then_some(risk.score));
        let mut risk_factors = risk.factors;

        let mut responses = assessment.responses.clone();
        let dropped = mcq::dedupe_responses(&mut responses);
        if dropped > 0 {
            warn!(dropped, "duplicate questionnaire responses, keeping the last per question");
        }
        mcq::refresh_points(self.questions, &mut responses);
        let answered = !responses.is_empty();
        let questionnaire =
            |c: McqCategory| answered.then(|| category_score(self.questions, c, &responses));
        let knowledge = prior
            .knowledge
            .refreshed(|| questionnaire(McqCategory::Knowledge));
        let lifestyle = prior
            .lifestyle
            .refreshed(|| questionnaire(McqCategory::Lifestyle));
        let readiness = prior
            .readiness
            .refreshed(|| questionnaire(McqCategory::Readiness));
        risk_factors.extend(mcq::extract_risk_factors(self.questions, &responses));

        let composite = CompositeInputs {
            overall: overall.value(),
            knowledge: knowledge.value(),
            lifestyle: lifestyle.value(),
            readiness: readiness.value(),
        };
        let comprehensive = prior
            .comprehensive
            .refreshed(|| (!composite.is_empty()).then(|| comprehensive_score(&composite)));

        ScoringOutcome {
            scores: AssessmentScores {
                overhead_squat,
                push_up,
                single_leg_balance,
                toe_touch,
                shoulder_mobility,
                farmer_carry,
                harvard_step_test,
                harvard_pfi,
                strength,
                mobility,
                balance,
                cardio,
                overall,
                injury_risk,
                risk_factors,
                knowledge,
                lifestyle,
                readiness,
                comprehensive,
            },
            responses,
            failures: steps.failures,
        }
    }

    /// Recompute and replace every computed field in one assignment.
    pub fn apply(&self, assessment: &mut Assessment) -> Vec<StepFailure> {
        let outcome = self.compute(assessment);
        assessment.scores = outcome.scores;
        assessment.responses = outcome.responses;
        outcome.failures
    }

    /// Percentile and performance age of the overall score, when `overall`
    /// normative rows exist.
    pub fn overall_standing(&self, assessment: &Assessment) -> OverallStanding {
        let Some(score) = assessment.scores.overall.value() else {
            return OverallStanding::default();
        };
        let (age, gender) = (assessment.client.age, assessment.client.gender);
        OverallStanding {
            percentile: lookup_percentile(self.normative, TestType::Overall, score, age, gender),
            performance_age: performance_age(self.normative, TestType::Overall, score, age, gender),
        }
    }
}

/// Recommendations for each questionnaire category that has a score.
pub fn insights(scores: &AssessmentScores) -> Vec<CategoryInsight> {
    McqCategory::ALL
        .iter()
        .filter_map(|&c| {
            let score = match c {
                McqCategory::Knowledge => scores.knowledge,
                McqCategory::Lifestyle => scores.lifestyle,
                McqCategory::Readiness => scores.readiness,
            };
            score.value().map(|s| category_insight(c, s))
        })
        .collect()
}

fn engine_for(data: &ReferenceData, adjust_temperature: bool) -> ScoringEngine<'_> {
    let engine = ScoringEngine::new(data);
    if adjust_temperature {
        engine
    } else {
        engine.without_temperature_adjustment()
    }
}

/// `fitscore score` entry point.
pub fn run_score(
    path: &Path,
    reference_path: Option<&Path>,
    json: bool,
    write: bool,
    adjust_temperature: bool,
) -> Result<(), Box<dyn Error>> {
    let data = reference::load(reference_path)?;
    let engine = engine_for(&data, adjust_temperature);
    let mut assessment = load_assessment(path)?;
    let failures = engine.apply(&mut assessment);
    let standing = engine.overall_standing(&assessment);
    let insights = insights(&assessment.scores);

    if json {
        report::print_json(&assessment, &standing, &insights, &failures)?;
    } else {
        report::print_report(&assessment, &standing, &insights, &failures);
    }

    if write {
        save_assessment(path, &assessment)?;
        info!(path = %path.display(), "wrote scored assessment");
    }
    Ok(())
}

/// `fitscore batch` entry point. Returns whether every file succeeded.
pub fn run_batch(
    dir: &Path,
    exclude: &[String],
    reference_path: Option<&Path>,
    dry_run: bool,
    json: bool,
    adjust_temperature: bool,
) -> Result<bool, Box<dyn Error>> {
    let data = reference::load(reference_path)?;
    let engine = engine_for(&data, adjust_temperature);
    let files = crate::walk::assessment_files(&[dir.to_path_buf()], exclude)?;
    let summary = recalculate(&engine, &files, dry_run);

    if json {
        report::print_batch_json(&summary)?;
    } else {
        report::print_batch_report(&summary, dry_run);
    }
    Ok(summary.failed.is_empty())
}

/// `fitscore diff` entry point.
pub fn run_diff(before: &Path, after: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let diff = compute_diff(&load_assessment(before)?, &load_assessment(after)?);
    if json {
        report::print_diff_json(&diff)?;
    } else {
        report::print_diff_report(&diff);
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

