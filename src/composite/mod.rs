//! Comprehensive score: the physical overall score blended with the three
//! questionnaire categories.

use serde::Serialize;

/// Blend weights (must sum to 1.0).
pub const W_PHYSICAL: f64 = 0.60;
pub const W_KNOWLEDGE: f64 = 0.15;
pub const W_LIFESTYLE: f64 = 0.15;
pub const W_READINESS: f64 = 0.10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CompositeInputs {
    pub overall: Option<f64>,
    pub knowledge: Option<f64>,
    pub lifestyle: Option<f64>,
    pub readiness: Option<f64>,
}

impl CompositeInputs {
    pub fn is_empty(&self) -> bool {
        self.overall.is_none()
            && self.knowledge.is_none()
            && self.lifestyle.is_none()
            && self.readiness.is_none()
    }
}

/// `overall×0.60 + knowledge×0.15 + lifestyle×0.15 + readiness×0.10`.
///
/// Missing or non-finite inputs count as 0 and the weights are not
/// redistributed, so a client with no questionnaire gets exactly 60% of
/// their physical score. Full precision; round only for display.
pub fn comprehensive_score(inputs: &CompositeInputs) -> f64 {
    let term = |v: Option<f64>, w: f64| v.filter(|x| x.is_finite()).unwrap_or(0.0) * w;
    term(inputs.overall, W_PHYSICAL)
        + term(inputs.knowledge, W_KNOWLEDGE)
        + term(inputs.lifestyle, W_LIFESTYLE)
        + term(inputs.readiness, W_READINESS)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
