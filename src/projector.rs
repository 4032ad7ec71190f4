//! Final exam projection.
//!
//! Turns the coursework scores into the overall percentage earned so far and
//! classifies what the final exam still has to deliver to reach the pass mark.

use serde::Serialize;

use crate::input::ScoreInput;
use crate::scheme::GradingScheme;

/// Outcome of a projection. No variant is an error: an unreachable pass mark is
/// a valid answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProjectionResult {
    /// The pass mark is already reached before the final exam.
    AlreadyPassing { current_total: f64 },
    /// A perfect final exam still falls short of the pass mark.
    Unreachable { current_total: f64 },
    /// The final exam score (on the final's reporting scale) needed to pass.
    NeedsScore {
        required_final_score: f64,
        current_total: f64,
        course_name: String,
    },
}

impl ProjectionResult {
    pub fn current_total(&self) -> f64 {
        match self {
            ProjectionResult::AlreadyPassing { current_total }
            | ProjectionResult::Unreachable { current_total }
            | ProjectionResult::NeedsScore { current_total, .. } => *current_total,
        }
    }

    pub fn required_final_score(&self) -> Option<f64> {
        match self {
            ProjectionResult::NeedsScore {
                required_final_score,
                ..
            } => Some(*required_final_score),
            _ => None,
        }
    }
}

/// Weighted contribution of each component, in percent of the overall grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Breakdown {
    pub class_participation: f64,
    pub assignment_presentation: f64,
    pub class_test: f64,
    pub mid_term: f64,
}

impl Breakdown {
    pub fn total(&self) -> f64 {
        self.class_participation + self.assignment_presentation + self.class_test + self.mid_term
    }
}

impl GradingScheme {
    pub fn breakdown(&self, input: &ScoreInput) -> Breakdown {
        Breakdown {
            class_participation: self.class_participation.contribution(input.class_participation),
            assignment_presentation: self
                .assignment_presentation
                .contribution(input.assignment_presentation),
            class_test: self.class_test.contribution(input.class_test),
            mid_term: self.mid_term.contribution(input.mid_term),
        }
    }

    /// Projects the final exam score needed to reach the pass mark.
    ///
    /// Pure: no rounding is applied here, only at presentation time.
    pub fn project(&self, input: &ScoreInput) -> ProjectionResult {
        let current_total = self.breakdown(input).total();
        let remaining_needed = self.pass_mark - current_total;

        if remaining_needed <= 0.0 {
            return ProjectionResult::AlreadyPassing { current_total };
        }

        let required_final_score = (remaining_needed / self.final_weight) * self.final_max;
        if required_final_score > self.final_max {
            ProjectionResult::Unreachable { current_total }
        } else {
            ProjectionResult::NeedsScore {
                required_final_score,
                current_total,
                course_name: input.course_name.clone(),
            }
        }
    }
}

/// Projects `input` under the default grading scheme.
pub fn project(input: &ScoreInput) -> ProjectionResult {
    GradingScheme::default().project(input)
}
