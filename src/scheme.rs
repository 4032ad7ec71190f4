//! Grading scheme configuration.
//!
//! Every constant the projector reads lives here: the raw maximum and weight of
//! each graded component, the pass mark, and how much the final exam is worth.
//! [`GradingScheme::default`] is the standard course scheme; an alternate scheme
//! can be loaded from a JSON file with [`GradingScheme::load`].

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw maximum for class participation.
pub const CLASS_PARTICIPATION_MAX: f64 = 5.0;
/// Share of the overall grade (percent) earned by class participation.
pub const CLASS_PARTICIPATION_WEIGHT: f64 = 5.0;
pub const ASSIGNMENT_PRESENTATION_MAX: f64 = 10.0;
pub const ASSIGNMENT_PRESENTATION_WEIGHT: f64 = 10.0;
pub const CLASS_TEST_MAX: f64 = 100.0;
pub const CLASS_TEST_WEIGHT: f64 = 10.0;
pub const MID_TERM_MAX: f64 = 100.0;
pub const MID_TERM_WEIGHT: f64 = 25.0;

/// Minimum overall percentage for the lowest passing grade.
pub const PASS_MARK: f64 = 45.0;
/// Share of the overall grade (percent) earned by the final exam.
pub const FINAL_WEIGHT: f64 = 50.0;
/// Scale the required final score is reported on.
pub const FINAL_MAX: f64 = 100.0;
/// Letter grade the pass mark corresponds to.
pub const PASS_GRADE: &str = "C";

/// A single graded component: its raw scale and its share of the overall grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub raw_max: f64,
    pub weight: f64,
}

impl Component {
    pub const fn new(raw_max: f64, weight: f64) -> Self {
        Self { raw_max, weight }
    }

    /// Scales a raw score to its weighted contribution.
    ///
    /// Scores above `raw_max` are not clamped and contribute proportionally more
    /// than `weight`; negative scores reduce the total.
    pub fn contribution(&self, raw: f64) -> f64 {
        (raw / self.raw_max) * self.weight
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingScheme {
    pub class_participation: Component,
    pub assignment_presentation: Component,
    pub class_test: Component,
    pub mid_term: Component,
    pub pass_mark: f64,
    pub final_weight: f64,
    pub final_max: f64,
    pub pass_grade: String,
}

impl Default for GradingScheme {
    fn default() -> Self {
        Self {
            class_participation: Component::new(
                CLASS_PARTICIPATION_MAX,
                CLASS_PARTICIPATION_WEIGHT,
            ),
            assignment_presentation: Component::new(
                ASSIGNMENT_PRESENTATION_MAX,
                ASSIGNMENT_PRESENTATION_WEIGHT,
            ),
            class_test: Component::new(CLASS_TEST_MAX, CLASS_TEST_WEIGHT),
            mid_term: Component::new(MID_TERM_MAX, MID_TERM_WEIGHT),
            pass_mark: PASS_MARK,
            final_weight: FINAL_WEIGHT,
            final_max: FINAL_MAX,
            pass_grade: PASS_GRADE.to_string(),
        }
    }
}

impl GradingScheme {
    /// Loads a scheme from a JSON file at `path`.
    ///
    /// Keys missing from the file keep their default values:
    /// ```json
    /// { "pass_mark": 50.0, "mid_term": { "raw_max": 60.0, "weight": 30.0 } }
    /// ```
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read grading scheme {path}"))?;
        let scheme: GradingScheme = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse grading scheme {path}"))?;
        scheme.validate()?;
        debug!(path, ?scheme, "Grading scheme loaded");
        Ok(scheme)
    }

    /// Loads the scheme at `path` if one is given, otherwise the default scheme.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Rejects schemes that would divide by zero or flip signs.
    pub fn validate(&self) -> Result<()> {
        for (name, c) in self.components() {
            if c.raw_max.is_nan() || c.raw_max <= 0.0 {
                bail!("{name}.raw_max must be positive, got {}", c.raw_max);
            }
            if !c.weight.is_finite() || c.weight < 0.0 {
                bail!("{name}.weight must be a non-negative number, got {}", c.weight);
            }
        }
        if self.final_weight.is_nan() || self.final_weight <= 0.0 {
            bail!("final_weight must be positive, got {}", self.final_weight);
        }
        if self.final_max.is_nan() || self.final_max <= 0.0 {
            bail!("final_max must be positive, got {}", self.final_max);
        }
        if !self.pass_mark.is_finite() {
            bail!("pass_mark must be a finite number");
        }
        Ok(())
    }

    /// Components in form order, paired with their field names.
    pub fn components(&self) -> [(&'static str, Component); 4] {
        [
            ("class_participation", self.class_participation),
            ("assignment_presentation", self.assignment_presentation),
            ("class_test", self.class_test),
            ("mid_term", self.mid_term),
        ]
    }

    /// Sum of the component weights; the overall grade share decided before the final.
    pub fn coursework_weight(&self) -> f64 {
        self.components().iter().map(|(_, c)| c.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_default_scheme_matches_course_table() {
        let s = GradingScheme::default();
        assert_eq!(s.class_participation, Component::new(5.0, 5.0));
        assert_eq!(s.assignment_presentation, Component::new(10.0, 10.0));
        assert_eq!(s.class_test, Component::new(100.0, 10.0));
        assert_eq!(s.mid_term, Component::new(100.0, 25.0));
        assert_eq!(s.pass_mark, 45.0);
        assert_eq!(s.final_weight, 50.0);
        assert_eq!(s.coursework_weight() + s.final_weight, 100.0);
    }

    #[test]
    fn test_contribution_is_not_clamped() {
        let mid_term = Component::new(100.0, 25.0);
        assert_eq!(mid_term.contribution(100.0), 25.0);
        assert_eq!(mid_term.contribution(150.0), 37.5);
        assert_eq!(mid_term.contribution(-20.0), -5.0);
    }

    #[test]
    fn test_load_partial_override_keeps_defaults() {
        let path = temp_path("passmark_test_scheme_partial.json");
        fs::write(&path, r#"{ "pass_mark": 50.0, "pass_grade": "B" }"#).unwrap();

        let s = GradingScheme::load(&path).unwrap();
        assert_eq!(s.pass_mark, 50.0);
        assert_eq!(s.pass_grade, "B");
        assert_eq!(s.mid_term, Component::new(100.0, 25.0));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_zero_raw_max() {
        let path = temp_path("passmark_test_scheme_zero.json");
        fs::write(&path, r#"{ "class_test": { "raw_max": 0.0, "weight": 10.0 } }"#).unwrap();

        let err = GradingScheme::load(&path).unwrap_err();
        assert!(err.to_string().contains("class_test.raw_max"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(GradingScheme::load("/nonexistent/passmark/scheme.json").is_err());
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(
            GradingScheme::load_or_default(None).unwrap(),
            GradingScheme::default()
        );
    }

    #[test]
    fn test_validate_rejects_zero_final_weight() {
        let s = GradingScheme {
            final_weight: 0.0,
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_limits() {
        let mut s = GradingScheme::default();
        s.mid_term.raw_max = f64::NAN;
        assert!(s.validate().is_err());

        let s = GradingScheme {
            final_max: f64::NAN,
            ..Default::default()
        };
        assert!(s.validate().is_err());
        assert!(GradingScheme::default().validate().is_ok());
    }
}
