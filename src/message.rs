//! Human-readable rendering of a [`ProjectionResult`].
//!
//! This is the only place totals and scores are rounded, to two decimals.

use serde::Serialize;
use std::fmt;

use crate::projector::ProjectionResult;
use crate::scheme::GradingScheme;

/// How the presentation layer should style a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Success,
    Error,
    Info,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Success => "success",
            ResultKind::Error => "error",
            ResultKind::Info => "info",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProjectionResult {
    pub fn kind(&self) -> ResultKind {
        match self {
            ProjectionResult::AlreadyPassing { .. } => ResultKind::Success,
            ProjectionResult::Unreachable { .. } => ResultKind::Error,
            ProjectionResult::NeedsScore { .. } => ResultKind::Info,
        }
    }

    /// Renders the multi-line message shown to the student.
    pub fn message(&self, scheme: &GradingScheme) -> String {
        let grade = &scheme.pass_grade;
        let total_line = format!("(Current total: {} / 100)", to_fixed2(self.current_total()));

        match self {
            ProjectionResult::AlreadyPassing { .. } => format!(
                "Congratulations! You already secured at least a {grade} before the final exam.\n{total_line}"
            ),
            ProjectionResult::Unreachable { .. } => format!(
                "Unfortunately, it's not possible to reach grade {grade} even with full marks in the final.\n{total_line}"
            ),
            ProjectionResult::NeedsScore {
                required_final_score,
                course_name,
                ..
            } => format!(
                "Course: {}\nYou need at least {} marks out of {} in the Final Exam to achieve at least grade {grade}.\n{total_line}",
                display_course(course_name),
                to_fixed2(*required_final_score),
                scheme.final_max,
            ),
        }
    }
}

/// An empty course name renders as `N/A`; anything else is shown as typed.
pub fn display_course(course_name: &str) -> &str {
    if course_name.is_empty() { "N/A" } else { course_name }
}

/// Formats `x` with two decimals, rounding exact ties away from zero.
///
/// `{:.2}` rounds ties to even. The only values that land exactly on a
/// two-decimal tie are multiples of 1/8 (`0.125`, `0.375`, ...), so those are
/// rounded up by hand and everything else goes through the formatter.
pub fn to_fixed2(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        let text = if x > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }

    let scaled = x.abs() * 100.0;
    if (x.abs() * 8.0).fract() == 0.0 && scaled.fract() == 0.5 {
        let sign = if x < 0.0 { "-" } else { "" };
        return format!("{sign}{:.2}", scaled.ceil() / 100.0);
    }
    format!("{x:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScoreInput;
    use crate::projector::project;

    #[test]
    fn test_already_passing_message() {
        let r = project(&ScoreInput::new(5.0, 10.0, 100.0, 100.0));
        assert_eq!(r.kind(), ResultKind::Success);
        assert_eq!(
            r.message(&GradingScheme::default()),
            "Congratulations! You already secured at least a C before the final exam.\n(Current total: 50.00 / 100)"
        );
    }

    #[test]
    fn test_unreachable_message() {
        let r = project(&ScoreInput::new(0.0, 0.0, 0.0, -30.0));
        assert_eq!(r.kind(), ResultKind::Error);
        let msg = r.message(&GradingScheme::default());
        assert!(msg.starts_with("Unfortunately, it's not possible to reach grade C"));
        assert!(msg.ends_with("(Current total: -7.50 / 100)"));
    }

    #[test]
    fn test_needs_score_message_without_course() {
        let r = project(&ScoreInput::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(r.kind(), ResultKind::Info);
        assert_eq!(
            r.message(&GradingScheme::default()),
            "Course: N/A\nYou need at least 90.00 marks out of 100 in the Final Exam to achieve at least grade C.\n(Current total: 0.00 / 100)"
        );
    }

    #[test]
    fn test_needs_score_message_rounds_to_two_decimals() {
        // 1/5*5 + 0 + 33/100*10 + 0 = 4.3 -> needs 81.4
        let r = project(&ScoreInput::new(1.0, 0.0, 33.0, 0.0).with_course("Biology"));
        let msg = r.message(&GradingScheme::default());
        assert!(msg.starts_with("Course: Biology\n"));
        assert!(msg.contains("at least 81.40 marks"));
        assert!(msg.contains("(Current total: 4.30 / 100)"));
    }

    #[test]
    fn test_pass_grade_label_comes_from_scheme() {
        let scheme = GradingScheme {
            pass_grade: "D".to_string(),
            ..Default::default()
        };
        let r = scheme.project(&ScoreInput::new(5.0, 10.0, 100.0, 100.0));
        assert!(r.message(&scheme).contains("at least a D"));
    }

    #[test]
    fn test_display_course() {
        assert_eq!(display_course(""), "N/A");
        assert_eq!(display_course("   "), "   ");
        assert_eq!(display_course(" Art "), " Art ");
    }

    #[test]
    fn test_to_fixed2_rounds_ties_up() {
        assert_eq!(to_fixed2(0.125), "0.13");
        assert_eq!(to_fixed2(0.375), "0.38");
        assert_eq!(to_fixed2(2.625), "2.63");
        assert_eq!(to_fixed2(-0.125), "-0.13");
    }

    #[test]
    fn test_to_fixed2_non_ties() {
        assert_eq!(to_fixed2(0.0), "0.00");
        assert_eq!(to_fixed2(90.0), "90.00");
        assert_eq!(to_fixed2(-7.5), "-7.50");
        // 1.005 is stored just below the tie
        assert_eq!(to_fixed2(1.005), "1.00");
        assert_eq!(to_fixed2(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_required_score_tie_rounds_up_in_message() {
        // 4.9375 + 10 + 10 + 20 = 44.9375, leaving 0.0625 -> 0.125 on the final
        let r = project(&ScoreInput::new(4.9375, 10.0, 100.0, 80.0));
        let msg = r.message(&GradingScheme::default());
        assert!(msg.contains("at least 0.13 marks"), "{msg}");
        assert!(msg.contains("(Current total: 44.94 / 100)"), "{msg}");
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(ResultKind::Success.to_string(), "success");
        assert_eq!(ResultKind::Error.as_str(), "error");
        assert_eq!(ResultKind::Info.as_str(), "info");
    }
}
