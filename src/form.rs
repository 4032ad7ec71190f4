//! Calculator form state.
//!
//! Mirrors what the presentation layer owns: five free-text fields and at most
//! one rendered result. Editing a field does not recompute; [`CalculatorForm::calculate`]
//! does, and replaces whatever result was shown before.
//!
//! [`run_session`] drives a form from line-based input, one field per line.

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use crate::input::ScoreInput;
use crate::projector::ProjectionResult;
use crate::scheme::GradingScheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CourseName,
    ClassParticipation,
    AssignmentPresentation,
    ClassTest,
    MidTerm,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::CourseName,
        Field::ClassParticipation,
        Field::AssignmentPresentation,
        Field::ClassTest,
        Field::MidTerm,
    ];

    /// Prompt label, including the raw maximum from `scheme` for score fields.
    pub fn label(&self, scheme: &GradingScheme) -> String {
        match self {
            Field::CourseName => "Course Name".to_string(),
            Field::ClassParticipation => format!(
                "Class Participation (out of {})",
                scheme.class_participation.raw_max
            ),
            Field::AssignmentPresentation => format!(
                "Assignment / Presentation (out of {})",
                scheme.assignment_presentation.raw_max
            ),
            Field::ClassTest => format!("Class Test (out of {})", scheme.class_test.raw_max),
            Field::MidTerm => format!("Mid Term (out of {})", scheme.mid_term.raw_max),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::CourseName => "course_name",
            Field::ClassParticipation => "class_participation",
            Field::AssignmentPresentation => "assignment_presentation",
            Field::ClassTest => "class_test",
            Field::MidTerm => "mid_term",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CalculatorForm {
    course_name: String,
    class_participation: String,
    assignment_presentation: String,
    class_test: String,
    mid_term: String,
    result: Option<ProjectionResult>,
}

impl CalculatorForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        debug!(%field, "Field set");
        *self.slot_mut(field) = value.into();
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::CourseName => &self.course_name,
            Field::ClassParticipation => &self.class_participation,
            Field::AssignmentPresentation => &self.assignment_presentation,
            Field::ClassTest => &self.class_test,
            Field::MidTerm => &self.mid_term,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::CourseName => &mut self.course_name,
            Field::ClassParticipation => &mut self.class_participation,
            Field::AssignmentPresentation => &mut self.assignment_presentation,
            Field::ClassTest => &mut self.class_test,
            Field::MidTerm => &mut self.mid_term,
        }
    }

    /// Snapshot of the current field text as a coerced [`ScoreInput`].
    pub fn input(&self) -> ScoreInput {
        ScoreInput::from_text(
            &self.course_name,
            &self.class_participation,
            &self.assignment_presentation,
            &self.class_test,
            &self.mid_term,
        )
    }

    /// Projects the current fields, replacing any previous result.
    pub fn calculate(&mut self, scheme: &GradingScheme) -> &ProjectionResult {
        let input = self.input();
        let result = scheme.project(&input);
        debug!(?input, ?result, "Form calculated");
        self.result.insert(result)
    }

    pub fn result(&self) -> Option<&ProjectionResult> {
        self.result.as_ref()
    }

    /// Resets every field and drops the result.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Prompts for each field in turn and writes the rendered result after every
/// full pass.
///
/// Stops at end of input, when the course name is `q`, or when the course name
/// is left empty after at least one result has been shown.
pub fn run_session<R: BufRead, W: Write>(
    scheme: &GradingScheme,
    input: R,
    mut out: W,
) -> Result<()> {
    let mut lines = input.lines();
    let mut form = CalculatorForm::new();

    writeln!(
        out,
        "Pass Mark Calculator (enter q as the course name to quit)"
    )?;

    loop {
        for field in Field::ALL {
            write!(out, "{}: ", field.label(scheme))?;
            out.flush()?;

            let Some(line) = lines.next() else {
                debug!("input closed");
                return Ok(());
            };
            let line = line?;

            if field == Field::CourseName {
                if line.trim() == "q" {
                    return Ok(());
                }
                if line.is_empty() && form.result().is_some() {
                    debug!("empty course after a result, ending session");
                    return Ok(());
                }
            }
            form.set(field, line);
        }

        let result = form.calculate(scheme);
        writeln!(out, "\n[{}]\n{}\n", result.kind(), result.message(scheme))?;
    }
}
