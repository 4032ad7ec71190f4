//! Batch projection over CSV rows of form input.
//!
//! Input columns: `course_name,class_participation,assignment_presentation,class_test,mid_term`.
//! Cells are free text and go through the same coercion as the form, so a bad
//! number never rejects a row. Only a structurally broken CSV is an error.

use std::io::Read;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::input::ScoreInput;
use crate::message::ResultKind;
use crate::projector::ProjectionResult;
use crate::scheme::GradingScheme;

/// A single row deserialized from a batch input CSV.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScoreRow {
    course_name: String,
    class_participation: String,
    assignment_presentation: String,
    class_test: String,
    mid_term: String,
}

impl ScoreRow {
    fn to_input(&self) -> ScoreInput {
        ScoreInput::from_text(
            &self.course_name,
            &self.class_participation,
            &self.assignment_presentation,
            &self.class_test,
            &self.mid_term,
        )
    }
}

/// One projected row, flat enough to write back out as CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRecord {
    pub row: usize,
    pub course_name: String,
    pub class_participation: f64,
    pub assignment_presentation: f64,
    pub class_test: f64,
    pub mid_term: f64,
    pub current_total: f64,
    pub outcome: ResultKind,
    pub required_final_score: Option<f64>,
    pub message: String,
}

impl ProjectionRecord {
    pub fn new(row: usize, input: &ScoreInput, result: &ProjectionResult, scheme: &GradingScheme) -> Self {
        Self {
            row,
            course_name: input.course_name.clone(),
            class_participation: input.class_participation,
            assignment_presentation: input.assignment_presentation,
            class_test: input.class_test,
            mid_term: input.mid_term,
            current_total: result.current_total(),
            outcome: result.kind(),
            required_final_score: result.required_final_score(),
            message: result.message(scheme),
        }
    }
}

/// Projects every row of a CSV read from `reader`. Rows are numbered from 1.
pub fn project_csv<R: Read>(reader: R, scheme: &GradingScheme) -> Result<Vec<ProjectionRecord>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let mut records = Vec::new();
    for (i, row) in rdr.deserialize::<ScoreRow>().enumerate() {
        let row_num = i + 1;
        let row = row.with_context(|| format!("malformed CSV at row {row_num}"))?;
        let input = row.to_input();
        let result = scheme.project(&input);
        debug!(row = row_num, course = %input.course_name, outcome = %result.kind(), "Row projected");
        records.push(ProjectionRecord::new(row_num, &input, &result, scheme));
    }

    info!(rows = records.len(), "Batch projection complete");
    Ok(records)
}

/// Opens `path` and projects its rows.
pub fn project_file(path: &str, scheme: &GradingScheme) -> Result<Vec<ProjectionRecord>> {
    let file = std::fs::File::open(path).with_context(|| format!("failed to open {path}"))?;
    project_csv(file, scheme)
}
