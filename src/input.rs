//! Score input and numeric coercion.
//!
//! Form fields are free text. Anything that does not start with a number counts
//! as zero, so a calculation never fails on bad input.

use serde::{Deserialize, Serialize};

/// The four raw component scores plus the course they belong to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreInput {
    pub course_name: String,
    pub class_participation: f64,
    pub assignment_presentation: f64,
    pub class_test: f64,
    pub mid_term: f64,
}

impl ScoreInput {
    pub fn new(
        class_participation: f64,
        assignment_presentation: f64,
        class_test: f64,
        mid_term: f64,
    ) -> Self {
        Self {
            course_name: String::new(),
            class_participation,
            assignment_presentation,
            class_test,
            mid_term,
        }
    }

    /// Builds an input from raw form text, coercing each score with [`coerce`].
    pub fn from_text(
        course_name: &str,
        class_participation: &str,
        assignment_presentation: &str,
        class_test: &str,
        mid_term: &str,
    ) -> Self {
        Self::new(
            coerce(class_participation),
            coerce(assignment_presentation),
            coerce(class_test),
            coerce(mid_term),
        )
        .with_course(course_name)
    }

    /// Set the course name
    pub fn with_course(mut self, course_name: &str) -> Self {
        self.course_name = course_name.to_string();
        self
    }
}

/// Coerces free text to a score.
///
/// Leading whitespace is skipped and the longest numeric prefix is read, so
/// `"12abc"` is 12 and `" 7.5 "` is 7.5. Text with no numeric prefix, NaN, and
/// negative zero all become `0.0`. Negative numbers pass through unchanged.
pub fn coerce(text: &str) -> f64 {
    let s = text.trim_start();
    match numeric_prefix(s).parse::<f64>() {
        Ok(v) if v.is_nan() || v == 0.0 => 0.0,
        Ok(v) => v,
        Err(_) => 0.0,
    }
}

/// Returns the longest prefix of `s` shaped like a decimal literal:
/// `[+-]? (Infinity | digits [. digits] | . digits) ([eE] [+-]? digits)?`
fn numeric_prefix(s: &str) -> &str {
    let b = s.as_bytes();
    let is_digit = |i: usize| b.get(i).is_some_and(u8::is_ascii_digit);

    let mut i = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        i = 1;
    }
    if s[i..].starts_with("Infinity") {
        return &s[..i + "Infinity".len()];
    }

    let int_start = i;
    while is_digit(i) {
        i += 1;
    }
    let mut digits = i - int_start;

    if b.get(i) == Some(&b'.') {
        let mut j = i + 1;
        while is_digit(j) {
            j += 1;
        }
        let frac_digits = j - (i + 1);
        if digits + frac_digits > 0 {
            digits += frac_digits;
            i = j;
        }
    }
    if digits == 0 {
        return "";
    }

    // An exponent only counts when at least one digit follows it.
    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while is_digit(j) {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    &s[..i]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_plain_numbers() {
        assert_eq!(coerce("5"), 5.0);
        assert_eq!(coerce("7.25"), 7.25);
        assert_eq!(coerce("-30"), -30.0);
        assert_eq!(coerce("+4"), 4.0);
        assert_eq!(coerce(".5"), 0.5);
        assert_eq!(coerce("3."), 3.0);
        assert_eq!(coerce("1e2"), 100.0);
    }

    #[test]
    fn test_coerce_garbage_is_zero() {
        assert_eq!(coerce(""), 0.0);
        assert_eq!(coerce("   "), 0.0);
        assert_eq!(coerce("abc"), 0.0);
        assert_eq!(coerce("."), 0.0);
        assert_eq!(coerce("-"), 0.0);
        assert_eq!(coerce("NaN"), 0.0);
        assert_eq!(coerce("e5"), 0.0);
    }

    #[test]
    fn test_coerce_reads_leading_prefix() {
        assert_eq!(coerce("  12abc"), 12.0);
        assert_eq!(coerce("8/10"), 8.0);
        assert_eq!(coerce("1e"), 1.0);
        assert_eq!(coerce("2e+x"), 2.0);
        assert_eq!(coerce("4.5.6"), 4.5);
    }

    #[test]
    fn test_coerce_negative_zero_is_zero() {
        let v = coerce("-0");
        assert_eq!(v, 0.0);
        assert!(v.is_sign_positive());
    }

    #[test]
    fn test_coerce_infinity() {
        assert_eq!(coerce("Infinity"), f64::INFINITY);
        assert_eq!(coerce("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(coerce("infinity"), 0.0);
    }

    #[test]
    fn test_from_text_coerces_every_field() {
        let input = ScoreInput::from_text("Physics", "abc", "", "50", "x20");
        assert_eq!(input.course_name, "Physics");
        assert_eq!(input, ScoreInput::new(0.0, 0.0, 50.0, 0.0).with_course("Physics"));
    }
}
