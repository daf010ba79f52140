//! Grade scale resolution.
//!
//! Maps a numeric score (0–100) to a letter grade, grade points on the
//! four-point scale, and a pass flag.
//!
//! | Score       | Points | Letter |
//! |-------------|--------|--------|
//! | >= 90       | 4.0    | A      |
//! | >= 80       | 3.0    | B      |
//! | >= 70       | 2.0    | C      |
//! | >= 60       | 1.0    | D      |
//! | >= 50       | 0.0    | E      |
//! | < 50        | 0.0    | F      |
//!
//! Passing (`score >= 50`) is independent of the point scale: a score in
//! `[50, 60)` passes but earns no points.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ResultsError;

/// Minimum score required to pass a course.
pub const PASS_MARK: u32 = 50;

fn pass_mark() -> Decimal {
    Decimal::from(PASS_MARK)
}

/// The result of applying the grade scale to a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResolution {
    pub letter_grade: String,
    pub grade_points: Decimal,
    pub passed: bool,
}

/// Resolve a score against the grade scale.
///
/// Scores outside `[0, 100]` are rejected rather than clamped.
pub fn resolve(score: Decimal) -> Result<GradeResolution, ResultsError> {
    if score < Decimal::ZERO || score > Decimal::ONE_HUNDRED {
        return Err(ResultsError::contract(format!(
            "score {score} is outside the 0-100 range"
        )));
    }

    Ok(GradeResolution {
        letter_grade: letter_grade(score).to_string(),
        grade_points: grade_points(score),
        passed: score >= pass_mark(),
    })
}

/// Grade points for a score. Boundaries are inclusive-lower.
pub fn grade_points(score: Decimal) -> Decimal {
    match score {
        s if s >= Decimal::from(90) => Decimal::from(4),
        s if s >= Decimal::from(80) => Decimal::from(3),
        s if s >= Decimal::from(70) => Decimal::from(2),
        s if s >= Decimal::from(60) => Decimal::ONE,
        _ => Decimal::ZERO,
    }
}

fn letter_grade(score: Decimal) -> &'static str {
    match score {
        s if s >= Decimal::from(90) => "A",
        s if s >= Decimal::from(80) => "B",
        s if s >= Decimal::from(70) => "C",
        s if s >= Decimal::from(60) => "D",
        s if s >= pass_mark() => "E",
        _ => "F",
    }
}
