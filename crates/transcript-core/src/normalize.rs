//! Enrollment normalization.
//!
//! Turns a raw enrollment into the course row used by semester aggregation.
//! Only published grades produce a row.

use crate::error::ResultsError;
use crate::model::{CourseUnit, Enrollment, GradeRecord};
use crate::results::CourseResultRow;
use crate::scale::resolve;

/// Normalize one enrollment.
///
/// The course unit is validated for every enrollment, graded or not; the
/// score is only validated once the grade is published.
pub fn normalize(enrollment: &Enrollment) -> Result<Option<CourseResultRow>, ResultsError> {
    let (units, level) = validate_course_unit(&enrollment.course_unit)?;

    let grade = match &enrollment.grade {
        GradeRecord::Present(grade) if grade.is_published => grade,
        GradeRecord::Present(_) | GradeRecord::Absent => return Ok(None),
    };

    let resolution = resolve(grade.total_score).map_err(|e| {
        ResultsError::contract(format!("course {}: {e}", enrollment.course_unit.code))
    })?;

    Ok(Some(CourseResultRow {
        course_code: enrollment.course_unit.code.clone(),
        units,
        level,
        score: grade.total_score,
        passed: resolution.passed,
        letter_grade: resolution.letter_grade,
    }))
}

fn validate_course_unit(unit: &CourseUnit) -> Result<(u32, u32), ResultsError> {
    if unit.code.trim().is_empty() {
        return Err(ResultsError::contract("course unit has an empty code"));
    }
    let units = u32::try_from(unit.units)
        .ok()
        .filter(|u| *u >= 1)
        .ok_or_else(|| {
            ResultsError::contract(format!(
                "course {} has {} units, expected at least 1",
                unit.code, unit.units
            ))
        })?;
    let level = u32::try_from(unit.course_level).map_err(|_| {
        ResultsError::contract(format!(
            "course {} has negative level {}",
            unit.code, unit.course_level
        ))
    })?;
    Ok((units, level))
}
