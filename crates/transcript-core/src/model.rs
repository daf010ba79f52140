//! Enrollment input model.
//!
//! These are the records the enrollment source hands to the engine: a course
//! unit, the semester it was taken in, and an optional grade.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ResultsError;

/// An offering of a course carrying a unit weight.
///
/// Integers are kept signed as they arrive from the store; the normalizer
/// rejects values outside the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseUnit {
    /// Course code (e.g. "CS101").
    pub code: String,
    /// Credit weight, at least 1.
    pub units: i32,
    /// Curriculum level of the course; 0 means unassigned.
    #[serde(default)]
    pub course_level: i32,
}

/// An academic semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub id: i64,
    /// Arabic display name.
    #[serde(default)]
    pub name_ar: String,
    /// English display name.
    pub name_en: String,
    pub year: i32,
    /// Term label (e.g. "fall", "spring").
    pub term: String,
    /// First day of the semester; drives chronological ordering.
    pub start_date: NaiveDate,
}

impl Semester {
    /// Check that the metadata is usable for a summary.
    pub fn validate(&self) -> Result<(), ResultsError> {
        if self.year <= 0 {
            return Err(ResultsError::contract(format!(
                "semester {} has invalid year {}",
                self.id, self.year
            )));
        }
        if self.term.trim().is_empty() {
            return Err(ResultsError::contract(format!(
                "semester {} has an empty term",
                self.id
            )));
        }
        if self.name_en.trim().is_empty() {
            return Err(ResultsError::contract(format!(
                "semester {} has an empty name",
                self.id
            )));
        }
        Ok(())
    }
}

/// A score attached to an enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub total_score: Decimal,
    /// Only published grades are visible to students and counted.
    #[serde(default)]
    pub is_published: bool,
}

/// Whether an enrollment has a grade recorded.
///
/// Serialized as a nullable grade object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Grade>", into = "Option<Grade>")]
pub enum GradeRecord {
    Present(Grade),
    #[default]
    Absent,
}

impl GradeRecord {
    /// The grade, if one exists and has been published.
    pub fn published(&self) -> Option<&Grade> {
        match self {
            GradeRecord::Present(grade) if grade.is_published => Some(grade),
            GradeRecord::Present(_) | GradeRecord::Absent => None,
        }
    }
}

impl From<Option<Grade>> for GradeRecord {
    fn from(value: Option<Grade>) -> Self {
        match value {
            Some(grade) => GradeRecord::Present(grade),
            None => GradeRecord::Absent,
        }
    }
}

impl From<GradeRecord> for Option<Grade> {
    fn from(value: GradeRecord) -> Self {
        match value {
            GradeRecord::Present(grade) => Some(grade),
            GradeRecord::Absent => None,
        }
    }
}

/// A student's registration in a course unit for a semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub course_unit: CourseUnit,
    pub semester: Semester,
    #[serde(default)]
    pub grade: GradeRecord,
}
