//! Compiled results types.
//!
//! Everything here is built fresh per computation and never mutated after
//! construction, so a compiled [`StudentResults`] can be shared freely.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One counted course inside a semester summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseResultRow {
    pub course_code: String,
    /// Credit weight, at least 1.
    pub units: u32,
    /// Course level; 0 means unassigned.
    pub level: u32,
    pub score: Decimal,
    pub passed: bool,
    pub letter_grade: String,
}

/// Qualitative tier derived from a GPA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Excellent,
    VeryGood,
    Good,
    Acceptable,
}

impl Classification {
    /// Thresholds are inclusive-lower, evaluated top-down.
    pub fn from_gpa(gpa: Decimal) -> Self {
        match gpa {
            g if g >= Decimal::new(35, 1) => Classification::Excellent,
            g if g >= Decimal::new(25, 1) => Classification::VeryGood,
            g if g >= Decimal::from(2) => Classification::Good,
            _ => Classification::Acceptable,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Excellent => write!(f, "Excellent"),
            Classification::VeryGood => write!(f, "Very Good"),
            Classification::Good => write!(f, "Good"),
            Classification::Acceptable => write!(f, "Acceptable"),
        }
    }
}

/// Completion status of a semester, from the number of failed courses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemesterStatus {
    Passed,
    PassedWithDeficiency,
    Failed,
}

impl SemesterStatus {
    pub fn from_incomplete(incomplete_courses: usize) -> Self {
        match incomplete_courses {
            0 => SemesterStatus::Passed,
            1 | 2 => SemesterStatus::PassedWithDeficiency,
            _ => SemesterStatus::Failed,
        }
    }
}

impl fmt::Display for SemesterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemesterStatus::Passed => write!(f, "Passed"),
            SemesterStatus::PassedWithDeficiency => write!(f, "Passed with deficiency"),
            SemesterStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// Display name of a level in both supported languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelName {
    pub en: String,
    pub ar: String,
}

/// Per-semester statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterStats {
    pub total_units: u32,
    /// Equal to `passed_units`; there is no partial credit.
    pub completed_units: u32,
    pub passed_units: u32,
    /// Number of failed courses.
    pub incomplete_courses: usize,
    /// Unit-weighted GPA, rounded to 4 decimal places.
    pub gpa: Decimal,
    pub classification: Classification,
    pub status: SemesterStatus,
}

/// Summary of one semester's counted courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterSummary {
    pub semester_id: i64,
    pub name_ar: String,
    pub name_en: String,
    pub year: i32,
    pub term: String,
    pub start_date: NaiveDate,
    pub courses: Vec<CourseResultRow>,
    pub current_level: u32,
    pub level_name: LevelName,
    pub summary: SemesterStats,
}

/// Overall academic profile across every counted semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicStanding {
    pub semester_count: usize,
    pub total_units: u32,
    pub passed_units: u32,
    /// Unit-weighted GPA over every counted course, rounded to 4 places.
    pub cumulative_gpa: Decimal,
    pub classification: Classification,
    /// Level of the most recent semester.
    pub current_level: u32,
    /// Courses whose most recent counted attempt failed.
    pub outstanding_courses: Vec<String>,
}

/// A student's compiled results, semesters in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentResults {
    pub semesters: Vec<SemesterSummary>,
    pub standing: AcademicStanding,
}

impl StudentResults {
    pub fn is_empty(&self) -> bool {
        self.semesters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.semesters.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SemesterSummary> {
        self.semesters.iter()
    }

    /// Look up a semester summary by semester id.
    pub fn semester(&self, semester_id: i64) -> Option<&SemesterSummary> {
        self.semesters.iter().find(|s| s.semester_id == semester_id)
    }
}

impl<'a> IntoIterator for &'a StudentResults {
    type Item = &'a SemesterSummary;
    type IntoIter = std::slice::Iter<'a, SemesterSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.semesters.iter()
    }
}
