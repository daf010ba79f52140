//! Semester aggregation.
//!
//! Computes per-semester unit totals, the unit-weighted GPA, classification,
//! completion status, and the representative course level.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ResultsError;
use crate::model::Semester;
use crate::results::{
    Classification, CourseResultRow, LevelName, SemesterStats, SemesterStatus, SemesterSummary,
};
use crate::scale::resolve;

/// Decimal places kept on every reported GPA.
pub const GPA_DECIMAL_PLACES: u32 = 4;

/// Level reported when no course in the semester carries a level.
pub const DEFAULT_LEVEL: u32 = 1;

const LEVEL_ORDINALS_EN: [&str; 10] = [
    "First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh", "Eighth", "Ninth", "Tenth",
];

const LEVEL_ORDINALS_AR: [&str; 10] = [
    "الأول",
    "الثاني",
    "الثالث",
    "الرابع",
    "الخامس",
    "السادس",
    "السابع",
    "الثامن",
    "التاسع",
    "العاشر",
];

/// Aggregate a semester's counted course rows into a summary.
pub fn aggregate(
    rows: Vec<CourseResultRow>,
    semester: &Semester,
) -> Result<SemesterSummary, ResultsError> {
    semester.validate()?;

    let mut total_units = 0u32;
    let mut passed_units = 0u32;
    let mut incomplete_courses = 0usize;
    let mut weighted_points = Decimal::ZERO;

    for row in &rows {
        if row.units == 0 {
            return Err(ResultsError::contract(format!(
                "course {} has 0 units, expected at least 1",
                row.course_code
            )));
        }
        let resolution = resolve(row.score)?;

        total_units = add_units(total_units, row.units)?;
        weighted_points += resolution.grade_points * Decimal::from(row.units);
        if row.passed {
            passed_units = add_units(passed_units, row.units)?;
        } else {
            incomplete_courses += 1;
        }
    }

    let gpa = weighted_gpa(weighted_points, total_units);
    let current_level = current_level(&rows);

    tracing::debug!(
        semester_id = semester.id,
        courses = rows.len(),
        total_units,
        %gpa,
        current_level,
        "aggregated semester"
    );

    Ok(SemesterSummary {
        semester_id: semester.id,
        name_ar: semester.name_ar.clone(),
        name_en: semester.name_en.clone(),
        year: semester.year,
        term: semester.term.clone(),
        start_date: semester.start_date,
        courses: rows,
        current_level,
        level_name: level_name(current_level),
        summary: SemesterStats {
            total_units,
            completed_units: passed_units,
            passed_units,
            incomplete_courses,
            gpa,
            classification: Classification::from_gpa(gpa),
            status: SemesterStatus::from_incomplete(incomplete_courses),
        },
    })
}

/// Add a course's units to a running total, rejecting totals past `u32::MAX`.
pub(crate) fn add_units(total: u32, units: u32) -> Result<u32, ResultsError> {
    total.checked_add(units).ok_or_else(|| {
        ResultsError::contract(format!("unit total overflows adding {units} units to {total}"))
    })
}

/// Divide accumulated `points × units` by the unit total and round.
///
/// Zero units yields a GPA of 0.
pub(crate) fn weighted_gpa(weighted_points: Decimal, total_units: u32) -> Decimal {
    if total_units == 0 {
        return round_gpa(Decimal::ZERO);
    }
    round_gpa(weighted_points / Decimal::from(total_units))
}

/// Round a GPA to [`GPA_DECIMAL_PLACES`] using round-half-away-from-zero.
///
/// `2.49995` becomes `2.5000`, which matters for classification boundaries.
pub fn round_gpa(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(GPA_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// The highest course level among rows with a level assigned.
///
/// A semester mixing levels reports its most advanced course; with no
/// levelled course it falls back to [`DEFAULT_LEVEL`].
pub fn current_level(rows: &[CourseResultRow]) -> u32 {
    rows.iter()
        .map(|row| row.level)
        .filter(|level| *level > 0)
        .max()
        .unwrap_or(DEFAULT_LEVEL)
}

/// Ordinal display name for a 1-indexed level.
pub fn level_name(level: u32) -> LevelName {
    let index = (level as usize).checked_sub(1);
    match index.and_then(|i| LEVEL_ORDINALS_EN.get(i).zip(LEVEL_ORDINALS_AR.get(i))) {
        Some((en, ar)) => LevelName {
            en: format!("{en} Level"),
            ar: format!("المستوى {ar}"),
        },
        None => LevelName {
            en: format!("Semester level {level}"),
            ar: format!("المستوى {level}"),
        },
    }
}
