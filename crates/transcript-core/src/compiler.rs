//! Student results compilation.
//!
//! Partitions a student's enrollments by semester, normalizes and aggregates
//! each partition, and derives the overall academic standing.

use rust_decimal::Decimal;

use crate::aggregate::{add_units, aggregate, weighted_gpa, DEFAULT_LEVEL};
use crate::error::ResultsError;
use crate::grouping::OrderedGroups;
use crate::model::{Enrollment, Semester};
use crate::normalize::normalize;
use crate::results::{
    AcademicStanding, Classification, CourseResultRow, SemesterSummary, StudentResults,
};
use crate::scale::grade_points;

struct Partition {
    semester: Semester,
    rows: Vec<CourseResultRow>,
}

/// Compile a student's enrollments into ordered semester summaries.
///
/// Semesters without a single published grade are omitted. Summaries are
/// ordered by start date; semesters sharing a start date keep the order in
/// which they first appeared in `enrollments`.
pub fn compile(enrollments: &[Enrollment]) -> Result<StudentResults, ResultsError> {
    let mut partitions: OrderedGroups<i64, Partition> = OrderedGroups::new();
    let mut excluded = 0usize;

    for enrollment in enrollments {
        let semester = &enrollment.semester;
        semester.validate()?;

        let partition = partitions.entry_or_insert_with(&semester.id, || Partition {
            semester: semester.clone(),
            rows: Vec::new(),
        });
        if partition.semester != *semester {
            return Err(ResultsError::contract(format!(
                "semester {} appears with conflicting metadata",
                semester.id
            )));
        }

        match normalize(enrollment)? {
            Some(row) => partition.rows.push(row),
            None => excluded += 1,
        }
    }

    let mut semesters = Vec::with_capacity(partitions.len());
    for (semester_id, partition) in partitions.into_ordered() {
        if partition.rows.is_empty() {
            tracing::debug!(semester_id, "omitting semester without published grades");
            continue;
        }
        semesters.push(aggregate(partition.rows, &partition.semester)?);
    }
    // Stable: equal start dates keep first-seen order.
    semesters.sort_by_key(|summary| summary.start_date);

    let standing = standing(&semesters)?;

    tracing::debug!(
        enrollments = enrollments.len(),
        excluded,
        semesters = semesters.len(),
        cumulative_gpa = %standing.cumulative_gpa,
        "compiled student results"
    );

    Ok(StudentResults {
        semesters,
        standing,
    })
}

/// Derive the overall standing from chronologically ordered summaries.
///
/// Fails if the unit totals across all semesters overflow.
pub fn standing(semesters: &[SemesterSummary]) -> Result<AcademicStanding, ResultsError> {
    let mut total_units = 0u32;
    let mut passed_units = 0u32;
    let mut weighted_points = Decimal::ZERO;
    // Latest attempt per course code wins.
    let mut latest_attempt: OrderedGroups<String, bool> = OrderedGroups::new();

    for semester in semesters {
        total_units = add_units(total_units, semester.summary.total_units)?;
        passed_units = add_units(passed_units, semester.summary.passed_units)?;

        for row in &semester.courses {
            weighted_points += grade_points(row.score) * Decimal::from(row.units);
            *latest_attempt.entry_or_insert_with(&row.course_code, || row.passed) = row.passed;
        }
    }

    let cumulative_gpa = weighted_gpa(weighted_points, total_units);
    let outstanding_courses = latest_attempt
        .into_ordered()
        .filter(|(_, passed)| !passed)
        .map(|(code, _)| code)
        .collect();

    Ok(AcademicStanding {
        semester_count: semesters.len(),
        total_units,
        passed_units,
        cumulative_gpa,
        classification: Classification::from_gpa(cumulative_gpa),
        current_level: semesters
            .last()
            .map(|s| s.current_level)
            .unwrap_or(DEFAULT_LEVEL),
        outstanding_courses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CourseUnit, Grade, GradeRecord};
    use crate::results::SemesterStatus;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn fall_2024() -> Semester {
        Semester {
            id: 1,
            name_ar: "خريف 2024".into(),
            name_en: "Fall 2024".into(),
            year: 2024,
            term: "fall".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
        }
    }

    fn spring_2025() -> Semester {
        Semester {
            id: 2,
            name_ar: "ربيع 2025".into(),
            name_en: "Spring 2025".into(),
            year: 2025,
            term: "spring".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        }
    }

    fn graded(
        code: &str,
        units: i32,
        level: i32,
        semester: Semester,
        score: Decimal,
        published: bool,
    ) -> Enrollment {
        Enrollment {
            course_unit: CourseUnit {
                code: code.into(),
                units,
                course_level: level,
            },
            semester,
            grade: GradeRecord::Present(Grade {
                total_score: score,
                is_published: published,
            }),
        }
    }

    fn ungraded(code: &str, units: i32, semester: Semester) -> Enrollment {
        Enrollment {
            course_unit: CourseUnit {
                code: code.into(),
                units,
                course_level: 1,
            },
            semester,
            grade: GradeRecord::Absent,
        }
    }

    fn two_semester_history() -> Vec<Enrollment> {
        vec![
            graded("CS101", 3, 1, fall_2024(), dec!(92), true),
            graded("MATH101", 4, 1, fall_2024(), dec!(78), true),
            graded("PHYS101", 3, 2, fall_2024(), dec!(44), true),
            graded("ENG101", 2, 1, fall_2024(), dec!(99), false),
            graded("CS102", 3, 2, spring_2025(), dec!(85), true),
            graded("PHYS101", 3, 2, spring_2025(), dec!(61), true),
        ]
    }

    #[test]
    fn end_to_end_two_semesters() {
        let results = compile(&two_semester_history()).unwrap();
        assert_eq!(results.len(), 2);

        let fall = &results.semesters[0];
        assert_eq!(fall.name_en, "Fall 2024");
        assert_eq!(fall.courses.len(), 3);
        assert_eq!(fall.summary.total_units, 10);
        assert_eq!(fall.summary.incomplete_courses, 1);
        assert_eq!(fall.summary.status, SemesterStatus::PassedWithDeficiency);
        assert!(fall.courses.iter().all(|c| c.course_code != "ENG101"));

        let spring = &results.semesters[1];
        assert_eq!(spring.name_en, "Spring 2025");
        assert_eq!(spring.courses.len(), 2);
        assert_eq!(spring.summary.total_units, 6);
        assert_eq!(spring.summary.status, SemesterStatus::Passed);
    }

    #[test]
    fn compile_is_idempotent() {
        let enrollments = two_semester_history();
        assert_eq!(compile(&enrollments).unwrap(), compile(&enrollments).unwrap());
    }

    #[test]
    fn unpublished_and_missing_grades_count_nowhere() {
        let mut enrollments = two_semester_history();
        let baseline = compile(&enrollments).unwrap();

        enrollments.push(ungraded("HIST101", 3, fall_2024()));
        enrollments.push(graded("ART101", 2, 1, spring_2025(), dec!(10), false));
        let with_hidden = compile(&enrollments).unwrap();

        assert_eq!(baseline, with_hidden);
    }

    #[test]
    fn semester_without_published_grades_is_omitted() {
        let enrollments = vec![
            ungraded("CS101", 3, fall_2024()),
            graded("CS102", 3, 1, fall_2024(), dec!(70), false),
            graded("CS201", 3, 2, spring_2025(), dec!(70), true),
        ];
        let results = compile(&enrollments).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results.semesters[0].semester_id, 2);
    }

    #[test]
    fn no_enrollments_yields_empty_results() {
        let results = compile(&[]).unwrap();
        assert!(results.is_empty());
        assert_eq!(results.standing.semester_count, 0);
        assert_eq!(results.standing.cumulative_gpa, dec!(0));
        assert_eq!(results.standing.current_level, 1);
        assert!(results.standing.outstanding_courses.is_empty());
    }

    #[test]
    fn summaries_are_ordered_by_start_date() {
        let enrollments = vec![
            graded("CS201", 3, 2, spring_2025(), dec!(70), true),
            graded("CS101", 3, 1, fall_2024(), dec!(70), true),
        ];
        let results = compile(&enrollments).unwrap();
        let ids: Vec<i64> = results.iter().map(|s| s.semester_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn same_start_date_keeps_first_seen_order() {
        let mut summer = fall_2024();
        summer.id = 9;
        summer.name_en = "Fall 2024 (evening)".into();
        let enrollments = vec![
            graded("CS101", 3, 1, summer, dec!(70), true),
            graded("CS102", 3, 1, fall_2024(), dec!(70), true),
        ];
        let results = compile(&enrollments).unwrap();
        let ids: Vec<i64> = results.iter().map(|s| s.semester_id).collect();
        assert_eq!(ids, vec![9, 1]);
    }

    #[test]
    fn conflicting_semester_metadata_is_rejected() {
        let mut renamed = fall_2024();
        renamed.name_en = "Autumn 2024".into();
        let enrollments = vec![
            graded("CS101", 3, 1, fall_2024(), dec!(70), true),
            graded("CS102", 3, 1, renamed, dec!(70), true),
        ];
        assert!(compile(&enrollments).unwrap_err().is_client_error());
    }

    #[test]
    fn contract_violation_in_hidden_enrollment_still_fails() {
        let enrollments = vec![
            graded("CS101", 3, 1, fall_2024(), dec!(70), true),
            ungraded("BROKEN", 0, fall_2024()),
        ];
        assert!(compile(&enrollments).is_err());
    }

    #[test]
    fn standing_accumulates_across_semesters() {
        let results = compile(&two_semester_history()).unwrap();
        let standing = &results.standing;

        assert_eq!(standing.semester_count, 2);
        assert_eq!(standing.total_units, 16);
        assert_eq!(standing.passed_units, 13);
        // Fall: 4*3 + 2*4 + 0*3 = 20; Spring: 3*3 + 1*3 = 12; 32 / 16
        assert_eq!(standing.cumulative_gpa, dec!(2));
        assert_eq!(standing.classification, Classification::Good);
        assert_eq!(standing.current_level, 2);
    }

    #[test]
    fn cumulative_unit_overflow_is_rejected() {
        // Each semester fits in a u32, their sum does not.
        let enrollments = vec![
            graded("CS101", i32::MAX, 1, fall_2024(), dec!(90), true),
            graded("CS102", i32::MAX, 1, fall_2024(), dec!(90), true),
            graded("CS201", i32::MAX, 1, spring_2025(), dec!(90), true),
        ];
        let err = compile(&enrollments).unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("overflows"), "got: {err}");
    }

    #[test]
    fn retaken_course_clears_outstanding() {
        let results = compile(&two_semester_history()).unwrap();
        assert!(results.standing.outstanding_courses.is_empty());

        let enrollments = vec![
            graded("PHYS101", 3, 1, fall_2024(), dec!(44), true),
            graded("CHEM101", 3, 1, fall_2024(), dec!(31), true),
            graded("CHEM101", 3, 1, spring_2025(), dec!(48), true),
        ];
        let results = compile(&enrollments).unwrap();
        assert_eq!(
            results.standing.outstanding_courses,
            vec!["PHYS101".to_string(), "CHEM101".to_string()]
        );
    }
}
