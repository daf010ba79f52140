//! Markdown transcript renderer.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use transcript_core::results::SemesterSummary;
use transcript_core::StudentResults;

/// Render a student's results as a Markdown transcript.
///
/// `label` identifies the student in the heading (name or id).
pub fn render_markdown(
    results: &StudentResults,
    label: Option<&str>,
    generated_at: DateTime<Utc>,
) -> String {
    let mut output = String::new();
    let standing = &results.standing;

    let _ = writeln!(output, "# Academic Transcript");
    let _ = writeln!(
        output,
        "Generated for {} on {}",
        label.unwrap_or("student"),
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Standing");

    if results.is_empty() {
        let _ = writeln!(output, "No published results yet.");
        return output;
    }

    let _ = writeln!(
        output,
        "- Cumulative GPA: {} ({})",
        standing.cumulative_gpa, standing.classification
    );
    let _ = writeln!(
        output,
        "- Units: {} passed of {} attempted across {} semesters",
        standing.passed_units, standing.total_units, standing.semester_count
    );
    let _ = writeln!(output, "- Current level: {}", standing.current_level);
    if standing.outstanding_courses.is_empty() {
        let _ = writeln!(output, "- Outstanding courses: none");
    } else {
        let _ = writeln!(
            output,
            "- Outstanding courses: {}",
            standing.outstanding_courses.join(", ")
        );
    }

    for semester in results {
        let _ = writeln!(output);
        write_semester(&mut output, semester);
    }

    output
}

fn write_semester(output: &mut String, semester: &SemesterSummary) {
    let summary = &semester.summary;

    let _ = writeln!(output, "## {} ({})", semester.name_en, semester.level_name.en);
    if !semester.name_ar.is_empty() {
        let _ = writeln!(output, "{} — {}", semester.name_ar, semester.level_name.ar);
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "| Course | Units | Score | Grade | Result |");
    let _ = writeln!(output, "|--------|------:|------:|:-----:|--------|");
    for course in &semester.courses {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | {} |",
            course.course_code,
            course.units,
            course.score,
            course.letter_grade,
            if course.passed { "Pass" } else { "Fail" }
        );
    }
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "GPA {} ({}) — {} — {}/{} units passed, {} incomplete",
        summary.gpa,
        summary.classification,
        summary.status,
        summary.passed_units,
        summary.total_units,
        summary.incomplete_courses
    );
}
