pub mod compile;
pub mod init;
pub mod lookup;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use transcript_core::model::Enrollment;
use transcript_core::StudentResults;

/// Read a JSON array of enrollments.
pub(crate) fn read_enrollments(path: &Path) -> Result<Vec<Enrollment>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read enrollments: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid enrollment data in {}", path.display()))
}

/// Print compiled results to stdout in the requested format.
pub(crate) fn print_results(results: &StudentResults, format: &str, label: Option<&str>) -> Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(results)?),
        "markdown" | "md" => print!(
            "{}",
            transcript_report::render_markdown(results, label, chrono::Utc::now())
        ),
        "table" => print_table(results),
        other => anyhow::bail!("unknown format: {other} (expected table, json or markdown)"),
    }
    Ok(())
}

fn print_table(results: &StudentResults) {
    if results.is_empty() {
        println!("No published results.");
        return;
    }

    for semester in results {
        let summary = &semester.summary;
        println!(
            "{} ({}): GPA {} {}, {}",
            semester.name_en,
            semester.level_name.en,
            summary.gpa,
            summary.classification,
            summary.status
        );

        let mut table = Table::new();
        table.set_header(vec!["Course", "Units", "Score", "Grade", "Result"]);
        for course in &semester.courses {
            table.add_row(vec![
                Cell::new(&course.course_code),
                Cell::new(course.units),
                Cell::new(course.score),
                Cell::new(&course.letter_grade),
                Cell::new(if course.passed { "Pass" } else { "Fail" }),
            ]);
        }
        println!("{table}\n");
    }

    let standing = &results.standing;
    println!(
        "Cumulative GPA {} ({}), {}/{} units passed, level {}",
        standing.cumulative_gpa,
        standing.classification,
        standing.passed_units,
        standing.total_units,
        standing.current_level
    );
    if !standing.outstanding_courses.is_empty() {
        println!("Outstanding: {}", standing.outstanding_courses.join(", "));
    }
}
