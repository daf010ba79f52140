//! The `transcript validate` command.

use std::path::PathBuf;

use anyhow::Result;

use transcript_core::normalize::normalize;

pub fn execute(enrollments_path: PathBuf) -> Result<()> {
    let enrollments = super::read_enrollments(&enrollments_path)?;

    let mut counted = 0;
    let mut excluded = 0;
    let mut violations = 0;

    for enrollment in &enrollments {
        let code = &enrollment.course_unit.code;
        let outcome = enrollment
            .semester
            .validate()
            .and_then(|()| normalize(enrollment));
        match outcome {
            Ok(Some(_)) => counted += 1,
            Ok(None) => excluded += 1,
            Err(e) => {
                println!("  [{code}] ERROR: {e}");
                violations += 1;
            }
        }
    }

    println!(
        "{} enrollments: {counted} counted, {excluded} excluded (ungraded or unpublished)",
        enrollments.len()
    );

    // Per-enrollment checks pass; semester consistency is only visible across the set.
    if violations == 0 {
        if let Err(e) = transcript_core::compile(&enrollments) {
            println!("  ERROR: {e}");
            violations += 1;
        }
    }

    if violations > 0 {
        anyhow::bail!("{violations} contract violation(s) found");
    }

    println!("All enrollments valid.");
    Ok(())
}
