//! The `transcript init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("transcript.toml").exists() {
        println!("transcript.toml already exists, skipping.");
    } else {
        std::fs::write("transcript.toml", SAMPLE_CONFIG)?;
        println!("Created transcript.toml");
    }

    let sample_path = Path::new("enrollments.sample.json");
    if sample_path.exists() {
        println!("enrollments.sample.json already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_ENROLLMENTS)?;
        println!("Created enrollments.sample.json");
    }

    println!("\nNext steps:");
    println!("  1. Replace enrollments.sample.json with an export of your enrollment data");
    println!("  2. Run: transcript lookup --student {SAMPLE_STUDENT}");

    Ok(())
}

const SAMPLE_STUDENT: &str = "5b1f0c7e-3f52-4a0e-9d7b-2c64f0a9e811";

const SAMPLE_CONFIG: &str = r#"# transcript configuration

# JSON map of student id to enrollments, used by `transcript lookup`.
# ${VAR} references are expanded from the environment.
enrollments_file = "enrollments.sample.json"

[cache]
# Seconds a compiled result stays cached (TRANSCRIPT_CACHE_TTL_SECS overrides).
ttl_secs = 300
"#;

const SAMPLE_ENROLLMENTS: &str = r#"{
  "5b1f0c7e-3f52-4a0e-9d7b-2c64f0a9e811": [
    {
      "course_unit": { "code": "MATH101", "units": 3, "course_level": 1 },
      "semester": {
        "id": 1,
        "name_ar": "خريف 2024",
        "name_en": "Fall 2024",
        "year": 2024,
        "term": "fall",
        "start_date": "2024-09-01"
      },
      "grade": { "total_score": "88.5", "is_published": true }
    },
    {
      "course_unit": { "code": "PHYS101", "units": 4, "course_level": 1 },
      "semester": {
        "id": 1,
        "name_ar": "خريف 2024",
        "name_en": "Fall 2024",
        "year": 2024,
        "term": "fall",
        "start_date": "2024-09-01"
      },
      "grade": { "total_score": "47", "is_published": true }
    },
    {
      "course_unit": { "code": "CHEM101", "units": 3, "course_level": 1 },
      "semester": {
        "id": 1,
        "name_ar": "خريف 2024",
        "name_en": "Fall 2024",
        "year": 2024,
        "term": "fall",
        "start_date": "2024-09-01"
      },
      "grade": null
    }
  ]
}
"#;
