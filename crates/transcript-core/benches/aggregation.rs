use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;

use transcript_core::aggregate::aggregate;
use transcript_core::compile;
use transcript_core::model::{CourseUnit, Enrollment, Grade, GradeRecord, Semester};
use transcript_core::normalize::normalize;
use transcript_core::results::CourseResultRow;

fn semester(index: i64) -> Semester {
    Semester {
        id: index,
        name_ar: String::new(),
        name_en: format!("Semester {index}"),
        year: 2020 + (index / 2) as i32,
        term: if index % 2 == 0 { "fall" } else { "spring" }.to_string(),
        start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
            + chrono::Duration::days(index * 180),
    }
}

fn make_history(semesters: i64, courses_per_semester: i64) -> Vec<Enrollment> {
    let mut enrollments = Vec::new();
    for s in 0..semesters {
        for c in 0..courses_per_semester {
            let score = Decimal::from((s * 7 + c * 13) % 101);
            enrollments.push(Enrollment {
                course_unit: CourseUnit {
                    code: format!("C{s}-{c}"),
                    units: (c % 4 + 1) as i32,
                    course_level: (s / 2 + 1) as i32,
                },
                semester: semester(s),
                grade: if c % 5 == 0 {
                    GradeRecord::Absent
                } else {
                    GradeRecord::Present(Grade {
                        total_score: score,
                        is_published: c % 7 != 0,
                    })
                },
            });
        }
    }
    enrollments
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let history = make_history(1, 8);
    let rows: Vec<CourseResultRow> = history
        .iter()
        .filter_map(|e| normalize(e).unwrap())
        .collect();
    let meta = semester(0);

    group.bench_function("8 courses", |b| {
        b.iter(|| aggregate(black_box(rows.clone()), black_box(&meta)))
    });

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    let small = make_history(2, 6);
    group.bench_function("2 semesters", |b| b.iter(|| compile(black_box(&small))));

    let full = make_history(10, 8);
    group.bench_function("10 semesters", |b| b.iter(|| compile(black_box(&full))));

    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_compile);
criterion_main!(benches);
