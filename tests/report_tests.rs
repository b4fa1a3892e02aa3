//! Integration tests for text and Markdown reports over the sample data

use gradebook::core::identity::{CourseCode, UserId};
use gradebook::core::models::Credentials;
use gradebook::core::report::{
    MarkdownReporter, ReportContext, ReportFormat, ReportGenerator, ReportKind, TextReporter,
};
use gradebook::core::sample::seed_sample_data;
use gradebook::core::Gradebook;
use std::str::FromStr;
use tempfile::TempDir;

fn sample_book() -> Gradebook {
    let mut book = Gradebook::new();
    seed_sample_data(&mut book).unwrap();
    book
}

const ALICE: UserId = UserId::new(1002);

#[test]
fn text_student_grades_lists_courses_and_gpa() {
    let book = sample_book();
    let ctx = ReportContext::new(&book, ReportKind::StudentGrades(ALICE));
    let text = TextReporter::new().render(&ctx).unwrap();

    assert!(text.starts_with("========== GRADES FOR ALICE BROWN =========="));
    assert!(text.contains(
        "Student: Alice Brown | Course: Calculus II | Score: 88.0 | Grade: B"
    ));
    assert!(text.contains(
        "Student: Alice Brown | Course: Object-Oriented Programming | Score: 92.5 | Grade: A"
    ));
    assert!(text.contains("Student GPA: 3.50"));
}

#[test]
fn text_transcript_sums_credits() {
    let book = sample_book();
    let ctx = ReportContext::new(&book, ReportKind::Transcript(ALICE));
    let text = TextReporter::new().render(&ctx).unwrap();

    assert!(text.contains("School: OOP University"));
    assert!(text.contains("Student: Alice Brown (STU001)"));
    assert!(text.contains("Credits Attempted: 7"));
    assert!(text.contains("Credits Passed: 7"));
}

#[test]
fn text_course_report_has_roster_and_average() {
    let book = sample_book();
    let ctx = ReportContext::new(&book, ReportKind::CourseGrades(CourseCode::new("OOP101")));
    let text = TextReporter::new().render(&ctx).unwrap();

    assert!(text.contains("Students enrolled in Object-Oriented Programming:"));
    assert!(text.contains("  3. Carol Davis (STU003)"));
    assert!(text.contains("Course Average: 85.33"));
}

#[test]
fn text_statistics_counts_everything() {
    let book = sample_book();
    let text = TextReporter::statistics(&book);

    assert!(text.contains("Total Students: 3"));
    assert!(text.contains("Total Teachers: 2"));
    assert!(text.contains("Total Courses: 3"));
    assert!(text.contains("Total Grades Given: 7"));
    assert!(text.contains("Next User ID: 1005"));
}

#[test]
fn markdown_reports_render_tables() {
    let book = sample_book();
    let reporter = MarkdownReporter::new();

    let ctx = ReportContext::new(&book, ReportKind::Transcript(ALICE));
    let md = reporter.render(&ctx).unwrap();
    assert!(md.starts_with("# Transcript: Alice Brown"));
    assert!(md.contains("| MATH201 | Calculus II | 3 | 88.0 | B | Pass |"));
    assert!(md.contains("| 7 | 7 | 3.50 |"));

    let ctx = ReportContext::new(&book, ReportKind::Statistics);
    let md = reporter.render(&ctx).unwrap();
    assert!(md.contains("| Grades given | 7 |"));
}

#[test]
fn markdown_course_with_no_grades() {
    let mut book = sample_book();
    let code = book.register_course("Compilers", 4);
    let ctx = ReportContext::new(&book, ReportKind::CourseGrades(code));
    let md = MarkdownReporter::new().render(&ctx).unwrap();

    assert!(md.contains("_No students enrolled yet._"));
    assert!(md.contains("_No grades recorded for this course._"));
    assert!(md.contains("**Teacher:** Not assigned"));
    assert!(md.contains("**Course average:** 0.00"));
}

#[test]
fn unknown_handles_fail_to_render() {
    let book = sample_book();
    let ctx = ReportContext::new(&book, ReportKind::StudentGrades(UserId::new(9999)));
    assert!(TextReporter::new().render(&ctx).is_err());

    let ctx = ReportContext::new(&book, ReportKind::CourseGrades(CourseCode::new("XYZ")));
    assert!(MarkdownReporter::new().render(&ctx).is_err());
}

#[test]
fn generate_writes_file() {
    let book = sample_book();
    let dir = TempDir::new().unwrap();
    let format = ReportFormat::from_str("md").unwrap();
    let path = dir.path().join(format!("statistics.{}", format.extension()));

    let ctx = ReportContext::new(&book, ReportKind::Statistics);
    MarkdownReporter::new().generate(&ctx, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# System Statistics: OOP University"));
}

#[test]
fn transcript_totals_large_credit_counts() {
    let mut book = Gradebook::new();
    let student = book.register_student(
        Credentials::new("Dana Reed", "dana.r@student.edu", "pass123"),
        "STU010",
        2024,
    );
    let huge = book.register_course("Independent Study", 4_000_000_000);
    let large = book.register_course("Thesis", 1_000_000_000);
    for course in [&huge, &large] {
        book.enroll_student(course, student).unwrap();
        book.add_grade(student, course, 91.0).unwrap();
    }

    let ctx = ReportContext::new(&book, ReportKind::Transcript(student));
    let text = TextReporter::new().render(&ctx).unwrap();
    assert!(text.contains("Credits Attempted: 5000000000"));
    assert!(text.contains("Credits Passed: 5000000000"));

    let md = MarkdownReporter::new().render(&ctx).unwrap();
    assert!(md.contains("| 5000000000 | 5000000000 | 4.00 |"));
}
