//! Markdown report generator
//!
//! Renders grade listings as Markdown tables through askama templates kept
//! under `templates/`. Values are pre-formatted here so the templates stay
//! free of number formatting.

use crate::core::gradebook::Statistics;
use crate::core::identity::{CourseCode, UserId};
use crate::core::report::{format_score, GradeRow, ReportContext, ReportGenerator, ReportKind};
use askama::Template;
use std::error::Error;

/// A grade as printed in a Markdown table
struct MarkdownRow {
    code: String,
    course: String,
    student: String,
    number: String,
    credits: u32,
    score: String,
    letter: String,
    status: &'static str,
}

impl From<GradeRow> for MarkdownRow {
    fn from(row: GradeRow) -> Self {
        Self {
            code: row.course_code,
            course: row.course_name,
            student: row.student_name,
            number: row.student_number,
            credits: row.credits,
            score: format_score(row.score),
            letter: row.letter.to_string(),
            status: if row.passing { "Pass" } else { "Fail" },
        }
    }
}

struct RosterEntry {
    name: String,
    number: String,
}

#[derive(Template)]
#[template(path = "student_grades.md", escape = "none")]
struct StudentGradesPage<'a> {
    school: &'a str,
    student_name: &'a str,
    student_number: &'a str,
    rows: Vec<MarkdownRow>,
    gpa: String,
}

#[derive(Template)]
#[template(path = "transcript.md", escape = "none")]
struct TranscriptPage<'a> {
    school: &'a str,
    student_name: &'a str,
    student_number: &'a str,
    enrollment_year: i32,
    rows: Vec<MarkdownRow>,
    attempted: u64,
    passed: u64,
    gpa: String,
}

#[derive(Template)]
#[template(path = "course_grades.md", escape = "none")]
struct CourseGradesPage<'a> {
    school: &'a str,
    code: &'a CourseCode,
    course_name: &'a str,
    credits: u32,
    teacher: String,
    roster: Vec<RosterEntry>,
    rows: Vec<MarkdownRow>,
    average: String,
}

#[derive(Template)]
#[template(path = "statistics.md", escape = "none")]
struct StatisticsPage {
    stats: Statistics,
}

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn student_grades(ctx: &ReportContext, id: UserId) -> Result<String, Box<dyn Error>> {
        let student = ctx.student(id)?;
        let page = StudentGradesPage {
            school: ctx.school_name(),
            student_name: student.name(),
            student_number: &student.student_number,
            rows: ctx.student_rows(id).into_iter().map(MarkdownRow::from).collect(),
            gpa: format!("{:.2}", ctx.book.student_gpa(id)),
        };
        Ok(page.render()?)
    }

    fn transcript(ctx: &ReportContext, id: UserId) -> Result<String, Box<dyn Error>> {
        let student = ctx.student(id)?;
        let rows = ctx.student_rows(id);
        let credits = ReportContext::credit_summary(&rows);
        let page = TranscriptPage {
            school: ctx.school_name(),
            student_name: student.name(),
            student_number: &student.student_number,
            enrollment_year: student.enrollment_year,
            rows: rows.into_iter().map(MarkdownRow::from).collect(),
            attempted: credits.attempted,
            passed: credits.passed,
            gpa: format!("{:.2}", ctx.book.student_gpa(id)),
        };
        Ok(page.render()?)
    }

    fn course_grades(ctx: &ReportContext, code: &CourseCode) -> Result<String, Box<dyn Error>> {
        let course = ctx.course(code)?;
        let page = CourseGradesPage {
            school: ctx.school_name(),
            code: course.code(),
            course_name: &course.name,
            credits: course.credits,
            teacher: ctx
                .book
                .teacher_of(code)
                .map_or_else(|| "Not assigned".to_string(), |t| t.titled_name()),
            roster: ctx
                .book
                .roster(code)
                .into_iter()
                .map(|s| RosterEntry {
                    name: s.name().to_string(),
                    number: s.student_number.clone(),
                })
                .collect(),
            rows: ctx.course_rows(code).into_iter().map(MarkdownRow::from).collect(),
            average: format!("{:.2}", ctx.book.course_average(code)),
        };
        Ok(page.render()?)
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        match &ctx.kind {
            ReportKind::StudentGrades(id) => Self::student_grades(ctx, *id),
            ReportKind::Transcript(id) => Self::transcript(ctx, *id),
            ReportKind::CourseGrades(code) => Self::course_grades(ctx, code),
            ReportKind::Statistics => {
                let page = StatisticsPage {
                    stats: ctx.book.statistics(),
                };
                Ok(page.render()?)
            }
        }
    }
}
