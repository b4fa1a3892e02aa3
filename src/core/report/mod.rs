//! Report generation for gradebook listings
//!
//! Renders student grade listings, transcripts, course grade sheets and the
//! system statistics screen as plain text (the console layout) or Markdown.

pub mod formats;

use crate::core::error::GradebookError;
use crate::core::gradebook::Gradebook;
use crate::core::identity::{CourseCode, UserId};
use crate::core::models::{Course, Grade, LetterGrade, Student};
use std::error::Error;
use std::fmt;
use std::path::Path;

pub use formats::{MarkdownReporter, ReportFormat, TextReporter};

/// Which report to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportKind {
    /// Every grade of one student, followed by the GPA
    StudentGrades(UserId),
    /// Student details, graded courses with credits, credit totals and GPA
    Transcript(UserId),
    /// Course details, roster, grades and course average
    CourseGrades(CourseCode),
    /// Gradebook-wide counters
    Statistics,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StudentGrades(id) => write!(f, "student-{id}"),
            Self::Transcript(id) => write!(f, "transcript-{id}"),
            Self::CourseGrades(code) => write!(f, "course-{code}"),
            Self::Statistics => write!(f, "statistics"),
        }
    }
}

/// One grade joined with its student and course
#[derive(Debug, Clone, PartialEq)]
pub struct GradeRow {
    /// Student name
    pub student_name: String,
    /// Student number
    pub student_number: String,
    /// Course code
    pub course_code: String,
    /// Course name
    pub course_name: String,
    /// Course credits
    pub credits: u32,
    /// Stored score
    pub score: f64,
    /// Stored letter
    pub letter: LetterGrade,
    /// Score of 60 or more
    pub passing: bool,
}

/// Credit totals over a student's graded courses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CreditSummary {
    /// Credits of every graded course
    pub attempted: u64,
    /// Credits of passed courses only
    pub passed: u64,
}

/// Data context for report generation
///
/// Borrows the gradebook and resolves the handles in [`ReportKind`] into the
/// rows both renderers print.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Gradebook being reported on
    pub book: &'a Gradebook,
    /// Report to render
    pub kind: ReportKind,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(book: &'a Gradebook, kind: ReportKind) -> Self {
        Self { book, kind }
    }

    /// School name shown in report headers
    #[must_use]
    pub fn school_name(&self) -> &str {
        self.book.school_name()
    }

    /// Resolve a student handle
    ///
    /// # Errors
    /// `StudentNotFound` if no student has this id.
    pub fn student(&self, id: UserId) -> Result<&'a Student, GradebookError> {
        self.book
            .find_student_by_id(id)
            .ok_or(GradebookError::StudentNotFound(id))
    }

    /// Resolve a course handle
    ///
    /// # Errors
    /// `CourseNotFound` if no course has this code.
    pub fn course(&self, code: &CourseCode) -> Result<&'a Course, GradebookError> {
        self.book
            .find_course_by_code(code.as_str())
            .ok_or_else(|| GradebookError::CourseNotFound(code.clone()))
    }

    fn row(&self, grade: &Grade) -> GradeRow {
        let student = self.book.find_student_by_id(grade.student());
        let course = self.book.find_course_by_code(grade.course().as_str());
        GradeRow {
            student_name: student
                .map_or_else(|| grade.student().to_string(), |s| s.name().to_string()),
            student_number: student
                .map(|s| s.student_number.clone())
                .unwrap_or_default(),
            course_code: grade.course().to_string(),
            course_name: course
                .map_or_else(|| grade.course().to_string(), |c| c.name.clone()),
            credits: course.map_or(0, |c| c.credits),
            score: grade.score(),
            letter: grade.letter(),
            passing: grade.is_passing(),
        }
    }

    /// Grades of `student`, sorted by course code
    #[must_use]
    pub fn student_rows(&self, student: UserId) -> Vec<GradeRow> {
        self.book
            .student_grades(student)
            .into_iter()
            .map(|g| self.row(g))
            .collect()
    }

    /// Grades in `course`, sorted by student id
    #[must_use]
    pub fn course_rows(&self, course: &CourseCode) -> Vec<GradeRow> {
        self.book
            .course_grades(course)
            .into_iter()
            .map(|g| self.row(g))
            .collect()
    }

    /// Attempted and passed credits over `rows`
    #[must_use]
    pub fn credit_summary(rows: &[GradeRow]) -> CreditSummary {
        rows.iter().fold(CreditSummary::default(), |mut acc, row| {
            let credits = u64::from(row.credits);
            acc.attempted += credits;
            if row.passing {
                acc.passed += credits;
            }
            acc
        })
    }
}

/// Print a score the way the console does: whole numbers keep one decimal
#[must_use]
pub fn format_score(score: f64) -> String {
    if score.fract().abs() < f64::EPSILON {
        format!("{score:.1}")
    } else {
        format!("{score}")
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if a handle in the report kind does not resolve
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
