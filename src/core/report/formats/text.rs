//! Plain-text report generator
//!
//! Produces the same framed layout the interactive shell prints, so a report
//! written to a file reads like a console session.

use crate::core::gradebook::{Gradebook, Statistics};
use crate::core::identity::{CourseCode, UserId};
use crate::core::report::{format_score, GradeRow, ReportContext, ReportGenerator, ReportKind};
use std::error::Error;
use std::fmt::{self, Write};

/// Plain-text report generator
pub struct TextReporter;

impl TextReporter {
    /// Create a new text reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn grade_line(row: &GradeRow) -> String {
        format!(
            "Student: {} | Course: {} | Score: {} | Grade: {}",
            row.student_name,
            row.course_name,
            format_score(row.score),
            row.letter
        )
    }

    /// Grade listing for one student followed by the GPA
    ///
    /// # Errors
    /// `StudentNotFound` if the id does not resolve.
    pub fn student_grades(ctx: &ReportContext, id: UserId) -> Result<String, Box<dyn Error>> {
        let student = ctx.student(id)?;
        let rows = ctx.student_rows(id);

        let mut out = String::new();
        writeln!(
            out,
            "========== GRADES FOR {} ==========",
            student.name().to_uppercase()
        )?;
        if rows.is_empty() {
            writeln!(out, "No grades recorded for this student.")?;
        }
        for row in &rows {
            writeln!(out, "{}", Self::grade_line(row))?;
        }
        writeln!(out, "================================================")?;
        writeln!(out, "Student GPA: {:.2}", ctx.book.student_gpa(id))?;
        Ok(out)
    }

    /// Student details, graded courses with credits, credit totals and GPA
    ///
    /// # Errors
    /// `StudentNotFound` if the id does not resolve.
    pub fn transcript(ctx: &ReportContext, id: UserId) -> Result<String, Box<dyn Error>> {
        let student = ctx.student(id)?;
        let rows = ctx.student_rows(id);
        let credits = ReportContext::credit_summary(&rows);

        let mut out = String::new();
        writeln!(out, "============== TRANSCRIPT ==============")?;
        writeln!(out, "School: {}", ctx.school_name())?;
        writeln!(out, "Student: {} ({})", student.name(), student.student_number)?;
        writeln!(out, "Enrollment Year: {}", student.enrollment_year)?;
        writeln!(out)?;
        writeln!(
            out,
            "{:<10} {:<32} {:>7} {:>7}  {}",
            "Code", "Course", "Credits", "Score", "Grade"
        )?;
        for row in &rows {
            writeln!(
                out,
                "{:<10} {:<32} {:>7} {:>7}  {}",
                row.course_code,
                row.course_name,
                row.credits,
                format_score(row.score),
                row.letter
            )?;
        }
        if rows.is_empty() {
            writeln!(out, "No grades recorded for this student.")?;
        }
        writeln!(out)?;
        writeln!(out, "Credits Attempted: {}", credits.attempted)?;
        writeln!(out, "Credits Passed: {}", credits.passed)?;
        writeln!(out, "GPA: {:.2}", ctx.book.student_gpa(id))?;
        writeln!(out, "========================================")?;
        Ok(out)
    }

    /// Course card followed by the roster
    ///
    /// # Errors
    /// `CourseNotFound` if the code does not resolve.
    pub fn course_details(
        ctx: &ReportContext,
        code: &CourseCode,
    ) -> Result<String, Box<dyn Error>> {
        let course = ctx.course(code)?;
        let roster = ctx.book.roster(code);
        let teacher = ctx.book.teacher_of(code).map(|t| t.titled_name());

        let mut out = course.display_info(teacher.as_deref(), roster.len());
        writeln!(out, "Students enrolled in {}:", course.name)?;
        if roster.is_empty() {
            writeln!(out, "  No students enrolled yet.")?;
        }
        for (i, student) in roster.iter().enumerate() {
            writeln!(
                out,
                "  {}. {} ({})",
                i + 1,
                student.name(),
                student.student_number
            )?;
        }
        Ok(out)
    }

    /// Grade listing for one course followed by the course average
    ///
    /// # Errors
    /// `CourseNotFound` if the code does not resolve.
    pub fn course_grades(ctx: &ReportContext, code: &CourseCode) -> Result<String, Box<dyn Error>> {
        let course = ctx.course(code)?;
        let rows = ctx.course_rows(code);

        let mut out = String::new();
        writeln!(
            out,
            "========== GRADES FOR {} ==========",
            course.name.to_uppercase()
        )?;
        if rows.is_empty() {
            writeln!(out, "No grades recorded for this course.")?;
        }
        for row in &rows {
            writeln!(out, "{}", Self::grade_line(row))?;
        }
        writeln!(out, "==================================================")?;
        writeln!(out, "Course Average: {:.2}", ctx.book.course_average(code))?;
        Ok(out)
    }

    /// The system statistics screen
    #[must_use]
    pub fn statistics(book: &Gradebook) -> String {
        StatisticsScreen(&book.statistics()).to_string()
    }
}

struct StatisticsScreen<'a>(&'a Statistics);

impl fmt::Display for StatisticsScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.0;
        writeln!(f, "============ SYSTEM STATISTICS ============")?;
        writeln!(f, "School Name: {}", stats.school_name)?;
        writeln!(f, "Total Students: {}", stats.students)?;
        writeln!(f, "Total Teachers: {}", stats.teachers)?;
        writeln!(f, "Total Admins: {}", stats.admins)?;
        writeln!(f, "Total Courses: {}", stats.courses)?;
        writeln!(f, "Total Enrollments: {}", stats.enrollments)?;
        writeln!(f, "Total Grades Given: {}", stats.total_grades_given)?;
        writeln!(f, "Next User ID: {}", stats.next_user_id)?;
        writeln!(f, "Next Course Number: {}", stats.next_course_number)?;
        writeln!(f, "=============================================")
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TextReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        match &ctx.kind {
            ReportKind::StudentGrades(id) => Self::student_grades(ctx, *id),
            ReportKind::Transcript(id) => Self::transcript(ctx, *id),
            ReportKind::CourseGrades(code) => {
                let mut out = Self::course_details(ctx, code)?;
                out.push('\n');
                out.push_str(&Self::course_grades(ctx, code)?);
                Ok(out)
            }
            ReportKind::Statistics => Ok(Self::statistics(ctx.book)),
        }
    }
}
