//! Course model

use crate::core::identity::CourseCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog data for a course.
///
/// The roster and the assigned teacher are not stored here; the gradebook
/// keeps them in its relation tables and derives per-course views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course code (e.g., "CS100", "OOP101")
    code: CourseCode,

    /// Course name (e.g., "Object-Oriented Programming")
    pub name: String,

    /// Credit hours
    pub credits: u32,
}

impl Course {
    /// Create a course under an explicit or already allocated code
    ///
    /// # Arguments
    /// * `code` - Course code
    /// * `name` - Full course name
    /// * `credits` - Credit hours
    #[must_use]
    pub fn new(code: CourseCode, name: impl Into<String>, credits: u32) -> Self {
        Self {
            code,
            name: name.into(),
            credits,
        }
    }

    /// The course code; it never changes once assigned
    #[must_use]
    pub const fn code(&self) -> &CourseCode {
        &self.code
    }

    /// Render the course card.
    ///
    /// # Arguments
    /// * `teacher` - Titled name of the assigned teacher, if any
    /// * `enrolled` - Current roster size
    #[must_use]
    pub fn display_info(&self, teacher: Option<&str>, enrolled: usize) -> String {
        CourseCard {
            course: self,
            teacher,
            enrolled,
        }
        .to_string()
    }
}

struct CourseCard<'a> {
    course: &'a Course,
    teacher: Option<&'a str>,
    enrolled: usize,
}

impl fmt::Display for CourseCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========== COURSE INFORMATION ==========")?;
        writeln!(f, "Course Code: {}", self.course.code)?;
        writeln!(f, "Course Name: {}", self.course.name)?;
        writeln!(f, "Credits: {}", self.course.credits)?;
        writeln!(f, "Teacher: {}", self.teacher.unwrap_or("Not assigned"))?;
        writeln!(f, "Enrolled Students: {}", self.enrolled)?;
        writeln!(f, "==========================================")
    }
}
