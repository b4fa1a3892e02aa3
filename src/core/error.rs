//! Gradebook error types.

use crate::core::identity::{CourseCode, UserId};
use thiserror::Error;

/// Recoverable outcomes of a gradebook operation that did not go through.
///
/// Every variant means nothing was changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradebookError {
    /// No registered student has this id.
    #[error("Student {0} not found")]
    StudentNotFound(UserId),

    /// No registered teacher has this id.
    #[error("Teacher {0} not found")]
    TeacherNotFound(UserId),

    /// No registered course has this code.
    #[error("Course {0} not found")]
    CourseNotFound(CourseCode),

    /// The student is already on the course roster.
    #[error("Student {student} is already enrolled in {course}")]
    AlreadyEnrolled {
        /// Student id
        student: UserId,
        /// Course code
        course: CourseCode,
    },

    /// The student is not on the course roster.
    #[error("Student {student} is not enrolled in {course}")]
    NotEnrolled {
        /// Student id
        student: UserId,
        /// Course code
        course: CourseCode,
    },

    /// A grade is already recorded for this key; update it instead.
    #[error("Grade already exists for student {student} in {course}; update it instead")]
    GradeAlreadyExists {
        /// Student id
        student: UserId,
        /// Course code
        course: CourseCode,
    },

    /// No grade is recorded for this key yet; add one first.
    #[error("No grade found for student {student} in {course}; add one first")]
    GradeNotFound {
        /// Student id
        student: UserId,
        /// Course code
        course: CourseCode,
    },

    /// The course has no teacher to unassign.
    #[error("Course {0} has no teacher assigned")]
    NoTeacherAssigned(CourseCode),
}

/// Result alias for gradebook operations.
pub type GradebookResult<T> = Result<T, GradebookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_key() {
        let err = GradebookError::NotEnrolled {
            student: UserId::new(1004),
            course: CourseCode::new("MATH201"),
        };
        assert_eq!(err.to_string(), "Student 1004 is not enrolled in MATH201");

        let err = GradebookError::CourseNotFound(CourseCode::new("XYZ"));
        assert_eq!(err.to_string(), "Course XYZ not found");
    }
}
