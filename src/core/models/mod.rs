//! Data models for the gradebook

pub mod course;
pub mod grade;
pub mod relation;
pub mod user;

pub use course::Course;
pub use grade::{Grade, GradeChange, GradeKey, GradeOrigin, LetterGrade};
pub use relation::{Enrollment, Enrollments, TeachingAssignment, TeachingAssignments};
pub use user::{Account, Admin, Credentials, Role, Student, Teacher, User};
