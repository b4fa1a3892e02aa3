//! Demonstration dataset loaded at shell startup and by the `report` command

use crate::core::error::GradebookResult;
use crate::core::gradebook::Gradebook;
use crate::core::identity::{CourseCode, UserId};
use crate::core::models::Credentials;
use logger::{info, verbose};

/// Handles to the records created by [`seed_sample_data`]
#[derive(Debug, Clone)]
pub struct SampleHandles {
    /// Teachers, in registration order
    pub teachers: Vec<UserId>,
    /// Students, in registration order
    pub students: Vec<UserId>,
    /// Course codes, in registration order
    pub courses: Vec<CourseCode>,
}

/// Populate `book` with two teachers, three students, three courses and seven grades.
///
/// # Errors
/// Propagates any rejection from the gradebook; on a fresh gradebook there is none.
pub fn seed_sample_data(book: &mut Gradebook) -> GradebookResult<SampleHandles> {
    info!("Initializing sample data");

    let smith = book.register_teacher(
        Credentials::new("John Smith", "john.smith@university.edu", "pass123"),
        "Computer Science",
        "Professor",
    );
    let johnson = book.register_teacher(
        Credentials::new("Emily Johnson", "emily.j@university.edu", "pass123"),
        "Mathematics",
        "Dr.",
    );

    let alice = book.register_student(
        Credentials::new("Alice Brown", "alice.b@student.edu", "pass123"),
        "STU001",
        2023,
    );
    let bob = book.register_student(
        Credentials::new("Bob Wilson", "bob.w@student.edu", "pass123"),
        "STU002",
        2023,
    );
    let carol = book.register_student(
        Credentials::new("Carol Davis", "carol.d@student.edu", "pass123"),
        "STU003",
        2024,
    );

    let oop = book.register_course_with_code("OOP101", "Object-Oriented Programming", 4);
    let calculus = book.register_course_with_code("MATH201", "Calculus II", 3);
    let structures = book.register_course_with_code("CS301", "Data Structures", 4);

    book.assign_teacher(&oop, smith)?;
    book.assign_teacher(&calculus, johnson)?;
    book.assign_teacher(&structures, smith)?;

    for student in [alice, bob, carol] {
        book.enroll_student(&oop, student)?;
    }
    for student in [alice, bob] {
        book.enroll_student(&calculus, student)?;
    }
    for student in [bob, carol] {
        book.enroll_student(&structures, student)?;
    }

    let grades = [
        (alice, &oop, 92.5),
        (bob, &oop, 85.0),
        (carol, &oop, 78.5),
        (alice, &calculus, 88.0),
        (bob, &calculus, 75.5),
        (bob, &structures, 90.0),
        (carol, &structures, 82.0),
    ];
    for (student, course, score) in grades {
        book.add_grade(student, course, score)?;
    }

    info!("Sample data initialized");
    for code in [&oop, &calculus, &structures] {
        verbose!(
            "  {code}: {} enrolled, {} graded, average {:.2}",
            book.roster(code).len(),
            book.course_grades(code).len(),
            book.course_average(code)
        );
    }
    Ok(SampleHandles {
        teachers: vec![smith, johnson],
        students: vec![alice, bob, carol],
        courses: vec![oop, calculus, structures],
    })
}
