//! Integration tests for the gradebook aggregate

use gradebook::core::identity::{CourseCode, UserId};
use gradebook::core::models::{Credentials, GradeOrigin, LetterGrade, Role};
use gradebook::core::{Gradebook, GradebookError};

fn creds(name: &str) -> Credentials {
    Credentials::new(name, format!("{}@school.edu", name.to_lowercase()), "pass123")
}

/// One course with three enrolled students
fn course_with_students() -> (Gradebook, CourseCode, Vec<UserId>) {
    let mut book = Gradebook::new();
    let course = book.register_course_with_code("OOP101", "Object-Oriented Programming", 4);
    let students: Vec<UserId> = ["Alice", "Bob", "Carol"]
        .iter()
        .enumerate()
        .map(|(i, name)| book.register_student(creds(name), format!("STU00{}", i + 1), 2023))
        .collect();
    for &student in &students {
        book.enroll_student(&course, student).unwrap();
    }
    (book, course, students)
}

#[test]
fn user_ids_are_distinct_and_increasing() {
    let mut book = Gradebook::new();
    let ids = vec![
        book.register_student(creds("A"), "STU001", 2023),
        book.register_teacher(creds("B"), "Math", "Dr."),
        book.register_admin(creds("C"), "ADM001", "FULL"),
        book.register_student(creds("D"), "STU002", 2024),
    ];

    assert_eq!(ids[0], UserId::new(1000));
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn auto_codes_increase_around_explicit_codes() {
    let mut book = Gradebook::new();
    let a = book.register_course("Intro", 3);
    book.register_course_with_code("MATH201", "Calculus II", 3);
    let b = book.register_course("Algorithms", 4);
    book.register_course_with_code("CS101", "Shadow", 1);
    let c = book.register_course("Compilers", 4);

    assert_eq!(
        [a.as_str(), b.as_str(), c.as_str()],
        ["CS100", "CS101", "CS102"]
    );
    // First registration wins on a duplicated code
    assert_eq!(
        book.find_course_by_code("CS101").map(|c| c.name.as_str()),
        Some("Algorithms")
    );
}

#[test]
fn fresh_gradebooks_do_not_share_counters() {
    let mut first = Gradebook::new();
    first.register_student(creds("A"), "STU001", 2023);
    first.register_course("Intro", 3);

    let mut second = Gradebook::new();
    assert_eq!(
        second.register_student(creds("B"), "STU001", 2023),
        UserId::new(1000)
    );
    assert_eq!(second.register_course("Intro", 3).as_str(), "CS100");
}

#[test]
fn letter_bands_at_boundaries() {
    let cases = [
        (100.0, LetterGrade::A),
        (90.0, LetterGrade::A),
        (89.99, LetterGrade::B),
        (80.0, LetterGrade::B),
        (79.99, LetterGrade::C),
        (70.0, LetterGrade::C),
        (69.99, LetterGrade::D),
        (60.0, LetterGrade::D),
        (59.99, LetterGrade::F),
        (0.0, LetterGrade::F),
    ];
    for (score, letter) in cases {
        assert_eq!(LetterGrade::from_score(score), letter, "score {score}");
    }
}

#[test]
fn scores_are_clamped_on_add_and_update() {
    let (mut book, course, students) = course_with_students();

    let grade = book.add_grade(students[0], &course, 150.0).unwrap();
    assert_eq!(grade.score(), 100.0);
    assert_eq!(grade.letter(), LetterGrade::A);

    let change = book.update_grade(students[0], &course, -20.0).unwrap();
    assert_eq!(change.old_score, 100.0);
    assert_eq!(change.new_score, 0.0);
    assert_eq!(change.new_letter, LetterGrade::F);

    // Clamping twice stores the same value as clamping once
    book.update_grade(students[0], &course, 0.0).unwrap();
    assert_eq!(book.grade(students[0], &course).unwrap().score(), 0.0);
}

#[test]
fn duplicate_enrollment_leaves_roster_unchanged() {
    let (mut book, course, students) = course_with_students();

    let err = book.enroll_student(&course, students[1]).unwrap_err();
    assert_eq!(
        err,
        GradebookError::AlreadyEnrolled {
            student: students[1],
            course: course.clone(),
        }
    );
    assert_eq!(book.roster(&course).len(), 3);
    assert_eq!(book.enrolled_courses(students[1]).len(), 1);
}

#[test]
fn duplicate_grade_keeps_original() {
    let (mut book, course, students) = course_with_students();
    book.add_grade(students[0], &course, 92.5).unwrap();

    let err = book.add_grade(students[0], &course, 40.0).unwrap_err();
    assert!(matches!(err, GradebookError::GradeAlreadyExists { .. }));

    let err = book
        .add_letter_grade(students[0], &course, LetterGrade::F)
        .unwrap_err();
    assert!(matches!(err, GradebookError::GradeAlreadyExists { .. }));

    let grade = book.grade(students[0], &course).unwrap();
    assert_eq!(grade.score(), 92.5);
    assert_eq!(grade.letter(), LetterGrade::A);
    assert_eq!(book.total_grades_given(), 1);
}

#[test]
fn update_recomputes_letter_without_counting() {
    let (mut book, course, students) = course_with_students();
    book.add_grade(students[1], &course, 85.0).unwrap();

    let change = book.update_grade(students[1], &course, 91.0).unwrap();
    assert_eq!(change.old_letter, LetterGrade::B);
    assert_eq!(change.new_letter, LetterGrade::A);
    assert_eq!(book.total_grades_given(), 1);

    let err = book.update_grade(students[2], &course, 70.0).unwrap_err();
    assert!(matches!(err, GradebookError::GradeNotFound { .. }));
    assert!(book.grade(students[2], &course).is_none());
}

#[test]
fn letter_entry_stores_canonical_score() {
    let (mut book, course, students) = course_with_students();

    let grade = book
        .add_letter_grade(students[2], &course, LetterGrade::B)
        .unwrap();
    assert_eq!(grade.score(), 85.0);
    assert_eq!(grade.letter(), LetterGrade::B);
    assert_eq!(grade.origin(), GradeOrigin::Letter);

    // An update switches the grade back to score-driven
    book.update_grade(students[2], &course, 72.0).unwrap();
    let grade = book.grade(students[2], &course).unwrap();
    assert_eq!(grade.letter(), LetterGrade::C);
    assert_eq!(grade.origin(), GradeOrigin::Score);
}

#[test]
fn course_average_scenario() {
    let (mut book, course, students) = course_with_students();
    let empty = book.register_course("Empty", 3);

    for (student, score) in students.iter().zip([92.5, 85.0, 78.5]) {
        book.add_grade(*student, &course, score).unwrap();
    }

    let expected = (92.5 + 85.0 + 78.5) / 3.0;
    assert!((book.course_average(&course) - expected).abs() < 1e-9);
    assert_eq!(book.course_average(&empty), 0.0);
}

#[test]
fn gpa_scenario() {
    let mut book = Gradebook::new();
    let student = book.register_student(creds("Alice"), "STU001", 2023);
    let idle = book.register_student(creds("Dan"), "STU004", 2024);
    let oop = book.register_course("OOP", 4);
    let calc = book.register_course("Calculus", 3);
    book.enroll_student(&oop, student).unwrap();
    book.enroll_student(&calc, student).unwrap();

    book.add_grade(student, &oop, 95.0).unwrap();
    book.add_grade(student, &calc, 84.0).unwrap();

    assert!((book.student_gpa(student) - 3.5).abs() < 1e-9);
    assert_eq!(book.student_gpa(idle), 0.0);
}

#[test]
fn grading_an_unenrolled_student_fails() {
    let mut book = Gradebook::new();
    let student = book.register_student(creds("Carol"), "STU003", 2024);
    let course = book.register_course_with_code("MATH201", "Calculus II", 3);

    let err = book.add_grade(student, &course, 88.0).unwrap_err();
    assert_eq!(
        err,
        GradebookError::NotEnrolled {
            student,
            course: course.clone(),
        }
    );
    assert!(book.grade(student, &course).is_none());
    assert_eq!(book.total_grades_given(), 0);
}

#[test]
fn removal_keeps_recorded_grades() {
    let (mut book, course, students) = course_with_students();
    book.add_grade(students[0], &course, 77.0).unwrap();

    book.remove_student(&course, students[0]).unwrap();
    assert!(!book.is_enrolled(students[0], &course));
    assert!(book.grade(students[0], &course).is_some());

    let err = book.remove_student(&course, students[0]).unwrap_err();
    assert!(matches!(err, GradebookError::NotEnrolled { .. }));
}

#[test]
fn reassigning_moves_course_between_teachers() {
    let mut book = Gradebook::new();
    let smith = book.register_teacher(creds("Smith"), "CS", "Professor");
    let johnson = book.register_teacher(creds("Johnson"), "Math", "Dr.");
    let course = book.register_course("Algorithms", 4);

    book.assign_teacher(&course, smith).unwrap();
    book.assign_teacher(&course, smith).unwrap();
    assert_eq!(book.taught_courses(smith).len(), 1);

    book.assign_teacher(&course, johnson).unwrap();
    assert!(book.taught_courses(smith).is_empty());
    assert_eq!(book.taught_courses(johnson).len(), 1);
    assert_eq!(book.teacher_of(&course).map(|t| t.id()), Some(johnson));

    assert_eq!(book.unassign_teacher(&course), Ok(johnson));
    assert!(book.teacher_of(&course).is_none());
    assert_eq!(
        book.unassign_teacher(&course),
        Err(GradebookError::NoTeacherAssigned(course))
    );
}

#[test]
fn unknown_handles_are_rejected() {
    let mut book = Gradebook::new();
    let student = book.register_student(creds("Alice"), "STU001", 2023);
    let ghost = CourseCode::new("NOPE999");

    assert_eq!(
        book.enroll_student(&ghost, student),
        Err(GradebookError::CourseNotFound(ghost.clone()))
    );
    let course = book.register_course("Real", 3);
    assert_eq!(
        book.enroll_student(&course, UserId::new(4242)),
        Err(GradebookError::StudentNotFound(UserId::new(4242)))
    );
    assert_eq!(
        book.assign_teacher(&course, student),
        Err(GradebookError::TeacherNotFound(student))
    );
}

#[test]
fn views_are_sorted() {
    let mut book = Gradebook::new();
    let a = book.register_student(creds("A"), "STU001", 2023);
    let b = book.register_student(creds("B"), "STU002", 2023);
    let math = book.register_course_with_code("MATH201", "Calculus II", 3);
    let cs = book.register_course_with_code("CS301", "Data Structures", 4);
    for course in [&math, &cs] {
        book.enroll_student(course, b).unwrap();
        book.enroll_student(course, a).unwrap();
    }
    book.add_grade(b, &math, 70.0).unwrap();
    book.add_grade(a, &math, 80.0).unwrap();
    book.add_grade(b, &cs, 90.0).unwrap();

    let codes: Vec<&str> = book
        .student_grades(b)
        .iter()
        .map(|g| g.course().as_str())
        .collect();
    assert_eq!(codes, ["CS301", "MATH201"]);

    let ids: Vec<UserId> = book.course_grades(&math).iter().map(|g| g.student()).collect();
    assert_eq!(ids, [a, b]);
}

#[test]
fn find_user_reports_role() {
    let mut book = Gradebook::new();
    let admin = book.register_admin(creds("Root"), "ADM001", "FULL");

    let user = book.find_user(admin).unwrap();
    assert_eq!(user.role(), Role::Admin);
    assert!(book.describe_user(user).contains("ADM001"));
}
