//! Interactive menu session
//!
//! The shell reads one answer per line from any `BufRead` and writes prompts
//! and listings to any `Write`. Non-numeric answers to numeric prompts are
//! re-prompted; end of input ends the session.

use gradebook::core::gradebook::Gradebook;
use gradebook::core::identity::{CourseCode, UserId};
use gradebook::core::models::{Credentials, LetterGrade, User};
use gradebook::core::report::{format_score, ReportContext, ReportKind, TextReporter};
use logger::debug;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const RULE: &str = "====================================";

/// What the caller should do after an action returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Outcome of asking the user to pick an existing record
enum Pick<T> {
    Found(T),
    Missing,
    Eof,
}

/// Unwrap a prompt answer, ending the session on end of input
macro_rules! or_quit {
    ($answer:expr) => {
        match $answer? {
            Some(value) => value,
            None => return Ok(Flow::Quit),
        }
    };
}

/// Unwrap a record pick; a missing record returns to the current menu
macro_rules! pick {
    ($answer:expr) => {
        match $answer? {
            Pick::Found(value) => value,
            Pick::Missing => return Ok(Flow::Continue),
            Pick::Eof => return Ok(Flow::Quit),
        }
    };
}

/// Menu-driven session over a gradebook
pub struct Shell<'a, R, W> {
    book: &'a mut Gradebook,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    /// Create a session over `book`
    pub fn new(book: &'a mut Gradebook, input: R, out: W) -> Self {
        Self { book, input, out }
    }

    /// Run the main menu until the user exits or input ends
    ///
    /// # Errors
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "============================================")?;
        writeln!(self.out, "   Welcome to {}", self.book.school_name())?;
        writeln!(self.out, "       School Gradebook System")?;
        writeln!(self.out, "============================================")?;

        loop {
            writeln!(self.out, "\n============ MAIN MENU ============")?;
            writeln!(self.out, "1. Student Management")?;
            writeln!(self.out, "2. Teacher Management")?;
            writeln!(self.out, "3. Course Management")?;
            writeln!(self.out, "4. Grade Management")?;
            writeln!(self.out, "5. Demonstrate Polymorphism")?;
            writeln!(self.out, "6. System Statistics")?;
            writeln!(self.out, "0. Exit")?;
            writeln!(self.out, "{RULE}")?;

            let Some(choice) = self.prompt_number::<i64>("Enter your choice: ")? else {
                debug!("Input ended at main menu");
                break;
            };
            let flow = match choice {
                1 => self.student_menu()?,
                2 => self.teacher_menu()?,
                3 => self.course_menu()?,
                4 => self.grade_menu()?,
                5 => self.demonstrate_polymorphism()?,
                6 => {
                    let stats = TextReporter::statistics(self.book);
                    write!(self.out, "\n{stats}")?;
                    Flow::Continue
                }
                0 => {
                    writeln!(self.out, "\nThank you for using the School Gradebook System!")?;
                    break;
                }
                _ => {
                    writeln!(self.out, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }

        writeln!(self.out, "Goodbye!")?;
        self.out.flush()
    }

    // ---- input helpers ----

    fn prompt_string(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_number<T: FromStr>(&mut self, prompt: &str) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.prompt_string(prompt)? else {
                return Ok(None);
            };
            if let Ok(value) = answer.parse::<T>() {
                return Ok(Some(value));
            }
            writeln!(self.out, "Invalid input. Please enter a number.")?;
        }
    }

    fn prompt_letter(&mut self) -> io::Result<Option<LetterGrade>> {
        loop {
            let Some(answer) = self.prompt_string("Enter letter grade (A-F): ")? else {
                return Ok(None);
            };
            match answer.parse::<LetterGrade>() {
                Ok(letter) => return Ok(Some(letter)),
                Err(e) => writeln!(self.out, "{e}. Please enter A, B, C, D or F.")?,
            }
        }
    }

    fn menu(&mut self, title: &str, items: &[&str]) -> io::Result<Option<i64>> {
        writeln!(self.out, "\n======== {title} ========")?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.out, "{}. {item}", i + 1)?;
        }
        writeln!(self.out, "0. Back to Main Menu")?;
        writeln!(self.out, "{RULE}")?;
        self.prompt_number("Enter your choice: ")
    }

    fn pick_student(&mut self) -> io::Result<Pick<(UserId, String)>> {
        let Some(number) = self.prompt_string("Enter student number: ")? else {
            return Ok(Pick::Eof);
        };
        match self.book.find_student_by_number(&number) {
            Some(s) => Ok(Pick::Found((s.id(), s.name().to_string()))),
            None => {
                writeln!(self.out, "Student not found.")?;
                Ok(Pick::Missing)
            }
        }
    }

    fn pick_teacher(&mut self) -> io::Result<Pick<(UserId, String)>> {
        let Some(id) = self.prompt_number::<u32>("Enter teacher ID: ")? else {
            return Ok(Pick::Eof);
        };
        match self.book.find_teacher_by_id(UserId::new(id)) {
            Some(t) => Ok(Pick::Found((t.id(), t.name().to_string()))),
            None => {
                writeln!(self.out, "Teacher not found.")?;
                Ok(Pick::Missing)
            }
        }
    }

    fn pick_course(&mut self) -> io::Result<Pick<(CourseCode, String)>> {
        let Some(code) = self.prompt_string("Enter course code: ")? else {
            return Ok(Pick::Eof);
        };
        match self.book.find_course_by_code(&code) {
            Some(c) => Ok(Pick::Found((c.code().clone(), c.name.clone()))),
            None => {
                writeln!(self.out, "Course not found.")?;
                Ok(Pick::Missing)
            }
        }
    }

    fn print_report(&mut self, rendered: Result<String, Box<dyn Error>>) -> io::Result<()> {
        match rendered {
            Ok(text) => write!(self.out, "\n{text}"),
            Err(e) => writeln!(self.out, "Error: {e}"),
        }
    }

    // ---- listings ----

    fn list_students(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n========== ALL STUDENTS ==========")?;
        if self.book.students().is_empty() {
            writeln!(self.out, "No students registered.")?;
        }
        for (i, s) in self.book.students().iter().enumerate() {
            writeln!(
                self.out,
                "{}. {} ({}) ID: {}",
                i + 1,
                s.name(),
                s.student_number,
                s.id()
            )?;
        }
        writeln!(self.out, "===================================")
    }

    fn list_teachers(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n========== ALL TEACHERS ==========")?;
        if self.book.teachers().is_empty() {
            writeln!(self.out, "No teachers registered.")?;
        }
        for (i, t) in self.book.teachers().iter().enumerate() {
            writeln!(
                self.out,
                "{}. {} ({}) ID: {}",
                i + 1,
                t.titled_name(),
                t.department,
                t.id()
            )?;
        }
        writeln!(self.out, "===================================")
    }

    fn list_courses(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n========== ALL COURSES ==========")?;
        if self.book.courses().is_empty() {
            writeln!(self.out, "No courses available.")?;
        }
        for (i, c) in self.book.courses().iter().enumerate() {
            let teacher = self
                .book
                .teacher_of(c.code())
                .map_or_else(|| "Not assigned".to_string(), |t| t.name().to_string());
            writeln!(
                self.out,
                "{}. {} - {} (Teacher: {teacher})",
                i + 1,
                c.code(),
                c.name
            )?;
        }
        writeln!(self.out, "==================================")
    }

    // ---- student menu ----

    fn student_menu(&mut self) -> io::Result<Flow> {
        loop {
            let choice = or_quit!(self.menu(
                "STUDENT MANAGEMENT",
                &[
                    "Add New Student",
                    "View All Students",
                    "View Student Details",
                    "View Student Grades",
                    "View Transcript",
                ],
            ));
            let flow = match choice {
                1 => self.add_student()?,
                2 => {
                    self.list_students()?;
                    Flow::Continue
                }
                3 => self.view_student_details()?,
                4 => self.view_student_grades()?,
                5 => self.view_transcript()?,
                0 => return Ok(Flow::Continue),
                _ => {
                    writeln!(self.out, "Invalid choice.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn add_student(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- Add New Student ---")?;
        let name = or_quit!(self.prompt_string("Enter student name: "));
        let email = or_quit!(self.prompt_string("Enter email: "));
        let password = or_quit!(self.prompt_string("Enter password: "));
        let number = or_quit!(self.prompt_string("Enter student number: "));
        let year = or_quit!(self.prompt_number::<i32>("Enter enrollment year: "));

        let id = self
            .book
            .register_student(Credentials::new(name.as_str(), email, password), number, year);
        writeln!(self.out, "Student {name} added successfully (ID: {id}).")?;
        Ok(Flow::Continue)
    }

    fn view_student_details(&mut self) -> io::Result<Flow> {
        let (id, _) = pick!(self.pick_student());
        if let Some(user) = self.book.find_user(id) {
            let card = self.book.describe_user(user);
            write!(self.out, "{card}")?;
        }
        Ok(Flow::Continue)
    }

    fn view_student_grades(&mut self) -> io::Result<Flow> {
        let (id, _) = pick!(self.pick_student());
        let ctx = ReportContext::new(self.book, ReportKind::StudentGrades(id));
        let rendered = TextReporter::student_grades(&ctx, id);
        self.print_report(rendered)?;
        Ok(Flow::Continue)
    }

    fn view_transcript(&mut self) -> io::Result<Flow> {
        let (id, _) = pick!(self.pick_student());
        let ctx = ReportContext::new(self.book, ReportKind::Transcript(id));
        let rendered = TextReporter::transcript(&ctx, id);
        self.print_report(rendered)?;
        Ok(Flow::Continue)
    }

    // ---- teacher menu ----

    fn teacher_menu(&mut self) -> io::Result<Flow> {
        loop {
            let choice = or_quit!(self.menu(
                "TEACHER MANAGEMENT",
                &[
                    "Add New Teacher",
                    "View All Teachers",
                    "View Teacher Details",
                    "Assign Teacher to Course",
                    "Unassign Teacher from Course",
                ],
            ));
            let flow = match choice {
                1 => self.add_teacher()?,
                2 => {
                    self.list_teachers()?;
                    Flow::Continue
                }
                3 => self.view_teacher_details()?,
                4 => self.assign_teacher()?,
                5 => self.unassign_teacher()?,
                0 => return Ok(Flow::Continue),
                _ => {
                    writeln!(self.out, "Invalid choice.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn add_teacher(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- Add New Teacher ---")?;
        let name = or_quit!(self.prompt_string("Enter teacher name: "));
        let email = or_quit!(self.prompt_string("Enter email: "));
        let password = or_quit!(self.prompt_string("Enter password: "));
        let department = or_quit!(self.prompt_string("Enter department: "));
        let title = or_quit!(self.prompt_string("Enter title (e.g., Professor, Dr.): "));

        let id = self.book.register_teacher(
            Credentials::new(name.as_str(), email, password),
            department,
            title,
        );
        writeln!(self.out, "Teacher {name} added successfully (ID: {id}).")?;
        Ok(Flow::Continue)
    }

    fn view_teacher_details(&mut self) -> io::Result<Flow> {
        let (id, _) = pick!(self.pick_teacher());
        if let Some(user) = self.book.find_user(id) {
            let card = self.book.describe_user(user);
            write!(self.out, "{card}")?;
        }
        let taught: Vec<String> = self
            .book
            .taught_courses(id)
            .iter()
            .map(|c| format!("  - {}: {}", c.code(), c.name))
            .collect();
        for line in taught {
            writeln!(self.out, "{line}")?;
        }
        Ok(Flow::Continue)
    }

    fn assign_teacher(&mut self) -> io::Result<Flow> {
        self.list_teachers()?;
        let (teacher, teacher_name) = pick!(self.pick_teacher());
        self.list_courses()?;
        let (course, course_name) = pick!(self.pick_course());

        match self.book.assign_teacher(&course, teacher) {
            Ok(()) => writeln!(self.out, "Teacher {teacher_name} assigned to {course_name}")?,
            Err(e) => writeln!(self.out, "Error: {e}")?,
        }
        Ok(Flow::Continue)
    }

    fn unassign_teacher(&mut self) -> io::Result<Flow> {
        self.list_courses()?;
        let (course, course_name) = pick!(self.pick_course());

        match self.book.unassign_teacher(&course) {
            Ok(teacher) => {
                writeln!(self.out, "Teacher {teacher} is no longer teaching {course_name}")?;
            }
            Err(e) => writeln!(self.out, "Error: {e}")?,
        }
        Ok(Flow::Continue)
    }

    // ---- course menu ----

    fn course_menu(&mut self) -> io::Result<Flow> {
        loop {
            let choice = or_quit!(self.menu(
                "COURSE MANAGEMENT",
                &[
                    "Add New Course",
                    "View All Courses",
                    "View Course Details",
                    "Enroll Student in Course",
                    "View Course Grades",
                    "Remove Student from Course",
                ],
            ));
            let flow = match choice {
                1 => self.add_course()?,
                2 => {
                    self.list_courses()?;
                    Flow::Continue
                }
                3 => self.view_course_details()?,
                4 => self.enroll_student()?,
                5 => self.view_course_grades()?,
                6 => self.remove_student()?,
                0 => return Ok(Flow::Continue),
                _ => {
                    writeln!(self.out, "Invalid choice.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn add_course(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- Add New Course ---")?;
        let name = or_quit!(self.prompt_string("Enter course name: "));
        let credits = or_quit!(self.prompt_number::<u32>("Enter credits: "));
        let code = or_quit!(self.prompt_string("Enter course code (blank to auto-generate): "));

        let code = if code.is_empty() {
            self.book.register_course(name.as_str(), credits)
        } else {
            self.book
                .register_course_with_code(code, name.as_str(), credits)
        };
        writeln!(self.out, "Course {name} added successfully ({code}).")?;
        Ok(Flow::Continue)
    }

    fn view_course_details(&mut self) -> io::Result<Flow> {
        let (code, _) = pick!(self.pick_course());
        let ctx = ReportContext::new(self.book, ReportKind::CourseGrades(code.clone()));
        let rendered = TextReporter::course_details(&ctx, &code);
        self.print_report(rendered)?;
        Ok(Flow::Continue)
    }

    fn view_course_grades(&mut self) -> io::Result<Flow> {
        let (code, _) = pick!(self.pick_course());
        let ctx = ReportContext::new(self.book, ReportKind::CourseGrades(code.clone()));
        let rendered = TextReporter::course_grades(&ctx, &code);
        self.print_report(rendered)?;
        Ok(Flow::Continue)
    }

    fn enroll_student(&mut self) -> io::Result<Flow> {
        self.list_students()?;
        let (student, student_name) = pick!(self.pick_student());
        self.list_courses()?;
        let (course, course_name) = pick!(self.pick_course());

        match self.book.enroll_student(&course, student) {
            Ok(()) => writeln!(self.out, "{student_name} enrolled in {course_name}")?,
            Err(e) => writeln!(self.out, "Error: {e}")?,
        }
        Ok(Flow::Continue)
    }

    fn remove_student(&mut self) -> io::Result<Flow> {
        self.list_students()?;
        let (student, student_name) = pick!(self.pick_student());
        self.list_courses()?;
        let (course, course_name) = pick!(self.pick_course());

        match self.book.remove_student(&course, student) {
            Ok(()) => writeln!(self.out, "{student_name} removed from {course_name}")?,
            Err(e) => writeln!(self.out, "Error: {e}")?,
        }
        Ok(Flow::Continue)
    }

    // ---- grade menu ----

    fn grade_menu(&mut self) -> io::Result<Flow> {
        loop {
            let choice = or_quit!(self.menu(
                "GRADE MANAGEMENT",
                &[
                    "Add Grade",
                    "Add Letter Grade",
                    "Update Grade",
                    "View Student Grades",
                    "View Course Grades",
                ],
            ));
            let flow = match choice {
                1 => self.add_grade()?,
                2 => self.add_letter_grade()?,
                3 => self.update_grade()?,
                4 => self.view_student_grades()?,
                5 => self.view_course_grades()?,
                0 => return Ok(Flow::Continue),
                _ => {
                    writeln!(self.out, "Invalid choice.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn add_grade(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- Add Grade ---")?;
        self.list_students()?;
        let (student, student_name) = pick!(self.pick_student());
        self.list_courses()?;
        let (course, course_name) = pick!(self.pick_course());
        let score = or_quit!(self.prompt_number::<f64>("Enter score (0-100): "));

        let message = match self.book.add_grade(student, &course, score) {
            Ok(grade) => format!(
                "Grade added: {student_name} received {} ({}) in {course_name}",
                grade.letter(),
                format_score(grade.score())
            ),
            Err(e) => format!("Error: {e}"),
        };
        writeln!(self.out, "{message}")?;
        Ok(Flow::Continue)
    }

    fn add_letter_grade(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- Add Letter Grade ---")?;
        self.list_students()?;
        let (student, student_name) = pick!(self.pick_student());
        self.list_courses()?;
        let (course, course_name) = pick!(self.pick_course());
        let letter = or_quit!(self.prompt_letter());

        let message = match self.book.add_letter_grade(student, &course, letter) {
            Ok(grade) => format!(
                "Grade added: {student_name} received {} ({}) in {course_name}",
                grade.letter(),
                format_score(grade.score())
            ),
            Err(e) => format!("Error: {e}"),
        };
        writeln!(self.out, "{message}")?;
        Ok(Flow::Continue)
    }

    fn update_grade(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- Update Grade ---")?;
        self.list_students()?;
        let (student, student_name) = pick!(self.pick_student());
        self.list_courses()?;
        let (course, course_name) = pick!(self.pick_course());
        let score = or_quit!(self.prompt_number::<f64>("Enter new score (0-100): "));

        match self.book.update_grade(student, &course, score) {
            Ok(change) => writeln!(
                self.out,
                "Grade updated: {student_name}'s grade in {course_name} changed from {} ({}) to {} ({})",
                format_score(change.old_score),
                change.old_letter,
                format_score(change.new_score),
                change.new_letter
            )?,
            Err(e) => writeln!(self.out, "Error: {e}")?,
        }
        Ok(Flow::Continue)
    }

    // ---- polymorphism demo ----

    fn demonstrate_polymorphism(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n============ POLYMORPHISM DEMONSTRATION ============")?;
        writeln!(self.out, "The same describe call is made for every user,")?;
        writeln!(self.out, "and each role renders its own card.\n")?;

        let student = self.book.create_student(
            Credentials::new("Demo Student", "demo@student.edu", "pass"),
            "DEMO001",
            2024,
        );
        let teacher = self.book.create_teacher(
            Credentials::new("Demo Teacher", "demo@teacher.edu", "pass"),
            "Computer Science",
            "Professor",
        );
        let admin = self.book.create_admin(
            Credentials::new("Demo Admin", "demo@admin.edu", "pass"),
            "ADM001",
            "FULL",
        );

        for user in [
            User::from(&student),
            User::from(&teacher),
            User::from(&admin),
        ] {
            writeln!(self.out, "--- {} ---", user.role())?;
            let card = self.book.describe_user(user);
            writeln!(self.out, "{card}")?;
        }

        writeln!(self.out, "--- BASIC INFO VARIANTS ---")?;
        writeln!(
            self.out,
            "basic_info() returns: {}",
            student.account.basic_info()
        )?;
        writeln!(
            self.out,
            "basic_info_with(true) returns: {}",
            student.account.basic_info_with(true)
        )?;
        writeln!(
            self.out,
            "\n====================================================="
        )?;
        Ok(Flow::Continue)
    }
}
