//! The gradebook aggregate: owns every user, course, relation and grade.
//!
//! All mutations go through [`Gradebook`]. Lookups return `Option`; mutations
//! that cannot proceed return a [`GradebookError`] and leave the gradebook
//! untouched. Rejections are also reported through the logger at warn level.

use crate::core::error::{GradebookError, GradebookResult};
use crate::core::identity::{CourseCode, IdAllocator, UserId};
use crate::core::models::{
    Admin, Course, Credentials, Enrollments, Grade, GradeChange, GradeKey, LetterGrade, Student,
    Teacher, TeachingAssignments, User,
};
use logger::{debug, info, warn};
use std::collections::HashMap;

/// School name used when none is configured
pub const DEFAULT_SCHOOL_NAME: &str = "OOP University";

/// Snapshot of gradebook-wide counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    /// School name
    pub school_name: String,
    /// Registered students
    pub students: usize,
    /// Registered teachers
    pub teachers: usize,
    /// Registered admins
    pub admins: usize,
    /// Registered courses
    pub courses: usize,
    /// Current enrollment links
    pub enrollments: usize,
    /// Grades ever created (updates not counted)
    pub total_grades_given: u64,
    /// Id the next user will receive
    pub next_user_id: UserId,
    /// Number the next auto-coded course will receive
    pub next_course_number: u32,
}

/// The aggregate root of the school's records
#[derive(Debug, Clone)]
pub struct Gradebook {
    school_name: String,
    ids: IdAllocator,
    students: Vec<Student>,
    teachers: Vec<Teacher>,
    admins: Vec<Admin>,
    courses: Vec<Course>,
    enrollments: Enrollments,
    teaching: TeachingAssignments,
    grades: HashMap<GradeKey, Grade>,
    total_grades_given: u64,
}

fn reject<T>(err: GradebookError) -> GradebookResult<T> {
    warn!("{err}");
    Err(err)
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl Gradebook {
    /// Create an empty gradebook named [`DEFAULT_SCHOOL_NAME`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_school_name(DEFAULT_SCHOOL_NAME)
    }

    /// Create an empty gradebook for the given school
    #[must_use]
    pub fn with_school_name(name: impl Into<String>) -> Self {
        Self {
            school_name: name.into(),
            ids: IdAllocator::new(),
            students: Vec::new(),
            teachers: Vec::new(),
            admins: Vec::new(),
            courses: Vec::new(),
            enrollments: Enrollments::new(),
            teaching: TeachingAssignments::new(),
            grades: HashMap::new(),
            total_grades_given: 0,
        }
    }

    /// School name
    #[must_use]
    pub fn school_name(&self) -> &str {
        &self.school_name
    }

    /// Rename the school
    pub fn set_school_name(&mut self, name: impl Into<String>) {
        self.school_name = name.into();
    }

    // ---- users ----

    /// Build a student with a freshly allocated id, without registering it
    pub fn create_student(
        &mut self,
        credentials: Credentials,
        student_number: impl Into<String>,
        enrollment_year: i32,
    ) -> Student {
        Student::new(
            self.ids.next_user_id(),
            credentials,
            student_number,
            enrollment_year,
        )
    }

    /// Register a student built with [`create_student`](Self::create_student)
    pub fn add_student(&mut self, student: Student) -> UserId {
        let id = student.id();
        info!("Student {} added ({id})", student.name());
        self.students.push(student);
        id
    }

    /// Create and register a student in one step
    pub fn register_student(
        &mut self,
        credentials: Credentials,
        student_number: impl Into<String>,
        enrollment_year: i32,
    ) -> UserId {
        let student = self.create_student(credentials, student_number, enrollment_year);
        self.add_student(student)
    }

    /// Build a teacher with a freshly allocated id, without registering it
    pub fn create_teacher(
        &mut self,
        credentials: Credentials,
        department: impl Into<String>,
        title: impl Into<String>,
    ) -> Teacher {
        Teacher::new(self.ids.next_user_id(), credentials, department, title)
    }

    /// Register a teacher built with [`create_teacher`](Self::create_teacher)
    pub fn add_teacher(&mut self, teacher: Teacher) -> UserId {
        let id = teacher.id();
        info!("Teacher {} added ({id})", teacher.name());
        self.teachers.push(teacher);
        id
    }

    /// Create and register a teacher in one step
    pub fn register_teacher(
        &mut self,
        credentials: Credentials,
        department: impl Into<String>,
        title: impl Into<String>,
    ) -> UserId {
        let teacher = self.create_teacher(credentials, department, title);
        self.add_teacher(teacher)
    }

    /// Build an admin with a freshly allocated id, without registering it
    pub fn create_admin(
        &mut self,
        credentials: Credentials,
        admin_code: impl Into<String>,
        access_level: impl Into<String>,
    ) -> Admin {
        Admin::new(self.ids.next_user_id(), credentials, admin_code, access_level)
    }

    /// Register an admin built with [`create_admin`](Self::create_admin)
    pub fn add_admin(&mut self, admin: Admin) -> UserId {
        let id = admin.id();
        info!("Admin {} added ({id})", admin.account.name);
        self.admins.push(admin);
        id
    }

    /// Create and register an admin in one step
    pub fn register_admin(
        &mut self,
        credentials: Credentials,
        admin_code: impl Into<String>,
        access_level: impl Into<String>,
    ) -> UserId {
        let admin = self.create_admin(credentials, admin_code, access_level);
        self.add_admin(admin)
    }

    /// Registered students, in registration order
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Registered teachers, in registration order
    #[must_use]
    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// Registered admins, in registration order
    #[must_use]
    pub fn admins(&self) -> &[Admin] {
        &self.admins
    }

    /// Find a student by user id
    #[must_use]
    pub fn find_student_by_id(&self, id: UserId) -> Option<&Student> {
        self.students.iter().find(|s| s.id() == id)
    }

    /// Find the first student with this student number
    #[must_use]
    pub fn find_student_by_number(&self, student_number: &str) -> Option<&Student> {
        self.students
            .iter()
            .find(|s| s.student_number == student_number)
    }

    /// Find the first student whose name matches, ignoring case
    #[must_use]
    pub fn find_student_by_name(&self, name: &str) -> Option<&Student> {
        self.students
            .iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    /// Find a teacher by user id
    #[must_use]
    pub fn find_teacher_by_id(&self, id: UserId) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id() == id)
    }

    /// Find the first teacher whose name matches, ignoring case
    #[must_use]
    pub fn find_teacher_by_name(&self, name: &str) -> Option<&Teacher> {
        self.teachers
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// Find an admin by user id
    #[must_use]
    pub fn find_admin_by_id(&self, id: UserId) -> Option<&Admin> {
        self.admins.iter().find(|a| a.id() == id)
    }

    /// Find any registered user by id
    #[must_use]
    pub fn find_user(&self, id: UserId) -> Option<User<'_>> {
        self.find_student_by_id(id)
            .map(User::from)
            .or_else(|| self.find_teacher_by_id(id).map(User::from))
            .or_else(|| self.find_admin_by_id(id).map(User::from))
    }

    /// Render a user's card with the course count read off the relation tables
    #[must_use]
    pub fn describe_user(&self, user: User<'_>) -> String {
        let id = user.account().id();
        let linked = match user {
            User::Student(_) => self.enrollments.courses_of(id).count(),
            User::Teacher(_) => self.teaching.courses_of(id).count(),
            User::Admin(_) => 0,
        };
        user.display_info(linked)
    }

    // ---- courses ----

    /// Build a course with the next auto-generated code, without registering it
    pub fn create_course(&mut self, name: impl Into<String>, credits: u32) -> Course {
        Course::new(self.ids.next_course_code(), name, credits)
    }

    /// Register a course. Codes are not checked for duplicates; lookups return the first match.
    pub fn add_course(&mut self, course: Course) -> CourseCode {
        let code = course.code().clone();
        info!("Course {} added ({code})", course.name);
        self.courses.push(course);
        code
    }

    /// Create and register an auto-coded course
    pub fn register_course(&mut self, name: impl Into<String>, credits: u32) -> CourseCode {
        let course = self.create_course(name, credits);
        self.add_course(course)
    }

    /// Register a course under an explicit code; the auto-code counter is untouched
    pub fn register_course_with_code(
        &mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        credits: u32,
    ) -> CourseCode {
        self.add_course(Course::new(CourseCode::new(code), name, credits))
    }

    /// Registered courses, in registration order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Find the first course with this code
    #[must_use]
    pub fn find_course_by_code(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code().as_str() == code)
    }

    fn require_course(&self, code: &CourseCode) -> GradebookResult<&Course> {
        self.find_course_by_code(code.as_str())
            .map_or_else(|| reject(GradebookError::CourseNotFound(code.clone())), Ok)
    }

    fn require_student(&self, id: UserId) -> GradebookResult<&Student> {
        self.find_student_by_id(id)
            .map_or_else(|| reject(GradebookError::StudentNotFound(id)), Ok)
    }

    fn require_teacher(&self, id: UserId) -> GradebookResult<&Teacher> {
        self.find_teacher_by_id(id)
            .map_or_else(|| reject(GradebookError::TeacherNotFound(id)), Ok)
    }

    // ---- teaching ----

    /// Make `teacher` the teacher of `course`.
    ///
    /// Re-assigning the same teacher changes nothing; assigning a different
    /// one moves the course off the previous teacher's list.
    ///
    /// # Errors
    /// `CourseNotFound` or `TeacherNotFound` for unknown handles.
    pub fn assign_teacher(&mut self, course: &CourseCode, teacher: UserId) -> GradebookResult<()> {
        let course_name = self.require_course(course)?.name.clone();
        let teacher_name = self.require_teacher(teacher)?.name().to_string();

        match self.teaching.assign(course.clone(), teacher) {
            Some(previous) if previous == teacher => {
                debug!("{teacher_name} is already teaching {course_name}");
            }
            Some(previous) => {
                info!("Teacher {teacher_name} assigned to {course_name} (replacing {previous})");
            }
            None => info!("Teacher {teacher_name} assigned to {course_name}"),
        }
        Ok(())
    }

    /// Remove the teacher of `course`, returning who it was
    ///
    /// # Errors
    /// `CourseNotFound` for an unknown course, `NoTeacherAssigned` if it has no teacher.
    pub fn unassign_teacher(&mut self, course: &CourseCode) -> GradebookResult<UserId> {
        self.require_course(course)?;
        match self.teaching.unassign(course) {
            Some(teacher) => {
                info!("Teacher {teacher} is no longer teaching {course}");
                Ok(teacher)
            }
            None => reject(GradebookError::NoTeacherAssigned(course.clone())),
        }
    }

    /// The teacher assigned to `course`, if any
    #[must_use]
    pub fn teacher_of(&self, course: &CourseCode) -> Option<&Teacher> {
        self.teaching
            .teacher_of(course)
            .and_then(|id| self.find_teacher_by_id(id))
    }

    /// Courses taught by `teacher`, in assignment order
    #[must_use]
    pub fn taught_courses(&self, teacher: UserId) -> Vec<&Course> {
        self.teaching
            .courses_of(teacher)
            .filter_map(|code| self.find_course_by_code(code.as_str()))
            .collect()
    }

    // ---- enrollment ----

    /// Put `student` on the roster of `course`
    ///
    /// # Errors
    /// `CourseNotFound`/`StudentNotFound` for unknown handles, `AlreadyEnrolled`
    /// if the student is on the roster already (the roster is unchanged).
    pub fn enroll_student(&mut self, course: &CourseCode, student: UserId) -> GradebookResult<()> {
        let course_name = self.require_course(course)?.name.clone();
        let student_name = self.require_student(student)?.name().to_string();

        if !self.enrollments.insert(student, course.clone()) {
            return reject(GradebookError::AlreadyEnrolled {
                student,
                course: course.clone(),
            });
        }
        info!("{student_name} enrolled in {course_name}");
        Ok(())
    }

    /// Take `student` off the roster of `course`; recorded grades are kept
    ///
    /// # Errors
    /// `CourseNotFound`/`StudentNotFound` for unknown handles, `NotEnrolled`
    /// if the student was not on the roster.
    pub fn remove_student(&mut self, course: &CourseCode, student: UserId) -> GradebookResult<()> {
        let course_name = self.require_course(course)?.name.clone();
        let student_name = self.require_student(student)?.name().to_string();

        if !self.enrollments.remove(student, course) {
            return reject(GradebookError::NotEnrolled {
                student,
                course: course.clone(),
            });
        }
        info!("{student_name} removed from {course_name}");
        Ok(())
    }

    /// Whether `student` is currently on the roster of `course`
    #[must_use]
    pub fn is_enrolled(&self, student: UserId, course: &CourseCode) -> bool {
        self.enrollments.contains(student, course)
    }

    /// Students enrolled in `course`, in enrollment order
    #[must_use]
    pub fn roster(&self, course: &CourseCode) -> Vec<&Student> {
        self.enrollments
            .students_in(course)
            .filter_map(|id| self.find_student_by_id(id))
            .collect()
    }

    /// Courses `student` is enrolled in, in enrollment order
    #[must_use]
    pub fn enrolled_courses(&self, student: UserId) -> Vec<&Course> {
        self.enrollments
            .courses_of(student)
            .filter_map(|code| self.find_course_by_code(code.as_str()))
            .collect()
    }

    // ---- grades ----

    fn check_gradable(&self, student: UserId, course: &CourseCode) -> GradebookResult<GradeKey> {
        self.require_course(course)?;
        self.require_student(student)?;
        if !self.enrollments.contains(student, course) {
            return reject(GradebookError::NotEnrolled {
                student,
                course: course.clone(),
            });
        }
        let key = GradeKey::new(student, course.clone());
        if self.grades.contains_key(&key) {
            return reject(GradebookError::GradeAlreadyExists {
                student,
                course: course.clone(),
            });
        }
        Ok(key)
    }

    fn store_grade(&mut self, grade: Grade) -> &Grade {
        self.total_grades_given += 1;
        info!(
            "Grade added: student {} received {} ({}) in {}",
            grade.student(),
            grade.letter(),
            grade.score(),
            grade.course()
        );
        self.grades.entry(grade.key().clone()).or_insert(grade)
    }

    /// Record a numeric grade; the score is clamped into `[0, 100]`
    ///
    /// # Errors
    /// `NotEnrolled` if the student is not on the roster, `GradeAlreadyExists`
    /// if the key is already graded, `*NotFound` for unknown handles.
    pub fn add_grade(
        &mut self,
        student: UserId,
        course: &CourseCode,
        score: f64,
    ) -> GradebookResult<&Grade> {
        let key = self.check_gradable(student, course)?;
        Ok(self.store_grade(Grade::from_score(key, score)))
    }

    /// Record a grade entered as a letter; the score becomes the letter's canonical value
    ///
    /// # Errors
    /// Same as [`add_grade`](Self::add_grade).
    pub fn add_letter_grade(
        &mut self,
        student: UserId,
        course: &CourseCode,
        letter: LetterGrade,
    ) -> GradebookResult<&Grade> {
        let key = self.check_gradable(student, course)?;
        Ok(self.store_grade(Grade::from_letter(key, letter)))
    }

    /// Change an existing grade's score and re-derive its letter
    ///
    /// # Errors
    /// `GradeNotFound` if nothing is recorded for the key yet.
    pub fn update_grade(
        &mut self,
        student: UserId,
        course: &CourseCode,
        new_score: f64,
    ) -> GradebookResult<GradeChange> {
        let key = GradeKey::new(student, course.clone());
        let Some(grade) = self.grades.get_mut(&key) else {
            return reject(GradebookError::GradeNotFound {
                student,
                course: course.clone(),
            });
        };

        let old_score = grade.score();
        let old_letter = grade.letter();
        grade.set_score(new_score);
        let change = GradeChange {
            old_score,
            old_letter,
            new_score: grade.score(),
            new_letter: grade.letter(),
        };
        info!(
            "Grade updated: student {student} in {course} changed from {old_score} to {}",
            change.new_score
        );
        Ok(change)
    }

    /// The grade recorded for (`student`, `course`), if any
    #[must_use]
    pub fn grade(&self, student: UserId, course: &CourseCode) -> Option<&Grade> {
        self.grades.get(&GradeKey::new(student, course.clone()))
    }

    /// Every recorded grade, in no particular order
    pub fn grades(&self) -> impl Iterator<Item = &Grade> {
        self.grades.values()
    }

    /// Grades of `student`, sorted by course code
    #[must_use]
    pub fn student_grades(&self, student: UserId) -> Vec<&Grade> {
        let mut grades: Vec<&Grade> = self
            .grades
            .values()
            .filter(|g| g.student() == student)
            .collect();
        grades.sort_by(|a, b| a.course().cmp(b.course()));
        grades
    }

    /// Grades recorded in `course`, sorted by student id
    #[must_use]
    pub fn course_grades(&self, course: &CourseCode) -> Vec<&Grade> {
        let mut grades: Vec<&Grade> = self
            .grades
            .values()
            .filter(|g| g.course() == course)
            .collect();
        grades.sort_by_key(|g| g.student());
        grades
    }

    /// Mean score of the grades in `course`; 0 when there are none
    #[must_use]
    pub fn course_average(&self, course: &CourseCode) -> f64 {
        mean(
            self.grades
                .values()
                .filter(|g| g.course() == course)
                .map(Grade::score),
        )
    }

    /// Mean grade points (A=4 ... F=0) over `student`'s grades; 0 when there are none
    #[must_use]
    pub fn student_gpa(&self, student: UserId) -> f64 {
        mean(
            self.grades
                .values()
                .filter(|g| g.student() == student)
                .map(|g| g.letter().points()),
        )
    }

    /// Number of grades ever created; updates do not count
    #[must_use]
    pub const fn total_grades_given(&self) -> u64 {
        self.total_grades_given
    }

    /// Snapshot of the gradebook-wide counters
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        Statistics {
            school_name: self.school_name.clone(),
            students: self.students.len(),
            teachers: self.teachers.len(),
            admins: self.admins.len(),
            courses: self.courses.len(),
            enrollments: self.enrollments.len(),
            total_grades_given: self.total_grades_given,
            next_user_id: self.ids.peek_user_id(),
            next_course_number: self.ids.peek_course_number(),
        }
    }
}

impl Default for Gradebook {
    fn default() -> Self {
        Self::new()
    }
}
