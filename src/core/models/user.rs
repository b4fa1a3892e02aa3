//! User models: the shared account plus the Student, Teacher and Admin variants

use crate::core::identity::UserId;
use std::fmt;

/// Access level that grants an admin full access
pub const FULL_ACCESS: &str = "FULL";

/// Name, email and password supplied when a user is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Full name
    pub name: String,
    /// Email address, used as the login name
    pub email: String,
    /// Plain-text password
    pub password: String,
}

impl Credentials {
    /// Bundle name, email and password
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Fields every user has, whatever the role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: UserId,
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    password: String,
}

impl Account {
    /// Create an account under an already allocated id
    #[must_use]
    pub fn new(id: UserId, credentials: Credentials) -> Self {
        Self {
            id,
            name: credentials.name,
            email: credentials.email,
            password: credentials.password,
        }
    }

    /// The immutable user id
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Replace the password
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Exact, case-sensitive match on both email and password
    #[must_use]
    pub fn login(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    /// `ID: <id>, Name: <name>`
    #[must_use]
    pub fn basic_info(&self) -> String {
        format!("ID: {}, Name: {}", self.id, self.name)
    }

    /// Like [`basic_info`](Self::basic_info), with `, Email: <email>` appended when asked
    #[must_use]
    pub fn basic_info_with(&self, include_email: bool) -> String {
        if include_email {
            format!("{}, Email: {}", self.basic_info(), self.email)
        } else {
            self.basic_info()
        }
    }
}

/// The fixed set of user roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Enrolls in courses and receives grades
    Student,
    /// Teaches courses
    Teacher,
    /// Administers the school
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Student => "Student",
            Self::Teacher => "Teacher",
            Self::Admin => "Admin",
        };
        f.write_str(name)
    }
}

/// A student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Shared account fields
    pub account: Account,
    /// School-issued number (e.g., "STU001"); not checked for uniqueness
    pub student_number: String,
    /// Year of first enrollment
    pub enrollment_year: i32,
}

impl Student {
    /// Create a student under an already allocated id
    #[must_use]
    pub fn new(
        id: UserId,
        credentials: Credentials,
        student_number: impl Into<String>,
        enrollment_year: i32,
    ) -> Self {
        Self {
            account: Account::new(id, credentials),
            student_number: student_number.into(),
            enrollment_year,
        }
    }

    /// Shorthand for `account.id()`
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.account.id()
    }

    /// Shorthand for `account.name`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.account.name
    }

    /// Render the student card; `enrolled_courses` comes from the enrollment table
    #[must_use]
    pub fn display_info(&self, enrolled_courses: usize) -> String {
        StudentCard {
            student: self,
            enrolled_courses,
        }
        .to_string()
    }
}

struct StudentCard<'a> {
    student: &'a Student,
    enrolled_courses: usize,
}

impl fmt::Display for StudentCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.student;
        writeln!(f, "========== STUDENT INFORMATION ==========")?;
        writeln!(f, "User ID: {}", s.id())?;
        writeln!(f, "Student Number: {}", s.student_number)?;
        writeln!(f, "Name: {}", s.account.name)?;
        writeln!(f, "Email: {}", s.account.email)?;
        writeln!(f, "Enrollment Year: {}", s.enrollment_year)?;
        writeln!(f, "Enrolled Courses: {}", self.enrolled_courses)?;
        writeln!(f, "==========================================")
    }
}

/// A teacher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    /// Shared account fields
    pub account: Account,
    /// Department (e.g., "Computer Science")
    pub department: String,
    /// Academic title (e.g., "Professor", "Dr.")
    pub title: String,
}

impl Teacher {
    /// Create a teacher under an already allocated id
    #[must_use]
    pub fn new(
        id: UserId,
        credentials: Credentials,
        department: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            account: Account::new(id, credentials),
            department: department.into(),
            title: title.into(),
        }
    }

    /// Shorthand for `account.id()`
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.account.id()
    }

    /// Shorthand for `account.name`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.account.name
    }

    /// Title and name, e.g. "Professor John Smith"
    #[must_use]
    pub fn titled_name(&self) -> String {
        format!("{} {}", self.title, self.account.name)
    }

    /// Render the teacher card; `taught_courses` comes from the teaching table
    #[must_use]
    pub fn display_info(&self, taught_courses: usize) -> String {
        TeacherCard {
            teacher: self,
            taught_courses,
        }
        .to_string()
    }
}

struct TeacherCard<'a> {
    teacher: &'a Teacher,
    taught_courses: usize,
}

impl fmt::Display for TeacherCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.teacher;
        writeln!(f, "========== TEACHER INFORMATION ==========")?;
        writeln!(f, "User ID: {}", t.id())?;
        writeln!(f, "Name: {}", t.titled_name())?;
        writeln!(f, "Email: {}", t.account.email)?;
        writeln!(f, "Department: {}", t.department)?;
        writeln!(f, "Courses Teaching: {}", self.taught_courses)?;
        writeln!(f, "==========================================")
    }
}

/// An administrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    /// Shared account fields
    pub account: Account,
    /// Admin code (e.g., "ADM001")
    pub admin_code: String,
    /// Access level (e.g., "FULL", "LIMITED")
    pub access_level: String,
}

impl Admin {
    /// Create an admin under an already allocated id
    #[must_use]
    pub fn new(
        id: UserId,
        credentials: Credentials,
        admin_code: impl Into<String>,
        access_level: impl Into<String>,
    ) -> Self {
        Self {
            account: Account::new(id, credentials),
            admin_code: admin_code.into(),
            access_level: access_level.into(),
        }
    }

    /// Shorthand for `account.id()`
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.account.id()
    }

    /// True only for the exact access level `FULL`
    #[must_use]
    pub fn has_full_access(&self) -> bool {
        self.access_level == FULL_ACCESS
    }

    /// Render the admin card
    #[must_use]
    pub fn display_info(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Admin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========== ADMIN INFORMATION ==========")?;
        writeln!(f, "User ID: {}", self.id())?;
        writeln!(f, "Name: {}", self.account.name)?;
        writeln!(f, "Email: {}", self.account.email)?;
        writeln!(f, "Admin Code: {}", self.admin_code)?;
        writeln!(f, "Access Level: {}", self.access_level)?;
        writeln!(f, "========================================")
    }
}

/// Borrowed view over any user, dispatching on the role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum User<'a> {
    /// A student
    Student(&'a Student),
    /// A teacher
    Teacher(&'a Teacher),
    /// An admin
    Admin(&'a Admin),
}

impl<'a> User<'a> {
    /// The role tag of this user
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Student(_) => Role::Student,
            Self::Teacher(_) => Role::Teacher,
            Self::Admin(_) => Role::Admin,
        }
    }

    /// The shared account fields
    #[must_use]
    pub const fn account(&self) -> &'a Account {
        match *self {
            Self::Student(s) => &s.account,
            Self::Teacher(t) => &t.account,
            Self::Admin(a) => &a.account,
        }
    }

    /// Render the role-specific card.
    ///
    /// `linked_courses` is the enrolled count for students and the taught
    /// count for teachers; admins ignore it.
    #[must_use]
    pub fn display_info(&self, linked_courses: usize) -> String {
        match self {
            Self::Student(s) => s.display_info(linked_courses),
            Self::Teacher(t) => t.display_info(linked_courses),
            Self::Admin(a) => a.display_info(),
        }
    }
}

impl<'a> From<&'a Student> for User<'a> {
    fn from(student: &'a Student) -> Self {
        Self::Student(student)
    }
}

impl<'a> From<&'a Teacher> for User<'a> {
    fn from(teacher: &'a Teacher) -> Self {
        Self::Teacher(teacher)
    }
}

impl<'a> From<&'a Admin> for User<'a> {
    fn from(admin: &'a Admin) -> Self {
        Self::Admin(admin)
    }
}
