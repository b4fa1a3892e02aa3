//! Identifier allocation for users and auto-coded courses

use serde::{Deserialize, Serialize};
use std::fmt;

/// First id handed out to a user
pub const FIRST_USER_ID: u32 = 1000;

/// First numeric suffix used for auto-generated course codes
pub const FIRST_COURSE_NUMBER: u32 = 100;

/// Prefix of auto-generated course codes
pub const COURSE_CODE_PREFIX: &str = "CS";

/// Identifier of a user (student, teacher or admin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(u32);

impl UserId {
    /// Wrap a raw id, e.g. one typed at the console
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw numeric id
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Course code, either auto-generated (`CS100`, `CS101`, ...) or supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseCode(String);

impl CourseCode {
    /// Wrap an explicit course code
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Monotonic counters for user ids and course codes.
///
/// Counters never decrement and are never reset; a fresh allocator (one per
/// gradebook) starts over at [`FIRST_USER_ID`] and [`FIRST_COURSE_NUMBER`].
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next_user: u32,
    next_course: u32,
}

impl IdAllocator {
    /// Create an allocator at the initial counter values
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_user: FIRST_USER_ID,
            next_course: FIRST_COURSE_NUMBER,
        }
    }

    /// Consume and return the next user id
    pub fn next_user_id(&mut self) -> UserId {
        let id = UserId(self.next_user);
        self.next_user += 1;
        id
    }

    /// Consume the next course number and return it as a code (`CS<n>`)
    pub fn next_course_code(&mut self) -> CourseCode {
        let code = CourseCode(format!("{COURSE_CODE_PREFIX}{}", self.next_course));
        self.next_course += 1;
        code
    }

    /// The id the next user will receive
    #[must_use]
    pub const fn peek_user_id(&self) -> UserId {
        UserId(self.next_user)
    }

    /// The number the next auto-coded course will receive
    #[must_use]
    pub const fn peek_course_number(&self) -> u32 {
        self.next_course
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
