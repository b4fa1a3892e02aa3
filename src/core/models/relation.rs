//! Relation tables linking students and teachers to courses.
//!
//! Each link is stored once. Rosters, a student's course list and a teacher's
//! course list are all read off these tables, so the two sides of a link can
//! never disagree.

use crate::core::identity::{CourseCode, UserId};

/// One student enrolled in one course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    /// Enrolled student
    pub student: UserId,
    /// Course enrolled in
    pub course: CourseCode,
}

/// Enrollment links in the order they were made
#[derive(Debug, Clone, Default)]
pub struct Enrollments {
    entries: Vec<Enrollment>,
}

impl Enrollments {
    /// Create an empty table
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Whether `student` is currently enrolled in `course`
    #[must_use]
    pub fn contains(&self, student: UserId, course: &CourseCode) -> bool {
        self.entries
            .iter()
            .any(|e| e.student == student && &e.course == course)
    }

    /// Record a link. Returns `false` (and changes nothing) if it already exists.
    pub fn insert(&mut self, student: UserId, course: CourseCode) -> bool {
        if self.contains(student, &course) {
            return false;
        }
        self.entries.push(Enrollment { student, course });
        true
    }

    /// Drop a link. Returns `false` if there was none.
    pub fn remove(&mut self, student: UserId, course: &CourseCode) -> bool {
        if let Some(pos) = self
            .entries
            .iter()
            .position(|e| e.student == student && &e.course == course)
        {
            self.entries.remove(pos);
            true
        } else {
            false
        }
    }

    /// Students enrolled in `course`, in enrollment order
    pub fn students_in<'a>(&'a self, course: &'a CourseCode) -> impl Iterator<Item = UserId> + 'a {
        self.entries
            .iter()
            .filter(move |e| &e.course == course)
            .map(|e| e.student)
    }

    /// Courses `student` is enrolled in, in enrollment order
    pub fn courses_of(&self, student: UserId) -> impl Iterator<Item = &CourseCode> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.student == student)
            .map(|e| &e.course)
    }

    /// Total number of links
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no links
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One teacher assigned to one course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeachingAssignment {
    /// Course being taught
    pub course: CourseCode,
    /// Assigned teacher
    pub teacher: UserId,
}

/// Course-to-teacher assignments; a course has at most one teacher
#[derive(Debug, Clone, Default)]
pub struct TeachingAssignments {
    entries: Vec<TeachingAssignment>,
}

impl TeachingAssignments {
    /// Create an empty table
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set the teacher of `course`, returning the previous one if there was one.
    ///
    /// A course keeps its position when its teacher is replaced.
    pub fn assign(&mut self, course: CourseCode, teacher: UserId) -> Option<UserId> {
        if let Some(entry) = self.entries.iter_mut().find(|a| a.course == course) {
            Some(std::mem::replace(&mut entry.teacher, teacher))
        } else {
            self.entries.push(TeachingAssignment { course, teacher });
            None
        }
    }

    /// Clear the teacher of `course`, returning who it was
    pub fn unassign(&mut self, course: &CourseCode) -> Option<UserId> {
        let pos = self.entries.iter().position(|a| &a.course == course)?;
        Some(self.entries.remove(pos).teacher)
    }

    /// Teacher of `course`, if assigned
    #[must_use]
    pub fn teacher_of(&self, course: &CourseCode) -> Option<UserId> {
        self.entries
            .iter()
            .find(|a| &a.course == course)
            .map(|a| a.teacher)
    }

    /// Courses taught by `teacher`, in assignment order
    pub fn courses_of(&self, teacher: UserId) -> impl Iterator<Item = &CourseCode> + '_ {
        self.entries
            .iter()
            .filter(move |a| a.teacher == teacher)
            .map(|a| &a.course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_insert_is_unique() {
        let mut table = Enrollments::new();
        let course = CourseCode::new("OOP101");

        assert!(table.insert(UserId::new(1002), course.clone()));
        assert!(!table.insert(UserId::new(1002), course.clone()));
        assert_eq!(table.len(), 1);
        assert!(table.contains(UserId::new(1002), &course));
    }

    #[test]
    fn test_enrollment_views_agree() {
        let mut table = Enrollments::new();
        let oop = CourseCode::new("OOP101");
        let math = CourseCode::new("MATH201");
        table.insert(UserId::new(1), oop.clone());
        table.insert(UserId::new(2), oop.clone());
        table.insert(UserId::new(1), math.clone());

        let roster: Vec<UserId> = table.students_in(&oop).collect();
        assert_eq!(roster, vec![UserId::new(1), UserId::new(2)]);

        let courses: Vec<&CourseCode> = table.courses_of(UserId::new(1)).collect();
        assert_eq!(courses, vec![&oop, &math]);
    }

    #[test]
    fn test_enrollment_remove() {
        let mut table = Enrollments::new();
        let oop = CourseCode::new("OOP101");
        table.insert(UserId::new(1), oop.clone());

        assert!(table.remove(UserId::new(1), &oop));
        assert!(!table.remove(UserId::new(1), &oop));
        assert!(table.is_empty());
        assert_eq!(table.courses_of(UserId::new(1)).count(), 0);
    }

    #[test]
    fn test_assignment_replaces_teacher() {
        let mut table = TeachingAssignments::new();
        let oop = CourseCode::new("OOP101");

        assert_eq!(table.assign(oop.clone(), UserId::new(10)), None);
        assert_eq!(table.assign(oop.clone(), UserId::new(10)), Some(UserId::new(10)));
        assert_eq!(table.courses_of(UserId::new(10)).count(), 1);

        assert_eq!(table.assign(oop.clone(), UserId::new(11)), Some(UserId::new(10)));
        assert_eq!(table.teacher_of(&oop), Some(UserId::new(11)));
        assert_eq!(table.courses_of(UserId::new(10)).count(), 0);
    }

    #[test]
    fn test_unassign() {
        let mut table = TeachingAssignments::new();
        let oop = CourseCode::new("OOP101");
        table.assign(oop.clone(), UserId::new(10));

        assert_eq!(table.unassign(&oop), Some(UserId::new(10)));
        assert_eq!(table.unassign(&oop), None);
        assert_eq!(table.teacher_of(&oop), None);
    }
}
