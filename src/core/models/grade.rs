//! Grade model: a clamped score and its letter band for one (student, course) key

use crate::core::identity::{CourseCode, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest score a grade can hold
pub const MIN_SCORE: f64 = 0.0;

/// Highest score a grade can hold
pub const MAX_SCORE: f64 = 100.0;

/// Scores at or above this value pass (letter D or better)
pub const PASSING_SCORE: f64 = 60.0;

/// Five-band letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LetterGrade {
    /// 90 and above
    A,
    /// 80 to below 90
    B,
    /// 70 to below 80
    C,
    /// 60 to below 70
    D,
    /// Below 60
    F,
}

impl LetterGrade {
    /// Band a score using the fixed thresholds 90/80/70/60
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::A
        } else if score >= 80.0 {
            Self::B
        } else if score >= 70.0 {
            Self::C
        } else if score >= PASSING_SCORE {
            Self::D
        } else {
            Self::F
        }
    }

    /// Grade points used for GPA (A=4 ... F=0)
    #[must_use]
    pub const fn points(self) -> f64 {
        match self {
            Self::A => 4.0,
            Self::B => 3.0,
            Self::C => 2.0,
            Self::D => 1.0,
            Self::F => 0.0,
        }
    }

    /// Representative score stored when a grade is entered as a letter
    #[must_use]
    pub const fn canonical_score(self) -> f64 {
        match self {
            Self::A => 95.0,
            Self::B => 85.0,
            Self::C => 75.0,
            Self::D => 65.0,
            Self::F => 50.0,
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(letter)
    }
}

impl FromStr for LetterGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "F" => Ok(Self::F),
            _ => Err(format!("Unknown letter grade: '{s}'")),
        }
    }
}

/// Clamp a raw score into `[0, 100]`; NaN becomes 0
#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        MIN_SCORE
    } else {
        score.clamp(MIN_SCORE, MAX_SCORE)
    }
}

/// Which input mode produced a grade's current value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeOrigin {
    /// Numeric score; the letter is derived from it
    Score,
    /// Letter entered directly; the score is the letter's canonical stand-in
    Letter,
}

/// Identifies the single grade a student may hold in a course
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GradeKey {
    /// Graded student
    pub student: UserId,
    /// Course the grade is for
    pub course: CourseCode,
}

impl GradeKey {
    /// Build a key from its parts
    #[must_use]
    pub const fn new(student: UserId, course: CourseCode) -> Self {
        Self { student, course }
    }
}

impl fmt::Display for GradeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.student, self.course)
    }
}

/// A recorded grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    key: GradeKey,
    score: f64,
    letter: LetterGrade,
    origin: GradeOrigin,
}

impl Grade {
    /// Score-first grade: the score is clamped and the letter derived from it
    #[must_use]
    pub fn from_score(key: GradeKey, score: f64) -> Self {
        let mut grade = Self {
            key,
            score: MIN_SCORE,
            letter: LetterGrade::F,
            origin: GradeOrigin::Score,
        };
        grade.set_score(score);
        grade
    }

    /// Letter-first grade: the letter is kept and the score set to its canonical value
    #[must_use]
    pub fn from_letter(key: GradeKey, letter: LetterGrade) -> Self {
        Self {
            key,
            score: letter.canonical_score(),
            letter,
            origin: GradeOrigin::Letter,
        }
    }

    /// Clamp `score` into `[0, 100]` and recompute the letter
    pub fn set_score(&mut self, score: f64) {
        self.score = clamp_score(score);
        self.letter = LetterGrade::from_score(self.score);
        self.origin = GradeOrigin::Score;
    }

    /// The (student, course) key
    #[must_use]
    pub const fn key(&self) -> &GradeKey {
        &self.key
    }

    /// Graded student
    #[must_use]
    pub const fn student(&self) -> UserId {
        self.key.student
    }

    /// Course the grade is for
    #[must_use]
    pub const fn course(&self) -> &CourseCode {
        &self.key.course
    }

    /// Stored score
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Stored letter
    #[must_use]
    pub const fn letter(&self) -> LetterGrade {
        self.letter
    }

    /// Input mode behind the current value
    #[must_use]
    pub const fn origin(&self) -> GradeOrigin {
        self.origin
    }

    /// Score of 60 or more
    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.score >= PASSING_SCORE
    }
}

/// Before/after values reported by a grade update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeChange {
    /// Score before the update
    pub old_score: f64,
    /// Letter before the update
    pub old_letter: LetterGrade,
    /// Score after clamping
    pub new_score: f64,
    /// Letter derived from the new score
    pub new_letter: LetterGrade,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> GradeKey {
        GradeKey::new(UserId::new(1002), CourseCode::new("OOP101"))
    }

    #[test]
    fn test_letter_thresholds() {
        assert_eq!(LetterGrade::from_score(100.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_score(90.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_score(89.99), LetterGrade::B);
        assert_eq!(LetterGrade::from_score(80.0), LetterGrade::B);
        assert_eq!(LetterGrade::from_score(79.99), LetterGrade::C);
        assert_eq!(LetterGrade::from_score(70.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_score(69.99), LetterGrade::D);
        assert_eq!(LetterGrade::from_score(60.0), LetterGrade::D);
        assert_eq!(LetterGrade::from_score(59.99), LetterGrade::F);
        assert_eq!(LetterGrade::from_score(0.0), LetterGrade::F);
    }

    #[test]
    fn test_letter_is_monotonic_in_score() {
        let mut previous = LetterGrade::F;
        for tenths in 0..=1000 {
            let letter = LetterGrade::from_score(f64::from(tenths) / 10.0);
            assert!(letter <= previous, "letter regressed at {tenths} tenths");
            previous = letter;
        }
    }

    #[test]
    fn test_set_score_clamps() {
        let mut grade = Grade::from_score(key(), -12.0);
        assert!((grade.score() - 0.0).abs() < f64::EPSILON);
        assert_eq!(grade.letter(), LetterGrade::F);

        grade.set_score(140.0);
        assert!((grade.score() - 100.0).abs() < f64::EPSILON);
        assert_eq!(grade.letter(), LetterGrade::A);

        grade.set_score(f64::NAN);
        assert!((grade.score() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_score_is_idempotent_under_clamping() {
        for raw in [-50.0, 0.0, 59.99, 75.5, 100.0, 250.0] {
            let mut once = Grade::from_score(key(), raw);
            let mut twice = Grade::from_score(key(), raw);
            twice.set_score(twice.score());

            once.set_score(raw);
            assert!((once.score() - twice.score()).abs() < f64::EPSILON);
            assert_eq!(once.letter(), twice.letter());
        }
    }

    #[test]
    fn test_letter_first_uses_canonical_scores() {
        let cases = [
            (LetterGrade::A, 95.0),
            (LetterGrade::B, 85.0),
            (LetterGrade::C, 75.0),
            (LetterGrade::D, 65.0),
            (LetterGrade::F, 50.0),
        ];
        for (letter, score) in cases {
            let grade = Grade::from_letter(key(), letter);
            assert_eq!(grade.letter(), letter);
            assert!((grade.score() - score).abs() < f64::EPSILON);
            assert_eq!(grade.origin(), GradeOrigin::Letter);
        }
    }

    #[test]
    fn test_set_score_switches_origin_back_to_score() {
        let mut grade = Grade::from_letter(key(), LetterGrade::B);
        grade.set_score(91.0);

        assert_eq!(grade.origin(), GradeOrigin::Score);
        assert_eq!(grade.letter(), LetterGrade::A);
    }

    #[test]
    fn test_is_passing() {
        assert!(Grade::from_score(key(), 60.0).is_passing());
        assert!(!Grade::from_score(key(), 59.99).is_passing());
        assert!(Grade::from_letter(key(), LetterGrade::D).is_passing());
        assert!(!Grade::from_letter(key(), LetterGrade::F).is_passing());
    }

    #[test]
    fn test_letter_parsing() {
        assert_eq!("a".parse::<LetterGrade>(), Ok(LetterGrade::A));
        assert_eq!(" F ".parse::<LetterGrade>(), Ok(LetterGrade::F));
        assert!("E".parse::<LetterGrade>().is_err());
        assert!("A+".parse::<LetterGrade>().is_err());
    }

    #[test]
    fn test_points() {
        assert!((LetterGrade::A.points() - 4.0).abs() < f64::EPSILON);
        assert!((LetterGrade::F.points() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(key().to_string(), "1002_OOP101");
    }
}
