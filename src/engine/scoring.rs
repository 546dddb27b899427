//! Scoring and grading formulas.

use std::fmt;

use serde::Serialize;

/// Extra multiplier granted per consecutive prior correct answer.
const STREAK_BONUS_STEP: f64 = 0.1;

/// `1 + 0.1 * streak`, uncapped.
pub fn bonus_multiplier(streak: u32) -> f64 {
    1.0 + f64::from(streak) * STREAK_BONUS_STEP
}

/// Points for a correct answer given the streak before submission.
///
/// Computed in `f64` and rounded half away from zero, so a 10 point question
/// at streak 1 is worth 11 and a 15 point question at streak 5 is worth 23.
pub fn earned_points(points: u32, streak: u32) -> u32 {
    (f64::from(points) * bonus_multiplier(streak)).round() as u32
}

/// Rounded share of correct answers, 0 when there are no questions.
pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * correct as f64 / total as f64).round() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum GradeLetter {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl GradeLetter {
    /// Thresholds, highest first. First match wins.
    const THRESHOLDS: [(u32, GradeLetter); 5] = [
        (90, GradeLetter::APlus),
        (80, GradeLetter::A),
        (70, GradeLetter::B),
        (60, GradeLetter::C),
        (50, GradeLetter::D),
    ];

    pub fn from_percentage(percentage: u32) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(min, _)| percentage >= *min)
            .map(|(_, letter)| *letter)
            .unwrap_or(GradeLetter::F)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GradeLetter::APlus => "A+",
            GradeLetter::A => "A",
            GradeLetter::B => "B",
            GradeLetter::C => "C",
            GradeLetter::D => "D",
            GradeLetter::F => "F",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            GradeLetter::APlus => "Exceptionnel ! Vous êtes un expert !",
            GradeLetter::A => "Excellent travail !",
            GradeLetter::B => "Très bien ! Continuez comme ça !",
            GradeLetter::C => "Pas mal ! Encore un peu d'effort !",
            GradeLetter::D => "Vous pouvez faire mieux !",
            GradeLetter::F => "Révisez et réessayez !",
        }
    }
}

impl fmt::Display for GradeLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final grade of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grade {
    pub letter: GradeLetter,
    pub percentage: u32,
    pub message: &'static str,
}

impl Grade {
    pub fn compute(correct: usize, total: usize) -> Self {
        let percentage = percentage(correct, total);
        let letter = GradeLetter::from_percentage(percentage);
        Self {
            letter,
            percentage,
            message: letter.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_multiplier() {
        assert_eq!(bonus_multiplier(0), 1.0);
        assert!((bonus_multiplier(1) - 1.1).abs() < 1e-9);
        assert!((bonus_multiplier(12) - 2.2).abs() < 1e-9);
    }

    #[test]
    fn test_earned_points_vectors() {
        let vectors = [
            // (points, streak, expected)
            (10, 0, 10),
            (10, 1, 11),
            (10, 2, 12),
            (20, 1, 22),
            (20, 3, 26),
            (30, 5, 45),
            (30, 7, 51),
            (15, 5, 23),
            (10, 10, 20),
            (0, 4, 0),
        ];
        for (points, streak, expected) in vectors {
            assert_eq!(
                earned_points(points, streak),
                expected,
                "points={} streak={}",
                points,
                streak
            );
        }
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(8, 9), 89);
        assert_eq!(percentage(9, 10), 90);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(GradeLetter::from_percentage(100), GradeLetter::APlus);
        assert_eq!(GradeLetter::from_percentage(90), GradeLetter::APlus);
        assert_eq!(GradeLetter::from_percentage(89), GradeLetter::A);
        assert_eq!(GradeLetter::from_percentage(80), GradeLetter::A);
        assert_eq!(GradeLetter::from_percentage(79), GradeLetter::B);
        assert_eq!(GradeLetter::from_percentage(70), GradeLetter::B);
        assert_eq!(GradeLetter::from_percentage(60), GradeLetter::C);
        assert_eq!(GradeLetter::from_percentage(50), GradeLetter::D);
        assert_eq!(GradeLetter::from_percentage(49), GradeLetter::F);
        assert_eq!(GradeLetter::from_percentage(0), GradeLetter::F);
    }

    #[test]
    fn test_grade_boundaries() {
        let grade = Grade::compute(9, 10);
        assert_eq!(grade.letter, GradeLetter::APlus);
        assert_eq!(grade.message, "Exceptionnel ! Vous êtes un expert !");

        let grade = Grade::compute(8, 9);
        assert_eq!(grade.percentage, 89);
        assert_eq!(grade.letter, GradeLetter::A);
    }

    #[test]
    fn test_grade_letter_serializes_as_display() {
        let json = serde_json::to_string(&GradeLetter::APlus).unwrap();
        assert_eq!(json, "\"A+\"");
        assert_eq!(GradeLetter::APlus.to_string(), "A+");
    }
}
