//! Letter grades and per-course score statistics.

use crate::model::grade::CourseStatisticsDto;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;
pub const PASSING_SCORE: f64 = 60.0;

/// Whether `score` lies in `[0, 100]`; NaN is rejected
pub fn is_valid_score(score: f64) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}

/// ≥90 A, ≥80 B, ≥70 C, ≥60 D, otherwise F
pub fn letter_grade(score: f64) -> &'static str {
    if score >= 90.0 {
        "A"
    } else if score >= 80.0 {
        "B"
    } else if score >= 70.0 {
        "C"
    } else if score >= PASSING_SCORE {
        "D"
    } else {
        "F"
    }
}

/// Average, extremes and pass rate (percent of scores ≥ 60) over `scores`.
///
/// An empty slice yields all zeros.
pub fn course_statistics(scores: &[f64]) -> CourseStatisticsDto {
    if scores.is_empty() {
        return CourseStatisticsDto::default();
    }

    let total = scores.len() as f64;
    let sum: f64 = scores.iter().sum();
    let maximum = scores.iter().copied().fold(f64::MIN, f64::max);
    let minimum = scores.iter().copied().fold(f64::MAX, f64::min);
    let passed = scores.iter().filter(|&&s| s >= PASSING_SCORE).count() as f64;

    CourseStatisticsDto {
        average: sum / total,
        maximum,
        minimum,
        pass_rate: passed / total * 100.0,
        total_students: scores.len() as u64,
    }
}

/// Unweighted mean of raw scores, 0 when there are none.
///
/// Reported as the student's "GPA" although it stays on the 0-100 scale.
pub fn mean_score(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }

    scores.iter().sum::<f64>() / scores.len() as f64
}
