//! Scoring module - line clear points, levels and gravity
//!
//! - A clear of 1-4 lines scores `LINE_SCORES[n] * (level + 1)`, where `level`
//!   is the level before the cleared lines are counted.
//! - One level per `LINES_PER_LEVEL` cumulative lines.
//! - Gravity delay shrinks by `GRAVITY_DELAY_STEP` frames per level and never
//!   drops below `MIN_GRAVITY_DELAY`.

use crate::types::{
    BASE_GRAVITY_DELAY, GRAVITY_DELAY_STEP, LINES_PER_LEVEL, LINE_SCORES, MIN_GRAVITY_DELAY,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points awarded for this clear
    pub points: u32,
    /// Level after the lines were added
    pub level: u32,
    /// Whether the clear crossed a level boundary
    pub leveled_up: bool,
}

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level.saturating_add(1))
}

/// Level management
/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Frames between gravity steps at a level, clamped at the floor
pub fn gravity_delay_for_level(level: u32) -> u32 {
    BASE_GRAVITY_DELAY
        .saturating_sub(level.saturating_mul(GRAVITY_DELAY_STEP))
        .max(MIN_GRAVITY_DELAY)
}

/// Score a clear of `lines` given the cumulative lines before it
pub fn calculate_score(lines: usize, lines_before: u32) -> ScoreResult {
    let level_before = calculate_level(lines_before);
    let level = calculate_level(lines_before.saturating_add(lines as u32));
    ScoreResult {
        points: calculate_line_score(lines, level_before),
        level,
        leveled_up: level > level_before,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores_at_level_zero() {
        assert_eq!(calculate_line_score(0, 0), 0);
        assert_eq!(calculate_line_score(1, 0), 100);
        assert_eq!(calculate_line_score(2, 0), 300);
        assert_eq!(calculate_line_score(3, 0), 500);
        assert_eq!(calculate_line_score(4, 0), 800);
        assert_eq!(calculate_line_score(5, 0), 0);
    }

    #[test]
    fn test_line_scores_scale_with_level() {
        assert_eq!(calculate_line_score(1, 1), 200);
        assert_eq!(calculate_line_score(4, 5), 800 * 6);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 0);
        assert_eq!(calculate_level(9), 0);
        assert_eq!(calculate_level(10), 1);
        assert_eq!(calculate_level(29), 2);
        assert_eq!(calculate_level(100), 10);
    }

    #[test]
    fn test_gravity_delays() {
        assert_eq!(gravity_delay_for_level(0), 48);
        assert_eq!(gravity_delay_for_level(1), 46);
        assert_eq!(gravity_delay_for_level(5), 38);
        assert_eq!(gravity_delay_for_level(19), 10);
        assert_eq!(gravity_delay_for_level(20), 10); // Floor at 10
        assert_eq!(gravity_delay_for_level(u32::MAX), 10);
    }

    #[test]
    fn test_gravity_is_monotonic() {
        for level in 0..100 {
            assert!(gravity_delay_for_level(level + 1) <= gravity_delay_for_level(level));
        }
    }

    #[test]
    fn test_score_uses_level_before_clear() {
        let result = calculate_score(1, 9);
        assert_eq!(result.points, 100);
        assert_eq!(result.level, 1);
        assert!(result.leveled_up);

        let result = calculate_score(4, 10);
        assert_eq!(result.points, 1600);
        assert_eq!(result.level, 1);
        assert!(!result.leveled_up);
    }
}
