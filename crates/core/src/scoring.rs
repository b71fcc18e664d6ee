//! Scoring module - line clear points, spin bonuses and level progression
//!
//! Spin clears are scored from their own tables instead of the line table.
//! Combinations with no table entry (a mini clearing three or more lines, a
//! regular spin clearing four) score nothing and carry no label.

use crate::types::{
    SpinKind, INITIAL_DROP_INTERVAL_MS, LEVEL_SPEED_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
    MIN_DROP_INTERVAL_MS, T_SPIN_DOUBLE_BONUS, T_SPIN_MINI_BONUS, T_SPIN_MINI_DOUBLE_EXTRA,
    T_SPIN_SINGLE_BONUS, T_SPIN_TRIPLE_BONUS,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub points: u32,
    /// Banner text for the renderer, if this clear earns one.
    pub label: Option<&'static str>,
}

/// Score a line clear of `lines` rows at `level` after a lock classified as `spin`.
pub fn calculate_score(lines: usize, level: u32, spin: SpinKind) -> ScoreResult {
    let (base, label) = match (spin, lines) {
        (SpinKind::Mini, 1) => (T_SPIN_MINI_BONUS, Some("T-SPIN MINI SINGLE")),
        (SpinKind::Mini, 2) => (
            T_SPIN_MINI_BONUS + T_SPIN_MINI_DOUBLE_EXTRA,
            Some("T-SPIN MINI DOUBLE"),
        ),
        (SpinKind::Regular, 1) => (T_SPIN_SINGLE_BONUS, Some("T-SPIN SINGLE")),
        (SpinKind::Regular, 2) => (T_SPIN_DOUBLE_BONUS, Some("T-SPIN DOUBLE")),
        (SpinKind::Regular, 3) => (T_SPIN_TRIPLE_BONUS, Some("T-SPIN TRIPLE")),
        (SpinKind::Mini | SpinKind::Regular, _) => (0, None),
        (SpinKind::None, 4) => (LINE_SCORES[4], Some("TETRIS")),
        (SpinKind::None, n) => (LINE_SCORES.get(n).copied().unwrap_or(0), None),
    };

    ScoreResult {
        points: base.saturating_mul(level),
        label,
    }
}

/// Level for a running line total (starts at 1)
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, clamped at the minimum
pub fn drop_interval_ms(level: u32) -> u32 {
    let step = level.saturating_sub(1).saturating_mul(LEVEL_SPEED_STEP_MS);
    INITIAL_DROP_INTERVAL_MS
        .saturating_sub(step)
        .max(MIN_DROP_INTERVAL_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_line_scores() {
        assert_eq!(calculate_score(1, 1, SpinKind::None).points, 100);
        assert_eq!(calculate_score(2, 1, SpinKind::None).points, 300);
        assert_eq!(calculate_score(3, 1, SpinKind::None).points, 500);
        assert_eq!(calculate_score(4, 1, SpinKind::None).points, 800);

        assert_eq!(calculate_score(2, 3, SpinKind::None).points, 900);
        assert_eq!(calculate_score(0, 5, SpinKind::None).points, 0);
    }

    #[test]
    fn test_only_tetris_gets_a_plain_label() {
        assert_eq!(calculate_score(3, 1, SpinKind::None).label, None);
        assert_eq!(calculate_score(4, 2, SpinKind::None).label, Some("TETRIS"));
    }

    #[test]
    fn test_regular_spin_scores() {
        let single = calculate_score(1, 1, SpinKind::Regular);
        assert_eq!(single.points, 800);
        assert_eq!(single.label, Some("T-SPIN SINGLE"));

        assert_eq!(calculate_score(2, 2, SpinKind::Regular).points, 2400);

        let triple = calculate_score(3, 1, SpinKind::Regular);
        assert_eq!(triple.points, 1600);
        assert_eq!(triple.label, Some("T-SPIN TRIPLE"));
    }

    #[test]
    fn test_mini_spin_scores() {
        let single = calculate_score(1, 2, SpinKind::Mini);
        assert_eq!(single.points, 200);
        assert_eq!(single.label, Some("T-SPIN MINI SINGLE"));

        let double = calculate_score(2, 1, SpinKind::Mini);
        assert_eq!(double.points, 500);
        assert_eq!(double.label, Some("T-SPIN MINI DOUBLE"));
    }

    #[test]
    fn test_spin_combinations_without_table_entry_score_zero() {
        // Known edge cases: no mini triple, no regular-spin four-line clear.
        assert_eq!(calculate_score(3, 1, SpinKind::Mini), ScoreResult::default());
        assert_eq!(calculate_score(4, 1, SpinKind::Regular), ScoreResult::default());
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(95), 10);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(2), 900);
        assert_eq!(drop_interval_ms(9), 200);
        assert_eq!(drop_interval_ms(10), 100);
        assert_eq!(drop_interval_ms(25), 100);
    }
}
