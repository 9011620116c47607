//! Prize ladder shared by every game session.
//!
//! Fireproof levels are plain data so the guarantee schedule can change
//! without touching the lookup code.

/// Number of questions in a full game
pub const LEVEL_COUNT: usize = 15;

/// Index of the final question
pub const LAST_LEVEL: usize = LEVEL_COUNT - 1;

/// Cumulative prize for completing each level, index = level
pub const PRIZES: [u64; LEVEL_COUNT] = [
    100, 200, 300, 500, 1_000, 2_000, 4_000, 8_000, 16_000, 32_000, 64_000, 125_000, 250_000,
    500_000, 1_000_000,
];

/// Levels whose prize is a guaranteed floor for later fails, ascending
pub const FIREPROOF_LEVELS: [usize; 2] = [4, 9];

pub fn prize_for(level: usize) -> u64 {
    PRIZES[level]
}

/// Largest fireproof prize at or below `level`; 0 if none was reached
pub fn fireproof_prize_below(level: usize) -> u64 {
    FIREPROOF_LEVELS
        .iter()
        .rev()
        .find(|&&fireproof| fireproof <= level)
        .map(|&fireproof| PRIZES[fireproof])
        .unwrap_or(0)
}

pub fn is_fireproof(level: usize) -> bool {
    FIREPROOF_LEVELS.contains(&level)
}

pub fn is_last_level(level: usize) -> bool {
    level == LAST_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_shape() {
        assert_eq!(PRIZES.len(), LEVEL_COUNT);
        assert_eq!(prize_for(0), 100);
        assert_eq!(prize_for(1), 200);
        assert_eq!(prize_for(9), 32_000);
        assert_eq!(prize_for(LAST_LEVEL), 1_000_000);

        // Ladder is strictly increasing
        for level in 1..LEVEL_COUNT {
            assert!(prize_for(level) > prize_for(level - 1));
        }
    }

    #[test]
    fn test_fireproof_floor() {
        // No fireproof level completed yet
        assert_eq!(fireproof_prize_below(0), 0);
        assert_eq!(fireproof_prize_below(3), 0);

        assert_eq!(fireproof_prize_below(4), 1_000);
        assert_eq!(fireproof_prize_below(8), 1_000);
        assert_eq!(fireproof_prize_below(9), 32_000);
        assert_eq!(fireproof_prize_below(10), 32_000);
        // A fail on the last question still pays only the highest floor
        assert_eq!(fireproof_prize_below(LAST_LEVEL), 32_000);
    }

    #[test]
    fn test_fireproof_membership() {
        assert!(is_fireproof(4));
        assert!(is_fireproof(9));
        assert!(!is_fireproof(0));
        assert!(!is_fireproof(10));
        assert!(!is_fireproof(14));
    }

    #[test]
    fn test_last_level() {
        assert!(is_last_level(14));
        assert!(!is_last_level(13));
    }
}
