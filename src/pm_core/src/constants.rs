/// Home-court baseline win rate, applied regardless of stats
pub const BASE_HOME_RATE: f64 = 0.6;

/// Away baseline win rate
pub const BASE_AWAY_RATE: f64 = 0.4;

/// Bonus tiers as (inclusive max diff, bonus), checked in ascending order
pub const BONUS_TIERS: [(f64, f64); 3] = [(5.0, 0.10), (8.0, 0.15), (10.0, 0.20)];

/// Bonus once the average difference exceeds every tier
pub const MAX_BONUS: f64 = 0.30;

/// Default suffix of the per-team plus-minus data files
pub const DATA_FILE_SUFFIX: &str = "_plus_minus.csv";
