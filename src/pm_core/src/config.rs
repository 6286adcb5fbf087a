use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{BASE_AWAY_RATE, BASE_HOME_RATE, BONUS_TIERS, MAX_BONUS};
use crate::error::{Error, Result};

/// Upper bound of a bonus tier. `max_diff` is inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusTier {
    pub max_diff: f64,
    pub bonus: f64,
}

/// Parameters of the win-rate heuristic.
///
/// `Default` is the fixed production curve; the TOML loader exists so a
/// front-end can pin the numbers it shows next to the prediction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub base_home: f64,
    pub base_away: f64,
    /// Checked in ascending order, first match wins
    pub tiers: Vec<BonusTier>,
    pub max_bonus: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            base_home: BASE_HOME_RATE,
            base_away: BASE_AWAY_RATE,
            tiers: BONUS_TIERS
                .iter()
                .map(|&(max_diff, bonus)| BonusTier { max_diff, bonus })
                .collect(),
            max_bonus: MAX_BONUS,
        }
    }
}

impl ModelConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let cfg: ModelConfig = toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Bonus for an absolute average difference.
    pub fn bonus_for_diff(&self, diff: f64) -> f64 {
        self.tiers
            .iter()
            .find(|t| diff <= t.max_diff)
            .map(|t| t.bonus)
            .unwrap_or(self.max_bonus)
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [self.base_home, self.base_away, self.max_bonus]
            .iter()
            .chain(self.tiers.iter().flat_map(|t| [&t.max_diff, &t.bonus]))
            .all(|v| v.is_finite());
        if !finite {
            return Err(Error::Config("all values must be finite".to_string()));
        }
        if (self.base_home + self.base_away - 1.0).abs() > 1e-9 {
            return Err(Error::Config(format!(
                "base rates must sum to 1, got {} + {}",
                self.base_home, self.base_away
            )));
        }
        if self.tiers.windows(2).any(|w| w[0].max_diff >= w[1].max_diff) {
            return Err(Error::Config(
                "tier max_diff values must be strictly ascending".to_string(),
            ));
        }
        if self.tiers.iter().any(|t| t.max_diff < 0.0 || t.bonus < 0.0) || self.max_bonus < 0.0 {
            return Err(Error::Config("tiers and bonuses must be non-negative".to_string()));
        }
        let unit = 0.0..=1.0;
        if !unit.contains(&self.base_home) || !unit.contains(&self.base_away) {
            return Err(Error::Config(format!(
                "base rates must lie in [0, 1], got {} / {}",
                self.base_home, self.base_away
            )));
        }
        // A bonus larger than the smaller base would push a rate outside [0, 1].
        let ceiling = self.base_home.min(self.base_away);
        let largest = self
            .tiers
            .iter()
            .map(|t| t.bonus)
            .fold(self.max_bonus, f64::max);
        if largest > ceiling {
            return Err(Error::Config(format!(
                "bonus {} exceeds the smaller base rate {}",
                largest, ceiling
            )));
        }
        Ok(())
    }
}
