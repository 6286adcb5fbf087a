#[cfg(feature = "python")]
use pyo3::prelude::*;

use log::debug;

use crate::config::ModelConfig;
use crate::constants::{BASE_AWAY_RATE, BASE_HOME_RATE, BONUS_TIERS, MAX_BONUS};
use crate::error::{Error, Result, Side};

/// Normalized home/away win rates for one matchup.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WinRatePrediction {
    #[cfg_attr(feature = "python", pyo3(get))]
    pub home_rate: f64,

    #[cfg_attr(feature = "python", pyo3(get))]
    pub away_rate: f64,
}

/// Bonus for an absolute difference in team averages, using the default tiers.
///
/// Tier bounds are inclusive: a difference of exactly 5 still gets 0.10.
pub fn bonus_for_diff(diff: f64) -> f64 {
    BONUS_TIERS
        .iter()
        .find(|&&(max_diff, _)| diff <= max_diff)
        .map(|&(_, bonus)| bonus)
        .unwrap_or(MAX_BONUS)
}

/// Predict home and away win rates from two team plus-minus averages.
///
/// Home starts at 0.6 and away at 0.4. Whichever team has the higher average
/// gains a bonus that the other loses; the bonus grows with the gap between
/// the averages.
///
/// # Arguments
/// * `pm_home` - Home team's average plus-minus
/// * `pm_away` - Away team's average plus-minus
///
/// # Returns
/// Rates in [0, 1] summing to 1, or `InvalidAverageInput` if either average
/// is NaN or infinite.
pub fn predict(pm_home: f64, pm_away: f64) -> Result<WinRatePrediction> {
    adjusted_rates(pm_home, pm_away, BASE_HOME_RATE, BASE_AWAY_RATE, bonus_for_diff)
}

/// [`predict`] with an explicit heuristic configuration.
///
/// `cfg` is expected to have passed [`ModelConfig::validate`]; that is what
/// keeps both rates inside [0, 1].
pub fn predict_with(cfg: &ModelConfig, pm_home: f64, pm_away: f64) -> Result<WinRatePrediction> {
    adjusted_rates(pm_home, pm_away, cfg.base_home, cfg.base_away, |diff| {
        cfg.bonus_for_diff(diff)
    })
}

fn adjusted_rates(
    pm_home: f64,
    pm_away: f64,
    base_home: f64,
    base_away: f64,
    bonus_for: impl Fn(f64) -> f64,
) -> Result<WinRatePrediction> {
    if !pm_home.is_finite() {
        return Err(Error::InvalidAverageInput {
            side: Side::Home,
            value: pm_home,
        });
    }
    if !pm_away.is_finite() {
        return Err(Error::InvalidAverageInput {
            side: Side::Away,
            value: pm_away,
        });
    }

    let diff = (pm_home - pm_away).abs();
    let bonus = bonus_for(diff);

    let (home_final, away_final) = if pm_home > pm_away {
        (base_home + bonus, base_away - bonus)
    } else if pm_home < pm_away {
        (base_home - bonus, base_away + bonus)
    } else {
        (base_home, base_away)
    };

    // Sums to 1 algebraically; dividing anyway removes float drift.
    let total = home_final + away_final;
    let prediction = WinRatePrediction {
        home_rate: home_final / total,
        away_rate: away_final / total,
    };

    debug!(
        "predict home={:.2} away={:.2} diff={:.2} bonus={:.2} -> {:.4}/{:.4}",
        pm_home, pm_away, diff, bonus, prediction.home_rate, prediction.away_rate
    );

    Ok(prediction)
}

#[cfg(feature = "python")]
#[pymethods]
impl WinRatePrediction {
    fn __repr__(&self) -> String {
        format!(
            "WinRatePrediction(home_rate={:.4}, away_rate={:.4})",
            self.home_rate, self.away_rate
        )
    }
}
