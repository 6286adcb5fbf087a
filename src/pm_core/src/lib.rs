//! PM Core - team plus-minus aggregation and home/away win-rate heuristic.
//!
//! The core is pure: it takes plus-minus rows and returns team averages and
//! win rates. Loading rows from disk lives in [`dataset`], and the optional
//! `python` feature builds PyO3 bindings so a Python front-end can call it.

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod matchup;
pub mod player;
pub mod team;
pub mod win_prob;

pub use config::{BonusTier, ModelConfig};
pub use constants::{BASE_AWAY_RATE, BASE_HOME_RATE, BONUS_TIERS, DATA_FILE_SUFFIX, MAX_BONUS};
pub use dataset::{CsvDirSource, Dataset, InMemorySource, StatSource};
pub use error::{Error, Result, Side};
pub use matchup::{compare_teams, compare_teams_with, MatchupReport};
pub use player::PlayerStatRow;
pub use team::{get_team_stats, team_names, TeamStats};
pub use win_prob::{bonus_for_diff, predict, predict_with, WinRatePrediction};

/// Filter rows to one team and average their plus-minus.
///
/// Returns (rows, average); average is NaN when the team has no rows.
#[cfg(feature = "python")]
#[pyfunction]
fn py_get_team_stats(rows: Vec<PlayerStatRow>, team: &str) -> (Vec<PlayerStatRow>, f64) {
    get_team_stats(&rows, team).into_parts()
}

/// Predicted (home_rate, away_rate) for two team averages.
#[cfg(feature = "python")]
#[pyfunction]
fn py_predict_win_rate(pm_home: f64, pm_away: f64) -> PyResult<(f64, f64)> {
    let p = predict(pm_home, pm_away)?;
    Ok((p.home_rate, p.away_rate))
}

/// Load every `*_plus_minus.csv` under `dir`.
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(signature = (dir, suffix = None))]
fn py_load_dir(dir: &str, suffix: Option<String>) -> PyResult<Vec<PlayerStatRow>> {
    let mut source = CsvDirSource::new(dir);
    if let Some(s) = suffix {
        source = source.with_suffix(s);
    }
    Ok(source.load()?.rows().to_vec())
}

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn pm_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Classes
    m.add_class::<PlayerStatRow>()?;
    m.add_class::<WinRatePrediction>()?;

    // Core functions
    m.add_function(wrap_pyfunction!(py_get_team_stats, m)?)?;
    m.add_function(wrap_pyfunction!(py_predict_win_rate, m)?)?;
    m.add_function(wrap_pyfunction!(py_load_dir, m)?)?;

    // Constants
    m.add("BASE_HOME_RATE", BASE_HOME_RATE)?;
    m.add("BASE_AWAY_RATE", BASE_AWAY_RATE)?;
    m.add("BONUS_TIERS", BONUS_TIERS.to_vec())?;
    m.add("MAX_BONUS", MAX_BONUS)?;

    Ok(())
}
