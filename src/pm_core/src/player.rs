#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// One plus-minus record for a player on a team.
///
/// Rows are never edited after loading. A team usually has one row per
/// player, but nothing stops a source from carrying several.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatRow {
    #[cfg_attr(feature = "python", pyo3(get))]
    #[serde(alias = "球隊")]
    pub team: String,

    #[cfg_attr(feature = "python", pyo3(get))]
    #[serde(alias = "球員")]
    pub player: String,

    /// Average plus-minus for the player
    #[cfg_attr(feature = "python", pyo3(get))]
    #[serde(alias = "平均正負值", alias = "plusMinus")]
    pub plus_minus: f64,
}

impl PlayerStatRow {
    pub fn new(team: impl Into<String>, player: impl Into<String>, plus_minus: f64) -> Self {
        PlayerStatRow {
            team: team.into(),
            player: player.into(),
            plus_minus,
        }
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl PlayerStatRow {
    #[new]
    fn py_new(team: String, player: String, plus_minus: f64) -> Self {
        PlayerStatRow::new(team, player, plus_minus)
    }

    fn __str__(&self) -> String {
        format!("{} | {} | {:.2}", self.team, self.player, self.plus_minus)
    }

    fn __repr__(&self) -> String {
        format!("PlayerStatRow({:?}, {:?}, {})", self.team, self.player, self.plus_minus)
    }
}
