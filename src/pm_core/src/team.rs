use std::collections::BTreeSet;

use log::{debug, warn};
use statrs::statistics::Statistics;

use crate::error::{Error, Result};
use crate::player::PlayerStatRow;

/// A team's plus-minus rows together with their mean.
///
/// Built on demand by [`get_team_stats`]; never stored.
#[derive(Clone, Debug)]
pub struct TeamStats {
    pub team: String,

    /// Rows for this team, in the order they appeared in the source
    pub players: Vec<PlayerStatRow>,

    /// Mean plus-minus over `players`, NaN when there are none
    pub average_plus_minus: f64,
}

impl TeamStats {
    /// The team average, or `NoDataForTeam` if no rows matched.
    ///
    /// A team with rows always returns its mean, even a non-finite one; the
    /// predictor rejects that as an invalid input.
    pub fn average(&self) -> Result<f64> {
        if self.players.is_empty() {
            return Err(Error::NoDataForTeam {
                team: self.team.clone(),
            });
        }
        Ok(self.average_plus_minus)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Split into the filtered rows and the raw (possibly NaN) average.
    pub fn into_parts(self) -> (Vec<PlayerStatRow>, f64) {
        (self.players, self.average_plus_minus)
    }
}

/// Filter `rows` down to `team` and average their plus-minus.
///
/// An unknown team gives an empty row set and a NaN average; it is up to the
/// caller to treat that as missing data (see [`TeamStats::average`]).
pub fn get_team_stats(rows: &[PlayerStatRow], team: &str) -> TeamStats {
    let players: Vec<PlayerStatRow> = rows.iter().filter(|r| r.team == team).cloned().collect();
    let average_plus_minus = players.iter().map(|r| r.plus_minus).mean();

    if players.is_empty() {
        warn!("no plus-minus rows for team {:?}", team);
    } else {
        debug!(
            "team {:?}: {} rows, average plus-minus {:.2}",
            team,
            players.len(),
            average_plus_minus
        );
    }

    TeamStats {
        team: team.to_string(),
        players,
        average_plus_minus,
    }
}

/// Distinct team identifiers in `rows`, sorted ascending.
pub fn team_names(rows: &[PlayerStatRow]) -> Vec<String> {
    rows.iter()
        .map(|r| r.team.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<PlayerStatRow> {
        vec![
            PlayerStatRow::new("TeamA", "p1", 5.0),
            PlayerStatRow::new("TeamA", "p2", -3.0),
            PlayerStatRow::new("TeamB", "p1", 1.0),
        ]
    }

    #[test]
    fn test_average_over_matching_rows() {
        let stats = get_team_stats(&sample_rows(), "TeamA");

        assert_eq!(stats.player_count(), 2);
        assert!((stats.average_plus_minus - 1.0).abs() < 1e-10);
        assert!((stats.average().unwrap() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_row_order_preserved() {
        let rows = vec![
            PlayerStatRow::new("TeamA", "z", 1.0),
            PlayerStatRow::new("TeamB", "m", 2.0),
            PlayerStatRow::new("TeamA", "a", 3.0),
        ];

        let stats = get_team_stats(&rows, "TeamA");
        let names: Vec<&str> = stats.players.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, vec!["z", "a"]);
    }

    #[test]
    fn test_unknown_team_is_no_data_not_zero() {
        let stats = get_team_stats(&sample_rows(), "TeamC");

        assert!(stats.is_empty());
        assert!(stats.average_plus_minus.is_nan(), "Empty team must not average to 0");
        match stats.average() {
            Err(Error::NoDataForTeam { team }) => assert_eq!(team, "TeamC"),
            other => panic!("expected NoDataForTeam, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_row_is_not_missing_data() {
        let rows = vec![PlayerStatRow::new("A", "x", f64::NAN)];
        let stats = get_team_stats(&rows, "A");

        assert_eq!(stats.player_count(), 1);
        assert!(stats.average().unwrap().is_nan());
    }

    #[test]
    fn test_team_match_is_exact() {
        let stats = get_team_stats(&sample_rows(), "teama");
        assert!(stats.is_empty());
    }

    #[test]
    fn test_duplicate_player_rows_all_counted() {
        let rows = vec![
            PlayerStatRow::new("TeamA", "p1", 4.0),
            PlayerStatRow::new("TeamA", "p1", 8.0),
            PlayerStatRow::new("TeamA", "p2", 0.0),
        ];

        let stats = get_team_stats(&rows, "TeamA");
        assert_eq!(stats.player_count(), 3);
        assert!((stats.average_plus_minus - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_inputs_untouched() {
        let rows = sample_rows();
        let before = rows.clone();
        let _ = get_team_stats(&rows, "TeamA");
        assert_eq!(rows, before);
    }

    #[test]
    fn test_team_names_sorted_unique() {
        let mut rows = sample_rows();
        rows.push(PlayerStatRow::new("Alpha", "x", 0.0));

        assert_eq!(team_names(&rows), vec!["Alpha", "TeamA", "TeamB"]);
        assert!(team_names(&[]).is_empty());
    }
}
