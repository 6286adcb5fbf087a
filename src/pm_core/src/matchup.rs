use log::info;

use crate::config::ModelConfig;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::team::TeamStats;
use crate::win_prob::{predict_with, WinRatePrediction};

/// Result of comparing a home team against an away team.
#[derive(Clone, Debug)]
pub struct MatchupReport {
    pub home: TeamStats,
    pub away: TeamStats,
    pub prediction: WinRatePrediction,
}

/// Compare two teams from `data` using the default heuristic.
pub fn compare_teams(data: &Dataset, home: &str, away: &str) -> Result<MatchupReport> {
    compare_teams_with(&ModelConfig::default(), data, home, away)
}

/// Compare two teams from `data`.
///
/// Fails with `IdenticalTeamsRequested` before touching the data if both
/// names are the same, and with `NoDataForTeam` if either side has no rows.
pub fn compare_teams_with(
    cfg: &ModelConfig,
    data: &Dataset,
    home: &str,
    away: &str,
) -> Result<MatchupReport> {
    if home == away {
        return Err(Error::IdenticalTeamsRequested {
            team: home.to_string(),
        });
    }

    let home_stats = data.team_stats(home);
    let away_stats = data.team_stats(away);

    let prediction = predict_with(cfg, home_stats.average()?, away_stats.average()?)?;

    info!(
        "{} (home) vs {} (away): {:.2}% / {:.2}%",
        home,
        away,
        prediction.home_rate * 100.0,
        prediction.away_rate * 100.0
    );

    Ok(MatchupReport {
        home: home_stats,
        away: away_stats,
        prediction,
    })
}
