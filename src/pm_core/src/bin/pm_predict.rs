use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use pm_core::{
    compare_teams_with, CsvDirSource, Dataset, ModelConfig, StatSource, TeamStats, DATA_FILE_SUFFIX,
};

/// Compare two teams' plus-minus and predict home/away win rates.
#[derive(Parser, Debug)]
#[command(name = "pm_predict", version)]
struct Cli {
    /// Directory holding the per-team plus-minus CSV files
    #[arg(short, long, env = "PM_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Only files ending with this suffix are loaded
    #[arg(long, default_value = DATA_FILE_SUFFIX)]
    suffix: String,

    /// Home team
    #[arg(long, required_unless_present = "list")]
    home: Option<String>,

    /// Away team
    #[arg(long, required_unless_present = "list")]
    away: Option<String>,

    /// Print available teams and exit
    #[arg(long)]
    list: bool,

    /// TOML file overriding the win-rate heuristic
    #[arg(long)]
    model_config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let data = CsvDirSource::new(&cli.data_dir)
        .with_suffix(cli.suffix.clone())
        .load()
        .with_context(|| format!("loading plus-minus data from {}", cli.data_dir.display()))?;

    if cli.list {
        print_teams(&data);
        return Ok(());
    }

    let (Some(home), Some(away)) = (cli.home.as_deref(), cli.away.as_deref()) else {
        bail!("--home and --away are required");
    };

    let cfg = match &cli.model_config {
        Some(path) => ModelConfig::from_file(path)
            .with_context(|| format!("reading model config {}", path.display()))?,
        None => ModelConfig::default(),
    };

    let report = compare_teams_with(&cfg, &data, home, away)?;

    print_team(&report.home);
    println!();
    print_team(&report.away);
    println!();
    println!("Win-rate prediction");
    println!("  {} (home): {:.2}%", home, report.prediction.home_rate * 100.0);
    println!("  {} (away): {:.2}%", away, report.prediction.away_rate * 100.0);

    Ok(())
}

fn print_teams(data: &Dataset) {
    for team in data.team_names() {
        println!("{}", team);
    }
}

fn print_team(stats: &TeamStats) {
    let width = stats
        .players
        .iter()
        .map(|r| r.player.chars().count())
        .max()
        .unwrap_or(0)
        .max("Player".len());

    println!("{}", stats.team);
    println!("  {:<width$}  {:>10}", "Player", "Plus-minus", width = width);
    for row in &stats.players {
        println!("  {:<width$}  {:>10.2}", row.player, row.plus_minus, width = width);
    }
    println!("  Team average: {:.2}", stats.average_plus_minus);
}
