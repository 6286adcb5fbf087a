//! Loading plus-minus rows into an immutable [`Dataset`].
//!
//! The aggregator and predictor only ever see a `Dataset`; where the rows
//! come from is decided by a [`StatSource`].

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};

use crate::constants::DATA_FILE_SUFFIX;
use crate::error::{Error, Result};
use crate::player::PlayerStatRow;
use crate::team::{get_team_stats, team_names, TeamStats};

/// Immutable set of plus-minus rows. Clones share storage.
#[derive(Clone, Debug)]
pub struct Dataset {
    rows: Arc<[PlayerStatRow]>,
}

impl Default for Dataset {
    fn default() -> Self {
        Dataset::new(Vec::new())
    }
}

impl Dataset {
    pub fn new(rows: Vec<PlayerStatRow>) -> Self {
        Dataset { rows: rows.into() }
    }

    /// Parse one CSV stream with a header row.
    ///
    /// Rows that fail to parse or carry a non-finite plus-minus are skipped.
    pub fn from_reader<R: Read>(rdr: R, origin: &Path) -> Result<Self> {
        Ok(Dataset::new(read_rows(rdr, origin)?))
    }

    pub fn rows(&self) -> &[PlayerStatRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn team_names(&self) -> Vec<String> {
        team_names(&self.rows)
    }

    pub fn team_stats(&self, team: &str) -> TeamStats {
        get_team_stats(&self.rows, team)
    }
}

impl FromIterator<PlayerStatRow> for Dataset {
    fn from_iter<I: IntoIterator<Item = PlayerStatRow>>(iter: I) -> Self {
        Dataset::new(iter.into_iter().collect())
    }
}

/// Something that can produce a [`Dataset`].
pub trait StatSource {
    fn load(&self) -> Result<Dataset>;
}

/// Rows already held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    rows: Vec<PlayerStatRow>,
}

impl InMemorySource {
    pub fn new(rows: Vec<PlayerStatRow>) -> Self {
        InMemorySource { rows }
    }
}

impl StatSource for InMemorySource {
    fn load(&self) -> Result<Dataset> {
        Ok(Dataset::new(self.rows.clone()))
    }
}

/// Every `*<suffix>` CSV file in a directory, concatenated in filename order.
///
/// Headers may be English (`team`, `player`, `plus_minus`) or the
/// Chinese column names used by the published team sheets.
#[derive(Clone, Debug)]
pub struct CsvDirSource {
    pub dir: PathBuf,
    pub suffix: String,
}

impl CsvDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvDirSource {
            dir: dir.into(),
            suffix: DATA_FILE_SUFFIX.to_string(),
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Matching files, sorted by name.
    pub fn data_files(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir).map_err(|source| Error::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.ends_with(&self.suffix))
                .unwrap_or(false);
            if matches && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl StatSource for CsvDirSource {
    fn load(&self) -> Result<Dataset> {
        let files = self.data_files()?;
        if files.is_empty() {
            return Err(Error::NoDataFiles {
                dir: self.dir.clone(),
                suffix: self.suffix.clone(),
            });
        }

        let mut rows = Vec::new();
        for path in &files {
            let file = File::open(path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            let before = rows.len();
            rows.extend(read_rows(file, path)?);
            info!("loaded {} rows from {}", rows.len() - before, path.display());
        }

        info!(
            "loaded {} rows from {} files in {}",
            rows.len(),
            files.len(),
            self.dir.display()
        );
        Ok(Dataset::new(rows))
    }
}

fn read_rows<R: Read>(rdr: R, origin: &Path) -> Result<Vec<PlayerStatRow>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);

    // Fail on an unreadable header rather than skipping every row.
    reader.headers().map_err(|source| Error::Csv {
        path: origin.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for result in reader.deserialize::<PlayerStatRow>() {
        match result {
            Ok(row) if row.plus_minus.is_finite() => rows.push(row),
            Ok(row) => {
                warn!(
                    "skipping {} / {} in {}: non-finite plus-minus",
                    row.team,
                    row.player,
                    origin.display()
                );
            }
            Err(e) => {
                warn!("skipping malformed row in {}: {}", origin.display(), e);
            }
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, body: &str) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(body.as_bytes()).unwrap();
    }

    #[test]
    fn test_from_reader_english_headers() {
        let csv = "team,player,plus_minus\nTeamA,p1,5\nTeamA,p2,-3\nTeamB,p1,1\n";
        let ds = Dataset::from_reader(csv.as_bytes(), Path::new("inline")).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.team_names(), vec!["TeamA", "TeamB"]);
        assert!((ds.team_stats("TeamA").average().unwrap() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_from_reader_chinese_headers_extra_columns() {
        let csv = "球隊,球員,出賽,平均正負值\nBoston Celtics,Jayson Tatum,70,8.5\nBoston Celtics,Jaylen Brown,68,6.1\n";
        let ds = Dataset::from_reader(csv.as_bytes(), Path::new("inline")).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[0].player, "Jayson Tatum");
        assert!((ds.rows()[1].plus_minus - 6.1).abs() < 1e-10);
    }

    #[test]
    fn test_malformed_and_non_finite_rows_skipped() {
        let csv = "team,player,plus_minus\nTeamA,p1,abc\nTeamA,p2,NaN\nTeamA,p3,2.5\n";
        let ds = Dataset::from_reader(csv.as_bytes(), Path::new("inline")).unwrap();

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.rows()[0].player, "p3");
    }

    #[test]
    fn test_dir_source_reads_matching_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b_plus_minus.csv", "team,player,plus_minus\nB,b1,1.0\n");
        write_file(dir.path(), "a_plus_minus.csv", "team,player,plus_minus\nA,a1,2.0\nA,a2,4.0\n");
        write_file(dir.path(), "notes.csv", "team,player,plus_minus\nC,c1,9.0\n");

        let ds = CsvDirSource::new(dir.path()).load().unwrap();

        let teams: Vec<&str> = ds.rows().iter().map(|r| r.team.as_str()).collect();
        assert_eq!(teams, vec!["A", "A", "B"]);
        assert!(ds.team_stats("C").is_empty());
    }

    #[test]
    fn test_dir_source_custom_suffix() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "east.pm.csv", "team,player,plus_minus\nE,e1,1.0\n");

        let ds = CsvDirSource::new(dir.path()).with_suffix(".pm.csv").load().unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_dir_source_no_files() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "readme.txt", "nothing here");

        match CsvDirSource::new(dir.path()).load() {
            Err(Error::NoDataFiles { suffix, .. }) => assert_eq!(suffix, DATA_FILE_SUFFIX),
            other => panic!("expected NoDataFiles, got {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn test_dir_source_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(CsvDirSource::new(missing).load(), Err(Error::Io { .. })));
    }

    #[test]
    fn test_in_memory_source_and_shared_clone() {
        let src = InMemorySource::new(vec![PlayerStatRow::new("A", "a1", 1.0)]);
        let ds = src.load().unwrap();
        let copy = ds.clone();

        assert_eq!(copy.rows(), ds.rows());
        assert!(std::ptr::eq(copy.rows().as_ptr(), ds.rows().as_ptr()));
    }
}
