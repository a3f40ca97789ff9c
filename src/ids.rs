use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Deserialize)]
struct IdRow {
    #[serde(alias = "player_id", alias = "match_id", alias = "venue_id")]
    id: i64,
}

/// Reads the `id` column of a CSV file with a header row. The column may
/// also be named `player_id`, `match_id` or `venue_id`.
pub fn read_ids(path: &Path) -> Result<Vec<i64>, ConfigError> {
    let label = path.display().to_string();
    let reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| ConfigError::Ids { path: label.clone(), source })?;
    collect_ids(reader, &label)
}

fn collect_ids<R: Read>(mut reader: csv::Reader<R>, label: &str) -> Result<Vec<i64>, ConfigError> {
    reader
        .deserialize::<IdRow>()
        .map(|row| {
            row.map(|row| row.id)
                .map_err(|source| ConfigError::Ids { path: label.to_string(), source })
        })
        .collect()
}

/// Ids given on the command line win, then an id file, then the built-in list.
pub fn resolve_ids(cli: &[i64], file: Option<&Path>, defaults: &[i64]) -> Result<Vec<i64>, ConfigError> {
    if !cli.is_empty() {
        return Ok(cli.to_vec());
    }
    match file {
        Some(path) => read_ids(path),
        None => Ok(defaults.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(text: &str) -> csv::Reader<&[u8]> {
        ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes())
    }

    #[test]
    fn reads_id_column_under_any_alias() {
        let ids = collect_ids(reader("player_id,name\n1413, Kohli\n576,Rohit\n"), "inline").unwrap();
        assert_eq!(ids, [1413, 576]);
        let ids = collect_ids(reader("id\n 50 \n80\n"), "inline").unwrap();
        assert_eq!(ids, [50, 80]);
    }

    #[test]
    fn bad_rows_report_the_file() {
        let err = collect_ids(reader("id\nabc\n"), "ids.csv").unwrap_err();
        assert!(err.to_string().contains("ids.csv"));
    }

    #[test]
    fn precedence() {
        assert_eq!(resolve_ids(&[1, 2], None, &[9]).unwrap(), [1, 2]);
        assert_eq!(resolve_ids(&[], None, &[9]).unwrap(), [9]);
        assert!(resolve_ids(&[], Some(Path::new("/nonexistent/ids.csv")), &[9]).is_err());
    }
}
