use duckdb::{params, Connection, ToSql};
use std::hash::Hash;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::dedupe::dedupe_last;
use crate::error::StoreError;

/// How a batch replaces what is already persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Drop and rebuild the table from the batch.
    Replace,
    /// Keep the table and insert-or-update each row on its natural key.
    Upsert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
}

/// A flat record type bound to one table. Implemented through `record!`.
pub trait Table {
    const NAME: &'static str;
    const POLICY: WritePolicy;
    const COLUMNS: &'static [Column];
    const KEY_COLUMNS: &'static [&'static str];

    type Key: Hash + Eq;

    fn key(&self) -> Self::Key;
    fn values(&self) -> Vec<&dyn ToSql>;
}

/// Handle on the DuckDB database for the duration of one job.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!("Connected to DuckDB at {}", path.display());
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self { conn: Connection::open_in_memory()? })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Deduplicates `rows` on the table's natural key and persists them under
    /// the table's write policy. Returns the number of rows written.
    ///
    /// An empty batch leaves the table untouched.
    pub fn write<T: Table>(&mut self, rows: Vec<T>) -> Result<usize, StoreError> {
        if rows.is_empty() {
            warn!("No data for '{}' table. Skipped.", T::NAME);
            return Ok(0);
        }

        let fetched = rows.len();
        let rows = dedupe_last(rows);
        if rows.len() < fetched {
            debug!("'{}': dropped {} duplicate rows", T::NAME, fetched - rows.len());
        }

        let tx = self.conn.transaction()?;
        match T::POLICY {
            WritePolicy::Replace => {
                tx.execute_batch(&format!("DROP TABLE IF EXISTS {};", T::NAME))?;
                tx.execute_batch(&create_table_sql::<T>(false))?;
            }
            WritePolicy::Upsert => {
                tx.execute_batch(&create_table_sql::<T>(true))?;
            }
        }
        {
            let mut stmt = tx.prepare(&insert_sql::<T>())?;
            for row in &rows {
                let values = row.values();
                stmt.execute(values.as_slice())?;
            }
        }
        tx.commit()?;

        info!("Stored {} rows in '{}' table", rows.len(), T::NAME);
        Ok(rows.len())
    }

    pub fn row_count(&self, table: &str) -> Result<i64, StoreError> {
        let count = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_ident(table)),
            params![],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Copies a whole table to a CSV file with a header row.
    pub fn export_csv(&self, table: &str, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref().to_string_lossy().replace('\'', "''");
        self.conn.execute_batch(&format!(
            "COPY {} TO '{}' (HEADER, DELIMITER ',');",
            quote_ident(table),
            path
        ))?;
        Ok(())
    }
}

fn create_table_sql<T: Table>(keyed: bool) -> String {
    let mut columns: Vec<String> = T::COLUMNS
        .iter()
        .map(|column| format!("{} {}", quote_ident(column.name), column.sql_type))
        .collect();
    if keyed {
        let key: Vec<String> = T::KEY_COLUMNS.iter().map(|name| quote_ident(name)).collect();
        columns.push(format!("PRIMARY KEY ({})", key.join(", ")));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n);",
        T::NAME,
        columns.join(",\n    ")
    )
}

fn insert_sql<T: Table>() -> String {
    let names: Vec<String> = T::COLUMNS.iter().map(|column| quote_ident(column.name)).collect();
    let placeholders = vec!["?"; names.len()].join(", ");
    let insert = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        T::NAME,
        names.join(", "),
        placeholders
    );
    match T::POLICY {
        WritePolicy::Replace => insert,
        WritePolicy::Upsert => format!("{insert} {}", conflict_clause::<T>()),
    }
}

/// Upsert target: the natural key, updating every non-key column.
fn conflict_clause<T: Table>() -> String {
    let key: Vec<String> = T::KEY_COLUMNS.iter().map(|name| quote_ident(name)).collect();
    let updates: Vec<String> = T::COLUMNS
        .iter()
        .filter(|column| !T::KEY_COLUMNS.contains(&column.name))
        .map(|column| {
            let name = quote_ident(column.name);
            format!("{name} = EXCLUDED.{name}")
        })
        .collect();
    if updates.is_empty() {
        format!("ON CONFLICT ({}) DO NOTHING", key.join(", "))
    } else {
        format!("ON CONFLICT ({}) DO UPDATE SET {}", key.join(", "), updates.join(", "))
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::record! {
        struct Sample in "sample_rows", Upsert, key(id: i64) {
            id: i64 => "BIGINT",
            label: Option<String> => "VARCHAR(50)",
        }
    }

    crate::record! {
        struct Standing in "standing_rows", Upsert, key(kind: i64, rank: i64) {
            kind: i64 => "INTEGER",
            rank: i64 => "INTEGER",
            team: Option<String> => "VARCHAR(50)",
        }
    }

    crate::record! {
        struct Pair in "pair_rows", Upsert, key(left: i64, right: i64) {
            left: i64 => "BIGINT",
            right: i64 => "BIGINT",
        }
    }

    crate::record! {
        struct Snapshot in "snapshot_rows", Replace, key(id: i64) {
            id: i64 => "BIGINT",
            score: Option<f64> => "DOUBLE",
        }
    }

    fn label_of(store: &Store, id: i64) -> Option<String> {
        store
            .connection()
            .query_row("SELECT label FROM sample_rows WHERE id = ?", params![id], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn ddl_lists_columns_and_key() {
        let ddl = create_table_sql::<Sample>(true);
        assert!(ddl.contains("\"id\" BIGINT"));
        assert!(ddl.contains("\"label\" VARCHAR(50)"));
        assert!(ddl.contains("PRIMARY KEY (\"id\")"));
        assert!(!create_table_sql::<Snapshot>(false).contains("PRIMARY KEY"));
        assert!(insert_sql::<Sample>().ends_with(
            "ON CONFLICT (\"id\") DO UPDATE SET \"label\" = EXCLUDED.\"label\""
        ));
        assert!(!insert_sql::<Snapshot>().contains("ON CONFLICT"));
        assert!(insert_sql::<Pair>().ends_with("ON CONFLICT (\"left\", \"right\") DO NOTHING"));
    }

    #[test]
    fn upsert_merges_on_composite_key() {
        let mut store = Store::open_in_memory().unwrap();
        let standing = |kind: i64, rank: i64, team: &str| Standing { kind, rank, team: Some(team.into()) };
        store
            .write(vec![standing(1, 1, "South Africa"), standing(1, 2, "Australia"), standing(2, 1, "India")])
            .unwrap();
        store.write(vec![standing(1, 1, "Australia"), standing(1, 2, "South Africa")]).unwrap();

        assert_eq!(store.row_count("standing_rows").unwrap(), 3);
        let top: String = store
            .connection()
            .query_row(
                "SELECT team FROM standing_rows WHERE \"kind\" = 1 AND \"rank\" = 1",
                params![],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(top, "Australia");
    }

    #[test]
    fn key_only_upsert_ignores_repeats() {
        let mut store = Store::open_in_memory().unwrap();
        store.write(vec![Pair { left: 1, right: 2 }]).unwrap();
        store.write(vec![Pair { left: 1, right: 2 }, Pair { left: 2, right: 1 }]).unwrap();
        assert_eq!(store.row_count("pair_rows").unwrap(), 2);
    }

    #[test]
    fn export_writes_header_and_rows() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .write(vec![Sample { id: 1, label: Some("one".into()) }, Sample { id: 2, label: None }])
            .unwrap();

        let dir = std::env::temp_dir().join(format!("cricbuzz_export_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("sample.csv");
        store.export_csv("sample_rows", &file).unwrap();

        let text = std::fs::read_to_string(&file).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,label");
        assert_eq!(lines.len(), 3);
        assert!(lines.contains(&"1,one"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn export_of_unknown_table_fails() {
        let store = Store::open_in_memory().unwrap();
        let file = std::env::temp_dir().join("cricbuzz_missing_table.csv");
        assert!(store.export_csv("no_such_table", &file).is_err());
    }

    #[test]
    fn upsert_merges_on_natural_key() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .write(vec![
                Sample { id: 1, label: Some("first".into()) },
                Sample { id: 2, label: None },
            ])
            .unwrap();
        store.write(vec![Sample { id: 1, label: Some("second".into()) }]).unwrap();

        assert_eq!(store.row_count("sample_rows").unwrap(), 2);
        assert_eq!(label_of(&store, 1).as_deref(), Some("second"));
    }

    #[test]
    fn replace_rebuilds_the_table() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .write(vec![Snapshot { id: 1, score: Some(1.5) }, Snapshot { id: 2, score: None }])
            .unwrap();
        store.write(vec![Snapshot { id: 3, score: Some(9.0) }]).unwrap();
        assert_eq!(store.row_count("snapshot_rows").unwrap(), 1);
    }

    #[test]
    fn empty_batch_keeps_existing_rows() {
        let mut store = Store::open_in_memory().unwrap();
        store.write(vec![Snapshot { id: 1, score: None }]).unwrap();
        assert_eq!(store.write(Vec::<Snapshot>::new()).unwrap(), 0);
        assert_eq!(store.row_count("snapshot_rows").unwrap(), 1);
    }

    #[test]
    fn duplicate_keys_in_one_batch_keep_the_last() {
        let mut store = Store::open_in_memory().unwrap();
        let written = store
            .write(vec![
                Sample { id: 7, label: Some("old".into()) },
                Sample { id: 7, label: Some("new".into()) },
            ])
            .unwrap();
        assert_eq!(written, 1);
        assert_eq!(label_of(&store, 7).as_deref(), Some("new"));
    }
}
