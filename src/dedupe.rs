use std::collections::HashMap;

use crate::connect_duck_db::Table;

/// Drops every row whose natural key reappears later in the batch.
///
/// Survivors stay in the position of their last occurrence, so the output
/// is in fetch order.
pub fn dedupe_last<T: Table>(rows: Vec<T>) -> Vec<T> {
    let mut last_seen: HashMap<T::Key, usize> = HashMap::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        last_seen.insert(row.key(), index);
    }
    if last_seen.len() == rows.len() {
        return rows;
    }

    rows.into_iter()
        .enumerate()
        .filter(|(index, row)| last_seen.get(&row.key()) == Some(index))
        .map(|(_, row)| row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::record! {
        struct Line in "dedupe_lines", Replace, key(match_id: i64, innings: Option<i64>) {
            match_id: i64 => "BIGINT",
            innings: Option<i64> => "BIGINT",
            text: String => "TEXT",
        }
    }

    fn line(match_id: i64, innings: Option<i64>, text: &str) -> Line {
        Line { match_id, innings, text: text.to_string() }
    }

    #[test]
    fn later_record_wins() {
        let rows = vec![line(1, Some(1), "early"), line(1, Some(1), "late")];
        assert_eq!(dedupe_last(rows), vec![line(1, Some(1), "late")]);
    }

    #[test]
    fn keeps_fetch_order_of_survivors() {
        let rows = vec![
            line(1, Some(1), "a"),
            line(2, Some(1), "b"),
            line(1, Some(1), "c"),
            line(3, None, "d"),
        ];
        let texts: Vec<String> = dedupe_last(rows).into_iter().map(|row| row.text).collect();
        assert_eq!(texts, ["b", "c", "d"]);
    }

    #[test]
    fn null_key_parts_compare_equal() {
        let rows = vec![line(4, None, "x"), line(4, None, "y"), line(4, Some(2), "z")];
        assert_eq!(dedupe_last(rows).len(), 2);
    }
}
