use chrono::DateTime;
use serde_json::Value;

use crate::extract::{pick, pick_int, pick_list, pick_text, to_int};
use crate::fields;
use crate::models::SeriesArchiveRecord;

/// Epoch milliseconds as `YYYY-MM-DD HH:MM:SS` in UTC. Zero and
/// out-of-range stamps yield `None`.
pub fn format_millis(millis: i64) -> Option<String> {
    if millis == 0 {
        return None;
    }
    DateTime::from_timestamp_millis(millis).map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Series of `series/v1/archives/{type}`, grouped by month under
/// `seriesMapProto`.
pub fn flatten_series_archive(data: &Value) -> Vec<SeriesArchiveRecord> {
    pick_list(data, fields::SERIES_GROUPS)
        .iter()
        .flat_map(|group| {
            let period = pick_text(group, &["date"]);
            pick_list(group, &["series"]).iter().filter_map(move |series| {
                let stamp = |keys: fields::Keys| pick(series, keys).and_then(to_int).and_then(format_millis);
                Some(SeriesArchiveRecord {
                    series_id: pick_int(series, &["id"])?,
                    series_name: pick_text(series, fields::NAME),
                    start_date: stamp(fields::START_DT),
                    end_date: stamp(fields::END_DT),
                    period: period.clone(),
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn millis_render_in_utc() {
        assert_eq!(format_millis(1_704_067_200_000).as_deref(), Some("2024-01-01 00:00:00"));
        assert_eq!(format_millis(0), None);
    }

    #[test]
    fn archive_groups_are_flattened() {
        let data = json!({ "seriesMapProto": [
            { "date": "January 2024", "series": [
                { "id": 7476, "name": "South Africa tour of India", "startDt": "1704067200000", "endDt": "1704412800000" },
                { "name": "No Id" }
            ]},
            { "date": "February 2024", "series": [
                { "id": 7500, "name": "Open ended" }
            ]}
        ]});
        let rows = flatten_series_archive(&data);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].start_date.as_deref(), Some("2024-01-01 00:00:00"));
        assert_eq!(rows[0].end_date.as_deref(), Some("2024-01-05 00:00:00"));
        assert_eq!(rows[0].period.as_deref(), Some("January 2024"));
        assert_eq!((rows[1].series_id, rows[1].start_date.as_deref()), (7500, None));
    }
}
