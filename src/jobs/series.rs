use anyhow::{Context, Result};
use tracing::info;

use crate::connect_duck_db::Store;
use crate::flatten::series::flatten_series_archive;
use crate::jobs::JobContext;

/// Rebuilds `series_list` from the archive of `series_type`
/// (`international`, `league`, `domestic` or `women`) for one year.
pub fn run(ctx: &JobContext, store: &mut Store, series_type: &str, year: i32) -> Result<()> {
    let path = format!("series/v1/archives/{series_type}");
    let data = ctx
        .api
        .get_json(&path, &[("year", year.to_string())], &format!("{series_type} series {year}"))
        .with_context(|| format!("failed to fetch the {series_type} series archive for {year}"))?;

    let series = flatten_series_archive(&data);
    info!("{} series in the {year} archive", series.len());
    store.write(series)?;
    Ok(())
}
