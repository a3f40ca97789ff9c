use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::connect_duck_db::Store;
use crate::flatten::commentary::flatten_live_commentary;
use crate::flatten::fetched_at;
use crate::flatten::live_match::{flatten_header, flatten_scorecard_meta, live_matches};
use crate::flatten::scorecard::{flatten_scorecard, ScorecardRows};
use crate::jobs::JobContext;
use crate::models::{
    CommentaryRecord, MatchRecord, OfficialRecord, ScorecardMetaRecord, SeriesRecord, TeamRecord,
    VenueRecord,
};

pub const LIVE_MATCHES: &str = "matches/v1/live";

#[derive(Debug, Clone, Copy)]
pub struct LiveOptions {
    pub scorecards: bool,
    pub commentary: bool,
}

impl Default for LiveOptions {
    fn default() -> Self {
        Self { scorecards: true, commentary: true }
    }
}

/// Everything one pass over the live feed produced, before persistence.
#[derive(Debug, Default)]
pub struct LiveTables {
    pub matches: Vec<MatchRecord>,
    pub venues: Vec<VenueRecord>,
    pub teams: Vec<TeamRecord>,
    pub officials: Vec<OfficialRecord>,
    pub series: Vec<SeriesRecord>,
    pub scorecards: ScorecardRows,
    pub scorecard_meta: Vec<ScorecardMetaRecord>,
    pub commentary: Vec<CommentaryRecord>,
}

impl LiveTables {
    pub fn persist(self, store: &mut Store) -> Result<()> {
        store.write(self.matches)?;
        store.write(self.venues)?;
        store.write(self.teams)?;
        store.write(self.officials)?;
        store.write(self.series)?;
        store.write(self.scorecards.batsmen)?;
        store.write(self.scorecards.bowlers)?;
        store.write(self.scorecards.partnerships)?;
        store.write(self.scorecard_meta)?;
        store.write(self.commentary)?;
        Ok(())
    }
}

/// Fetches the live list, then the scorecard and commentary of every match.
pub fn collect(ctx: &JobContext, options: LiveOptions) -> Result<LiveTables> {
    let data = ctx
        .api
        .get_json(LIVE_MATCHES, &[], "live matches")
        .context("failed to fetch live matches")?;
    let stamp = fetched_at();
    let mut tables = LiveTables::default();

    let entries = live_matches(&data);
    info!("Processing {} live matches", entries.len());

    for entry in &entries {
        let Some(header) = flatten_header(entry, &stamp) else {
            warn!("Skipping live entry without a match id");
            continue;
        };
        let match_id = header.info.match_id;
        info!(
            "Match {match_id}: {}",
            header.info.match_desc.as_deref().unwrap_or("unnamed")
        );

        tables.matches.push(header.info);
        tables.venues.extend(header.venue);
        tables.teams.extend(header.teams);
        tables.officials.extend(header.officials);
        tables.series.extend(header.series);

        if options.scorecards {
            let path = format!("mcenter/v1/{match_id}/scard");
            let label = format!("scorecard for match {match_id}");
            if let Some(scard) = ctx.fetch_or_skip(&path, &label, "scorecard", match_id) {
                let rows = flatten_scorecard(&scard, match_id, &stamp);
                info!(
                    "  {} batsmen, {} bowlers, {} partnerships",
                    rows.batsmen.len(),
                    rows.bowlers.len(),
                    rows.partnerships.len()
                );
                tables.scorecards.batsmen.extend(rows.batsmen);
                tables.scorecards.bowlers.extend(rows.bowlers);
                tables.scorecards.partnerships.extend(rows.partnerships);
                tables.scorecard_meta.extend(flatten_scorecard_meta(&scard, match_id));
            }
            ctx.pause();
        }

        if options.commentary {
            let path = format!("mcenter/v1/{match_id}/comm");
            let label = format!("commentary for match {match_id}");
            if let Some(feed) = ctx.fetch_or_skip(&path, &label, "commentary", match_id) {
                let lines = flatten_live_commentary(&feed, match_id, &stamp);
                info!("  {} commentary lines", lines.len());
                tables.commentary.extend(lines);
            }
            ctx.pause();
        }
    }

    if tables.matches.is_empty() {
        warn!("Live feed returned no usable matches");
    }
    Ok(tables)
}

pub fn run(ctx: &JobContext, store: &mut Store, options: LiveOptions) -> Result<()> {
    let tables = collect(ctx, options)?;
    tables.persist(store)?;
    info!("Live match load completed");
    Ok(())
}
