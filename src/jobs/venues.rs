use anyhow::Result;
use tracing::{info, warn};

use crate::connect_duck_db::Store;
use crate::flatten::venue::{flatten_venue_profile, parse_venue_stats, VenueStats};
use crate::jobs::JobContext;

/// Upserts `venues` from the profile and stats endpoints of every id in
/// `venue_ids`. Venues whose profile cannot be fetched are skipped; missing
/// stats leave the aggregate columns empty.
pub fn run(ctx: &JobContext, store: &mut Store, venue_ids: &[i64]) -> Result<()> {
    let mut venues = Vec::new();
    info!("Processing {} venues", venue_ids.len());

    for &venue_id in venue_ids {
        let basic = ctx.fetch_or_skip(
            &format!("venues/v1/{venue_id}"),
            &format!("venue {venue_id}"),
            "venue",
            venue_id,
        );
        ctx.pause();
        let stats = ctx
            .fetch_or_skip(
                &format!("stats/v1/venue/{venue_id}"),
                &format!("venue stats {venue_id}"),
                "venue stats",
                venue_id,
            )
            .map(|data| parse_venue_stats(&data))
            .unwrap_or_else(VenueStats::default);
        ctx.pause();

        match basic {
            Some(basic) => {
                let venue = flatten_venue_profile(venue_id, &basic, stats);
                info!(
                    "Venue {venue_id}: {}, {}",
                    venue.venue_name.as_deref().unwrap_or("Unknown"),
                    venue.city.as_deref().unwrap_or("Unknown")
                );
                venues.push(venue);
            }
            None => warn!("No basic data returned for venue {venue_id}"),
        }
    }

    store.write(venues)?;
    Ok(())
}
