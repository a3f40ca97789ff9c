use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cricbuzz_loader::clean_up::clean_folders;
use cricbuzz_loader::config::{
    Config, COMMENTARY_MATCH_IDS, PLAYER_PROFILE_IDS, PLAYER_STATS_IDS, TEAM_RESULT_IDS, VENUE_IDS,
};
use cricbuzz_loader::connect_duck_db::Store;
use cricbuzz_loader::http::{ApiClient, RetryPolicy};
use cricbuzz_loader::ids::resolve_ids;
use cricbuzz_loader::jobs::live::LiveOptions;
use cricbuzz_loader::jobs::top_stats::TopStatsOptions;
use cricbuzz_loader::jobs::{self, JobContext};

#[derive(Parser)]
#[command(name = "cricbuzz_loader")]
#[command(about = "Load Cricbuzz match, player and venue data into DuckDB")]
struct Cli {
    /// Delay between API requests in milliseconds (overrides CRICBUZZ_REQUEST_DELAY_MS)
    #[arg(short, long, global = true)]
    delay: Option<u64>,

    /// Database file (overrides CRICBUZZ_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Save every API response as pretty JSON under this directory
    #[arg(long, global = true)]
    dump_dir: Option<PathBuf>,

    #[command(subcommand)]
    job: Job,
}

#[derive(clap::Args)]
struct IdArgs {
    /// Comma separated ids, replacing the built-in list
    #[arg(long, value_delimiter = ',')]
    ids: Vec<i64>,

    /// CSV file with an `id` column, used when --ids is not given
    #[arg(long)]
    ids_file: Option<PathBuf>,
}

impl IdArgs {
    fn resolve(&self, defaults: &[i64]) -> Result<Vec<i64>> {
        Ok(resolve_ids(&self.ids, self.ids_file.as_deref(), defaults)?)
    }
}

#[derive(Subcommand)]
enum Job {
    /// Live matches with scorecards, partnerships and commentary
    Live {
        #[arg(long)]
        skip_scorecards: bool,
        #[arg(long)]
        skip_commentary: bool,
    },
    /// Yearly most-runs and most-wickets leaderboards
    TopStats {
        #[arg(long, default_value_t = 2020)]
        from: i64,
        #[arg(long, default_value_t = 2025)]
        to: i64,
        /// Format codes: 0 All, 1 Test, 2 ODI, 3 T20I, 4 T20
        #[arg(long, value_delimiter = ',', default_value = "0")]
        formats: Vec<u8>,
        #[arg(long)]
        skip_strike_rates: bool,
    },
    /// Recently finished matches with one-line scores
    Recent,
    /// Upcoming fixtures
    Schedules,
    /// Results of one or more teams
    TeamResults(IdArgs),
    /// Ball-by-ball commentary joined with match headers
    Commentary(IdArgs),
    /// Player profiles
    Players(IdArgs),
    /// Player career stats per format
    PlayerStats(IdArgs),
    /// Venue profiles and historical stats
    Venues(IdArgs),
    /// Match history of each venue
    VenueMatches(IdArgs),
    /// ICC player rankings and team standings
    Rankings,
    /// Series archive for one year
    Series {
        #[arg(long, default_value = "international")]
        series_type: String,
        #[arg(long, default_value_t = 2024)]
        year: i32,
    },
    /// Copy a stored table to a CSV file
    Export { table: String, file: PathBuf },
    /// Delete the debug dump directory
    Clean,
}

const DEFAULT_DUMP_DIR: &str = "debug_responses";

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if let Job::Clean = cli.job {
        let dir = cli.dump_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DUMP_DIR));
        clean_folders(&[dir.as_path()])
            .with_context(|| format!("could not delete {}", dir.display()))?;
        return Ok(());
    }

    if let Job::Export { table, file } = &cli.job {
        let db_path = cli.db.clone().unwrap_or_else(Config::db_path_from_env);
        let store = open_store(&db_path)?;
        store.export_csv(table, file)?;
        info!("Exported '{table}' to {}", file.display());
        return Ok(());
    }

    let config = Config::from_env()?;
    let db_path = cli.db.clone().unwrap_or_else(|| config.db_path.clone());
    let mut store = open_store(&db_path)?;

    let retry = match cli.job {
        Job::Live { .. } => RetryPolicy::standard(),
        _ => RetryPolicy::none(),
    };
    let mut api = ApiClient::new(&config.api, retry)?;
    if let Some(dir) = &cli.dump_dir {
        api = api.with_dump_dir(dir);
    }
    let delay = cli.delay.map(Duration::from_millis).unwrap_or(config.request_delay);
    let ctx = JobContext::new(api, delay);

    run_job(&ctx, &mut store, cli.job)?;
    info!("Done");
    Ok(())
}

fn open_store(path: &Path) -> Result<Store> {
    Store::open(path).with_context(|| format!("could not open database {}", path.display()))
}

fn run_job(ctx: &JobContext, store: &mut Store, job: Job) -> Result<()> {
    match job {
        Job::Live { skip_scorecards, skip_commentary } => {
            let options = LiveOptions { scorecards: !skip_scorecards, commentary: !skip_commentary };
            jobs::live::run(ctx, store, options)
        }
        Job::TopStats { from, to, formats, skip_strike_rates } => {
            let options = TopStatsOptions { years: from..=to, formats, strike_rates: !skip_strike_rates };
            jobs::top_stats::run(ctx, store, &options)
        }
        Job::Recent => jobs::recent::run(ctx, store),
        Job::Schedules => jobs::schedules::run(ctx, store),
        Job::TeamResults(ids) => jobs::team_results::run(ctx, store, &ids.resolve(TEAM_RESULT_IDS)?),
        Job::Commentary(ids) => jobs::commentary::run(ctx, store, &ids.resolve(COMMENTARY_MATCH_IDS)?),
        Job::Players(ids) => jobs::players::run(ctx, store, &ids.resolve(PLAYER_PROFILE_IDS)?),
        Job::PlayerStats(ids) => jobs::player_stats::run(ctx, store, &ids.resolve(PLAYER_STATS_IDS)?),
        Job::Venues(ids) => jobs::venues::run(ctx, store, &ids.resolve(VENUE_IDS)?),
        Job::VenueMatches(ids) => jobs::venue_matches::run(ctx, store, &ids.resolve(VENUE_IDS)?),
        Job::Rankings => jobs::rankings::run(ctx, store),
        Job::Series { series_type, year } => jobs::series::run(ctx, store, &series_type, year),
        Job::Export { .. } | Job::Clean => Ok(()),
    }
}
