//! Flat records, one struct per persisted table.
//!
//! Every record carries the match or player id it was derived from; the
//! flatteners never build one without it.

/// Per-side innings score nested in the live match feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InningsScore {
    pub runs: Option<i64>,
    pub wickets: Option<i64>,
    pub overs: Option<f64>,
    pub declared: Option<bool>,
}

record! {
    /// One live or recent match with both teams' first and second innings.
    pub struct MatchRecord in "live_match_info", Replace, key(match_id: i64) {
        match_id: i64 => "BIGINT",
        series_id: Option<i64> => "BIGINT",
        series_name: Option<String> => "VARCHAR(255)",
        match_desc: Option<String> => "VARCHAR(100)",
        match_format: Option<String> => "VARCHAR(20)",
        state: Option<String> => "VARCHAR(50)",
        status: Option<String> => "VARCHAR(255)",
        curr_bat_team_id: Option<i64> => "BIGINT",
        toss_status: Option<String> => "VARCHAR(255)",
        team1_inngs1_runs: Option<i64> => "INTEGER",
        team1_inngs1_wickets: Option<i64> => "INTEGER",
        team1_inngs1_overs: Option<f64> => "DOUBLE",
        team1_inngs1_declared: Option<bool> => "BOOLEAN",
        team1_inngs2_runs: Option<i64> => "INTEGER",
        team1_inngs2_wickets: Option<i64> => "INTEGER",
        team1_inngs2_overs: Option<f64> => "DOUBLE",
        team1_inngs2_declared: Option<bool> => "BOOLEAN",
        team2_inngs1_runs: Option<i64> => "INTEGER",
        team2_inngs1_wickets: Option<i64> => "INTEGER",
        team2_inngs1_overs: Option<f64> => "DOUBLE",
        team2_inngs1_declared: Option<bool> => "BOOLEAN",
        team2_inngs2_runs: Option<i64> => "INTEGER",
        team2_inngs2_wickets: Option<i64> => "INTEGER",
        team2_inngs2_overs: Option<f64> => "DOUBLE",
        team2_inngs2_declared: Option<bool> => "BOOLEAN",
    }
}

impl MatchRecord {
    pub fn set_innings(&mut self, team: u8, innings: u8, score: InningsScore) {
        let (runs, wickets, overs, declared) = match (team, innings) {
            (1, 1) => (
                &mut self.team1_inngs1_runs,
                &mut self.team1_inngs1_wickets,
                &mut self.team1_inngs1_overs,
                &mut self.team1_inngs1_declared,
            ),
            (1, 2) => (
                &mut self.team1_inngs2_runs,
                &mut self.team1_inngs2_wickets,
                &mut self.team1_inngs2_overs,
                &mut self.team1_inngs2_declared,
            ),
            (2, 1) => (
                &mut self.team2_inngs1_runs,
                &mut self.team2_inngs1_wickets,
                &mut self.team2_inngs1_overs,
                &mut self.team2_inngs1_declared,
            ),
            (2, 2) => (
                &mut self.team2_inngs2_runs,
                &mut self.team2_inngs2_wickets,
                &mut self.team2_inngs2_overs,
                &mut self.team2_inngs2_declared,
            ),
            _ => return,
        };
        *runs = score.runs;
        *wickets = score.wickets;
        *overs = score.overs;
        *declared = score.declared;
    }
}

record! {
    pub struct VenueRecord in "live_venues", Replace, key(match_id: i64, venue_id: Option<i64>) {
        match_id: i64 => "BIGINT",
        venue_id: Option<i64> => "BIGINT",
        ground: Option<String> => "VARCHAR(255)",
        city: Option<String> => "VARCHAR(100)",
        country: Option<String> => "VARCHAR(100)",
        timezone: Option<String> => "VARCHAR(10)",
        latitude: Option<String> => "VARCHAR(20)",
        longitude: Option<String> => "VARCHAR(20)",
    }
}

record! {
    pub struct TeamRecord in "live_teams", Replace, key(match_id: i64, team_id: Option<i64>) {
        match_id: i64 => "BIGINT",
        /// `team1` or `team2`
        team_role: String => "VARCHAR(10)",
        team_id: Option<i64> => "BIGINT",
        team_name: Option<String> => "VARCHAR(100)",
        team_sname: Option<String> => "VARCHAR(20)",
    }
}

record! {
    /// An umpire or the match referee. Only built when the feed supplies an id.
    pub struct OfficialRecord in "live_officials", Replace, key(match_id: i64, role: String) {
        match_id: i64 => "BIGINT",
        role: String => "VARCHAR(20)",
        official_id: i64 => "BIGINT",
        name: Option<String> => "VARCHAR(100)",
        country: Option<String> => "VARCHAR(100)",
    }
}

record! {
    pub struct SeriesRecord in "live_series", Replace, key(series_id: i64, match_id: i64) {
        series_id: i64 => "BIGINT",
        series_name: Option<String> => "VARCHAR(255)",
        match_type: Option<String> => "VARCHAR(50)",
        series_type: Option<String> => "VARCHAR(50)",
        match_id: i64 => "BIGINT",
        series_start_dt: Option<String> => "VARCHAR(32)",
        series_end_dt: Option<String> => "VARCHAR(32)",
        fetched_at: String => "VARCHAR(32)",
    }
}

record! {
    pub struct BatsmanRecord in "live_batting_stats", Replace,
        key(match_id: i64, innings_id: Option<i64>, batsman_id: Option<i64>)
    {
        match_id: i64 => "BIGINT",
        innings_id: Option<i64> => "INTEGER",
        team_name: Option<String> => "VARCHAR(100)",
        batsman_id: Option<i64> => "BIGINT",
        batsman_name: Option<String> => "VARCHAR(100)",
        /// 1-based order in the innings' batting card
        batting_position: i64 => "INTEGER",
        runs: Option<i64> => "INTEGER",
        balls_faced: Option<i64> => "INTEGER",
        fours: Option<i64> => "INTEGER",
        sixes: Option<i64> => "INTEGER",
        strike_rate: Option<f64> => "DOUBLE",
        out_desc: Option<String> => "VARCHAR(200)",
    }
}

record! {
    pub struct BowlerRecord in "live_bowling_stats", Replace,
        key(match_id: i64, innings_id: Option<i64>, bowler_id: Option<i64>)
    {
        match_id: i64 => "BIGINT",
        innings_id: Option<i64> => "INTEGER",
        team_name: Option<String> => "VARCHAR(100)",
        bowler_id: Option<i64> => "BIGINT",
        bowler_name: Option<String> => "VARCHAR(100)",
        overs: Option<f64> => "DOUBLE",
        maidens: Option<i64> => "INTEGER",
        runs_conceded: Option<i64> => "INTEGER",
        wickets: Option<i64> => "INTEGER",
        economy: Option<f64> => "DOUBLE",
        no_balls: Option<i64> => "INTEGER",
        wides: Option<i64> => "INTEGER",
    }
}

record! {
    pub struct PartnershipRecord in "live_partnerships", Replace,
        key(match_id: i64, innings_id: Option<i64>, bat1_id: Option<i64>, bat2_id: Option<i64>)
    {
        match_id: i64 => "BIGINT",
        innings_id: Option<i64> => "INTEGER",
        team_name: Option<String> => "VARCHAR(100)",
        partnership_number: i64 => "INTEGER",
        bat1_id: Option<i64> => "BIGINT",
        bat1_name: Option<String> => "VARCHAR(100)",
        bat1_runs: Option<i64> => "INTEGER",
        bat1_balls: Option<i64> => "INTEGER",
        bat1_fours: Option<i64> => "INTEGER",
        bat1_sixes: Option<i64> => "INTEGER",
        bat1_position: Option<i64> => "INTEGER",
        bat2_id: Option<i64> => "BIGINT",
        bat2_name: Option<String> => "VARCHAR(100)",
        bat2_runs: Option<i64> => "INTEGER",
        bat2_balls: Option<i64> => "INTEGER",
        bat2_fours: Option<i64> => "INTEGER",
        bat2_sixes: Option<i64> => "INTEGER",
        bat2_position: Option<i64> => "INTEGER",
        total_runs: Option<i64> => "INTEGER",
        total_balls: Option<i64> => "INTEGER",
        /// true when the pair batted at consecutive positions, NULL otherwise
        is_adjacent: Option<bool> => "BOOLEAN",
        fetched_at: String => "VARCHAR(32)",
    }
}

record! {
    pub struct ScorecardMetaRecord in "live_scorecard_metadata", Replace, key(match_id: i64) {
        match_id: i64 => "BIGINT",
        is_match_complete: bool => "BOOLEAN",
        match_status: Option<String> => "VARCHAR(255)",
    }
}

record! {
    /// One ball-by-ball line of the live feed.
    pub struct CommentaryRecord in "live_commentary", Replace,
        key(match_id: i64, innings: Option<i64>, timestamp: Option<i64>, ball_number: Option<i64>)
    {
        match_id: i64 => "BIGINT",
        innings: Option<i64> => "INTEGER",
        over_number: Option<f64> => "DOUBLE",
        ball_number: Option<i64> => "INTEGER",
        /// epoch milliseconds
        timestamp: Option<i64> => "BIGINT",
        event_type: Option<String> => "VARCHAR(100)",
        commentary_text: String => "TEXT",
        runs_scored: i64 => "INTEGER",
        bat_team_score: Option<i64> => "INTEGER",
        toss_winner: Option<String> => "VARCHAR(100)",
        fetched_at: String => "VARCHAR(32)",
    }
}

record! {
    /// Commentary line joined with its match centre header.
    pub struct MatchCommentaryRecord in "match_commentary", Replace,
        key(match_id: i64, innings_id: Option<i64>, timestamp: Option<i64>, ball_number: Option<i64>)
    {
        match_id: i64 => "BIGINT",
        series_id: Option<i64> => "BIGINT",
        series_name: Option<String> => "VARCHAR(255)",
        match_desc: Option<String> => "VARCHAR(255)",
        format: Option<String> => "VARCHAR(50)",
        state: Option<String> => "VARCHAR(50)",
        status: Option<String> => "VARCHAR(255)",
        team1_id: Option<i64> => "BIGINT",
        team1_name: Option<String> => "VARCHAR(255)",
        team2_id: Option<i64> => "BIGINT",
        team2_name: Option<String> => "VARCHAR(255)",
        toss_winner_id: Option<i64> => "BIGINT",
        toss_winner_name: Option<String> => "VARCHAR(255)",
        toss_decision: Option<String> => "VARCHAR(50)",
        winning_team_id: Option<i64> => "BIGINT",
        innings_id: Option<i64> => "INTEGER",
        innings_name: Option<String> => "VARCHAR(100)",
        over_number: Option<f64> => "DOUBLE",
        ball_number: Option<i64> => "INTEGER",
        event_type: Option<String> => "VARCHAR(100)",
        commentary_text: String => "TEXT",
        runs_scored: i64 => "INTEGER",
        timestamp: Option<i64> => "BIGINT",
        bat_team_score: Option<i64> => "INTEGER",
    }
}

record! {
    pub struct YearlyBattingRecord in "yearly_batting_stats", Replace,
        key(year: i64, format: String, player_id: i64)
    {
        year: i64 => "INTEGER",
        format: String => "VARCHAR(10)",
        stats_type: String => "VARCHAR(20)",
        player_id: i64 => "BIGINT",
        player_name: Option<String> => "VARCHAR(100)",
        matches: Option<i64> => "INTEGER",
        innings: Option<i64> => "INTEGER",
        runs: Option<i64> => "INTEGER",
        average: Option<f64> => "DOUBLE",
        /// aggregated from recent scorecards; NULL when the player faced no balls there
        strike_rate: Option<f64> => "DOUBLE",
        fetched_at: String => "VARCHAR(32)",
    }
}

record! {
    pub struct YearlyBowlingRecord in "yearly_bowling_stats", Replace,
        key(year: i64, format: String, player_id: i64)
    {
        year: i64 => "INTEGER",
        format: String => "VARCHAR(10)",
        stats_type: String => "VARCHAR(20)",
        player_id: i64 => "BIGINT",
        player_name: Option<String> => "VARCHAR(100)",
        matches: Option<i64> => "INTEGER",
        overs: Option<f64> => "DOUBLE",
        wickets: Option<i64> => "INTEGER",
        average: Option<f64> => "DOUBLE",
        fetched_at: String => "VARCHAR(32)",
    }
}

record! {
    pub struct PlayerProfileRecord in "player_info", Upsert, key(player_id: i64) {
        player_id: i64 => "BIGINT",
        player_name: Option<String> => "VARCHAR(255)",
        role: Option<String> => "VARCHAR(100)",
        dob: Option<String> => "VARCHAR(100)",
        birth_place: Option<String> => "VARCHAR(255)",
        country: Option<String> => "VARCHAR(100)",
        batting_style: Option<String> => "VARCHAR(100)",
        bowling_style: Option<String> => "VARCHAR(100)",
        major_teams: Option<String> => "TEXT",
    }
}

record! {
    /// Career totals for one player in one format, batting and bowling merged.
    /// Stats the API leaves out or renders as `-` are stored as zero.
    pub struct PlayerStatsRecord in "player_stats", Replace, key(player_id: i64, format_type: String) {
        player_id: i64 => "BIGINT",
        player_name: Option<String> => "VARCHAR(255)",
        format_type: String => "VARCHAR(20)",
        matches: i64 => "INTEGER",
        innings: i64 => "INTEGER",
        runs: i64 => "INTEGER",
        balls: i64 => "INTEGER",
        highest: String => "VARCHAR(10)",
        average: f64 => "DOUBLE",
        strike_rate: f64 => "DOUBLE",
        not_out: i64 => "INTEGER",
        fours: i64 => "INTEGER",
        sixes: i64 => "INTEGER",
        ducks: i64 => "INTEGER",
        fifties: i64 => "INTEGER",
        hundreds: i64 => "INTEGER",
        two_hundreds: i64 => "INTEGER",
        three_hundreds: i64 => "INTEGER",
        four_hundreds: i64 => "INTEGER",
        wickets: i64 => "INTEGER",
        bowling_average: f64 => "DOUBLE",
        bowling_strike_rate: f64 => "DOUBLE",
        economy_rate: f64 => "DOUBLE",
        overs_bowled: f64 => "DOUBLE",
        maidens: i64 => "INTEGER",
        runs_conceded: i64 => "INTEGER",
        best_bowling: String => "VARCHAR(10)",
        five_wickets: i64 => "INTEGER",
        ten_wickets: i64 => "INTEGER",
        updated_at: String => "VARCHAR(32)",
    }
}

record! {
    /// Ground profile merged with its historical aggregates.
    pub struct VenueProfileRecord in "venues", Upsert, key(venue_id: i64) {
        venue_id: i64 => "BIGINT",
        venue_name: Option<String> => "VARCHAR(255)",
        city: Option<String> => "VARCHAR(100)",
        country: Option<String> => "VARCHAR(100)",
        timezone: Option<String> => "VARCHAR(10)",
        capacity: Option<i64> => "INTEGER",
        ends: Option<String> => "TEXT",
        home_team: Option<String> => "VARCHAR(100)",
        image_url: Option<String> => "TEXT",
        total_matches: Option<i64> => "INTEGER",
        matches_won_batting_first: Option<i64> => "INTEGER",
        matches_won_bowling_first: Option<i64> => "INTEGER",
        avg_first_inns: Option<i64> => "INTEGER",
        avg_second_inns: Option<i64> => "INTEGER",
        highest_total: Option<String> => "VARCHAR(255)",
        lowest_total: Option<String> => "VARCHAR(255)",
        highest_chased: Option<String> => "VARCHAR(255)",
        lowest_defended: Option<String> => "VARCHAR(255)",
    }
}

record! {
    pub struct PlayerRankingRecord in "icc_rankings", Upsert,
        key(category: String, format_type: String, player_id: i64)
    {
        category: String => "VARCHAR(20)",
        format_type: String => "VARCHAR(10)",
        player_id: i64 => "BIGINT",
        player_rank: Option<i64> => "INTEGER",
        player_name: Option<String> => "VARCHAR(100)",
        country: Option<String> => "VARCHAR(100)",
        rating: Option<i64> => "INTEGER",
        points: Option<i64> => "INTEGER",
    }
}

record! {
    pub struct TeamStandingRecord in "team_standings", Upsert, key(match_type: i64, team_rank: i64) {
        match_type: i64 => "INTEGER",
        team_rank: i64 => "INTEGER",
        flag: Option<i64> => "INTEGER",
        team: Option<String> => "VARCHAR(100)",
        pct: Option<f64> => "DOUBLE",
    }
}

record! {
    pub struct SeriesArchiveRecord in "series_list", Replace, key(series_id: i64) {
        series_id: i64 => "BIGINT",
        series_name: Option<String> => "VARCHAR(255)",
        start_date: Option<String> => "VARCHAR(32)",
        end_date: Option<String> => "VARCHAR(32)",
        /// grouping label from the archive, e.g. "January 2024"
        period: Option<String> => "VARCHAR(50)",
    }
}

record! {
    /// A recently finished match with a one-line score per side.
    pub struct RecentMatchRecord in "recent_matches", Replace, key(match_id: i64) {
        match_id: i64 => "BIGINT",
        /// International, League, Domestic or Women
        match_type: Option<String> => "VARCHAR(50)",
        series_name: Option<String> => "VARCHAR(255)",
        match_desc: Option<String> => "VARCHAR(100)",
        team1: Option<String> => "VARCHAR(100)",
        team2: Option<String> => "VARCHAR(100)",
        /// latest innings as `runs/wickets (overs ov)`
        team1_score: Option<String> => "VARCHAR(50)",
        team2_score: Option<String> => "VARCHAR(50)",
        venue: Option<String> => "VARCHAR(255)",
        start_time: Option<String> => "VARCHAR(32)",
        status: Option<String> => "VARCHAR(255)",
        fetched_at: String => "VARCHAR(32)",
    }
}

record! {
    pub struct ScheduleRecord in "schedules", Replace, key(match_id: i64) {
        match_id: i64 => "BIGINT",
        match_type: Option<String> => "VARCHAR(50)",
        series_name: Option<String> => "VARCHAR(255)",
        match_desc: Option<String> => "VARCHAR(100)",
        match_format: Option<String> => "VARCHAR(20)",
        start_time: Option<String> => "VARCHAR(32)",
        team1: Option<String> => "VARCHAR(100)",
        team2: Option<String> => "VARCHAR(100)",
        venue: Option<String> => "VARCHAR(255)",
        city: Option<String> => "VARCHAR(100)",
        status: Option<String> => "VARCHAR(255)",
        fetched_at: String => "VARCHAR(32)",
    }
}

record! {
    pub struct TeamResultRecord in "team_results", Replace, key(team_id: i64, match_id: i64) {
        team_id: i64 => "BIGINT",
        match_id: i64 => "BIGINT",
        series_name: Option<String> => "VARCHAR(255)",
        match_desc: Option<String> => "VARCHAR(100)",
        match_format: Option<String> => "VARCHAR(20)",
        team1: Option<String> => "VARCHAR(100)",
        team2: Option<String> => "VARCHAR(100)",
        team1_score: Option<String> => "VARCHAR(50)",
        team2_score: Option<String> => "VARCHAR(50)",
        start_time: Option<String> => "VARCHAR(32)",
        status: Option<String> => "VARCHAR(255)",
        fetched_at: String => "VARCHAR(32)",
    }
}

record! {
    /// A match played at a venue, merged into the table across runs.
    pub struct VenueMatchRecord in "venue_matches", Upsert, key(match_id: i64) {
        match_id: i64 => "BIGINT",
        venue_id: i64 => "BIGINT",
        series_id: Option<i64> => "BIGINT",
        series_name: Option<String> => "VARCHAR(255)",
        match_desc: Option<String> => "VARCHAR(100)",
        match_format: Option<String> => "VARCHAR(20)",
        start_time: Option<String> => "VARCHAR(32)",
        end_time: Option<String> => "VARCHAR(32)",
        team1: Option<String> => "VARCHAR(100)",
        team2: Option<String> => "VARCHAR(100)",
        venue_name: Option<String> => "VARCHAR(255)",
        city: Option<String> => "VARCHAR(100)",
        country: Option<String> => "VARCHAR(100)",
    }
}
