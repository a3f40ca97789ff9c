//! Known spellings of every logical API field.
//!
//! The upstream feed emits the same field as `camelCase` on some endpoints
//! and all-lowercase on others. Each constant lists the accepted spellings in
//! lookup order; the first key holding a non-null value wins.

pub type Keys = &'static [&'static str];

// match header
pub const MATCH_ID: Keys = &["matchid", "matchId"];
pub const SERIES_ID: Keys = &["seriesid", "seriesId"];
pub const SERIES_NAME: Keys = &["seriesname", "seriesName"];
pub const SERIES_TYPE: Keys = &["seriestype", "seriesType"];
pub const SERIES_START: Keys = &["seriesstartdt", "seriesStartDt"];
pub const SERIES_END: Keys = &["seriesenddt", "seriesEndDt"];
pub const MATCH_DESC: Keys = &["matchdesc", "matchDesc"];
pub const MATCH_FORMAT: Keys = &["matchformat", "matchFormat"];
pub const MATCH_TYPE: Keys = &["matchtype", "matchType"];
// series wrappers carry `seriesName`, details maps carry the name as `key`
pub const GROUP_SERIES_NAME: Keys = &["seriesName", "seriesname", "key"];
pub const START_DATE: Keys = &["startdate", "startDate"];
pub const END_DATE: Keys = &["enddate", "endDate"];
pub const STATE: Keys = &["state"];
pub const STATUS: Keys = &["status"];
pub const CURR_BAT_TEAM_ID: Keys = &["currbatteamid", "currBatTeamId"];
pub const TOSS_STATUS: Keys = &["tossstatus", "tossStatus"];
pub const VENUE_INFO: Keys = &["venueinfo", "venueInfo", "venue"];
pub const WINNING_TEAM_ID: Keys = &["winningteamid", "winningTeamId"];
pub const MATCH_COMPLETE: Keys = &["ismatchcomplete", "isMatchComplete"];

// match score
pub const TEAM1_SCORE: Keys = &["team1Score", "team1score"];
pub const TEAM2_SCORE: Keys = &["team2Score", "team2score"];
pub const INNINGS1: Keys = &["inngs1", "inngs_1"];
pub const INNINGS2: Keys = &["inngs2", "inngs_2"];
pub const DECLARED: Keys = &["isDeclared", "isdeclared"];

// teams
pub const TEAM_ID: Keys = &["teamid", "teamId"];
pub const TEAM_NAME: Keys = &["teamname", "teamName"];
// match centre headers nest teams as `{ id, name }`
pub const HEADER_TEAM_ID: Keys = &["id", "teamid", "teamId"];
pub const HEADER_TEAM_NAME: Keys = &["name", "teamname", "teamName"];
pub const TEAM_SHORT_NAME: Keys = &["teamsname", "teamSName"];

// toss
pub const TOSS_RESULTS: Keys = &["tossresults", "tossResults"];
pub const TOSS_WINNER_ID: Keys = &["tosswinnerid", "winnerId", "tossWinnerId"];
pub const TOSS_WINNER_NAME: Keys = &["tosswinnername", "winnerName", "tossWinnerName"];
pub const TOSS_DECISION: Keys = &["decision"];

// scorecard
pub const SCORECARD: Keys = &["scorecard", "scoreCard", "innings"];
pub const INNINGS_ID: Keys = &["inningsid", "inningsId"];
pub const INNINGS_NAME: Keys = &["inningsname", "inningsName"];
pub const BAT_TEAM_NAME: Keys = &["batteamname", "batTeamName"];
pub const BATSMEN: Keys = &["batsman", "batCardList"];
pub const BOWLERS: Keys = &["bowler", "bowlCardList"];

pub const BATSMAN_ID: Keys = &["id", "batId"];
pub const BATSMAN_NAME: Keys = &["name", "batName"];
pub const RUNS: Keys = &["runs"];
pub const BALLS: Keys = &["balls"];
pub const FOURS: Keys = &["fours"];
pub const SIXES: Keys = &["sixes"];
pub const STRIKE_RATE: Keys = &["strkrate", "strikeRate"];
pub const OUT_DESC: Keys = &["outdec", "outDesc"];

pub const BOWLER_ID: Keys = &["id", "bowlId"];
pub const BOWLER_NAME: Keys = &["name", "bowlName"];
pub const OVERS: Keys = &["overs"];
pub const MAIDENS: Keys = &["maidens"];
pub const WICKETS: Keys = &["wickets"];
pub const ECONOMY: Keys = &["economy"];
pub const NO_BALLS: Keys = &["noballs", "no_balls"];
pub const WIDES: Keys = &["wides"];

// legacy scorecard layout (`batTeamDetails.batsmenData`)
pub const BAT_TEAM_DETAILS: Keys = &["batTeamDetails", "batteamdetails"];
pub const BATSMEN_DATA: Keys = &["batsmenData", "batsmendata"];

// commentary
pub const COMMENTARY_LIST: Keys = &["comwrapper", "commLines", "commentaryList"];
pub const COMM_TEXT: Keys = &["commtxt", "commText"];
pub const EVENT_TYPE: Keys = &["eventtype", "event"];
pub const OVER_NUMBER: Keys = &["overnum", "overNumber"];
pub const BALL_NUMBER: Keys = &["ballnbr", "ballNbr"];
pub const TIMESTAMP: Keys = &["timestamp"];
pub const BAT_TEAM_SCORE: Keys = &["batteamscore", "batTeamScore"];
pub const MATCH_HEADER: Keys = &["matchheaders", "matchHeader", "matchInfo"];

// player profile
pub const PLAYER_ID: Keys = &["id", "playerId"];
pub const NAME: Keys = &["name"];
pub const ROLE: Keys = &["role"];
pub const DOB: Keys = &["DoBFormat", "dob", "DoB"];
pub const BIRTH_PLACE: Keys = &["birthPlace", "birthplace"];
pub const INTL_TEAM: Keys = &["intlTeam", "intlteam"];
pub const BAT_STYLE: Keys = &["bat", "battingStyle"];
pub const BOWL_STYLE: Keys = &["bowl", "bowlingStyle"];
pub const TEAMS: Keys = &["teams"];

// venues
pub const GROUND: Keys = &["ground"];
pub const CITY: Keys = &["city"];
pub const COUNTRY: Keys = &["country"];
pub const TIMEZONE: Keys = &["timezone"];
pub const CAPACITY: Keys = &["capacity"];
pub const ENDS: Keys = &["ends"];
pub const HOME_TEAM: Keys = &["homeTeam", "hometeam"];
pub const IMAGE_URL: Keys = &["imageUrl", "imageurl"];
pub const LATITUDE: Keys = &["latitude"];
pub const LONGITUDE: Keys = &["longitude"];
pub const VENUE_STATS: Keys = &["venueStats", "venuestats"];

// rankings and series archive
pub const RANK: Keys = &["rank"];
pub const RATING: Keys = &["rating"];
pub const POINTS: Keys = &["points"];
pub const SERIES_GROUPS: Keys = &["seriesMapProto", "seriesmapproto"];
pub const START_DT: Keys = &["startDt", "startdt"];
pub const END_DT: Keys = &["endDt", "enddt"];
