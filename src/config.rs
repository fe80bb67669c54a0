use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CYCLE_SECS: u64 = 20;

const DEFAULT_TEAMS: [&str; 20] = [
    "Arsenal",
    "Aston Villa",
    "Brentford",
    "Brighton and Hove Albion",
    "Burnley",
    "Chelsea",
    "Crystal Palace",
    "Everton",
    "Fulham",
    "Leeds United",
    "Leicester City",
    "Liverpool",
    "Manchester City",
    "Manchester United",
    "Newcastle United",
    "Norwich City",
    "Sheffield United",
    "Tottenham Hotspur",
    "West Bromwich Albion",
    "Wolverhampton Wanderers",
];

const DEFAULT_IMAGES: [&str; 5] = [
    "/static/images/football1.jpg",
    "/static/images/football2.jpg",
    "/static/images/football3.jpg",
    "/static/images/football4.jpg",
    "/static/images/football5.jpg",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout: Option<Duration>,
    /// Sorted, de-duplicated entity set offered in both pickers.
    pub teams: Vec<String>,
    pub background_images: Vec<String>,
    pub background_cycle: Duration,
}

impl Config {
    /// Read settings from the environment. Call after the dotenv files are loaded.
    pub fn from_env() -> Self {
        let base_url = env::var("PREDICT_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = env::var("PREDICT_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let teams = env::var("PREDICT_TEAMS")
            .ok()
            .map(|raw| split_list(&raw))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| DEFAULT_TEAMS.iter().map(|t| t.to_string()).collect());
        let background_images = env::var("BACKGROUND_IMAGES")
            .ok()
            .map(|raw| split_list(&raw))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGES.iter().map(|p| p.to_string()).collect());
        let cycle_secs = env::var("BACKGROUND_CYCLE_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_CYCLE_SECS)
            .max(1);

        Self {
            base_url,
            timeout,
            teams: normalize_teams(teams),
            background_images,
            background_cycle: Duration::from_secs(cycle_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            teams: normalize_teams(DEFAULT_TEAMS.iter().map(|t| t.to_string()).collect()),
            background_images: DEFAULT_IMAGES.iter().map(|p| p.to_string()).collect(),
            background_cycle: Duration::from_secs(DEFAULT_CYCLE_SECS),
        }
    }
}

pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_teams(mut teams: Vec<String>) -> Vec<String> {
    teams.sort();
    teams.dedup();
    teams
}
