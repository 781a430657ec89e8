use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_GOALS_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Origin of the goal resource, without the `/goals` path.
    pub goals_api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_values(env::var("PORT").ok(), env::var("GOALS_API_URL").ok())
    }

    fn from_values(port: Option<String>, goals_api_url: Option<String>) -> Self {
        let port = port
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let goals_api_url = goals_api_url
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_GOALS_API_URL.to_string());

        Self {
            port,
            goals_api_url,
        }
    }
}
