use std::{env, time::Duration};

pub const DEFAULT_CALC_URL: &str = "https://hannamontana.app.n8n.cloud/webhook-test/calculadora-n8n";
pub const DEFAULT_API_BASE: &str = "http://100.30.101.150:5000";

#[derive(Debug, Clone)]
pub struct Config {
    pub calc_url: String,
    pub api_base: String,
    pub port: u16,
    pub poll_interval: Duration,
    pub error_hide_after: Duration,
    pub refresh_after_success: Duration,
    pub example_feedback: Duration,
}

impl Config {
    /// Defaults for everything except the two remote endpoints.
    pub fn new(calc_url: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            calc_url: calc_url.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            port: 8080,
            poll_interval: Duration::from_secs(30),
            error_hide_after: Duration::from_millis(5000),
            refresh_after_success: Duration::from_millis(1500),
            example_feedback: Duration::from_millis(2000),
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::new(
            env::var("CALC_URL").unwrap_or_else(|_| DEFAULT_CALC_URL.to_string()),
            env::var("API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
        );

        Self {
            port: parse_var("PORT").unwrap_or(defaults.port),
            poll_interval: parse_var("POLL_INTERVAL_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
            error_hide_after: parse_var("ERROR_HIDE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.error_hide_after),
            refresh_after_success: parse_var("REFRESH_AFTER_SUCCESS_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.refresh_after_success),
            example_feedback: parse_var("EXAMPLE_FEEDBACK_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.example_feedback),
            ..defaults
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.trim().parse::<T>().ok())
}
