//! Command-line arguments. Flags override the `DAYSWIPE_*` environment.

use std::time::Duration;

use clap::Parser;
use dayswipe_core::config::{ApiConfig, DEFAULT_REQUEST_TIMEOUT, TriageConfig};

/// Triage today's pending tasks one card at a time.
#[derive(Parser, Debug)]
#[command(name = "dayswipe")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Task API base URL (overrides DAYSWIPE_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// User whose tasks are triaged
    #[arg(short, long, env = "DAYSWIPE_USER_ID", default_value_t = 1)]
    pub user: u64,

    /// Release threshold in points
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Pause after a decision before the next card, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Offline task title; repeat for several cards. Ignored with an API.
    #[arg(short = 't', long = "task")]
    pub tasks: Vec<String>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn apply(&self, mut config: TriageConfig) -> TriageConfig {
        if let Some(url) = self.api_url.as_deref().map(str::trim) {
            config.api = if url.is_empty() {
                None
            } else {
                let request_timeout = config
                    .api
                    .as_ref()
                    .map_or(DEFAULT_REQUEST_TIMEOUT, |api| api.request_timeout);
                Some(ApiConfig {
                    base_url: url.to_string(),
                    request_timeout,
                })
            };
        }
        if let Some(threshold) = self.threshold {
            config.session.swipe_threshold = threshold;
        }
        if let Some(ms) = self.delay_ms {
            config.session.advance_delay = Duration::from_millis(ms);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_environment() {
        let args = Args::parse_from([
            "dayswipe",
            "--api-url",
            "http://localhost:3000",
            "--threshold",
            "80",
            "--delay-ms",
            "0",
        ]);
        let config = args.apply(TriageConfig::default());

        assert_eq!(config.session.swipe_threshold, 80.0);
        assert_eq!(config.session.advance_delay, Duration::ZERO);
        assert_eq!(config.api.unwrap().base_url, "http://localhost:3000");
    }

    #[test]
    fn blank_api_url_forces_offline() {
        let mut base = TriageConfig::default();
        base.api = Some(ApiConfig {
            base_url: "http://tasks".to_string(),
            request_timeout: Duration::from_secs(1),
        });
        let args = Args::parse_from(["dayswipe", "--api-url", ""]);
        assert!(args.apply(base).api.is_none());
    }

    #[test]
    fn repeated_task_flags_collect_in_order() {
        let args = Args::parse_from(["dayswipe", "-t", "Stretch", "--task", "Read"]);
        assert_eq!(args.tasks, vec!["Stretch", "Read"]);
        assert_eq!(args.user, 1);
        assert!(!args.json);
    }
}
