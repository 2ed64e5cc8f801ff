//! Dashboard report configuration.
//!
//! - `KIWITRAIN_LEADERBOARD_LIMIT`: Leaderboard rows shown per department (default: 10)

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    /// Maximum leaderboard rows per department. `0` shows every row.
    pub leaderboard_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            leaderboard_limit: 10,
        }
    }
}

impl ReportConfig {
    /// Creates a new `ReportConfig` from environment variables.
    ///
    /// Falls back to default values if environment variables are not set
    /// or cannot be parsed.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            leaderboard_limit: lookup("KIWITRAIN_LEADERBOARD_LIMIT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(10),
        }
    }

    /// Override the limit, e.g. from a command-line flag.
    pub fn with_leaderboard_limit(mut self, limit: Option<usize>) -> Self {
        if let Some(limit) = limit {
            self.leaderboard_limit = limit;
        }
        self
    }
}
