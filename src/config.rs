// Endpoint configuration for the remote car store. A `Config` value is
// built once in `main` and handed to `ApiClient::new`; nothing here is
// global.

use crate::api::CarId;
use std::time::Duration;

/// Base URL used when neither `--url` nor `VINTAGE_CARS_URL` is given.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Seconds before a single request is abandoned.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resource path of the car collection on the store.
const CARS_PATH: &str = "cars";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: String,
    timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl Config {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Config {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Root of the store; a successful GET here means the store is up.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn cars_url(&self) -> String {
        format!("{}/{}", self.base_url, CARS_PATH)
    }

    pub fn car_url(&self, id: CarId) -> String {
        format!("{}/{}/{}", self.base_url, CARS_PATH, id)
    }
}
