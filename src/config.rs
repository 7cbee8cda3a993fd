use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub service_name: String,
    pub metrics_port: u16,
    /// Hours a notified waitlist entry may hold its slot before expiring.
    pub waitlist_hold_hours: i64,
    /// Seconds between expiry-sweeper passes.
    pub waitlist_sweep_interval_secs: u64,
    /// How far (in days) around a requested range the alternative-date
    /// advisor scans.
    pub suggestion_scan_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://kenneldesk.db?mode=rwc".to_string());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let service_name = env::var("SERVICE_NAME").unwrap_or_else(|_| "kenneldesk".to_string());

        let metrics_port = env::var("METRICS_PORT")
            .unwrap_or_else(|_| "9000".to_string())
            .parse()
            .unwrap_or(9000);

        let waitlist_hold_hours = env::var("WAITLIST_HOLD_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);

        let waitlist_sweep_interval_secs = env::var("WAITLIST_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .unwrap_or(60);

        let suggestion_scan_days = env::var("SUGGESTION_SCAN_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7);

        Ok(Config {
            database_url,
            server_host,
            server_port,
            service_name,
            metrics_port,
            waitlist_hold_hours,
            waitlist_sweep_interval_secs,
            suggestion_scan_days,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
}
