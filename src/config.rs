use std::env;

/// Longest accepted session lifetime (one year).
pub const MAX_SESSION_DURATION_HOURS: i64 = 24 * 365;

/// Seed administrator created at boot when both credentials are configured.
#[derive(Clone, Debug)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub team_name: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub session_duration_hours: i64,
    pub session_cleanup_interval_secs: u64,
    pub admin: Option<AdminSeed>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://bulletproof.db?mode=rwc".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            session_duration_hours: 9,
            session_cleanup_interval_secs: 600,
            admin: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let database_url = lookup("DATABASE_URL").unwrap_or(defaults.database_url);

        let server_host = lookup("SERVER_HOST").unwrap_or(defaults.server_host);

        let server_port = match lookup("SERVER_PORT") {
            Some(port) => port.parse().map_err(|_| ConfigError::InvalidPort)?,
            None => defaults.server_port,
        };

        let session_duration_hours = lookup("SESSION_DURATION_HOURS")
            .and_then(|v| v.parse().ok())
            .filter(|hours: &i64| *hours > 0)
            .unwrap_or(defaults.session_duration_hours);
        if session_duration_hours > MAX_SESSION_DURATION_HOURS {
            return Err(ConfigError::InvalidSessionDuration(session_duration_hours));
        }

        let session_cleanup_interval_secs = lookup("SESSION_CLEANUP_INTERVAL_SECS")
            .and_then(|v| v.parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(defaults.session_cleanup_interval_secs);

        let admin = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed {
                email,
                password,
                team_name: lookup("ADMIN_TEAM_NAME")
                    .unwrap_or_else(|| "Administrators".to_string()),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::IncompleteAdmin("ADMIN_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::IncompleteAdmin("ADMIN_EMAIL")),
        };

        Ok(Config {
            database_url,
            server_host,
            server_port,
            session_duration_hours,
            session_cleanup_interval_secs,
            admin,
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

    #[error("SESSION_DURATION_HOURS must be at most {max}, got {0}", max = MAX_SESSION_DURATION_HOURS)]
    InvalidSessionDuration(i64),

    #[error("{0} must be set when seeding an admin user")]
    IncompleteAdmin(&'static str),
}
