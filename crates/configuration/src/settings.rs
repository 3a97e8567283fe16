use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty configuration is a working one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSettings,
    pub analytics: AnalyticsSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

/// Locations of the read-only inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Daily price dataset (`Date`, `Price`; day-first dates).
    pub prices_path: PathBuf,
    /// Event catalog (`date`, `title`, `type`; ISO dates).
    pub events_path: PathBuf,
    /// Summary document written by the offline change-point model.
    pub change_point_summary_path: PathBuf,
}

/// Parameters of the derived series.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Number of returns in the rolling volatility window.
    pub volatility_window: usize,
    /// Annualization factor is the square root of this.
    pub trading_days_per_year: u32,
    /// Calendar days on each side of an event.
    pub event_window_days: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

/// Command-line overrides for the server section.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ServerOverrides {
    /// Address to bind, overriding `server.host`.
    #[cfg_attr(feature = "clap", arg(long))]
    pub host: Option<IpAddr>,
    /// Port to bind, overriding `server.port`.
    #[cfg_attr(feature = "clap", arg(long))]
    pub port: Option<u16>,
}

// --- Default Implementations ---

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            prices_path: PathBuf::from("data/brent_daily.csv"),
            events_path: PathBuf::from("data/events.csv"),
            change_point_summary_path: PathBuf::from("results/change_point_summary.json"),
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            volatility_window: 30,
            trading_days_per_year: 252,
            event_window_days: 30,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 5000,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "brent-analytics.log".to_string(),
        }
    }
}

impl Config {
    /// Rejects parameter values the analytics engines cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.analytics;
        if a.volatility_window < 2 {
            return Err(ConfigError::ValidationError(format!(
                "analytics.volatility_window must be at least 2, got {}",
                a.volatility_window
            )));
        }
        if a.trading_days_per_year == 0 {
            return Err(ConfigError::ValidationError(
                "analytics.trading_days_per_year must be positive".to_string(),
            ));
        }
        if a.event_window_days == 0 {
            return Err(ConfigError::ValidationError(
                "analytics.event_window_days must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl ServerSettings {
    pub fn with_overrides(mut self, overrides: &ServerOverrides) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        self
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
