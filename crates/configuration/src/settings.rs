use crate::error::ConfigError;
use core_types::CalculatorInputs;
use presenter::PresenterSettings;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional; anything missing falls back to its default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    /// Timing of the animated revenue figure.
    pub animation: PresenterSettings,
    pub calculator: CalculatorDefaults,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let animation = &self.animation;
        if animation.duration.is_zero() {
            return Err(ConfigError::ValidationError(
                "animation.duration must be greater than zero".to_string(),
            ));
        }
        if animation.frame_interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "animation.frame_interval must be greater than zero".to_string(),
            ));
        }
        if animation.frame_interval >= animation.duration {
            return Err(ConfigError::ValidationError(
                "animation.frame_interval must be shorter than animation.duration".to_string(),
            ));
        }

        CalculatorInputs::from(self.calculator.clone())
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("calculator: {e}")))?;

        self.server.socket_addr()?;
        Ok(())
    }
}

/// Where the landing page is served.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "server.host '{}' is not an IP address",
                self.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// The slider positions a visitor sees before touching anything.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CalculatorDefaults {
    pub daily_calls: u32,
    pub after_hours_pct: Decimal,
    pub ai_answer_rate: Decimal,
    pub conversion_rate: Decimal,
    pub avg_value: Decimal,
}

impl Default for CalculatorDefaults {
    fn default() -> Self {
        Self {
            daily_calls: 60,
            after_hours_pct: dec!(30),
            ai_answer_rate: dec!(80),
            conversion_rate: dec!(8),
            avg_value: dec!(120),
        }
    }
}

impl From<CalculatorDefaults> for CalculatorInputs {
    fn from(d: CalculatorDefaults) -> Self {
        CalculatorInputs::new(
            d.daily_calls,
            d.after_hours_pct,
            d.ai_answer_rate,
            d.conversion_rate,
            d.avg_value,
        )
    }
}

/// Log output. `RUST_LOG`, when set, takes precedence over `level`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, e.g. `"info"` or `"web_server=debug,info"`.
    pub level: String,
    /// If set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "maalgah.log".to_string(),
        }
    }
}
