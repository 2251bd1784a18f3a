//! A description of the propstand configuration file

use std::path::{Path, PathBuf};

use propstand_messages::BaudRate;

use crate::settings::Settings;

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// A flexi_logger specification, e.g. "info" or "warn, propstand::monitor=debug"
    pub log_level: String,
    pub baud_rate: BaudRate,
    /// The stand's serial port, already set to `baud_rate`. Telemetry is read from stdin without one.
    pub device: Option<PathBuf>,
    /// Append every reading to this file as CSV
    pub csv_path: Option<PathBuf>,
    /// Skip readings taken while the motor is stopped
    pub only_populated: bool,
    pub settings: Settings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: String::from("warn"),
            baud_rate: BaudRate::default(),
            device: None,
            csv_path: None,
            only_populated: true,
            settings: Settings::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        std::fs::read_to_string(path)
            .map_err(|err| {
                log::error!("Failed to read config file {:?}: {}", path.display(), err);
            })
            .and_then(|config| {
                toml::from_str(&config).map_err(|err| {
                    log::error!("Failed to parse config file {:?}: {}", path.display(), err);
                })
            })
            .unwrap_or_default()
    }
}
