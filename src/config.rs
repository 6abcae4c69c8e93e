/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::Floor;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    pub building: BuildingConfig,
    pub elevator: ElevatorConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct BuildingConfig {
    pub elevators: usize,
    pub bottom_floor: Floor,
    pub top_floor: Floor,
}

/// Simulated timing, in milliseconds.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ElevatorConfig {
    pub floor_travel_time: u64,
    pub door_open_time: u64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    pub max_requests: usize,
    pub request_interval: u64,
    pub destination_ratio: f64,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    InvalidFloorRange { bottom: Floor, top: Floor },
    InvalidRatio(f64),
}

/***************************************/
/*          Trait impls                */
/***************************************/
impl Default for BuildingConfig {
    fn default() -> Self {
        BuildingConfig {
            elevators: 2,
            bottom_floor: 0,
            top_floor: 9,
        }
    }
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            floor_travel_time: 1000,
            door_open_time: 1000,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            max_requests: 50,
            request_interval: 1000,
            destination_ratio: 0.0,
        }
    }
}

impl ElevatorConfig {
    pub fn floor_travel_duration(&self) -> Duration {
        Duration::from_millis(self.floor_travel_time)
    }

    pub fn door_open_duration(&self) -> Duration {
        Duration::from_millis(self.door_open_time)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read configuration file: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse configuration file: {}", e),
            ConfigError::InvalidFloorRange { bottom, top } => write!(
                f,
                "bottom floor {} is above top floor {}",
                bottom, top
            ),
            ConfigError::InvalidRatio(ratio) => write!(
                f,
                "destination ratio {} is not within 0.0..=1.0",
                ratio
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path)?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.building.bottom_floor > self.building.top_floor {
            return Err(ConfigError::InvalidFloorRange {
                bottom: self.building.bottom_floor,
                top: self.building.top_floor,
            });
        }
        if !(0.0..=1.0).contains(&self.generator.destination_ratio) {
            return Err(ConfigError::InvalidRatio(self.generator.destination_ratio));
        }
        Ok(())
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
