//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`NBS_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use nbody_math::Vec3;
use nbody_physics::GravityParams;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gravity and time stepping
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Initial bodies of the Sun/Earth/Moon scene
    #[serde(default)]
    pub scenario: ScenarioConfig,
    /// Headless frame loop
    #[serde(default)]
    pub host: HostConfig,
    /// Parameter panel overrides applied at startup (key -> value)
    #[serde(default)]
    pub parameters: BTreeMap<String, f32>,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`NBS_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // NBS_SIMULATION__TIME_STEP=0.5 -> simulation.time_step = 0.5
        figment = figment.merge(Env::prefixed("NBS_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Gravity and stepping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Gravitational constant
    pub gravity_constant: f32,
    /// Distance multiplier applied before the inverse-square law
    pub distance_ratio: f32,
    /// Simulated time advanced per frame
    pub time_step: f32,
    /// Start integrating immediately instead of waiting for a start command
    pub autostart: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity_constant: 0.01,
            distance_ratio: 100.0,
            time_step: 1.0,
            autostart: true,
        }
    }
}

impl SimulationConfig {
    /// Convert to the physics crate's gravity parameters
    pub fn to_gravity_params(&self) -> GravityParams {
        GravityParams::new(self.gravity_constant, self.distance_ratio)
    }
}

/// Initial conditions of the reference scene
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub sun_mass: f32,
    pub earth_mass: f32,
    pub moon_mass: f32,
    /// Sun position [x, y, z]; the earth and moon are placed above it on +Y
    pub sun_position: Vec3,
    pub earth_sun_distance: f32,
    pub earth_moon_distance: f32,
    /// Earth starting velocity [x, y, z]
    pub earth_velocity: Vec3,
    /// Moon starting velocity [x, y, z]
    pub moon_velocity: Vec3,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            sun_mass: 10_000_000.0,
            earth_mass: 10_000.0,
            moon_mass: 10.0,
            sun_position: Vec3::new(0.0, 0.0, -300.0),
            earth_sun_distance: 80.0,
            earth_moon_distance: 7.0,
            earth_velocity: Vec3::new(0.35, 0.0, 0.0),
            moon_velocity: Vec3::new(0.4, 0.0, 0.0),
        }
    }
}

/// Headless host loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Number of frames to run before exiting
    pub frames: u64,
    /// Log body positions every N frames (0 = never)
    pub report_interval: u64,
    /// Key presses replayed at given frames, e.g. `{ frame = 300, key = "r" }`
    pub script: Vec<ScriptedKey>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            report_interval: 60,
            script: Vec::new(),
        }
    }
}

/// A key press the headless host feeds to the input mapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedKey {
    /// Frame index (0-based) at which the key is pressed, before that frame's tick
    pub frame: u64,
    /// Key name, see `InputMapper::map_key`
    pub key: String,
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.simulation.gravity_constant, 0.01);
        assert_eq!(config.simulation.distance_ratio, 100.0);
        assert_eq!(config.scenario.sun_mass, 10_000_000.0);
        assert_eq!(config.host.frames, 600);
        assert!(config.parameters.is_empty());
    }

    #[test]
    fn test_to_gravity_params() {
        let params = SimulationConfig::default().to_gravity_params();
        assert_eq!(params, GravityParams::new(0.01, 100.0));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("gravity_constant"));
        assert!(toml.contains("earth_moon_distance"));
    }

    #[test]
    fn test_partial_toml_uses_section_defaults() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string("[host]\nframes = 5\nreport_interval = 1\n"))
            .extract()
            .unwrap();
        assert_eq!(config.host.frames, 5);
        assert_eq!(config.simulation.time_step, 1.0);
        assert_eq!(config.scenario.moon_velocity, Vec3::new(0.4, 0.0, 0.0));
        assert!(config.host.script.is_empty());
    }

    #[test]
    fn test_scenario_vectors_are_arrays() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string("[scenario]\nsun_position = [1.0, 2.0, 3.0]\n"))
            .extract()
            .unwrap();
        assert_eq!(config.scenario.sun_position, Vec3::new(1.0, 2.0, 3.0));

        let toml = toml::to_string(&config.scenario).unwrap();
        assert!(toml.contains("sun_position = ["), "got {}", toml);
    }

    #[test]
    fn test_host_script_parsing() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string(
                "[host]\nscript = [{ frame = 0, key = \"space\" }, { frame = 30, key = \"r\" }]\n",
            ))
            .extract()
            .unwrap();
        assert_eq!(config.host.frames, 600);
        assert_eq!(
            config.host.script,
            vec![
                ScriptedKey {
                    frame: 0,
                    key: "space".to_string()
                },
                ScriptedKey {
                    frame: 30,
                    key: "r".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_missing_directory_yields_defaults() {
        let config = AppConfig::load_from("does/not/exist").unwrap();
        assert!(config.simulation.autostart);
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let result: Result<AppConfig, ConfigError> = Figment::new()
            .merge(Toml::string("[simulation]\ntime_step = \"fast\"\n"))
            .extract()
            .map_err(ConfigError::from);
        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
