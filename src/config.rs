//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level scenario configuration parsed from TOML.
///
/// Load from TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default. The
/// substation and train lists have no defaults; a scenario must name
/// its entities explicitly.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation timing and global parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Drive-cycle parameters shared by all trains.
    #[serde(default)]
    pub driver: DriverConfig,
    /// Substations to register, in order.
    #[serde(default)]
    pub substations: Vec<SubstationEntry>,
    /// Trains to register, in order.
    #[serde(default)]
    pub trains: Vec<TrainEntry>,
}

/// Simulation timing and global parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of ticks to run (must be > 0).
    pub ticks: usize,
    /// Master random seed for drive cycles.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { ticks: 3, seed: 42 }
    }
}

/// Drive-cycle parameters shared by all trains.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Distance a train covers per tick (km).
    pub speed_km_per_tick: f32,
    /// Minimum ticks a train dwells in one phase (must be > 0).
    pub dwell_ticks_min: usize,
    /// Maximum ticks a train dwells in one phase.
    pub dwell_ticks_max: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            speed_km_per_tick: 2.0,
            dwell_ticks_min: 2,
            dwell_ticks_max: 5,
        }
    }
}

/// One substation in the scenario.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubstationEntry {
    /// Unique substation identifier.
    pub id: String,
    /// Position along the track (km, >= 0).
    pub position_km: f32,
    /// Congestion threshold (MW, > 0).
    pub max_power_mw: f32,
    /// Nominal catenary voltage (kV).
    #[serde(default = "default_nominal_voltage_kv")]
    pub nominal_voltage_kv: f32,
    /// Minimum acceptable catenary voltage (kV).
    #[serde(default = "default_min_voltage_kv")]
    pub min_voltage_kv: f32,
    /// Maximum feeder current (A).
    #[serde(default = "default_max_current_a")]
    pub max_current_a: f32,
}

fn default_nominal_voltage_kv() -> f32 {
    1.5
}

fn default_min_voltage_kv() -> f32 {
    1.0
}

fn default_max_current_a() -> f32 {
    5000.0
}

/// One train in the scenario.
///
/// Only the cruising power is configured; coasting and regenerative
/// braking values are derived from it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainEntry {
    /// Unique train identifier.
    pub id: String,
    /// Initial position along the track (km).
    pub position_km: f32,
    /// Power drawn while cruising (MW, > 0).
    pub cruising_power_mw: f32,
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"substations[1].id"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: two substations 8 km apart and a
    /// single train between them.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            driver: DriverConfig::default(),
            substations: vec![
                substation_entry("SUB_1", 0.0, 5.0),
                substation_entry("SUB_2", 8.0, 5.0),
            ],
            trains: vec![TrainEntry {
                id: "TRAIN_1".to_string(),
                position_km: 4.0,
                cruising_power_mw: 4.0,
            }],
        }
    }

    /// Returns the rush-hour preset: a 40 km corridor with five
    /// substations and four trains pushing the thresholds.
    pub fn rush_hour() -> Self {
        Self {
            simulation: SimulationConfig {
                ticks: 12,
                ..SimulationConfig::default()
            },
            driver: DriverConfig {
                speed_km_per_tick: 3.0,
                ..DriverConfig::default()
            },
            substations: vec![
                substation_entry("SUB_1", 0.0, 6.0),
                substation_entry("SUB_2", 10.0, 6.0),
                substation_entry("SUB_3", 20.0, 6.0),
                substation_entry("SUB_4", 30.0, 6.0),
                substation_entry("SUB_5", 40.0, 6.0),
            ],
            trains: vec![
                train_entry("TRAIN_1", 2.0, 5.0),
                train_entry("TRAIN_2", 12.0, 5.0),
                train_entry("TRAIN_3", 22.0, 5.0),
                train_entry("TRAIN_4", 32.0, 5.0),
            ],
        }
    }

    /// Returns the branch-line preset: sparse supply, so trains drop in
    /// and out of range as they move.
    pub fn branch_line() -> Self {
        Self {
            simulation: SimulationConfig {
                ticks: 10,
                ..SimulationConfig::default()
            },
            driver: DriverConfig {
                speed_km_per_tick: 4.0,
                ..DriverConfig::default()
            },
            substations: vec![
                substation_entry("SUB_1", 0.0, 4.0),
                substation_entry("SUB_2", 30.0, 4.0),
            ],
            trains: vec![
                train_entry("TRAIN_1", 15.0, 3.0),
                train_entry("TRAIN_2", 28.0, 3.0),
            ],
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "rush_hour", "branch_line"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "rush_hour" => Ok(Self::rush_hour()),
            "branch_line" => Ok(Self::branch_line()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid. Duplicate
    /// identifiers are a precondition violation and fail here, before
    /// any entity is registered.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.simulation.ticks == 0 {
            errors.push(ConfigError {
                field: "simulation.ticks".into(),
                message: "must be > 0".into(),
            });
        }

        let d = &self.driver;
        if d.speed_km_per_tick < 0.0 {
            errors.push(ConfigError {
                field: "driver.speed_km_per_tick".into(),
                message: "must be >= 0".into(),
            });
        }
        if d.dwell_ticks_min == 0 {
            errors.push(ConfigError {
                field: "driver.dwell_ticks_min".into(),
                message: "must be > 0".into(),
            });
        }
        if d.dwell_ticks_min > d.dwell_ticks_max {
            errors.push(ConfigError {
                field: "driver.dwell_ticks_min".into(),
                message: "must be <= driver.dwell_ticks_max".into(),
            });
        }

        if self.substations.is_empty() {
            errors.push(ConfigError {
                field: "substations".into(),
                message: "at least one substation is required".into(),
            });
        }
        for (i, sub) in self.substations.iter().enumerate() {
            if sub.id.is_empty() {
                errors.push(ConfigError {
                    field: format!("substations[{i}].id"),
                    message: "must not be empty".into(),
                });
            }
            if self.substations[..i].iter().any(|s| s.id == sub.id) {
                errors.push(ConfigError {
                    field: format!("substations[{i}].id"),
                    message: format!("duplicate id \"{}\"", sub.id),
                });
            }
            if !sub.position_km.is_finite() || sub.position_km < 0.0 {
                errors.push(ConfigError {
                    field: format!("substations[{i}].position_km"),
                    message: "must be finite and >= 0".into(),
                });
            }
            if !sub.max_power_mw.is_finite() || sub.max_power_mw <= 0.0 {
                errors.push(ConfigError {
                    field: format!("substations[{i}].max_power_mw"),
                    message: "must be finite and > 0".into(),
                });
            }
            if sub.min_voltage_kv > sub.nominal_voltage_kv {
                errors.push(ConfigError {
                    field: format!("substations[{i}].min_voltage_kv"),
                    message: "must be <= nominal_voltage_kv".into(),
                });
            }
        }

        for (i, train) in self.trains.iter().enumerate() {
            if train.id.is_empty() {
                errors.push(ConfigError {
                    field: format!("trains[{i}].id"),
                    message: "must not be empty".into(),
                });
            }
            if self.trains[..i].iter().any(|t| t.id == train.id) {
                errors.push(ConfigError {
                    field: format!("trains[{i}].id"),
                    message: format!("duplicate id \"{}\"", train.id),
                });
            }
            if !train.position_km.is_finite() {
                errors.push(ConfigError {
                    field: format!("trains[{i}].position_km"),
                    message: "must be finite".into(),
                });
            }
            if !train.cruising_power_mw.is_finite() || train.cruising_power_mw <= 0.0 {
                errors.push(ConfigError {
                    field: format!("trains[{i}].cruising_power_mw"),
                    message: "must be finite and > 0".into(),
                });
            }
        }

        errors
    }
}

fn substation_entry(id: &str, position_km: f32, max_power_mw: f32) -> SubstationEntry {
    SubstationEntry {
        id: id.to_string(),
        position_km,
        max_power_mw,
        nominal_voltage_kv: default_nominal_voltage_kv(),
        min_voltage_kv: default_min_voltage_kv(),
        max_current_a: default_max_current_a(),
    }
}

fn train_entry(id: &str, position_km: f32, cruising_power_mw: f32) -> TrainEntry {
    TrainEntry {
        id: id.to_string(),
        position_km,
        cruising_power_mw,
    }
}
