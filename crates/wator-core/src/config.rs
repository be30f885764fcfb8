use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::{error::Error, fmt};

/// How the movement sweep treats the rest of a row once a victim has been handled.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VictimSweep {
    /// Every cell occupied at the start of the pass is evaluated once, and each
    /// individual moves at most once per iteration.
    #[default]
    EveryCell,
    /// Live row-major scan of the grid, as in the legacy model. Once a victim
    /// is processed, the rest of its row is skipped. Individuals that moved
    /// ahead of the scan are visited again.
    RowBreak,
}

impl VictimSweep {
    pub fn as_str(self) -> &'static str {
        match self {
            VictimSweep::EveryCell => "every_cell",
            VictimSweep::RowBreak => "row_break",
        }
    }
}

impl fmt::Display for VictimSweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VictimSweep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "every_cell" => Ok(VictimSweep::EveryCell),
            "row_break" => Ok(VictimSweep::RowBreak),
            other => Err(format!(
                "unknown victim sweep '{other}' (expected 'every_cell' or 'row_break')"
            )),
        }
    }
}

fn default_seed() -> u64 {
    42
}

fn default_iterations() -> usize {
    1000
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimConfig {
    /// Deterministic seed for initial placement and every neighbour choice.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Number of predators placed at initialization.
    pub predators: usize,
    /// Number of victims (prey) placed at initialization.
    pub victims: usize,
    /// Number of immovable barrier cells placed at initialization.
    pub barriers: usize,
    /// Width/height of the square, non-wrapping ocean in cells.
    #[serde(alias = "ocean.size")]
    pub ocean_size: usize,
    /// Iterations an individual waits between reproduction events.
    #[serde(alias = "reproduction.frequency")]
    pub reproduction_frequency: usize,
    /// Iterations a predator survives without feeding.
    #[serde(alias = "predator.hunger.threshold")]
    pub predator_hunger_threshold: usize,
    /// Number of iterations the driver runs.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub victim_sweep: VictimSweep,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            predators: 100,
            victims: 500,
            barriers: 50,
            ocean_size: 100,
            reproduction_frequency: 10,
            predator_hunger_threshold: 11,
            iterations: default_iterations(),
            victim_sweep: VictimSweep::EveryCell,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimConfigError {
    InvalidOceanSize { max: usize, actual: usize },
    InvalidReproductionFrequency,
    InvalidHungerThreshold,
    InvalidIterations,
    PopulationOverflow,
    Oversubscribed { capacity: usize, requested: usize },
}

impl fmt::Display for SimConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimConfigError::InvalidOceanSize { max, actual } => {
                write!(f, "ocean_size must be in 1..={max} (got {actual})")
            }
            SimConfigError::InvalidReproductionFrequency => {
                write!(f, "reproduction_frequency must be positive")
            }
            SimConfigError::InvalidHungerThreshold => {
                write!(f, "predator_hunger_threshold must be positive")
            }
            SimConfigError::InvalidIterations => write!(f, "iterations must be positive"),
            SimConfigError::PopulationOverflow => {
                write!(f, "predators + victims + barriers overflows usize")
            }
            SimConfigError::Oversubscribed {
                capacity,
                requested,
            } => write!(
                f,
                "predators + victims + barriers ({requested}) exceeds ocean capacity ({capacity})"
            ),
        }
    }
}

impl Error for SimConfigError {}

impl SimConfig {
    pub const MAX_OCEAN_SIZE: usize = 4096;

    /// Total number of cells in the ocean.
    pub fn capacity(&self) -> usize {
        self.ocean_size * self.ocean_size
    }

    /// Number of cells requested by the initial populations, if it fits in `usize`.
    pub fn requested_cells(&self) -> Option<usize> {
        self.predators
            .checked_add(self.victims)?
            .checked_add(self.barriers)
    }

    pub fn validate(&self) -> Result<(), SimConfigError> {
        if self.ocean_size == 0 || self.ocean_size > Self::MAX_OCEAN_SIZE {
            return Err(SimConfigError::InvalidOceanSize {
                max: Self::MAX_OCEAN_SIZE,
                actual: self.ocean_size,
            });
        }
        if self.reproduction_frequency == 0 {
            return Err(SimConfigError::InvalidReproductionFrequency);
        }
        if self.predator_hunger_threshold == 0 {
            return Err(SimConfigError::InvalidHungerThreshold);
        }
        if self.iterations == 0 {
            return Err(SimConfigError::InvalidIterations);
        }
        let requested = self
            .requested_cells()
            .ok_or(SimConfigError::PopulationOverflow)?;
        let capacity = self.capacity();
        if requested > capacity {
            return Err(SimConfigError::Oversubscribed {
                capacity,
                requested,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn legacy_property_names_deserialize() {
        let legacy_json = r#"{
            "predators": 100,
            "victims": 0,
            "barriers": 0,
            "ocean.size": 100,
            "reproduction.frequency": 10,
            "predator.hunger.threshold": 11
        }"#;
        let cfg: SimConfig = serde_json::from_str(legacy_json).expect("legacy config should parse");
        assert_eq!(cfg.ocean_size, 100);
        assert_eq!(cfg.reproduction_frequency, 10);
        assert_eq!(cfg.predator_hunger_threshold, 11);
        assert_eq!(cfg.iterations, 1000);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.victim_sweep, VictimSweep::EveryCell);
    }

    #[test]
    fn missing_population_field_is_rejected() {
        let json = r#"{
            "predators": 1,
            "barriers": 0,
            "ocean_size": 10,
            "reproduction_frequency": 10,
            "predator_hunger_threshold": 11
        }"#;
        let err = serde_json::from_str::<SimConfig>(json).unwrap_err();
        assert!(err.to_string().contains("victims"), "unexpected error: {err}");
    }

    #[test]
    fn non_numeric_and_negative_fields_are_rejected() {
        let non_numeric = r#"{"predators": "many", "victims": 0, "barriers": 0,
            "ocean_size": 10, "reproduction_frequency": 1, "predator_hunger_threshold": 1}"#;
        assert!(serde_json::from_str::<SimConfig>(non_numeric).is_err());
        let negative = r#"{"predators": -1, "victims": 0, "barriers": 0,
            "ocean_size": 10, "reproduction_frequency": 1, "predator_hunger_threshold": 1}"#;
        assert!(serde_json::from_str::<SimConfig>(negative).is_err());
    }

    #[test]
    fn victim_sweep_serializes_snake_case() {
        let cfg = SimConfig {
            victim_sweep: VictimSweep::RowBreak,
            ..SimConfig::default()
        };
        let json = serde_json::to_string(&cfg).expect("config should serialize");
        assert!(json.contains("\"victim_sweep\":\"row_break\""));
        let back: SimConfig = serde_json::from_str(&json).expect("config should round-trip");
        assert_eq!(back, cfg);
    }

    #[test]
    fn victim_sweep_parses_from_cli_spelling() {
        assert_eq!("row-break".parse::<VictimSweep>(), Ok(VictimSweep::RowBreak));
        assert_eq!("EVERY_CELL".parse::<VictimSweep>(), Ok(VictimSweep::EveryCell));
        assert!("diagonal".parse::<VictimSweep>().is_err());
    }

    #[test]
    fn oversubscribed_ocean_is_rejected() {
        let cfg = SimConfig {
            ocean_size: 3,
            predators: 4,
            victims: 4,
            barriers: 2,
            ..SimConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(SimConfigError::Oversubscribed {
                capacity: 9,
                requested: 10
            })
        );
    }

    #[test]
    fn full_ocean_is_accepted() {
        let cfg = SimConfig {
            ocean_size: 3,
            predators: 3,
            victims: 3,
            barriers: 3,
            ..SimConfig::default()
        };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn zero_parameters_are_rejected() {
        let base = SimConfig::default();
        assert!(matches!(
            SimConfig {
                ocean_size: 0,
                ..base.clone()
            }
            .validate(),
            Err(SimConfigError::InvalidOceanSize { .. })
        ));
        assert_eq!(
            SimConfig {
                reproduction_frequency: 0,
                ..base.clone()
            }
            .validate(),
            Err(SimConfigError::InvalidReproductionFrequency)
        );
        assert_eq!(
            SimConfig {
                predator_hunger_threshold: 0,
                ..base.clone()
            }
            .validate(),
            Err(SimConfigError::InvalidHungerThreshold)
        );
        assert_eq!(
            SimConfig {
                iterations: 0,
                ..base
            }
            .validate(),
            Err(SimConfigError::InvalidIterations)
        );
    }

    #[test]
    fn population_overflow_is_rejected() {
        let cfg = SimConfig {
            predators: usize::MAX,
            victims: 1,
            ..SimConfig::default()
        };
        assert_eq!(cfg.validate(), Err(SimConfigError::PopulationOverflow));
    }
}
