//! Genetic algorithm configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MdvrpError, Result};

/// How selection weights relate to fitness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPressure {
    /// Weight `(total - fitness) / (total * (population_size - 1))`.
    ///
    /// Favors individuals with lower fitness; elites are still kept by
    /// survivor selection.
    #[default]
    Inverted,
    /// Weight `fitness / total`, the classic roulette wheel.
    Proportional,
}

/// Parameters of a training run.
///
/// # Examples
///
/// ```
/// use mdvrp_ga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_generations(100)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.population_size, 30);
///
/// let bad = GaConfig::default().with_crossover_rate(1.5);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Target population size.
    pub population_size: usize,
    /// Number of generations to run.
    pub generations: usize,
    /// Fraction of the population used as crossover parents.
    pub crossover_rate: f64,
    /// Fraction of the population fed to heuristic mutation.
    pub heuristic_mutate_rate: f64,
    /// Fraction of the population fed to inversion mutation.
    pub inversion_mutate_rate: f64,
    /// Share of the initial population built by random construction.
    pub random_portion: f64,
    /// Individuals guaranteed to survive each generation.
    pub elitism: usize,
    /// Direction of the selection weighting.
    pub selection_pressure: SelectionPressure,
    /// Generations between progress events.
    pub log_interval: usize,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 25,
            generations: 500,
            crossover_rate: 0.4,
            heuristic_mutate_rate: 0.5,
            inversion_mutate_rate: 0.2,
            random_portion: 0.0,
            elitism: 4,
            selection_pressure: SelectionPressure::Inverted,
            log_interval: 10,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Reads a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the heuristic mutation rate.
    pub fn with_heuristic_mutate_rate(mut self, rate: f64) -> Self {
        self.heuristic_mutate_rate = rate;
        self
    }

    /// Sets the inversion mutation rate.
    pub fn with_inversion_mutate_rate(mut self, rate: f64) -> Self {
        self.inversion_mutate_rate = rate;
        self
    }

    /// Sets the random share of the initial population.
    pub fn with_random_portion(mut self, portion: f64) -> Self {
        self.random_portion = portion;
        self
    }

    /// Sets the number of elites.
    pub fn with_elitism(mut self, elitism: usize) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets the selection weighting.
    pub fn with_selection_pressure(mut self, pressure: SelectionPressure) -> Self {
        self.selection_pressure = pressure;
        self
    }

    /// Sets the progress logging interval.
    pub fn with_log_interval(mut self, interval: usize) -> Self {
        self.log_interval = interval;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sum of the three operator rates; sizes the breeding pool.
    pub fn breeding_portion(&self) -> f64 {
        self.crossover_rate + self.heuristic_mutate_rate + self.inversion_mutate_rate
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("crossover_rate", self.crossover_rate),
            ("heuristic_mutate_rate", self.heuristic_mutate_rate),
            ("inversion_mutate_rate", self.inversion_mutate_rate),
            ("random_portion", self.random_portion),
        ];
        for (name, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(MdvrpError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        if self.population_size < 2 {
            return Err(MdvrpError::InvalidConfig(format!(
                "population_size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.elitism >= self.population_size {
            return Err(MdvrpError::InvalidConfig(format!(
                "elitism ({}) must be below population_size ({})",
                self.elitism, self.population_size
            )));
        }
        if self.log_interval == 0 {
            return Err(MdvrpError::InvalidConfig(
                "log_interval must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
