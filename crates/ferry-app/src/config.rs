//! Configuration management for ferry-crossing
//!
//! Config stored at: ~/.config/ferry-crossing/config.toml

use ferry_domain::model::Fleet;
use ferry_types::{ConfigError, OutputFormat, Port, Result, VehicleClass, GATES_PER_PORT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Simulated delays in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delays {
    /// Time a vehicle holds a toll gate
    #[serde(default = "default_toll_ms")]
    pub toll_ms: u64,

    /// Time to roll everything off the ferry
    #[serde(default = "default_unload_ms")]
    pub unload_ms: u64,

    /// Time to load one vehicle
    #[serde(default = "default_load_ms")]
    pub load_ms: u64,

    /// Time for one crossing
    #[serde(default = "default_crossing_ms")]
    pub crossing_ms: u64,

    /// Longest the ferry waits before re-polling when nobody is queued
    #[serde(default = "default_idle_ms")]
    pub idle_ms: u64,
}

fn default_toll_ms() -> u64 {
    1000
}

fn default_unload_ms() -> u64 {
    2000
}

fn default_load_ms() -> u64 {
    1000
}

fn default_crossing_ms() -> u64 {
    3000
}

fn default_idle_ms() -> u64 {
    1000
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            toll_ms: default_toll_ms(),
            unload_ms: default_unload_ms(),
            load_ms: default_load_ms(),
            crossing_ms: default_crossing_ms(),
            idle_ms: default_idle_ms(),
        }
    }
}

/// Floor for the idle wait so a zero time scale does not spin the ferry
const MIN_IDLE: Duration = Duration::from_millis(1);

/// `ms` multiplied by `scale`, or `None` if that is not a valid `Duration`
fn scale_delay(ms: u64, scale: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(Duration::from_millis(ms).as_secs_f64() * scale).ok()
}

/// Delays after applying the time scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub toll: Duration,
    pub unload: Duration,
    pub load: Duration,
    pub crossing: Duration,
    pub idle: Duration,
}

impl Timings {
    /// All delays zero, for tests that only care about ordering
    pub fn instant() -> Self {
        Self {
            toll: Duration::ZERO,
            unload: Duration::ZERO,
            load: Duration::ZERO,
            crossing: Duration::ZERO,
            idle: Duration::ZERO,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_cars")]
    pub cars: u32,

    #[serde(default = "default_minibuses")]
    pub minibuses: u32,

    #[serde(default = "default_trucks")]
    pub trucks: u32,

    /// Ferry capacity in units (car=1, minibus=2, truck=3)
    #[serde(default = "default_ferry_capacity")]
    pub ferry_capacity: u32,

    /// Toll gates per port. Only 2 is supported.
    #[serde(default = "default_gates_per_port")]
    pub gates_per_port: u8,

    /// Port the ferry starts at; random if unset
    #[serde(default)]
    pub start_port: Option<Port>,

    /// RNG seed; drawn from entropy if unset
    #[serde(default)]
    pub seed: Option<u64>,

    /// Multiplier applied to every delay (0.0 = no waiting)
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,

    /// Keep running after the last vehicle queued until everyone crossed
    #[serde(default)]
    pub drain: bool,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    #[serde(default)]
    pub delays: Delays,
}

fn default_cars() -> u32 {
    12
}

fn default_minibuses() -> u32 {
    10
}

fn default_trucks() -> u32 {
    8
}

fn default_ferry_capacity() -> u32 {
    20
}

fn default_gates_per_port() -> u8 {
    GATES_PER_PORT
}

fn default_time_scale() -> f64 {
    1.0
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cars: default_cars(),
            minibuses: default_minibuses(),
            trucks: default_trucks(),
            ferry_capacity: default_ferry_capacity(),
            gates_per_port: default_gates_per_port(),
            start_port: None,
            seed: None,
            time_scale: default_time_scale(),
            drain: false,
            output_format: default_output_format(),
            delays: Delays::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("ferry-crossing");
        Ok(config_dir)
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, or defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn fleet(&self) -> Fleet {
        Fleet {
            cars: self.cars,
            minibuses: self.minibuses,
            trucks: self.trucks,
        }
    }

    /// Reject settings under which the simulation cannot behave sensibly
    pub fn validate(&self) -> Result<()> {
        if self.ferry_capacity == 0 {
            return Err(ConfigError::Invalid("ferry_capacity must be at least 1".into()).into());
        }
        if self.gates_per_port != GATES_PER_PORT {
            return Err(ConfigError::Invalid(format!(
                "gates_per_port must be {}, got {}",
                GATES_PER_PORT, self.gates_per_port
            ))
            .into());
        }
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "time_scale must be a non-negative number, got {}",
                self.time_scale
            ))
            .into());
        }

        let delays = [
            ("toll_ms", self.delays.toll_ms),
            ("unload_ms", self.delays.unload_ms),
            ("load_ms", self.delays.load_ms),
            ("crossing_ms", self.delays.crossing_ms),
            ("idle_ms", self.delays.idle_ms),
        ];
        for (name, ms) in delays {
            if scale_delay(ms, self.time_scale).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "{} of {} scaled by {} is out of range",
                    name, ms, self.time_scale
                ))
                .into());
            }
        }

        let fleet = self.fleet();
        if fleet.total().is_none() {
            return Err(ConfigError::Invalid(format!(
                "fleet of {} cars, {} minibuses and {} trucks is too large",
                fleet.cars, fleet.minibuses, fleet.trucks
            ))
            .into());
        }

        // A vehicle larger than the ferry would block its queue forever
        for class in VehicleClass::ALL {
            if fleet.count(class) > 0 && class.units() > self.ferry_capacity {
                return Err(ConfigError::Invalid(format!(
                    "a {} needs {} units but ferry_capacity is {}",
                    class,
                    class.units(),
                    self.ferry_capacity
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Scaled delays. Out-of-range values, which `validate` rejects,
    /// saturate to `Duration::MAX`.
    pub fn timings(&self) -> Timings {
        let scale = |ms: u64| scale_delay(ms, self.time_scale).unwrap_or(Duration::MAX);
        Timings {
            toll: scale(self.delays.toll_ms),
            unload: scale(self.delays.unload_ms),
            load: scale(self.delays.load_ms),
            crossing: scale(self.delays.crossing_ms),
            idle: scale(self.delays.idle_ms).max(MIN_IDLE),
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Ferry Crossing Configuration")?;
        writeln!(f, "============================")?;
        writeln!(f)?;
        writeln!(f, "Cars:           {}", self.cars)?;
        writeln!(f, "Minibuses:      {}", self.minibuses)?;
        writeln!(f, "Trucks:         {}", self.trucks)?;
        writeln!(f, "Ferry capacity: {} units", self.ferry_capacity)?;
        writeln!(f, "Gates per port: {}", self.gates_per_port)?;
        writeln!(
            f,
            "Start port:     {}",
            self.start_port
                .map(|p| p.to_string())
                .unwrap_or_else(|| "(random)".to_string())
        )?;
        writeln!(
            f,
            "Seed:           {}",
            self.seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "(random)".to_string())
        )?;
        writeln!(f, "Time scale:     {}", self.time_scale)?;
        writeln!(f, "Drain:          {}", self.drain)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f)?;
        writeln!(
            f,
            "Delays (ms):    toll {} / unload {} / load {} / crossing {} / idle {}",
            self.delays.toll_ms,
            self.delays.unload_ms,
            self.delays.load_ms,
            self.delays.crossing_ms,
            self.delays.idle_ms
        )?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
