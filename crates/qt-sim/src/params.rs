//! Physical parameters of the quadruple-tank process.
//!
//! All quantities are in the cm/s system: levels in cm, areas in cm², flows in cm³/s.
//! The pump capacity is the one exception and is given in L/min, as on a pump data sheet.

use std::path::Path;

use qt_core::units::{constants, lpm_to_cm3ps};
use qt_core::{ensure_in_range, ensure_positive};
use serde::{Deserialize, Serialize};

use crate::error::SimResult;

/// Parameter set for one simulator instance.
///
/// Missing fields in a config file fall back to the laboratory defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TankParams {
    /// Cross-section of tanks 1..4 (cm²).
    pub tank_area: [f64; 4],
    /// Cross-section of the outlet hole of tanks 1..4 (cm²).
    pub outlet_area: [f64; 4],
    /// Level sensor gain (V/cm). With kc = 1 observations are in cm.
    pub kc: f64,
    /// Gravitational acceleration (cm/s²).
    pub g: f64,
    /// Three-way valve splits: fraction of pump 1 sent to tank 1, of pump 2 sent to tank 2.
    pub gamma: [f64; 2],
    /// Height of each tank (cm).
    pub h_max: f64,
    /// Pump capacity (L/min).
    pub q_max: f64,
    /// Pump gain: flow = k * control signal.
    pub k: f64,
    /// Integration step (seconds).
    pub dt: f64,
}

impl Default for TankParams {
    fn default() -> Self {
        Self {
            tank_area: [28.0, 32.0, 28.0, 32.0],
            outlet_area: [0.071, 0.057, 0.071, 0.057],
            kc: 1.0,
            g: constants::G_CMPS2,
            gamma: [0.7, 0.6],
            h_max: 20.0,
            q_max: 2.5,
            k: 1.0,
            dt: 0.1,
        }
    }
}

impl TankParams {
    /// Check every parameter is finite and physically meaningful.
    pub fn validate(&self) -> SimResult<()> {
        for area in self.tank_area {
            ensure_positive(area, "tank_area")?;
        }
        for area in self.outlet_area {
            ensure_positive(area, "outlet_area")?;
        }
        for gamma in self.gamma {
            ensure_in_range(gamma, 0.0, 1.0, "gamma")?;
        }
        ensure_positive(self.kc, "kc")?;
        ensure_positive(self.g, "g")?;
        ensure_positive(self.h_max, "h_max")?;
        ensure_positive(self.q_max, "q_max")?;
        ensure_positive(self.k, "k")?;
        ensure_positive(self.dt, "dt")?;
        Ok(())
    }

    /// Pump capacity converted to cm³/s.
    pub fn q_max_cm3ps(&self) -> f64 {
        lpm_to_cm3ps(self.q_max)
    }

    /// Upper bound of each action component (pump control signal).
    pub fn action_high(&self) -> f64 {
        self.q_max_cm3ps() / self.k
    }

    /// Upper bound of each observation component (sensor output).
    pub fn observation_high(&self) -> f64 {
        self.h_max / self.kc
    }

    /// Load and validate parameters from a YAML file.
    pub fn load_yaml(path: &Path) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load and validate parameters from a JSON file.
    pub fn load_json(path: &Path) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&content)?;
        params.validate()?;
        Ok(params)
    }

    /// Load from `.json` or YAML depending on the file extension.
    pub fn load(path: &Path) -> SimResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::load_json(path),
            _ => Self::load_yaml(path),
        }
    }

    pub fn from_yaml_str(content: &str) -> SimResult<Self> {
        let params: Self = serde_yaml::from_str(content)?;
        params.validate()?;
        Ok(params)
    }

    /// Validate and write parameters as YAML.
    pub fn save_yaml(&self, path: &Path) -> SimResult<()> {
        self.validate()?;
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
