//! # Settings Module
//!
//! ## Purpose
//! Run configuration of the reaction dynamics tool: integration interval, the initial
//! concentrations to scan, solver tolerances, random seed and output locations.
//!
//! ## Configuration File
//! Settings are read from `kinet_settings.json` in the working directory when it exists,
//! otherwise defaults are used and written to that file so they can be edited for the next run.
//! Every field is optional in the file.
//! ```json
//! {
//!   "time_span": [0.0, 10.0],
//!   "initial_concentration_range": [0.1, 0.5, 1.0, 2.0],
//!   "background_concentration": 0.1,
//!   "n_samples": 100,
//!   "rtol": 0.001,
//!   "atol": 1e-6,
//!   "seed": 42,
//!   "plot_dir": "plots",
//!   "kegg_base_url": "https://rest.kegg.jp",
//!   "log_level": "info"
//! }
//! ```
//!
//! ## Usage
//! ```rust
//! use KiNet::settings::Settings;
//! let settings = Settings::default();
//! assert_eq!(settings.n_samples, 100);
//! assert!(settings.validate().is_ok());
//! ```
use crate::DBhandlers::kegg_api::KEGG_REST_URL;
use crate::ReactionDynamics::ode_integrator::SolverOptions;
use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const SETTINGS_FILE: &str = "kinet_settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub time_span: (f64, f64),
    /// one simulation run per value
    pub initial_concentration_range: Vec<f64>,
    /// concentration given to the remaining entries of the initial vector
    pub background_concentration: f64,
    pub n_samples: usize,
    pub rtol: f64,
    pub atol: f64,
    /// fixed seed for equilibrium constants, entropy seeded when None
    pub seed: Option<u64>,
    pub plot_dir: PathBuf,
    pub kegg_base_url: String,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_span: (0.0, 10.0),
            initial_concentration_range: vec![0.1, 0.5, 1.0, 2.0],
            background_concentration: 0.1,
            n_samples: 100,
            rtol: 1e-3,
            atol: 1e-6,
            seed: None,
            plot_dir: PathBuf::from("plots"),
            kegg_base_url: KEGG_REST_URL.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }
    /// reads the file if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            info!("loading settings from {}", path.display());
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// like `load_or_default`, a missing file is created with the defaults; failing to write it
    /// is only logged
    pub fn load_or_create(path: &Path) -> Result<Self, SettingsError> {
        let settings = Self::load_or_default(path)?;
        if !path.exists() {
            match settings.save(path) {
                Ok(()) => info!("default settings written to {}", path.display()),
                Err(e) => warn!("could not write {}: {}", path.display(), e),
            }
        }
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let (t0, t1) = self.time_span;
        if !t0.is_finite() || !t1.is_finite() || t1 < t0 {
            return Err(SettingsError::Invalid(format!(
                "time_span ({}, {}) must be finite and increasing",
                t0, t1
            )));
        }
        if self.n_samples < 2 {
            return Err(SettingsError::Invalid(
                "n_samples must be at least 2".to_string(),
            ));
        }
        if !(self.rtol > 0.0 && self.atol > 0.0) {
            return Err(SettingsError::Invalid(
                "rtol and atol must be positive".to_string(),
            ));
        }
        let negative = self
            .initial_concentration_range
            .iter()
            .chain(std::iter::once(&self.background_concentration))
            .any(|c| !c.is_finite() || *c < 0.0);
        if negative {
            return Err(SettingsError::Invalid(
                "concentrations must be finite and non-negative".to_string(),
            ));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, SettingsError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| SettingsError::Invalid(format!("unknown log level {}", self.log_level)))
    }

    pub fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            rtol: self.rtol,
            atol: self.atol,
            n_samples: self.n_samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.time_span, (0.0, 10.0));
        assert_eq!(settings.initial_concentration_range, vec![0.1, 0.5, 1.0, 2.0]);
        assert_eq!(settings.level_filter().unwrap(), LevelFilter::Info);
        let options = settings.solver_options();
        assert_eq!(options.n_samples, 100);
        assert_eq!(options.rtol, 1e-3);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "seed": 42, "time_span": [0.0, 5.0] }}"#).unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.time_span, (0.0, 5.0));
        assert_eq!(settings.n_samples, 100);
        assert_eq!(settings.kegg_base_url, KEGG_REST_URL);
    }

    #[test]
    fn test_save_and_load() {
        let file = NamedTempFile::new().unwrap();
        let settings = Settings {
            seed: Some(7),
            initial_concentration_range: vec![1.0],
            ..Settings::default()
        };
        settings.save(file.path()).unwrap();
        assert_eq!(Settings::load(file.path()).unwrap(), settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(&dir.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let settings = Settings::load_or_create(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.exists());
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());

        // an existing file is read, not overwritten
        let edited = Settings {
            seed: Some(1),
            ..Settings::default()
        };
        edited.save(&path).unwrap();
        assert_eq!(Settings::load_or_create(&path).unwrap(), edited);
    }

    #[test]
    fn test_invalid_values() {
        let bad_span = Settings {
            time_span: (10.0, 0.0),
            ..Settings::default()
        };
        assert!(matches!(bad_span.validate(), Err(SettingsError::Invalid(_))));
        let bad_samples = Settings {
            n_samples: 1,
            ..Settings::default()
        };
        assert!(bad_samples.validate().is_err());
        let negative = Settings {
            initial_concentration_range: vec![0.5, -1.0],
            ..Settings::default()
        };
        assert!(negative.validate().is_err());
        let bad_level = Settings {
            log_level: "loud".to_string(),
            ..Settings::default()
        };
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_broken_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            Settings::load(file.path()),
            Err(SettingsError::Json(_))
        ));
    }
}
