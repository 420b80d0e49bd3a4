use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::triangulation::DEFAULT_SUPER_TRIANGLE_SCALE;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Knobs of the airwire computation. Missing fields in a settings file take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirwireSettings {
    /// Skip plane fragment connectivity and rely on tracks and triangulation only.
    pub fast: bool,
    /// How far, in multiples of the point set's extent, the triangulation's enclosing
    /// super-triangle reaches out.
    pub super_triangle_scale: f64,
    /// Largest sine of the deviation angle under which a net's points still count as lying on
    /// one line and are chained instead of triangulated.
    pub collinear_tolerance: f64,
}

impl Default for AirwireSettings {
    fn default() -> Self {
        Self {
            fast: false,
            super_triangle_scale: DEFAULT_SUPER_TRIANGLE_SCALE,
            collinear_tolerance: 1e-6,
        }
    }
}

impl AirwireSettings {
    pub fn fast() -> Self {
        Self {
            fast: true,
            ..Self::default()
        }
    }

    pub fn load(reader: impl Read) -> Result<Self, SettingsError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let file = File::open(path)?;
        Self::load(BufReader::new(file))
    }
}
