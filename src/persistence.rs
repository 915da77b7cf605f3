/*
 * Persistence Module
 *
 * Loads and saves the flat key-value snapshot of SimulationParams as JSON.
 * Only parameters are persisted; agent state never is.
 */

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::info;

use crate::error::PersistError;
use crate::params::SimulationParams;

/// Read parameters from `path`. A missing file yields the defaults, missing keys keep
/// their defaults, unknown keys are ignored and every value is clamped into range.
pub fn load(path: &Path) -> Result<SimulationParams, PersistError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no parameter file, using defaults");
            return Ok(SimulationParams::default());
        }
        Err(err) => return Err(err.into()),
    };

    let params: SimulationParams = serde_json::from_str(&text)?;
    info!(path = %path.display(), "loaded parameters");
    Ok(params.sanitized())
}

pub fn save(path: &Path, params: &SimulationParams) -> Result<(), PersistError> {
    let text = serde_json::to_string_pretty(params)?;
    fs::write(path, text)?;
    Ok(())
}
