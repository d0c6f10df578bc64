//! File loading for factory configs and plans.
//!
//! Configs may be written as JSON (the canonical `factory_config.json`),
//! RON or TOML; the format is picked from the file extension. Plans are
//! always JSON.

use std::path::{Path, PathBuf};

use parcel_core::config::{ConfigError, FactoryConfig};
use parcel_core::plan::{FactoryPlan, PlanError};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Base name searched for by [`load_factory_config`].
pub const CONFIG_BASE_NAME: &str = "factory_config";

const DEFAULT_CONFIG: &str = include_str!("../assets/factory_config.json");

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading configs and plans from disk.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The config parsed but describes an impossible layout.
    #[error("invalid config in {file}: {source}")]
    InvalidConfig {
        file: PathBuf,
        #[source]
        source: ConfigError,
    },

    /// The plan file was rejected.
    #[error("{file}: {source}")]
    Plan {
        file: PathBuf,
        #[source]
        source: PlanError,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without extension).
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Deserialize `content` as `format`, attributing errors to `file`.
pub fn deserialize_str<T: DeserializeOwned>(
    format: Format,
    content: &str,
    file: &Path,
) -> Result<T, DataLoadError> {
    let parse_err = |detail: String| DataLoadError::Parse {
        file: file.to_path_buf(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    deserialize_str(format, &content, path)
}

// ===========================================================================
// Configs
// ===========================================================================

/// Load and validate a config file of any supported format.
pub fn load_config_file(path: &Path) -> Result<FactoryConfig, DataLoadError> {
    let config: FactoryConfig = deserialize_file(path)?;
    config
        .validate()
        .map_err(|source| DataLoadError::InvalidConfig {
            file: path.to_path_buf(),
            source,
        })?;
    debug!(
        file = %path.display(),
        width = config.width,
        height = config.height,
        trucks = config.trucks.len(),
        outputs = config.outputs.len(),
        "loaded factory config"
    );
    Ok(config)
}

/// Find `factory_config.{ron,toml,json}` in `dir` and load it.
pub fn load_factory_config(dir: &Path) -> Result<FactoryConfig, DataLoadError> {
    let path = require_data_file(dir, CONFIG_BASE_NAME)?;
    load_config_file(&path)
}

/// The 40x20 layout bundled with the crate.
pub fn default_config() -> Result<FactoryConfig, DataLoadError> {
    let file = Path::new("assets/factory_config.json");
    let config: FactoryConfig = deserialize_str(Format::Json, DEFAULT_CONFIG, file)?;
    config
        .validate()
        .map_err(|source| DataLoadError::InvalidConfig {
            file: file.to_path_buf(),
            source,
        })?;
    Ok(config)
}

// ===========================================================================
// Plans
// ===========================================================================

fn require_json(path: &Path) -> Result<(), DataLoadError> {
    match detect_format(path)? {
        Format::Json => Ok(()),
        Format::Ron | Format::Toml => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

fn plan_error(path: &Path, source: PlanError) -> DataLoadError {
    match source {
        PlanError::Io(e) => DataLoadError::Io(e),
        source => DataLoadError::Plan {
            file: path.to_path_buf(),
            source,
        },
    }
}

/// Read a plan document from a `.json` file.
pub fn load_plan_file(path: &Path) -> Result<FactoryPlan, DataLoadError> {
    require_json(path)?;
    let plan = FactoryPlan::load_from_file(path).map_err(|e| plan_error(path, e))?;
    debug!(file = %path.display(), cells = plan.cells.len(), "loaded factory plan");
    Ok(plan)
}

/// Write `plan` as pretty JSON to a `.json` file.
pub fn save_plan_file(path: &Path, plan: &FactoryPlan) -> Result<(), DataLoadError> {
    require_json(path)?;
    plan.save_to_file(path).map_err(|e| plan_error(path, e))?;
    debug!(file = %path.display(), cells = plan.cells.len(), "saved factory plan");
    Ok(())
}
