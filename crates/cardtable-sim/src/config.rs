use cardtable_core::game::layout::{DEFAULT_SEAT_OFFSETS, DEALER_AREA, OverflowStrategy, SeatLayout};
use glam::Vec3;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_MAX_TICKS: u64 = 10_000;
const DEFAULT_VIEWPOINT: [f32; 3] = [0.0, 10.0, 10.0];
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root session configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SessionConfig {
    pub run_id: String,
    pub table: TableConfig,
    #[serde(default)]
    pub rng: RngConfig,
    #[serde(default)]
    pub run: RunConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SessionConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SessionConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.table.validate()?;
        self.run.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve `{run_id}` placeholders into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            transcript: resolve_template(&self.run_id, &self.outputs.transcript),
            snapshot: resolve_template(&self.run_id, &self.outputs.snapshot),
        }
    }
}

/// Seating block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TableConfig {
    pub players: usize,
    #[serde(default = "default_seat_offsets")]
    pub seat_offsets: Vec<f32>,
    #[serde(default)]
    pub overflow: OverflowStrategy,
    #[serde(default = "default_dealer_area")]
    pub dealer_area: [f32; 3],
}

impl TableConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.seat_offsets.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "table.seat_offsets".to_string(),
                message: "at least one seat offset is required".to_string(),
            });
        }

        if !self.seat_offsets.iter().all(|x| x.is_finite()) {
            return Err(ValidationError::InvalidField {
                field: "table.seat_offsets".to_string(),
                message: "seat offsets must be finite".to_string(),
            });
        }

        if !self.dealer_area.iter().all(|x| x.is_finite()) {
            return Err(ValidationError::InvalidField {
                field: "table.dealer_area".to_string(),
                message: "dealer area must be finite".to_string(),
            });
        }

        Ok(())
    }

    pub fn layout(&self) -> SeatLayout {
        SeatLayout::new(self.seat_offsets.clone(), self.overflow)
            .with_dealer_area(Vec3::from_array(self.dealer_area))
    }
}

fn default_seat_offsets() -> Vec<f32> {
    DEFAULT_SEAT_OFFSETS.to_vec()
}

fn default_dealer_area() -> [f32; 3] {
    DEALER_AREA.to_array()
}

/// Shuffle source. Without a seed the operating system RNG is used.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RngConfig {
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Frame loop settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RunConfig {
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
    /// Keep ticking after the opening until every card is at rest.
    #[serde(default = "default_settle")]
    pub settle: bool,
    #[serde(default = "default_viewpoint")]
    pub viewpoint: [f32; 3],
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_ticks: DEFAULT_MAX_TICKS,
            settle: default_settle(),
            viewpoint: DEFAULT_VIEWPOINT,
        }
    }
}

impl RunConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.max_ticks == 0 {
            return Err(ValidationError::InvalidField {
                field: "run.max_ticks".to_string(),
                message: "tick budget must be greater than zero".to_string(),
            });
        }

        if !self.viewpoint.iter().all(|x| x.is_finite()) {
            return Err(ValidationError::InvalidField {
                field: "run.viewpoint".to_string(),
                message: "viewpoint must be finite".to_string(),
            });
        }

        Ok(())
    }
}

fn default_max_ticks() -> u64 {
    DEFAULT_MAX_TICKS
}

fn default_settle() -> bool {
    true
}

fn default_viewpoint() -> [f32; 3] {
    DEFAULT_VIEWPOINT
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub transcript: String,
    pub snapshot: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.transcript", &self.transcript),
            ("outputs.snapshot", &self.snapshot),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub transcript: PathBuf,
    pub snapshot: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
