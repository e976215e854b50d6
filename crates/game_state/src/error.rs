use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameStateError>;

#[derive(Debug, Error)]
pub enum GameStateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid CSV Header: {0}")]
    CsvHeader(String),

    #[error("Invalid CSV row {row}: expected at least {expected} columns, got {got}")]
    CsvRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid {column} at row {row}: {value}")]
    CoordinateParse {
        row: usize,
        column: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error(
        "Boundary has an insufficient number of edges ({edges}), \
         please check that there are {min} or more edges in boundary"
    )]
    InsufficientBoundary { edges: usize, min: usize },

    #[error("Invalid vertical band: z_min ({z_min}) is greater than z_max ({z_max})")]
    InvalidVerticalBand { z_min: f64, z_max: f64 },

    #[error("Data is missing, load game state before processing")]
    MissingData,

    #[error("Stage order error: {0}")]
    StageOrder(String),

    #[error("Failed to create file {path}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for GameStateError {
    fn from(err: toml::de::Error) -> Self {
        GameStateError::Config(format!("TOML parse error: {}", err))
    }
}
