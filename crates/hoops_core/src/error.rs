use thiserror::Error;

/// Failures outside the tick loop: roster validation, config loading and the
/// JSON API. A running tick never returns an error.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Invalid team size for {team}: expected {expected}, found {found}")]
    InvalidTeamSize { team: String, expected: usize, found: usize },

    #[error("Rating {field} of {player} out of range: {value}")]
    RatingOutOfRange { player: String, field: &'static str, value: f32 },

    #[error("Invalid player: {0}")]
    InvalidPlayer(String),

    #[error("Invalid team index: {0}")]
    InvalidTeam(usize),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u8),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
