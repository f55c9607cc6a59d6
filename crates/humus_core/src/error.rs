//! Error types for the soil engine.
//!
//! Physical boundary conditions are never errors: they are clamped where they
//! arise. What remains is bad configuration, malformed forcing and invalid
//! management actions.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SoilError {
    /// Missing or out-of-range physical parameter
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// A forcing value that cannot be clamped (NaN or infinite)
    #[error("Invalid forcing at cell ({x}, {y}): {reason}")]
    InvalidForcing { x: u16, y: u16, reason: String },

    #[error("Forcing covers {actual} cells but the grid has {expected}")]
    ForcingShape { expected: usize, actual: usize },

    #[error("Cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: u16, y: u16 },

    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

pub type SoilResult<T> = std::result::Result<T, SoilError>;

impl SoilError {
    #[must_use]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    #[must_use]
    pub fn invalid_action<S: Into<String>>(msg: S) -> Self {
        Self::InvalidAction(msg.into())
    }

    #[must_use]
    pub fn invalid_forcing<S: Into<String>>(x: u16, y: u16, reason: S) -> Self {
        Self::InvalidForcing {
            x,
            y,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SoilError::config("depth must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: depth must be positive"
        );
    }

    #[test]
    fn test_forcing_error_names_cell() {
        let err = SoilError::invalid_forcing(3, 4, "rain is not finite");
        assert!(err.to_string().contains("(3, 4)"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SoilError = io_err.into();
        assert!(matches!(err, SoilError::FileSystem(_)));
    }
}
