//! Error types for growth evaluation support code.
//!
//! The growth engine itself is total and never fails. Everything around it
//! that parses, loads or looks things up reports failures through the
//! `GrowthError` enum.

use crate::cache::ProfileId;
use thiserror::Error;

/// Errors produced by curve construction, lookups and data loading.
///
/// # Examples
///
/// ```rust
/// use statcurve::GrowthError;
///
/// let err = GrowthError::UnknownRank("LR".to_string());
/// println!("{}", err); // "Unknown rank: LR"
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GrowthError {
    /// A keyframe was given a time that is NaN or infinite.
    ///
    /// Key times must be ordered, so they have to be finite.
    #[error("Invalid keyframe time: {0}")]
    InvalidKeyframe(f64),

    /// A profile field holds NaN or an infinity.
    ///
    /// Only reported by `StatProfile::validate`; the engine itself
    /// propagates non-finite values.
    #[error("Non-finite value in field: {field}")]
    NonFinite { field: &'static str },

    /// A rank name did not match R, SR, SSR or UR.
    #[error("Unknown rank: {0}")]
    UnknownRank(String),

    /// A stat name did not match STR, DEX or LUK.
    #[error("Unknown stat: {0}")]
    UnknownStat(String),

    /// No profile is registered under this id.
    #[error("Unknown profile: {0}")]
    UnknownProfile(ProfileId),

    /// JSON text could not be parsed.
    #[error("Failed to parse {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// A file could not be read or written.
    #[error("I/O error at {path}: {message}")]
    Io { path: String, message: String },
}

impl GrowthError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        GrowthError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn parse(source_name: impl Into<String>, err: serde_json::Error) -> Self {
        GrowthError::Parse {
            source_name: source_name.into(),
            message: err.to_string(),
        }
    }
}
