//! Error taxonomy shared by every stage of the filter.
//!
//! Configuration problems are reported eagerly, before the first pass runs.
//! `IndexOutOfRange` signals a geometry or caller bug (a tile or mask that
//! does not fit the image); it never depends on the environment. The I/O
//! variants only surface from the file helpers used by the binaries.
use thiserror::Error;

/// Errors produced by the tilt-shift filter and its I/O helpers.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TiltShiftError {
    /// A parameter is outside its valid range (radius, pass count, grade
    /// values, tile size, image dimensions, channel count).
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
    /// A computed coordinate escaped the image after clamping.
    #[error("coordinate ({x}, {y}) outside {width}x{height} image")]
    IndexOutOfRange {
        x: isize,
        y: isize,
        width: usize,
        height: usize,
    },
    /// Reading or writing a file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The `image` crate could not decode or encode a file.
    #[error("image codec error for {path}: {source}")]
    Codec {
        path: String,
        #[source]
        source: image::ImageError,
    },
    /// A JSON document could not be parsed or produced.
    #[error("JSON error for {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TiltShiftError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TiltShiftError>;
