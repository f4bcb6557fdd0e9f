//! Error types for phyllo-viz operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating or rendering a flower.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for framebuffer or plot.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Data length mismatch between x and y arrays.
    #[error("Data length mismatch: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        /// Length of x data.
        x_len: usize,
        /// Length of y data.
        y_len: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// A numeric parameter outside its valid range.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Aesthetic mapped to a column the data does not have.
    #[error("Unknown column `{0}` in aesthetic mapping")]
    UnknownColumn(String),

    /// Styling value rejected at build time (alpha, size, stroke).
    #[error("Invalid {aesthetic}: {value} ({reason})")]
    InvalidStyle {
        /// Aesthetic name.
        aesthetic: &'static str,
        /// Offending value.
        value: f32,
        /// Accepted range.
        reason: &'static str,
    },

    /// Point shape code with no matching shape.
    #[error("Invalid point shape code: {0}")]
    InvalidShape(String),

    /// Scale domain error (e.g., empty extent).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Unknown preset name.
    #[error("Unknown preset `{0}`")]
    UnknownPreset(String),

    /// Configuration file not found or unreadable.
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    /// Configuration file failed to parse.
    #[error("Config parse error at line {line}: {message}")]
    ConfigParse {
        /// 1-based line (0 when unknown).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// Config serialization error.
    #[error("Config serialization error: {0}")]
    ConfigSerialize(#[from] serde_yaml_ng::Error),

    /// Output format not recognised from a file extension.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}
