use thiserror::Error;

/// Failures while turning a data file into a [`crate::data::model::LaunchTable`].
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: '{value}' is not a valid launch class (expected 0 or 1)")]
    InvalidClass { row: usize, value: String },

    #[error("row {row}: payload mass {value} is not a non-negative number")]
    InvalidPayload { row: usize, value: f64 },

    #[error("row {row}: null value in column '{column}'")]
    NullValue { row: usize, column: &'static str },
}
