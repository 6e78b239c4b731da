/// Convenience result type used across plotbot.
pub type PlotResult<T> = Result<T, PlotError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only load-time failures and configuration problems are errors. Per-point decode problems
/// are reported as [`DecodeWarning`] values next to the data they affect.
#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    /// The drawing path does not exist, or the storage media is not present.
    #[error("not found: {0}")]
    NotFound(String),

    /// The info or settings section was never closed before the stream ran out.
    #[error("missing drawing header: {0}")]
    MissingHeader(String),

    /// No points-start marker follows the header.
    #[error("missing drawing point data")]
    MissingPointData,

    /// Invalid engine configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlotError {
    /// Build a [`PlotError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`PlotError::MissingHeader`] value.
    pub fn missing_header(msg: impl Into<String>) -> Self {
        Self::MissingHeader(msg.into())
    }

    /// Build a [`PlotError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<std::io::Error> for PlotError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(anyhow::Error::new(err))
    }
}

/// Non-fatal problem found while decoding one point line.
///
/// Playback continues with best-effort values; the engine logs the warning and keeps the most
/// recent one for diagnostics.
#[derive(thiserror::Error, Debug, Clone, PartialEq, serde::Serialize)]
pub enum DecodeWarning {
    /// The line had fewer than the four expected tokens.
    #[error("line {line}: expected 4 fields, found {found}")]
    MissingFields {
        /// 1-based line number in the drawing file.
        line: usize,
        /// Number of tokens actually present.
        found: usize,
    },

    /// A coordinate had no numeric prefix and was read as zero.
    #[error("line {line}: '{text}' is not a number, using {value}")]
    BadNumber {
        /// 1-based line number in the drawing file.
        line: usize,
        /// Offending token.
        text: String,
        /// Value that was used instead.
        value: f64,
    },

    /// The stream ran out before `pointsCount` points were read.
    #[error("drawing stream ended after {read} of {expected} points")]
    StreamEnded {
        /// Points decoded so far.
        read: usize,
        /// Points announced by the header.
        expected: usize,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
