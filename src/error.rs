use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the timing data or exporting the chart.
/// None of them is recovered, they end the run.
#[derive(Debug, Error)]
pub enum TimingError {
    /// The input could not be opened or read.
    /// Bytes that are not UTF-8 text are reported as `Format` instead.
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason} in {content:?}")]
    Format {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("series {label:?}: {xs} distances but {ys} times")]
    SeriesLength { label: String, xs: usize, ys: usize },

    #[error("could not draw the chart: {0}")]
    Render(String),

    #[error("could not write the chart to {path:?}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TimingError>;
