//! Error types for table layout and rendering.
//!
//! Every failure is reported synchronously by the call that triggered it.
//! Configuration errors are raised before anything reaches the sink; I/O
//! errors may leave partial output behind, since sinks are append-only.

use thiserror::Error;

use crate::layout::Position;

/// Errors that can occur while configuring, laying out or rendering a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// An explicit column width below 1.
    #[error("column {column} has invalid width {width} (must be at least 1)")]
    InvalidColumnWidth { column: usize, width: usize },

    /// Tab stops must be at least one column apart.
    #[error("tab width must be at least 1")]
    InvalidTabWidth,

    /// The global width cannot hold every column at its smallest size.
    #[error("table width {max_width} is too small: at least {required} columns are required")]
    GlobalWidthTooSmall { max_width: usize, required: usize },

    /// A row supplied more cells than the established column count.
    #[error("{section} row {row} has {cells} cells but the table has {columns} columns")]
    TooManyCells {
        section: Position,
        row: usize,
        cells: usize,
        columns: usize,
    },

    /// Layout settings cannot change while a stream is running.
    #[error("cannot change {0} while streaming")]
    StreamActive(&'static str),

    /// The stream was already closed.
    #[error("stream is closed")]
    StreamClosed,

    /// `close` was called before `start`.
    #[error("stream was never started")]
    StreamNotStarted,

    /// Streaming needs a header or explicit widths to know the column count.
    #[error("cannot start a stream without a header or explicit column widths")]
    MissingColumns,

    /// Writing to the output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for TableError {
    fn from(err: serde_yaml::Error) -> Self {
        TableError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::Config(err.to_string())
    }
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TableError::InvalidColumnWidth {
            column: 2,
            width: 0,
        };
        assert_eq!(
            err.to_string(),
            "column 2 has invalid width 0 (must be at least 1)"
        );

        let err = TableError::TooManyCells {
            section: Position::Body,
            row: 3,
            cells: 4,
            columns: 3,
        };
        assert_eq!(
            err.to_string(),
            "body row 3 has 4 cells but the table has 3 columns"
        );
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: TableError = io_err.into();
        assert!(matches!(err, TableError::Io(_)));
    }

    #[test]
    fn from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<u32>("[not, a, number]").unwrap_err();
        let err: TableError = yaml_err.into();
        assert!(matches!(err, TableError::Config(_)));
    }
}
