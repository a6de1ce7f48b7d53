//! Error type shared by generation, analysis, the save format and level configuration.

use std::{fmt, io, time::Duration};

use thiserror::Error;

/// Markers that a finished maze is required to hold but does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingMarkers {
    /// The grid has an exit but no start.
    Start,
    /// The grid has a start but no exit.
    Exit,
    /// The grid has neither a start nor an exit.
    Both,
}

impl MissingMarkers {
    /// Maps the presence of both markers to the missing set, if any marker is missing at all.
    pub const fn from_presence(has_start: bool, has_exit: bool) -> Option<Self> {
        match (has_start, has_exit) {
            (true, true) => None,
            (false, true) => Some(Self::Start),
            (true, false) => Some(Self::Exit),
            (false, false) => Some(Self::Both),
        }
    }
}

impl fmt::Display for MissingMarkers {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Start => "start",
            Self::Exit => "exit",
            Self::Both => "start and exit",
        })
    }
}

/// Failures that can occur while building, analysing, loading or configuring a maze.
#[derive(Error, Debug)]
pub enum MazeError {
    /// A requested dimension was zero or the grid would be too large to allocate.
    #[error(
        "invalid maze dimensions {width}x{height}, both must be at least 1 and the grid at most \
         {max} cells",
        max = crate::builder::MAX_CELLS
    )]
    InvalidDimensions {
        /// Requested number of columns.
        width: usize,
        /// Requested number of rows.
        height: usize,
    },
    /// A level number outside the 1-based level sequence was requested.
    #[error("invalid level {0}, levels are numbered from 1")]
    InvalidLevel(u32),
    /// A level configuration failed validation.
    #[error("invalid level configuration: {0}")]
    InvalidConfig(&'static str),
    /// Generation finished without placing every required marker.
    #[error("degenerate maze layout, no {missing} marker could be placed")]
    DegenerateLayout {
        /// Which of the required markers are absent.
        missing: MissingMarkers,
    },
    /// Generation ran past its wall-clock budget.
    #[error("maze generation exceeded its budget of {0:?}")]
    BudgetExceeded(Duration),
    /// Saved maze data contained no cells.
    #[error("maze data contains no cells")]
    EmptyGrid,
    /// Saved maze data had rows of different lengths.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// Saved maze data held an integer that is not a cell marker.
    #[error("unknown cell code {code} at ({x}, {y})")]
    UnknownCellCode {
        /// The unrecognised integer.
        code: u8,
        /// Column of the offending cell.
        x: usize,
        /// Row of the offending cell.
        y: usize,
    },
    /// JSON encoding or decoding failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Reading or writing a maze file failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, MazeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_markers_from_presence() {
        assert_eq!(MissingMarkers::from_presence(true, true), None);
        assert_eq!(
            MissingMarkers::from_presence(false, true),
            Some(MissingMarkers::Start)
        );
        assert_eq!(
            MissingMarkers::from_presence(true, false),
            Some(MissingMarkers::Exit)
        );
        assert_eq!(
            MissingMarkers::from_presence(false, false),
            Some(MissingMarkers::Both)
        );
    }

    #[test]
    fn test_degenerate_layout_message_names_markers() {
        let err = MazeError::DegenerateLayout {
            missing: MissingMarkers::Both,
        };

        assert_eq!(
            err.to_string(),
            "degenerate maze layout, no start and exit marker could be placed"
        );
    }

    #[test]
    fn test_ragged_rows_message() {
        let err = MazeError::RaggedRows {
            row: 2,
            expected: 5,
            found: 4,
        };

        assert_eq!(err.to_string(), "row 2 has 4 cells, expected 5");
    }
}
