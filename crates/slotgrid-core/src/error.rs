#![forbid(unsafe_code)]

//! Construction and capacity errors.

use std::fmt;

/// Errors raised while building or reshaping a composition.
///
/// These are reported immediately to the caller assembling panes; nothing in
/// the render or click path produces them.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    InvalidDimensions {
        length: u16,
        height: u16,
    },
    MaskSizeMismatch {
        expected: (u16, u16),
        actual: (u16, u16),
    },
    PatternSizeMismatch {
        expected: (u16, u16),
        actual: (u16, u16),
    },
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
    InvalidMaskCell {
        row: usize,
        column: usize,
        found: char,
    },
    EmptyRows,
    RotationRequiresSquare {
        length: u16,
        height: u16,
        degrees: u16,
    },
    InvalidRotation {
        degrees: i32,
    },
    PageOutOfRange {
        page: usize,
        pages: usize,
    },
    PageIndexOverflow,
    InvalidRowRange {
        from: u16,
        end: u16,
        height: u16,
    },
    InvalidPercentage {
        value: f32,
    },
    EmptyCycle,
    UnknownPageGroup {
        name: String,
    },
    PagingTooNarrow {
        length: u16,
    },
    SlotOutOfBounds {
        x: u16,
        y: u16,
        length: u16,
        height: u16,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { length, height } => write!(
                f,
                "invalid pane size {length}x{height}: length and height must be > 0"
            ),
            Self::MaskSizeMismatch { expected, actual } => write!(
                f,
                "mask is {}x{} but the pane is {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::PatternSizeMismatch { expected, actual } => write!(
                f,
                "pattern is {}x{} but the pane is {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::RaggedRows {
                row,
                expected,
                actual,
            } => write!(
                f,
                "row {row} has {actual} cells, expected {expected} like the first row"
            ),
            Self::InvalidMaskCell { row, column, found } => write!(
                f,
                "mask cell ({column}, {row}) is {found:?}, expected '0' or '1'"
            ),
            Self::EmptyRows => write!(f, "at least one non-empty row is required"),
            Self::RotationRequiresSquare {
                length,
                height,
                degrees,
            } => write!(
                f,
                "cannot rotate a {length}x{height} pane by {degrees} degrees: pane must be square"
            ),
            Self::InvalidRotation { degrees } => {
                write!(f, "rotation {degrees} is not a multiple of 90 degrees")
            }
            Self::PageOutOfRange { page, pages } => {
                write!(f, "page {page} does not exist ({pages} pages registered)")
            }
            Self::PageIndexOverflow => {
                write!(f, "page index overflow: no index after the highest page")
            }
            Self::InvalidRowRange { from, end, height } => write!(
                f,
                "cannot exclude rows {from}..={end} from a surface {height} rows high"
            ),
            Self::InvalidPercentage { value } => {
                write!(f, "value {value} is outside the range 0.0..=1.0")
            }
            Self::EmptyCycle => write!(f, "a cycle button needs at least one option"),
            Self::UnknownPageGroup { name } => write!(f, "no paginated pane named {name:?}"),
            Self::PagingTooNarrow { length } => write!(
                f,
                "paging buttons need a length of at least 2, got {length}"
            ),
            Self::SlotOutOfBounds {
                x,
                y,
                length,
                height,
            } => write!(f, "slot ({x}, {y}) is outside a {length}x{height} grid"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Check that a pane or grid size is non-zero in both directions.
pub fn validate_dimensions(length: u16, height: u16) -> Result<(), LayoutError> {
    if length == 0 || height == 0 {
        return Err(LayoutError::InvalidDimensions { length, height });
    }
    Ok(())
}
