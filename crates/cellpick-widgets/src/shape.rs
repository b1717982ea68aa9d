#![forbid(unsafe_code)]

//! Shape descriptor parsing and validation.
//!
//! A shape descriptor is free text such as `(3,4)` or `(2, 5, 7)`. The first
//! two integers become the grid's rows and columns; any further dimensions
//! are parsed but the grid is strictly two-dimensional and ignores them.
//!
//! [`validate`] and [`parse`] are deliberately independent: `validate` is a
//! pattern search over the whole string, `parse` extracts delimited integer
//! tokens without judging the overall form. [`parse_shape`] combines them
//! in the only order callers should act on.
//!
//! # Failure Modes
//!
//! | Input | Outcome |
//! |-------|---------|
//! | `"(3)"`, `"3,4"`, `""` | [`ShapeError::Malformed`] |
//! | `"(3,4"` (unterminated) | [`ShapeError::Malformed`] |
//! | `"(٣,٤)"` (non-ASCII digits) | [`ShapeError::Malformed`] |
//! | integer larger than `usize` | token saturates to `usize::MAX` |

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use cellpick_core::debug;

/// Parenthesized list of two or more comma-separated ASCII integers.
static SHAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[(][0-9]+(?:,\s*[0-9]+)+[)]").expect("shape pattern is a valid regex")
});

/// An integer token together with the delimiter that precedes it.
///
/// The trailing delimiter is checked by hand so it is not consumed, which
/// lets `,` close one token and open the next.
static DIMENSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[(,\s]([0-9]+)").expect("token pattern is a valid regex"));

/// Grid dimensions derived from a shape descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    /// Create a shape.
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Build a shape from parsed dimensions, using the first two.
    #[must_use]
    pub fn from_dims(dims: &[usize]) -> Option<Self> {
        match dims {
            [rows, cols, ..] => Some(Self::new(*rows, *cols)),
            _ => None,
        }
    }

    /// Total number of cells, or `None` if the product overflows.
    #[must_use]
    pub const fn cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// True when the grid has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.rows, self.cols)
    }
}

/// Reasons a descriptor cannot become a grid shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The descriptor does not contain a `(int, int[, ...])` group.
    Malformed { descriptor: String },
    /// `rows * cols` exceeds the configured cell limit (or overflows).
    TooManyCells { shape: GridShape, limit: usize },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { descriptor } => {
                write!(f, "shape descriptor {descriptor:?} is not of the form (rows, cols)")
            }
            Self::TooManyCells { shape, limit } => {
                write!(f, "shape {shape} exceeds the limit of {limit} cells")
            }
        }
    }
}

impl std::error::Error for ShapeError {}

/// True iff the descriptor contains a parenthesized list of two or more
/// comma-separated non-negative integers.
///
/// The search is unanchored: surrounding text is tolerated.
#[must_use]
pub fn validate(descriptor: &str) -> bool {
    SHAPE_PATTERN.is_match(descriptor)
}

/// Extract every delimited integer token, left to right.
///
/// A token counts when it is preceded by `(`, `,` or whitespace and followed
/// by `(`, `,`, whitespace or `)`. Does not validate the descriptor.
#[must_use]
pub fn parse(descriptor: &str) -> Vec<usize> {
    DIMENSION_TOKEN
        .captures_iter(descriptor)
        .filter_map(|caps| caps.get(1))
        .filter(|digits| {
            matches!(
                descriptor[digits.end()..].chars().next(),
                Some(c) if c == '(' || c == ',' || c == ')' || c.is_whitespace()
            )
        })
        .map(|digits| digits.as_str().parse().unwrap_or(usize::MAX))
        .collect()
}

/// Validate, parse, and build the grid shape, enforcing a cell limit.
pub fn parse_shape_with_limit(descriptor: &str, max_cells: usize) -> Result<GridShape, ShapeError> {
    let malformed = || ShapeError::Malformed {
        descriptor: descriptor.to_string(),
    };
    if !validate(descriptor) {
        return Err(malformed());
    }
    let dims = parse(descriptor);
    let shape = GridShape::from_dims(&dims).ok_or_else(malformed)?;
    if dims.len() > 2 {
        debug!(
            extra = dims.len() - 2,
            "ignoring dimensions beyond rows and cols"
        );
    }
    match shape.cell_count() {
        Some(count) if count <= max_cells => Ok(shape),
        _ => Err(ShapeError::TooManyCells {
            shape,
            limit: max_cells,
        }),
    }
}

/// Validate, parse, and build the grid shape without a cell limit.
pub fn parse_shape(descriptor: &str) -> Result<GridShape, ShapeError> {
    parse_shape_with_limit(descriptor, usize::MAX)
}
