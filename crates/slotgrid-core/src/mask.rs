#![forbid(unsafe_code)]

//! Per-cell placement eligibility.

use std::fmt;

use crate::error::LayoutError;

/// A `length` × `height` grid of enabled/disabled cells.
///
/// Sequential placement only lands on enabled cells; disabled cells are
/// skipped without consuming an item.
#[derive(Clone, PartialEq, Eq)]
pub struct Mask {
    length: u16,
    height: u16,
    cells: Vec<bool>,
}

impl Mask {
    /// Parse a mask from rows of `'1'` (enabled) and `'0'` (disabled).
    ///
    /// ```
    /// use slotgrid_core::Mask;
    ///
    /// let mask = Mask::new(["101", "010"]).unwrap();
    /// assert!(mask.is_enabled(0, 0));
    /// assert!(!mask.is_enabled(1, 0));
    /// assert_eq!(mask.enabled_count(), 3);
    /// ```
    pub fn new<I, S>(rows: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cells = Vec::new();
        let mut length = None;
        let mut height = 0usize;
        for (row, line) in rows.into_iter().enumerate() {
            let line = line.as_ref();
            let width = line.chars().count();
            let expected = *length.get_or_insert(width);
            if width != expected {
                return Err(LayoutError::RaggedRows {
                    row,
                    expected,
                    actual: width,
                });
            }
            for (column, ch) in line.chars().enumerate() {
                cells.push(match ch {
                    '1' => true,
                    '0' => false,
                    found => {
                        return Err(LayoutError::InvalidMaskCell { row, column, found });
                    }
                });
            }
            height += 1;
        }
        let length = length.unwrap_or(0);
        if length == 0 || height == 0 {
            return Err(LayoutError::EmptyRows);
        }
        let length = u16::try_from(length).map_err(|_| LayoutError::InvalidDimensions {
            length: u16::MAX,
            height: u16::try_from(height).unwrap_or(u16::MAX),
        })?;
        let height = u16::try_from(height).map_err(|_| LayoutError::InvalidDimensions {
            length,
            height: u16::MAX,
        })?;
        Ok(Self {
            length,
            height,
            cells,
        })
    }

    /// A mask with every cell set to `enabled`.
    #[must_use]
    pub fn filled(length: u16, height: u16, enabled: bool) -> Self {
        Self {
            length,
            height,
            cells: vec![enabled; usize::from(length) * usize::from(height)],
        }
    }

    #[inline]
    pub const fn length(&self) -> u16 {
        self.length
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.length && y < self.height {
            Some(usize::from(y) * usize::from(self.length) + usize::from(x))
        } else {
            None
        }
    }

    /// Whether `(x, y)` is enabled. Cells outside the mask are disabled.
    #[inline]
    pub fn is_enabled(&self, x: u16, y: u16) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    /// Enable or disable `(x, y)`. Returns `false` if the cell is outside.
    pub fn set_enabled(&mut self, x: u16, y: u16, enabled: bool) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = enabled;
                true
            }
            None => false,
        }
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: u16) -> &[bool] {
        if y >= self.height {
            return &[];
        }
        let start = usize::from(y) * usize::from(self.length);
        &self.cells[start..start + usize::from(self.length)]
    }

    /// Cells of column `x`, top to bottom.
    pub fn column(&self, x: u16) -> Vec<bool> {
        if x >= self.length {
            return Vec::new();
        }
        (0..self.height).map(|y| self.is_enabled(x, y)).collect()
    }

    /// Number of enabled cells.
    pub fn enabled_count(&self) -> usize {
        self.cells.iter().filter(|enabled| **enabled).count()
    }

    /// Copy of this mask at a new size. Cells that survive keep their state;
    /// new cells are enabled.
    #[must_use]
    pub fn resized(&self, length: u16, height: u16) -> Self {
        let mut next = Self::filled(length, height, true);
        for y in 0..height.min(self.height) {
            for x in 0..length.min(self.length) {
                next.set_enabled(x, y, self.is_enabled(x, y));
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            from_length = self.length,
            from_height = self.height,
            length,
            height,
            "mask resized"
        );
        next
    }

    /// Row strings in the form accepted by [`Mask::new`].
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                self.row(y)
                    .iter()
                    .map(|enabled| if *enabled { '1' } else { '0' })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mask")
            .field("length", &self.length)
            .field("height", &self.height)
            .field("rows", &self.to_rows())
            .finish()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Mask {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.to_rows())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Mask {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<String>::deserialize(deserializer)?;
        Self::new(rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rows() {
        let mask = Mask::new(["1100", "0011"]).unwrap();
        assert_eq!((mask.length(), mask.height()), (4, 2));
        assert_eq!(mask.row(0), &[true, true, false, false]);
        assert_eq!(mask.column(3), vec![false, true]);
        assert_eq!(mask.enabled_count(), 4);
    }

    #[test]
    fn ragged_rows_rejected() {
        assert_eq!(
            Mask::new(["11", "1"]),
            Err(LayoutError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn invalid_cell_rejected() {
        assert!(matches!(
            Mask::new(["1x"]),
            Err(LayoutError::InvalidMaskCell { found: 'x', .. })
        ));
        assert_eq!(Mask::new(Vec::<&str>::new()), Err(LayoutError::EmptyRows));
    }

    #[test]
    fn resize_keeps_overlap_and_enables_new_cells() {
        let mask = Mask::new(["01", "10"]).unwrap();
        let grown = mask.resized(3, 3);
        assert_eq!(grown.to_rows(), vec!["011", "101", "111"]);
        let shrunk = mask.resized(1, 1);
        assert_eq!(shrunk.to_rows(), vec!["0"]);
    }

    #[test]
    fn out_of_range_reads_are_disabled() {
        let mask = Mask::filled(2, 2, true);
        assert!(!mask.is_enabled(2, 0));
        assert!(mask.row(5).is_empty());
        assert!(mask.column(5).is_empty());
    }
}
