#![forbid(unsafe_code)]

//! Character templates for pattern placement.

use std::fmt;

use crate::error::LayoutError;

/// A `length` × `height` grid of characters.
///
/// Each character is looked up in a binding table by the pane that owns the
/// pattern; unbound characters render nothing.
#[derive(Clone, PartialEq, Eq)]
pub struct Pattern {
    length: u16,
    height: u16,
    cells: Vec<char>,
}

impl Pattern {
    /// Character used for cells added by [`Pattern::resized`].
    pub const FILL: char = ' ';

    /// Parse a pattern from equally long rows.
    ///
    /// ```
    /// use slotgrid_core::Pattern;
    ///
    /// let pattern = Pattern::new(["ABA", "BAB"]).unwrap();
    /// assert_eq!(pattern.char_at(1, 0), Some('B'));
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
            let before = cells.len();
            cells.extend(line.as_ref().chars());
            let width = cells.len() - before;
            let expected = *length.get_or_insert(width);
            if width != expected {
                return Err(LayoutError::RaggedRows {
                    row,
                    expected,
                    actual: width,
                });
            }
            height += 1;
        }
        let length = length.unwrap_or(0);
        if length == 0 || height == 0 {
            return Err(LayoutError::EmptyRows);
        }
        match (u16::try_from(length), u16::try_from(height)) {
            (Ok(length), Ok(height)) => Ok(Self {
                length,
                height,
                cells,
            }),
            _ => Err(LayoutError::InvalidDimensions {
                length: u16::try_from(length).unwrap_or(u16::MAX),
                height: u16::try_from(height).unwrap_or(u16::MAX),
            }),
        }
    }

    /// A pattern with every cell set to `ch`.
    #[must_use]
    pub fn filled(length: u16, height: u16, ch: char) -> Self {
        Self {
            length,
            height,
            cells: vec![ch; usize::from(length) * usize::from(height)],
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

    /// Character at `(x, y)`, or `None` outside the pattern.
    #[inline]
    pub fn char_at(&self, x: u16, y: u16) -> Option<char> {
        if x < self.length && y < self.height {
            Some(self.cells[usize::from(y) * usize::from(self.length) + usize::from(x)])
        } else {
            None
        }
    }

    /// Characters of row `y`, left to right.
    pub fn row(&self, y: u16) -> &[char] {
        if y >= self.height {
            return &[];
        }
        let start = usize::from(y) * usize::from(self.length);
        &self.cells[start..start + usize::from(self.length)]
    }

    /// Characters of column `x`, top to bottom.
    pub fn column(&self, x: u16) -> Vec<char> {
        (0..self.height)
            .filter_map(|y| self.char_at(x, y))
            .collect()
    }

    /// Whether `ch` appears anywhere in the pattern.
    pub fn contains(&self, ch: char) -> bool {
        self.cells.contains(&ch)
    }

    /// Copy of this pattern at a new size, padding new cells with
    /// [`Pattern::FILL`].
    #[must_use]
    pub fn resized(&self, length: u16, height: u16) -> Self {
        let mut next = Self::filled(length, height, Self::FILL);
        for y in 0..height.min(self.height) {
            for x in 0..length.min(self.length) {
                if let Some(ch) = self.char_at(x, y) {
                    next.cells[usize::from(y) * usize::from(length) + usize::from(x)] = ch;
                }
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            from_length = self.length,
            from_height = self.height,
            length,
            height,
            "pattern resized"
        );
        next
    }

    /// Row strings in the form accepted by [`Pattern::new`].
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| self.row(y).iter().collect())
            .collect()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("length", &self.length)
            .field("height", &self.height)
            .field("rows", &self.to_rows())
            .finish()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Pattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.to_rows())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Pattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<String>::deserialize(deserializer)?;
        Self::new(rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_and_columns() {
        let pattern = Pattern::new(["AB", "CD", "EF"]).unwrap();
        assert_eq!((pattern.length(), pattern.height()), (2, 3));
        assert_eq!(pattern.row(1), &['C', 'D']);
        assert_eq!(pattern.column(1), vec!['B', 'D', 'F']);
        assert!(pattern.contains('E'));
        assert!(!pattern.contains('Z'));
        assert_eq!(pattern.char_at(2, 0), None);
    }

    #[test]
    fn multibyte_characters_count_as_one_cell() {
        let pattern = Pattern::new(["é#", "#é"]).unwrap();
        assert_eq!(pattern.length(), 2);
        assert_eq!(pattern.char_at(0, 0), Some('é'));
    }

    #[test]
    fn ragged_rows_rejected() {
        assert!(matches!(
            Pattern::new(["AAA", "AA"]),
            Err(LayoutError::RaggedRows { row: 1, .. })
        ));
    }

    #[test]
    fn resize_pads_with_fill() {
        let pattern = Pattern::new(["AB"]).unwrap();
        assert_eq!(pattern.resized(3, 2).to_rows(), vec!["AB ", "   "]);
        assert_eq!(pattern.resized(1, 1).to_rows(), vec!["A"]);
    }
}
