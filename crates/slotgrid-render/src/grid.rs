#![forbid(unsafe_code)]

//! The addressable cell buffer a composition renders into.
//!
//! # Usage
//!
//! ```
//! use slotgrid_core::ItemContext;
//! use slotgrid_render::Grid;
//!
//! let ctx = ItemContext::new("demo");
//! let mut grid = Grid::new(9, 3);
//!
//! grid.set(4, 1, ctx.item("diamond"));
//! assert_eq!(grid.get(4, 1).map(|item| *item.payload()), Some("diamond"));
//! assert_eq!(grid.get_slot(13).map(|item| *item.payload()), Some("diamond"));
//! ```

use slotgrid_core::{Item, LayoutError, Rect};

/// A `length` × `height` grid of optional items, addressed by `(x, y)` or by
/// row-major linear slot.
#[derive(Debug, Clone)]
pub struct Grid<P> {
    length: u16,
    height: u16,
    cells: Vec<Option<Item<P>>>,
}

impl<P> Grid<P> {
    /// Create an empty grid with the given dimensions.
    pub fn new(length: u16, height: u16) -> Self {
        let size = usize::from(length) * usize::from(height);
        let mut cells = Vec::with_capacity(size);
        cells.resize_with(size, || None);
        Self {
            length,
            height,
            cells,
        }
    }

    /// Grid width.
    #[inline]
    pub const fn length(&self) -> u16 {
        self.length
    }

    /// Grid height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Bounding rectangle.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.length, self.height)
    }

    /// Convert (x, y) to linear index.
    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.length && y < self.height {
            Some(usize::from(y) * usize::from(self.length) + usize::from(x))
        } else {
            None
        }
    }

    /// Whether `(x, y)` lies inside the grid.
    #[inline]
    pub fn is_in_bounds(&self, x: u16, y: u16) -> bool {
        self.index(x, y).is_some()
    }

    /// Item at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Item<P>> {
        self.index(x, y).and_then(|i| self.cells[i].as_ref())
    }

    /// Item at a linear slot.
    #[inline]
    pub fn get_slot(&self, slot: usize) -> Option<&Item<P>> {
        self.cells.get(slot).and_then(Option::as_ref)
    }

    /// Write an item. Writes outside the grid are dropped; returns whether
    /// the item was stored.
    pub fn set(&mut self, x: u16, y: u16, item: Item<P>) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = Some(item);
                true
            }
            None => false,
        }
    }

    /// Remove and return the item at `(x, y)`.
    pub fn take(&mut self, x: u16, y: u16) -> Option<Item<P>> {
        self.index(x, y).and_then(|i| self.cells[i].take())
    }

    /// Whether `(x, y)` holds an item.
    #[inline]
    pub fn has_item(&self, x: u16, y: u16) -> bool {
        self.get(x, y).is_some()
    }

    /// Whether any cell holds an item.
    pub fn has_items(&self) -> bool {
        self.cells.iter().any(Option::is_some)
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    /// Occupied cells in row-major order as `(x, y, item)`.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Item<P>)> + '_ {
        let length = usize::from(self.length.max(1));
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref()
                .map(|item| ((i % length) as u16, (i / length) as u16, item))
        })
    }
}

impl<P: Clone> Grid<P> {
    /// A new grid with rows `from..=end` removed. Rows below the range move
    /// up; contents of the removed rows are discarded.
    pub fn without_rows(&self, from: u16, end: u16) -> Result<Self, LayoutError> {
        if from > end || end >= self.height || end - from + 1 >= self.height {
            return Err(LayoutError::InvalidRowRange {
                from,
                end,
                height: self.height,
            });
        }
        let height = self.height - (end - from + 1);
        let mut next = Self::new(self.length, height);
        for (x, y, item) in self.iter() {
            let target = if y < from {
                y
            } else if y > end {
                y - (end - from + 1)
            } else {
                continue;
            };
            next.set(x, target, item.clone());
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotgrid_core::ItemContext;

    #[test]
    fn set_get_and_bounds() {
        let ctx = ItemContext::new("test");
        let mut grid = Grid::new(3, 2);
        assert!(grid.set(2, 1, ctx.item('a')));
        assert!(!grid.set(3, 0, ctx.item('b')));
        assert_eq!(grid.get(2, 1).map(|i| *i.payload()), Some('a'));
        assert_eq!(grid.get_slot(5).map(|i| *i.payload()), Some('a'));
        assert!(grid.get(3, 0).is_none());
        assert!(grid.get_slot(6).is_none());
        assert!(grid.has_items());
    }

    #[test]
    fn clear_empties_every_cell() {
        let ctx = ItemContext::new("test");
        let mut grid = Grid::new(2, 2);
        grid.set(0, 0, ctx.item(1));
        grid.set(1, 1, ctx.item(2));
        grid.clear();
        assert!(!grid.has_items());
        assert_eq!(grid.size(), 4);
    }

    #[test]
    fn iter_reports_positions() {
        let ctx = ItemContext::new("test");
        let mut grid = Grid::new(4, 2);
        grid.set(3, 0, ctx.item('x'));
        grid.set(1, 1, ctx.item('y'));
        let cells: Vec<_> = grid.iter().map(|(x, y, i)| (x, y, *i.payload())).collect();
        assert_eq!(cells, vec![(3, 0, 'x'), (1, 1, 'y')]);
    }

    #[test]
    fn without_rows_shifts_lower_rows_up() {
        let ctx = ItemContext::new("test");
        let mut grid = Grid::new(2, 4);
        for y in 0..4 {
            grid.set(0, y, ctx.item(y));
        }
        let trimmed = grid.without_rows(1, 2).unwrap();
        assert_eq!(trimmed.height(), 2);
        assert_eq!(trimmed.get(0, 0).map(|i| *i.payload()), Some(0));
        assert_eq!(trimmed.get(0, 1).map(|i| *i.payload()), Some(3));
    }

    #[test]
    fn without_rows_rejects_bad_ranges() {
        let grid: Grid<()> = Grid::new(2, 3);
        assert!(grid.without_rows(2, 1).is_err());
        assert!(grid.without_rows(1, 3).is_err());
        assert!(grid.without_rows(0, 2).is_err());
        assert!(grid.without_rows(0, 1).is_ok());
    }
}
