#![forbid(unsafe_code)]

//! Greedy first-fit packing of child panes.
//!
//! Children are placed in insertion order. Each takes the first origin, in
//! scan order, where its whole footprint lies inside the pane and overlaps no
//! child placed earlier in the same pass. A child with no such origin is left
//! out of that pass and does not receive clicks until a later pass places it.

use slotgrid_core::{Item, LayoutError, Orientation, Rect, Slot};
use slotgrid_render::Grid;

use crate::component::{ClickContext, Component, PaneBase, PaneId};
use crate::pane::Pane;

const KIND: &str = "masonry";

#[derive(Debug)]
pub struct MasonryPane<P> {
    base: PaneBase,
    panes: Vec<Pane<P>>,
    /// Per child, whether the last display pass placed it.
    placed: Vec<bool>,
    orientation: Orientation,
}

impl<P: Clone> MasonryPane<P> {
    pub fn new(slot: Slot, length: u16, height: u16) -> Result<Self, LayoutError> {
        Ok(Self {
            base: PaneBase::new(slot, length, height)?,
            panes: Vec::new(),
            placed: Vec::new(),
            orientation: Orientation::Horizontal,
        })
    }

    /// Append a child. Earlier children are placed first.
    pub fn add_pane(&mut self, pane: impl Into<Pane<P>>) {
        self.panes.push(pane.into());
        self.placed.push(false);
    }

    #[must_use]
    pub fn with_pane(mut self, pane: impl Into<Pane<P>>) -> Self {
        self.add_pane(pane);
        self
    }

    pub fn remove_pane(&mut self, id: PaneId) -> Option<Pane<P>> {
        let index = self.panes.iter().position(|pane| pane.id() == id)?;
        self.placed.remove(index);
        Some(self.panes.remove(index))
    }

    pub fn panes(&self) -> &[Pane<P>] {
        &self.panes
    }

    pub fn panes_mut(&mut self) -> &mut [Pane<P>] {
        &mut self.panes
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

/// Occupancy of one placement pass. Each cell records the index of the
/// child covering it.
struct Occupancy {
    length: u16,
    height: u16,
    cells: Vec<Option<usize>>,
}

impl Occupancy {
    fn new(length: u16, height: u16) -> Self {
        Self {
            length,
            height,
            cells: vec![None; usize::from(length) * usize::from(height)],
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.length) + usize::from(x)
    }

    fn is_free(&self, x: u16, y: u16, length: u16, height: u16) -> bool {
        (y..y + height).all(|cy| (x..x + length).all(|cx| self.cells[self.index(cx, cy)].is_none()))
    }

    fn claim(&mut self, x: u16, y: u16, length: u16, height: u16, owner: usize) {
        for cy in y..y + height {
            for cx in x..x + length {
                let index = self.index(cx, cy);
                self.cells[index] = Some(owner);
            }
        }
    }

    /// First origin in scan order that fits a `length` × `height` footprint.
    fn find(&self, length: u16, height: u16, orientation: Orientation) -> Option<(u16, u16)> {
        if length > self.length || height > self.height {
            return None;
        }
        let max_x = self.length - length;
        let max_y = self.height - height;
        match orientation {
            Orientation::Horizontal => (0..=max_y)
                .flat_map(|y| (0..=max_x).map(move |x| (x, y)))
                .find(|&(x, y)| self.is_free(x, y, length, height)),
            Orientation::Vertical => (0..=max_x)
                .flat_map(|x| (0..=max_y).map(move |y| (x, y)))
                .find(|&(x, y)| self.is_free(x, y, length, height)),
        }
    }
}

impl<P: Clone> Component<P> for MasonryPane<P> {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn base(&self) -> &PaneBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PaneBase {
        &mut self.base
    }

    fn display(&mut self, grid: &mut Grid<P>, area: Rect) {
        let region = self.base.region(area);
        if region.is_empty() {
            return;
        }
        let _span = tracing::trace_span!(
            "pane.display",
            kind = KIND,
            x = region.x,
            y = region.y,
            w = region.width,
            h = region.height
        )
        .entered();

        let mut occupancy = Occupancy::new(region.width, region.height);
        self.placed.clear();
        self.placed.resize(self.panes.len(), false);
        for (index, child) in self.panes.iter_mut().enumerate() {
            if !child.is_visible() {
                continue;
            }
            let (length, height) = (child.length(), child.height());
            match occupancy.find(length, height, self.orientation) {
                Some((x, y)) => {
                    occupancy.claim(x, y, length, height, index);
                    self.placed[index] = true;
                    child.set_slot(Slot::from_xy(x, y));
                    child.display(grid, region);
                }
                None => tracing::trace!(
                    pane.id = self.base.id().get(),
                    child = index,
                    length,
                    height,
                    "masonry child does not fit, dropped for this pass"
                ),
            }
        }
    }

    fn click(&mut self, ctx: &mut ClickContext<'_>, area: Rect) -> bool {
        let region = self.base.region(area);
        if ctx.local(region).is_none() {
            return false;
        }
        ctx.intercept(KIND, &self.base, region);

        let mut matched = false;
        for (child, _) in self
            .panes
            .iter_mut()
            .zip(&self.placed)
            .filter(|(_, placed)| **placed)
        {
            matched |= child.click(ctx, region);
        }
        matched
    }

    fn copy(&self) -> Self {
        Self {
            base: self.base.clone(),
            panes: self.panes.iter().map(Pane::copy).collect(),
            placed: self.placed.clone(),
            orientation: self.orientation,
        }
    }

    fn visit_items(&self, visit: &mut dyn FnMut(&Item<P>)) {
        for pane in &self.panes {
            pane.visit_items(visit);
        }
    }

    fn clear(&mut self) {
        self.panes.clear();
        self.placed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::OutlinePane;
    use slotgrid_core::ItemContext;

    fn block(ctx: &ItemContext, length: u16, height: u16, label: char) -> OutlinePane<char> {
        OutlinePane::new(Slot::default(), length, height)
            .unwrap()
            .with_repeat(true)
            .with_items([ctx.item(label)])
    }

    fn origins(pane: &MasonryPane<char>) -> Vec<Slot> {
        pane.panes().iter().map(Pane::slot).collect()
    }

    #[test]
    fn horizontal_first_fit() {
        let ctx = ItemContext::new("test");
        let mut pane = MasonryPane::new(Slot::default(), 4, 2)
            .unwrap()
            .with_pane(block(&ctx, 2, 2, 'a'))
            .with_pane(block(&ctx, 1, 1, 'b'))
            .with_pane(block(&ctx, 1, 1, 'c'))
            .with_pane(block(&ctx, 1, 2, 'd'));
        let mut grid = Grid::new(4, 2);
        pane.display(&mut grid, Rect::from_size(4, 2));
        assert_eq!(
            origins(&pane),
            vec![
                Slot::from_xy(0, 0),
                Slot::from_xy(2, 0),
                Slot::from_xy(3, 0),
                Slot::default(),
            ]
        );
        // No 1x2 gap is left for 'd', so it keeps its slot and is not drawn.
        assert!(!grid.has_item(2, 1));
        assert!(!grid.has_item(3, 1));
        assert_eq!(grid.get(0, 0).map(|i| *i.payload()), Some('a'));
    }

    #[test]
    fn vertical_scan_fills_columns() {
        let ctx = ItemContext::new("test");
        let mut pane = MasonryPane::new(Slot::default(), 2, 2)
            .unwrap()
            .with_orientation(Orientation::Vertical)
            .with_pane(block(&ctx, 1, 1, 'a'))
            .with_pane(block(&ctx, 1, 1, 'b'));
        let mut grid = Grid::new(2, 2);
        pane.display(&mut grid, Rect::from_size(2, 2));
        assert_eq!(origins(&pane), vec![Slot::from_xy(0, 0), Slot::from_xy(0, 1)]);
    }

    #[test]
    fn oversized_child_does_not_block_later_ones() {
        let ctx = ItemContext::new("test");
        let mut pane = MasonryPane::new(Slot::default(), 3, 1)
            .unwrap()
            .with_pane(block(&ctx, 4, 1, 'x'))
            .with_pane(block(&ctx, 1, 1, 'a'));
        let mut grid = Grid::new(3, 1);
        pane.display(&mut grid, Rect::from_size(3, 1));
        assert_eq!(grid.get(0, 0).map(|i| *i.payload()), Some('a'));
        assert_eq!(grid.iter().count(), 1);
    }

    #[test]
    fn placement_is_stable_across_passes() {
        let ctx = ItemContext::new("test");
        let mut pane = MasonryPane::new(Slot::default(), 5, 3)
            .unwrap()
            .with_pane(block(&ctx, 2, 1, 'a'))
            .with_pane(block(&ctx, 3, 2, 'b'))
            .with_pane(block(&ctx, 2, 2, 'c'));
        let mut grid = Grid::new(5, 3);
        pane.display(&mut grid, Rect::from_size(5, 3));
        let first = origins(&pane);
        grid.clear();
        pane.display(&mut grid, Rect::from_size(5, 3));
        assert_eq!(origins(&pane), first);
    }

    #[test]
    fn click_reaches_every_child() {
        use slotgrid_core::{ClickEvent, ClickKind};
        use std::cell::Cell;
        use std::rc::Rc;

        let ctx = ItemContext::new("test");
        let hits = Rc::new(Cell::new(0));
        let mut pane = MasonryPane::new(Slot::default(), 2, 1).unwrap();
        for label in ['a', 'b'] {
            let counter = Rc::clone(&hits);
            let mut child = block(&ctx, 1, 1, label);
            child.set_on_click(move |_| {
                counter.set(counter.get() + 1);
                Ok(())
            });
            pane.add_pane(child);
        }
        let mut grid = Grid::new(2, 1);
        pane.display(&mut grid, Rect::from_size(2, 1));

        let current = grid.get(1, 0).map(|i| i.id());
        let mut event = ClickEvent::new(1, ClickKind::Left).with_current(current);
        let mut click = ClickContext::new(&mut event, 2);
        assert!(pane.click(&mut click, Rect::from_size(2, 1)));
        // Only 'b' covers the cell, so only its interceptor fires.
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn dropped_child_receives_no_clicks() {
        use slotgrid_core::{ClickEvent, ClickKind};
        use std::cell::Cell;
        use std::rc::Rc;

        let ctx = ItemContext::new("test");
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut giant = block(&ctx, 3, 1, 'x');
        giant.set_on_click(move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        });
        // The first child takes the left cell; the second no longer fits but
        // still carries its default origin, which covers the clicked cell.
        let mut pane = MasonryPane::new(Slot::default(), 3, 1)
            .unwrap()
            .with_pane(block(&ctx, 1, 1, 'a'))
            .with_pane(giant);
        let mut grid = Grid::new(3, 1);
        pane.display(&mut grid, Rect::from_size(3, 1));
        assert!(!grid.has_item(2, 0));

        let mut event = ClickEvent::new(2, ClickKind::Left);
        let mut click = ClickContext::new(&mut event, 3);
        assert!(!pane.click(&mut click, Rect::from_size(3, 1)));
        assert_eq!(hits.get(), 0);

        // Once the blocker is gone the child is placed and clickable again.
        let blocker = pane.panes()[0].id();
        pane.remove_pane(blocker).unwrap();
        grid.clear();
        pane.display(&mut grid, Rect::from_size(3, 1));
        let current = grid.get(2, 0).map(|i| i.id());
        let mut event = ClickEvent::new(2, ClickKind::Left).with_current(current);
        let mut click = ClickContext::new(&mut event, 3);
        assert!(pane.click(&mut click, Rect::from_size(3, 1)));
        assert_eq!(hits.get(), 1);
    }
}
