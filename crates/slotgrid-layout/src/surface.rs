#![forbid(unsafe_code)]

//! The composition root: a cell grid plus its top-level panes.
//!
//! # Usage
//!
//! ```
//! use slotgrid_core::{ClickKind, ItemContext, Slot};
//! use slotgrid_layout::{GridSurface, StaticPane};
//!
//! let ctx = ItemContext::new("demo");
//! let mut surface = GridSurface::new(9, 3).unwrap();
//! let pane = StaticPane::new(Slot::default(), 9, 3)
//!     .unwrap()
//!     .with_item(ctx.item("apple"), Slot::from_xy(4, 1));
//! surface.add_pane(pane);
//!
//! surface.display();
//! assert_eq!(surface.item(4, 1).map(|item| *item.payload()), Some("apple"));
//!
//! let (matched, _event) = surface.click_slot(13, ClickKind::Left);
//! assert!(matched);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use slotgrid_core::{
    ClickEvent, ClickKind, Item, LayoutError, Priority, insert_by_priority, validate_dimensions,
};
use slotgrid_render::Grid;

use crate::component::ClickContext;
use crate::pane::{Pane, PaneRef};

/// A length × height grid and the panes that render into it.
///
/// Panes are held by shared handle so that surfaces derived with
/// [`GridSurface::exclude_rows`] compose the same panes.
#[derive(Debug)]
pub struct GridSurface<P> {
    panes: Vec<PaneRef<P>>,
    grid: Grid<P>,
}

impl<P: Clone> GridSurface<P> {
    pub fn new(length: u16, height: u16) -> Result<Self, LayoutError> {
        validate_dimensions(length, height)?;
        Ok(Self {
            panes: Vec::new(),
            grid: Grid::new(length, height),
        })
    }

    /// Add a top-level pane in priority order. Returns its handle.
    pub fn add_pane(&mut self, pane: impl Into<Pane<P>>) -> PaneRef<P> {
        let pane = Rc::new(RefCell::new(pane.into()));
        self.add_pane_ref(Rc::clone(&pane));
        pane
    }

    /// Add a pane that may already belong to another surface.
    ///
    /// A pane that is busy while being added sorts as [`Priority::default`]
    /// until the next display or click restores the order.
    pub fn add_pane_ref(&mut self, pane: PaneRef<P>) {
        insert_by_priority(&mut self.panes, pane, |pane| {
            sort_key(pane).unwrap_or_default()
        });
    }

    /// Remove a pane by handle identity.
    pub fn remove_pane(&mut self, pane: &PaneRef<P>) -> bool {
        let before = self.panes.len();
        self.panes.retain(|existing| !Rc::ptr_eq(existing, pane));
        self.panes.len() != before
    }

    /// Top-level panes in ascending priority.
    pub fn panes(&self) -> &[PaneRef<P>] {
        &self.panes
    }

    /// Re-establish priority order after priorities changed in place.
    ///
    /// When a pane is busy (an action running inside it reached this
    /// surface) its priority cannot be read and the current order is kept.
    fn restore_order(&mut self) {
        let keys: Option<Vec<Priority>> = self.panes.iter().map(sort_key).collect();
        let Some(keys) = keys else {
            tracing::trace!("pane is busy, order kept");
            return;
        };
        let mut keyed: Vec<_> = keys.into_iter().zip(self.panes.drain(..)).collect();
        keyed.sort_by_key(|(priority, _)| *priority);
        self.panes = keyed.into_iter().map(|(_, pane)| pane).collect();
    }

    /// Clear every cell and render all visible panes in ascending priority.
    /// Where panes overlap the higher priority wins.
    pub fn display(&mut self) {
        let _span = tracing::debug_span!(
            "surface.display",
            length = self.grid.length(),
            height = self.grid.height(),
            panes = self.panes.len()
        )
        .entered();

        self.restore_order();
        self.grid.clear();
        let area = self.grid.bounds();
        for pane in &self.panes {
            match pane.try_borrow_mut() {
                Ok(mut pane) => pane.display(&mut self.grid, area),
                Err(_) => tracing::trace!("pane is busy, skipped for display"),
            }
        }
    }

    /// Route a click to the top-level panes in descending priority; the
    /// first pane that claims it ends the walk.
    pub fn click(&mut self, event: &mut ClickEvent) -> bool {
        let _span = tracing::debug_span!(
            "surface.click",
            slot = event.slot(),
            click = ?event.kind()
        )
        .entered();

        self.restore_order();
        let area = self.grid.bounds();
        let mut ctx = ClickContext::new(event, self.grid.length());
        for pane in self.panes.iter().rev() {
            let Ok(mut pane) = pane.try_borrow_mut() else {
                tracing::trace!("pane is busy, skipped for click");
                continue;
            };
            if pane.click(&mut ctx, area) {
                return true;
            }
        }
        false
    }

    /// Click `slot`, observing whatever the last display put there.
    pub fn click_slot(&mut self, slot: usize, kind: ClickKind) -> (bool, ClickEvent) {
        let current = self.grid.get_slot(slot).map(Item::id);
        let mut event = ClickEvent::new(slot, kind).with_current(current);
        let matched = self.click(&mut event);
        (matched, event)
    }

    /// A surface with rows `from..=end` removed, sharing this surface's
    /// panes. Cells below the range move up.
    pub fn exclude_rows(&self, from: u16, end: u16) -> Result<Self, LayoutError> {
        Ok(Self {
            panes: self.panes.iter().map(Rc::clone).collect(),
            grid: self.grid.without_rows(from, end)?,
        })
    }

    /// Deep copy: every pane is copied and nothing is shared with `self`.
    pub fn copy(&self) -> Self {
        Self {
            panes: self
                .panes
                .iter()
                .map(|pane| pane.borrow().copy().into_ref())
                .collect(),
            grid: self.grid.clone(),
        }
    }

    pub fn item(&self, x: u16, y: u16) -> Option<&Item<P>> {
        self.grid.get(x, y)
    }

    /// Write a cell directly. The next display clears it.
    pub fn set_item(&mut self, x: u16, y: u16, item: Item<P>) -> Result<(), LayoutError> {
        if self.grid.set(x, y, item) {
            Ok(())
        } else {
            Err(LayoutError::SlotOutOfBounds {
                x,
                y,
                length: self.grid.length(),
                height: self.grid.height(),
            })
        }
    }

    pub fn take_item(&mut self, x: u16, y: u16) -> Option<Item<P>> {
        self.grid.take(x, y)
    }

    pub fn has_item(&self, x: u16, y: u16) -> bool {
        self.grid.has_item(x, y)
    }

    pub fn has_items(&self) -> bool {
        self.grid.has_items()
    }

    /// Occupied cells as `(x, y, item)` in row-major order.
    pub fn rendered(&self) -> impl Iterator<Item = (u16, u16, &Item<P>)> + '_ {
        self.grid.iter()
    }

    #[inline]
    pub fn length(&self) -> u16 {
        self.grid.length()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn is_in_bounds(&self, x: u16, y: u16) -> bool {
        self.grid.is_in_bounds(x, y)
    }

    pub fn grid(&self) -> &Grid<P> {
        &self.grid
    }
}

/// Priority of a top-level pane, `None` while it is borrowed elsewhere.
fn sort_key<P: Clone>(pane: &PaneRef<P>) -> Option<Priority> {
    pane.try_borrow().ok()?.try_priority()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::outline::OutlinePane;
    use slotgrid_core::{ItemContext, Priority, Slot};

    fn filler(ctx: &ItemContext, label: char, priority: Priority) -> OutlinePane<char> {
        OutlinePane::new(Slot::default(), 3, 1)
            .unwrap()
            .with_repeat(true)
            .with_priority(priority)
            .with_items([ctx.item(label)])
    }

    #[test]
    fn zero_sized_surface_rejected() {
        assert!(GridSurface::<char>::new(0, 6).is_err());
    }

    #[test]
    fn higher_priority_overwrites() {
        let ctx = ItemContext::new("test");
        let mut surface = GridSurface::new(3, 1).unwrap();
        surface.add_pane(filler(&ctx, 'h', Priority::High));
        surface.add_pane(filler(&ctx, 'l', Priority::Low));
        surface.display();
        assert_eq!(surface.item(1, 0).map(|i| *i.payload()), Some('h'));
    }

    #[test]
    fn priority_change_after_insertion_takes_effect() {
        let ctx = ItemContext::new("test");
        let mut surface = GridSurface::new(3, 1).unwrap();
        let low = surface.add_pane(filler(&ctx, 'a', Priority::Low));
        surface.add_pane(filler(&ctx, 'b', Priority::Normal));
        low.borrow_mut().set_priority(Priority::Monitor);
        surface.display();
        assert_eq!(surface.item(0, 0).map(|i| *i.payload()), Some('a'));
    }

    #[test]
    fn click_walks_descending_and_stops_at_first_match() {
        let ctx = ItemContext::new("test");
        let mut surface = GridSurface::new(3, 1).unwrap();
        surface.add_pane(filler(&ctx, 'l', Priority::Low));
        surface.add_pane(filler(&ctx, 'h', Priority::High));
        surface.display();
        let (matched, event) = surface.click_slot(2, ClickKind::Left);
        assert!(matched);
        assert!(event.failures().is_empty());

        let (matched, _) = surface.click_slot(3, ClickKind::Left);
        assert!(!matched);
    }

    #[test]
    fn set_item_bounds() {
        let ctx = ItemContext::new("test");
        let mut surface = GridSurface::new(2, 2).unwrap();
        assert!(surface.set_item(1, 1, ctx.item('x')).is_ok());
        assert_eq!(
            surface.set_item(2, 0, ctx.item('y')),
            Err(LayoutError::SlotOutOfBounds {
                x: 2,
                y: 0,
                length: 2,
                height: 2
            })
        );
        assert!(surface.has_item(1, 1));
        assert_eq!(surface.take_item(1, 1).map(|i| *i.payload()), Some('x'));
        assert!(!surface.has_items());
    }

    #[test]
    fn remove_pane_by_handle() {
        let ctx = ItemContext::new("test");
        let mut surface = GridSurface::new(3, 1).unwrap();
        let pane = surface.add_pane(filler(&ctx, 'a', Priority::Normal));
        assert!(surface.remove_pane(&pane));
        assert!(!surface.remove_pane(&pane));
        surface.display();
        assert!(!surface.has_items());
    }
}
