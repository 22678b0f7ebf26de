#![forbid(unsafe_code)]

//! Explicit per-cell placement.

use rustc_hash::FxHashMap;

use slotgrid_core::{
    Flip, Item, ItemId, LayoutError, Rect, Rotation, Slot, Transform, validate_dimensions,
};
use slotgrid_render::Grid;

use crate::component::{ClickContext, Component, PaneBase};

const KIND: &str = "static";

/// A pane whose items sit at explicit slots.
///
/// Slots are resolved against the pane's own length. Two entries that end up
/// on the same rendered cell are not an error; one of them is shown.
#[derive(Debug, Clone)]
pub struct StaticPane<P> {
    base: PaneBase,
    items: FxHashMap<Slot, Item<P>>,
    transform: Transform,
}

impl<P: Clone> StaticPane<P> {
    pub fn new(slot: Slot, length: u16, height: u16) -> Result<Self, LayoutError> {
        Ok(Self {
            base: PaneBase::new(slot, length, height)?,
            items: FxHashMap::default(),
            transform: Transform::IDENTITY,
        })
    }

    /// Place `item` at `slot`, replacing any entry stored under that slot.
    pub fn add_item(&mut self, item: Item<P>, slot: Slot) -> Option<Item<P>> {
        self.items.insert(slot, item)
    }

    #[must_use]
    pub fn with_item(mut self, item: Item<P>, slot: Slot) -> Self {
        self.add_item(item, slot);
        self
    }

    /// Remove every entry holding the item with `id`.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|_, item| item.id() != id);
        self.items.len() != before
    }

    /// Stored entries in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (Slot, &Item<P>)> + '_ {
        self.items.iter().map(|(slot, item)| (*slot, item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item stored for logical cell `(x, y)`, before flips and rotation.
    pub fn item_at(&self, x: u16, y: u16) -> Option<&Item<P>> {
        let length = self.base.length();
        self.items
            .iter()
            .find(|(slot, _)| slot.to_xy(length) == (x, y))
            .map(|(_, item)| item)
    }

    /// Add an item from `make` to every logical cell no entry occupies.
    ///
    /// Emptiness is checked in untransformed coordinates.
    pub fn fill_with(&mut self, mut make: impl FnMut() -> Item<P>) {
        let length = self.base.length();
        let height = self.base.height();
        for y in 0..height {
            for x in 0..length {
                if self.item_at(x, y).is_none() {
                    self.items.insert(Slot::from_xy(x, y), make());
                }
            }
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Rotate clockwise. Only square panes can be rotated.
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), LayoutError> {
        let next = Transform::new(rotation, self.transform.flip);
        next.validate(self.base.length(), self.base.height())?;
        self.transform = next;
        Ok(())
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Result<Self, LayoutError> {
        self.set_rotation(rotation)?;
        Ok(self)
    }

    pub fn set_flip(&mut self, flip: Flip) {
        self.transform.flip = flip;
    }

    #[must_use]
    pub fn with_flip(mut self, flip: Flip) -> Self {
        self.transform.flip = flip;
        self
    }

    fn logical(&self, slot: Slot) -> (u16, u16) {
        slot.to_xy(self.base.length())
    }
}

impl<P: Clone> Component<P> for StaticPane<P> {
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

        for (slot, item) in &self.items {
            if !item.is_visible() {
                continue;
            }
            let (x, y) = self.logical(*slot);
            let Some((x, y)) = self.transform.apply(x, y, region.width, region.height) else {
                continue;
            };
            grid.set(
                region.x.saturating_add(x),
                region.y.saturating_add(y),
                item.clone(),
            );
        }
    }

    fn click(&mut self, ctx: &mut ClickContext<'_>, area: Rect) -> bool {
        let region = self.base.region(area);
        let Some((x, y)) = ctx.local(region) else {
            return false;
        };
        ctx.intercept(KIND, &self.base, region);

        let Some(cell) = self.transform.invert(x, y, region.width, region.height) else {
            return false;
        };
        let current = ctx.current();
        let Some(item) = self.items.iter().find_map(|(slot, item)| {
            (item.is_visible() && self.logical(*slot) == cell && item.matches(current))
                .then_some(item)
        }) else {
            return false;
        };
        ctx.activate(item, KIND, &self.base, region);
        true
    }

    fn copy(&self) -> Self {
        self.clone()
    }

    fn check_size(&self, length: u16, height: u16) -> Result<(), LayoutError> {
        validate_dimensions(length, height)?;
        self.transform.validate(length, height)
    }

    fn resize(&mut self, length: u16, height: u16) -> Result<(), LayoutError> {
        self.check_size(length, height)?;
        self.base.set_size(length, height)
    }

    fn visit_items(&self, visit: &mut dyn FnMut(&Item<P>)) {
        self.items.values().for_each(|item| visit(item));
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotgrid_core::{ClickEvent, ClickKind, ItemContext};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn display_writes_at_slot_with_offset() {
        let ctx = ItemContext::new("test");
        let mut pane = StaticPane::new(Slot::from_xy(2, 1), 3, 2)
            .unwrap()
            .with_item(ctx.item('a'), Slot::from_xy(1, 1));
        let mut grid = Grid::new(9, 3);
        pane.display(&mut grid, Rect::from_size(9, 3));
        assert_eq!(grid.get(3, 2).map(|i| *i.payload()), Some('a'));
        assert_eq!(grid.iter().count(), 1);
    }

    #[test]
    fn index_slots_resolve_with_pane_length() {
        let ctx = ItemContext::new("test");
        let pane = StaticPane::new(Slot::default(), 3, 2)
            .unwrap()
            .with_item(ctx.item('a'), Slot::from_index(4));
        assert_eq!(pane.item_at(1, 1).map(|i| *i.payload()), Some('a'));
    }

    #[test]
    fn entries_outside_clamped_extent_are_skipped() {
        let ctx = ItemContext::new("test");
        let mut pane = StaticPane::new(Slot::default(), 4, 1)
            .unwrap()
            .with_item(ctx.item('a'), Slot::from_xy(3, 0));
        let mut grid = Grid::new(2, 1);
        pane.display(&mut grid, Rect::from_size(2, 1));
        assert!(!grid.has_items());
    }

    #[test]
    fn click_matches_and_runs_action_once() {
        let ctx = ItemContext::new("test");
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let item = ctx.item('a').with_action(move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        });
        let id = item.id();
        let mut pane = StaticPane::new(Slot::default(), 3, 3)
            .unwrap()
            .with_item(item, Slot::from_xy(2, 1));

        let mut event = ClickEvent::new(5, ClickKind::Left).with_current(Some(id));
        let mut click = ClickContext::new(&mut event, 3);
        assert!(pane.click(&mut click, Rect::from_size(3, 3)));
        assert_eq!(hits.get(), 1);

        // Same cell, different observed identity.
        let other = ctx.item('a');
        let mut event = ClickEvent::new(5, ClickKind::Left).with_current(Some(other.id()));
        let mut click = ClickContext::new(&mut event, 3);
        assert!(!pane.click(&mut click, Rect::from_size(3, 3)));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn click_resolves_through_flip() {
        let ctx = ItemContext::new("test");
        let item = ctx.item('a');
        let id = item.id();
        let mut pane = StaticPane::new(Slot::default(), 3, 1)
            .unwrap()
            .with_item(item, Slot::from_xy(0, 0))
            .with_flip(Flip::HORIZONTAL);
        let mut grid = Grid::new(3, 1);
        pane.display(&mut grid, Rect::from_size(3, 1));
        assert_eq!(grid.get(2, 0).map(|i| i.id()), Some(id));

        let mut event = ClickEvent::new(2, ClickKind::Left).with_current(Some(id));
        let mut click = ClickContext::new(&mut event, 3);
        assert!(pane.click(&mut click, Rect::from_size(3, 1)));
        let mut event = ClickEvent::new(0, ClickKind::Left).with_current(Some(id));
        let mut click = ClickContext::new(&mut event, 3);
        assert!(!pane.click(&mut click, Rect::from_size(3, 1)));
    }

    #[test]
    fn interceptor_fires_without_match() {
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let mut pane: StaticPane<char> = StaticPane::new(Slot::default(), 2, 2)
            .unwrap()
            .with_on_click(move |_| {
                flag.set(true);
                Ok(())
            });
        let mut event = ClickEvent::new(3, ClickKind::Left);
        let mut click = ClickContext::new(&mut event, 2);
        assert!(!pane.click(&mut click, Rect::from_size(2, 2)));
        assert!(fired.get());

        fired.set(false);
        let mut event = ClickEvent::new(7, ClickKind::Left);
        let mut click = ClickContext::new(&mut event, 4);
        assert!(!pane.click(&mut click, Rect::from_size(4, 2)));
        assert!(!fired.get());
    }

    #[test]
    fn fill_with_uses_untransformed_cells() {
        let ctx = ItemContext::new("test");
        let mut pane = StaticPane::new(Slot::default(), 2, 2)
            .unwrap()
            .with_item(ctx.item('a'), Slot::from_xy(0, 0))
            .with_rotation(Rotation::Clockwise90)
            .unwrap();
        pane.fill_with(|| ctx.item('.'));
        assert_eq!(pane.len(), 4);
        assert_eq!(pane.item_at(0, 0).map(|i| *i.payload()), Some('a'));
        assert_eq!(pane.item_at(1, 1).map(|i| *i.payload()), Some('.'));
    }

    #[test]
    fn remove_and_clear() {
        let ctx = ItemContext::new("test");
        let item = ctx.item('a');
        let id = item.id();
        let mut pane = StaticPane::new(Slot::default(), 2, 1)
            .unwrap()
            .with_item(item, Slot::from_xy(0, 0))
            .with_item(ctx.item('b'), Slot::from_xy(1, 0));
        assert!(pane.remove_item(id));
        assert_eq!(pane.len(), 1);
        pane.clear();
        assert!(pane.is_empty());
    }

    #[test]
    fn resize_rejects_non_square_while_rotated() {
        let mut pane: StaticPane<()> = StaticPane::new(Slot::default(), 2, 2)
            .unwrap()
            .with_rotation(Rotation::Clockwise180)
            .unwrap();
        assert!(matches!(
            pane.resize(3, 2),
            Err(LayoutError::RotationRequiresSquare { .. })
        ));
        assert!(pane.resize(3, 3).is_ok());
    }
}
