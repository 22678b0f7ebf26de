#![forbid(unsafe_code)]

//! Sequential placement along one axis.
//!
//! Items are laid out line by line (rows for [`Orientation::Horizontal`],
//! columns for [`Orientation::Vertical`]) over the cells the [`Mask`]
//! enables. Within a line, `gap` enabled cells are left empty after each
//! item and [`Alignment`] decides where the run starts. With `repeat` the
//! sequence wraps until the pane is full.
//!
//! Rendering and hit-testing share [`OutlinePane::placements`], so a click
//! resolves to exactly the item the last display pass put in that cell.

use smallvec::SmallVec;

use slotgrid_core::{
    Alignment, Flip, Item, ItemId, LayoutError, Mask, Orientation, Rect, Rotation, Slot, Transform,
    validate_dimensions,
};
use slotgrid_render::Grid;

use crate::component::{ClickContext, Component, PaneBase};

const KIND: &str = "outline";

/// One placed item: logical cell and index into the pane's item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u16,
    pub y: u16,
    pub item: usize,
}

/// A pane that places a sequence of items along an axis.
#[derive(Debug, Clone)]
pub struct OutlinePane<P> {
    base: PaneBase,
    items: Vec<Item<P>>,
    mask: Mask,
    orientation: Orientation,
    alignment: Alignment,
    gap: u16,
    repeat: bool,
    transform: Transform,
}

impl<P: Clone> OutlinePane<P> {
    pub fn new(slot: Slot, length: u16, height: u16) -> Result<Self, LayoutError> {
        let base = PaneBase::new(slot, length, height)?;
        Ok(Self {
            base,
            items: Vec::new(),
            mask: Mask::filled(length, height, true),
            orientation: Orientation::Horizontal,
            alignment: Alignment::Start,
            gap: 0,
            repeat: false,
            transform: Transform::IDENTITY,
        })
    }

    /// Append an item to the sequence.
    pub fn add_item(&mut self, item: Item<P>) {
        self.items.push(item);
    }

    /// Insert an item at `index` in the sequence (clamped to the end).
    pub fn insert_item(&mut self, index: usize, item: Item<P>) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// Remove every item with the given id. Returns whether any was removed.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Item<P>] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [Item<P>] {
        &mut self.items
    }

    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = Item<P>>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Replace the mask. It must match the pane's size.
    pub fn apply_mask(&mut self, mask: Mask) -> Result<(), LayoutError> {
        let expected = (self.base.length(), self.base.height());
        let actual = (mask.length(), mask.height());
        if expected != actual {
            return Err(LayoutError::MaskSizeMismatch { expected, actual });
        }
        self.mask = mask;
        Ok(())
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

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn gap(&self) -> u16 {
        self.gap
    }

    pub fn set_gap(&mut self, gap: u16) {
        self.gap = gap;
    }

    #[must_use]
    pub fn with_gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    pub fn repeats(&self) -> bool {
        self.repeat
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    #[must_use]
    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
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

    /// Where each visible item lands in logical (untransformed) coordinates
    /// when the pane is clamped to `length` × `height`.
    pub fn placements(&self, length: u16, height: u16) -> Vec<Placement> {
        let visible: SmallVec<[usize; 32]> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_visible())
            .map(|(index, _)| index)
            .collect();
        let mut placed = Vec::new();
        if visible.is_empty() {
            return placed;
        }

        let (lines, cells) = match self.orientation {
            Orientation::Horizontal => (height, length),
            Orientation::Vertical => (length, height),
        };
        let cell = |line: u16, offset: u16| match self.orientation {
            Orientation::Horizontal => (offset, line),
            Orientation::Vertical => (line, offset),
        };
        let stride = usize::from(self.gap) + 1;
        let mut next = 0usize;

        for line in 0..lines {
            let eligible: SmallVec<[u16; 16]> = (0..cells)
                .filter(|offset| {
                    let (x, y) = cell(line, *offset);
                    self.mask.is_enabled(x, y)
                })
                .collect();
            if eligible.is_empty() {
                continue;
            }

            let fit = (eligible.len() + usize::from(self.gap)) / stride;
            let count = if self.repeat {
                fit
            } else {
                fit.min(visible.len() - next)
            };
            if count == 0 {
                continue;
            }

            let used = count + (count - 1) * usize::from(self.gap);
            let free = eligible.len() - used;
            let lead = match self.alignment {
                Alignment::Start => 0,
                Alignment::Center => free / 2,
                Alignment::End => free,
            };

            for k in 0..count {
                let (x, y) = cell(line, eligible[lead + k * stride]);
                placed.push(Placement {
                    x,
                    y,
                    item: visible[next],
                });
                next += 1;
                if next == visible.len() {
                    if !self.repeat {
                        return placed;
                    }
                    next = 0;
                }
            }
        }
        placed
    }
}

impl<P: Clone> Component<P> for OutlinePane<P> {
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

        for placement in self.placements(region.width, region.height) {
            let Some((x, y)) =
                self.transform
                    .apply(placement.x, placement.y, region.width, region.height)
            else {
                continue;
            };
            grid.set(
                region.x.saturating_add(x),
                region.y.saturating_add(y),
                self.items[placement.item].clone(),
            );
        }
    }

    fn click(&mut self, ctx: &mut ClickContext<'_>, area: Rect) -> bool {
        let region = self.base.region(area);
        let Some((x, y)) = ctx.local(region) else {
            return false;
        };
        ctx.intercept(KIND, &self.base, region);

        let Some((lx, ly)) = self.transform.invert(x, y, region.width, region.height) else {
            return false;
        };
        let Some(placement) = self
            .placements(region.width, region.height)
            .into_iter()
            .find(|p| p.x == lx && p.y == ly)
        else {
            return false;
        };
        let item = &self.items[placement.item];
        if !item.matches(ctx.current()) {
            return false;
        }
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
        self.base.set_size(length, height)?;
        self.mask = self.mask.resized(length, height);
        Ok(())
    }

    fn visit_items(&self, visit: &mut dyn FnMut(&Item<P>)) {
        self.items.iter().for_each(|item| visit(item));
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}
