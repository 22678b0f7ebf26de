#![forbid(unsafe_code)]

//! Template placement: a character grid plus a character → item table.

use rustc_hash::FxHashMap;

use slotgrid_core::{
    Flip, Item, LayoutError, Pattern, Rect, Rotation, Slot, Transform, validate_dimensions,
};
use slotgrid_render::Grid;

use crate::component::{ClickContext, Component, PaneBase};

const KIND: &str = "pattern";

/// A pane rendered from a [`Pattern`]. Cells whose character has no bound
/// item stay empty.
#[derive(Debug, Clone)]
pub struct PatternPane<P> {
    base: PaneBase,
    pattern: Pattern,
    bindings: FxHashMap<char, Item<P>>,
    transform: Transform,
}

impl<P: Clone> PatternPane<P> {
    /// A pane whose pattern is all [`Pattern::FILL`].
    pub fn new(slot: Slot, length: u16, height: u16) -> Result<Self, LayoutError> {
        Ok(Self {
            base: PaneBase::new(slot, length, height)?,
            pattern: Pattern::filled(length, height, Pattern::FILL),
            bindings: FxHashMap::default(),
            transform: Transform::IDENTITY,
        })
    }

    /// A pane sized to `pattern`.
    pub fn from_pattern(slot: Slot, pattern: Pattern) -> Result<Self, LayoutError> {
        let mut pane = Self::new(slot, pattern.length(), pattern.height())?;
        pane.pattern = pattern;
        Ok(pane)
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Replace the pattern. It must match the pane's size.
    pub fn set_pattern(&mut self, pattern: Pattern) -> Result<(), LayoutError> {
        let expected = (self.base.length(), self.base.height());
        let actual = (pattern.length(), pattern.height());
        if expected != actual {
            return Err(LayoutError::PatternSizeMismatch { expected, actual });
        }
        self.pattern = pattern;
        Ok(())
    }

    /// Bind `ch` to `item`. Returns the previous binding.
    pub fn bind_item(&mut self, ch: char, item: Item<P>) -> Option<Item<P>> {
        self.bindings.insert(ch, item)
    }

    #[must_use]
    pub fn with_binding(mut self, ch: char, item: Item<P>) -> Self {
        self.bind_item(ch, item);
        self
    }

    pub fn unbind(&mut self, ch: char) -> Option<Item<P>> {
        self.bindings.remove(&ch)
    }

    pub fn binding(&self, ch: char) -> Option<&Item<P>> {
        self.bindings.get(&ch)
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

    fn bound_at(&self, x: u16, y: u16) -> Option<&Item<P>> {
        self.pattern
            .char_at(x, y)
            .and_then(|ch| self.bindings.get(&ch))
            .filter(|item| item.is_visible())
    }
}

impl<P: Clone> Component<P> for PatternPane<P> {
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

        for y in 0..region.height {
            for x in 0..region.width {
                let Some(item) = self.bound_at(x, y) else {
                    continue;
                };
                if let Some((tx, ty)) = self.transform.apply(x, y, region.width, region.height) {
                    grid.set(
                        region.x.saturating_add(tx),
                        region.y.saturating_add(ty),
                        item.clone(),
                    );
                }
            }
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
        match self.bound_at(lx, ly) {
            Some(item) if item.matches(ctx.current()) => {
                ctx.activate(item, KIND, &self.base, region);
                true
            }
            _ => false,
        }
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
        self.pattern = self.pattern.resized(length, height);
        Ok(())
    }

    fn visit_items(&self, visit: &mut dyn FnMut(&Item<P>)) {
        self.bindings.values().for_each(|item| visit(item));
    }

    fn clear(&mut self) {
        self.bindings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotgrid_core::{ClickEvent, ClickKind, ItemContext};

    fn border() -> PatternPane<char> {
        let ctx = ItemContext::new("test");
        let pattern = Pattern::new(["###", "#o#", "###"]).unwrap();
        PatternPane::from_pattern(Slot::default(), pattern)
            .unwrap()
            .with_binding('#', ctx.item('#'))
            .with_binding('o', ctx.item('o'))
    }

    fn rows(grid: &Grid<char>) -> Vec<String> {
        (0..grid.height())
            .map(|y| {
                (0..grid.length())
                    .map(|x| grid.get(x, y).map_or('.', |i| *i.payload()))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn renders_bound_characters_only() {
        let mut pane = border();
        pane.unbind('o');
        let mut grid = Grid::new(3, 3);
        pane.display(&mut grid, Rect::from_size(3, 3));
        assert_eq!(rows(&grid), vec!["###", "#.#", "###"]);
    }

    #[test]
    fn set_pattern_checks_size() {
        let mut pane = border();
        assert!(matches!(
            pane.set_pattern(Pattern::new(["ab"]).unwrap()),
            Err(LayoutError::PatternSizeMismatch {
                expected: (3, 3),
                actual: (2, 1)
            })
        ));
        assert!(pane.set_pattern(Pattern::new(["o  ", "   ", "  #"]).unwrap()).is_ok());
    }

    #[test]
    fn rotation_moves_cells() {
        let ctx = ItemContext::new("test");
        let pattern = Pattern::new(["ab", "  "]).unwrap();
        let mut pane = PatternPane::from_pattern(Slot::default(), pattern)
            .unwrap()
            .with_binding('a', ctx.item('a'))
            .with_binding('b', ctx.item('b'))
            .with_rotation(Rotation::Clockwise90)
            .unwrap();
        let mut grid = Grid::new(2, 2);
        pane.display(&mut grid, Rect::from_size(2, 2));
        assert_eq!(rows(&grid), vec![".a", ".b"]);
    }

    #[test]
    fn click_matches_bound_item_by_identity() {
        let mut pane = border();
        let center = pane.binding('o').map(|i| i.id());
        let edge = pane.binding('#').map(|i| i.id());

        let mut event = ClickEvent::new(4, ClickKind::Left).with_current(center);
        let mut ctx = ClickContext::new(&mut event, 3);
        assert!(pane.click(&mut ctx, Rect::from_size(3, 3)));

        let mut event = ClickEvent::new(4, ClickKind::Left).with_current(edge);
        let mut ctx = ClickContext::new(&mut event, 3);
        assert!(!pane.click(&mut ctx, Rect::from_size(3, 3)));
    }

    #[test]
    fn resize_pads_pattern() {
        let mut pane = border();
        pane.resize(4, 2).unwrap();
        assert_eq!(pane.pattern().to_rows(), vec!["### ", "#o# "]);
    }
}
