#![forbid(unsafe_code)]

use slotgrid_core::{Item, LayoutError, Rect, Slot, validate_dimensions};
use slotgrid_render::Grid;

use crate::component::{ClickContext, Component, PaneBase};
use crate::pane::Pane;

const KIND: &str = "cycle";

/// A button that shows one of several options and advances to the next on
/// every click, wrapping back to the first.
#[derive(Debug)]
pub struct CycleButton<P> {
    base: PaneBase,
    options: Vec<Pane<P>>,
    position: usize,
}

impl<P: Clone> CycleButton<P> {
    pub fn new(slot: Slot, length: u16, height: u16) -> Result<Self, LayoutError> {
        Ok(Self {
            base: PaneBase::new(slot, length, height)?,
            options: Vec::new(),
            position: 0,
        })
    }

    /// A button over a non-empty list of options.
    pub fn from_options(
        slot: Slot,
        length: u16,
        height: u16,
        options: impl IntoIterator<Item = Pane<P>>,
    ) -> Result<Self, LayoutError> {
        let mut button = Self::new(slot, length, height)?;
        button.options.extend(options);
        if button.options.is_empty() {
            return Err(LayoutError::EmptyCycle);
        }
        Ok(button)
    }

    pub fn add_option(&mut self, pane: impl Into<Pane<P>>) {
        self.options.push(pane.into());
    }

    #[must_use]
    pub fn with_option(mut self, pane: impl Into<Pane<P>>) -> Self {
        self.add_option(pane);
        self
    }

    pub fn options(&self) -> &[Pane<P>] {
        &self.options
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Select an option. Positions past the end wrap.
    pub fn set_position(&mut self, position: usize) -> Result<(), LayoutError> {
        if self.options.is_empty() {
            return Err(LayoutError::EmptyCycle);
        }
        self.position = position % self.options.len();
        Ok(())
    }

    /// Advance to the next option. Does nothing without options.
    pub fn cycle(&mut self) {
        if !self.options.is_empty() {
            self.position = (self.position + 1) % self.options.len();
        }
    }

    pub fn active(&self) -> Option<&Pane<P>> {
        self.options.get(self.position)
    }
}

impl<P: Clone> Component<P> for CycleButton<P> {
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
        if let Some(option) = self.options.get_mut(self.position) {
            option.display(grid, region);
        }
    }

    fn click(&mut self, ctx: &mut ClickContext<'_>, area: Rect) -> bool {
        let region = self.base.region(area);
        if ctx.local(region).is_none() {
            return false;
        }
        ctx.intercept(KIND, &self.base, region);
        let Some(option) = self.options.get_mut(self.position) else {
            return false;
        };
        option.click(ctx, region);
        self.cycle();
        true
    }

    fn copy(&self) -> Self {
        Self {
            base: self.base.clone(),
            options: self.options.iter().map(Pane::copy).collect(),
            position: self.position,
        }
    }

    fn check_size(&self, length: u16, height: u16) -> Result<(), LayoutError> {
        validate_dimensions(length, height)?;
        self.options
            .iter()
            .try_for_each(|option| option.check_size(length, height))
    }

    /// Every option follows the button size. Nothing changes unless every
    /// option accepts the new size.
    fn resize(&mut self, length: u16, height: u16) -> Result<(), LayoutError> {
        self.check_size(length, height)?;
        self.options
            .iter_mut()
            .try_for_each(|option| option.resize(length, height))?;
        self.base.set_size(length, height)
    }

    fn visit_items(&self, visit: &mut dyn FnMut(&Item<P>)) {
        for option in &self.options {
            option.visit_items(visit);
        }
    }

    fn clear(&mut self) {
        self.options.clear();
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::OutlinePane;
    use slotgrid_core::{ClickEvent, ClickKind, ItemContext, Rotation};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn option(ctx: &ItemContext, label: u8, log: &Rc<RefCell<Vec<u8>>>) -> Pane<u8> {
        let log = Rc::clone(log);
        let item = ctx.item(label).with_action(move |_| {
            log.borrow_mut().push(label);
            Ok(())
        });
        OutlinePane::new(Slot::default(), 1, 1)
            .unwrap()
            .with_items([item])
            .into()
    }

    fn click_once(button: &mut CycleButton<u8>, grid: &mut Grid<u8>) -> bool {
        grid.clear();
        button.display(grid, Rect::from_size(1, 1));
        let current = grid.get(0, 0).map(|i| i.id());
        let mut event = ClickEvent::new(0, ClickKind::Left).with_current(current);
        let mut click = ClickContext::new(&mut event, 1);
        button.click(&mut click, Rect::from_size(1, 1))
    }

    #[test]
    fn delegates_to_previous_option_then_wraps() {
        let ctx = ItemContext::new("test");
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut button = CycleButton::from_options(
            Slot::default(),
            1,
            1,
            [option(&ctx, 0, &log), option(&ctx, 1, &log), option(&ctx, 2, &log)],
        )
        .unwrap();
        let mut grid = Grid::new(1, 1);
        for _ in 0..4 {
            assert!(click_once(&mut button, &mut grid));
        }
        assert_eq!(*log.borrow(), vec![0, 1, 2, 0]);
        assert_eq!(button.position(), 1);
    }

    #[test]
    fn empty_cycle() {
        assert_eq!(
            CycleButton::<u8>::from_options(Slot::default(), 1, 1, []).err(),
            Some(LayoutError::EmptyCycle)
        );
        let mut button = CycleButton::<u8>::new(Slot::default(), 1, 1).unwrap();
        assert_eq!(button.set_position(1), Err(LayoutError::EmptyCycle));
        let mut grid = Grid::new(1, 1);
        assert!(!click_once(&mut button, &mut grid));
    }

    #[test]
    fn set_position_wraps() {
        let ctx = ItemContext::new("test");
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut button = CycleButton::new(Slot::default(), 1, 1)
            .unwrap()
            .with_option(option(&ctx, 0, &log))
            .with_option(option(&ctx, 1, &log));
        button.set_position(5).unwrap();
        assert_eq!(button.position(), 1);
    }

    #[test]
    fn rejected_resize_leaves_every_option_unchanged() {
        let ctx = ItemContext::new("test");
        let log = Rc::new(RefCell::new(Vec::new()));
        let square = |label: u8| -> Pane<u8> {
            OutlinePane::new(Slot::default(), 2, 2)
                .unwrap()
                .with_items([ctx.item(label)])
                .into()
        };
        let rotated: Pane<u8> = OutlinePane::new(Slot::default(), 2, 2)
            .unwrap()
            .with_rotation(Rotation::Clockwise270)
            .unwrap()
            .into();
        let mut button = CycleButton::from_options(
            Slot::default(),
            2,
            2,
            [square(0), square(1), rotated, option(&ctx, 3, &log)],
        )
        .unwrap();

        assert!(matches!(
            button.resize(2, 4),
            Err(LayoutError::RotationRequiresSquare { .. })
        ));
        assert_eq!((button.length(), button.height()), (2, 2));
        let sizes: Vec<_> = button
            .options()
            .iter()
            .map(|option| (option.length(), option.height()))
            .collect();
        assert_eq!(sizes, vec![(2, 2), (2, 2), (2, 2), (1, 1)]);
    }
}
