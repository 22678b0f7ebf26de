#![forbid(unsafe_code)]

use slotgrid_core::{Item, LayoutError, Rect, Slot, validate_dimensions};
use slotgrid_render::Grid;

use crate::component::{ClickContext, Component, PaneBase};
use crate::outline::OutlinePane;
use crate::pane::Pane;

const KIND: &str = "toggle";

/// Two-state button. Shows the enabled or the disabled sub-pane and flips on
/// every click inside it.
#[derive(Debug)]
pub struct ToggleButton<P> {
    base: PaneBase,
    enabled: Box<Pane<P>>,
    disabled: Box<Pane<P>>,
    state: bool,
}

impl<P: Clone> ToggleButton<P> {
    /// Sub-panes are positioned relative to the button.
    pub fn new(
        slot: Slot,
        length: u16,
        height: u16,
        enabled: impl Into<Pane<P>>,
        disabled: impl Into<Pane<P>>,
    ) -> Result<Self, LayoutError> {
        Ok(Self {
            base: PaneBase::new(slot, length, height)?,
            enabled: Box::new(enabled.into()),
            disabled: Box::new(disabled.into()),
            state: false,
        })
    }

    /// A button filled with `enabled` or `disabled` over its whole area.
    pub fn from_items(
        slot: Slot,
        length: u16,
        height: u16,
        enabled: Item<P>,
        disabled: Item<P>,
    ) -> Result<Self, LayoutError> {
        let fill = |item: Item<P>| -> Result<OutlinePane<P>, LayoutError> {
            Ok(OutlinePane::new(Slot::default(), length, height)?
                .with_repeat(true)
                .with_items([item]))
        };
        Self::new(slot, length, height, fill(enabled)?, fill(disabled)?)
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.state
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.state = enabled;
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.state = enabled;
        self
    }

    pub fn toggle(&mut self) {
        self.state = !self.state;
    }

    pub fn enabled_pane(&self) -> &Pane<P> {
        &self.enabled
    }

    pub fn disabled_pane(&self) -> &Pane<P> {
        &self.disabled
    }

    fn active_mut(&mut self) -> &mut Pane<P> {
        if self.state {
            self.enabled.as_mut()
        } else {
            self.disabled.as_mut()
        }
    }
}

impl<P: Clone> Component<P> for ToggleButton<P> {
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
        self.active_mut().display(grid, region);
    }

    fn click(&mut self, ctx: &mut ClickContext<'_>, area: Rect) -> bool {
        let region = self.base.region(area);
        if ctx.local(region).is_none() {
            return false;
        }
        ctx.intercept(KIND, &self.base, region);
        self.active_mut().click(ctx, region);
        self.toggle();
        true
    }

    fn copy(&self) -> Self {
        Self {
            base: self.base.clone(),
            enabled: Box::new(self.enabled.copy()),
            disabled: Box::new(self.disabled.copy()),
            state: self.state,
        }
    }

    fn check_size(&self, length: u16, height: u16) -> Result<(), LayoutError> {
        validate_dimensions(length, height)?;
        self.enabled.check_size(length, height)?;
        self.disabled.check_size(length, height)
    }

    /// Both sub-panes follow the button size. Nothing changes unless every
    /// part accepts the new size.
    fn resize(&mut self, length: u16, height: u16) -> Result<(), LayoutError> {
        self.check_size(length, height)?;
        self.enabled.resize(length, height)?;
        self.disabled.resize(length, height)?;
        self.base.set_size(length, height)
    }

    fn visit_items(&self, visit: &mut dyn FnMut(&Item<P>)) {
        self.enabled.visit_items(visit);
        self.disabled.visit_items(visit);
    }

    fn clear(&mut self) {
        self.enabled.clear();
        self.disabled.clear();
    }
}
