#![forbid(unsafe_code)]

use slotgrid_core::{Item, LayoutError, Rect, Slot};
use slotgrid_render::Grid;

use crate::component::{ClickContext, Component, PaneBase};
use crate::pane::{PageGroup, PageGroupLookup};

const KIND: &str = "paging_buttons";

/// Backward/forward controls for a paginated pane.
///
/// A one-row strip: the backward item sits on the first cell and the forward
/// item on the last. Each is shown only while there is a page to move to.
#[derive(Debug)]
pub struct PagingButtons<P> {
    base: PaneBase,
    target: PageGroup<P>,
    backward: Item<P>,
    forward: Item<P>,
}

impl<P: Clone> PagingButtons<P> {
    pub fn new(
        slot: Slot,
        length: u16,
        target: PageGroup<P>,
        backward: Item<P>,
        forward: Item<P>,
    ) -> Result<Self, LayoutError> {
        if length < 2 {
            return Err(LayoutError::PagingTooNarrow { length });
        }
        Ok(Self {
            base: PaneBase::new(slot, length, 1)?,
            target,
            backward,
            forward,
        })
    }

    /// Build controls for the page group registered under `name`.
    pub fn resolve(
        lookup: &impl PageGroupLookup<P>,
        name: &str,
        slot: Slot,
        length: u16,
        backward: Item<P>,
        forward: Item<P>,
    ) -> Result<Self, LayoutError> {
        let target = lookup
            .page_group(name)
            .ok_or_else(|| LayoutError::UnknownPageGroup {
                name: name.to_string(),
            })?;
        Self::new(slot, length, target, backward, forward)
    }

    pub fn target(&self) -> &PageGroup<P> {
        &self.target
    }

    pub fn backward(&self) -> &Item<P> {
        &self.backward
    }

    pub fn forward(&self) -> &Item<P> {
        &self.forward
    }

    /// Pages reachable backward and forward, if the target can be read.
    fn neighbours(&self) -> Option<(Option<usize>, Option<usize>)> {
        let target = self.target.try_borrow()?;
        Some((target.previous_page(), target.next_page()))
    }
}

impl<P: Clone> Component<P> for PagingButtons<P> {
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
        let Some((previous, next)) = self.neighbours() else {
            tracing::trace!(pane.id = self.base.id().get(), "paging target busy, buttons hidden");
            return;
        };
        if previous.is_some() && self.backward.is_visible() {
            grid.set(region.x, region.y, self.backward.clone());
        }
        if next.is_some() && self.forward.is_visible() {
            grid.set(
                region.x.saturating_add(region.width - 1),
                region.y,
                self.forward.clone(),
            );
        }
    }

    fn click(&mut self, ctx: &mut ClickContext<'_>, area: Rect) -> bool {
        let region = self.base.region(area);
        let Some((x, _)) = ctx.local(region) else {
            return false;
        };
        ctx.intercept(KIND, &self.base, region);

        let Some((previous, next)) = self.neighbours() else {
            tracing::trace!(pane.id = self.base.id().get(), "paging target busy, click ignored");
            return false;
        };
        let (item, page) = if x == 0 {
            (&self.backward, previous)
        } else if x == region.width - 1 {
            (&self.forward, next)
        } else {
            return false;
        };
        let Some(page) = page else {
            return false;
        };
        if !item.is_visible() || !item.matches(ctx.current()) {
            return false;
        }

        match self.target.try_borrow_mut() {
            Some(mut target) => {
                if let Err(err) = target.set_page(page) {
                    tracing::warn!(
                        pane.id = self.base.id().get(),
                        error = %err,
                        "page change failed"
                    );
                    return false;
                }
            }
            None => {
                tracing::trace!(
                    pane.id = self.base.id().get(),
                    "paging target busy, click ignored"
                );
                return false;
            }
        }
        ctx.activate(item, KIND, &self.base, region);
        true
    }

    /// The copy controls the same page group.
    fn copy(&self) -> Self {
        Self {
            base: self.base.clone(),
            target: self.target.clone(),
            backward: self.backward.clone(),
            forward: self.forward.clone(),
        }
    }

    fn check_size(&self, length: u16, height: u16) -> Result<(), LayoutError> {
        if length < 2 {
            return Err(LayoutError::PagingTooNarrow { length });
        }
        if height != 1 {
            return Err(LayoutError::InvalidDimensions { length, height });
        }
        Ok(())
    }

    fn resize(&mut self, length: u16, height: u16) -> Result<(), LayoutError> {
        self.check_size(length, height)?;
        self.base.set_size(length, height)
    }

    fn visit_items(&self, visit: &mut dyn FnMut(&Item<P>)) {
        visit(&self.backward);
        visit(&self.forward);
    }

    /// The two buttons are fixed.
    fn clear(&mut self) {}
}
