#![forbid(unsafe_code)]

//! The pane contract shared by every layout strategy and widget.
//!
//! A pane renders with [`Component::display`] and hit-tests with
//! [`Component::click`]. Both receive the same `area`: the accumulated offset
//! of every parent (`area.x`, `area.y`) and the maximum extent the pane may
//! use (`area.width`, `area.height`). [`PaneBase::region`] turns that into the
//! clamped rectangle the pane actually occupies, so the render and click paths
//! always agree on where a pane is.

use std::sync::atomic::{AtomicU64, Ordering};

use slotgrid_core::{
    Action, ActionResult, ClickEvent, Item, ItemId, LayoutError, Priority, Rect, Slot,
    validate_dimensions,
};
use slotgrid_render::Grid;

use crate::dispatch::{Origin, run_action};

static NEXT_PANE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a pane, for diagnostics and equality. Never used for
/// hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaneId(u64);

impl PaneId {
    fn fresh() -> Self {
        Self(NEXT_PANE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// State every pane carries: position, size, priority, visibility, identity
/// and an optional click interceptor.
#[derive(Debug, Clone)]
pub struct PaneBase {
    id: PaneId,
    slot: Slot,
    length: u16,
    height: u16,
    priority: Priority,
    visible: bool,
    on_click: Option<Action>,
}

impl PaneBase {
    /// Create a base for a `length` × `height` pane at `slot`.
    pub fn new(slot: Slot, length: u16, height: u16) -> Result<Self, LayoutError> {
        validate_dimensions(length, height)?;
        Ok(Self {
            id: PaneId::fresh(),
            slot,
            length,
            height,
            priority: Priority::Normal,
            visible: true,
            on_click: None,
        })
    }

    #[inline]
    pub fn id(&self) -> PaneId {
        self.id
    }

    #[inline]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn set_slot(&mut self, slot: Slot) {
        self.slot = slot;
    }

    #[inline]
    pub fn length(&self) -> u16 {
        self.length
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change the size. Callers owning a mask or pattern must re-derive it.
    pub fn set_size(&mut self, length: u16, height: u16) -> Result<(), LayoutError> {
        validate_dimensions(length, height)?;
        self.length = length;
        self.height = height;
        Ok(())
    }

    #[inline]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn on_click(&self) -> Option<&Action> {
        self.on_click.as_ref()
    }

    pub fn set_on_click(&mut self, action: Option<Action>) {
        self.on_click = action;
    }

    /// The rectangle this pane occupies when its parent hands it `area`.
    ///
    /// The slot is resolved against the parent's extent and the size is
    /// clamped to `min(length, area.width)` × `min(height, area.height)`.
    /// The clamp does not subtract the slot offset, so a child placed away
    /// from the parent's origin may reach past the parent's right or bottom
    /// edge. Those cells render into the grid but sit outside the parent's
    /// click region.
    pub fn region(&self, area: Rect) -> Rect {
        Rect::new(
            area.x.saturating_add(self.slot.x(area.width)),
            area.y.saturating_add(self.slot.y(area.width)),
            self.length.min(area.width),
            self.height.min(area.height),
        )
    }
}

/// Per-click routing state threaded through the pane tree.
#[derive(Debug)]
pub struct ClickContext<'a> {
    event: &'a mut ClickEvent,
    surface_length: u16,
}

impl<'a> ClickContext<'a> {
    /// `surface_length` is the width of the grid the event's slot indexes.
    pub fn new(event: &'a mut ClickEvent, surface_length: u16) -> Self {
        Self {
            event,
            surface_length,
        }
    }

    pub fn event(&self) -> &ClickEvent {
        &*self.event
    }

    pub fn event_mut(&mut self) -> &mut ClickEvent {
        &mut *self.event
    }

    /// Identity the host observed in the clicked slot.
    #[inline]
    pub fn current(&self) -> Option<ItemId> {
        self.event.current()
    }

    /// Clicked cell in surface coordinates.
    pub fn position(&self) -> Option<(u16, u16)> {
        if self.surface_length == 0 {
            return None;
        }
        let length = usize::from(self.surface_length);
        let slot = self.event.slot();
        let y = u16::try_from(slot / length).ok()?;
        Some(((slot % length) as u16, y))
    }

    /// Clicked cell relative to `region`, or `None` when the click landed
    /// outside it.
    pub fn local(&self, region: Rect) -> Option<(u16, u16)> {
        let (x, y) = self.position()?;
        region.to_local(x, y)
    }

    /// Fire the pane's interceptor, if any.
    pub fn intercept(&mut self, kind: &'static str, base: &PaneBase, region: Rect) {
        if let Some(action) = base.on_click() {
            let origin = Origin::new(kind, base.id(), region);
            run_action(action, &mut *self.event, &origin);
        }
    }

    /// Run an item's action. Returns `false` if the action failed; the failure
    /// is already logged and recorded on the event.
    pub fn activate<P>(
        &mut self,
        item: &Item<P>,
        kind: &'static str,
        base: &PaneBase,
        region: Rect,
    ) -> bool {
        tracing::trace!(
            pane.kind = kind,
            pane.id = base.id().get(),
            slot = self.event.slot(),
            item = item.id().get(),
            "click matched item"
        );
        match item.action() {
            Some(action) => run_action(
                action,
                &mut *self.event,
                &Origin::new(kind, base.id(), region),
            ),
            None => true,
        }
    }
}

/// Common interface of every pane kind.
///
/// Implementors render their items or children into a [`Grid`] and resolve
/// clicks against the same geometry.
pub trait Component<P> {
    /// Short name used in logs and failure reports.
    fn kind(&self) -> &'static str;

    fn base(&self) -> &PaneBase;

    fn base_mut(&mut self) -> &mut PaneBase;

    /// Write this pane's items into `grid`. `area` carries the accumulated
    /// parent offset and the maximum extent.
    fn display(&mut self, grid: &mut Grid<P>, area: Rect);

    /// Resolve a click. Returns whether an owned item or child claimed it.
    ///
    /// A click outside this pane's region returns `false` without side
    /// effects. Inside it the interceptor fires whether or not anything
    /// matches.
    fn click(&mut self, ctx: &mut ClickContext<'_>, area: Rect) -> bool;

    /// Deep copy: children and items are copied, ids are kept.
    fn copy(&self) -> Self
    where
        Self: Sized;

    /// Check that `resize(length, height)` would succeed without changing
    /// anything.
    fn check_size(&self, length: u16, height: u16) -> Result<(), LayoutError> {
        validate_dimensions(length, height)
    }

    /// Change the size, re-deriving any size-bound state.
    fn resize(&mut self, length: u16, height: u16) -> Result<(), LayoutError> {
        self.check_size(length, height)?;
        self.base_mut().set_size(length, height)
    }

    /// Visit every item owned directly or through children.
    fn visit_items(&self, visit: &mut dyn FnMut(&Item<P>));

    /// Drop all items and children.
    fn clear(&mut self);

    fn id(&self) -> PaneId {
        self.base().id()
    }

    fn slot(&self) -> Slot {
        self.base().slot()
    }

    fn set_slot(&mut self, slot: Slot) {
        self.base_mut().set_slot(slot);
    }

    fn length(&self) -> u16 {
        self.base().length()
    }

    fn height(&self) -> u16 {
        self.base().height()
    }

    fn priority(&self) -> Priority {
        self.base().priority()
    }

    fn set_priority(&mut self, priority: Priority) {
        self.base_mut().set_priority(priority);
    }

    fn is_visible(&self) -> bool {
        self.base().is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.base_mut().set_visible(visible);
    }

    /// Install an interceptor that fires on every click inside this pane.
    fn set_on_click<F>(&mut self, f: F)
    where
        F: Fn(&mut ClickEvent) -> ActionResult + 'static,
        Self: Sized,
    {
        self.base_mut().set_on_click(Some(Action::new(f)));
    }

    fn clear_on_click(&mut self) {
        self.base_mut().set_on_click(None);
    }

    #[must_use]
    fn with_priority(mut self, priority: Priority) -> Self
    where
        Self: Sized,
    {
        self.set_priority(priority);
        self
    }

    #[must_use]
    fn with_visible(mut self, visible: bool) -> Self
    where
        Self: Sized,
    {
        self.set_visible(visible);
        self
    }

    #[must_use]
    fn with_on_click<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut ClickEvent) -> ActionResult + 'static,
        Self: Sized,
    {
        self.set_on_click(f);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotgrid_core::ClickKind;

    #[test]
    fn zero_sized_base_rejected() {
        assert!(PaneBase::new(Slot::default(), 0, 1).is_err());
        assert!(PaneBase::new(Slot::default(), 1, 1).is_ok());
    }

    #[test]
    fn ids_are_unique() {
        let a = PaneBase::new(Slot::default(), 1, 1).unwrap();
        let b = PaneBase::new(Slot::default(), 1, 1).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn region_resolves_slot_and_clamps() {
        let base = PaneBase::new(Slot::from_xy(2, 1), 5, 4).unwrap();
        assert_eq!(base.region(Rect::new(1, 1, 3, 2)), Rect::new(3, 2, 3, 2));

        let indexed = PaneBase::new(Slot::from_index(11), 2, 2).unwrap();
        assert_eq!(indexed.region(Rect::from_size(9, 6)), Rect::new(2, 1, 2, 2));
    }

    #[test]
    fn region_clamp_ignores_slot_offset() {
        let area = Rect::from_size(4, 3);
        let base = PaneBase::new(Slot::from_xy(2, 1), 3, 3).unwrap();
        let region = base.region(area);
        assert_eq!(region, Rect::new(2, 1, 3, 3));
        assert!(region.x + region.width > area.x + area.width);
        assert!(region.y + region.height > area.y + area.height);
    }

    #[test]
    fn click_position_from_linear_slot() {
        let mut event = ClickEvent::new(21, ClickKind::Left);
        let ctx = ClickContext::new(&mut event, 9);
        assert_eq!(ctx.position(), Some((3, 2)));
        assert_eq!(ctx.local(Rect::new(2, 2, 3, 1)), Some((1, 0)));
        assert_eq!(ctx.local(Rect::new(4, 2, 3, 1)), None);
    }
}
