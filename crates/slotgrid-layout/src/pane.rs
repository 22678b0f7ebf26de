#![forbid(unsafe_code)]

//! The closed set of pane kinds.
//!
//! [`Pane`] is what containers hold: a surface, a masonry pane, a page of a
//! paginated pane and the sub-panes of widgets. Dispatch is a `match` per
//! operation; every variant other than [`Pane::Paginated`] is owned inline.
//!
//! Paginated panes live behind a [`PageGroup`] so paging controls elsewhere
//! in the tree can flip their page. While a group is mutably borrowed (it is
//! rendering or routing a click) it cannot be reached through another handle;
//! such accesses are skipped rather than blocking.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use std::rc::Rc;

use slotgrid_core::{Action, ActionResult, ClickEvent, Item, LayoutError, Priority, Rect, Slot};
use slotgrid_render::Grid;

use crate::component::{ClickContext, Component, PaneId};
use crate::masonry::MasonryPane;
use crate::outline::OutlinePane;
use crate::paginated::PaginatedPane;
use crate::pattern_pane::PatternPane;
use crate::static_pane::StaticPane;
use crate::widgets::{CycleButton, PagingButtons, PercentageBar, Slider, ToggleButton};

/// Shared handle to a top-level pane of a surface.
pub type PaneRef<P> = Rc<RefCell<Pane<P>>>;

/// Shared handle to a [`PaginatedPane`].
///
/// Cloning the handle shares the pane; use [`PageGroup::copy`] for an
/// independent copy.
pub struct PageGroup<P>(Rc<RefCell<PaginatedPane<P>>>);

impl<P> PageGroup<P> {
    pub fn new(pane: PaginatedPane<P>) -> Self {
        Self(Rc::new(RefCell::new(pane)))
    }

    /// Borrow the pane.
    ///
    /// # Panics
    ///
    /// Panics if the pane is currently mutably borrowed, which only happens
    /// from inside its own display or click routing.
    pub fn borrow(&self) -> Ref<'_, PaginatedPane<P>> {
        self.0.borrow()
    }

    /// Mutably borrow the pane.
    ///
    /// # Panics
    ///
    /// Panics if the pane is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, PaginatedPane<P>> {
        self.0.borrow_mut()
    }

    pub fn try_borrow(&self) -> Option<Ref<'_, PaginatedPane<P>>> {
        self.0.try_borrow().ok()
    }

    pub fn try_borrow_mut(&self) -> Option<RefMut<'_, PaginatedPane<P>>> {
        self.0.try_borrow_mut().ok()
    }

    /// Whether both handles share one pane.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<P: Clone> PageGroup<P> {
    /// Deep copy into a new, unshared group.
    pub fn copy(&self) -> Self {
        Self::new(self.0.borrow().copy())
    }
}

impl<P> Clone for PageGroup<P> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<P: fmt::Debug> fmt::Debug for PageGroup<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(pane) => f.debug_tuple("PageGroup").field(&*pane).finish(),
            Err(_) => f.write_str("PageGroup(<borrowed>)"),
        }
    }
}

/// Resolves a symbolic page-group name, the way a descriptor loader refers
/// to a paginated pane from paging controls.
pub trait PageGroupLookup<P> {
    fn page_group(&self, name: &str) -> Option<PageGroup<P>>;
}

impl<P, S: BuildHasher> PageGroupLookup<P> for HashMap<String, PageGroup<P>, S> {
    fn page_group(&self, name: &str) -> Option<PageGroup<P>> {
        self.get(name).cloned()
    }
}

/// Any pane.
#[derive(Debug)]
pub enum Pane<P> {
    Outline(OutlinePane<P>),
    Static(StaticPane<P>),
    Masonry(MasonryPane<P>),
    Paginated(PageGroup<P>),
    Pattern(PatternPane<P>),
    Toggle(ToggleButton<P>),
    Cycle(CycleButton<P>),
    PercentageBar(PercentageBar<P>),
    Slider(Slider<P>),
    PagingButtons(PagingButtons<P>),
}

/// Expand `$body` once per owned variant with `$pane` bound to the inner
/// value, and `$paged` once for the paginated group.
macro_rules! dispatch {
    ($self:expr, $pane:ident => $body:expr, $group:ident => $paged:expr) => {
        match $self {
            Pane::Outline($pane) => $body,
            Pane::Static($pane) => $body,
            Pane::Masonry($pane) => $body,
            Pane::Pattern($pane) => $body,
            Pane::Toggle($pane) => $body,
            Pane::Cycle($pane) => $body,
            Pane::PercentageBar($pane) => $body,
            Pane::Slider($pane) => $body,
            Pane::PagingButtons($pane) => $body,
            Pane::Paginated($group) => $paged,
        }
    };
}

impl<P: Clone> Pane<P> {
    /// Wrap into a shared handle.
    pub fn into_ref(self) -> PaneRef<P> {
        Rc::new(RefCell::new(self))
    }

    pub fn kind(&self) -> &'static str {
        dispatch!(self, pane => pane.kind(), _group => crate::paginated::KIND)
    }

    pub fn id(&self) -> PaneId {
        dispatch!(self, pane => pane.id(), group => group.borrow().id())
    }

    pub fn slot(&self) -> Slot {
        dispatch!(self, pane => pane.slot(), group => group.borrow().slot())
    }

    pub fn set_slot(&mut self, slot: Slot) {
        dispatch!(self, pane => pane.set_slot(slot), group => group.borrow_mut().set_slot(slot))
    }

    pub fn length(&self) -> u16 {
        dispatch!(self, pane => pane.length(), group => group.borrow().length())
    }

    pub fn height(&self) -> u16 {
        dispatch!(self, pane => pane.height(), group => group.borrow().height())
    }

    pub fn priority(&self) -> Priority {
        dispatch!(self, pane => pane.priority(), group => group.borrow().priority())
    }

    /// Like [`Pane::priority`], but `None` for a paginated pane that is busy
    /// further up the call stack.
    pub fn try_priority(&self) -> Option<Priority> {
        dispatch!(
            self,
            pane => Some(pane.priority()),
            group => group.try_borrow().map(|pane| pane.priority())
        )
    }

    pub fn set_priority(&mut self, priority: Priority) {
        dispatch!(
            self,
            pane => pane.set_priority(priority),
            group => group.borrow_mut().set_priority(priority)
        )
    }

    /// Whether the pane renders and routes clicks. A paginated pane that is
    /// busy further up the call stack reports `false`.
    pub fn is_visible(&self) -> bool {
        dispatch!(
            self,
            pane => pane.is_visible(),
            group => group.try_borrow().is_some_and(|pane| pane.is_visible())
        )
    }

    pub fn set_visible(&mut self, visible: bool) {
        dispatch!(
            self,
            pane => pane.set_visible(visible),
            group => group.borrow_mut().set_visible(visible)
        )
    }

    /// Install an interceptor that fires on every click inside this pane.
    pub fn set_on_click<F>(&mut self, f: F)
    where
        F: Fn(&mut ClickEvent) -> ActionResult + 'static,
    {
        let action = Some(Action::new(f));
        dispatch!(
            self,
            pane => pane.base_mut().set_on_click(action),
            group => group.borrow_mut().base_mut().set_on_click(action)
        )
    }

    pub fn clear_on_click(&mut self) {
        dispatch!(
            self,
            pane => pane.clear_on_click(),
            group => group.borrow_mut().clear_on_click()
        )
    }

    pub fn check_size(&self, length: u16, height: u16) -> Result<(), LayoutError> {
        dispatch!(
            self,
            pane => pane.check_size(length, height),
            group => group.borrow().check_size(length, height)
        )
    }

    pub fn resize(&mut self, length: u16, height: u16) -> Result<(), LayoutError> {
        dispatch!(
            self,
            pane => pane.resize(length, height),
            group => group.borrow_mut().resize(length, height)
        )
    }

    /// Render into `grid`. Invisible panes write nothing.
    pub fn display(&mut self, grid: &mut Grid<P>, area: Rect) {
        if !self.is_visible() {
            return;
        }
        dispatch!(
            self,
            pane => pane.display(grid, area),
            group => match group.try_borrow_mut() {
                Some(mut pane) => pane.display(grid, area),
                None => tracing::trace!("paginated pane is busy, skipped for display"),
            }
        )
    }

    /// Route a click. Invisible panes never match.
    pub fn click(&mut self, ctx: &mut ClickContext<'_>, area: Rect) -> bool {
        if !self.is_visible() {
            return false;
        }
        dispatch!(
            self,
            pane => pane.click(ctx, area),
            group => match group.try_borrow_mut() {
                Some(mut pane) => pane.click(ctx, area),
                None => {
                    tracing::trace!("paginated pane is busy, skipped for click");
                    false
                }
            }
        )
    }

    /// Deep copy. Paginated panes are copied into a fresh group.
    pub fn copy(&self) -> Self {
        match self {
            Self::Outline(pane) => Self::Outline(pane.copy()),
            Self::Static(pane) => Self::Static(pane.copy()),
            Self::Masonry(pane) => Self::Masonry(pane.copy()),
            Self::Paginated(group) => Self::Paginated(group.copy()),
            Self::Pattern(pane) => Self::Pattern(pane.copy()),
            Self::Toggle(pane) => Self::Toggle(pane.copy()),
            Self::Cycle(pane) => Self::Cycle(pane.copy()),
            Self::PercentageBar(pane) => Self::PercentageBar(pane.copy()),
            Self::Slider(pane) => Self::Slider(pane.copy()),
            Self::PagingButtons(pane) => Self::PagingButtons(pane.copy()),
        }
    }

    pub fn visit_items(&self, visit: &mut dyn FnMut(&Item<P>)) {
        dispatch!(
            self,
            pane => pane.visit_items(visit),
            group => group.borrow().visit_items(visit)
        )
    }

    /// Every item owned directly or through children.
    pub fn items(&self) -> Vec<Item<P>> {
        let mut items = Vec::new();
        self.visit_items(&mut |item| items.push(item.clone()));
        items
    }

    pub fn clear(&mut self) {
        dispatch!(self, pane => pane.clear(), group => group.borrow_mut().clear())
    }

    pub fn as_outline(&self) -> Option<&OutlinePane<P>> {
        match self {
            Self::Outline(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_outline_mut(&mut self) -> Option<&mut OutlinePane<P>> {
        match self {
            Self::Outline(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_static(&self) -> Option<&StaticPane<P>> {
        match self {
            Self::Static(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_static_mut(&mut self) -> Option<&mut StaticPane<P>> {
        match self {
            Self::Static(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_masonry(&self) -> Option<&MasonryPane<P>> {
        match self {
            Self::Masonry(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_masonry_mut(&mut self) -> Option<&mut MasonryPane<P>> {
        match self {
            Self::Masonry(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_page_group(&self) -> Option<&PageGroup<P>> {
        match self {
            Self::Paginated(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&PatternPane<P>> {
        match self {
            Self::Pattern(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_pattern_mut(&mut self) -> Option<&mut PatternPane<P>> {
        match self {
            Self::Pattern(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_toggle(&self) -> Option<&ToggleButton<P>> {
        match self {
            Self::Toggle(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_toggle_mut(&mut self) -> Option<&mut ToggleButton<P>> {
        match self {
            Self::Toggle(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_cycle(&self) -> Option<&CycleButton<P>> {
        match self {
            Self::Cycle(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_cycle_mut(&mut self) -> Option<&mut CycleButton<P>> {
        match self {
            Self::Cycle(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_percentage_bar(&self) -> Option<&PercentageBar<P>> {
        match self {
            Self::PercentageBar(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_percentage_bar_mut(&mut self) -> Option<&mut PercentageBar<P>> {
        match self {
            Self::PercentageBar(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_slider(&self) -> Option<&Slider<P>> {
        match self {
            Self::Slider(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_slider_mut(&mut self) -> Option<&mut Slider<P>> {
        match self {
            Self::Slider(pane) => Some(pane),
            _ => None,
        }
    }

    pub fn as_paging_buttons(&self) -> Option<&PagingButtons<P>> {
        match self {
            Self::PagingButtons(pane) => Some(pane),
            _ => None,
        }
    }
}

macro_rules! impl_from {
    ($($variant:ident($ty:ident)),* $(,)?) => {
        $(
            impl<P> From<$ty<P>> for Pane<P> {
                fn from(pane: $ty<P>) -> Self {
                    Self::$variant(pane)
                }
            }
        )*
    };
}

impl_from!(
    Outline(OutlinePane),
    Static(StaticPane),
    Masonry(MasonryPane),
    Paginated(PageGroup),
    Pattern(PatternPane),
    Toggle(ToggleButton),
    Cycle(CycleButton),
    PercentageBar(PercentageBar),
    Slider(Slider),
    PagingButtons(PagingButtons),
);

impl<P> From<PaginatedPane<P>> for Pane<P> {
    fn from(pane: PaginatedPane<P>) -> Self {
        Self::Paginated(PageGroup::new(pane))
    }
}
