#![forbid(unsafe_code)]

//! Page-indexed collections of panes.
//!
//! Only the current page is displayed or clickable. Page indices need not be
//! contiguous when panes are added under an explicit index;
//! [`PaginatedPane::add_page`] always appends after the highest index and
//! [`PaginatedPane::delete_page`] closes the gap it leaves.

use std::collections::BTreeMap;
use std::ops::Bound;

use slotgrid_core::{Item, ItemContext, LayoutError, Rect, Slot, insert_by_priority};
use slotgrid_render::Grid;

use crate::component::{ClickContext, Component, PaneBase};
use crate::outline::OutlinePane;
use crate::pane::Pane;

pub(crate) const KIND: &str = "paginated";

/// A pane holding several pages of child panes.
#[derive(Debug)]
pub struct PaginatedPane<P> {
    base: PaneBase,
    pages: BTreeMap<usize, Vec<Pane<P>>>,
    page: usize,
}

impl<P: Clone> PaginatedPane<P> {
    pub fn new(slot: Slot, length: u16, height: u16) -> Result<Self, LayoutError> {
        Ok(Self {
            base: PaneBase::new(slot, length, height)?,
            pages: BTreeMap::new(),
            page: 0,
        })
    }

    /// Current page index.
    #[inline]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Select a page. The page must have been registered.
    pub fn set_page(&mut self, page: usize) -> Result<(), LayoutError> {
        if !self.pages.contains_key(&page) {
            return Err(LayoutError::PageOutOfRange {
                page,
                pages: self.pages.len(),
            });
        }
        self.page = page;
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Registered page indices in ascending order.
    pub fn pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.pages.keys().copied()
    }

    pub fn has_page(&self, page: usize) -> bool {
        self.pages.contains_key(&page)
    }

    /// Panes of `page` in priority order.
    pub fn panes(&self, page: usize) -> Option<&[Pane<P>]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    pub fn panes_mut(&mut self, page: usize) -> Option<&mut [Pane<P>]> {
        self.pages.get_mut(&page).map(Vec::as_mut_slice)
    }

    /// Nearest registered page below the current one.
    pub fn previous_page(&self) -> Option<usize> {
        self.pages.range(..self.page).next_back().map(|(page, _)| *page)
    }

    /// Nearest registered page above the current one.
    pub fn next_page(&self) -> Option<usize> {
        self.pages
            .range((Bound::Excluded(self.page), Bound::Unbounded))
            .next()
            .map(|(page, _)| *page)
    }

    /// Add `pane` to `page`, creating the page if needed.
    pub fn add_pane(&mut self, page: usize, pane: impl Into<Pane<P>>) {
        let panes = self.pages.entry(page).or_default();
        insert_by_priority(panes, pane.into(), Pane::priority);
    }

    #[must_use]
    pub fn with_pane(mut self, page: usize, pane: impl Into<Pane<P>>) -> Self {
        self.add_pane(page, pane);
        self
    }

    /// Append a page holding `pane` after the highest index (0 when empty).
    /// Returns the new page index.
    pub fn add_page(&mut self, pane: impl Into<Pane<P>>) -> Result<usize, LayoutError> {
        let page = match self.pages.keys().next_back() {
            Some(last) => last.checked_add(1).ok_or(LayoutError::PageIndexOverflow)?,
            None => 0,
        };
        self.pages.insert(page, vec![pane.into()]);
        Ok(page)
    }

    /// Remove `page` and shift every higher page down by one. Returns the
    /// removed panes.
    ///
    /// The current page follows its content when a lower page is removed.
    /// When the current page itself is removed the same index stays selected
    /// if it still exists, else the highest remaining page (or 0).
    pub fn delete_page(&mut self, page: usize) -> Result<Vec<Pane<P>>, LayoutError> {
        let Some(removed) = self.pages.remove(&page) else {
            return Err(LayoutError::PageOutOfRange {
                page,
                pages: self.pages.len(),
            });
        };
        let higher = self
            .pages
            .split_off(&page)
            .into_iter()
            .map(|(index, panes)| (index - 1, panes));
        self.pages.extend(higher);

        if self.page > page {
            self.page -= 1;
        } else if self.page == page && !self.pages.contains_key(&page) {
            self.page = self.pages.keys().next_back().copied().unwrap_or(0);
        }
        Ok(removed)
    }

    /// Split `items` into chunks of `length × height` and append one page
    /// per chunk, each holding an outline pane of this pane's size.
    pub fn populate_with_items(
        &mut self,
        items: impl IntoIterator<Item = Item<P>>,
    ) -> Result<(), LayoutError> {
        let length = self.base.length();
        let height = self.base.height();
        let capacity = usize::from(length) * usize::from(height);
        let mut items = items.into_iter().peekable();
        while items.peek().is_some() {
            let chunk = items.by_ref().take(capacity);
            let pane = OutlinePane::new(Slot::default(), length, height)?.with_items(chunk);
            self.add_page(pane)?;
        }
        Ok(())
    }

    /// [`populate_with_items`](Self::populate_with_items) over plain
    /// payloads, creating the items with `ctx`.
    pub fn populate_with_payloads(
        &mut self,
        ctx: &ItemContext,
        payloads: impl IntoIterator<Item = P>,
    ) -> Result<(), LayoutError> {
        self.populate_with_items(payloads.into_iter().map(|payload| ctx.item(payload)))
    }
}

impl<P: Clone> Component<P> for PaginatedPane<P> {
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
            page = self.page,
            x = region.x,
            y = region.y,
            w = region.width,
            h = region.height
        )
        .entered();

        if let Some(panes) = self.pages.get_mut(&self.page) {
            for pane in panes {
                pane.display(grid, region);
            }
        }
    }

    fn click(&mut self, ctx: &mut ClickContext<'_>, area: Rect) -> bool {
        let region = self.base.region(area);
        if ctx.local(region).is_none() {
            return false;
        }
        ctx.intercept(KIND, &self.base, region);

        let Some(panes) = self.pages.get_mut(&self.page) else {
            return false;
        };
        panes.iter_mut().rev().any(|pane| pane.click(ctx, region))
    }

    fn copy(&self) -> Self {
        Self {
            base: self.base.clone(),
            pages: self
                .pages
                .iter()
                .map(|(page, panes)| (*page, panes.iter().map(Pane::copy).collect()))
                .collect(),
            page: self.page,
        }
    }

    fn visit_items(&self, visit: &mut dyn FnMut(&Item<P>)) {
        for pane in self.pages.values().flatten() {
            pane.visit_items(visit);
        }
    }

    fn clear(&mut self) {
        self.pages.clear();
        self.page = 0;
    }
}
