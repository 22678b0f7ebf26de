#![forbid(unsafe_code)]

//! slotgrid public facade crate.
//!
//! Re-exports the value types, the cell grid and the pane model, and offers
//! a prelude for day-to-day use.
//!
//! ```
//! use slotgrid::prelude::*;
//!
//! let ctx = ItemContext::new("shop");
//! let mut surface = GridSurface::new(9, 6)?;
//!
//! let border = OutlinePane::new(Slot::default(), 9, 1)?
//!     .with_repeat(true)
//!     .with_items([ctx.item("glass")]);
//! surface.add_pane(border);
//!
//! let mut pages = PaginatedPane::new(Slot::from_xy(0, 1), 9, 4)?;
//! pages.populate_with_payloads(&ctx, ["apple"; 50])?;
//! let pages = PageGroup::new(pages);
//! surface.add_pane(pages.clone());
//!
//! let controls = PagingButtons::new(
//!     Slot::from_xy(0, 5),
//!     9,
//!     pages.clone(),
//!     ctx.item("previous"),
//!     ctx.item("next"),
//! )?;
//! surface.add_pane(controls);
//!
//! surface.display();
//! let (matched, _event) = surface.click_slot(53, ClickKind::Left);
//! assert!(matched);
//! assert_eq!(pages.borrow().page(), 1);
//! # Ok::<(), LayoutError>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use slotgrid_core::{
    Action, ActionError, ActionFailure, ActionResult, Alignment, ClickEvent, ClickKind, Flip, Item,
    ItemContext, ItemId, LayoutError, Mask, Orientation, Pattern, Priority, Rect, Rotation, Slot,
    Transform,
};

// --- Render re-exports -----------------------------------------------------

pub use slotgrid_render::Grid;

// --- Layout re-exports -----------------------------------------------------

pub use slotgrid_layout::{
    ClickContext, Component, CycleButton, GridSurface, MasonryPane, OutlinePane, PageGroup,
    PageGroupLookup, PaginatedPane, PagingButtons, Pane, PaneBase, PaneId, PaneRef, PatternPane,
    PercentageBar, Slider, StaticPane, ToggleButton, VariableBar,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Alignment, ClickEvent, ClickKind, Component, CycleButton, Flip, GridSurface, Item,
        ItemContext, LayoutError, Mask, MasonryPane, Orientation, OutlinePane, PageGroup,
        PaginatedPane, PagingButtons, Pane, Pattern, PatternPane, PercentageBar, Priority,
        Rotation, Slider, Slot, StaticPane, ToggleButton,
    };

    pub use crate::{core, layout, render};
}

pub use slotgrid_core as core;
pub use slotgrid_layout as layout;
pub use slotgrid_render as render;
