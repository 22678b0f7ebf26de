#![forbid(unsafe_code)]

//! Pane composition and click routing.
//!
//! # Role in slotgrid
//! `slotgrid-layout` turns a tree of panes into rendered cells of a
//! [`slotgrid_render::Grid`] and routes clicks on those cells back to the
//! item or pane that owns them.
//!
//! # Primary responsibilities
//! - **Contract**: [`Component`], [`PaneBase`] and [`ClickContext`].
//! - **Placement strategies**: [`OutlinePane`] (sequential along an axis),
//!   [`StaticPane`] (explicit slots), [`PatternPane`] (character template),
//!   [`MasonryPane`] (first-fit packing of child panes) and
//!   [`PaginatedPane`] (one live page at a time).
//! - **Widgets**: toggle, cycle, percentage bar, slider and paging buttons.
//! - **Composition root**: [`GridSurface`].
//!
//! # Click routing
//! A click carries a linear slot in the surface's own row-major addressing
//! and the identity of the item the host saw there. Every pane maps the slot
//! into its own region, fires its interceptor, maps the cell back through
//! its flip and rotation, and matches the item placed there by identity.
//! Action failures (errors or panics) are logged and recorded on the event;
//! routing is never interrupted by them.
//!
//! # Threading
//! A composition is single-threaded: panes share state through `Rc` and
//! `RefCell`. Build one surface per thread.

pub mod component;
mod dispatch;
pub mod masonry;
pub mod outline;
pub mod paginated;
pub mod pane;
pub mod pattern_pane;
pub mod static_pane;
pub mod surface;
pub mod widgets;

pub use component::{ClickContext, Component, PaneBase, PaneId};
pub use masonry::MasonryPane;
pub use outline::{OutlinePane, Placement};
pub use paginated::PaginatedPane;
pub use pane::{PageGroup, PageGroupLookup, Pane, PaneRef};
pub use pattern_pane::PatternPane;
pub use static_pane::StaticPane;
pub use surface::GridSurface;
pub use widgets::{CycleButton, PagingButtons, PercentageBar, Slider, ToggleButton, VariableBar};
