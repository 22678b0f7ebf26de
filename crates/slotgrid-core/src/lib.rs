#![forbid(unsafe_code)]

//! Core: geometry, masks, patterns, items and click events.
//!
//! # Role in slotgrid
//! `slotgrid-core` holds the value types every other crate shares. It has no
//! notion of panes or surfaces; those live in `slotgrid-layout`, which renders
//! into the cell buffer from `slotgrid-render`.
//!
//! # Primary responsibilities
//! - **Geometry**: [`Rect`], [`Slot`], and the forward/inverse [`Transform`]
//!   (flips + clockwise rotation) shared by render and hit-test paths.
//! - **Placement data**: [`Mask`] and [`Pattern`].
//! - **Items**: [`Item`], [`ItemId`] identity, [`Action`] handlers, and the
//!   explicit [`ItemContext`] owner capability.
//! - **Events and errors**: [`ClickEvent`] and [`LayoutError`].
//!
//! # Threading
//! Items hold `Rc` handles and are neither `Send` nor `Sync`. A composition is
//! built, rendered and clicked on one thread; nothing here locks.

pub mod error;
pub mod event;
pub mod geometry;
pub mod item;
pub mod mask;
pub mod pattern;
pub mod priority;

pub use error::{LayoutError, validate_dimensions};
pub use event::{ActionFailure, ClickEvent, ClickKind};
pub use geometry::{Alignment, Flip, Orientation, Rect, Rotation, Slot, Transform};
pub use item::{Action, ActionError, ActionResult, Item, ItemContext, ItemId};
pub use mask::Mask;
pub use pattern::Pattern;
pub use priority::{Priority, insert_by_priority};
