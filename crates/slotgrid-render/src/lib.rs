#![forbid(unsafe_code)]

//! Render kernel: the addressable slot grid.
//!
//! # Role in slotgrid
//! `slotgrid-render` owns [`Grid`], the row-major cell buffer a surface clears
//! and repopulates on every display pass. Panes write items into it; the host
//! integration reads it back to place payloads into its native container.

pub mod grid;

pub use grid::Grid;
