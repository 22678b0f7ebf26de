#![forbid(unsafe_code)]

//! Composite widgets built from the pane primitives.
//!
//! Each widget is a small state machine: it renders one of its sub-panes (or
//! a pair of items) and updates its state when clicked.

pub mod bar;
pub mod cycle;
pub mod paging;
pub mod toggle;

pub use bar::{PercentageBar, Slider, VariableBar};
pub use cycle::CycleButton;
pub use paging::PagingButtons;
pub use toggle::ToggleButton;
