#![forbid(unsafe_code)]

//! Proportional bars.
//!
//! A [`VariableBar`] splits its extent along one axis into a fill run and a
//! background run sized from a value in `0.0..=1.0`. [`PercentageBar`]
//! only shows the value; [`Slider`] also sets it from the clicked cell.

use slotgrid_core::{Item, LayoutError, Orientation, Rect, Slot};
use slotgrid_render::Grid;

use crate::component::{ClickContext, Component, PaneBase};
use crate::outline::OutlinePane;

/// Fill and background runs of a bar.
#[derive(Debug, Clone)]
pub struct VariableBar<P> {
    orientation: Orientation,
    value: f32,
    length: u16,
    height: u16,
    fill: OutlinePane<P>,
    background: OutlinePane<P>,
}

fn check_value(value: f32) -> Result<(), LayoutError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(LayoutError::InvalidPercentage { value })
    }
}

impl<P: Clone> VariableBar<P> {
    fn new(
        length: u16,
        height: u16,
        fill: Item<P>,
        background: Item<P>,
    ) -> Result<Self, LayoutError> {
        let run = |item: Item<P>| -> Result<OutlinePane<P>, LayoutError> {
            Ok(OutlinePane::new(Slot::default(), length, height)?
                .with_repeat(true)
                .with_items([item]))
        };
        let mut bar = Self {
            orientation: Orientation::Horizontal,
            value: 0.0,
            length,
            height,
            fill: run(fill)?,
            background: run(background)?,
        };
        bar.layout()?;
        Ok(bar)
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn fill(&self) -> &OutlinePane<P> {
        &self.fill
    }

    pub fn background(&self) -> &OutlinePane<P> {
        &self.background
    }

    /// Cells along the bar's axis.
    pub fn extent(&self) -> u16 {
        match self.orientation {
            Orientation::Horizontal => self.length,
            Orientation::Vertical => self.height,
        }
    }

    /// Number of filled cells for the current value.
    pub fn filled(&self) -> u16 {
        let extent = self.extent();
        let cells = (f32::from(extent) * self.value).round();
        (cells as u16).min(extent)
    }

    fn set_value(&mut self, value: f32) -> Result<(), LayoutError> {
        check_value(value)?;
        self.value = value;
        self.layout()
    }

    fn set_orientation(&mut self, orientation: Orientation) -> Result<(), LayoutError> {
        self.orientation = orientation;
        self.layout()
    }

    fn resize(&mut self, length: u16, height: u16) -> Result<(), LayoutError> {
        self.length = length;
        self.height = height;
        self.layout()
    }

    /// Size and position the two runs. A run with no cells is hidden.
    fn layout(&mut self) -> Result<(), LayoutError> {
        let extent = self.extent();
        let filled = self.filled();
        let orientation = self.orientation;
        let (length, height) = (self.length, self.height);
        let place = |run: &mut OutlinePane<P>, start: u16, cells: u16| {
            run.set_visible(cells > 0);
            if cells == 0 {
                return Ok(());
            }
            match orientation {
                Orientation::Horizontal => {
                    run.set_slot(Slot::from_xy(start, 0));
                    run.resize(cells, height)
                }
                Orientation::Vertical => {
                    run.set_slot(Slot::from_xy(0, start));
                    run.resize(length, cells)
                }
            }
        };
        place(&mut self.fill, 0, filled)?;
        place(&mut self.background, filled, extent - filled)
    }

    fn display(&mut self, grid: &mut Grid<P>, region: Rect) {
        for run in [&mut self.fill, &mut self.background] {
            if run.is_visible() {
                run.display(grid, region);
            }
        }
    }

    /// Hand the click to whichever run covers the cell.
    fn click(&mut self, ctx: &mut ClickContext<'_>, region: Rect) -> bool {
        [&mut self.fill, &mut self.background]
            .into_iter()
            .any(|run| run.is_visible() && run.click(ctx, region))
    }

    fn copy(&self) -> Self {
        Self {
            fill: self.fill.copy(),
            background: self.background.copy(),
            ..*self
        }
    }

    fn visit_items(&self, visit: &mut dyn FnMut(&Item<P>)) {
        self.fill.visit_items(visit);
        self.background.visit_items(visit);
    }
}

/// Implements the pane plumbing shared by both bar kinds.
macro_rules! bar_pane {
    ($name:ident, $kind:literal) => {
        impl<P: Clone> $name<P> {
            /// A horizontal bar at value 0.
            pub fn new(
                slot: Slot,
                length: u16,
                height: u16,
                fill: Item<P>,
                background: Item<P>,
            ) -> Result<Self, LayoutError> {
                Ok(Self {
                    base: PaneBase::new(slot, length, height)?,
                    bar: VariableBar::new(length, height, fill, background)?,
                })
            }

            pub fn bar(&self) -> &VariableBar<P> {
                &self.bar
            }

            #[inline]
            pub fn value(&self) -> f32 {
                self.bar.value()
            }

            /// Set the value; it must lie in `0.0..=1.0`.
            pub fn set_value(&mut self, value: f32) -> Result<(), LayoutError> {
                self.bar.set_value(value)
            }

            pub fn with_value(mut self, value: f32) -> Result<Self, LayoutError> {
                self.set_value(value)?;
                Ok(self)
            }

            pub fn set_orientation(&mut self, orientation: Orientation) -> Result<(), LayoutError> {
                self.bar.set_orientation(orientation)
            }

            pub fn with_orientation(
                mut self,
                orientation: Orientation,
            ) -> Result<Self, LayoutError> {
                self.set_orientation(orientation)?;
                Ok(self)
            }
        }

        impl<P: Clone> Component<P> for $name<P> {
            fn kind(&self) -> &'static str {
                $kind
            }

            fn base(&self) -> &PaneBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut PaneBase {
                &mut self.base
            }

            fn display(&mut self, grid: &mut Grid<P>, area: Rect) {
                let region = self.base.region(area);
                if !region.is_empty() {
                    self.bar.display(grid, region);
                }
            }

            fn click(&mut self, ctx: &mut ClickContext<'_>, area: Rect) -> bool {
                let region = self.base.region(area);
                let Some(cell) = ctx.local(region) else {
                    return false;
                };
                ctx.intercept($kind, &self.base, region);
                let matched = self.bar.click(ctx, region);
                self.clicked(cell, matched)
            }

            fn copy(&self) -> Self {
                Self {
                    base: self.base.clone(),
                    bar: self.bar.copy(),
                }
            }

            fn resize(&mut self, length: u16, height: u16) -> Result<(), LayoutError> {
                self.base.set_size(length, height)?;
                self.bar.resize(length, height)
            }

            fn visit_items(&self, visit: &mut dyn FnMut(&Item<P>)) {
                self.bar.visit_items(visit);
            }

            /// Bars always keep their two runs.
            fn clear(&mut self) {}
        }
    };
}

/// Read-only bar showing a proportion.
#[derive(Debug, Clone)]
pub struct PercentageBar<P> {
    base: PaneBase,
    bar: VariableBar<P>,
}

impl<P: Clone> PercentageBar<P> {
    fn clicked(&mut self, _cell: (u16, u16), matched: bool) -> bool {
        matched
    }
}

bar_pane!(PercentageBar, "percentage_bar");

/// Bar whose value follows the clicked cell.
#[derive(Debug, Clone)]
pub struct Slider<P> {
    base: PaneBase,
    bar: VariableBar<P>,
}

impl<P: Clone> Slider<P> {
    /// The clicked cell becomes the last filled one.
    fn clicked(&mut self, (x, y): (u16, u16), _matched: bool) -> bool {
        let cell = match self.bar.orientation() {
            Orientation::Horizontal => x,
            Orientation::Vertical => y,
        };
        let extent = self.bar.extent();
        let value = (f32::from(cell) + 1.0) / f32::from(extent);
        if let Err(err) = self.bar.set_value(value.min(1.0)) {
            tracing::warn!(pane.id = self.base.id().get(), error = %err, "slider value rejected");
        }
        true
    }
}

bar_pane!(Slider, "slider");
