#![forbid(unsafe_code)]

//! Geometric primitives: regions, slots, and the pane transform.
//!
//! Every pane that owns items renders them through a [`Transform`] (axis
//! flips followed by a clockwise rotation) and hit-tests them through its
//! exact inverse. Both directions live here so the render path and the click
//! path can never drift apart.

use bitflags::bitflags;

use crate::error::LayoutError;

/// A rectangle inside a slot grid.
///
/// Uses grid coordinates (0-indexed, origin at top-left). During rendering a
/// `Rect` doubles as the accumulated parent offset (`x`, `y`) plus the maximum
/// extent a child may occupy (`width`, `height`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Translate a grid point into coordinates relative to this rectangle.
    ///
    /// Returns `None` when the point lies outside.
    #[inline]
    pub fn to_local(&self, x: u16, y: u16) -> Option<(u16, u16)> {
        if self.contains(x, y) {
            Some((x - self.x, y - self.y))
        } else {
            None
        }
    }
}

/// A position inside a grid of known width.
///
/// Either an explicit `(x, y)` pair or a row-major linear index. The two are
/// interconvertible once the grid length is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Slot {
    Xy { x: u16, y: u16 },
    Index(usize),
}

impl Slot {
    /// Slot at `(x, y)`.
    #[inline]
    pub const fn from_xy(x: u16, y: u16) -> Self {
        Self::Xy { x, y }
    }

    /// Slot at a row-major linear index.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::Index(index)
    }

    /// Resolved column in a grid `length` cells wide.
    #[inline]
    pub fn x(self, length: u16) -> u16 {
        match self {
            Self::Xy { x, .. } => x,
            Self::Index(index) if length > 0 => (index % usize::from(length)) as u16,
            Self::Index(_) => 0,
        }
    }

    /// Resolved row in a grid `length` cells wide.
    #[inline]
    pub fn y(self, length: u16) -> u16 {
        match self {
            Self::Xy { y, .. } => y,
            Self::Index(index) if length > 0 => {
                u16::try_from(index / usize::from(length)).unwrap_or(u16::MAX)
            }
            Self::Index(_) => 0,
        }
    }

    /// Resolved `(x, y)` in a grid `length` cells wide.
    #[inline]
    pub fn to_xy(self, length: u16) -> (u16, u16) {
        (self.x(length), self.y(length))
    }

    /// Row-major linear index in a grid `length` cells wide.
    #[inline]
    pub fn to_index(self, length: u16) -> usize {
        match self {
            Self::Index(index) => index,
            Self::Xy { x, y } => usize::from(y) * usize::from(length) + usize::from(x),
        }
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self::from_xy(0, 0)
    }
}

/// Clockwise rotation applied to a pane's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    /// Build from a degree value. Any multiple of 90 is accepted, including
    /// negative values and values past a full turn.
    pub fn from_degrees(degrees: i32) -> Result<Self, LayoutError> {
        if degrees % 90 != 0 {
            return Err(LayoutError::InvalidRotation { degrees });
        }
        Ok(match degrees.rem_euclid(360) {
            0 => Self::None,
            90 => Self::Clockwise90,
            180 => Self::Clockwise180,
            _ => Self::Clockwise270,
        })
    }

    /// Rotation in degrees (0, 90, 180 or 270).
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::None => 0,
            Self::Clockwise90 => 90,
            Self::Clockwise180 => 180,
            Self::Clockwise270 => 270,
        }
    }
}

bitflags! {
    /// Axis mirrors applied before rotation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Flip: u8 {
        /// Mirror across the vertical axis (x becomes `length - 1 - x`).
        const HORIZONTAL = 0b01;
        /// Mirror across the horizontal axis (y becomes `height - 1 - y`).
        const VERTICAL = 0b10;
    }
}

/// Flip + rotation applied to a pane's logical coordinates.
///
/// `apply` maps logical pane coordinates to rendered coordinates inside the
/// pane's extent; `invert` maps them back. Both operate on the clamped extent
/// the pane is rendered with, so a caller must pass the same `length` and
/// `height` to both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transform {
    pub rotation: Rotation,
    pub flip: Flip,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        rotation: Rotation::None,
        flip: Flip::empty(),
    };

    #[must_use]
    pub const fn new(rotation: Rotation, flip: Flip) -> Self {
        Self { rotation, flip }
    }

    /// Whether the transform leaves coordinates unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.rotation == Rotation::None && self.flip.is_empty()
    }

    /// Check that the rotation can be applied to a `length` × `height` pane.
    pub fn validate(&self, length: u16, height: u16) -> Result<(), LayoutError> {
        if self.rotation != Rotation::None && length != height {
            return Err(LayoutError::RotationRequiresSquare {
                length,
                height,
                degrees: self.rotation.degrees(),
            });
        }
        Ok(())
    }

    /// Map logical `(x, y)` to its rendered position: flips first, then the
    /// clockwise rotation.
    ///
    /// Returns `None` if either the input or the result falls outside the
    /// `length` × `height` extent (only possible for a rotated, non-square
    /// extent, e.g. a rotated pane clamped by a smaller parent).
    pub fn apply(&self, x: u16, y: u16, length: u16, height: u16) -> Option<(u16, u16)> {
        if x >= length || y >= height {
            return None;
        }
        let (x, y) = self.mirror(x, y, length, height);
        let (x, y) = match self.rotation {
            Rotation::None => (x, y),
            Rotation::Clockwise90 => (height.checked_sub(1 + y)?, x),
            Rotation::Clockwise180 => (length - 1 - x, height - 1 - y),
            Rotation::Clockwise270 => (y, length.checked_sub(1 + x)?),
        };
        (x < length && y < height).then_some((x, y))
    }

    /// Exact inverse of [`Transform::apply`]: counter-clockwise rotation,
    /// then the same flips.
    pub fn invert(&self, x: u16, y: u16, length: u16, height: u16) -> Option<(u16, u16)> {
        if x >= length || y >= height {
            return None;
        }
        let (x, y) = match self.rotation {
            Rotation::None => (x, y),
            Rotation::Clockwise90 => (y, height.checked_sub(1 + x)?),
            Rotation::Clockwise180 => (length - 1 - x, height - 1 - y),
            Rotation::Clockwise270 => (length.checked_sub(1 + y)?, x),
        };
        if x >= length || y >= height {
            return None;
        }
        Some(self.mirror(x, y, length, height))
    }

    fn mirror(&self, mut x: u16, mut y: u16, length: u16, height: u16) -> (u16, u16) {
        if self.flip.contains(Flip::HORIZONTAL) {
            x = length - 1 - x;
        }
        if self.flip.contains(Flip::VERTICAL) {
            y = height - 1 - y;
        }
        (x, y)
    }
}

/// Axis along which sequential placement runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Orientation {
    /// Row-major: fill each row left to right, rows top to bottom.
    #[default]
    Horizontal,
    /// Column-major: fill each column top to bottom, columns left to right.
    Vertical,
}

/// Where a line of sequentially placed items starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Alignment {
    #[default]
    Start,
    /// Centered; an odd remainder leaves the extra cell at the end.
    Center,
    End,
}
