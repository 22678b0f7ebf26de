#![forbid(unsafe_code)]

//! Click events handed over by the host integration.

use crate::item::ItemId;

/// How the viewer clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClickKind {
    #[default]
    Left,
    Right,
    ShiftLeft,
    ShiftRight,
    Middle,
    Double,
    Drop,
    /// Hotbar/number key press with the key index.
    NumberKey(u8),
    Other,
}

/// An action or interceptor failure caught during click routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFailure {
    /// Kind of pane that owned the failing handler (`"outline"`, `"static"`, ...).
    pub pane_kind: &'static str,
    /// Raw id of that pane.
    pub pane_id: u64,
    /// Grid position of the pane's top-left cell.
    pub origin: (u16, u16),
    pub length: u16,
    pub height: u16,
    pub message: String,
    /// The handler panicked instead of returning an error.
    pub panicked: bool,
}

/// A click on one slot of a grid surface.
///
/// `slot` is already relative to the surface's own row-major addressing;
/// translating from the host's screen numbering happens before this type is
/// built. `current` is the identity the host recovered from the payload it
/// observed in that slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    slot: usize,
    kind: ClickKind,
    current: Option<ItemId>,
    cancelled: bool,
    failures: Vec<ActionFailure>,
}

impl ClickEvent {
    pub fn new(slot: usize, kind: ClickKind) -> Self {
        Self {
            slot,
            kind,
            current: None,
            cancelled: false,
            failures: Vec::new(),
        }
    }

    /// Set the identity observed in the clicked slot.
    #[must_use]
    pub fn with_current(mut self, current: Option<ItemId>) -> Self {
        self.current = current;
        self
    }

    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }

    #[inline]
    pub fn kind(&self) -> ClickKind {
        self.kind
    }

    #[inline]
    pub fn current(&self) -> Option<ItemId> {
        self.current
    }

    /// Ask the host not to apply its default handling of this click.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Handler failures caught while routing this event.
    pub fn failures(&self) -> &[ActionFailure] {
        &self.failures
    }

    pub fn record_failure(&mut self, failure: ActionFailure) {
        self.failures.push(failure);
    }
}
