#![forbid(unsafe_code)]

//! Items: opaque payloads with identity, visibility and an optional action.
//!
//! The payload is whatever the host renders into a slot. The core never
//! inspects it; click resolution relies on [`ItemId`] instead, because two
//! visually identical payloads must not match each other.

use std::fmt;
use std::num::NonZeroU64;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::event::ClickEvent;

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Identity tag attached to an item when it is created.
///
/// Clones of an item keep its id; the host attaches the id to the rendered
/// payload and hands it back in [`ClickEvent::current`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(NonZeroU64);

impl ItemId {
    fn fresh() -> Self {
        let raw = NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed);
        Self(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN))
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// Rebuild an id recovered from a rendered payload. Returns `None` for 0.
    #[must_use]
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Failure reported by an action handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionError {
    message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ActionError {}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ActionError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::new(err.to_string())
    }
}

/// Result of running an [`Action`].
pub type ActionResult = Result<(), ActionError>;

type ActionFn = dyn Fn(&mut ClickEvent) -> ActionResult;

/// Click handler attached to an item or used as a pane interceptor.
///
/// Cloning shares the underlying closure.
#[derive(Clone)]
pub struct Action(Rc<ActionFn>);

impl Action {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut ClickEvent) -> ActionResult + 'static,
    {
        Self(Rc::new(f))
    }

    /// Run the handler. Callers routing clicks should go through the
    /// layout crate's dispatcher, which isolates failures.
    pub fn call(&self, event: &mut ClickEvent) -> ActionResult {
        (self.0)(event)
    }

    /// Whether both handles share the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

/// Explicit owner capability used to create items.
///
/// Every item records which owner created it; there is no ambient owner
/// lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemContext {
    owner: Rc<str>,
}

impl ItemContext {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: Rc::from(owner.into()),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Create a visible item without an action.
    pub fn item<P>(&self, payload: P) -> Item<P> {
        Item::new(self, payload)
    }
}

/// A renderable payload with identity.
///
/// `Clone` is the item copy operation: the payload is cloned, the id is kept,
/// and the action is shared.
#[derive(Clone)]
pub struct Item<P> {
    payload: P,
    id: ItemId,
    visible: bool,
    action: Option<Action>,
    owner: Rc<str>,
}

impl<P> Item<P> {
    pub fn new(context: &ItemContext, payload: P) -> Self {
        Self {
            payload,
            id: ItemId::fresh(),
            visible: true,
            action: None,
            owner: Rc::clone(&context.owner),
        }
    }

    /// Attach a click action.
    #[must_use]
    pub fn with_action<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut ClickEvent) -> ActionResult + 'static,
    {
        self.action = Some(Action::new(f));
        self
    }

    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    #[inline]
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    pub fn set_action(&mut self, action: Option<Action>) {
        self.action = action;
    }

    /// Name of the owner that created this item.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Whether this item is the one the host observed (identity match).
    #[inline]
    pub fn matches(&self, observed: Option<ItemId>) -> bool {
        observed == Some(self.id)
    }
}

impl<P: fmt::Debug> fmt::Debug for Item<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("payload", &self.payload)
            .field("id", &self.id)
            .field("visible", &self.visible)
            .field("has_action", &self.action.is_some())
            .field("owner", &self.owner)
            .finish()
    }
}
