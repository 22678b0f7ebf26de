#![forbid(unsafe_code)]

//! Action dispatch with failure isolation.
//!
//! Every item action and pane interceptor runs through [`run_action`]. A
//! handler that returns an error or panics is reported here, at the dispatch
//! point, and routing carries on: the composition is never touched by a
//! failing handler and sibling panes are evaluated on the next event as usual.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use slotgrid_core::{Action, ActionFailure, ClickEvent, Rect};

use crate::component::PaneId;

/// The pane that owns a handler, for failure reports.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Origin {
    kind: &'static str,
    id: PaneId,
    region: Rect,
}

impl Origin {
    pub(crate) fn new(kind: &'static str, id: PaneId, region: Rect) -> Self {
        Self { kind, id, region }
    }
}

/// Run `action` for `event`. Returns `true` on success.
pub(crate) fn run_action(action: &Action, event: &mut ClickEvent, origin: &Origin) -> bool {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| action.call(event)));
    let (message, panicked) = match outcome {
        Ok(Ok(())) => return true,
        Ok(Err(err)) => (err.to_string(), false),
        Err(payload) => (panic_message(payload.as_ref()), true),
    };

    tracing::warn!(
        pane.kind = origin.kind,
        pane.id = origin.id.get(),
        pane.x = origin.region.x,
        pane.y = origin.region.y,
        pane.length = origin.region.width,
        pane.height = origin.region.height,
        slot = event.slot(),
        click = ?event.kind(),
        panicked,
        error = %message,
        "click action failed"
    );

    event.record_failure(ActionFailure {
        pane_kind: origin.kind,
        pane_id: origin.id.get(),
        origin: (origin.region.x, origin.region.y),
        length: origin.region.width,
        height: origin.region.height,
        message,
        panicked,
    });
    false
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "action panicked".to_string()
    }
}
