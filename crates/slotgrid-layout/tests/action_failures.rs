//! Failing click handlers are contained at the dispatch point.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use slotgrid_core::{ClickKind, ItemContext, Priority, Slot};
use slotgrid_layout::{Component, GridSurface, OutlinePane, StaticPane};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    spans: Arc<Mutex<Vec<String>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_tracing<F: FnOnce()>(f: F) -> (Vec<CapturedEvent>, Vec<String>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let spans = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: Arc::clone(&events),
        spans: Arc::clone(&spans),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let events = events.lock().unwrap().clone();
    let spans = spans.lock().unwrap().clone();
    (events, spans)
}

fn failing_surface(panic: bool) -> GridSurface<char> {
    let ctx = ItemContext::new("test");
    let item = ctx.item('!').with_action(move |_| {
        if panic {
            panic!("handler exploded");
        }
        Err("out of stock".into())
    });
    let mut surface = GridSurface::new(4, 2).unwrap();
    surface.add_pane(
        StaticPane::new(Slot::from_xy(1, 1), 2, 1)
            .unwrap()
            .with_item(item, Slot::from_xy(1, 0)),
    );
    surface
}

#[test]
fn error_is_logged_with_pane_context() {
    let mut surface = failing_surface(false);
    surface.display();
    let (events, spans) = with_captured_tracing(|| {
        let (matched, event) = surface.click_slot(6, ClickKind::Right);
        assert!(matched);
        let failure = &event.failures()[0];
        assert_eq!(failure.pane_kind, "static");
        assert_eq!(failure.origin, (1, 1));
        assert_eq!((failure.length, failure.height), (2, 1));
        assert_eq!(failure.message, "out of stock");
    });

    assert!(spans.iter().any(|name| name == "surface.click"));
    let warning = events
        .iter()
        .find(|e| e.level == tracing::Level::WARN)
        .expect("expected a warning for the failed action");
    assert_eq!(warning.fields.get("pane.kind").map(String::as_str), Some("static"));
    assert_eq!(warning.fields.get("pane.x").map(String::as_str), Some("1"));
    assert_eq!(warning.fields.get("pane.y").map(String::as_str), Some("1"));
    assert_eq!(warning.fields.get("slot").map(String::as_str), Some("6"));
    assert_eq!(warning.fields.get("click").map(String::as_str), Some("Right"));
    assert_eq!(warning.fields.get("panicked").map(String::as_str), Some("false"));
    assert_eq!(warning.fields.get("error").map(String::as_str), Some("out of stock"));
}

#[test]
fn panic_is_contained_and_routing_continues() {
    let mut surface = failing_surface(true);
    surface.display();

    let (matched, event) = surface.click_slot(6, ClickKind::Left);
    assert!(matched);
    assert!(event.failures()[0].panicked);
    assert_eq!(event.failures()[0].message, "handler exploded");

    // The composition is intact and keeps routing.
    surface.display();
    assert_eq!(surface.item(2, 1).map(|i| *i.payload()), Some('!'));
    let (matched, event) = surface.click_slot(6, ClickKind::Left);
    assert!(matched);
    assert_eq!(event.failures().len(), 1);
}

#[test]
fn failing_interceptor_does_not_stop_siblings() {
    let ctx = ItemContext::new("test");
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);

    let mut surface = GridSurface::new(3, 1).unwrap();
    let mut top = OutlinePane::<char>::new(Slot::default(), 3, 1)
        .unwrap()
        .with_priority(Priority::Highest);
    top.set_on_click(|_| Err("interceptor broke".into()));
    surface.add_pane(top);
    surface.add_pane(
        OutlinePane::new(Slot::default(), 3, 1)
            .unwrap()
            .with_repeat(true)
            .with_items([ctx.item('a').with_action(move |_| {
                counter.set(counter.get() + 1);
                Ok(())
            })]),
    );
    surface.display();

    for _ in 0..2 {
        let (matched, event) = surface.click_slot(1, ClickKind::Left);
        assert!(matched);
        assert_eq!(event.failures().len(), 1);
        assert_eq!(event.failures()[0].message, "interceptor broke");
    }
    assert_eq!(hits.get(), 2);
}

#[test]
fn display_emits_surface_span() {
    let ctx = ItemContext::new("test");
    let mut surface = GridSurface::new(2, 1).unwrap();
    surface.add_pane(
        OutlinePane::new(Slot::default(), 2, 1)
            .unwrap()
            .with_items([ctx.item('a')]),
    );
    let (_, spans) = with_captured_tracing(|| surface.display());
    assert!(spans.iter().any(|name| name == "surface.display"));
    assert!(spans.iter().any(|name| name == "pane.display"));
}
