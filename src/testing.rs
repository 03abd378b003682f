//! In-memory document and log capture used by the native tests

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::binder::{BindingRegistry, MapDocument};
use crate::error::RedirectError;
use crate::handler::{ClickEvent, ClickHandler, Navigator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FakeElement(usize);

struct FakeNode {
    element: FakeElement,
    html_id: Option<String>,
    classes: Vec<String>,
    cursor: Option<String>,
    listeners: Vec<Rc<ClickHandler>>,
}

impl FakeNode {
    /// Supports `#id` and compound `.a.b` selectors
    fn matches(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            return self.html_id.as_deref() == Some(id);
        }
        match selector.strip_prefix('.') {
            Some(classes) => classes
                .split('.')
                .all(|class| self.classes.iter().any(|c| c == class)),
            None => false,
        }
    }
}

#[derive(Default)]
struct FakeState {
    nodes: RefCell<Vec<FakeNode>>,
    next_id: Cell<usize>,
    observer: RefCell<Option<Box<dyn FnMut(usize)>>>,
    navigations: RefCell<Vec<(String, String)>>,
    queries: Cell<usize>,
    fail_queries: Cell<bool>,
}

/// Cheaply clonable handle; clones share one document
#[derive(Clone, Default)]
pub struct FakeDocument(Rc<FakeState>);

impl FakeDocument {
    pub fn new() -> FakeDocument {
        FakeDocument::default()
    }

    pub fn add(&self, html_id: Option<&str>, classes: &[&str]) -> FakeElement {
        let element = FakeElement(self.0.next_id.get());
        self.0.next_id.set(element.0 + 1);
        self.0.nodes.borrow_mut().push(FakeNode {
            element,
            html_id: html_id.map(str::to_string),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            cursor: None,
            listeners: Vec::new(),
        });
        element
    }

    pub fn remove(&self, element: FakeElement) {
        self.0.nodes.borrow_mut().retain(|node| node.element != element);
    }

    pub fn fail_queries(&self) {
        self.0.fail_queries.set(true);
    }

    pub fn listener_count(&self, element: FakeElement) -> usize {
        self.with_node(element, |node| node.listeners.len())
    }

    pub fn cursor(&self, element: FakeElement) -> Option<String> {
        self.with_node(element, |node| node.cursor.clone())
    }

    pub fn query_count(&self) -> usize {
        self.0.queries.get()
    }

    pub fn is_observed(&self) -> bool {
        self.0.observer.borrow().is_some()
    }

    /// Deliver one mutation batch with `records` records to the observer
    pub fn flush_mutations(&self, records: usize) {
        if let Some(on_batch) = self.0.observer.borrow_mut().as_mut() {
            on_batch(records);
        }
    }

    /// Dispatch a click and report whether the default action was prevented
    pub fn click(&self, element: FakeElement) -> bool {
        let listeners = self.with_node(element, |node| node.listeners.clone());
        let event = FakeEvent::default();
        let navigator = FakeNavigator(self.clone());
        for handler in listeners {
            handler.handle(&event, &navigator);
        }
        event.0.get()
    }

    pub fn navigations(&self) -> Vec<(String, String)> {
        self.0.navigations.borrow().clone()
    }

    fn with_node<T>(&self, element: FakeElement, f: impl FnOnce(&mut FakeNode) -> T) -> T {
        let mut nodes = self.0.nodes.borrow_mut();
        let node = nodes
            .iter_mut()
            .find(|node| node.element == element)
            .expect("element is in the document");
        f(node)
    }
}

impl MapDocument for FakeDocument {
    type Element = FakeElement;
    type Listener = Rc<ClickHandler>;

    fn select_all(&self, selector: &str) -> Result<Vec<FakeElement>, RedirectError> {
        self.0.queries.set(self.0.queries.get() + 1);
        if self.0.fail_queries.get() {
            return Err(RedirectError::dom("querySelectorAll", "SyntaxError"));
        }
        let parts: Vec<&str> = selector.split(',').map(str::trim).collect();
        Ok(self
            .0
            .nodes
            .borrow()
            .iter()
            .filter(|node| parts.iter().any(|part| node.matches(part)))
            .map(|node| node.element)
            .collect())
    }

    fn make_listener(&self, handler: Rc<ClickHandler>) -> Rc<ClickHandler> {
        handler
    }

    fn attach_click(&self, element: &FakeElement, listener: &Rc<ClickHandler>) -> Result<(), RedirectError> {
        self.with_node(*element, |node| node.listeners.push(Rc::clone(listener)));
        Ok(())
    }

    fn set_pointer_cursor(&self, element: &FakeElement) -> Result<(), RedirectError> {
        self.with_node(*element, |node| node.cursor = Some("pointer".to_string()));
        Ok(())
    }

    fn observe_mutations(&self, on_batch: Box<dyn FnMut(usize)>) -> Result<(), RedirectError> {
        *self.0.observer.borrow_mut() = Some(on_batch);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeRegistry(RefCell<HashSet<FakeElement>>);

impl BindingRegistry<FakeElement> for FakeRegistry {
    fn contains(&self, element: &FakeElement) -> bool {
        self.0.borrow().contains(element)
    }

    fn insert(&self, element: &FakeElement) {
        self.0.borrow_mut().insert(*element);
    }
}

#[derive(Default)]
struct FakeEvent(Cell<bool>);

impl ClickEvent for FakeEvent {
    fn prevent_default(&self) {
        self.0.set(true);
    }
}

struct FakeNavigator(FakeDocument);

impl Navigator for FakeNavigator {
    fn open(&self, url: &str, target: &str) -> Result<(), RedirectError> {
        let FakeNavigator(document) = self;
        document
            .0
            .navigations
            .borrow_mut()
            .push((url.to_string(), target.to_string()));
        Ok(())
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Records each thread's log output separately, so parallel tests don't mix
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|logs| {
            logs.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static CAPTURE_LOGGER: CaptureLogger = CaptureLogger;
static INSTALL_LOGGER: Once = Once::new();

/// Run `f` and return the log records it emitted on this thread
pub fn capture_logs(f: impl FnOnce()) -> Vec<(Level, String)> {
    INSTALL_LOGGER.call_once(|| {
        log::set_logger(&CAPTURE_LOGGER).expect("no other logger in tests");
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|logs| logs.borrow_mut().clear());
    f();
    CAPTURED.with(|logs| logs.take())
}

/// Records at `level` only
pub fn at_level(logs: &[(Level, String)], level: Level) -> Vec<String> {
    logs.iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, message)| message.clone())
        .collect()
}
