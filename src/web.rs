//! Browser host: web-sys implementations of the document traits

use std::rc::Rc;

use js_sys::{Array, Function, Object, WeakSet};
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlElement, MutationObserver, MutationObserverInit,
    SvgElement, Window,
};

use crate::binder::{BindingRegistry, MapDocument};
use crate::config::RedirectConfig;
use crate::error::RedirectError;
use crate::handler::{ClickEvent, ClickHandler, Navigator};
use crate::setup;

/// The live page document
#[derive(Clone)]
pub struct WebDocument {
    window: Window,
    document: Document,
}

impl WebDocument {
    pub fn from_window() -> Result<WebDocument, RedirectError> {
        let window = web_sys::window().ok_or(RedirectError::MissingGlobal("window"))?;
        let document = window.document().ok_or(RedirectError::MissingGlobal("document"))?;
        Ok(WebDocument { window, document })
    }

    /// Current page address
    pub fn address(&self) -> Result<String, RedirectError> {
        self.window
            .location()
            .href()
            .map_err(|e| RedirectError::dom("location.href", e))
    }
}

impl MapDocument for WebDocument {
    type Element = Element;
    type Listener = Function;

    fn select_all(&self, selector: &str) -> Result<Vec<Element>, RedirectError> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|e| RedirectError::dom("querySelectorAll", e))?;

        Ok((0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn make_listener(&self, handler: Rc<ClickHandler>) -> Function {
        let navigator = WindowNavigator(self.window.clone());
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            handler.handle(&event, &navigator);
        });
        // Owned by the JS side from here on; bindings never go away
        on_click.into_js_value().unchecked_into()
    }

    fn attach_click(&self, element: &Element, listener: &Function) -> Result<(), RedirectError> {
        element
            .add_event_listener_with_callback("click", listener)
            .map_err(|e| RedirectError::dom("addEventListener", e))
    }

    fn set_pointer_cursor(&self, element: &Element) -> Result<(), RedirectError> {
        let style = if let Some(html) = element.dyn_ref::<HtmlElement>() {
            html.style()
        } else if let Some(svg) = element.dyn_ref::<SvgElement>() {
            svg.style()
        } else {
            return Ok(());
        };
        style
            .set_property("cursor", "pointer")
            .map_err(|e| RedirectError::dom("style.cursor", e))
    }

    fn observe_mutations(&self, mut on_batch: Box<dyn FnMut(usize)>) -> Result<(), RedirectError> {
        let body = self.document.body().ok_or(RedirectError::MissingGlobal("document.body"))?;

        let callback = Closure::<dyn FnMut(Array, MutationObserver)>::new(
            move |records: Array, _observer: MutationObserver| {
                on_batch(records.length() as usize);
            },
        );
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|e| RedirectError::dom("MutationObserver", e))?;

        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer
            .observe_with_options(&body, &options)
            .map_err(|e| RedirectError::dom("MutationObserver.observe", e))?;

        // Watch for the rest of the page's life
        callback.forget();
        Ok(())
    }
}

/// Bound elements, held weakly so removed nodes can be collected
pub struct ElementRegistry(WeakSet);

impl ElementRegistry {
    pub fn new() -> ElementRegistry {
        ElementRegistry(WeakSet::new())
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingRegistry<Element> for ElementRegistry {
    fn contains(&self, element: &Element) -> bool {
        self.0.has(element.unchecked_ref::<Object>())
    }

    fn insert(&self, element: &Element) {
        self.0.add(element.unchecked_ref::<Object>());
    }
}

impl ClickEvent for Event {
    fn prevent_default(&self) {
        Event::prevent_default(self);
    }
}

struct WindowNavigator(Window);

impl Navigator for WindowNavigator {
    fn open(&self, url: &str, target: &str) -> Result<(), RedirectError> {
        match self.0.open_with_url_and_target(url, target) {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(RedirectError::NavigationBlocked(url.to_string())),
            Err(e) => Err(RedirectError::dom("window.open", e)),
        }
    }
}

/// Run setup against the live page; failures are logged, not returned
pub fn setup_page(config: &RedirectConfig) {
    let outcome = WebDocument::from_window().and_then(|document| {
        let address = document.address()?;
        setup::activate(config, &address, document, ElementRegistry::new())
    });
    setup::settle(outcome);
}

/// Run setup once the page has finished loading
pub fn install_on_load() {
    if let Err(err) = schedule_setup() {
        setup::report_failure(&err);
    }
}

fn schedule_setup() -> Result<(), RedirectError> {
    let window = web_sys::window().ok_or(RedirectError::MissingGlobal("window"))?;
    let document = window.document().ok_or(RedirectError::MissingGlobal("document"))?;

    if document.ready_state() == "complete" {
        setup_page(&RedirectConfig::default());
        return Ok(());
    }

    let on_load = Closure::once(move || {
        setup_page(&RedirectConfig::default());
    });
    window
        .add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())
        .map_err(|e| RedirectError::dom("addEventListener", e))?;
    on_load.forget();
    Ok(())
}
