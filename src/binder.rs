//! Idempotent binding of the click handler to map elements

use std::rc::Rc;

use log::debug;

use crate::error::RedirectError;
use crate::handler::ClickHandler;

/// Document access needed to find, bind and watch map elements
pub trait MapDocument {
    type Element;
    /// Host form of the click handler, shared by every bound element
    type Listener: 'static;

    /// All elements matching a selector list, in document order, without duplicates
    fn select_all(&self, selector: &str) -> Result<Vec<Self::Element>, RedirectError>;

    fn make_listener(&self, handler: Rc<ClickHandler>) -> Self::Listener;

    fn attach_click(&self, element: &Self::Element, listener: &Self::Listener) -> Result<(), RedirectError>;

    fn set_pointer_cursor(&self, element: &Self::Element) -> Result<(), RedirectError>;

    /// Call `on_batch` with the record count of every mutation batch under the body
    fn observe_mutations(&self, on_batch: Box<dyn FnMut(usize)>) -> Result<(), RedirectError>;
}

/// Identity set of elements that already carry the click handler
pub trait BindingRegistry<E> {
    fn contains(&self, element: &E) -> bool;
    fn insert(&self, element: &E);
}

/// Result of one binding pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindingPass {
    pub matched: usize,
    pub newly_bound: usize,
}

pub struct ListenerBinder<D: MapDocument, R> {
    document: D,
    registry: R,
    listener: D::Listener,
    selector: String,
}

impl<D, R> ListenerBinder<D, R>
where
    D: MapDocument,
    R: BindingRegistry<D::Element>,
{
    /// `selector` is the full selector list, e.g. `"#a, .b.c"`
    pub fn new(document: D, registry: R, handler: Rc<ClickHandler>, selector: String) -> Self {
        let listener = document.make_listener(handler);
        ListenerBinder {
            document,
            registry,
            listener,
            selector,
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Re-scan the document and bind every match that is not yet bound
    ///
    /// Elements already in the registry keep their single handler; the
    /// pointer cursor is reapplied to every match.
    pub fn bind_all(&self) -> Result<BindingPass, RedirectError> {
        let elements = self.document.select_all(&self.selector)?;
        let mut pass = BindingPass {
            matched: elements.len(),
            newly_bound: 0,
        };

        for element in &elements {
            if !self.registry.contains(element) {
                self.document.attach_click(element, &self.listener)?;
                self.registry.insert(element);
                pass.newly_bound += 1;
            }
            self.document.set_pointer_cursor(element)?;
        }

        debug!(
            "Binding pass: {} map elements matched, {} newly bound",
            pass.matched, pass.newly_bound
        );
        Ok(pass)
    }
}
