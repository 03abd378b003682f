//! Re-binding on DOM changes

use std::rc::Rc;

use log::error;

use crate::binder::{BindingPass, BindingRegistry, ListenerBinder, MapDocument};
use crate::error::RedirectError;

/// Observe the document body and run one binding pass per mutation batch
///
/// The observer lives as long as the page; nothing tears it down.
pub fn install<D, R>(binder: Rc<ListenerBinder<D, R>>) -> Result<(), RedirectError>
where
    D: MapDocument + 'static,
    R: BindingRegistry<D::Element> + 'static,
{
    let observed = Rc::clone(&binder);
    binder
        .document()
        .observe_mutations(Box::new(move |records| {
            on_batch(&observed, records);
        }))
}

/// Any record in the batch triggers a full re-scan
pub fn on_batch<D, R>(binder: &ListenerBinder<D, R>, records: usize) -> Option<BindingPass>
where
    D: MapDocument,
    R: BindingRegistry<D::Element>,
{
    if records == 0 {
        return None;
    }
    match binder.bind_all() {
        Ok(pass) => Some(pass),
        Err(err) => {
            error!("Re-binding map elements failed: {}", err);
            None
        }
    }
}
