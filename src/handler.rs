//! Click handling for bound map elements

use std::rc::Rc;

use log::warn;

use crate::error::RedirectError;
use crate::link::TargetLink;

/// The part of a DOM event the click handler needs
pub trait ClickEvent {
    fn prevent_default(&self);
}

/// Opens URLs in a browsing context
pub trait Navigator {
    fn open(&self, url: &str, target: &str) -> Result<(), RedirectError>;
}

/// Redirects a click on a map element to the maps link
#[derive(Debug)]
pub struct ClickHandler {
    link: Rc<TargetLink>,
    target: &'static str,
}

impl ClickHandler {
    pub fn new(link: Rc<TargetLink>, target: &'static str) -> ClickHandler {
        ClickHandler { link, target }
    }

    /// Suppress the element's own action and open the link in a new context
    pub fn handle(&self, event: &impl ClickEvent, navigator: &impl Navigator) {
        event.prevent_default();
        if let Err(err) = navigator.open(self.link.as_str(), self.target) {
            warn!("Could not open maps link: {}", err);
        }
    }
}
