//! Page-load setup: extract the term, bind map elements, start watching

use std::rc::Rc;

use log::{error, info, warn};

use crate::binder::{BindingRegistry, ListenerBinder, MapDocument};
use crate::config::RedirectConfig;
use crate::error::RedirectError;
use crate::handler::ClickHandler;
use crate::link::TargetLink;
use crate::query::extract_query_term;
use crate::watcher;

/// Redirection installed on a page with a search term
pub struct ActiveRedirect<D: MapDocument, R> {
    link: Rc<TargetLink>,
    binder: Rc<ListenerBinder<D, R>>,
}

impl<D: MapDocument, R> ActiveRedirect<D, R> {
    pub fn link(&self) -> &TargetLink {
        &self.link
    }

    pub fn binder(&self) -> &ListenerBinder<D, R> {
        &self.binder
    }
}

pub enum SetupState<D: MapDocument, R> {
    /// No search term on this page; nothing is bound or watched
    Inert,
    Active(ActiveRedirect<D, R>),
}

impl<D: MapDocument, R> SetupState<D, R> {
    pub fn is_active(&self) -> bool {
        matches!(self, SetupState::Active(_))
    }
}

/// Run setup for `address`, propagating any failure
pub fn activate<D, R>(
    config: &RedirectConfig,
    address: &str,
    document: D,
    registry: R,
) -> Result<SetupState<D, R>, RedirectError>
where
    D: MapDocument + 'static,
    R: BindingRegistry<D::Element> + 'static,
{
    let Some(term) = extract_query_term(address, config.query_param)? else {
        warn!(
            "No search term ('{}' parameter) found in the URL.",
            config.query_param
        );
        return Ok(SetupState::Inert);
    };

    let link = Rc::new(TargetLink::for_query(config.maps_endpoint, &term));
    let handler = Rc::new(ClickHandler::new(Rc::clone(&link), config.target));
    let binder = Rc::new(ListenerBinder::new(document, registry, handler, config.combined_selector()));

    let pass = binder.bind_all()?;
    watcher::install(Rc::clone(&binder))?;

    info!(
        "Map redirection active for '{}' ({} map elements bound)",
        term, pass.newly_bound
    );
    Ok(SetupState::Active(ActiveRedirect { link, binder }))
}

/// Log a setup failure and fall back to leaving the page untouched
pub fn settle<D: MapDocument, R>(outcome: Result<SetupState<D, R>, RedirectError>) -> SetupState<D, R> {
    outcome.unwrap_or_else(|err| {
        report_failure(&err);
        SetupState::Inert
    })
}

pub fn report_failure(err: &RedirectError) {
    error!(
        "An error occurred while setting up map redirection: {} ({:?})",
        err, err
    );
}

/// Top-level setup; never fails
pub fn run_setup<D, R>(config: &RedirectConfig, address: &str, document: D, registry: R) -> SetupState<D, R>
where
    D: MapDocument + 'static,
    R: BindingRegistry<D::Element> + 'static,
{
    settle(activate(config, address, document, registry))
}
