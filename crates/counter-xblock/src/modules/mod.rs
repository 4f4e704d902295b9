//! State modules and their composition into one store

use crate::thunk::{Actions, ThunkAction};
use anyhow::Context;
use indexmap::IndexMap;
use ns_store::{connect_reducers, Mode, Reducer, Selector, StrictDict, StrictNode};
use std::sync::Arc;

pub mod counter;

/// The composed store, with checked access to its parts
pub struct AppModules {
    pub actions: Arc<Actions>,
    pub reducer: Reducer,
    pub selectors: StrictDict<StrictNode<Selector>>,
    pub thunk_actions: StrictDict<StrictNode<ThunkAction>>,
}

impl AppModules {
    pub fn action(&self, path: &str) -> anyhow::Result<&ns_store::ActionCreator> {
        self.actions
            .leaf(path)?
            .with_context(|| format!("no action registered at \"{}\"", path))
    }

    pub fn selector(&self, path: &str) -> anyhow::Result<&Selector> {
        self.selectors
            .leaf(path)?
            .with_context(|| format!("no selector registered at \"{}\"", path))
    }

    pub fn thunk_action(&self, path: &str) -> anyhow::Result<&ThunkAction> {
        self.thunk_actions
            .leaf(path)?
            .with_context(|| format!("no thunk action registered at \"{}\"", path))
    }
}

/// Mount every state module and compose them
pub fn connect(mode: Mode) -> anyhow::Result<AppModules> {
    let mut mapping = IndexMap::new();
    mapping.insert(counter::NAME.to_string(), counter::module()?);

    let store = connect_reducers(mapping);
    log::debug!(
        "Composed store with action types {:?}",
        store.action_types.leaves().iter().map(|(_, t)| t.as_str()).collect::<Vec<_>>()
    );

    Ok(AppModules {
        actions: Arc::new(store.strict_actions(mode)),
        reducer: store.reducer.clone(),
        selectors: store.strict_selectors(mode),
        thunk_actions: store.strict_thunks(mode),
    })
}
