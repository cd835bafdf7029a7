use tracing::{info, warn};

use crate::catalog::{CatalogClient, DetailOutcome, SearchOutcome};
use crate::chat::{CommandContext, MessageSink, OutgoingMessage, SlashCommand};
use crate::config::{ResolvedConfig, SearchQuery};
use crate::domain::{AssociationKey, WatchScope};
use crate::error::WatchError;
use crate::render;
use crate::store::WatchListStore;

/// Command handlers. Every handler returns exactly one reply text and never
/// fails; errors are logged and replaced by a fixed message.
pub struct App<C: CatalogClient, S: WatchListStore> {
    catalog: C,
    store: S,
    search: SearchQuery,
    scope: WatchScope,
}

impl<C: CatalogClient, S: WatchListStore> App<C, S> {
    pub fn new(catalog: C, store: S) -> Self {
        Self {
            catalog,
            store,
            search: SearchQuery::default(),
            scope: WatchScope::default(),
        }
    }

    pub fn from_config(catalog: C, store: S, config: &ResolvedConfig) -> Self {
        Self::new(catalog, store)
            .with_search(config.search.clone())
            .with_scope(config.scope)
    }

    pub fn with_search(mut self, search: SearchQuery) -> Self {
        self.search = search;
        self
    }

    pub fn with_scope(mut self, scope: WatchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `/datasets`
    pub fn list_datasets(&self) -> String {
        match self.catalog.search(&self.search) {
            Ok(outcome) => render_search(outcome),
            Err(err) => {
                warn!(error = %err, "dataset search failed");
                render::DATASETS_ERROR.to_string()
            }
        }
    }

    /// `/watch <dataset_id>`
    pub fn watch(&self, key: &AssociationKey, arguments: &[String]) -> String {
        let Some(dataset_id) = arguments.first().filter(|id| !id.is_empty()) else {
            return render::WATCH_MISSING_ID.to_string();
        };

        match self.add_to_watch_list(key, dataset_id) {
            Ok(true) => {
                info!(key = %key, dataset = %dataset_id, "dataset added to watch list");
                render::added(dataset_id)
            }
            Ok(false) => render::already_watching(dataset_id),
            Err(err) => {
                warn!(key = %key, dataset = %dataset_id, error = %err, "watch list update failed");
                render::WATCH_ERROR.to_string()
            }
        }
    }

    /// `/watchlist`
    pub fn watchlist(&self, key: &AssociationKey) -> String {
        let list = match self.store.read(key) {
            Ok(list) => list,
            Err(err) => {
                warn!(key = %key, error = %err, "watch list read failed");
                return render::WATCHLIST_ERROR.to_string();
            }
        };

        if list.is_empty() {
            return render::WATCHLIST_EMPTY.to_string();
        }

        let mut text = render::WATCHLIST_HEADER.to_string();
        for (index, dataset_id) in list.iter().enumerate() {
            let position = index + 1;
            match self.catalog.dataset(dataset_id) {
                Ok(DetailOutcome::Found(dataset)) => {
                    render::detail_entry(&mut text, position, &dataset)
                }
                Ok(DetailOutcome::Status(status)) => {
                    warn!(dataset = %dataset_id, status, "catalog refused dataset detail");
                    render::detail_unavailable(&mut text, position, dataset_id)
                }
                Err(err) => {
                    warn!(dataset = %dataset_id, error = %err, "dataset detail fetch failed");
                    render::detail_error(&mut text, position, dataset_id)
                }
            }
        }
        text.push_str(render::WATCHLIST_FOOTER);
        text
    }

    /// Dispatches an invocation to its handler and addresses the reply back to
    /// the invoking sender and room.
    pub fn execute(&self, context: &CommandContext) -> OutgoingMessage {
        let text = match SlashCommand::from_name(&context.command) {
            Some(SlashCommand::Datasets) => self.list_datasets(),
            Some(SlashCommand::Watch) => self.watch(&self.key_for(context), &context.arguments),
            Some(SlashCommand::Watchlist) => self.watchlist(&self.key_for(context)),
            None => render::unknown_command(&context.command),
        };
        OutgoingMessage {
            sender: context.sender.clone(),
            room: context.room.clone(),
            text,
        }
    }

    pub fn handle(
        &self,
        context: &CommandContext,
        sink: &dyn MessageSink,
    ) -> Result<(), WatchError> {
        let message = self.execute(context);
        sink.send(&message)
    }

    pub fn key_for(&self, context: &CommandContext) -> AssociationKey {
        self.scope.key_for(&context.sender, &context.room)
    }

    fn add_to_watch_list(
        &self,
        key: &AssociationKey,
        dataset_id: &str,
    ) -> Result<bool, WatchError> {
        let mut list = self.store.read(key)?;
        if !list.insert(dataset_id) {
            return Ok(false);
        }
        self.store.write(key, &list)?;
        Ok(true)
    }
}

fn render_search(outcome: SearchOutcome) -> String {
    let mut text = render::DATASETS_HEADER.to_string();
    match outcome {
        SearchOutcome::Datasets(datasets) => {
            for (index, dataset) in datasets.iter().enumerate() {
                render::search_entry(&mut text, index + 1, dataset);
            }
        }
        SearchOutcome::Unexpected(body) => {
            warn!(body = %body, "dataset search returned a non-array body");
            text.push_str(render::DATASETS_UNEXPECTED);
        }
    }
    text.push_str(render::DATASETS_FOOTER);
    text
}
