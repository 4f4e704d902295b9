//! The block as the host sees it
//!
//! The host constructs a [`CounterXBlock`] with its runtime, the element the
//! block is mounted on and the block's field data. The block owns the store
//! and the connected [`App`] view.

use crate::actions::Dispatch;
use crate::comms;
use crate::middleware::logging::LoggingMiddleware;
use crate::middleware::thunk::ThunkMiddleware;
use crate::modules::{self, AppModules};
use crate::store::Store;
use crate::thunk::{Globals, MakeUrl};
use crate::view_models::app_view_model::AppViewModel;
use crate::views::app_view::App;
use ns_store::Mode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, PoisonError, RwLock};
use xblock_client::{CountResponse, CounterClient};

/// Host services available to the block
pub trait XBlockRuntime: Send + Sync {
    /// URL of the block's handler `handler`
    fn handler_url(&self, element: &Element, handler: &str) -> String;
}

/// Runtime of an LMS reachable at `base_url`
#[derive(Debug, Clone)]
pub struct LmsRuntime {
    base_url: String,
}

impl LmsRuntime {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl XBlockRuntime for LmsRuntime {
    fn handler_url(&self, element: &Element, handler: &str) -> String {
        format!(
            "{}/handler/{}/{}/",
            self.base_url.trim_end_matches('/'),
            element.usage_id(),
            handler
        )
    }
}

/// The element the block is mounted on, with its server-rendered count label
#[derive(Debug, Clone)]
pub struct Element {
    usage_id: String,
    count_label: Arc<RwLock<String>>,
}

impl Element {
    pub fn new(usage_id: impl Into<String>) -> Self {
        Self {
            usage_id: usage_id.into(),
            count_label: Arc::new(RwLock::new(String::new())),
        }
    }

    pub fn usage_id(&self) -> &str {
        &self.usage_id
    }

    pub fn count_label(&self) -> String {
        self.count_label
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_count_label(&self, text: impl Into<String>) {
        *self
            .count_label
            .write()
            .unwrap_or_else(PoisonError::into_inner) = text.into();
    }

    /// Show a backend response on the label
    pub fn update_count(&self, result: &CountResponse) {
        self.set_count_label(result.count.to_string());
    }
}

/// Field data the host passes to the block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XBlockData {
    pub count: i64,
}

pub struct CounterXBlock {
    element: Element,
    client: Arc<dyn CounterClient>,
    make_url: MakeUrl,
    modules: Arc<AppModules>,
    store: Store,
    app: App,
}

impl CounterXBlock {
    pub fn new(
        runtime: Arc<dyn XBlockRuntime>,
        element: Element,
        data: XBlockData,
        client: Arc<dyn CounterClient>,
        mode: Mode,
    ) -> anyhow::Result<Self> {
        log::info!(
            "Initializing block {} (count {}, {} mode)",
            element.usage_id(),
            data.count,
            mode
        );
        element.set_count_label(data.count.to_string());

        let make_url: MakeUrl = {
            let element = element.clone();
            Arc::new(move |handler| runtime.handler_url(&element, handler))
        };

        let modules = Arc::new(modules::connect(mode)?);
        let mut store = Store::new(modules.reducer.clone());
        let globals = Globals {
            make_url: Arc::clone(&make_url),
            xblock: element.clone(),
            client: Arc::clone(&client),
        };
        store.add_middleware(Box::new(LoggingMiddleware::new()));
        store.add_middleware(Box::new(ThunkMiddleware::new(
            store.state_handle(),
            Arc::clone(&modules.actions),
            Arc::new(globals),
        )));

        let app = App::connect(data, &modules)?;
        store.dispatch(app.did_mount());

        Ok(Self {
            element,
            client,
            make_url,
            modules,
            store,
            app,
        })
    }

    pub fn make_handler_url(&self, handler: &str) -> String {
        (self.make_url)(handler)
    }

    /// Write a backend response onto the legacy count label
    pub fn update_count(&self, result: &CountResponse) {
        self.element.update_count(result);
    }

    /// Increment directly, bypassing the thunk; the label and the store are
    /// both updated
    pub async fn handle_element_click(&mut self) -> anyhow::Result<()> {
        let result = comms::update_count(self.client.as_ref(), &self.make_url).await?;
        self.update_count(&result);
        let load = self.modules.action("counter.load")?;
        self.store.dispatch(load.call(&[json!(result.count)]));
        Ok(())
    }

    /// Activate the view's increment button
    pub fn click(&mut self) {
        let item: Dispatch = self.app.on_click();
        self.store.dispatch(item);
    }

    /// Pick up actions dispatched by finished thunks
    pub fn tick(&mut self) -> usize {
        self.store.process_pending()
    }

    pub fn view_model(&self) -> AppViewModel {
        self.app.view_model(self.store.state(), &self.element)
    }

    #[cfg(test)]
    pub fn element(&self) -> &Element {
        &self.element
    }

    #[cfg(test)]
    pub fn store(&self) -> &Store {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xblock_client::WorkbenchCounter;

    fn block(count: i64) -> (CounterXBlock, Arc<WorkbenchCounter>) {
        let client = Arc::new(WorkbenchCounter::new(count));
        let block = CounterXBlock::new(
            Arc::new(LmsRuntime::new("http://lms.test/")),
            Element::new("block-v1:edX+Demo+counter"),
            XBlockData { count },
            client.clone(),
            Mode::Development,
        )
        .unwrap();
        (block, client)
    }

    #[test]
    fn test_handler_url() {
        let (block, _) = block(0);
        assert_eq!(
            block.make_handler_url("increment_count"),
            "http://lms.test/handler/block-v1:edX+Demo+counter/increment_count/"
        );
    }

    #[test]
    fn test_mount_loads_initial_count() {
        let (block, _) = block(5);
        assert_eq!(block.store().state(), &json!({ "counter": { "value": 5 } }));
        assert_eq!(block.element().count_label(), "5");
        assert_eq!(block.view_model().count, "5");
    }

    #[tokio::test]
    async fn test_element_click_increments() {
        let (mut block, client) = block(2);

        block.handle_element_click().await.unwrap();

        assert_eq!(client.count(), 3);
        assert_eq!(block.element().count_label(), "3");
        assert_eq!(block.store().state(), &json!({ "counter": { "value": 3 } }));
    }

    #[tokio::test]
    async fn test_button_click_runs_update_thunk() {
        let (mut block, client) = block(8);

        block.click();
        for _ in 0..100 {
            if block.tick() > 0 {
                break;
            }
            tokio::task::yield_now().await;
        }

        assert_eq!(client.count(), 9);
        assert_eq!(block.store().state(), &json!({ "counter": { "value": 9 } }));
        assert_eq!(block.element().count_label(), "9");
    }
}
