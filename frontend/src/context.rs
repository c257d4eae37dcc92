use log::warn;
use std::rc::Rc;

use crate::api::CrmClient;
use crate::config::AppConfig;
use crate::storage::{BrowserStore, KeyValueStore, MemoryStore, PinStore, PreferencesStore};

/// Services shared with every page through a Yew context.
#[derive(Clone, PartialEq)]
pub struct AppContext {
    pub config: AppConfig,
    pub pins: PinStore,
    pub preferences: PreferencesStore,
    pub client: CrmClient,
}

impl AppContext {
    pub fn new(config: AppConfig, store: Rc<dyn KeyValueStore>) -> Self {
        let pins = PinStore::new(store.clone());
        let preferences = PreferencesStore::new(store);
        let client = CrmClient::new(config.clone(), pins.clone());
        Self {
            config,
            pins,
            preferences,
            client,
        }
    }

    pub fn from_browser() -> Self {
        let store: Rc<dyn KeyValueStore> = if BrowserStore::is_available() {
            Rc::new(BrowserStore)
        } else {
            warn!("localStorage unavailable, PIN and filters will not persist");
            Rc::new(MemoryStore::default())
        };
        Self::new(AppConfig::from_window(), store)
    }
}
