//! Browser persistence for the stored PIN and the accounts page filters.
//!
//! All reads and writes are best effort: if storage is unavailable the
//! feature silently degrades to in-memory behaviour.

use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const PIN_STORAGE_KEY: &str = "bz_clientapp_pin";
pub const ACCOUNTS_PREFERENCES_KEY: &str = "bz_clientapp_accounts_preferences";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`.
#[derive(Clone, Copy, Default)]
pub struct BrowserStore;

impl BrowserStore {
    pub fn is_available() -> bool {
        Self::storage().is_some()
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    debug!("localStorage write failed for {}", key);
                }
            }
            None => debug!("localStorage unavailable, {} not persisted", key),
        }
    }

    fn remove(&self, key: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.remove_item(key).is_err() {
                    debug!("localStorage remove failed for {}", key);
                }
            }
            None => debug!("localStorage unavailable, {} not removed", key),
        }
    }
}

/// Non-persistent store, used when the browser blocks localStorage.
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[derive(Clone)]
pub struct PinStore {
    store: Rc<dyn KeyValueStore>,
}

impl PinStore {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Option<String> {
        let value = self.store.get(PIN_STORAGE_KEY)?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn set(&self, pin: &str) {
        let value = pin.trim();
        if value.is_empty() {
            return;
        }
        self.store.set(PIN_STORAGE_KEY, value);
    }

    pub fn clear(&self) {
        self.store.remove(PIN_STORAGE_KEY);
    }
}

impl PartialEq for PinStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }
}

/// Filters remembered between visits to the accounts page.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsPreferences {
    pub selected_month_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_type_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount_filter: Option<String>,
}

impl AccountsPreferences {
    // Fields of the wrong type are dropped one by one rather than
    // discarding the whole record.
    fn from_json(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        let object = value.as_object()?;
        let text = |name: &str| object.get(name).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            selected_month_key: text("selectedMonthKey"),
            fund_type_filter: text("fundTypeFilter"),
            search_text: text("searchText"),
            min_amount_filter: text("minAmountFilter"),
        })
    }
}

#[derive(Clone)]
pub struct PreferencesStore {
    store: Rc<dyn KeyValueStore>,
}

impl PreferencesStore {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Absent or malformed data reads as "no preferences".
    pub fn load(&self) -> Option<AccountsPreferences> {
        let raw = self.store.get(ACCOUNTS_PREFERENCES_KEY)?;
        if raw.is_empty() {
            return None;
        }
        AccountsPreferences::from_json(&raw)
    }

    pub fn save(&self, preferences: &AccountsPreferences) {
        match serde_json::to_string(preferences) {
            Ok(raw) => self.store.set(ACCOUNTS_PREFERENCES_KEY, &raw),
            Err(e) => debug!("could not encode preferences: {}", e),
        }
    }
}

impl PartialEq for PreferencesStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> Rc<dyn KeyValueStore> {
        Rc::new(MemoryStore::default())
    }

    #[test]
    fn pin_is_trimmed_and_blank_ignored() {
        let store = memory();
        let pins = PinStore::new(store.clone());

        assert_eq!(pins.get(), None);
        pins.set("   ");
        assert_eq!(store.get(PIN_STORAGE_KEY), None);

        pins.set(" 123456 ");
        assert_eq!(pins.get().as_deref(), Some("123456"));
        assert_eq!(store.get(PIN_STORAGE_KEY).as_deref(), Some("123456"));

        pins.clear();
        assert_eq!(pins.get(), None);
    }

    #[test]
    fn whitespace_pin_in_storage_reads_as_absent() {
        let store = memory();
        store.set(PIN_STORAGE_KEY, "  ");
        assert_eq!(PinStore::new(store).get(), None);
    }

    #[test]
    fn preferences_written_with_stable_keys() {
        let store = memory();
        let prefs = PreferencesStore::new(store.clone());
        prefs.save(&AccountsPreferences {
            selected_month_key: None,
            fund_type_filter: Some("all".to_string()),
            search_text: None,
            min_amount_filter: Some("1,000".to_string()),
        });

        let raw = store.get(ACCOUNTS_PREFERENCES_KEY).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["selectedMonthKey"], Value::Null);
        assert_eq!(value["fundTypeFilter"], "all");
        assert_eq!(value["minAmountFilter"], "1,000");
        assert!(value.get("searchText").is_none());
    }

    #[test]
    fn preferences_round_trip_through_store() {
        let prefs = PreferencesStore::new(memory());
        let saved = AccountsPreferences {
            selected_month_key: Some("2024-02".to_string()),
            fund_type_filter: Some("Pension".to_string()),
            search_text: Some("growth".to_string()),
            min_amount_filter: Some("500".to_string()),
        };
        prefs.save(&saved);
        assert_eq!(prefs.load(), Some(saved));
    }

    #[test]
    fn malformed_preferences_are_ignored() {
        let store = memory();
        let prefs = PreferencesStore::new(store.clone());

        store.set(ACCOUNTS_PREFERENCES_KEY, "{not json");
        assert_eq!(prefs.load(), None);

        store.set(ACCOUNTS_PREFERENCES_KEY, "[1,2]");
        assert_eq!(prefs.load(), None);

        store.set(ACCOUNTS_PREFERENCES_KEY, "null");
        assert_eq!(prefs.load(), None);
    }

    #[test]
    fn wrongly_typed_fields_are_dropped_individually() {
        let store = memory();
        store.set(
            ACCOUNTS_PREFERENCES_KEY,
            r#"{"selectedMonthKey": 202402, "searchText": "abc", "minAmountFilter": true}"#,
        );
        let loaded = PreferencesStore::new(store).load().unwrap();

        assert_eq!(loaded.selected_month_key, None);
        assert_eq!(loaded.search_text.as_deref(), Some("abc"));
        assert_eq!(loaded.min_amount_filter, None);
        assert_eq!(loaded.fund_type_filter, None);
    }
}
