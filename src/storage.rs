//! Typed JSON persistence over a [`KeyValueStore`].
//!
//! Reads never fail: a missing key, a backend error or a document that no
//! longer decodes all come back as `None` (logged), and callers substitute
//! their default. Writes overwrite unconditionally.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::db::KeyValueStore;
use crate::error::AppResult;
use crate::models::{AppSettings, Category, DataBundle, HistoryEntry, Order, Product, User};

pub mod keys {
    pub const CATEGORIES: &str = "categories";
    pub const PRODUCTS: &str = "products";
    pub const ORDERS: &str = "orders";
    pub const USERS: &str = "users";
    pub const SETTINGS: &str = "settings";
    pub const CURRENT_USER: &str = "currentUser";
    pub const FAVORITES: &str = "favorites";
    pub const ORDER_HISTORY: &str = "orderHistory";
    pub const ORDER_NUMBER: &str = "orderNumber";
    pub const APP_STATE: &str = "appState";
}

/// Outcome of reading a key, for callers that must tell "absent" apart
/// from "present but unreadable".
#[derive(Debug)]
pub enum Loaded<T> {
    Missing,
    Corrupt,
    Value(T),
}

impl<T> Loaded<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Loaded::Value(value) => Some(value),
            Loaded::Missing | Loaded::Corrupt => None,
        }
    }
}

#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Storage { backend }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.load(key).into_option()
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Loaded<T> {
        let raw = match self.backend.get_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Loaded::Missing,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read storage key");
                return Loaded::Corrupt;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Loaded::Value(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding undecodable storage value");
                Loaded::Corrupt
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_raw(key, &raw)
    }

    pub fn set_raw(&self, key: &str, raw: &str) -> AppResult<()> {
        self.backend.set_raw(key, raw)
    }

    pub fn remove(&self, key: &str) -> AppResult<()> {
        self.backend.remove(key)
    }

    pub fn keys(&self) -> AppResult<Vec<String>> {
        self.backend.keys()
    }

    // Named collections

    pub fn categories(&self) -> Vec<Category> {
        self.get(keys::CATEGORIES).unwrap_or_default()
    }

    pub fn save_categories(&self, categories: &[Category]) -> AppResult<()> {
        self.set(keys::CATEGORIES, categories)
    }

    pub fn products(&self) -> Vec<Product> {
        self.get(keys::PRODUCTS).unwrap_or_default()
    }

    pub fn save_products(&self, products: &[Product]) -> AppResult<()> {
        self.set(keys::PRODUCTS, products)
    }

    pub fn orders(&self) -> Vec<Order> {
        self.get(keys::ORDERS).unwrap_or_default()
    }

    pub fn save_orders(&self, orders: &[Order]) -> AppResult<()> {
        self.set(keys::ORDERS, orders)
    }

    pub fn users(&self) -> Vec<User> {
        self.get(keys::USERS).unwrap_or_default()
    }

    pub fn save_users(&self, users: &[User]) -> AppResult<()> {
        self.set(keys::USERS, users)
    }

    pub fn current_user(&self) -> Option<User> {
        self.get::<Option<User>>(keys::CURRENT_USER).flatten()
    }

    pub fn set_current_user(&self, user: Option<&User>) -> AppResult<()> {
        self.set(keys::CURRENT_USER, &user)
    }

    pub fn settings(&self) -> AppSettings {
        self.get(keys::SETTINGS).unwrap_or_default()
    }

    pub fn save_settings(&self, settings: &AppSettings) -> AppResult<()> {
        self.set(keys::SETTINGS, settings)
    }

    pub fn favorites(&self) -> Vec<String> {
        self.get(keys::FAVORITES).unwrap_or_default()
    }

    pub fn save_favorites(&self, favorites: &[String]) -> AppResult<()> {
        self.set(keys::FAVORITES, favorites)
    }

    pub fn order_history(&self) -> Loaded<Vec<HistoryEntry>> {
        self.load(keys::ORDER_HISTORY)
    }

    pub fn save_order_history(&self, entries: &[HistoryEntry]) -> AppResult<()> {
        self.set(keys::ORDER_HISTORY, entries)
    }

    pub fn order_number(&self) -> Option<u32> {
        self.get(keys::ORDER_NUMBER)
    }

    pub fn save_order_number(&self, number: u32) -> AppResult<()> {
        self.set(keys::ORDER_NUMBER, &number)
    }

    /// Pretty-printed bundle of the shareable collections.
    pub fn export_data(&self) -> AppResult<String> {
        let bundle = DataBundle {
            categories: Some(self.categories()),
            products: Some(self.products()),
            orders: Some(self.orders()),
            users: Some(self.users()),
            settings: Some(self.settings()),
        };

        Ok(serde_json::to_string_pretty(&bundle)?)
    }

    /// Writes every section present in `data`. Returns `false` without
    /// writing anything when `data` does not decode.
    pub fn import_data(&self, data: &str) -> bool {
        let bundle: DataBundle = match serde_json::from_str(data) {
            Ok(bundle) => bundle,
            Err(e) => {
                tracing::error!(error = %e, "import failed");
                return false;
            }
        };

        let result = (|| -> AppResult<()> {
            if let Some(categories) = &bundle.categories {
                self.save_categories(categories)?;
            }
            if let Some(products) = &bundle.products {
                self.save_products(products)?;
            }
            if let Some(orders) = &bundle.orders {
                self.save_orders(orders)?;
            }
            if let Some(users) = &bundle.users {
                self.save_users(users)?;
            }
            if let Some(settings) = &bundle.settings {
                self.save_settings(settings)?;
            }
            Ok(())
        })();

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "import failed");
                false
            }
        }
    }
}
