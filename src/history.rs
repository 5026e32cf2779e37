//! Bounded history of finalized orders plus the running order counter.

use std::sync::Arc;

use crate::clock::Clock;
use crate::error::AppResult;
use crate::models::{new_id, HistoryEntry, Product};
use crate::storage::{Loaded, Storage};

pub const MAX_HISTORY: usize = 10;
pub const FIRST_ORDER_NUMBER: u32 = 1;

/// Fields to overwrite on a history entry; `None` leaves the field as is.
#[derive(Debug, Default, Clone)]
pub struct HistoryUpdate {
    pub establishment_name: Option<String>,
    pub date: Option<String>,
    pub products: Option<Vec<Product>>,
}

pub struct OrderHistory {
    entries: Vec<HistoryEntry>,
    order_number: u32,
    storage: Storage,
    clock: Arc<dyn Clock>,
}

impl OrderHistory {
    pub fn load(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        let (entries, order_number) = match storage.order_history() {
            Loaded::Value(entries) => (
                entries,
                storage.order_number().unwrap_or(FIRST_ORDER_NUMBER),
            ),
            Loaded::Missing => (
                Vec::new(),
                storage.order_number().unwrap_or(FIRST_ORDER_NUMBER),
            ),
            Loaded::Corrupt => {
                tracing::warn!("order history unreadable, starting a fresh history");
                (Vec::new(), FIRST_ORDER_NUMBER)
            }
        };

        OrderHistory {
            entries,
            order_number,
            storage,
            clock,
        }
    }

    /// Newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Number the next finalized order will carry.
    pub fn order_number(&self) -> u32 {
        self.order_number
    }

    /// Records a finalized order and advances the counter. Only products
    /// with a box or bottle quantity are kept.
    pub fn add_order(&mut self, establishment_name: &str, products: &[Product]) -> AppResult<HistoryEntry> {
        let entry = HistoryEntry {
            id: new_id(),
            establishment_name: establishment_name.to_string(),
            date: self.clock.today().format("%Y-%m-%d").to_string(),
            products: products
                .iter()
                .filter(|p| p.has_quantity())
                .cloned()
                .collect(),
        };

        let mut entries = Vec::with_capacity(MAX_HISTORY);
        entries.push(entry.clone());
        entries.extend(self.entries.iter().take(MAX_HISTORY - 1).cloned());
        let order_number = self.order_number + 1;

        self.storage.save_order_history(&entries)?;
        if let Err(e) = self.storage.save_order_number(order_number) {
            // Stored history must not run ahead of the counter.
            if let Err(restore) = self.storage.save_order_history(&self.entries) {
                tracing::error!(error = %restore, "failed to restore order history");
            }
            return Err(e);
        }

        self.entries = entries;
        self.order_number = order_number;

        tracing::info!(
            id = %entry.id,
            establishment = %entry.establishment_name,
            products = entry.products.len(),
            next_order_number = self.order_number,
            "order recorded"
        );

        Ok(entry)
    }

    /// Returns whether an entry was removed. The counter is untouched.
    pub fn delete_order(&mut self, id: &str) -> AppResult<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);

        if self.entries.len() == before {
            return Ok(false);
        }

        self.storage.save_order_history(&self.entries)?;
        Ok(true)
    }

    pub fn update_order(&mut self, id: &str, update: HistoryUpdate) -> AppResult<Option<HistoryEntry>> {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };

        if let Some(name) = update.establishment_name {
            entry.establishment_name = name;
        }
        if let Some(date) = update.date {
            entry.date = date;
        }
        if let Some(products) = update.products {
            entry.products = products;
        }
        let updated = entry.clone();

        self.storage.save_order_history(&self.entries)?;
        Ok(Some(updated))
    }
}
