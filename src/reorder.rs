//! Re-applies a historical order onto the current product list.
//!
//! Ids are not stable across the history boundary, so snapshot products
//! are joined to current ones on (name, category), both compared trimmed
//! and case-insensitively. Every change is a separate dispatch; there is
//! no rollback if the loop stops part-way.

use std::collections::HashMap;

use crate::clock::Clock;
use crate::models::{new_id, normalize_name, Category, HistoryEntry, Product};
use crate::state::{Action, Store};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReorderSummary {
    pub updated: usize,
    pub created_products: usize,
    pub created_categories: usize,
}

pub fn reorder(store: &mut Store, clock: &dyn Clock, entry: &HistoryEntry) -> ReorderSummary {
    let mut summary = ReorderSummary::default();

    let current: Vec<Product> = store.state().products.clone();
    for product in current {
        let now = clock.now_millis();
        store.dispatch(Action::UpdateProduct(Product {
            box_quantity: 0,
            bottle_quantity: 0,
            updated_at: now,
            ..product
        }));
    }

    let mut categories: HashMap<String, String> = store
        .state()
        .categories
        .iter()
        .map(|c| (normalize_name(&c.name), c.name.clone()))
        .collect();

    for snapshot in &entry.products {
        let name_key = normalize_name(&snapshot.name);
        let category_key = normalize_name(&snapshot.category);
        let now = clock.now_millis();

        let existing = store
            .state()
            .products
            .iter()
            .find(|p| normalize_name(&p.name) == name_key && normalize_name(&p.category) == category_key)
            .cloned();

        if let Some(product) = existing {
            store.dispatch(Action::UpdateProduct(Product {
                box_quantity: snapshot.box_quantity,
                bottle_quantity: snapshot.bottle_quantity,
                updated_at: now,
                ..product
            }));
            summary.updated += 1;
            continue;
        }

        let category_name = match categories.get(&category_key) {
            Some(name) => name.clone(),
            None => {
                let category = Category::new(&snapshot.category, now);
                let name = category.name.clone();
                tracing::info!(category = %name, "reorder created missing category");
                store.dispatch(Action::AddCategory(category));
                categories.insert(category_key, name.clone());
                summary.created_categories += 1;
                name
            }
        };

        store.dispatch(Action::AddProduct(Product {
            id: new_id(),
            category: category_name,
            created_at: now,
            updated_at: now,
            ..snapshot.clone()
        }));
        summary.created_products += 1;
    }

    tracing::info!(
        order = %entry.id,
        updated = summary.updated,
        created_products = summary.created_products,
        created_categories = summary.created_categories,
        "reorder applied"
    );

    summary
}
