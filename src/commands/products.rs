use crate::desk::Desk;
use crate::error::{AppError, AppResult};
use crate::models::{normalize_name, Product, QuantityKind};
use crate::prompt::Prompter;
use crate::state::Action;

pub fn get_products(desk: &Desk) -> Vec<Product> {
    desk.store.state().products.clone()
}

/// Case-insensitive substring match on product name or category.
pub fn search_products(desk: &Desk, query: &str) -> Vec<Product> {
    let query = query.to_lowercase();
    desk.store
        .state()
        .products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&query) || p.category.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Adds a product to the selected category.
pub fn create_product(desk: &mut Desk, name: &str) -> AppResult<Product> {
    if name.trim().is_empty() {
        return Err(AppError::EmptyName);
    }

    let category = desk.store.state().selected_category.clone();
    if category.is_empty() {
        return Err(AppError::NoCategorySelected);
    }
    ensure_unique(desk, name, &category, None)?;

    let product = Product::new(name, &category, desk.now_millis());
    desk.store.dispatch(Action::AddProduct(product.clone()));

    tracing::info!(id = %product.id, name = %product.name, category = %product.category, "product created");
    Ok(product)
}

fn ensure_unique(desk: &Desk, name: &str, category: &str, except_id: Option<&str>) -> AppResult<()> {
    let name_key = normalize_name(name);
    let category_key = normalize_name(category);

    let taken = desk.store.state().products.iter().any(|p| {
        Some(p.id.as_str()) != except_id
            && normalize_name(&p.name) == name_key
            && normalize_name(&p.category) == category_key
    });

    if taken {
        return Err(AppError::DuplicateProduct {
            name: name.trim().to_string(),
            category: category.to_string(),
        });
    }
    Ok(())
}

fn find(desk: &Desk, id: &str) -> AppResult<Product> {
    desk.store
        .state()
        .product(id)
        .cloned()
        .ok_or_else(|| AppError::ProductNotFound(id.to_string()))
}

pub fn rename_product(desk: &mut Desk, id: &str, name: &str) -> AppResult<Product> {
    if name.trim().is_empty() {
        return Err(AppError::EmptyName);
    }

    let product = find(desk, id)?;
    ensure_unique(desk, name, &product.category, Some(id))?;

    let renamed = Product {
        name: name.trim().to_string(),
        updated_at: desk.now_millis(),
        ..product
    };
    desk.store.dispatch(Action::UpdateProduct(renamed.clone()));

    Ok(renamed)
}

/// Applies `delta` to one quantity, never going below zero.
pub fn adjust_quantity(desk: &mut Desk, id: &str, kind: QuantityKind, delta: i64) -> AppResult<Product> {
    let mut product = find(desk, id)?;

    let current = i64::from(product.quantity(kind));
    let next = current.saturating_add(delta).clamp(0, i64::from(u32::MAX));
    product.set_quantity(kind, next as u32);
    product.updated_at = desk.now_millis();

    desk.store.dispatch(Action::UpdateProduct(product.clone()));
    Ok(product)
}

pub fn delete_product(desk: &mut Desk, prompter: &mut dyn Prompter, id: &str) -> AppResult<bool> {
    let product = find(desk, id)?;

    if !prompter.confirm(&format!("Delete product {}?", product.name)) {
        return Ok(false);
    }

    desk.store.dispatch(Action::DeleteProduct(product.id.clone()));

    tracing::info!(id = %product.id, name = %product.name, "product deleted");
    Ok(true)
}

/// Sets every box and bottle quantity back to zero.
pub fn reset_quantities(desk: &mut Desk, prompter: &mut dyn Prompter) -> bool {
    if !prompter.confirm("Reset all quantities to zero?") {
        return false;
    }

    let products = get_products(desk);
    for product in products {
        let now = desk.now_millis();
        desk.store.dispatch(Action::UpdateProduct(Product {
            box_quantity: 0,
            bottle_quantity: 0,
            updated_at: now,
            ..product
        }));
    }

    tracing::info!("quantities reset");
    true
}

/// Deletes every product, then every category.
pub fn delete_everything(desk: &mut Desk, prompter: &mut dyn Prompter) -> bool {
    if !prompter.confirm("Delete all categories and products? This cannot be undone.") {
        return false;
    }

    let product_ids: Vec<String> = desk.store.state().products.iter().map(|p| p.id.clone()).collect();
    for id in product_ids {
        desk.store.dispatch(Action::DeleteProduct(id));
    }

    let category_ids: Vec<String> = desk.store.state().categories.iter().map(|c| c.id.clone()).collect();
    for id in category_ids {
        desk.store.dispatch(Action::DeleteCategory(id));
    }

    tracing::info!("all categories and products deleted");
    true
}

/// Flips `id` in the favorites list. Product and order ids share the
/// list. Returns whether `id` is now a favorite.
pub fn toggle_favorite(desk: &mut Desk, id: &str) -> bool {
    let mut favorites = desk.store.state().favorites.clone();

    let now_favorite = if let Some(pos) = favorites.iter().position(|f| f == id) {
        favorites.remove(pos);
        false
    } else {
        favorites.push(id.to_string());
        true
    };

    desk.store.dispatch(Action::SetFavorites(favorites));
    now_favorite
}
