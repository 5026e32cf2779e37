use crate::desk::Desk;
use crate::error::{AppError, AppResult};
use crate::models::{normalize_name, Category, Product};
use crate::prompt::Prompter;
use crate::state::Action;

pub fn get_categories(desk: &Desk) -> Vec<Category> {
    desk.store.state().categories.clone()
}

fn ensure_unique(desk: &Desk, name: &str, except_id: Option<&str>) -> AppResult<()> {
    let key = normalize_name(name);
    let taken = desk
        .store
        .state()
        .categories
        .iter()
        .any(|c| Some(c.id.as_str()) != except_id && normalize_name(&c.name) == key);

    if taken {
        return Err(AppError::DuplicateCategory(name.trim().to_string()));
    }
    Ok(())
}

pub fn create_category(desk: &mut Desk, name: &str) -> AppResult<Category> {
    if name.trim().is_empty() {
        return Err(AppError::EmptyName);
    }
    ensure_unique(desk, name, None)?;

    let category = Category::new(name, desk.now_millis());
    desk.store.dispatch(Action::AddCategory(category.clone()));

    tracing::info!(id = %category.id, name = %category.name, "category created");
    Ok(category)
}

/// Renames a category and moves its products along with it, so products
/// keep pointing at an existing category name.
pub fn rename_category(desk: &mut Desk, id: &str, name: &str) -> AppResult<Category> {
    if name.trim().is_empty() {
        return Err(AppError::EmptyName);
    }

    let existing = desk
        .store
        .state()
        .category(id)
        .cloned()
        .ok_or_else(|| AppError::CategoryNotFound(id.to_string()))?;
    ensure_unique(desk, name, Some(id))?;

    let now = desk.now_millis();
    let renamed = Category {
        name: name.trim().to_string(),
        updated_at: now,
        ..existing.clone()
    };
    desk.store.dispatch(Action::UpdateCategory(renamed.clone()));

    let moved: Vec<Product> = desk
        .store
        .state()
        .products
        .iter()
        .filter(|p| p.category == existing.name)
        .cloned()
        .collect();
    for product in moved {
        desk.store.dispatch(Action::UpdateProduct(Product {
            category: renamed.name.clone(),
            updated_at: now,
            ..product
        }));
    }

    if desk.store.state().selected_category == existing.name {
        desk.store
            .dispatch(Action::SetSelectedCategory(renamed.name.clone()));
    }

    Ok(renamed)
}

/// Returns `false` when the user declines. Products of the category are
/// deleted with it.
pub fn delete_category(desk: &mut Desk, prompter: &mut dyn Prompter, id: &str) -> AppResult<bool> {
    let category = desk
        .store
        .state()
        .category(id)
        .cloned()
        .ok_or_else(|| AppError::CategoryNotFound(id.to_string()))?;

    if !prompter.confirm(&format!(
        "Delete category {}? All products in this category will also be deleted.",
        category.name
    )) {
        return Ok(false);
    }

    desk.store.dispatch(Action::DeleteCategory(category.id.clone()));

    tracing::info!(id = %category.id, name = %category.name, "category deleted");
    Ok(true)
}

pub fn select_category(desk: &mut Desk, name: &str) -> AppResult<Category> {
    let key = normalize_name(name);
    let category = desk
        .store
        .state()
        .categories
        .iter()
        .find(|c| normalize_name(&c.name) == key)
        .cloned()
        .ok_or_else(|| AppError::CategoryNotFound(name.to_string()))?;

    desk.store
        .dispatch(Action::SetSelectedCategory(category.name.clone()));
    Ok(category)
}
