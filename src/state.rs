//! Application state store.
//!
//! All mutation goes through [`Store::dispatch`]: the action is reduced into
//! the next state by the pure [`reduce`] function, then every storage slice
//! the action touches is written back along with the composite `appState`
//! snapshot.

use serde::{Deserialize, Serialize};

use crate::models::{AppSettings, Category, Order, Product, User};
use crate::storage::{keys, Loaded, Storage};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub users: Vec<User>,
    pub current_user: Option<User>,
    pub settings: AppSettings,
    /// Name of the category new products are added to; empty when none.
    pub selected_category: String,
    pub dark_mode: bool,
    pub favorites: Vec<String>,
}

impl AppState {
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn has_quantities(&self) -> bool {
        self.products.iter().any(Product::has_quantity)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetCategories(Vec<Category>),
    AddCategory(Category),
    UpdateCategory(Category),
    DeleteCategory(String),
    SetProducts(Vec<Product>),
    AddProduct(Product),
    UpdateProduct(Product),
    DeleteProduct(String),
    SetOrders(Vec<Order>),
    AddOrder(Order),
    UpdateOrder(Order),
    SetUsers(Vec<User>),
    SetCurrentUser(Option<User>),
    SetSettings(AppSettings),
    SetSelectedCategory(String),
    ToggleDarkMode,
    SetFavorites(Vec<String>),
    LoadState(Box<AppState>),
    #[serde(other)]
    Unknown,
}

/// Independently persisted piece of [`AppState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Categories,
    Products,
    Orders,
    Users,
    CurrentUser,
    Settings,
    Favorites,
}

impl Slice {
    pub const ALL: [Slice; 7] = [
        Slice::Categories,
        Slice::Products,
        Slice::Orders,
        Slice::Users,
        Slice::CurrentUser,
        Slice::Settings,
        Slice::Favorites,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Slice::Categories => keys::CATEGORIES,
            Slice::Products => keys::PRODUCTS,
            Slice::Orders => keys::ORDERS,
            Slice::Users => keys::USERS,
            Slice::CurrentUser => keys::CURRENT_USER,
            Slice::Settings => keys::SETTINGS,
            Slice::Favorites => keys::FAVORITES,
        }
    }
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetCategories(_) => "SET_CATEGORIES",
            Action::AddCategory(_) => "ADD_CATEGORY",
            Action::UpdateCategory(_) => "UPDATE_CATEGORY",
            Action::DeleteCategory(_) => "DELETE_CATEGORY",
            Action::SetProducts(_) => "SET_PRODUCTS",
            Action::AddProduct(_) => "ADD_PRODUCT",
            Action::UpdateProduct(_) => "UPDATE_PRODUCT",
            Action::DeleteProduct(_) => "DELETE_PRODUCT",
            Action::SetOrders(_) => "SET_ORDERS",
            Action::AddOrder(_) => "ADD_ORDER",
            Action::UpdateOrder(_) => "UPDATE_ORDER",
            Action::SetUsers(_) => "SET_USERS",
            Action::SetCurrentUser(_) => "SET_CURRENT_USER",
            Action::SetSettings(_) => "SET_SETTINGS",
            Action::SetSelectedCategory(_) => "SET_SELECTED_CATEGORY",
            Action::ToggleDarkMode => "TOGGLE_DARK_MODE",
            Action::SetFavorites(_) => "SET_FAVORITES",
            Action::LoadState(_) => "LOAD_STATE",
            Action::Unknown => "UNKNOWN",
        }
    }

    /// Slices whose stored copy must be rewritten after this action.
    pub fn slices(&self) -> &'static [Slice] {
        match self {
            Action::SetCategories(_) | Action::AddCategory(_) | Action::UpdateCategory(_) => {
                &[Slice::Categories]
            }
            Action::DeleteCategory(_) => &[Slice::Categories, Slice::Products],
            Action::SetProducts(_)
            | Action::AddProduct(_)
            | Action::UpdateProduct(_)
            | Action::DeleteProduct(_) => &[Slice::Products],
            Action::SetOrders(_) | Action::AddOrder(_) | Action::UpdateOrder(_) => &[Slice::Orders],
            Action::SetUsers(_) => &[Slice::Users],
            Action::SetCurrentUser(_) => &[Slice::CurrentUser],
            Action::SetSettings(_) | Action::ToggleDarkMode => &[Slice::Settings],
            Action::SetFavorites(_) => &[Slice::Favorites],
            Action::LoadState(_) => &Slice::ALL,
            Action::SetSelectedCategory(_) | Action::Unknown => &[],
        }
    }
}

fn replace_by_id<T: Clone>(items: &[T], replacement: &T, id_of: impl Fn(&T) -> &str) -> Vec<T> {
    let id = id_of(replacement);
    items
        .iter()
        .map(|item| {
            if id_of(item) == id {
                replacement.clone()
            } else {
                item.clone()
            }
        })
        .collect()
}

pub fn reduce(state: &AppState, action: &Action) -> AppState {
    let mut next = state.clone();

    match action {
        Action::SetCategories(categories) => next.categories = categories.clone(),
        Action::AddCategory(category) => next.categories.push(category.clone()),
        Action::UpdateCategory(category) => {
            next.categories = replace_by_id(&state.categories, category, |c| c.id.as_str());
        }
        Action::DeleteCategory(id) => {
            // Unknown id: nothing is removed and the selection stays.
            if let Some(name) = state.category(id).map(|c| c.name.clone()) {
                next.categories.retain(|c| &c.id != id);
                next.products.retain(|p| p.category != name);
                if next.selected_category == name {
                    next.selected_category.clear();
                }
            }
        }
        Action::SetProducts(products) => next.products = products.clone(),
        Action::AddProduct(product) => next.products.push(product.clone()),
        Action::UpdateProduct(product) => {
            next.products = replace_by_id(&state.products, product, |p| p.id.as_str());
        }
        Action::DeleteProduct(id) => next.products.retain(|p| &p.id != id),
        Action::SetOrders(orders) => next.orders = orders.clone(),
        Action::AddOrder(order) => next.orders.push(order.clone()),
        Action::UpdateOrder(order) => {
            next.orders = replace_by_id(&state.orders, order, |o| o.id.as_str());
        }
        Action::SetUsers(users) => next.users = users.clone(),
        Action::SetCurrentUser(user) => next.current_user = user.clone(),
        Action::SetSettings(settings) => next.settings = settings.clone(),
        Action::SetSelectedCategory(name) => next.selected_category = name.clone(),
        Action::ToggleDarkMode => {
            next.dark_mode = !state.dark_mode;
            next.settings.dark_mode = next.dark_mode;
        }
        Action::SetFavorites(favorites) => next.favorites = favorites.clone(),
        Action::LoadState(loaded) => next = loaded.as_ref().clone(),
        Action::Unknown => {}
    }

    next
}

pub struct Store {
    state: AppState,
    storage: Storage,
}

impl Store {
    /// Restores the last `appState` snapshot, or assembles the state from
    /// the individual slice keys when no usable snapshot exists.
    pub fn load(storage: Storage) -> Self {
        let state = match storage.load::<AppState>(keys::APP_STATE) {
            Loaded::Value(state) => state,
            Loaded::Missing => Self::state_from_slices(&storage),
            Loaded::Corrupt => {
                tracing::warn!("app state snapshot unreadable, rebuilding from collections");
                Self::state_from_slices(&storage)
            }
        };

        Store { state, storage }
    }

    fn state_from_slices(storage: &Storage) -> AppState {
        let settings = storage.settings();
        AppState {
            categories: storage.categories(),
            products: storage.products(),
            orders: storage.orders(),
            users: storage.users(),
            current_user: storage.current_user(),
            dark_mode: settings.dark_mode,
            settings,
            selected_category: String::new(),
            favorites: storage.favorites(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = action.name(), "dispatch");

        if matches!(action, Action::Unknown) {
            return;
        }

        self.state = reduce(&self.state, &action);

        for slice in action.slices() {
            self.persist(*slice);
        }
        if let Err(e) = self.storage.set(keys::APP_STATE, &self.state) {
            tracing::error!(error = %e, "failed to persist app state snapshot");
        }
    }

    /// Re-reads every collection from storage, keeping the selected
    /// category if it still names an existing category.
    pub fn reload(&mut self) {
        let mut state = Self::state_from_slices(&self.storage);
        if state
            .categories
            .iter()
            .any(|c| c.name == self.state.selected_category)
        {
            state.selected_category = self.state.selected_category.clone();
        }
        self.dispatch(Action::LoadState(Box::new(state)));
    }

    fn persist(&self, slice: Slice) {
        let state = &self.state;
        let result = match slice {
            Slice::Categories => self.storage.save_categories(&state.categories),
            Slice::Products => self.storage.save_products(&state.products),
            Slice::Orders => self.storage.save_orders(&state.orders),
            Slice::Users => self.storage.save_users(&state.users),
            Slice::CurrentUser => self.storage.set_current_user(state.current_user.as_ref()),
            Slice::Settings => self.storage.save_settings(&state.settings),
            Slice::Favorites => self.storage.save_favorites(&state.favorites),
        };

        if let Err(e) = result {
            tracing::error!(key = slice.key(), error = %e, "failed to persist slice");
        }
    }
}
