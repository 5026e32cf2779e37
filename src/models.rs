use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fresh entity id. Random so two entities created in the same
/// millisecond never collide.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Lower-cased, trimmed form used for every case-insensitive name match.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Category {
    pub fn new(name: &str, now: i64) -> Self {
        Category {
            id: new_id(),
            name: name.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Name of the owning category, not its id.
    pub category: String,
    pub box_quantity: u32,
    pub bottle_quantity: u32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Product {
    pub fn new(name: &str, category: &str, now: i64) -> Self {
        Product {
            id: new_id(),
            name: name.trim().to_string(),
            category: category.to_string(),
            box_quantity: 0,
            bottle_quantity: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_quantity(&self) -> bool {
        self.box_quantity > 0 || self.bottle_quantity > 0
    }

    pub fn quantity(&self, kind: QuantityKind) -> u32 {
        match kind {
            QuantityKind::Box => self.box_quantity,
            QuantityKind::Bottle => self.bottle_quantity,
        }
    }

    pub fn set_quantity(&mut self, kind: QuantityKind, value: u32) {
        match kind {
            QuantityKind::Box => self.box_quantity = value,
            QuantityKind::Bottle => self.bottle_quantity = value,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuantityKind {
    Box,
    Bottle,
}

/// Snapshot of a finalized order kept in the order history.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub establishment_name: String,
    pub date: String,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
    pub price: f64,
}

/// Priced order record kept under the `orders` key. Separate from the
/// order history.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Staff,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub dark_mode: bool,
    pub language: String,
    pub currency: String,
    pub notifications: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            dark_mode: false,
            language: "en".to_string(),
            currency: "USD".to_string(),
            notifications: true,
        }
    }
}

/// Export/import bundle. Sections missing on import are left untouched.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct DataBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<Vec<Order>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<AppSettings>,
}
