use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Storage lock poisoned: {0}")]
    Lock(String),

    #[error("A category with this name already exists: {0}")]
    DuplicateCategory(String),

    #[error("A product named {name} already exists in {category}")]
    DuplicateProduct { name: String, category: String },

    #[error("Name must not be empty")]
    EmptyName,

    #[error("Select a category before adding products")]
    NoCategorySelected,

    #[error("No product has a quantity to order")]
    EmptyOrder,

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),
}

pub type AppResult<T> = Result<T, AppError>;
