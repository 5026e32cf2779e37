pub mod categories;
pub mod orders;
pub mod products;
pub mod settings;
