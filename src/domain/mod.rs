//! Domain layer: the product catalog
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod catalog;
pub mod error;

pub use catalog::{Catalog, Product, Wave, BUILTIN_WAVES, TIERS_PER_PRODUCT};
pub use error::DomainError;
