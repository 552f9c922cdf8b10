//! Application layer: services and use cases
//!
//! This layer turns the domain catalog into the text each command prints.

pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
