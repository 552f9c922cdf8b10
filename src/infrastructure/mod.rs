//! Infrastructure layer: dependency wiring
//!
//! Builds the services the CLI dispatches to.

pub mod di;

pub use di::ServiceContainer;
