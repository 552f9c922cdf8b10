//! Application services
//!
//! Concrete service implementations that turn the catalog into command output.
//! Services share the catalog through an `Arc` and hold no mutable state.

mod catalog;
mod deployment;

pub use catalog::{CatalogListing, CatalogService, HelpText};
pub use deployment::{
    DeployReceipt, DeploymentService, StatusReport, STATUS_REVENUE, STATUS_UPTIME, STATUS_USERS,
};
