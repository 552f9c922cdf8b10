//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::{CatalogService, DeploymentService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::Catalog;

/// Container holding the settings and the catalog shared by all services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Product catalog built from the settings
    pub catalog: Arc<Catalog>,

    strict: bool,
}

impl ServiceContainer {
    /// Create a new service container, building the catalog from `settings`.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        let catalog = settings.catalog()?;
        Ok(Self::with_deps(settings, catalog))
    }

    /// Create a service container with an explicit catalog (for testing).
    pub fn with_deps(settings: Settings, catalog: Catalog) -> Self {
        debug!(
            "container: products={} waves={} strict={}",
            catalog.len(),
            catalog.wave_count(),
            settings.strict
        );
        let strict = settings.strict;
        Self {
            settings: Arc::new(settings),
            catalog: Arc::new(catalog),
            strict,
        }
    }

    /// Force strict product validation on; a configured `strict = true` cannot be turned off here.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict |= strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn catalog_service(&self) -> CatalogService {
        CatalogService::new(
            Arc::clone(&self.catalog),
            self.settings.revenue_potential.clone(),
        )
    }

    pub fn deployment_service(&self) -> DeploymentService {
        DeploymentService::new(
            Arc::clone(&self.catalog),
            self.settings.dashboard_url.clone(),
            self.strict,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_building_then_builtin_catalog() {
        let container = ServiceContainer::new(Settings::default()).unwrap();
        assert_eq!(container.catalog.len(), 50);
        assert!(!container.is_strict());
    }

    #[test]
    fn given_cli_strict_flag_when_settings_lenient_then_strict() {
        let container = ServiceContainer::new(Settings::default())
            .unwrap()
            .with_strict(true);
        assert!(container.is_strict());
        assert!(container.deployment_service().is_strict());
    }

    #[test]
    fn given_strict_settings_when_flag_absent_then_still_strict() {
        let settings = Settings {
            strict: true,
            ..Settings::default()
        };
        let container = ServiceContainer::new(settings).unwrap().with_strict(false);
        assert!(container.is_strict());
    }

    #[test]
    fn given_invalid_extra_product_when_building_then_errors() {
        let mut settings = Settings::default();
        settings.catalog.extra_products = vec!["Bad Name".to_string()];
        assert!(ServiceContainer::new(settings).is_err());
    }
}
