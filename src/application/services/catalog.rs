//! Catalog service
//!
//! Renders the numbered product listing and the help banner.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::application::ApplicationResult;
use crate::domain::{Catalog, TIERS_PER_PRODUCT};

/// Numbered catalog listing followed by the catalog-wide summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogListing {
    /// `(index, name)` pairs, index is 1-based over the whole catalog
    pub rows: Vec<(usize, String)>,
    pub total: usize,
    pub waves: usize,
    pub skus: usize,
    pub revenue_potential: String,
}

impl fmt::Display for CatalogListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🖤 BlackRoad Enterprise Products 🛣️")?;
        writeln!(f)?;
        for (index, name) in &self.rows {
            writeln!(f, "{index:2}. {name}")?;
        }
        writeln!(f)?;
        writeln!(f, "Total: {} products ({} waves)", self.total, self.waves)?;
        writeln!(f, "Revenue potential: {}", self.revenue_potential)?;
        writeln!(
            f,
            "SKUs: {} ({} products × {} tiers)",
            self.skus, self.total, TIERS_PER_PRODUCT
        )
    }
}

/// Help banner shown for no command or an unrecognized one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpText {
    pub version: String,
    pub products: usize,
    pub waves: usize,
    pub revenue_potential: String,
}

impl fmt::Display for HelpText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🖤 BlackRoad CLI 🛣️")?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f)?;
        writeln!(f, "Commands:")?;
        writeln!(f, "  list              List all products")?;
        writeln!(f, "  deploy <product>  Deploy a product")?;
        writeln!(f, "  status <product>  Check product status")?;
        writeln!(f, "  version           Show CLI version")?;
        writeln!(f)?;
        writeln!(
            f,
            "Products: {} enterprise solutions ({} waves)",
            self.products, self.waves
        )?;
        writeln!(f, "Revenue: {} potential", self.revenue_potential)
    }
}

/// Service for presenting the product catalog.
pub struct CatalogService {
    catalog: Arc<Catalog>,
    revenue_potential: String,
}

impl CatalogService {
    pub fn new(catalog: Arc<Catalog>, revenue_potential: impl Into<String>) -> Self {
        Self {
            catalog,
            revenue_potential: revenue_potential.into(),
        }
    }

    /// Build the listing, optionally restricted to one wave.
    ///
    /// Row indexes stay global when filtering; the summary always covers the whole catalog.
    pub fn listing(&self, wave: Option<u8>) -> ApplicationResult<CatalogListing> {
        if let Some(number) = wave {
            self.catalog.wave(number)?;
        }

        let rows: Vec<(usize, String)> = self
            .catalog
            .entries()
            .into_iter()
            .filter(|entry| wave.map_or(true, |w| entry.wave == w))
            .map(|entry| (entry.index, entry.product.to_string()))
            .collect();
        debug!("listing: wave={:?} rows={}", wave, rows.len());

        Ok(CatalogListing {
            rows,
            total: self.catalog.len(),
            waves: self.catalog.wave_count(),
            skus: self.catalog.sku_count(),
            revenue_potential: self.revenue_potential.clone(),
        })
    }

    pub fn help(&self, version: &str) -> HelpText {
        HelpText {
            version: version.to_string(),
            products: self.catalog.len(),
            waves: self.catalog.wave_count(),
            revenue_potential: self.revenue_potential.clone(),
        }
    }
}
