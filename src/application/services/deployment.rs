//! Deployment service
//!
//! Produces the deploy confirmation and status blocks. Nothing is deployed and no
//! state is read: the text is fixed apart from the product name.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::application::ApplicationResult;
use crate::domain::Catalog;

/// Fixed figures reported by `status`.
pub const STATUS_USERS: u32 = 127;
pub const STATUS_UPTIME: &str = "99.9%";
pub const STATUS_REVENUE: &str = "$58K/month";

/// Three-line deploy confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReceipt {
    pub product: String,
    pub dashboard_url: String,
}

impl fmt::Display for DeployReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🚀 Deploying {}...", self.product)?;
        writeln!(f, "✅ Deployment initiated!")?;
        writeln!(f, "📊 Dashboard: {}", self.dashboard_url)
    }
}

/// Status block; only the product name varies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub product: String,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📊 Status for {}:", self.product)?;
        writeln!(f, "✅ Running")?;
        writeln!(f, "Users: {STATUS_USERS}")?;
        writeln!(f, "Uptime: {STATUS_UPTIME}")?;
        writeln!(f, "Revenue: {STATUS_REVENUE}")
    }
}

/// Service for the `deploy` and `status` commands.
pub struct DeploymentService {
    catalog: Arc<Catalog>,
    dashboard_url: String,
    strict: bool,
}

impl DeploymentService {
    /// Create a new deployment service.
    ///
    /// With `strict` set, product names must exist in the catalog.
    pub fn new(catalog: Arc<Catalog>, dashboard_url: impl Into<String>, strict: bool) -> Self {
        Self {
            catalog,
            dashboard_url: dashboard_url.into(),
            strict,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn deploy(&self, product: &str) -> ApplicationResult<DeployReceipt> {
        self.check(product)?;
        debug!("deploy: product={}", product);
        Ok(DeployReceipt {
            product: product.to_string(),
            dashboard_url: format!("{}/{}", self.dashboard_url, product),
        })
    }

    /// Deploy receipts for every catalog product, in catalog order.
    pub fn deploy_all(&self) -> Vec<DeployReceipt> {
        self.catalog
            .products()
            .map(|p| DeployReceipt {
                product: p.to_string(),
                dashboard_url: format!("{}/{}", self.dashboard_url, p),
            })
            .collect()
    }

    pub fn status(&self, product: &str) -> ApplicationResult<StatusReport> {
        self.check(product)?;
        debug!("status: product={}", product);
        Ok(StatusReport {
            product: product.to_string(),
        })
    }

    fn check(&self, product: &str) -> ApplicationResult<()> {
        if self.strict {
            self.catalog.resolve(product)?;
        }
        Ok(())
    }
}
