//! Product catalog: the ordered, wave-grouped list of product identifiers

use std::fmt;

use itertools::Itertools;

use crate::domain::DomainError;

/// Every product is sold in this many tiers.
pub const TIERS_PER_PRODUCT: usize = 3;

/// Label used for the wave that holds configured extra products.
pub const EXTRA_WAVE_NAME: &str = "Extras";

/// Compiled-in wave definition.
#[derive(Debug, Clone, Copy)]
pub struct WaveDef {
    pub number: u8,
    pub name: &'static str,
    pub products: &'static [&'static str],
}

pub const BUILTIN_WAVES: &[WaveDef] = &[
    WaveDef {
        number: 1,
        name: "Foundation",
        products: &[
            "vllm", "ollama", "localai", "headscale", "minio", "netbird", "restic", "authelia",
            "espocrm", "focalboard", "whisper",
        ],
    },
    WaveDef {
        number: 2,
        name: "Expansion",
        products: &[
            "clickhouse", "synapse", "taiga", "dendrite", "suitecrm", "arangodb", "borg",
            "innernet", "tts", "vosk",
        ],
    },
    WaveDef {
        number: 3,
        name: "Acceleration",
        products: &[
            "mattermost", "gitlab", "nextcloud", "keycloak", "grafana", "prometheus", "vault",
            "rabbitmq", "redis", "postgresql",
        ],
    },
    WaveDef {
        number: 4,
        name: "DevOps",
        products: &[
            "ansible", "jenkins", "harbor", "consul", "etcd", "traefik", "nginx", "caddy",
            "haproxy",
        ],
    },
    WaveDef {
        number: 5,
        name: "Observability & GitOps",
        products: &[
            "opensearch", "loki", "victoriametrics", "cortex", "thanos", "rook", "longhorn",
            "velero", "argocd", "flux",
        ],
    },
];

/// A product identifier.
///
/// Lowercase ASCII letters, digits, `-`, `_` and `.`; must start with a letter or digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Product(String);

impl Product {
    pub fn new(name: &str) -> Result<Self, DomainError> {
        if is_valid_identifier(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(DomainError::InvalidProduct(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() || first.is_ascii_digit() => chars
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.')),
        _ => false,
    }
}

/// A numbered batch of products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wave {
    pub number: u8,
    pub name: String,
    pub products: Vec<Product>,
}

/// A product together with its 1-based position in the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry<'a> {
    pub index: usize,
    pub wave: u8,
    pub product: &'a Product,
}

/// Ordered, non-empty product catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    waves: Vec<Wave>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The compiled-in catalog.
    pub fn builtin() -> Self {
        let waves = BUILTIN_WAVES
            .iter()
            .map(|def| Wave {
                number: def.number,
                name: def.name.to_string(),
                products: def
                    .products
                    .iter()
                    .map(|p| Product((*p).to_string()))
                    .collect(),
            })
            .collect();
        Self { waves }
    }

    /// Build a catalog from explicit waves.
    ///
    /// Duplicate products are dropped (first occurrence wins), waves left empty are
    /// removed, and an empty result is rejected.
    pub fn from_waves(waves: Vec<Wave>) -> Result<Self, DomainError> {
        let mut seen = std::collections::HashSet::new();
        let waves: Vec<Wave> = waves
            .into_iter()
            .map(|mut wave| {
                wave.products.retain(|p| seen.insert(p.clone()));
                wave
            })
            .filter(|wave| !wave.products.is_empty())
            .collect();

        if waves.is_empty() {
            return Err(DomainError::EmptyCatalog);
        }
        Ok(Self { waves })
    }

    /// Apply configured overrides on top of the compiled-in catalog.
    ///
    /// - `name` appends the product to an extra wave after the last built-in wave
    /// - `!name` removes the product wherever it appears
    pub fn with_overrides(overrides: &[String]) -> Result<Self, DomainError> {
        let (removals, additions): (Vec<&str>, Vec<&str>) = overrides
            .iter()
            .map(String::as_str)
            .partition(|entry| entry.starts_with('!'));
        let removals: Vec<&str> = removals
            .into_iter()
            .map(|entry| entry.trim_start_matches('!'))
            .collect();

        let mut waves = Self::builtin().waves;
        let next_number = waves
            .iter()
            .map(|w| w.number)
            .max()
            .unwrap_or(0)
            .saturating_add(1);

        let extras = additions
            .into_iter()
            .map(Product::new)
            .collect::<Result<Vec<_>, _>>()?;
        if !extras.is_empty() {
            waves.push(Wave {
                number: next_number,
                name: EXTRA_WAVE_NAME.to_string(),
                products: extras,
            });
        }

        for wave in &mut waves {
            wave.products.retain(|p| !removals.contains(&p.as_str()));
        }

        Self::from_waves(waves)
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    pub fn len(&self) -> usize {
        self.waves.iter().map(|w| w.products.len()).sum()
    }

    /// Always false: construction rejects empty catalogs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of sellable SKUs (products times tiers).
    pub fn sku_count(&self) -> usize {
        self.len().saturating_mul(TIERS_PER_PRODUCT)
    }

    /// All products in catalog order with their 1-based index.
    pub fn entries(&self) -> Vec<CatalogEntry<'_>> {
        self.waves
            .iter()
            .flat_map(|wave| wave.products.iter().map(move |p| (wave.number, p)))
            .enumerate()
            .map(|(i, (wave, product))| CatalogEntry {
                index: i + 1,
                wave,
                product,
            })
            .collect()
    }

    pub fn wave(&self, number: u8) -> Result<&Wave, DomainError> {
        self.waves
            .iter()
            .find(|w| w.number == number)
            .ok_or(DomainError::UnknownWave(number))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.products().any(|p| p.as_str() == name)
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.waves.iter().flat_map(|w| w.products.iter())
    }

    /// Look up a product by name, suggesting the closest match on failure.
    pub fn resolve(&self, name: &str) -> Result<&Product, DomainError> {
        self.products()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| DomainError::UnknownProduct {
                product: name.to_string(),
                suggestion: self.suggest(name).map(|p| p.to_string()),
            })
    }

    /// Closest product by shared prefix; at least two leading characters must match.
    fn suggest(&self, name: &str) -> Option<&Product> {
        let needle = name.to_ascii_lowercase();
        self.products()
            .map(|p| (shared_prefix_len(p.as_str(), &needle), p))
            .filter(|(shared, _)| *shared >= 2)
            .max_set_by_key(|(shared, _)| *shared)
            .into_iter()
            .next()
            .map(|(_, p)| p)
    }
}

fn shared_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}
