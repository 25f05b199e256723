//! Startup catalog: `[[components]]` and `[[monitors]]` tables.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use beacon_core::models::{ComponentSpec, MonitorSpec};
use beacon_engine::Catalog;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub components: Vec<ComponentSpec>,
    pub monitors: Vec<MonitorSpec>,
}

impl CatalogFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("parsing catalog {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Create every component, then every monitor. Components go first so
    /// monitors can reference them by id.
    pub fn install(&self, catalog: &Catalog) -> anyhow::Result<(usize, usize)> {
        for spec in &self.components {
            catalog
                .create_component(spec.clone())
                .with_context(|| format!("component '{}'", spec.name))?;
        }
        for spec in &self.monitors {
            catalog
                .create_monitor(spec.clone())
                .with_context(|| format!("monitor {}", spec.url))?;
        }
        tracing::info!(
            components = self.components.len(),
            monitors = self.monitors.len(),
            "catalog installed"
        );
        Ok((self.components.len(), self.monitors.len()))
    }
}
