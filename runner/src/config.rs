//! Runner configuration
//!
//! Settings come from an optional JSON file; command-line flags override
//! individual fields.
//!
//! ```json
//! {
//!   "display": "basalt",
//!   "resources": "runner/resources",
//!   "artifacts": "target/gfx-failures",
//!   "filter": "shapes::",
//!   "mappings": { "red_square.ppm": 1 }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gfx_types::ScreenSpec;
use serde::Deserialize;

/// Directory holding the bundled reference images.
pub const DEFAULT_RESOURCES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Platform name from the display catalogue
    pub display: String,
    /// Asset directory
    pub resources: PathBuf,
    /// Where failure snapshots go; none saved when unset
    pub artifacts: Option<PathBuf>,
    /// Substring filter on `module::name`
    pub filter: Option<String>,
    /// Asset name → resource id, mapped before the first test runs
    pub mappings: BTreeMap<String, u32>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            display: "basalt".to_owned(),
            resources: PathBuf::from(DEFAULT_RESOURCES),
            artifacts: None,
            filter: None,
            mappings: BTreeMap::new(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub display: Option<String>,
    pub resources: Option<PathBuf>,
    pub artifacts: Option<PathBuf>,
    pub filter: Option<String>,
}

impl RunnerConfig {
    /// Read a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Read `path` if given, otherwise start from defaults, then apply overrides.
    pub fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        if let Some(display) = overrides.display {
            config.display = display;
        }
        if let Some(resources) = overrides.resources {
            config.resources = resources;
        }
        if overrides.artifacts.is_some() {
            config.artifacts = overrides.artifacts;
        }
        if overrides.filter.is_some() {
            config.filter = overrides.filter;
        }
        Ok(config)
    }

    /// The catalogue entry named by `display`.
    pub fn screen(&self) -> Result<&'static ScreenSpec> {
        ScreenSpec::by_name(&self.display).with_context(|| {
            let known: Vec<_> = gfx_types::displays::ALL.iter().map(|s| s.name).collect();
            format!(
                "Unknown display '{}' (known: {})",
                self.display,
                known.join(", ")
            )
        })
    }
}
