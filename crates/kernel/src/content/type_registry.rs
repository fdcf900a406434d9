//! Content type registry.
//!
//! Holds content type definitions loaded from a YAML document at startup.
//! Settings are parsed into [`ContentTypeSettings`] once, at load time.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Per-type flags controlling admin UI visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentTypeSettings {
    /// Items of this type can be created from the admin UI.
    pub creatable: bool,
    /// Items of this type appear in admin listings.
    pub listable: bool,
    /// Items of this type honour type-scoped permissions.
    pub securable: bool,
}

/// A content type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentTypeDefinition {
    /// Machine name (e.g. "Page").
    pub name: String,
    /// Human-readable name.
    pub display_name: String,
    /// Typed settings.
    pub settings: ContentTypeSettings,
}

impl ContentTypeDefinition {
    /// Create a definition with default settings.
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            settings: ContentTypeSettings::default(),
        }
    }

    /// Mark the type creatable.
    pub fn creatable(mut self) -> Self {
        self.settings.creatable = true;
        self
    }

    /// Mark the type listable.
    pub fn listable(mut self) -> Self {
        self.settings.listable = true;
        self
    }

    /// Mark the type securable.
    pub fn securable(mut self) -> Self {
        self.settings.securable = true;
        self
    }
}

/// Raw on-disk form; `display_name` falls back to `name`.
#[derive(Debug, Deserialize)]
struct RawDefinition {
    name: String,
    display_name: Option<String>,
    #[serde(default)]
    settings: ContentTypeSettings,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    types: Vec<RawDefinition>,
}

impl From<RawDefinition> for ContentTypeDefinition {
    fn from(raw: RawDefinition) -> Self {
        let display_name = raw.display_name.unwrap_or_else(|| raw.name.clone());
        Self {
            name: raw.name,
            display_name,
            settings: raw.settings,
        }
    }
}

/// Registry of content types.
///
/// Iteration order is registration order.
#[derive(Debug, Clone, Default)]
pub struct ContentTypeRegistry {
    inner: Arc<RwLock<Vec<ContentTypeDefinition>>>,
}

impl ContentTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from a list of definitions.
    pub fn from_definitions(definitions: impl IntoIterator<Item = ContentTypeDefinition>) -> Self {
        let registry = Self::new();
        for def in definitions {
            registry.register(def);
        }
        registry
    }

    /// Parse definitions from a YAML document and register them.
    pub fn load_yaml(&self, yaml: &str) -> Result<usize> {
        let doc: RawDocument =
            serde_yml::from_str(yaml).context("failed to parse content type definitions")?;

        let count = doc.types.len();
        for raw in doc.types {
            self.register(raw.into());
        }

        info!(count, "content types loaded");
        Ok(count)
    }

    /// Load definitions from a YAML file.
    pub fn load_file(&self, path: &Path) -> Result<usize> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        self.load_yaml(&yaml)
    }

    /// Register a definition, replacing any existing one with the same name.
    ///
    /// A replaced definition keeps its position.
    pub fn register(&self, def: ContentTypeDefinition) {
        let mut types = self.inner.write();
        if let Some(existing) = types.iter_mut().find(|t| t.name == def.name) {
            debug!(type_name = %def.name, "replacing content type");
            *existing = def;
        } else {
            debug!(type_name = %def.name, "registered content type");
            types.push(def);
        }
    }

    /// Get a content type by machine name.
    pub fn get(&self, type_name: &str) -> Option<ContentTypeDefinition> {
        self.inner
            .read()
            .iter()
            .find(|t| t.name == type_name)
            .cloned()
    }

    /// List all content types.
    pub fn list(&self) -> Vec<ContentTypeDefinition> {
        self.inner.read().clone()
    }

    /// List content type names.
    pub fn type_names(&self) -> Vec<String> {
        self.inner.read().iter().map(|t| t.name.clone()).collect()
    }

    /// Check if a content type exists.
    pub fn exists(&self, type_name: &str) -> bool {
        self.inner.read().iter().any(|t| t.name == type_name)
    }

    /// Get the number of registered content types.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
