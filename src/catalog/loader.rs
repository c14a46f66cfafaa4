//! Catalog loading from YAML
//!
//! Loads tool descriptors and feature categories from a YAML document and
//! provides lookup methods. The bundled catalog is compiled into the binary.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;

use crate::error::{MatrixError, Result};

use super::definition::{FeatureCategory, ToolDescriptor, ToolType};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.yml");

/// YAML file structure
#[derive(Debug, Deserialize)]
struct YamlCatalog {
    #[serde(default)]
    categories: Vec<FeatureCategory>,
    #[serde(default)]
    tools: Vec<ToolDescriptor>,
}

/// Immutable catalog of tools and feature categories
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Tools in catalog order
    tools: Vec<ToolDescriptor>,
    /// Tool id -> position in `tools`
    index: HashMap<String, usize>,
    /// Categories in display order
    categories: Vec<FeatureCategory>,
}

impl Catalog {
    /// Load the catalog bundled with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Load catalog from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| MatrixError::Catalog(format!("Failed to read catalog file: {}", e)))?;
        Self::from_yaml(&content)
    }

    /// Load catalog from YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let catalog: YamlCatalog = serde_yaml::from_str(content)?;
        Self::from_parts(catalog.categories, catalog.tools)
    }

    /// Build a catalog from already-parsed parts, validating consistency
    pub fn from_parts(categories: Vec<FeatureCategory>, tools: Vec<ToolDescriptor>) -> Result<Self> {
        let mut category_names = HashSet::new();
        for category in &categories {
            if !category_names.insert(category.name.as_str()) {
                return Err(MatrixError::Catalog(format!("duplicate category '{}'", category.name)));
            }
            if category.applies_to.is_empty() {
                return Err(MatrixError::Catalog(format!(
                    "category '{}' applies to no tool type",
                    category.name
                )));
            }
        }

        let known_features: HashSet<&str> = categories
            .iter()
            .flat_map(|c| c.features.iter().map(|f| f.as_str()))
            .collect();

        let mut index = HashMap::new();
        for (pos, tool) in tools.iter().enumerate() {
            if index.insert(tool.id.clone(), pos).is_some() {
                return Err(MatrixError::Catalog(format!("duplicate tool id '{}'", tool.id)));
            }
            for feature in tool.features.keys() {
                if !known_features.contains(feature.as_str()) {
                    warn!("Tool '{}' lists feature '{}' that no category declares", tool.id, feature);
                }
            }
        }

        debug!("Catalog loaded: {} tools, {} categories", tools.len(), categories.len());
        Ok(Self {
            tools,
            index,
            categories,
        })
    }

    /// Get a tool by id
    pub fn get(&self, id: &str) -> Option<&ToolDescriptor> {
        self.index.get(id).map(|&pos| &self.tools[pos])
    }

    /// Check if a tool exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All tools in catalog order
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// All categories in display order
    pub fn categories(&self) -> &[FeatureCategory] {
        &self.categories
    }

    /// Get tools filtered by type
    pub fn by_type(&self, tool_type: ToolType) -> Vec<&ToolDescriptor> {
        self.tools.iter().filter(|t| t.tool_type == tool_type).collect()
    }

    /// Get number of tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
