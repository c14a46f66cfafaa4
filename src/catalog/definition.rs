//! Tool descriptors and support levels
//!
//! Defines the cataloged products and the per-feature verdicts they carry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Broad kind of a cataloged tool. Drives category applicability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    /// A hosted or open-weights language model
    AiModel,
    /// An editor, plugin, or app builder wrapping one or more models
    DevelopmentTool,
}

impl ToolType {
    /// Every tool type, in display order
    pub const ALL: [ToolType; 2] = [ToolType::AiModel, ToolType::DevelopmentTool];

    /// Parse from string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ai-model" | "ai_model" | "aimodel" | "model" => Some(Self::AiModel),
            "development-tool" | "development_tool" | "developmenttool" | "tool" => Some(Self::DevelopmentTool),
            _ => None,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::AiModel => "AI Model",
            Self::DevelopmentTool => "Development Tool",
        }
    }
}

impl std::fmt::Display for ToolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-feature verdict for one tool.
///
/// In catalog data this is written as `true`, `false`, or a note string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSupport", into = "RawSupport")]
pub enum SupportLevel {
    Full,
    Unsupported,
    /// Limited support, with a note describing the limitation
    Partial(String),
}

/// Wire shape of a support level: a bare boolean or a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawSupport {
    Flag(bool),
    Note(String),
}

impl From<RawSupport> for SupportLevel {
    fn from(raw: RawSupport) -> Self {
        match raw {
            RawSupport::Flag(true) => SupportLevel::Full,
            RawSupport::Flag(false) => SupportLevel::Unsupported,
            RawSupport::Note(note) => SupportLevel::Partial(note),
        }
    }
}

impl From<SupportLevel> for RawSupport {
    fn from(level: SupportLevel) -> Self {
        match level {
            SupportLevel::Full => RawSupport::Flag(true),
            SupportLevel::Unsupported => RawSupport::Flag(false),
            SupportLevel::Partial(note) => RawSupport::Note(note),
        }
    }
}

/// A cataloged product entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique key (e.g., "cursor", "claude-sonnet")
    pub id: String,
    /// Display name
    pub name: String,
    #[serde(rename = "type")]
    pub tool_type: ToolType,
    /// Free-form subtitle shown under the name (e.g., "AI-Native IDE")
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub pricing: Option<String>,
    #[serde(default)]
    pub benchmark: Option<String>,
    #[serde(default)]
    pub context_window: Option<String>,
    /// Feature name -> verdict. A missing key means not applicable.
    #[serde(default)]
    pub features: HashMap<String, SupportLevel>,
}

impl ToolDescriptor {
    /// Create a new descriptor with no features
    pub fn new(id: impl Into<String>, name: impl Into<String>, tool_type: ToolType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tool_type,
            category: String::new(),
            description: String::new(),
            pricing: None,
            benchmark: None,
            context_window: None,
            features: HashMap::new(),
        }
    }

    /// Set the display category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the pricing label
    pub fn with_pricing(mut self, pricing: impl Into<String>) -> Self {
        self.pricing = Some(pricing.into());
        self
    }

    /// Record a feature verdict
    pub fn with_feature(mut self, feature: impl Into<String>, level: SupportLevel) -> Self {
        self.features.insert(feature.into(), level);
        self
    }

    /// Look up a feature verdict
    pub fn support(&self, feature: &str) -> Option<&SupportLevel> {
        self.features.get(feature)
    }
}

/// A named grouping of related feature checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCategory {
    pub name: String,
    /// Tool types this category is meaningful for
    #[serde(default = "all_tool_types")]
    pub applies_to: Vec<ToolType>,
    pub features: Vec<String>,
}

fn all_tool_types() -> Vec<ToolType> {
    ToolType::ALL.to_vec()
}

impl FeatureCategory {
    /// Create a category applying to every tool type
    pub fn new(name: impl Into<String>, features: &[&str]) -> Self {
        Self {
            name: name.into(),
            applies_to: all_tool_types(),
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Restrict the category to the given tool types
    pub fn for_types(mut self, types: &[ToolType]) -> Self {
        self.applies_to = types.to_vec();
        self
    }

    /// Whether the category applies to a tool of this type
    pub fn applies_to(&self, tool_type: ToolType) -> bool {
        self.applies_to.contains(&tool_type)
    }
}
