//! Category resolution for a selection.
//!
//! A category is relevant when its `applies_to` table contains the type of at
//! least one selected tool. Catalog order is preserved.

use crate::catalog::{Catalog, FeatureCategory, ToolDescriptor};

/// Categories relevant to the given tools, in catalog order
pub fn resolve_categories<'a>(catalog: &'a Catalog, tools: &[&ToolDescriptor]) -> Vec<&'a FeatureCategory> {
    catalog
        .categories()
        .iter()
        .filter(|category| tools.iter().any(|tool| category.applies_to(tool.tool_type)))
        .collect()
}

/// Total number of feature rows across the given categories
pub fn feature_count(categories: &[&FeatureCategory]) -> usize {
    categories.iter().map(|c| c.features.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ToolType;

    fn catalog() -> Catalog {
        Catalog::from_parts(
            vec![
                FeatureCategory::new("Code Generation", &["Autocomplete", "Refactoring"]),
                FeatureCategory::new("AI Model Capabilities", &["Open Weights"]).for_types(&[ToolType::AiModel]),
                FeatureCategory::new("IDE Integration", &["VS Code Support", "Git Integration", "Terminal"])
                    .for_types(&[ToolType::DevelopmentTool]),
            ],
            vec![
                ToolDescriptor::new("model", "Model", ToolType::AiModel),
                ToolDescriptor::new("editor", "Editor", ToolType::DevelopmentTool),
            ],
        )
        .unwrap()
    }

    fn names(categories: &[&FeatureCategory]) -> Vec<String> {
        categories.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_model_only_selection() {
        let catalog = catalog();
        let tools = vec![catalog.get("model").unwrap()];
        let resolved = resolve_categories(&catalog, &tools);
        assert_eq!(names(&resolved), vec!["Code Generation", "AI Model Capabilities"]);
    }

    #[test]
    fn test_tool_only_selection() {
        let catalog = catalog();
        let tools = vec![catalog.get("editor").unwrap()];
        let resolved = resolve_categories(&catalog, &tools);
        assert_eq!(names(&resolved), vec!["Code Generation", "IDE Integration"]);
    }

    #[test]
    fn test_mixed_selection_keeps_catalog_order() {
        let catalog = catalog();
        let tools = vec![catalog.get("editor").unwrap(), catalog.get("model").unwrap()];
        let resolved = resolve_categories(&catalog, &tools);
        assert_eq!(
            names(&resolved),
            vec!["Code Generation", "AI Model Capabilities", "IDE Integration"]
        );
        assert_eq!(feature_count(&resolved), 6);
    }

    #[test]
    fn test_empty_selection_has_no_categories() {
        let catalog = catalog();
        assert!(resolve_categories(&catalog, &[]).is_empty());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let catalog = catalog();
        let tools = vec![catalog.get("model").unwrap(), catalog.get("editor").unwrap()];
        assert_eq!(
            names(&resolve_categories(&catalog, &tools)),
            names(&resolve_categories(&catalog, &tools))
        );
    }
}
