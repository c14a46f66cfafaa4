//! Tool catalog - descriptors, support levels, and feature categories

mod definition;
mod loader;

pub use definition::{FeatureCategory, SupportLevel, ToolDescriptor, ToolType};
pub use loader::Catalog;
