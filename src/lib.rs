//! toolmatrix - side-by-side comparison of AI developer tools
//!
//! Pick up to four tools from a static catalog, resolve which feature
//! categories matter for them, and render, export, or share the resulting
//! support matrix.

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod matrix;
pub mod resolver;
pub mod selection;
pub mod share;
pub mod tui;

pub use error::{MatrixError, Result};
