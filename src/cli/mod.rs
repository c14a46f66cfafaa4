//! CLI module for toolmatrix - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for listing the catalog,
//! comparing, exporting, and sharing, plus TUI launch.

pub mod commands;

pub use commands::Cli;
