//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list: show the catalog
//! - categories: show which feature categories apply to a selection
//! - compare: print the feature matrix
//! - export: write the matrix to a file
//! - share: share a link to the comparison

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use toolmatrix::catalog::ToolType;
use toolmatrix::export::ExportFormat;

/// toolmatrix - compare AI developer tools side by side
#[derive(Parser, Debug)]
#[command(name = "toolmatrix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute (launches the TUI when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Tool selection shared by the comparison subcommands
#[derive(clap::Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Tool ids to compare (at most 4 are kept; earlier ones are dropped)
    pub tools: Vec<String>,

    /// Take the selection from a shared comparison link
    #[arg(short, long)]
    pub link: Option<String>,
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List cataloged tools
    List {
        /// Show only tools of this type
        #[arg(short = 't', long = "type", value_enum)]
        tool_type: Option<TypeArg>,
    },

    /// Show the feature categories relevant to a selection
    Categories {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Print the comparison matrix
    Compare {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Export the comparison matrix to a file
    Export {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Export format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Write to this path instead of the export directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Share a link to the comparison
    Share {
        #[command(flatten)]
        selection: SelectionArgs,
    },
}

/// Tool type filter
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeArg {
    AiModel,
    DevelopmentTool,
}

impl From<TypeArg> for ToolType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::AiModel => ToolType::AiModel,
            TypeArg::DevelopmentTool => ToolType::DevelopmentTool,
        }
    }
}

/// Output format for `compare`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// File format for `export`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_launches_tui() {
        let cli = Cli::try_parse_from(["toolmatrix"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.is_verbose());
    }

    #[test]
    fn test_list_with_type() {
        let cli = Cli::try_parse_from(["toolmatrix", "list", "--type", "ai-model"]).unwrap();
        match cli.command {
            Some(Commands::List { tool_type }) => assert_eq!(tool_type, Some(TypeArg::AiModel)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_compare_defaults_to_table() {
        let cli = Cli::try_parse_from(["toolmatrix", "compare", "cursor", "windsurf"]).unwrap();
        match cli.command {
            Some(Commands::Compare { selection, format }) => {
                assert_eq!(selection.tools, vec!["cursor", "windsurf"]);
                assert!(selection.link.is_none());
                assert_eq!(format, OutputFormat::Table);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_export_with_link_and_output() {
        let cli = Cli::try_parse_from([
            "toolmatrix",
            "-v",
            "export",
            "--link",
            "http://localhost:3000/?tools=a,b",
            "--format",
            "json",
            "--output",
            "out.json",
        ])
        .unwrap();
        assert!(cli.is_verbose());
        match cli.command {
            Some(Commands::Export {
                selection,
                format,
                output,
            }) => {
                assert!(selection.tools.is_empty());
                assert_eq!(selection.link.as_deref(), Some("http://localhost:3000/?tools=a,b"));
                assert_eq!(format.map(ExportFormat::from), Some(ExportFormat::Json));
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_format_rejected() {
        assert!(Cli::try_parse_from(["toolmatrix", "compare", "a", "b", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["toolmatrix", "share", "a", "b", "--config", "/tmp/t.yml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/t.yml")));
    }
}
