use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info, warn};
use std::fs;
use std::path::PathBuf;

mod cli;

use cli::Cli;
use cli::commands::{Commands, OutputFormat, SelectionArgs, TypeArg};
use toolmatrix::catalog::{Catalog, ToolType};
use toolmatrix::config::Config;
use toolmatrix::export::{self, Download, ExportFormat, FileDownload};
use toolmatrix::matrix::ComparisonMatrix;
use toolmatrix::resolver::{feature_count, resolve_categories};
use toolmatrix::selection::Selection;
use toolmatrix::share::{SharePayload, ShareTarget, parse_share_url, share_best_effort};
use toolmatrix::tui::{App, TuiRunner, init_terminal, restore_terminal};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolmatrix")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolmatrix.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // Without RUST_LOG everything is let through until the config level is applied
    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(LevelFilter::Trace);
    }
    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let catalog = config.load_catalog()?;

    match &cli.command {
        None => {
            // Default: launch TUI mode
            run_tui(catalog, Selection::new(), config)
        }
        Some(Commands::List { tool_type }) => handle_list_command(&catalog, *tool_type),
        Some(Commands::Categories { selection }) => handle_categories_command(&catalog, selection),
        Some(Commands::Compare { selection, format }) => handle_compare_command(&catalog, selection, *format),
        Some(Commands::Export {
            selection,
            format,
            output,
        }) => {
            let format = format.map(ExportFormat::from).unwrap_or(config.export.format);
            handle_export_command(&catalog, selection, format, output.as_ref(), config)
        }
        Some(Commands::Share { selection }) => handle_share_command(&catalog, selection, config),
    }
}

/// Build the selection from positional ids, then any ids carried by `--link`
fn build_selection(args: &SelectionArgs) -> Result<Selection> {
    let mut ids = args.tools.clone();
    if let Some(link) = &args.link {
        let linked = parse_share_url(link).context(format!("Invalid share link: {}", link))?;
        if linked.is_empty() {
            warn!("Link carries no tools: {}", link);
        }
        ids.extend(linked);
    }

    let mut selection = Selection::new();
    for id in ids {
        if let Some(evicted) = selection.insert(id.clone()) {
            warn!("Selection full, dropped {} for {}", evicted, id);
            eprintln!("{} dropped {} to make room for {}", "Note:".yellow(), evicted, id);
        }
    }
    Ok(selection)
}

fn build_matrix(catalog: &Catalog, args: &SelectionArgs) -> Result<ComparisonMatrix> {
    let selection = build_selection(args)?;
    let tools = selection.resolve_for_compare(catalog)?;
    Ok(ComparisonMatrix::build(catalog, &tools))
}

fn run_tui(catalog: Catalog, selection: Selection, config: &Config) -> Result<()> {
    info!("Launching TUI mode");

    let terminal = init_terminal().context("Failed to initialize terminal")?;
    let app = App::with_selection(catalog, selection);
    let mut runner = TuiRunner::new(terminal, app, config.clone());

    let result = runner.run();
    restore_terminal().context("Failed to restore terminal")?;
    result
}

fn handle_list_command(catalog: &Catalog, tool_type: Option<TypeArg>) -> Result<()> {
    info!("Listing tools - type: {:?}", tool_type);

    let types: Vec<ToolType> = match tool_type {
        Some(t) => vec![t.into()],
        None => ToolType::ALL.to_vec(),
    };

    for tool_type in types {
        let tools = catalog.by_type(tool_type);
        if tools.is_empty() {
            continue;
        }
        println!("{}", tool_type.label().cyan().bold());
        for tool in tools {
            println!("  {:<16} {:<22} {}", tool.id.green(), tool.name, tool.category.dimmed());
            if let Some(pricing) = &tool.pricing {
                println!("  {:<16} {}", "", pricing.dimmed());
            }
        }
        println!();
    }
    Ok(())
}

fn handle_categories_command(catalog: &Catalog, args: &SelectionArgs) -> Result<()> {
    let selection = build_selection(args)?;
    let tools = selection.resolve(catalog)?;
    info!("Resolving categories for {} tools", tools.len());

    let categories = resolve_categories(catalog, &tools);
    if categories.is_empty() {
        println!("{}", "No tools selected".yellow());
        return Ok(());
    }

    for category in &categories {
        println!("{} ({} features)", category.name.cyan().bold(), category.features.len());
        for feature in &category.features {
            println!("  {}", feature);
        }
    }
    println!(
        "\n{} categories, {} features",
        categories.len(),
        feature_count(&categories)
    );
    Ok(())
}

fn handle_compare_command(
    catalog: &Catalog,
    args: &SelectionArgs,
    format: OutputFormat,
) -> Result<()> {
    let matrix = build_matrix(catalog, args)?;
    info!("Comparing {} tools as {:?}", matrix.column_count(), format);

    match format {
        OutputFormat::Table => {
            println!("{}", matrix.summary().cyan().bold());
            println!();
            print!("{}", matrix.render_table(true));
        }
        OutputFormat::Csv => print!("{}", export::render(&matrix, ExportFormat::Csv)?),
        OutputFormat::Json => println!("{}", export::render(&matrix, ExportFormat::Json)?),
    }
    Ok(())
}

fn handle_export_command(
    catalog: &Catalog,
    args: &SelectionArgs,
    format: ExportFormat,
    output: Option<&PathBuf>,
    config: &Config,
) -> Result<()> {
    let matrix = build_matrix(catalog, args)?;
    info!("Exporting {} tools as {}", matrix.column_count(), format);

    let sink: Box<dyn Download> = match output {
        Some(path) => Box::new(FileDownload::new(path)),
        None => Box::new(config.download()),
    };
    let path = export::export(&matrix, format, sink.as_ref()).context("Export failed")?;

    println!("{} {}", "Exported:".green(), path.display());
    Ok(())
}

fn handle_share_command(catalog: &Catalog, args: &SelectionArgs, config: &Config) -> Result<()> {
    let selection = build_selection(args)?;
    let tools = selection.resolve_for_compare(catalog)?;
    let payload = SharePayload::for_tools(&config.share.base_url, &tools).context("Invalid share.base_url")?;
    info!("Sharing {}", payload.url);

    let command = config.share_command();
    let clipboard = config.clipboard();
    let outcome = share_best_effort(
        command.as_ref().map(|c| c as &dyn ShareTarget),
        &clipboard,
        &payload,
    );

    println!("{}", outcome.message().green());
    Ok(())
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // RUST_LOG wins over the configured level
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(config.log_filter());
    }

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
