//! Binary entry point for hoopdex.
//!
//! This binary provides the CLI interface for browsing and validating the
//! NBA statistics tool catalog.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use hoopdex::config::{ENV_CONFIG_PATH, HoopdexConfig};
use hoopdex::mcp::DiscoveryTools;
use hoopdex::{
    Catalog, CatalogSource, CategoryCount, DiscoveryEngine, Refinement, SearchMode, TagIndex,
    ToolSummary, observability,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Hoopdex - category-based discovery over NBA statistics tools.
#[derive(Parser)]
#[command(name = "hoopdex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog definition file (overrides config).
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// List primary categories with tool counts.
    Categories,

    /// List secondary (modifier) categories with tool counts.
    Modifiers,

    /// List the tools in a category.
    List {
        /// Category name.
        category: String,
    },

    /// Narrow a primary category by modifiers.
    Refine {
        /// Primary category name.
        primary: String,

        /// Modifier category names.
        modifiers: Vec<String>,
    },

    /// Search tools by category tags.
    Search {
        /// Category tags.
        #[arg(required = true)]
        tags: Vec<String>,

        /// Match any tag instead of all tags.
        #[arg(long)]
        any: bool,
    },

    /// Find tools by keyword.
    Find {
        /// Keyword matched against id, name and description.
        query: String,
    },

    /// Show the full definition of a tool.
    Describe {
        /// Tool id.
        tool_id: String,
    },

    /// Validate a catalog definition file.
    Validate {
        /// File to validate (default: the configured catalog).
        file: Option<PathBuf>,
    },

    /// Print the discovery meta-tool definitions.
    MetaTools,

    /// Execute a discovery meta-tool.
    MetaCall {
        /// Meta-tool name.
        name: String,

        /// JSON arguments.
        #[arg(default_value = "{}")]
        arguments: String,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref(), cli.catalog.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize observability: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: &HoopdexConfig) -> CliResult {
    let json = cli.json;

    if let Commands::Validate { file } = &cli.command {
        return cmd_validate(config, file.as_deref(), json);
    }

    let registry = Arc::new(config.registry()?);
    let engine = registry.engine()?;

    match cli.command {
        Commands::Categories => print_counts(&engine.list_top_level_categories(), json),
        Commands::Modifiers => print_counts(&engine.list_secondary_categories(), json),
        Commands::List { category } => print_tools(&engine.list_tools_by_name(&category)?, json),
        Commands::Refine { primary, modifiers } => cmd_refine(&engine, &primary, &modifiers, json),
        Commands::Search { tags, any } => {
            let mode = if any { SearchMode::Any } else { SearchMode::All };
            print_tools(&engine.search_by_names(&tags, mode)?, json)
        },
        Commands::Find { query } => print_tools(&engine.find(&query)?, json),
        Commands::Describe { tool_id } => {
            let tool = registry.resolver()?.resolve(&tool_id)?;
            cmd_describe(&tool, json)
        },
        Commands::MetaTools => {
            let tools = DiscoveryTools::new(registry)?;
            print_json(&tools.list_tools())
        },
        Commands::MetaCall { name, arguments } => {
            let arguments = serde_json::from_str(&arguments)?;
            let result = DiscoveryTools::new(registry)?.execute(&name, arguments)?;
            if let Some(text) = result.text() {
                println!("{text}");
            }
            if result.is_error {
                return Err("meta-tool reported an error".into());
            }
            Ok(())
        },
        Commands::Validate { .. } => Ok(()),
    }
}

/// Loads configuration.
fn load_config(path: Option<&Path>, catalog: Option<&Path>) -> hoopdex::Result<HoopdexConfig> {
    let config = if let Some(config_path) = path {
        HoopdexConfig::load_from_file(config_path)?
    } else {
        match std::env::var(ENV_CONFIG_PATH) {
            Ok(config_path) if !config_path.trim().is_empty() => {
                HoopdexConfig::load_from_file(Path::new(&config_path))?
            },
            _ => HoopdexConfig::load_default()?,
        }
    };

    let config = config.with_env_overrides();
    Ok(match catalog {
        Some(catalog) => config.with_catalog_path(catalog),
        None => config,
    })
}

fn cmd_refine(
    engine: &DiscoveryEngine,
    primary: &str,
    modifiers: &[String],
    json: bool,
) -> CliResult {
    let taxonomy = engine.snapshot().taxonomy();
    let primary = taxonomy.parse(primary)?;
    let modifiers = modifiers
        .iter()
        .map(|name| taxonomy.parse(name))
        .collect::<hoopdex::Result<Vec<_>>>()?;
    let refinement = engine.refine(primary, &modifiers)?;

    if json {
        return print_json(&refinement);
    }
    print_refinement(&refinement);
    Ok(())
}

fn cmd_describe(tool: &hoopdex::ToolDescriptor, json: bool) -> CliResult {
    if json {
        return print_json(tool);
    }

    let categories: Vec<&str> = tool.categories.iter().map(|c| c.as_str()).collect();
    println!("{} ({})", tool.display_name, tool.id);
    println!("  {}", tool.description);
    println!("  categories: {}", categories.join(", "));
    println!("  dispatch:   {}", tool.dispatch_handle);
    println!("  parameters:");
    println!("{}", serde_json::to_string_pretty(&tool.parameter_schema)?);
    Ok(())
}

fn cmd_validate(config: &HoopdexConfig, file: Option<&Path>, json: bool) -> CliResult {
    let source = file.map_or_else(|| config.catalog_source(), CatalogSource::file);
    let catalog = Catalog::from_source(&source, &config.taxonomy)?;
    let index = TagIndex::build(&catalog, &config.taxonomy);

    let counts: Vec<CategoryCount> = config
        .taxonomy
        .categories()
        .map(|category| CategoryCount::new(category, index.count(category)))
        .collect();

    if json {
        return print_json(&serde_json::json!({
            "source": source.to_string(),
            "tools": catalog.len(),
            "categories": counts,
        }));
    }

    println!("{source}: {} tools OK", catalog.len());
    print_counts(&counts, false)
}

fn print_counts(counts: &[CategoryCount], json: bool) -> CliResult {
    if json {
        return print_json(&counts);
    }
    for entry in counts {
        println!(
            "{:<12} {:>3}  {}",
            entry.category.as_str(),
            entry.count,
            entry.description
        );
    }
    Ok(())
}

fn print_tools(tools: &[ToolSummary], json: bool) -> CliResult {
    if json {
        return print_json(&tools);
    }
    if tools.is_empty() {
        println!("No tools found.");
        return Ok(());
    }
    for tool in tools {
        let categories: Vec<&str> = tool.categories.iter().map(|c| c.as_str()).collect();
        println!("{}  [{}]", tool.id, categories.join(", "));
        println!("    {}", tool.description);
    }
    println!("\n{} tool(s)", tools.len());
    Ok(())
}

fn print_refinement(refinement: &Refinement) {
    println!(
        "{}: {} tools",
        refinement.primary.as_str(),
        refinement.total
    );
    if !refinement.available.is_empty() {
        println!("Narrow further with:");
        for entry in &refinement.available {
            println!("  {:<12} {:>3}", entry.category.as_str(), entry.count);
        }
    }
    if !refinement.modifiers.is_empty() {
        println!();
        for tool in &refinement.tools {
            println!("{}  {}", tool.id, tool.description);
        }
        println!("\n{} tool(s)", refinement.tools.len());
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
