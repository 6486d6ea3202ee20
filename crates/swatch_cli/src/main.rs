//! Swatch CLI
//!
//! Validate theme files, emit the theme stylesheet and scaffold new themes.

mod config;
mod generate;
mod project;
mod scaffold;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use swatch_theme::{resolve, ColorScheme, SemanticBridge};

use crate::project::Project;
use crate::scaffold::TokenOverride;

#[derive(Parser)]
#[command(name = "swatch")]
#[command(author, version, about = "Swatch design tokens and theme CSS", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Project directory or path to swatch.toml
    #[arg(short = 'C', long, global = true, default_value = ".")]
    project: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Create swatch.toml and a starter theme
    Init {
        /// Directory to initialize (defaults to the project directory)
        path: Option<PathBuf>,
    },

    /// Build the theme stylesheet
    Build {
        /// Output file (overrides build.output)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Rebuild whenever a theme file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Validate every theme without writing anything
    Check,

    /// List themes and their inheritance chains
    List,

    /// Print the resolved tokens of a theme
    Resolve {
        name: String,

        /// Scheme to print values for
        #[arg(short, long, default_value = "light")]
        scheme: ColorScheme,

        /// Print the full resolved theme as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scaffold a new theme extending an existing one
    New {
        name: String,

        /// Parent theme
        #[arg(short, long)]
        extends: String,

        /// Token override, `category.token=value` (repeatable)
        #[arg(long = "set", value_name = "PATH=VALUE")]
        overrides: Vec<TokenOverride>,

        #[arg(short, long)]
        description: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init { path } => cmd_init(path.as_deref().unwrap_or(&cli.project)),
        Commands::Build { out, watch } => cmd_build(&cli.project, out.as_deref(), watch),
        Commands::Check => cmd_check(&cli.project),
        Commands::List => cmd_list(&cli.project),
        Commands::Resolve { name, scheme, json } => cmd_resolve(&cli.project, &name, scheme, json),
        Commands::New {
            name,
            extends,
            overrides,
            description,
        } => cmd_new(
            &cli.project,
            &name,
            &extends,
            &overrides,
            description.as_deref(),
        ),
    }
}

fn cmd_init(path: &Path) -> Result<()> {
    scaffold::init_project(path)?;
    println!("Initialized swatch project in {}", path.display());
    println!("Run `swatch build` to generate {}", config::SwatchConfig::default().build.output);
    Ok(())
}

fn cmd_build(project_dir: &Path, out: Option<&Path>, watch: bool) -> Result<()> {
    if watch {
        return generate::watch(project_dir, out);
    }

    let project = Project::load(project_dir)?;
    let sheet = generate::build(&project, out)?;
    let target = out.map(Path::to_path_buf).unwrap_or_else(|| project.output_path());
    println!(
        "Built {} theme(s) into {}",
        sheet.theme_names().count(),
        target.display()
    );
    Ok(())
}

fn cmd_check(project_dir: &Path) -> Result<()> {
    let project = Project::load(project_dir)?;
    let sheet = project.stylesheet()?;
    let names: Vec<&str> = sheet.theme_names().collect();
    info!("checked {}", names.join(", "));
    println!("ok: {} theme(s) valid", names.len());
    Ok(())
}

fn cmd_list(project_dir: &Path) -> Result<()> {
    let project = Project::load(project_dir)?;
    let registry = project.registry()?;
    let width = registry.names().map(str::len).max().unwrap_or(0);

    for name in registry.names() {
        match resolve(&registry, name) {
            Ok(theme) => println!("{name:<width$}  {}", theme.chain.join(" -> ")),
            Err(err) => println!("{name:<width$}  error: {err}"),
        }
    }
    Ok(())
}

fn cmd_resolve(project_dir: &Path, name: &str, scheme: ColorScheme, json: bool) -> Result<()> {
    let project = Project::load(project_dir)?;
    let registry = project.registry()?;
    let theme = resolve(&registry, name)?;

    if json {
        let out = serde_json::to_string_pretty(&theme).context("Failed to serialize theme")?;
        println!("{out}");
        return Ok(());
    }

    println!("# {} ({scheme})", theme.chain.join(" -> "));
    for (category, token, value) in theme.tokens.iter() {
        if let Some(value) = value.for_scheme(scheme) {
            println!("{category}.{token} = {value}");
        }
    }

    let bridge = SemanticBridge::build(&theme)?;
    println!();
    for (role, path) in bridge.mapping(scheme) {
        println!("{} -> {path}", role.variable());
    }
    Ok(())
}

fn cmd_new(
    project_dir: &Path,
    name: &str,
    parent: &str,
    overrides: &[TokenOverride],
    description: Option<&str>,
) -> Result<()> {
    let project = Project::load(project_dir)?;
    let path = scaffold::new_theme(&project, name, parent, overrides, description)?;
    println!("Created {}", path.display());
    Ok(())
}
