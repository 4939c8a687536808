//! REST Provider Generator CLI
//!
//! Command-line interface for inferring provider resources from OpenAPI documents.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use rest_provider_generator_analyzer::{render_examine_report, write_config, RestAnalyzer};
use rest_provider_generator_common::{config::DEFAULT_CONFIG_FILE, Config, Diagnostic};
use std::fs;
use std::path::{Path, PathBuf};

/// File the resolved model is written to by `generate`
const MODEL_FILE: &str = "provider_model.json";

#[derive(Parser)]
#[command(name = "rest-provider-generator")]
#[command(version, about = "Generate infrastructure providers from OpenAPI 3 documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe a document and list the resources it describes
    #[command(after_help = "EXAMPLES:\n  \
        rest-provider-generator examine --spec openapi.yaml")]
    Examine {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        spec: PathBuf,
    },

    /// Write a starting configuration from the probed resources
    #[command(after_help = "EXAMPLES:\n  \
        # Propose bindings for every usable resource\n  \
        rest-provider-generator init --spec openapi.yaml\n\n  \
        # Name the provider and choose where the configuration goes\n  \
        rest-provider-generator init \\\n    \
        --spec openapi.yaml \\\n    \
        --provider example/widgets \\\n    \
        --output ./widgets/rpg.yaml")]
    Init {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        spec: PathBuf,

        /// Provider name as <namespace>/<name>
        #[arg(short, long)]
        provider: Option<String>,

        /// Configuration file to write
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Resolve the configured resources into a provider model
    #[command(after_help = "EXAMPLES:\n  \
        rest-provider-generator generate --config rpg.yaml --output ./output")]
    Generate {
        /// Configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Examine { spec } => examine_command(&spec),
        Commands::Init {
            spec,
            provider,
            output,
            force,
        } => init_command(&spec, provider, &output, force),
        Commands::Generate { config, output } => generate_command(&config, &output),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_analyzer(spec: &Path) -> Result<RestAnalyzer> {
    println!("{} Loading OpenAPI document: {}", "→".cyan(), spec.display());
    RestAnalyzer::from_file(spec)
        .with_context(|| format!("Failed to load OpenAPI document {}", spec.display()))
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{} {}", "⚠".yellow(), diagnostic);
    }
}

fn examine_command(spec: &Path) -> Result<()> {
    let analyzer = load_analyzer(spec)?;
    let probed = analyzer.probe();
    print_diagnostics(&probed.diagnostics);

    println!(
        "{} Found {} resources\n",
        "✓".green(),
        probed.resources.len()
    );
    print!(
        "{}",
        render_examine_report(&probed.resources).context("Failed to render report")?
    );

    Ok(())
}

fn init_command(spec: &Path, provider: Option<String>, output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            output.display()
        );
    }

    let analyzer = load_analyzer(spec)?;
    let spec_file = spec_file_relative_to(spec, output)?;

    println!("{} Probing resources...", "→".cyan());
    let mut result = analyzer.init_config(spec_file);
    print_diagnostics(&result.diagnostics);

    if let Some(name) = provider {
        result.config.provider.name = name;
        result
            .config
            .provider
            .namespace()
            .context("Invalid --provider value")?;
    }

    write_config(&result.config, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("\n{}", "✓ Configuration written!".green().bold());
    println!("  Resources: {}", result.config.output.len());
    println!("\n{}", "Next steps:".bold());
    println!("  1. Review the bindings in {}", output.display());
    println!(
        "  2. Run: rest-provider-generator generate --config {}",
        output.display()
    );

    Ok(())
}

fn generate_command(config_path: &Path, output: &Path) -> Result<()> {
    println!("{} Loading configuration: {}", "→".cyan(), config_path.display());
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load configuration {}", config_path.display()))?;

    let analyzer = load_analyzer(&config.spec_path(config_path))?;

    println!("{} Resolving {} resources...", "→".cyan(), config.output.len());
    let resolution = analyzer
        .resolve(&config)
        .context("Failed to resolve configured bindings")?;
    print_diagnostics(&resolution.diagnostics);

    for resource in &resolution.resources {
        println!(
            "  {} {} ({} attributes)",
            "✓".green(),
            resource.tf_type_name.yellow(),
            resource.attributes.len()
        );
    }

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;
    let model_path = output.join(MODEL_FILE);
    let model = serde_json::to_string_pretty(&resolution.resources)
        .context("Failed to serialize provider model")?;
    fs::write(&model_path, model)
        .with_context(|| format!("Failed to write {}", model_path.display()))?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("\n{}", "Generated files:".bold());
    println!("  📄 {}", model_path.display());

    Ok(())
}

/// Path of the document as recorded in a configuration written to `config_path`
fn spec_file_relative_to(spec: &Path, config_path: &Path) -> Result<String> {
    let spec = spec
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", spec.display()))?;

    let config_dir = match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let relative = config_dir
        .canonicalize()
        .ok()
        .and_then(|dir| spec.strip_prefix(dir).ok().map(Path::to_path_buf))
        .unwrap_or(spec);

    Ok(relative.to_string_lossy().into_owned())
}
