//! cordapp-codegen CLI entrypoint
//! Parses command-line arguments and dispatches to the application use cases.
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use cordapp_codegen::application::{GenerateClientRequest, services};
use cordapp_codegen::config::GeneratorConfig;

#[derive(Parser)]
#[command(name = "cordapp-codegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate a Kotlin CorDapp client from a node's OpenAPI document
    Generate {
        /// Path or URL of the OpenAPI document (YAML or JSON)
        #[arg(long)]
        schema: String,
        /// Package of the generated sources
        #[arg(long = "package")]
        package_name: String,
        /// Output directory for generated code
        #[arg(long)]
        output_dir: PathBuf,
        /// Also emit a test class per API client
        #[arg(long)]
        generate_tests: bool,
        /// Generator configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Skip the source formatter
        #[arg(long)]
        no_format: bool,
    },
    /// Print the resolved type mapping table
    #[command(name = "type-mappings")]
    TypeMappings {
        /// Generator configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn load_config(path: Option<&Path>) -> anyhow::Result<GeneratorConfig> {
    GeneratorConfig::load_or_default(path).await.with_context(|| match path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Invalid default configuration".to_string(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            schema,
            package_name,
            output_dir,
            generate_tests,
            config,
            no_format,
        } => {
            let mut config = load_config(config.as_deref()).await?;
            if no_format {
                config.formatter.enabled = false;
            }

            let use_case = services::generate_client_use_case(&config)
                .await
                .context("Failed to set up the generator")?;

            info!(schema = %schema, package = %package_name, "Generating CorDapp client");
            let response = use_case
                .execute(GenerateClientRequest {
                    schema: schema.clone(),
                    package_name,
                    output_dir,
                    generate_tests,
                })
                .await
                .with_context(|| format!("Failed to generate client from {schema}"))?;

            for file in &response.files {
                println!("{}", file.display());
            }
            for conflict in &response.conflicts {
                warn!(
                    key = %conflict.key,
                    previous = %conflict.previous,
                    replacement = %conflict.replacement,
                    "Type mapping overridden"
                );
            }
            for failure in &response.format_failures {
                warn!(path = %failure.path.display(), message = %failure.message, "File left unformatted");
            }

            info!(
                files = response.files.len(),
                paths = response.paths,
                output_dir = %response.output_path.display(),
                "Generation complete"
            );
        }
        Commands::TypeMappings { config } => {
            let config = load_config(config.as_deref()).await?;
            let table = services::type_mappings_use_case(&config)
                .execute()
                .await
                .context("Failed to resolve type mappings")?;

            for (key, target) in table.iter() {
                println!("{key} -> {target}");
            }
        }
    }

    Ok(())
}
