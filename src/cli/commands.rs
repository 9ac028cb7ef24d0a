use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use crate::generator::{Generator, GeneratorOptions, DEFAULT_DISCOVERY_URL};
use crate::runtime_config::RuntimeConfig;

/// Command-line interface for apigen
///
/// Generates TypeScript client libraries from discovery documents.
#[derive(Parser, Debug)]
#[command(name = "apigen", version)]
#[command(about = "Generate TypeScript API clients from discovery documents", long_about = None)]
pub struct Cli {
    /// Directory receiving one subdirectory per API
    #[arg(short, long, global = true, env = "APIGEN_OUTPUT_DIR", default_value = "src/apis")]
    pub output: PathBuf,

    /// Repository-root index file (default: index.ts next to the output directory)
    #[arg(long, global = true)]
    pub root_index: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Maximum HTTP requests in flight (overrides APIGEN_REQUEST_CONCURRENCY)
    #[arg(long, global = true)]
    pub request_concurrency: Option<usize>,

    /// Maximum APIs generated at once (overrides APIGEN_API_CONCURRENCY)
    #[arg(long, global = true)]
    pub api_concurrency: Option<usize>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate every API in the discovery directory, then rebuild the indexes
    All {
        /// Discovery directory listing URL
        #[arg(long, default_value = DEFAULT_DISCOVERY_URL)]
        url: String,

        /// JSON file of API ids to skip: {"ignore": ["id", ...]}
        #[arg(long, env = "APIGEN_IGNORE_FILE", default_value = "ignore.json")]
        ignore: PathBuf,

        /// List private APIs as well as public ones
        #[arg(long, default_value_t = false)]
        include_private: bool,
    },
    /// Generate one or more APIs from discovery URLs or local files
    Api {
        /// Discovery document URLs or paths, generated in order
        #[arg(required = true)]
        sources: Vec<String>,
    },
    /// Rebuild the per-API packaging files and aggregate indexes from disk
    Index {
        /// Discovery directory listing URL, used for API descriptions
        #[arg(long, default_value = DEFAULT_DISCOVERY_URL)]
        url: String,

        /// List private APIs as well as public ones
        #[arg(long, default_value_t = false)]
        include_private: bool,
    },
}

impl Cli {
    /// Generator options from flags, with `runtime` supplying unset ceilings.
    pub fn generator_options(&self, runtime: &RuntimeConfig) -> GeneratorOptions {
        let include_private = match &self.command {
            Commands::All {
                include_private, ..
            }
            | Commands::Index {
                include_private, ..
            } => *include_private,
            Commands::Api { .. } => false,
        };
        GeneratorOptions {
            output_root: self.output.clone(),
            root_index: self.root_index.clone(),
            include_private,
            request_concurrency: self
                .request_concurrency
                .filter(|n| *n > 0)
                .unwrap_or(runtime.request_concurrency),
            api_concurrency: self
                .api_concurrency
                .filter(|n| *n > 0)
                .unwrap_or(runtime.api_concurrency),
        }
    }
}

/// Run a parsed command line to completion.
///
/// Returns an error when anything failed, so the process can exit non-zero.
pub async fn run_cli(cli: Cli) -> Result<()> {
    let options = cli.generator_options(&RuntimeConfig::from_env());
    let generator = Generator::new(options).context("failed to create generator")?;

    match &cli.command {
        Commands::All { url, ignore, .. } => {
            let report = generator
                .generate_all(url, ignore)
                .await
                .with_context(|| format!("fleet generation from {url} failed"))?;
            info!(
                generated = report.generated.len(),
                skipped = report.skipped.len(),
                failed = report.failed.len(),
                indexed = report.indexed,
                "done"
            );
            for (id, reason) in &report.failed {
                error!(api = %id, "{reason}");
            }
            if let Some(reason) = &report.index_error {
                bail!("aggregate index regeneration failed: {reason}");
            }
            if !report.failed.is_empty() {
                bail!("{} API(s) failed to generate", report.failed.len());
            }
            Ok(())
        }
        Commands::Api { sources } => {
            let mut failed = 0;
            for source in sources {
                match generator.generate_api(source).await {
                    Ok(path) => println!("✅ Generated {}", path.display()),
                    Err(e) => {
                        failed += 1;
                        error!(source = %source, error = %e, "failed to generate API");
                        error!("{}", generator.state().dump(source));
                    }
                }
            }
            if failed > 0 {
                bail!("{failed} of {} API(s) failed to generate", sources.len());
            }
            Ok(())
        }
        Commands::Index { url, .. } => {
            let indexed = generator
                .regenerate_index(url)
                .await
                .context("aggregate index regeneration failed")?;
            println!("✅ Indexed {indexed} API(s)");
            Ok(())
        }
    }
}
