//! llmstxt-gen main entry point
//!
//! This is the command-line interface for the llms.txt generator.

use anyhow::Context;
use clap::Parser;
use llmstxt_gen::config::{resolve_config, Config, ConfigOverrides, IndexFormat, SummaryStyle};
use llmstxt_gen::crawler::Coordinator;
use llmstxt_gen::output::{print_statistics, FULL_FILE_NAME, INDEX_FILE_NAME};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// llmstxt-gen: builds llms.txt files for a website
///
/// Maps the site with Firecrawl, scrapes each page, summarizes it with an
/// OpenAI model and writes llms.txt plus llms-full.txt.
#[derive(Parser, Debug)]
#[command(name = "llmstxt-gen")]
#[command(version)]
#[command(about = "Generate llms.txt and llms-full.txt for a website", long_about = None)]
struct Cli {
    /// Site to index [default: https://www.sidetool.co]
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Maximum number of URLs to scrape [default: 150]
    #[arg(long)]
    max_urls: Option<usize>,

    /// Directory the files are written to [default: ./public]
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Path prefixes scraped first, comma separated [default: /blog]
    #[arg(long, value_delimiter = ',')]
    focus_paths: Option<Vec<String>>,

    /// Keep the mapper's URL order
    #[arg(long)]
    no_prioritize: bool,

    /// Firecrawl API key
    #[arg(long, env = "FIRECRAWL_API_KEY", hide_env_values = true)]
    firecrawl_api_key: Option<String>,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Skip writing llms-full.txt
    #[arg(long)]
    no_full_text: bool,

    /// Optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Index layout: links or sections
    #[arg(long)]
    format: Option<IndexFormat>,

    /// Summary style: labeled or prose
    #[arg(long)]
    style: Option<SummaryStyle>,

    /// Validate configuration and print the plan without any network calls
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.url.clone(),
            max_urls: self.max_urls,
            output_dir: self.output_dir.clone(),
            focus_paths: self.focus_paths.clone(),
            no_prioritize: self.no_prioritize,
            firecrawl_api_key: self.firecrawl_api_key.clone(),
            openai_api_key: self.openai_api_key.clone(),
            no_full_text: self.no_full_text,
            format: self.format,
            style: self.style,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; keys may come from the shell or flags.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let (config, config_hash) = match resolve_config(cli.config.as_deref(), cli.overrides()) {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e).context("could not resolve configuration");
        }
    };
    if let Some(hash) = config_hash {
        tracing::info!("Configuration loaded successfully (hash: {})", hash);
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_generate(config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("llmstxt_gen=info,warn"),
            1 => EnvFilter::new("llmstxt_gen=debug,info"),
            2 => EnvFilter::new("llmstxt_gen=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: prints the resolved settings
fn handle_dry_run(config: &Config) {
    println!("=== llmstxt-gen Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Max URLs: {}", config.site.max_urls);
    println!("  Focus paths: {}", config.site.focus_paths.join(", "));
    println!("  Prioritize: {}", config.site.prioritize);

    println!("\nFirecrawl:");
    println!("  API base: {}", config.firecrawl.api_base);
    println!("  Max attempts: {}", config.firecrawl.max_attempts);
    println!("  Retry delay: {}ms", config.firecrawl.retry_delay);

    println!("\nBatching:");
    println!("  Batch size: {}", config.batch.batch_size);
    println!("  Concurrency: {}", config.batch.concurrency);
    println!("  Delay between batches: {}ms", config.batch.batch_delay);

    println!("\nSummaries:");
    println!("  Model: {}", config.llm.model);
    println!("  Style: {:?}", config.summary.style);
    println!("  Prefer metadata: {}", config.summary.prefer_metadata);

    println!("\nOutput:");
    println!(
        "  {}",
        config.output.output_dir.join(INDEX_FILE_NAME).display()
    );
    if config.output.full_text {
        println!(
            "  {}",
            config.output.output_dir.join(FULL_FILE_NAME).display()
        );
    }
    println!("  Format: {:?}", config.output.format);

    println!("\n✓ Configuration is valid");
}

/// Handles the main generation run
async fn handle_generate(config: Config, quiet: bool) -> anyhow::Result<()> {
    let coordinator = Coordinator::new(config).context("failed to set up clients")?;

    match coordinator.run().await {
        Ok(stats) => {
            tracing::info!("Generation completed successfully");
            if !quiet {
                println!();
                print_statistics(&stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Generation failed: {}", e);
            Err(e.into())
        }
    }
}
