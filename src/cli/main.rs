// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Lonkero Mutator - Standalone CLI
 *
 * Features:
 * - Mutant generation for a captured request (JSON summaries)
 * - WAF fingerprinting against a single target
 * - Sample configuration generation
 *
 * (c) 2026 Bountyy Oy
 */

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use lonkero_mutator::config::{AppConfig, ConfigLoader, ObservabilityConfig};
use lonkero_mutator::fuzzer::{CapabilitySet, MutantFactory, MutantSummary};
use lonkero_mutator::http_client::{HttpClient, HttpResponse};
use lonkero_mutator::request::{CapturedRequest, FuzzableRequest};
use lonkero_mutator::scanners::WafFingerprinter;
use lonkero_mutator::worker::ProbePool;

/// Lonkero Mutator - request mutation engine and WAF fingerprinting
#[derive(Parser)]
#[command(name = "lonkero-mutate")]
#[command(author = "Bountyy Oy <info@bountyy.fi>")]
#[command(version = "2.0.0")]
#[command(about = "Generate fuzzing mutants from captured requests.", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Quiet mode - only show errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (YAML, TOML or JSON)
    #[arg(short, long, global = true, env = "LONKERO_MUTATOR_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate mutants for a captured request
    Mutate {
        /// Captured request file (JSON)
        #[arg(short, long)]
        request: PathBuf,

        /// Probe string (repeatable)
        #[arg(short, long)]
        probe: Vec<String>,

        /// File with one probe string per line
        #[arg(long)]
        probes_file: Option<PathBuf>,

        /// Append probes to the original values instead of replacing them
        #[arg(long)]
        append: bool,

        /// Only fuzz these parameter names (repeatable)
        #[arg(long)]
        param: Vec<String>,

        /// Extra header name to fuzz (repeatable)
        #[arg(short = 'H', long)]
        fuzz_header: Vec<String>,

        /// Enable every mutation surface regardless of config
        #[arg(long)]
        all_surfaces: bool,

        /// ETag of the baseline response, sent back as If-None-Match
        #[arg(long, conflicts_with = "fetch_baseline")]
        etag: Option<String>,

        /// Send the original request first and link its response to every mutant
        #[arg(long)]
        fetch_baseline: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fingerprint the Web Application Firewall in front of a URL
    Waf {
        /// Target URL
        url: String,

        /// Probe worker count (defaults to config)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Request header as "Name: value" (repeatable)
        #[arg(long)]
        header: Vec<String>,
    },

    /// Generate sample configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "lonkero-mutator.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::new(path)?.load_config()?,
        None => AppConfig::from_env()?,
    };

    init_tracing(&cli, &config.observability);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("lonkero-mutator")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli, config))
}

fn init_tracing(cli: &Cli, observability: &ObservabilityConfig) {
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else if cli.verbose {
        EnvFilter::new("info")
    } else if cli.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&observability.log_level))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if observability.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn async_main(cli: Cli, config: AppConfig) -> Result<()> {
    match cli.command {
        Commands::Mutate {
            request,
            probe,
            probes_file,
            append,
            param,
            fuzz_header,
            all_surfaces,
            etag,
            fetch_baseline,
            output,
        } => {
            let mut probes = probe;
            if let Some(path) = probes_file {
                probes.extend(read_probes(&path)?);
            }

            let mut fuzzer_config = config.fuzzer.clone();
            fuzzer_config.fuzzable_headers.extend(fuzz_header);
            let mut capabilities = CapabilitySet::from(&fuzzer_config);
            if all_surfaces {
                capabilities = CapabilitySet {
                    file_content_ext: capabilities.file_content_ext.clone(),
                    ..CapabilitySet::all(capabilities.fuzzable_headers.clone())
                };
            }

            run_mutate(MutateArgs {
                request,
                probes,
                append,
                params: param,
                capabilities,
                etag,
                fetch_baseline,
                output,
                config,
            })
            .await
        }
        Commands::Waf {
            url,
            workers,
            header,
        } => run_waf(&url, workers, &header, &config).await,
        Commands::Init { output } => generate_config(output),
    }
}

struct MutateArgs {
    request: PathBuf,
    probes: Vec<String>,
    append: bool,
    params: Vec<String>,
    capabilities: CapabilitySet,
    etag: Option<String>,
    fetch_baseline: bool,
    output: Option<PathBuf>,
    config: AppConfig,
}

async fn run_mutate(args: MutateArgs) -> Result<()> {
    let start = Instant::now();

    let raw = std::fs::read_to_string(&args.request)
        .with_context(|| format!("Failed to read request file: {:?}", args.request))?;
    let request = FuzzableRequest::try_from(CapturedRequest::from_json(&raw)?)?;

    let baseline = if let Some(etag) = args.etag {
        Some(HttpResponse::new(
            200,
            String::new(),
            HashMap::from([("ETag".to_string(), etag)]),
        ))
    } else if args.fetch_baseline {
        let client = HttpClient::from_config(&args.config.http)?;
        let response = client
            .send(&request)
            .await
            .with_context(|| format!("Failed to fetch baseline for {}", request.describe()))?;
        info!("Baseline {} returned {}", request.describe(), response.status_code);
        Some(response)
    } else {
        None
    };

    let factory = MutantFactory::new(args.capabilities);
    let mutants = factory.create_mutants(
        &request,
        &args.probes,
        args.append,
        &args.params,
        baseline.as_ref(),
    )?;

    for mutant in &mutants {
        debug!("{}", mutant.found_at());
    }

    let summaries: Vec<MutantSummary> = mutants.iter().map(|m| m.summary()).collect();
    let json = serde_json::to_string_pretty(&summaries)?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            info!("Wrote mutants to {:?}", path);
        }
        None => println!("{}", json),
    }

    info!(
        "Generated {} mutants for {} in {:.2?}",
        mutants.len(),
        request.describe(),
        start.elapsed()
    );
    Ok(())
}

async fn run_waf(
    url: &str,
    workers: Option<usize>,
    headers: &[String],
    config: &AppConfig,
) -> Result<()> {
    let mut request = FuzzableRequest::get(url)?;
    for header in headers {
        let (name, value) = header
            .split_once(':')
            .with_context(|| format!("Invalid header (expected \"Name: value\"): {}", header))?;
        request.headers_mut().set(name.trim(), value.trim());
    }

    let client = Arc::new(HttpClient::from_config(&config.http)?);
    let pool = ProbePool::new(
        workers.unwrap_or(config.http.probe_workers),
        config.http.probe_queue_capacity,
    );
    let fingerprinter = WafFingerprinter::new(client, pool);

    let findings = fingerprinter.discover(&request).await?;
    if findings.is_empty() {
        info!("No WAF signature matched {}", request.url());
    }
    println!("{}", serde_json::to_string_pretty(&findings)?);
    Ok(())
}

fn read_probes(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read probes file: {:?}", path))?;
    Ok(content
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn generate_config(output: PathBuf) -> Result<()> {
    ConfigLoader::new(&output)?.save_config(&AppConfig::default())?;
    println!("Configuration written to {:?}", output);
    Ok(())
}
