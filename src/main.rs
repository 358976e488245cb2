use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use jobfeed::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use jobfeed::{
    ClientConfig, FieldKind, JobRecord, SearchResult, SearchSession, SuggestionEngine, Vocabulary,
};

#[derive(Parser)]
#[command(name = "jobfeed")]
#[command(about = "Search a remote job feed by keyword, location, and industry")]
struct Cli {
    /// Job board base URL
    #[arg(long, global = true, env = "JOBFEED_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "JOBFEED_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Location vocabulary file (term,code rows)
    #[arg(long, global = true, env = "JOBFEED_LOCATIONS")]
    locations: Option<PathBuf>,

    /// Industry vocabulary file (term,code rows)
    #[arg(long, global = true, env = "JOBFEED_INDUSTRIES")]
    industries: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the job feed
    Search {
        /// Keywords (omit for all jobs)
        query: Option<String>,

        /// Number of results
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        count: Option<i64>,

        /// Location, e.g. "austria" or "united states"
        #[arg(short, long)]
        location: Option<String>,

        /// Industry, e.g. "devops & sysadmin"
        #[arg(short, long)]
        industry: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest a correction from the built-in list of common job terms
    Suggest {
        query: String,
    },

    /// Decode HTML entities in text
    Decode {
        text: String,
    },

    /// List a filter vocabulary
    Vocab {
        #[arg(value_enum)]
        kind: VocabKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum VocabKind {
    Location,
    Industry,
}

impl From<VocabKind> for FieldKind {
    fn from(kind: VocabKind) -> Self {
        match kind {
            VocabKind::Location => FieldKind::Location,
            VocabKind::Industry => FieldKind::Industry,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobfeed=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let vocabulary = Arc::new(Vocabulary::load(
        cli.locations.as_deref(),
        cli.industries.as_deref(),
    ));
    let config = ClientConfig::default()
        .with_base_url(cli.base_url)
        .with_timeout(Duration::from_secs(cli.timeout));

    match cli.command {
        Commands::Search {
            query,
            count,
            location,
            industry,
            json,
        } => {
            let session = SearchSession::new(config, vocabulary)
                .context("Failed to build HTTP client")?;
            let result = session.search(
                query.as_deref(),
                count,
                location.as_deref(),
                industry.as_deref(),
            );

            if let Some(warning) = &result.warning {
                eprintln!("Warning: {}", warning);
            }

            if json {
                let out = serde_json::to_string_pretty(&result)
                    .context("Failed to serialize results")?;
                println!("{}", out);
            } else {
                print_results(&result);
            }

            if result.is_empty()
                && let Some(hint) = session.did_you_mean(query.as_deref(), 0)
            {
                println!("{}", hint);
            }
        }

        Commands::Suggest { query } => {
            match SuggestionEngine::new().suggest(Some(&query), 0) {
                Some(s) => println!("{}", s),
                None => println!("No suggestion for '{}'.", query),
            }
        }

        Commands::Decode { text } => {
            println!("{}", jobfeed::decode(&text));
        }

        Commands::Vocab { kind } => {
            let kind = FieldKind::from(kind);
            let entries = vocabulary
                .table(kind)
                .map(|t| t.entries())
                .unwrap_or_default();
            if entries.is_empty() {
                println!("No {} vocabulary loaded.", kind);
            } else {
                println!("{:<32} {:<24}", "TERM", "CODE");
                println!("{}", "-".repeat(56));
                for (term, code) in entries {
                    println!("{:<32} {:<24}", truncate(term, 30), code);
                }
            }
        }
    }

    Ok(())
}

fn print_results(result: &SearchResult) {
    if result.is_empty() {
        println!("No jobs found.");
        return;
    }

    println!(
        "{:<8} {:<36} {:<22} {:<16} {:>20}",
        "ID", "TITLE", "COMPANY", "GEO", "SALARY"
    );
    println!("{}", "-".repeat(106));
    for job in &result.jobs {
        print_job(job);
    }
}

fn print_job(job: &JobRecord) {
    println!(
        "{:<8} {:<36} {:<22} {:<16} {:>20}",
        job.id,
        truncate(&job.title, 34),
        truncate(&job.company_name, 20),
        truncate(&job.geo, 14),
        job.salary_range().unwrap_or_else(|| "-".to_string())
    );
    if let Some(published) = job.published() {
        println!("         Published: {}", published.format("%Y-%m-%d"));
    }
    if !job.url.is_empty() {
        println!("         {}", job.url);
    }
    let excerpt = job.excerpt.trim();
    if !excerpt.is_empty() {
        for line in textwrap::wrap(excerpt, 88) {
            println!("         {}", line);
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
