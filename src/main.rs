use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

use casetrack::app::IngestUseCase;
use casetrack::config::Config;
use casetrack::observability::{logging, metrics};
use casetrack::pipeline::{query, summary};
use casetrack::storage::{CaseStore, SqliteCaseStore};

#[derive(Parser)]
#[command(name = "casetrack")]
#[command(about = "Case-tracking ingestion and TAT reporting for support operations")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a spreadsheet of case records, replacing the stored set
    Ingest {
        /// Path to the .xlsx/.xls file
        #[arg(long)]
        file: String,
        /// Surface per-cell coercion warnings
        #[arg(long)]
        strict: bool,
    },
    /// List stored cases with optional search, filters, and paging
    List {
        /// Substring search across case fields and original columns
        #[arg(long)]
        search: Option<String>,
        /// Exact agent name filter
        #[arg(long)]
        agent: Option<String>,
        /// Exact priority filter (e.g. Urgent)
        #[arg(long)]
        priority: Option<String>,
        /// Exact status filter (e.g. Met)
        #[arg(long)]
        status: Option<String>,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 20)]
        page_size: usize,
    },
    /// Per-agent workload summary and TAT compliance stats
    Summary,
    /// Reassign a case to an agent
    Assign {
        #[arg(long)]
        case_id: String,
        #[arg(long)]
        agent: String,
    },
    /// Record a TAT resolution on a case
    Resolve {
        #[arg(long)]
        case_id: String,
        /// New status value (e.g. Met, Not Met)
        #[arg(long)]
        status: String,
        /// Touched time to stamp, HH:MM
        #[arg(long)]
        touched: Option<String>,
    },
    /// Delete all stored cases and headers
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    logging::init_logging();

    let config = Config::load()?;
    let store: Arc<dyn CaseStore> = Arc::new(SqliteCaseStore::open(&config.storage.db_path)?);

    match cli.command {
        Commands::Ingest { file, strict } => {
            let strict = strict || config.ingest.strict;
            let use_case = IngestUseCase::new(store, config.header_map(), strict);
            let report = use_case.run(&file).await?;

            println!(
                "✅ Ingested {} cases from {} ({} blank rows skipped)",
                report.rows_ingested, file, report.rows_skipped_blank
            );
            if strict {
                for warning in &report.warnings {
                    println!("⚠️  {}", warning);
                }
            } else if !report.warnings.is_empty() {
                println!(
                    "⚠️  {} coercion warnings (re-run with --strict to see them)",
                    report.warnings.len()
                );
            }
        }
        Commands::List {
            search,
            agent,
            priority,
            status,
            page,
            page_size,
        } => {
            let stored = store.fetch_all().await?;
            let filter = query::CaseFilter {
                search,
                agent,
                priority,
                status,
            };
            let matches = query::filter_cases(&stored.records, &filter);
            let page = query::paginate(&matches, page, page_size);

            println!(
                "{:<12} {:<12} {:<16} {:<10} {:<10}",
                "CASE", "DATE", "AGENT", "PRIORITY", "STATUS"
            );
            for record in &page.items {
                println!(
                    "{:<12} {:<12} {:<16} {:<10} {:<10}",
                    record.id, record.date, record.agent, record.priority, record.status
                );
            }
            println!(
                "— page {}/{} ({} of {} cases)",
                page.page,
                page.total_pages,
                page.items.len(),
                page.total_items
            );
        }
        Commands::Summary => {
            let stored = store.fetch_all().await?;
            let summaries = summary::summarize_by_agent(&stored.records);
            let stats = summary::tat_stats(&stored.records);
            metrics::summary::computed(summaries.len() as u64);

            println!(
                "{:<16} {:>8} {:>8} {:>10} {:>7}",
                "AGENT", "OPEN", "URGENT", "COMPLETED", "TOTAL"
            );
            for s in &summaries {
                println!(
                    "{:<16} {:>8} {:>8} {:>10} {:>7}",
                    s.name, s.assigned_count, s.urgent_count, s.completed_count, s.total_count
                );
            }
            println!(
                "\nTAT: {} met / {} not met / {} other ({} urgent, {} total)",
                stats.met, stats.not_met, stats.other, stats.urgent, stats.total
            );
        }
        Commands::Assign { case_id, agent } => {
            store.update_agent(&case_id, &agent).await?;
            info!(case_id, agent, "case reassigned");
            println!("✅ Assigned {} to {}", case_id, agent);
        }
        Commands::Resolve {
            case_id,
            status,
            touched,
        } => {
            store
                .update_status(&case_id, &status, touched.as_deref())
                .await?;
            println!("✅ {} marked {}", case_id, status);
        }
        Commands::Clear => {
            store.clear().await?;
            println!("✅ Cleared all stored cases");
        }
    }

    Ok(())
}
