use anyhow::{Context, Result};
use assets::AssetResolver;
use catalog::{AssetCategory, CatalogWorkbook};
use clap::{Parser, Subcommand};
use colored::Colorize;
use runner::{RunConfig, RunOrchestrator, RunSummary};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Release name quoted in outreach drafts unless overridden
const DEFAULT_CAMPAIGN: &str = "Condor 0225 update";

/// Image Sourcer - match catalog titles to poster and still images
#[derive(Parser)]
#[command(name = "image-sourcer")]
#[command(about = "Copy movie posters and stills listed in the image catalog", long_about = None)]
struct Cli {
    /// Catalog directory holding Movies.tsv and Distributor_contact.tsv
    #[arg(long, default_value = "Images tracker", global = true)]
    catalog_dir: PathBuf,

    /// Root of the distributor-organized image tree
    #[arg(long, default_value = "Movies", global = true)]
    source_dir: PathBuf,

    /// Where the dated output folder is created (defaults to ~/Downloads)
    #[arg(long, global = true)]
    download_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, copy, update the catalog and write the report
    Run {
        /// Release named in outreach drafts; pass "" to leave it out
        #[arg(long, default_value = DEFAULT_CAMPAIGN)]
        campaign: String,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which files would be picked for one title, without copying
    Resolve {
        /// Movie title as written in the catalog
        #[arg(long)]
        title: String,

        /// Distributor folder name
        #[arg(long)]
        distributor: String,

        /// Only resolve this category (poster or still)
        #[arg(long)]
        category: Option<AssetCategory>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging lives for this invocation only
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::with_default(subscriber, || dispatch(cli))
}

fn dispatch(cli: Cli) -> Result<()> {
    let download_dir = cli.download_dir.unwrap_or_else(default_download_dir);

    match cli.command {
        Commands::Run { campaign, json } => {
            handle_run(cli.catalog_dir, cli.source_dir, download_dir, campaign, json)
        }
        Commands::Resolve {
            title,
            distributor,
            category,
        } => handle_resolve(cli.source_dir, &title, &distributor, category),
    }
}

/// The user's Downloads folder, falling back to ./Downloads
fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
}

/// Handle the 'run' command
fn handle_run(
    catalog_dir: PathBuf,
    source_dir: PathBuf,
    download_dir: PathBuf,
    campaign: String,
    json: bool,
) -> Result<()> {
    let mut workbook = CatalogWorkbook::open(&catalog_dir)
        .with_context(|| format!("Failed to open catalog {}", catalog_dir.display()))?;

    let mut config = RunConfig::new(source_dir, download_dir);
    if !campaign.trim().is_empty() {
        config = config.with_campaign(campaign);
    }

    let orchestrator = RunOrchestrator::new(&config)?;
    let summary = orchestrator.run(&mut workbook)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

/// Handle the 'resolve' command
fn handle_resolve(
    source_dir: PathBuf,
    title: &str,
    distributor: &str,
    category: Option<AssetCategory>,
) -> Result<()> {
    let resolver = AssetResolver::new(source_dir);
    let categories = match category {
        Some(category) => vec![category],
        None => AssetCategory::ALL.to_vec(),
    };

    println!("{}", format!("{} ({})", title, distributor).bold().blue());
    for category in categories {
        let primary = resolver.resolve(title, distributor, category);
        let (path, via) = match primary {
            Some(path) => (Some(path), "folder search"),
            None => (
                resolver.resolve_by_title_only(title, distributor, category),
                "title-only fallback",
            ),
        };
        match path {
            Some(path) => println!(
                "{}{}: {} [{}]",
                "• ".green(),
                category,
                path.display(),
                via
            ),
            None => println!("{}{}: {}", "• ".red(), category, "not found".red()),
        }
    }
    Ok(())
}

/// Helper function to print a finished run
fn print_summary(summary: &RunSummary) {
    print!("{}", "Image sourcing complete:\n".bold().blue());
    println!("{}Entries processed: {}", "• ".green(), summary.processed);
    println!("{}Files copied: {}", "• ".green(), summary.copied);
    println!("{}Catalog rows updated: {}", "• ".green(), summary.catalog_rows_updated);

    let missing = summary.unmatched.total();
    if missing > 0 {
        println!("{}Titles without images: {}", "• ".yellow(), missing.to_string().yellow());
        for (distributor, titles) in summary.unmatched.iter() {
            println!("  - {}: {}", distributor, titles.join(", "));
        }
    }
    if !summary.copy_errors.is_empty() {
        println!(
            "{}Copy errors: {}",
            "• ".red(),
            summary.copy_errors.len().to_string().red()
        );
    }
    if !summary.catalog_titles_skipped.is_empty() {
        println!(
            "{}Titles not found in catalog at update time: {}",
            "• ".yellow(),
            summary.catalog_titles_skipped.join(", ")
        );
    }
    println!("Report: {}", summary.report_path.display());
}
