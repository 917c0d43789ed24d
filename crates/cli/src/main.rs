//! Batch import CLI for the catalog.

mod import;

use anyhow::{Context, Result};
use catalog_core::config::{AppConfig, MetadataConfig};
use catalog_metadata::CatalogStore;
use clap::{Args, Parser, Subcommand};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use import::ImportReport;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "catalogctl")]
#[command(about = "Batch CSV importers for the catalog")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    target: TargetArgs,
}

#[derive(Args, Clone)]
struct TargetArgs {
    /// Path to configuration file
    #[arg(
        long,
        global = true,
        env = "CATALOG_CONFIG",
        default_value = "config/catalog.toml"
    )]
    config: String,

    /// SQLite database file (overrides the configured metadata store)
    #[arg(long, global = true)]
    database: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import Location,Department,Category,SubCategory rows into the hierarchy
    ImportHierarchy {
        /// CSV file to import
        file: PathBuf,
    },
    /// Import LOCATION,DEPARTMENT,CATEGORY,SUBCATEGORY rows into the SKU index
    ImportSkus {
        /// CSV file to import
        file: PathBuf,
    },
}

fn load_config(target: &TargetArgs) -> Result<AppConfig> {
    let mut figment = Figment::new();
    if Path::new(&target.config).exists() {
        tracing::info!(config_path = %target.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&target.config));
    }

    let mut config: AppConfig = figment
        .merge(Env::prefixed("CATALOG_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    if let Some(path) = &target.database {
        config.metadata = MetadataConfig::Sqlite {
            path: path.clone(),
            query_timeout_secs: None,
        };
    }

    config
        .metadata
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid metadata configuration")?;
    Ok(config)
}

fn open_input(path: &Path) -> Result<File> {
    if !path.is_file() {
        println!("File not found: {}", path.display());
        anyhow::bail!("File not found: {}", path.display());
    }
    File::open(path).with_context(|| format!("failed to open {}", path.display()))
}

fn print_report(report: &ImportReport, success: &str) {
    for failure in &report.failures {
        println!("row {}: {}", failure.row, failure.error);
    }
    println!("{success}");
    println!(
        "Imported {} rows, {} failed",
        report.imported,
        report.failed()
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the import report.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Cli { command, target } = Cli::parse();

    let (file, success) = match &command {
        Commands::ImportHierarchy { file } => (file, "Data imported successfully"),
        Commands::ImportSkus { file } => (file, "SKU Data imported successfully"),
    };
    let input = open_input(file)?;

    let config = load_config(&target)?;
    let store: Arc<dyn CatalogStore> = catalog_metadata::from_config(&config.metadata)
        .await
        .context("failed to open catalog store")?;

    tracing::info!(file = %file.display(), "Starting import");
    let report = match command {
        Commands::ImportHierarchy { .. } => import::import_hierarchy(&*store, input).await,
        Commands::ImportSkus { .. } => import::import_skus(&*store, input).await,
    };
    tracing::info!(
        imported = report.imported,
        failed = report.failed(),
        "Import finished"
    );

    print_report(&report, success);
    Ok(())
}
