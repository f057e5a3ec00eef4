//! CLI for preparing a Postgres personnel database
//!
//! Applies schema migrations, loads JSON fixtures, and reports row counts.
//! Outputs JSON so scripts can parse the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use personnel_core::config::Config;
use personnel_core::domains::assignments::models::Assignment;
use personnel_core::domains::departments::models::Department;
use personnel_core::domains::employees::models::Employee;
use personnel_core::domains::salaries::models::Salary;
use personnel_core::kernel::ServerDeps;
use personnel_core::seed::{SeedData, SeedSummary};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "seed_cli")]
#[command(about = "Personnel database setup CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Load departments, employees, assignments, and salaries from a JSON file
    Load {
        file: PathBuf,
        /// Apply migrations before loading
        #[arg(long)]
        migrate: bool,
    },

    /// Print row counts
    Summary,
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seeded: Option<SeedSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    counts: Option<RowCounts>,
}

#[derive(Serialize)]
struct RowCounts {
    departments: i64,
    employees: i64,
    assignments: i64,
    salaries: i64,
}

fn output(resp: Response) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string(&resp).context("Failed to serialize response")?
    );
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => cmd_migrate().await,
        Commands::Load { file, migrate } => cmd_load(file, migrate).await,
        Commands::Summary => cmd_summary().await,
    }
}

async fn get_pool() -> Result<PgPool> {
    let config = Config::from_env()?;
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(config.require_database_url()?)
        .await
        .context("Failed to connect to database")
}

async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")
}

// ============================================================================
// Commands
// ============================================================================

async fn cmd_migrate() -> Result<()> {
    let pool = get_pool().await?;
    run_migrations(&pool).await?;

    output(Response {
        success: true,
        message: Some("Migrations applied".to_string()),
        seeded: None,
        counts: None,
    })
}

async fn cmd_load(file: PathBuf, migrate: bool) -> Result<()> {
    let seed = SeedData::from_file(&file)?;
    let pool = get_pool().await?;
    if migrate {
        run_migrations(&pool).await?;
    }

    let deps = ServerDeps::postgres(pool);
    let summary = seed.load_into(&deps).await?;

    output(Response {
        success: true,
        message: Some(format!("Loaded {}", file.display())),
        seeded: Some(summary),
        counts: None,
    })
}

async fn cmd_summary() -> Result<()> {
    let pool = get_pool().await?;

    let counts = RowCounts {
        departments: Department::count(&pool).await?,
        employees: Employee::count(&pool).await?,
        assignments: Assignment::count(&pool).await?,
        salaries: Salary::count(&pool).await?,
    };

    output(Response {
        success: true,
        message: None,
        seeded: None,
        counts: Some(counts),
    })
}
