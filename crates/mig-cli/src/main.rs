//! `mig`: drive channel and data migrations from the command line

mod sample;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mig_core::{
    ChannelSimulationSummary, InMemoryStore, MigrationPipeline, MigrationStatusReport, OrchestratorConfig,
    PlanOrchestrator,
};
use mig_model::{Customer, MigrationStatus, MigrationStrategy};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "mig", version, about = "Legacy channel and data migration orchestrator")]
struct Cli {
    /// Orchestrator configuration (TOML or YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score the migration risk of a customer or one of its channels
    Assess {
        /// Customer JSON document
        customer: PathBuf,
        /// Assess only this channel
        #[arg(long)]
        channel: Option<String>,
    },
    /// Plan a customer migration and run its simulations
    Plan {
        /// Customer JSON document
        customer: PathBuf,
        /// phased, big-bang or parallel
        #[arg(long, default_value = "phased")]
        strategy: MigrationStrategy,
        /// Execute every channel once simulations pass
        #[arg(long)]
        execute: bool,
    },
    /// Migrate a seeded sample database into an in-memory modern store
    Pipeline {
        /// Rows seeded into each sample table
        #[arg(long, default_value_t = 100)]
        records: usize,
    },
}

#[derive(Debug, Serialize)]
struct PlanOutput {
    status: MigrationStatusReport,
    simulations: Vec<ChannelSimulationSummary>,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(path: Option<&Path>) -> Result<OrchestratorConfig> {
    match path {
        Some(path) => OrchestratorConfig::from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(OrchestratorConfig::default()),
    }
}

fn load_customer(path: &Path) -> Result<Customer> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing customer from {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn assess(config: &OrchestratorConfig, customer: &Path, channel: Option<&str>) -> Result<()> {
    let customer = load_customer(customer)?;
    let orchestrator = PlanOrchestrator::from_config(config)?;
    let assessment = match channel {
        Some(id) => {
            let channel = customer
                .channel(id)
                .with_context(|| format!("customer {} has no channel {id}", customer.customer_id))?;
            orchestrator.risk_assessor().assess_channel(&customer, channel)
        }
        None => orchestrator.risk_assessor().assess_customer(&customer),
    };
    print_json(&assessment)
}

fn plan(config: &OrchestratorConfig, customer: &Path, strategy: MigrationStrategy, execute: bool) -> Result<()> {
    let customer = load_customer(customer)?;
    let orchestrator = PlanOrchestrator::from_config(config)?;
    let plan = orchestrator.create_migration_plan(&customer, strategy);
    let plan_id = plan.plan_id.as_str();

    let simulations = orchestrator.run_simulations(plan_id)?;
    if execute {
        let status = orchestrator.get_migration_status(plan_id)?.overall_status;
        if status != MigrationStatus::Ready {
            bail!("plan {plan_id} is {status} after simulation, refusing to execute");
        }
        orchestrator.execute_migration(plan_id, None)?;
    }

    print_json(&PlanOutput {
        status: orchestrator.get_migration_status(plan_id)?,
        simulations,
    })
}

async fn pipeline(config: &OrchestratorConfig, records: usize) -> Result<()> {
    let legacy = Arc::new(InMemoryStore::legacy());
    let profile = sample::seed(legacy.as_ref(), records).await?;
    let pipeline =
        MigrationPipeline::new(legacy, Arc::new(InMemoryStore::modern())).with_config(config.pipeline);

    let result = pipeline
        .run_migration("db2_mainframe", "postgresql_cloud", "batch", &profile)
        .await;
    print_json(&result)?;
    if result.status == MigrationStatus::Failed {
        bail!("migration failed: {}", result.errors.join("; "));
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Assess { customer, channel } => assess(&config, &customer, channel.as_deref()),
        Command::Plan {
            customer,
            strategy,
            execute,
        } => plan(&config, &customer, strategy, execute),
        Command::Pipeline { records } => pipeline(&config, records).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "command failed");
            ExitCode::FAILURE
        }
    }
}
