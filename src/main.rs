use anyhow::Result;
use baeum::config::Config;
use baeum::generator::UnitGenerator;
use baeum::llm::LlmClient;
use baeum::models::{DailyCapacity, FeedbackAction, KnowledgeLevel, Medium, Plan, PlanDuration};
use baeum::scheduler;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "baeum",
    version,
    about = "Self-study learning unit planner with web content acquisition",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the learning units for a plan
    Plan {
        /// Learning topic
        topic: String,

        /// Knowledge level (basic, broader, profound)
        #[arg(short, long, default_value = "basic")]
        level: KnowledgeLevel,

        /// Daily capacity (1-2 hours, part-time, full-time)
        #[arg(short = 'd', long, default_value = "1-2 hours")]
        capacity: DailyCapacity,

        /// Program duration (one-week, one-month, three-months, ...)
        #[arg(short = 'u', long, default_value = "one-week")]
        duration: PlanDuration,

        /// Content medium (text, video)
        #[arg(short, long, default_value = "text")]
        medium: Medium,

        /// Feedback action shaping regeneration (great, harder, easier)
        #[arg(short, long, default_value = "great")]
        feedback: FeedbackAction,

        /// Emit units as JSON instead of text
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Show the scheduled unit count for a profile without generating
    Schedule {
        /// Knowledge level (basic, broader, profound)
        #[arg(short, long, default_value = "basic")]
        level: KnowledgeLevel,

        /// Daily capacity (1-2 hours, part-time, full-time)
        #[arg(short = 'd', long, default_value = "1-2 hours")]
        capacity: DailyCapacity,

        /// Program duration (one-week, one-month, three-months, ...)
        #[arg(short = 'u', long, default_value = "one-week")]
        duration: PlanDuration,
    },

    /// Probe the external collaborators (LLM endpoint, search key)
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    if let Err(e) = baeum::metrics::init_metrics() {
        tracing::warn!(error = %e, "Metrics initialization failed, continuing without metrics");
    }

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate()?;

    match cli.command {
        Commands::Plan {
            topic,
            level,
            capacity,
            duration,
            medium,
            feedback,
            json,
        } => {
            let plan = Plan::new(topic, level, capacity, duration, medium);
            plan_command(&config, plan, feedback, json).await?;
        }

        Commands::Schedule {
            level,
            capacity,
            duration,
        } => {
            let count = scheduler::unit_count(level, capacity, duration);
            println!("{level} / {capacity} / {duration}: {count} units");
        }

        Commands::Check => {
            check_command(&config).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("baeum=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("baeum=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

async fn plan_command(
    config: &Config,
    plan: Plan,
    feedback: FeedbackAction,
    json: bool,
) -> Result<()> {
    let generator = UnitGenerator::from_config(config).await?;
    let units = generator.generate(&plan, feedback).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&units)?);
        return Ok(());
    }

    for unit in &units {
        println!("Unit {}: {}", unit.unit_number, unit.title);
        for (i, section) in unit.sections.iter().enumerate() {
            println!("  [{}/{}]", i + 1, unit.sections.len());
            for line in section.lines() {
                println!("    {line}");
            }
        }
        println!();
    }

    Ok(())
}

async fn check_command(config: &Config) -> Result<()> {
    if config.search.api_key.is_empty() {
        println!("search: no API key configured (set SERPAPI_KEY)");
    } else {
        println!("search: API key present");
    }

    let llm = LlmClient::new(config.llm.clone())?;
    if llm.is_available().await {
        println!("llm: endpoint reachable at {}", config.llm.endpoint);
    } else {
        println!("llm: endpoint NOT reachable at {}", config.llm.endpoint);
    }

    println!("cache: {}", config.cache.dir.display());

    Ok(())
}
