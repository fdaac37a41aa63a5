use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kokoro::config::Config;
use kokoro::engine::{AnalyzeRequest, MoodAnalyzer};
use kokoro::inference::HttpInferenceClient;
use kokoro::llm::ReasoningClient;
use kokoro::server::{ApiConfig, ApiServer};
use kokoro::storage::{InMemoryMoodRepository, MoodRepository, SqliteMoodRepository};

#[derive(Parser)]
#[command(
    name = "kokoro",
    version,
    about = "Mood analysis backend with crisis detection and insight endpoints",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Configuration file (TOML); environment variables used otherwise
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Override the bind port
        #[arg(short, long)]
        port: Option<u16>,

        /// Disable CORS
        #[arg(long, default_value = "false")]
        no_cors: bool,
    },

    /// Analyze a single piece of text from the command line
    Analyze {
        /// Text to analyze
        text: String,

        /// User to record the entry under
        #[arg(short, long, default_value = "cli")]
        user_id: String,

        /// Do not persist the entry
        #[arg(long, default_value = "false")]
        dry_run: bool,
    },

    /// Print the support resource catalog
    Resources,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate()?;

    match cli.command {
        Commands::Serve { port, no_cors } => {
            tracing::info!(port = ?port, "Starting serve command");
            serve(config, port, no_cors).await?;
        }

        Commands::Analyze {
            text,
            user_id,
            dry_run,
        } => {
            tracing::info!(user_id = %user_id, dry_run = %dry_run, "Starting analyze command");
            analyze(config, text, user_id, dry_run).await?;
        }

        Commands::Resources => {
            resources();
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("kokoro=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("kokoro=info,warn")
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

fn build_engine(config: &Config) -> Result<(Arc<MoodAnalyzer>, Arc<HttpInferenceClient>)> {
    let inference = Arc::new(HttpInferenceClient::new(config.inference.clone())?);

    let repository: Arc<dyn MoodRepository> = if config.database.in_memory {
        Arc::new(InMemoryMoodRepository::new())
    } else {
        Arc::new(SqliteMoodRepository::new(&config.database.sqlite_path)?)
    };

    let reasoning = if config.llm.enabled {
        Some(Arc::new(ReasoningClient::new(config.llm.client.clone())?))
    } else {
        None
    };

    let engine = Arc::new(MoodAnalyzer::new(
        inference.clone(),
        inference.clone(),
        repository,
        reasoning,
        config.analysis.clone(),
    ));

    Ok((engine, inference))
}

async fn serve(config: Config, port: Option<u16>, no_cors: bool) -> Result<()> {
    if let Err(e) = kokoro::metrics::init_metrics() {
        tracing::warn!("Metrics initialization failed: {e}");
    }

    let (engine, inference) = build_engine(&config)?;

    let port = port.unwrap_or(config.server.port);
    let api_config = ApiConfig::builder()
        .bind_address_str(&format!("{}:{}", config.server.host, port))?
        .enable_cors(!no_cors)
        .build()?;

    let server = ApiServer::new(api_config, engine, inference);
    server
        .start_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

async fn analyze(config: Config, text: String, user_id: String, dry_run: bool) -> Result<()> {
    let (engine, _) = build_engine(&config)?;

    if dry_run {
        let assessment = engine.check(&text).await?;
        println!("Risk level: {}", assessment.risk_level);
        for indicator in &assessment.indicators {
            println!("  - {indicator}");
        }
        return Ok(());
    }

    let outcome = engine
        .analyze(AnalyzeRequest {
            user_id,
            text,
            expression_score: None,
        })
        .await?;

    println!("Mood score: {:.1}/10", outcome.entry.mood_score);
    println!("Sentiment:  {}", outcome.entry.sentiment.label);
    println!("Risk level: {}", outcome.crisis.risk_level);
    if !outcome.crisis.indicators.is_empty() {
        println!("Indicators:");
        for indicator in &outcome.crisis.indicators {
            println!("  - {indicator}");
        }
    }

    Ok(())
}

fn resources() {
    for resource in kokoro::crisis::catalog() {
        println!("{} ({})", resource.name, resource.availability);
        println!("  Phone: {}", resource.phone);
        if let Some(text) = &resource.text {
            println!("  Text:  {text}");
        }
        if let Some(website) = &resource.website {
            println!("  Web:   {website}");
        }
        println!("  {}", resource.description);
        println!();
    }
}
