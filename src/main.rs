use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use article_crew::{
    AppState, ArticleInputs, BackendKind, Crew, GenerationBackend, ServerConfig,
    execute_pipeline, format_run_summary, notices, serve, write_article, write_run_record,
};

#[derive(Parser)]
#[command(name = "article-crew")]
#[command(author, version, about = "Blog articles from a planner, writer and editor LLM crew", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the article form in the browser
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8501")]
        addr: SocketAddr,

        /// Finished jobs kept in memory
        #[arg(long, default_value = "64")]
        max_jobs: usize,

        #[command(flatten)]
        backend: BackendArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate one article from the command line
    Generate {
        /// Article topic
        #[arg(short, long)]
        topic: String,

        /// Word limit (passed to the editor as-is)
        #[arg(short, long, default_value = "500")]
        limit: String,

        /// Write the article here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write every stage output and timing as JSON
        #[arg(long)]
        record: Option<PathBuf>,

        #[command(flatten)]
        backend: BackendArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Args)]
struct BackendArgs {
    /// Generation backend
    #[arg(long, value_enum, default_value_t = BackendKind::Gemini)]
    provider: BackendKind,

    /// Model name (provider default when omitted)
    #[arg(long)]
    model: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    temperature: Option<f64>,
}

impl BackendArgs {
    fn build(self) -> Result<Arc<dyn GenerationBackend>> {
        self.provider
            .build(self.model, self.temperature)
            .context("Failed to configure generation backend")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            addr,
            max_jobs,
            backend,
            verbose,
        } => {
            setup_logging(verbose);
            let backend = backend.build()?;
            let config = ServerConfig { addr, max_jobs };
            serve(config, AppState::new(backend, Crew::article(), max_jobs)).await
        }
        Commands::Generate {
            topic,
            limit,
            output,
            record,
            backend,
            verbose,
        } => {
            setup_logging(verbose);
            generate_article(topic, limit, output, record, backend).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn generate_article(
    topic: String,
    limit: String,
    output: Option<PathBuf>,
    record: Option<PathBuf>,
    backend: BackendArgs,
) -> Result<()> {
    let inputs = ArticleInputs::new(topic, limit);
    if !inputs.has_topic() {
        warn!("{}", notices::EMPTY_TOPIC_WARNING);
        anyhow::bail!(notices::EMPTY_TOPIC_WARNING);
    }

    let backend = backend.build()?;
    let crew = Crew::article();

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    info!("{}", notices::IN_PROGRESS);
    let run = match execute_pipeline(backend.as_ref(), &crew, inputs, &cancel).await {
        Ok(run) => run,
        Err(e) => {
            warn!("Pipeline failed: {}", e);
            anyhow::bail!(notices::notice_for(&e));
        }
    };

    info!("{}", format_run_summary(&run));

    if let Some(path) = &record {
        write_run_record(&run, path)?;
        info!("Run record written to {:?}", path);
    }

    let article = run
        .article()
        .context("Pipeline finished without an article")?;

    match &output {
        Some(path) => {
            write_article(article, path)?;
            info!("Article written to {:?}", path);
        }
        None => println!("{}", article),
    }

    info!("{}", notices::SUCCESS);
    Ok(())
}
