use clap::{Parser, Subcommand};
use etabot::config::load_config;
use etabot::console::{run_chat, run_long, LONG_SAMPLES};
use etabot::create_app;
use etabot::sidecar::GenerationClient;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "etabot")]
#[command(about = "GroupMe chat bot backed by text generation and image captioning sidecars", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the GroupMe callback webhook (default).
    Serve {
        /// Run as the testing bot identity.
        #[arg(long)]
        testing: bool,

        /// Config file path (default: ETABOT_CONFIG or ~/.etabot/etabot.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Listen port (default from config or 25566)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Chat with the model in the terminal. Type `qq` to quit.
    Chat {
        /// Config file path (default: ETABOT_CONFIG or ~/.etabot/etabot.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Print unprompted long-form samples from the model.
    Long {
        /// Config file path (default: ETABOT_CONFIG or ~/.etabot/etabot.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Number of samples to generate
        #[arg(long, short = 'n', default_value_t = LONG_SAMPLES)]
        samples: usize,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("failed to load .env: {err}");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("etabot=info,tower_http=warn")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Some(Commands::Chat { config }) => chat(config).await,
        Some(Commands::Long { config, samples }) => long(config, samples).await,
        Some(Commands::Serve {
            testing,
            config,
            port,
        }) => serve(testing, config, port).await,
        None => serve(false, None, None).await,
    };

    if let Err(err) = result {
        error!("etabot failed: {err:#}");
        std::process::exit(1);
    }
}

async fn serve(testing: bool, config: Option<PathBuf>, port: Option<u16>) -> anyhow::Result<()> {
    let mut cfg = load_config(config.as_deref())?;
    if let Some(port) = port {
        cfg.server.port = port;
    }
    if testing {
        warn!("testing mode: ON");
    }

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    let webhook_path = cfg.groupme.webhook_path.clone();
    let (_state, app) = create_app(cfg, testing).await?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, %webhook_path, "etabot listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("etabot shut down");
    Ok(())
}

async fn chat(config: Option<PathBuf>) -> anyhow::Result<()> {
    let cfg = load_config(config.as_deref())?;
    let generator = GenerationClient::new(&cfg.generation)?;
    let mut rng = StdRng::from_rng(&mut rand::rng());
    let stdin = BufReader::new(tokio::io::stdin());
    run_chat(&generator, stdin, tokio::io::stdout(), &mut rng).await?;
    Ok(())
}

async fn long(config: Option<PathBuf>, samples: usize) -> anyhow::Result<()> {
    let cfg = load_config(config.as_deref())?;
    let generator = GenerationClient::new(&cfg.generation)?;
    run_long(&generator, samples, tokio::io::stdout()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {err}");
    }
}
